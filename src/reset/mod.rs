//! In-place field reset
//!
//! Resets the values of a JSON record while keeping its keys and nesting:
//! strings become `""`, numbers `0`, booleans `false`, arrays `[]` and nested
//! objects are reset field by field. [`ResetRules`] replaces any of these
//! defaults, per type or per exact key, and [`ObjectRule::Template`] merges a
//! template into nested objects instead.

mod rules;

use anyhow::{Context, Result, ensure};
use log::debug;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

pub use rules::{ObjectRule, ResetOptions, ResetRules};

/// Reset every field of `target` in place and hand the same value back
///
/// A target that is not a JSON object is returned unchanged.
pub fn reset_fields<'v>(target: &'v mut Value, options: &ResetOptions) -> &'v mut Value {
    FieldReseter::new(options).reset(target)
}

/// Reset a serializable record through its JSON representation
///
/// Fails if the record does not serialize to a JSON object, or if the reset
/// values no longer fit the type (for example a `byKey` string on a numeric field).
pub fn reset_struct<T>(target: &mut T, options: &ResetOptions) -> Result<()>
where
    T: Serialize + DeserializeOwned,
{
    let mut value = serde_json::to_value(&*target).context("failed to serialize reset target")?;
    ensure!(value.is_object(), "failed to reset record: not a JSON object");

    reset_fields(&mut value, options);

    *target = serde_json::from_value(value).context("failed to apply reset values to record")?;
    Ok(())
}

/// Reset traversal bound to one set of options
#[derive(Debug, Clone, Copy)]
pub struct FieldReseter<'a> {
    options: &'a ResetOptions,
}

impl<'a> FieldReseter<'a> {
    pub fn new(options: &'a ResetOptions) -> Self {
        Self { options }
    }

    pub fn reset<'v>(&self, target: &'v mut Value) -> &'v mut Value {
        match target {
            Value::Object(fields) => self.reset_object(fields),
            _ => debug!("reset target is not an object, leaving it unchanged: {target}"),
        }
        target
    }

    fn reset_object(&self, fields: &mut Map<String, Value>) {
        for (key, value) in fields.iter_mut() {
            self.reset_value(key, value);
        }
    }

    fn reset_value(&self, key: &str, value: &mut Value) {
        if self.options.is_skipped(key) {
            return;
        }

        match value {
            Value::Array(_) => {
                *value = self
                    .options
                    .rules
                    .array
                    .clone()
                    .unwrap_or_else(|| Value::Array(Vec::new()));
            }
            Value::Object(fields) => match self.options.rules.template() {
                Some(template) => self.merge_template(fields, template),
                None => self.reset_object(fields),
            },
            _ => *value = self.primitive_default(key, value),
        }
    }

    fn merge_template(&self, fields: &mut Map<String, Value>, template: &Map<String, Value>) {
        // template values replace existing keys even when they are skipped
        for (key, value) in fields.iter_mut() {
            match template.get(key) {
                Some(replacement) => *value = replacement.clone(),
                None => self.reset_value(key, value),
            }
        }

        for (key, replacement) in template {
            if !fields.contains_key(key) {
                fields.insert(key.clone(), replacement.clone());
            }
        }
    }

    // byKey > configured type rule > built-in default
    fn primitive_default(&self, key: &str, value: &Value) -> Value {
        let rules = &self.options.rules;
        if let Some(replacement) = rules.by_key.get(key) {
            return replacement.clone();
        }

        let (configured, fallback) = match value {
            Value::String(_) => (&rules.string, Value::String(String::new())),
            Value::Number(_) => (&rules.number, Value::from(0)),
            Value::Bool(_) => (&rules.boolean, Value::Bool(false)),
            _ => (&rules.null, Value::Null),
        };

        configured
            .as_ref()
            .filter(|configured| !configured.is_null())
            .cloned()
            .unwrap_or(fallback)
    }
}
