use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use std::{collections::BTreeSet, path::Path};

/// How nested objects are handled
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum ObjectRule {
    /// Keep the object and reset each of its fields
    #[default]
    Recurse,
    /// Take values from the template by key, reset the rest, add missing template keys
    Template(Map<String, Value>),
}

impl ObjectRule {
    const RECURSE: &'static str = "recurse";
}

impl From<Value> for ObjectRule {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(template) => Self::Template(template),
            Value::String(marker) if marker == Self::RECURSE => Self::Recurse,
            Value::Null => Self::Recurse,
            other => {
                warn!("unsupported object rule {other}, falling back to \"recurse\"");
                Self::Recurse
            }
        }
    }
}

impl From<ObjectRule> for Value {
    fn from(rule: ObjectRule) -> Self {
        match rule {
            ObjectRule::Recurse => Value::String(ObjectRule::RECURSE.to_string()),
            ObjectRule::Template(template) => Value::Object(template),
        }
    }
}

/// Replacement values used while resetting
///
/// Every rule is optional. A type rule set to `null` falls back to the
/// built-in default for that type; `array` and `by_key` entries are used as
/// given, `null` included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boolean: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null: Option<Value>,
    /// Present-but-null still counts as configured
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub array: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object: Option<ObjectRule>,
    #[serde(
        default,
        deserialize_with = "or_default",
        skip_serializing_if = "Map::is_empty"
    )]
    pub by_key: Map<String, Value>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Accept any JSON value; `null` or a value of the wrong shape yields the default
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }

    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        warn!("ignoring malformed reset option ({e}), using the default");
        T::default()
    }))
}

impl ResetRules {
    pub fn with_string(mut self, value: impl Into<Value>) -> Self {
        self.string = Some(value.into());
        self
    }

    pub fn with_number(mut self, value: impl Into<Value>) -> Self {
        self.number = Some(value.into());
        self
    }

    pub fn with_boolean(mut self, value: impl Into<Value>) -> Self {
        self.boolean = Some(value.into());
        self
    }

    pub fn with_null(mut self, value: impl Into<Value>) -> Self {
        self.null = Some(value.into());
        self
    }

    pub fn with_array(mut self, value: impl Into<Value>) -> Self {
        self.array = Some(value.into());
        self
    }

    pub fn with_template(mut self, template: Map<String, Value>) -> Self {
        self.object = Some(ObjectRule::Template(template));
        self
    }

    pub fn with_recurse(mut self) -> Self {
        self.object = Some(ObjectRule::Recurse);
        self
    }

    /// Override the reset value of every primitive field named `key`
    pub fn with_key(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.by_key.insert(key.into(), value.into());
        self
    }

    /// Template used for nested objects, if template mode is configured
    pub fn template(&self) -> Option<&Map<String, Value>> {
        match &self.object {
            Some(ObjectRule::Template(template)) => Some(template),
            _ => None,
        }
    }
}

/// Fields to leave untouched plus the rules for everything else
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResetOptions {
    #[serde(default, deserialize_with = "or_default")]
    pub skip: BTreeSet<String>,
    #[serde(default, deserialize_with = "or_default")]
    pub rules: ResetRules,
}

impl ResetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_skip<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn with_rules(mut self, rules: ResetRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn is_skipped(&self, key: &str) -> bool {
        self.skip.contains(key)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse reset options")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read reset options from {}", path.display()))?;
        Self::from_json_str(&json)
    }
}
