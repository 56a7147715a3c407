use serde_json::json;
use ui_utils::{ResetOptions, ResetRules, reset_fields};

fn options(json: serde_json::Value) -> ResetOptions {
    serde_json::from_value(json).expect("invalid reset options")
}

#[test]
fn reset_with_skip_keeps_skipped_field() {
    let mut target = json!({"a": "x", "b": 5, "c": true, "d": [1, 2], "skipme": "keep"});

    reset_fields(&mut target, &options(json!({"skip": ["skipme"]})));

    assert_eq!(
        target,
        json!({"a": "", "b": 0, "c": false, "d": [], "skipme": "keep"})
    );
}

#[test]
fn reset_with_by_key_override() {
    let mut target = json!({"name": "bob", "age": 30});

    reset_fields(&mut target, &options(json!({"rules": {"byKey": {"name": "draft"}}})));

    assert_eq!(target, json!({"name": "draft", "age": 0}));
}

#[test]
fn reset_recurses_into_nested_objects() {
    let mut target = json!({"profile": {"nick": "x", "score": 9}});

    reset_fields(&mut target, &ResetOptions::default());

    assert_eq!(target, json!({"profile": {"nick": "", "score": 0}}));
}

#[test]
fn reset_merges_template_into_nested_objects() {
    let mut target = json!({"cfg": {"x": 1, "y": 2}});

    reset_fields(&mut target, &options(json!({"rules": {"object": {"x": 99}}})));

    assert_eq!(target, json!({"cfg": {"x": 99, "y": 0}}));
}

#[test]
fn reset_uses_independent_copy_of_array_rule() {
    let mut target = json!({"tags": [1, 2, 3], "other": []});
    let options = ResetOptions::new().with_rules(ResetRules::default().with_array(json!(["default"])));

    reset_fields(&mut target, &options);
    target["tags"]
        .as_array_mut()
        .expect("tags is an array")
        .push(json!("mutated"));

    assert_eq!(target["tags"], json!(["default", "mutated"]));
    assert_eq!(target["other"], json!(["default"]));
    assert_eq!(options.rules.array, Some(json!(["default"])));
}

#[test]
fn reset_preserves_top_level_keys() {
    let mut target = json!({
        "title": "t",
        "count": 3,
        "flags": {"a": true},
        "items": [{"id": 1}],
        "missing": null
    });
    let keys_before: Vec<String> = target.as_object().expect("object").keys().cloned().collect();

    reset_fields(&mut target, &ResetOptions::default());

    let keys_after: Vec<String> = target.as_object().expect("object").keys().cloned().collect();
    assert_eq!(keys_before, keys_after);
}

#[test]
fn reset_is_idempotent() {
    let mut once = json!({"a": "x", "b": {"c": [1], "d": 2.5}});
    reset_fields(&mut once, &ResetOptions::default());
    let mut twice = once.clone();

    reset_fields(&mut twice, &ResetOptions::default());

    assert_eq!(once, twice);
}

#[test]
fn malformed_object_rule_falls_back_to_recurse() {
    let mut target = json!({"cfg": {"x": 1}});

    reset_fields(&mut target, &options(json!({"rules": {"object": 5}})));

    assert_eq!(target, json!({"cfg": {"x": 0}}));
}
