//! The engine's best-known consumer shape: a preference document with a
//! `"frozen"` and a `"mutable"` section, each a mapping of setting name to
//! value. The loader is oblivious to profile semantics; it only needs the
//! boundary to hand it nested string-keyed maps.

use json_wire_coerce::{Json, TargetType, Value};

const PREFS: &str = r#"{
  "frozen": {
    "app.update.auto": false,
    "app.update.enabled": false,
    "dom.max_script_run_time": 30,
    "browser.startup.homepage": "about:blank"
  },
  "mutable": {
    "browser.startup.page": 0,
    "network.http.phishy-userpass-length": 255
  }
}"#;

fn two_level_map() -> TargetType {
    TargetType::map_of(
        TargetType::string(),
        TargetType::map_of(TargetType::string(), TargetType::untyped()),
    )
}

fn section<'a>(doc: &'a Value, name: &str) -> &'a Value {
    match doc {
        Value::Object(entries) => entries
            .iter()
            .find(|(k, _)| *k == Value::Str(name.to_string()))
            .map(|(_, v)| v)
            .unwrap_or_else(|| panic!("missing section {name}")),
        other => panic!("expected object, got {other:?}"),
    }
}

fn setting<'a>(section: &'a Value, name: &str) -> &'a Value {
    match section {
        Value::Object(entries) => entries
            .iter()
            .find(|(k, _)| *k == Value::Str(name.to_string()))
            .map(|(_, v)| v)
            .unwrap_or_else(|| panic!("missing setting {name}")),
        other => panic!("expected object, got {other:?}"),
    }
}

#[test]
fn decodes_frozen_and_mutable_sections() {
    let json = Json::new();
    let doc = json.decode(PREFS, &two_level_map()).unwrap();

    let frozen = section(&doc, "frozen");
    assert_eq!(setting(frozen, "app.update.auto"), &Value::Bool(false));
    assert_eq!(
        setting(frozen, "dom.max_script_run_time"),
        &Value::Int(30)
    );
    assert_eq!(
        setting(frozen, "browser.startup.homepage"),
        &Value::Str("about:blank".into())
    );

    let mutable = section(&doc, "mutable");
    assert_eq!(setting(mutable, "browser.startup.page"), &Value::Int(0));
}

#[test]
fn numeric_settings_narrow_when_a_width_is_declared() {
    // Profile loaders downcast whole-number preferences to int; the
    // declared value type expresses that directly.
    let json = Json::new();
    let ty = TargetType::map_of(
        TargetType::string(),
        TargetType::map_of(TargetType::string(), TargetType::i32()),
    );
    let doc = json
        .decode(
            r#"{"mutable":{"browser.startup.page":0,"net.phishy-length":255}}"#,
            &ty,
        )
        .unwrap();
    let mutable = section(&doc, "mutable");
    assert_eq!(setting(mutable, "net.phishy-length"), &Value::Int(255));
}

#[test]
fn round_trips_through_the_boundary() {
    let json = Json::new();
    let doc = json.decode(PREFS, &two_level_map()).unwrap();
    let encoded = json.encode(&doc).unwrap();
    let again = json.decode(&encoded, &two_level_map()).unwrap();
    assert_eq!(again, doc);
}
