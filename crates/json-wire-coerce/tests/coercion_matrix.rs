use json_wire_coerce::{
    BeanShape, DuplicateKeyPolicy, EnumShape, Error, Json, NamingPolicy, NullPolicy,
    PropertySetting, StreamError, TargetType, Value,
};

fn obj(entries: &[(&str, Value)]) -> Value {
    Value::Object(
        entries
            .iter()
            .map(|(k, v)| (Value::Str((*k).to_string()), v.clone()))
            .collect(),
    )
}

#[test]
fn primitive_round_trip_matrix() {
    let json = Json::new();
    let cases = vec![
        (Value::Null, TargetType::untyped()),
        (Value::Bool(true), TargetType::boolean()),
        (Value::Int(-42), TargetType::i64()),
        (Value::UInt(18_446_744_073_709_551_615), TargetType::u64()),
        (Value::Float(2.5), TargetType::f64()),
        (Value::Float(3.0), TargetType::f64()),
        (Value::Str("hello \"world\"".to_string()), TargetType::string()),
    ];
    for (value, ty) in cases {
        let doc = json.encode(&value).expect("encode");
        let back = json.decode(&doc, &ty).expect("decode");
        assert_eq!(back, value, "round trip through {doc}");
    }
}

#[test]
fn container_round_trip_matrix() {
    let json = Json::new();
    let list = Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
    let set = Value::Set(vec![Value::Str("a".into()), Value::Str("b".into())]);
    let map = obj(&[("x", Value::Int(1)), ("y", Value::List(vec![Value::Int(2)]))]);

    let cases = vec![
        (list, TargetType::list_of(TargetType::i64())),
        (set, TargetType::set_of(TargetType::string())),
        (map, TargetType::new(json_wire_coerce::RawShape::Map)),
    ];
    for (value, ty) in cases {
        let doc = json.encode(&value).expect("encode");
        assert_eq!(json.decode(&doc, &ty).expect("decode"), value);
    }
}

#[test]
fn generic_resolution_narrows_per_declared_type() {
    let json = Json::new();
    let doc = r#"{"a":1,"b":2}"#;

    let as_int = TargetType::map_of(TargetType::string(), TargetType::i64());
    assert_eq!(
        json.decode(doc, &as_int).unwrap(),
        obj(&[("a", Value::Int(1)), ("b", Value::Int(2))])
    );

    let as_float = TargetType::map_of(TargetType::string(), TargetType::f64());
    assert_eq!(
        json.decode(doc, &as_float).unwrap(),
        obj(&[("a", Value::Float(1.0)), ("b", Value::Float(2.0))])
    );
}

#[test]
fn nested_generic_resolution() {
    let json = Json::new();
    let ty = TargetType::map_of(
        TargetType::string(),
        TargetType::list_of(TargetType::i32()),
    );
    assert_eq!(
        json.decode(r#"{"xs":[1,2],"ys":[]}"#, &ty).unwrap(),
        obj(&[
            ("xs", Value::List(vec![Value::Int(1), Value::Int(2)])),
            ("ys", Value::List(vec![])),
        ])
    );
}

#[test]
fn bare_containers_fall_back_to_untyped_content() {
    let json = Json::new();
    let value = json
        .decode(
            r#"{"n":1,"f":1.5,"s":"x","b":true,"z":null,"a":[1,"two"]}"#,
            &TargetType::untyped(),
        )
        .unwrap();
    assert_eq!(
        value,
        obj(&[
            ("n", Value::Int(1)),
            ("f", Value::Float(1.5)),
            ("s", Value::Str("x".into())),
            ("b", Value::Bool(true)),
            ("z", Value::Null),
            ("a", Value::List(vec![Value::Int(1), Value::Str("two".into())])),
        ])
    );
}

#[test]
fn bean_ignores_unknown_fields() {
    let json = Json::new();
    let ty = TargetType::bean(BeanShape::new("Named").field("name", TargetType::string()));
    let value = json
        .decode(r#"{"name":"x","extra":true,"more":{"deep":[1,2]}}"#, &ty)
        .unwrap();
    match value {
        Value::Bean { fields, .. } => {
            assert_eq!(fields, vec![("name".to_string(), Value::Str("x".into()))]);
        }
        other => panic!("expected bean, got {other:?}"),
    }
}

#[test]
fn bean_defaults_missing_fields() {
    let json = Json::new();
    let ty = TargetType::bean(
        BeanShape::new("Session")
            .field("id", TargetType::string())
            .field("retries", TargetType::i32())
            .field("active", TargetType::boolean())
            .field("tags", TargetType::list_of(TargetType::string())),
    );
    let value = json.decode(r#"{"id":"abc"}"#, &ty).unwrap();
    match value {
        Value::Bean { fields, .. } => {
            assert_eq!(
                fields,
                vec![
                    ("id".to_string(), Value::Str("abc".into())),
                    ("retries".to_string(), Value::Int(0)),
                    ("active".to_string(), Value::Bool(false)),
                    ("tags".to_string(), Value::List(vec![])),
                ]
            );
        }
        other => panic!("expected bean, got {other:?}"),
    }
}

#[test]
fn bean_naming_policy_translates_both_directions() {
    let json = Json::new();
    let setting = PropertySetting::new().naming(NamingPolicy::CamelCase);
    let ty = TargetType::bean(
        BeanShape::new("Session")
            .field("session_id", TargetType::string())
            .field("page_load_timeout", TargetType::i64()),
    );

    let value = json
        .decode_with(r#"{"sessionId":"s1","pageLoadTimeout":30}"#, &ty, &setting)
        .unwrap();
    match &value {
        Value::Bean { fields, .. } => {
            assert_eq!(fields[0], ("session_id".to_string(), Value::Str("s1".into())));
            assert_eq!(fields[1], ("page_load_timeout".to_string(), Value::Int(30)));
        }
        other => panic!("expected bean, got {other:?}"),
    }

    let doc = json.encode_with(&value, &setting).unwrap();
    assert_eq!(doc, r#"{"sessionId":"s1","pageLoadTimeout":30}"#);
}

#[test]
fn bean_matched_field_with_wrong_shape_still_fails() {
    let json = Json::new();
    let ty = TargetType::bean(BeanShape::new("Named").field("name", TargetType::string()));
    assert!(matches!(
        json.decode(r#"{"name":7}"#, &ty),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn duplicate_key_policy_both_ways() {
    let json = Json::new();
    let ty = TargetType::map_of(TargetType::string(), TargetType::i64());
    let doc = r#"{"a":1,"a":2}"#;

    assert_eq!(
        json.decode(doc, &ty),
        Err(Error::DuplicateKey("a".to_string()))
    );

    let last_wins = PropertySetting::new().duplicates(DuplicateKeyPolicy::LastWins);
    assert_eq!(
        json.decode_with(doc, &ty, &last_wins).unwrap(),
        obj(&[("a", Value::Int(2))])
    );
}

#[test]
fn enum_matches_case_sensitively() {
    let json = Json::new();
    let ty = TargetType::enumeration(EnumShape::new("Color", &["RED", "GREEN", "BLUE"]));

    let green = json.decode("\"GREEN\"", &ty).unwrap();
    assert_eq!(green.variant_name(), Some("GREEN"));
    assert_eq!(json.encode(&green).unwrap(), "\"GREEN\"");

    assert_eq!(
        json.decode("\"PURPLE\"", &ty),
        Err(Error::UnknownVariant {
            decl: "Color".to_string(),
            variant: "PURPLE".to_string(),
        })
    );
    assert_eq!(
        json.decode("\"red\"", &ty),
        Err(Error::UnknownVariant {
            decl: "Color".to_string(),
            variant: "red".to_string(),
        })
    );
}

#[test]
fn enum_keys_in_maps() {
    let json = Json::new();
    let ty = TargetType::map_of(
        TargetType::enumeration(EnumShape::new("Color", &["RED", "GREEN"])),
        TargetType::i64(),
    );
    let value = json.decode(r#"{"RED":1,"GREEN":2}"#, &ty).unwrap();
    let doc = json.encode(&value).unwrap();
    assert_eq!(doc, r#"{"RED":1,"GREEN":2}"#);
}

#[test]
fn integer_keys_in_maps() {
    let json = Json::new();
    let ty = TargetType::map_of(TargetType::i64(), TargetType::string());
    assert_eq!(
        json.decode(r#"{"1":"one","2":"two"}"#, &ty).unwrap(),
        Value::Object(vec![
            (Value::Int(1), Value::Str("one".into())),
            (Value::Int(2), Value::Str("two".into())),
        ])
    );
}

#[test]
fn malformed_document_never_surfaces_as_anything_else() {
    let json = Json::new();
    let ty = TargetType::untyped();
    for doc in ["{", "{\"a\"", "{\"a\":", "[1,", "{\"a\":1,}", "tru", "", "1 2"] {
        match json.decode(doc, &ty) {
            Err(Error::MalformedDocument(_)) => {}
            other => panic!("decoding {doc:?} gave {other:?}"),
        }
    }
}

#[test]
fn shape_mismatch_is_type_mismatch_not_malformed() {
    let json = Json::new();
    assert!(matches!(
        json.decode("[1,2]", &TargetType::map_of(TargetType::string(), TargetType::i64())),
        Err(Error::TypeMismatch { .. })
    ));
    assert!(matches!(
        json.decode("\"nope\"", &TargetType::i64()),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn numeric_range_errors() {
    let json = Json::new();
    assert!(matches!(
        json.decode("1.5", &TargetType::i64()),
        Err(Error::NumericRange { .. })
    ));
    assert!(matches!(
        json.decode("300", &TargetType::u8()),
        Err(Error::NumericRange { .. })
    ));
    let lossy = PropertySetting::new().lossy_narrowing(true);
    assert_eq!(
        json.decode_with("1.5", &TargetType::i64(), &lossy).unwrap(),
        Value::Int(1)
    );
}

#[test]
fn large_whole_numbers_round_trip_without_changing_shape() {
    let json = Json::new();

    // Exactly representable above 2^53: widening must not be refused.
    assert_eq!(
        json.decode("10000000000000000", &TargetType::f64()).unwrap(),
        Value::Float(1e16)
    );

    // An integral float stays a float through the wire.
    for f in [1e15, 1e16, 9.007199254740992e15] {
        let doc = json.encode(&Value::Float(f)).expect("encode");
        assert_eq!(
            json.decode(&doc, &TargetType::f64()).expect("decode"),
            Value::Float(f),
            "round trip through {doc}"
        );
        assert_eq!(
            json.decode(&doc, &TargetType::untyped()).expect("decode"),
            Value::Float(f),
            "untyped shape through {doc}"
        );
    }
}

#[test]
fn set_decoding_deduplicates() {
    let json = Json::new();
    let ty = TargetType::set_of(TargetType::i64());
    assert_eq!(
        json.decode("[1,2,1,3,2]", &ty).unwrap(),
        Value::Set(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
    );
}

#[test]
fn null_policy_on_encode() {
    let json = Json::new();
    let value = obj(&[("a", Value::Null), ("b", Value::Int(1))]);

    assert_eq!(json.encode(&value).unwrap(), r#"{"b":1}"#);

    let emit = PropertySetting::new().nulls(NullPolicy::EmitNulls);
    assert_eq!(
        json.encode_with(&value, &emit).unwrap(),
        r#"{"a":null,"b":1}"#
    );
}

#[test]
fn null_passes_through_any_target() {
    let json = Json::new();
    let targets = vec![
        TargetType::boolean(),
        TargetType::i32(),
        TargetType::string(),
        TargetType::list_of(TargetType::i64()),
        TargetType::map_of(TargetType::string(), TargetType::i64()),
        TargetType::enumeration(EnumShape::new("Color", &["RED"])),
        TargetType::bean(BeanShape::new("Empty")),
    ];
    for ty in targets {
        assert_eq!(json.decode("null", &ty).unwrap(), Value::Null);
    }
}

#[test]
fn settings_do_not_leak_across_calls() {
    // Same registry, different settings per call: the per-call cache and
    // setting must be isolated.
    let json = Json::new();
    let ty = TargetType::map_of(TargetType::string(), TargetType::i64());
    let doc = r#"{"a":1,"a":2}"#;

    let last_wins = PropertySetting::new().duplicates(DuplicateKeyPolicy::LastWins);
    assert!(json.decode_with(doc, &ty, &last_wins).is_ok());
    assert_eq!(json.decode(doc, &ty), Err(Error::DuplicateKey("a".into())));
}

#[test]
fn truncated_document_maps_to_stream_eof() {
    let json = Json::new();
    match json.decode("{", &TargetType::untyped()) {
        Err(Error::MalformedDocument(StreamError::Eof(_))) => {}
        other => panic!("expected malformed document, got {other:?}"),
    }
}

#[test]
fn serde_json_bridge_preserves_order_and_shape() {
    let parsed: serde_json::Value =
        serde_json::from_str(r#"{"z":1,"a":[true,null],"m":{"k":"v"}}"#).unwrap();
    let value = Value::from(parsed.clone());
    assert_eq!(
        value,
        obj(&[
            ("z", Value::Int(1)),
            ("a", Value::List(vec![Value::Bool(true), Value::Null])),
            ("m", obj(&[("k", Value::Str("v".into()))])),
        ])
    );
    assert_eq!(serde_json::Value::from(value), parsed);
}

mod round_trip_property {
    use super::*;
    use proptest::prelude::*;

    fn scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::Int),
            // Finite floats with a fraction, so they re-read as floats.
            (-1e9f64..1e9f64).prop_map(|f| Value::Float(f + 0.5)),
            "[a-zA-Z0-9 _\\\\\"]{0,12}".prop_map(Value::Str),
        ]
    }

    fn dynamic_value() -> impl Strategy<Value = Value> {
        scalar().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..4).prop_map(|m| {
                    Value::Object(
                        m.into_iter()
                            .map(|(k, v)| (Value::Str(k), v))
                            .collect(),
                    )
                }),
            ]
        })
    }

    proptest! {
        #[test]
        fn untyped_round_trip(value in dynamic_value()) {
            let json = Json::new();
            let setting = PropertySetting::new()
                .nulls(json_wire_coerce::NullPolicy::EmitNulls);
            let doc = json.encode_with(&value, &setting).unwrap();
            let back = json.decode(&doc, &TargetType::untyped()).unwrap();
            prop_assert_eq!(back, value);
        }
    }
}
