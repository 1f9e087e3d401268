use super::*;

fn sample_anti_pattern() -> AntiPattern {
    AntiPattern::new(
        42,
        "Sample Pattern",
        "SamplePattern",
        "Only used in tests.",
        vec![
            Configuration::new("limit", "Limit", "Integer limit", ConfigValue::Integer(3)),
            Configuration::new("ratio", "Ratio", "Float ratio", ConfigValue::Float(0.5)),
            Configuration::new("range", "Range", "Double range", ConfigValue::Double(1.25)),
        ],
    )
}

#[test]
fn configurations_keep_insertion_order() {
    let anti_pattern = sample_anti_pattern();
    let keys: Vec<_> = anti_pattern.configurations().keys().cloned().collect();
    assert_eq!(keys, ["limit", "ratio", "range"]);
}

#[test]
fn set_configuration_replaces_value() {
    let mut anti_pattern = sample_anti_pattern();
    anti_pattern
        .set_configuration("limit", ConfigValue::Integer(7))
        .unwrap();
    assert_eq!(anti_pattern.value("limit"), Some(ConfigValue::Integer(7)));
    assert!(!anti_pattern.configuration("limit").unwrap().is_default());
}

#[test]
fn integer_widens_into_float_and_double() {
    let mut anti_pattern = sample_anti_pattern();
    anti_pattern
        .set_configuration("ratio", ConfigValue::Integer(1))
        .unwrap();
    anti_pattern
        .set_configuration("range", ConfigValue::Integer(2))
        .unwrap();
    assert_eq!(anti_pattern.value("ratio"), Some(ConfigValue::Float(1.0)));
    assert_eq!(anti_pattern.value("range"), Some(ConfigValue::Double(2.0)));
}

#[test]
fn fraction_is_rejected_for_integer_configuration() {
    let mut anti_pattern = sample_anti_pattern();
    let err = anti_pattern
        .set_configuration("limit", ConfigValue::Double(2.5))
        .unwrap_err();
    assert!(matches!(
        err,
        crate::AntipatternGuardError::ConfigTypeMismatch { .. }
    ));
    assert_eq!(anti_pattern.value("limit"), Some(ConfigValue::Integer(3)));
}

#[test]
fn unknown_configuration_key_is_rejected() {
    let mut anti_pattern = sample_anti_pattern();
    let err = anti_pattern
        .set_configuration("missing", ConfigValue::Integer(1))
        .unwrap_err();
    assert!(err.to_string().contains("missing"));
}

#[test]
fn reset_restores_defaults() {
    let mut anti_pattern = sample_anti_pattern();
    anti_pattern
        .set_configuration("range", ConfigValue::Double(9.0))
        .unwrap();
    anti_pattern.reset_configurations();
    assert_eq!(anti_pattern.value("range"), Some(ConfigValue::Double(1.25)));
}

#[test]
fn config_value_accessors_match_kind() {
    assert_eq!(ConfigValue::Integer(4).as_integer(), Some(4));
    assert_eq!(ConfigValue::Integer(4).as_double(), None);
    assert_eq!(ConfigValue::Float(0.5).as_float(), Some(0.5));
    assert_eq!(ConfigValue::Double(1.5).as_double(), Some(1.5));
    assert_eq!(ConfigValue::Double(1.5).to_string(), "1.5");
}

#[test]
fn result_item_carries_anti_pattern_identity() {
    let anti_pattern = sample_anti_pattern();
    let item = QueryResultItem::new(
        &anti_pattern,
        true,
        vec![
            ResultDetail::new("Count", 2),
            ResultDetail::conclusion("Too many"),
        ],
    );
    assert_eq!(item.anti_pattern().id, 42);
    assert_eq!(item.anti_pattern().name, "SamplePattern");
    assert!(item.is_detected());
    assert_eq!(item.detail("Count"), Some("2"));
    assert_eq!(item.detail("Conclusion"), Some("Too many"));
    assert_eq!(item.detail("Unknown"), None);
}

#[test]
fn project_serializes_with_id_and_name() {
    let project = Project::new(5, "demo");
    let json = serde_json::to_string(&project).unwrap();
    assert_eq!(json, r#"{"id":5,"name":"demo"}"#);
}
