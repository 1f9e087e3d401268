use super::*;

#[test]
fn threshold_value_converts_into_config_value() {
    assert_eq!(
        ConfigValue::from(ThresholdValue::Integer(21)),
        ConfigValue::Integer(21)
    );
    assert_eq!(
        ConfigValue::from(ThresholdValue::Float(1.25)),
        ConfigValue::Double(1.25)
    );
}

#[test]
fn float_config_value_keeps_short_decimal_form() {
    let value = ThresholdValue::from(ConfigValue::Float(0.3));
    assert_eq!(value, ThresholdValue::Float(0.3));
    assert_eq!(value.to_string(), "0.3");
}

#[test]
fn config_serializes_overrides_as_tables() {
    let mut config = Config::default();
    config
        .anti_patterns
        .entry("TooLongSprint".to_string())
        .or_default()
        .insert("maxIterationLength".to_string(), ThresholdValue::Integer(28));

    let toml_text = toml::to_string(&config).unwrap();

    assert!(toml_text.contains("[anti_patterns.TooLongSprint]"));
    assert!(toml_text.contains("maxIterationLength = 28"));
    assert!(!toml_text.contains("[queries]"));
}

#[test]
fn serialized_config_parses_back() {
    let mut config = Config {
        version: Some(CONFIG_VERSION.to_string()),
        ..Config::default()
    };
    config
        .anti_patterns
        .entry("NinetyNinetyRule".to_string())
        .or_default()
        .insert("maxDivisionRange".to_string(), ThresholdValue::Float(1.5));

    let parsed: Config = toml::from_str(&toml::to_string(&config).unwrap()).unwrap();

    assert_eq!(parsed, config);
}
