use timeaxis_rs::AxisError;
use timeaxis_rs::api::{
    TIME_AXIS_CONFIG_JSON_SCHEMA_V1, TimeAxis, TimeAxisConfig, TimeAxisPlacement, TimeAxisProps,
    TimeAxisTimeZone,
};
use timeaxis_rs::core::{Point, TimeScale};

#[test]
fn contract_v1_round_trips() {
    let config = TimeAxisConfig {
        label_padding_px: 6.0,
        placement: TimeAxisPlacement::Top,
        timezone: TimeAxisTimeZone::FixedOffsetMinutes { minutes: 120 },
        ..TimeAxisConfig::default()
    };

    let json = config.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains(&format!("\"schema_version\": {TIME_AXIS_CONFIG_JSON_SCHEMA_V1}")));

    let parsed = TimeAxisConfig::from_json_compat_str(&json).expect("parse");
    assert_eq!(parsed, config);
}

#[test]
fn bare_partial_object_fills_defaults() {
    let parsed = TimeAxisConfig::from_json_compat_str(r#"{ "max_rows": 2 }"#).expect("parse");

    assert_eq!(parsed.max_rows, 2);
    assert_eq!(parsed.max_ticks_per_grain, 500);
    assert_eq!(parsed.outer_label_fill_ratio, 0.7);
}

#[test]
fn unsupported_schema_version_is_rejected() {
    let input = r#"{ "schema_version": 9, "config": {} }"#;
    let err = TimeAxisConfig::from_json_compat_str(input).expect_err("version 9");
    assert!(matches!(err, AxisError::InvalidData(message) if message.contains("schema version")));
}

#[test]
fn parsed_config_is_validated() {
    let err = TimeAxisConfig::from_json_compat_str(r#"{ "outer_label_fill_ratio": 1.5 }"#)
        .expect_err("ratio above one");
    assert!(matches!(err, AxisError::InvalidData(_)));
}

#[test]
fn props_with_reversed_domain_are_rejected_on_deserialize() {
    let json = r#"{
        "origin": { "x": 0.0, "y": 0.0 },
        "scale": {
            "domain_start_ms": 10000,
            "domain_end_ms": 0,
            "range_start_px": 0.0,
            "range_end_px": 400.0
        }
    }"#;

    let err = serde_json::from_str::<TimeAxisProps>(json).expect_err("reversed domain");
    assert!(
        err.to_string()
            .contains("invalid time domain: start=10000 is after end=0")
    );
}

#[test]
fn props_json_round_trips_through_scale_validation() {
    let scale = TimeScale::new((0, 10_000), (0.0, 400.0)).expect("valid scale");
    let props = TimeAxisProps::new(Point::new(5.0, 80.0), scale);

    let json = serde_json::to_string(&props).expect("serialize");
    let parsed: TimeAxisProps = serde_json::from_str(&json).expect("parse");

    assert_eq!(parsed, props);
    assert!(TimeAxis::new(parsed, TimeAxisConfig::default()).is_ok());
}
