use approx::assert_relative_eq;
use vizflow::api::PipelineConfig;
use vizflow::interaction::OpacityLevels;

#[test]
fn config_round_trips_through_json() {
    let config = PipelineConfig::new("solar_share_elec", 2021)
        .with_top_n(11)
        .with_headroom_ratio(0.15)
        .with_band_padding_ratio(0.25)
        .with_dim_alpha(0.35)
        .with_opacity(OpacityLevels {
            full: 1.0,
            neutral: 0.85,
            dimmed: 0.2,
        });

    let json = config.to_json_pretty().expect("serialize");
    let restored = PipelineConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
}

#[test]
fn missing_optional_fields_fall_back_to_defaults() {
    let config = PipelineConfig::from_json_str(
        r#"{ "metric": "population", "active_period": 2020 }"#,
    )
    .expect("parse minimal config");

    assert_eq!(config.metric, "population");
    assert_eq!(config.active_period, 2020);
    assert_eq!(config.top_n, None);
    assert_relative_eq!(config.headroom_ratio, 0.1);
    assert_relative_eq!(config.band_padding_ratio, 0.2);
    assert_relative_eq!(config.dim_alpha, 0.4);
    assert_eq!(config.opacity, OpacityLevels::default());
    assert!(config.validate().is_ok());
}

#[test]
fn malformed_json_is_rejected() {
    assert!(PipelineConfig::from_json_str("{ not json").is_err());
    assert!(PipelineConfig::from_json_str(r#"{ "metric": "m" }"#).is_err());
}

#[test]
fn validation_catches_out_of_range_settings() {
    assert!(PipelineConfig::new("m", 2020).validate().is_ok());
    assert!(
        PipelineConfig::new("m", 2020)
            .with_headroom_ratio(-0.1)
            .validate()
            .is_err()
    );
    assert!(
        PipelineConfig::new("m", 2020)
            .with_dim_alpha(1.5)
            .validate()
            .is_err()
    );
    assert!(
        PipelineConfig::new("m", 2020)
            .with_opacity(OpacityLevels {
                full: 0.1,
                neutral: 0.9,
                dimmed: 0.3,
            })
            .validate()
            .is_err()
    );
}
