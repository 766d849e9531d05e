use vizflow::core::{Dataset, Record};

const METRIC: &str = "solar_electricity";

#[test]
fn dataset_parses_the_json_record_contract() {
    let dataset = Dataset::from_json_str(
        r#"[
            { "entity": "France", "period": 2020, "metrics": { "solar_electricity": 13.1 } },
            { "entity": "Chile", "period": 2020, "metrics": {} },
            { "entity": "France", "period": 2019 }
        ]"#,
    )
    .expect("valid dataset json");

    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.value("France", 2020, METRIC), Some(13.1));
    assert_eq!(dataset.value("Chile", 2020, METRIC), None);
    assert_eq!(dataset.value("France", 2019, METRIC), None);
}

#[test]
fn malformed_dataset_json_is_rejected() {
    assert!(Dataset::from_json_str("not json").is_err());
    assert!(Dataset::from_json_str(r#"[{ "period": 2020 }]"#).is_err());
}

#[test]
fn dataset_json_round_trips() {
    let dataset = Dataset::new(vec![
        Record::new("France", 2020).with_metric(METRIC, 13.1),
        Record::new("Chile", 2020),
    ]);
    let json = dataset.to_json_pretty().expect("serialize");
    let restored = Dataset::from_json_str(&json).expect("parse");
    assert_eq!(restored, dataset);
}

#[test]
fn canonicalization_drops_non_finite_metric_values() {
    let dataset = Dataset::new(vec![
        Record::new("A", 2020)
            .with_metric(METRIC, f64::NAN)
            .with_metric("population", 5.0),
        Record::new("B", 2020).with_metric(METRIC, f64::INFINITY),
    ]);

    // Non-finite values become "missing", not stored NaNs.
    assert_eq!(dataset.value("A", 2020, METRIC), None);
    assert_eq!(dataset.value("A", 2020, "population"), Some(5.0));
    assert_eq!(dataset.value("B", 2020, METRIC), None);
    assert_eq!(dataset.len(), 2);
}

#[test]
fn lookup_helpers_cover_periods_and_entities() {
    let dataset = Dataset::new(vec![
        Record::new("France", 2020).with_metric(METRIC, 1.0),
        Record::new("Chile", 2019).with_metric(METRIC, 2.0),
        Record::new("France", 2019).with_metric(METRIC, 3.0),
    ]);

    assert_eq!(dataset.periods(), [2019, 2020]);
    assert_eq!(dataset.entities(), ["France", "Chile"]);
    assert!(dataset.find("France", 2019).is_some());
    assert!(dataset.find("France", 2018).is_none());
    assert!(!dataset.is_empty());
}
