use indexmap::IndexSet;
use vizflow::api::{SortDirection, SortKey, SortSpec, ViewQuery, view};
use vizflow::core::{Dataset, Record};

const METRIC: &str = "solar_electricity";

fn sample_dataset() -> Dataset {
    Dataset::new(vec![
        Record::new("X", 2020).with_metric(METRIC, 10.0),
        Record::new("Y", 2020).with_metric(METRIC, 30.0),
        Record::new("Z", 2020),
    ])
}

fn entities(rows: &[Record]) -> Vec<&str> {
    rows.iter().map(|row| row.entity.as_str()).collect()
}

#[test]
fn metric_descending_treats_missing_as_zero() {
    let dataset = sample_dataset();
    let rows = view(&dataset, &ViewQuery::new(METRIC, 2020));
    assert_eq!(entities(&rows), ["Y", "X", "Z"]);
}

#[test]
fn metric_ascending_reverses_order() {
    let dataset = sample_dataset();
    let mut query = ViewQuery::new(METRIC, 2020);
    query.sort = SortSpec {
        key: SortKey::ByMetric,
        direction: SortDirection::Ascending,
    };
    let rows = view(&dataset, &query);
    assert_eq!(entities(&rows), ["Z", "X", "Y"]);
}

#[test]
fn search_is_case_insensitive_substring() {
    let dataset = sample_dataset();
    let mut query = ViewQuery::new(METRIC, 2020);
    query.search_text = "x";
    let rows = view(&dataset, &query);
    assert_eq!(entities(&rows), ["X"]);
}

#[test]
fn restrict_to_ids_takes_precedence_over_search() {
    let dataset = sample_dataset();
    let ids: IndexSet<String> = ["X".to_owned()].into_iter().collect();
    let mut query = ViewQuery::new(METRIC, 2020);
    query.search_text = "y";
    query.restrict_to_ids = Some(&ids);
    let rows = view(&dataset, &query);
    assert_eq!(entities(&rows), ["X"]);
}

#[test]
fn empty_restrict_set_falls_back_to_search() {
    let dataset = sample_dataset();
    let ids: IndexSet<String> = IndexSet::new();
    let mut query = ViewQuery::new(METRIC, 2020);
    query.search_text = "y";
    query.restrict_to_ids = Some(&ids);
    let rows = view(&dataset, &query);
    assert_eq!(entities(&rows), ["Y"]);
}

#[test]
fn unmatched_search_yields_explicit_empty_result() {
    let dataset = sample_dataset();
    let mut query = ViewQuery::new(METRIC, 2020);
    query.search_text = "atlantis";
    let rows = view(&dataset, &query);
    assert!(rows.is_empty());
}

#[test]
fn missing_period_yields_empty_result() {
    let dataset = sample_dataset();
    let rows = view(&dataset, &ViewQuery::new(METRIC, 1999));
    assert!(rows.is_empty());
}

#[test]
fn ties_preserve_original_relative_order() {
    let dataset = Dataset::new(vec![
        Record::new("A", 2020).with_metric(METRIC, 5.0),
        Record::new("B", 2020).with_metric(METRIC, 5.0),
        Record::new("C", 2020).with_metric(METRIC, 5.0),
        Record::new("D", 2020).with_metric(METRIC, 9.0),
    ]);
    let rows = view(&dataset, &ViewQuery::new(METRIC, 2020));
    assert_eq!(entities(&rows), ["D", "A", "B", "C"]);

    let mut ascending = ViewQuery::new(METRIC, 2020);
    ascending.sort = SortSpec {
        key: SortKey::ByMetric,
        direction: SortDirection::Ascending,
    };
    let rows = view(&dataset, &ascending);
    assert_eq!(entities(&rows), ["A", "B", "C", "D"]);
}

#[test]
fn zero_valued_entities_sort_stably_with_missing_ones() {
    let dataset = Dataset::new(vec![
        Record::new("A", 2020).with_metric(METRIC, 0.0),
        Record::new("B", 2020),
        Record::new("C", 2020).with_metric(METRIC, 0.0),
    ]);
    let rows = view(&dataset, &ViewQuery::new(METRIC, 2020));
    assert_eq!(entities(&rows), ["A", "B", "C"]);
}

#[test]
fn same_query_applied_twice_is_idempotent() {
    let dataset = sample_dataset();
    let mut query = ViewQuery::new(METRIC, 2020);
    query.search_text = "";
    let first = view(&dataset, &query);
    let second = view(&dataset, &query);
    assert_eq!(first, second);
}

#[test]
fn view_does_not_mutate_dataset() {
    let dataset = sample_dataset();
    let before = dataset.clone();
    let _ = view(&dataset, &ViewQuery::new(METRIC, 2020));
    assert_eq!(dataset, before);
}

#[test]
fn label_sort_is_case_insensitive() {
    let dataset = Dataset::new(vec![
        Record::new("germany", 2020).with_metric(METRIC, 1.0),
        Record::new("Brazil", 2020).with_metric(METRIC, 2.0),
        Record::new("albania", 2020).with_metric(METRIC, 3.0),
    ]);
    let mut query = ViewQuery::new(METRIC, 2020);
    query.sort = SortSpec {
        key: SortKey::ByLabel,
        direction: SortDirection::Ascending,
    };
    let rows = view(&dataset, &query);
    assert_eq!(entities(&rows), ["albania", "Brazil", "germany"]);

    query.sort.direction = SortDirection::Descending;
    let rows = view(&dataset, &query);
    assert_eq!(entities(&rows), ["germany", "Brazil", "albania"]);
}

#[test]
fn top_n_truncates_after_sort() {
    let dataset = Dataset::new(vec![
        Record::new("A", 2020).with_metric(METRIC, 1.0),
        Record::new("B", 2020).with_metric(METRIC, 4.0),
        Record::new("C", 2020).with_metric(METRIC, 3.0),
        Record::new("D", 2020).with_metric(METRIC, 2.0),
    ]);
    let mut query = ViewQuery::new(METRIC, 2020);
    query.top_n = Some(2);
    let rows = view(&dataset, &query);
    assert_eq!(entities(&rows), ["B", "C"]);
}

#[test]
fn top_n_larger_than_view_keeps_all_rows() {
    let dataset = sample_dataset();
    let mut query = ViewQuery::new(METRIC, 2020);
    query.top_n = Some(10);
    let rows = view(&dataset, &query);
    assert_eq!(rows.len(), 3);
}

#[test]
fn other_periods_are_excluded_from_the_view() {
    let dataset = Dataset::new(vec![
        Record::new("A", 2019).with_metric(METRIC, 99.0),
        Record::new("A", 2020).with_metric(METRIC, 1.0),
        Record::new("B", 2020).with_metric(METRIC, 2.0),
    ]);
    let rows = view(&dataset, &ViewQuery::new(METRIC, 2020));
    assert_eq!(entities(&rows), ["B", "A"]);
    assert_eq!(rows[1].metric(METRIC), Some(1.0));
}
