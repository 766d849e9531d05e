use indexmap::IndexSet;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{Dataset, Period, Record};

#[cfg(feature = "parallel-view")]
use rayon::slice::ParallelSliceMut;

#[cfg(feature = "parallel-view")]
const PARALLEL_SORT_THRESHOLD: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    /// Compare the active metric value for the active period; missing values
    /// sort as zero.
    ByMetric,
    /// Case-insensitive comparison of entity names.
    ByLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Descending,
    Ascending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::ByMetric,
            direction: SortDirection::Descending,
        }
    }
}

/// Immutable control-state snapshot for one view computation.
///
/// The pipeline rebuilds this from current controls on every frame, so a view
/// can never mix a sort from one keystroke with a search string from another.
#[derive(Debug, Clone)]
pub struct ViewQuery<'a> {
    pub metric: &'a str,
    pub active_period: Period,
    pub search_text: &'a str,
    pub sort: SortSpec,
    /// Focus-on-selection filter. When non-empty it takes precedence over
    /// `search_text`; the two are never combined.
    pub restrict_to_ids: Option<&'a IndexSet<String>>,
    /// Plain head-truncation after sorting. No force-include of hovered or
    /// selected entities.
    pub top_n: Option<usize>,
}

impl<'a> ViewQuery<'a> {
    #[must_use]
    pub fn new(metric: &'a str, active_period: Period) -> Self {
        Self {
            metric,
            active_period,
            search_text: "",
            sort: SortSpec::default(),
            restrict_to_ids: None,
            top_n: None,
        }
    }
}

/// Produces the ordered, filtered record sequence for one frame.
///
/// Always returns a new sequence; the dataset is never mutated. An empty
/// result is the explicit empty-state signal (distinct from rows that exist
/// but carry zero values). The sort is stable: records with equal keys keep
/// their original relative order in either direction.
#[must_use]
pub fn view(dataset: &Dataset, query: &ViewQuery<'_>) -> Vec<Record> {
    let needle = query.search_text.to_lowercase();
    let mut rows: Vec<Record> = dataset
        .records()
        .iter()
        .filter(|record| record.period == query.active_period)
        .filter(|record| match query.restrict_to_ids {
            Some(ids) if !ids.is_empty() => ids.contains(&record.entity),
            _ => needle.is_empty() || record.entity.to_lowercase().contains(&needle),
        })
        .cloned()
        .collect();

    sort_rows(&mut rows, query);

    if let Some(n) = query.top_n {
        rows.truncate(n);
    }
    rows
}

fn sort_rows(rows: &mut [Record], query: &ViewQuery<'_>) {
    let descending = query.sort.direction == SortDirection::Descending;
    match query.sort.key {
        SortKey::ByMetric => {
            let metric = query.metric;
            stable_sort_by(rows, |a, b| {
                let a_value = OrderedFloat(a.metric(metric).unwrap_or(0.0));
                let b_value = OrderedFloat(b.metric(metric).unwrap_or(0.0));
                if descending {
                    b_value.cmp(&a_value)
                } else {
                    a_value.cmp(&b_value)
                }
            });
        }
        SortKey::ByLabel => {
            stable_sort_by(rows, |a, b| {
                let a_label = a.entity.to_lowercase();
                let b_label = b.entity.to_lowercase();
                if descending {
                    b_label.cmp(&a_label)
                } else {
                    a_label.cmp(&b_label)
                }
            });
        }
    }
}

#[cfg(feature = "parallel-view")]
fn stable_sort_by<F>(rows: &mut [Record], compare: F)
where
    F: Fn(&Record, &Record) -> std::cmp::Ordering + Sync,
{
    if rows.len() >= PARALLEL_SORT_THRESHOLD {
        rows.par_sort_by(compare);
    } else {
        rows.sort_by(compare);
    }
}

#[cfg(not(feature = "parallel-view"))]
fn stable_sort_by<F>(rows: &mut [Record], compare: F)
where
    F: Fn(&Record, &Record) -> std::cmp::Ordering,
{
    rows.sort_by(compare);
}
