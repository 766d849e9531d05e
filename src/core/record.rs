use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::Period;
use crate::error::{VizError, VizResult};

/// One row of tabular input data: one entity, one period, named metrics.
///
/// A missing metric is an absent map entry, never a stored NaN. Hosts parse
/// CSV/GeoJSON and coerce strings to numbers before records reach the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub entity: String,
    pub period: Period,
    #[serde(default)]
    pub metrics: IndexMap<String, f64>,
}

impl Record {
    #[must_use]
    pub fn new(entity: impl Into<String>, period: Period) -> Self {
        Self {
            entity: entity.into(),
            period,
            metrics: IndexMap::new(),
        }
    }

    /// Builder-style metric insertion for tests and host adapters.
    #[must_use]
    pub fn with_metric(mut self, name: impl Into<String>, value: f64) -> Self {
        self.metrics.insert(name.into(), value);
        self
    }

    #[must_use]
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }
}

/// Immutable ordered sequence of records.
///
/// Construction canonicalizes: non-finite metric values are dropped (they
/// become "missing"), keeping downstream sort/scale/bin policies free of NaN
/// special cases. The sequence itself is never reordered or mutated; views
/// always produce new sequences.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    #[must_use]
    pub fn new(mut records: Vec<Record>) -> Self {
        let mut dropped_values = 0_usize;
        for record in &mut records {
            let before = record.metrics.len();
            record.metrics.retain(|_, value| value.is_finite());
            dropped_values += before - record.metrics.len();
        }
        if dropped_values > 0 {
            warn!(
                dropped_values,
                record_count = records.len(),
                "canonicalized dataset: dropped non-finite metric values"
            );
        }
        Self { records }
    }

    /// Parses the host-side JSON contract: an array of record objects.
    ///
    /// This is the boundary where excluded CSV/GeoJSON fetchers hand parsed
    /// rows to the core.
    pub fn from_json_str(input: &str) -> VizResult<Self> {
        let records: Vec<Record> = serde_json::from_str(input)
            .map_err(|e| VizError::InvalidData(format!("failed to parse dataset: {e}")))?;
        Ok(Self::new(records))
    }

    pub fn to_json_pretty(&self) -> VizResult<String> {
        serde_json::to_string_pretty(&self.records)
            .map_err(|e| VizError::InvalidData(format!("failed to serialize dataset: {e}")))
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finds the record for `entity` at `period`, if present.
    #[must_use]
    pub fn find(&self, entity: &str, period: Period) -> Option<&Record> {
        self.records
            .iter()
            .find(|record| record.period == period && record.entity == entity)
    }

    /// Metric value for `entity` at `period`; `None` when the record or the
    /// metric is absent.
    #[must_use]
    pub fn value(&self, entity: &str, period: Period, metric: &str) -> Option<f64> {
        self.find(entity, period).and_then(|record| record.metric(metric))
    }

    /// Distinct periods in ascending order.
    #[must_use]
    pub fn periods(&self) -> Vec<Period> {
        let mut periods: Vec<Period> = self.records.iter().map(|record| record.period).collect();
        periods.sort_unstable();
        periods.dedup();
        periods
    }

    /// Distinct entity names in first-appearance order.
    #[must_use]
    pub fn entities(&self) -> Vec<&str> {
        let mut seen = indexmap::IndexSet::new();
        for record in &self.records {
            seen.insert(record.entity.as_str());
        }
        seen.into_iter().collect()
    }
}
