use serde::{Deserialize, Serialize};

use crate::core::{Dataset, Period, Record};

/// Optional second-period selector for dual-bar / overlay rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompareModel {
    period: Option<Period>,
}

impl CompareModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compare period. A period equal to `active_period` clears the
    /// comparison: comparing a period with itself draws nothing useful.
    pub fn set_period(&mut self, period: Option<Period>, active_period: Period) {
        self.period = period.filter(|p| *p != active_period);
    }

    #[must_use]
    pub fn period(self) -> Option<Period> {
        self.period
    }

    #[must_use]
    pub fn is_active(self) -> bool {
        self.period.is_some()
    }

    /// The record with the same entity at the compare period, if any.
    ///
    /// Absent pairs render no comparison mark for that entity instead of
    /// erroring.
    #[must_use]
    pub fn paired_record<'a>(self, record: &Record, dataset: &'a Dataset) -> Option<&'a Record> {
        let period = self.period?;
        dataset.find(&record.entity, period)
    }
}

/// Percentage growth from `previous` to `current`.
///
/// Undefined when the prior value is absent, zero, or the result would be
/// non-finite; callers render "not available" instead of `NaN`/`Infinity`.
#[must_use]
pub fn growth_rate(current: f64, previous: Option<f64>) -> Option<f64> {
    let previous = previous?;
    if previous == 0.0 || !previous.is_finite() || !current.is_finite() {
        return None;
    }
    let rate = (current / previous - 1.0) * 100.0;
    rate.is_finite().then_some(rate)
}
