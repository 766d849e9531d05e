use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Color;
use crate::error::{VizError, VizResult};

/// Index of the sentinel "no data" bin.
pub const NO_DATA_BIN: usize = 0;

/// Half-open numeric interval `[lower, upper)` mapped to a legend color.
///
/// The sentinel bin (`lower = upper = None`) classifies absent values and
/// doubles as the fallback for values outside configured coverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub label: String,
    pub color: Color,
}

impl Bin {
    #[must_use]
    pub fn sentinel(label: impl Into<String>, color: Color) -> Self {
        Self {
            lower: None,
            upper: None,
            label: label.into(),
            color,
        }
    }

    #[must_use]
    pub fn range(lower: f64, upper: f64, label: impl Into<String>, color: Color) -> Self {
        Self {
            lower: Some(lower),
            upper: Some(upper),
            label: label.into(),
            color,
        }
    }

    #[must_use]
    fn is_sentinel(&self) -> bool {
        self.lower.is_none() && self.upper.is_none()
    }

    #[must_use]
    fn contains(&self, value: f64) -> bool {
        match (self.lower, self.upper) {
            (Some(lower), Some(upper)) => value >= lower && value < upper,
            _ => false,
        }
    }
}

/// Ordered, contiguous, non-overlapping bin table with sentinel at index 0.
#[derive(Debug, Clone, PartialEq)]
pub struct BinSet {
    bins: SmallVec<[Bin; 8]>,
}

impl BinSet {
    /// Validates and builds a bin table.
    ///
    /// Requirements: the first bin is the sentinel and the only one; every
    /// other bin has finite `lower < upper`; consecutive bins are contiguous
    /// (`bin[i].lower == bin[i-1].upper`), which makes coverage total and
    /// disjoint over the configured range.
    pub fn new(bins: Vec<Bin>) -> VizResult<Self> {
        let Some((first, rest)) = bins.split_first() else {
            return Err(VizError::InvalidData(
                "bin set must contain at least the sentinel bin".to_owned(),
            ));
        };
        if !first.is_sentinel() {
            return Err(VizError::InvalidData(
                "bin set must start with the sentinel (no-data) bin".to_owned(),
            ));
        }

        let mut previous_upper: Option<f64> = None;
        for bin in rest {
            let (Some(lower), Some(upper)) = (bin.lower, bin.upper) else {
                return Err(VizError::InvalidData(format!(
                    "bin `{}` must have both bounds; only the first bin is the sentinel",
                    bin.label
                )));
            };
            if !lower.is_finite() || !upper.is_finite() || lower >= upper {
                return Err(VizError::InvalidData(format!(
                    "bin `{}` bounds must be finite with lower < upper",
                    bin.label
                )));
            }
            if let Some(previous) = previous_upper {
                if lower != previous {
                    return Err(VizError::InvalidData(format!(
                        "bin `{}` is not contiguous with the previous bin",
                        bin.label
                    )));
                }
            }
            previous_upper = Some(upper);
            bin.color.validate()?;
        }
        first.color.validate()?;

        Ok(Self {
            bins: bins.into(),
        })
    }

    #[must_use]
    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Classifies a value.
    ///
    /// `None` and out-of-coverage values go to the sentinel bin; the latter
    /// is a defined fallback, not an error.
    #[must_use]
    pub fn index_of(&self, value: Option<f64>) -> usize {
        let Some(value) = value else {
            return NO_DATA_BIN;
        };
        self.bins
            .iter()
            .position(|bin| bin.contains(value))
            .unwrap_or(NO_DATA_BIN)
    }

    /// Resolves the render color for a value under current legend state.
    ///
    /// Precedence: a hovered bin highlights only its members (selection is
    /// ignored while hovering); otherwise selected bins render full and the
    /// rest dim; with nothing hovered and nothing selected everything dims.
    #[must_use]
    pub fn color_for(&self, value: Option<f64>, selection: &BinSelection, dim_alpha: f64) -> Color {
        let index = self.index_of(value);
        let base = self.bins[index].color;
        if selection.is_full(index) {
            base
        } else {
            base.with_alpha(dim_alpha)
        }
    }
}

/// Multi-select legend state: toggled bins plus a transient hovered bin.
///
/// Toggling is independent per bin; all bins off is a valid, observable
/// state (everything dimmed).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BinSelection {
    selected: IndexSet<usize>,
    hovered: Option<usize>,
}

impl BinSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, bin_index: usize) {
        if !self.selected.shift_remove(&bin_index) {
            self.selected.insert(bin_index);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn set_hovered(&mut self, bin_index: Option<usize>) {
        self.hovered = bin_index;
    }

    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    #[must_use]
    pub fn is_selected(&self, bin_index: usize) -> bool {
        self.selected.contains(&bin_index)
    }

    #[must_use]
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().copied()
    }

    /// Whether a bin renders at full color under the hover/selection
    /// precedence rules.
    #[must_use]
    pub fn is_full(&self, bin_index: usize) -> bool {
        match self.hovered {
            Some(hovered) => bin_index == hovered,
            None => self.selected.contains(&bin_index),
        }
    }
}
