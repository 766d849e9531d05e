use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::error::{VizError, VizResult};

/// Opacity tiers applied by the emphasis model.
///
/// `neutral` is used when nothing is selected (no record is de-emphasized);
/// selection splits records into `full` and `dimmed`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpacityLevels {
    pub full: f64,
    pub neutral: f64,
    pub dimmed: f64,
}

impl Default for OpacityLevels {
    fn default() -> Self {
        Self {
            full: 1.0,
            neutral: 1.0,
            dimmed: 0.3,
        }
    }
}

impl OpacityLevels {
    pub fn validate(self) -> VizResult<()> {
        for (name, value) in [
            ("full", self.full),
            ("neutral", self.neutral),
            ("dimmed", self.dimmed),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(VizError::InvalidData(format!(
                    "opacity `{name}` must be finite and in [0, 1]"
                )));
            }
        }
        if self.dimmed > self.neutral || self.neutral > self.full {
            return Err(VizError::InvalidData(
                "opacities must satisfy dimmed <= neutral <= full".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Per-record visual emphasis, derived once per frame from hover plus
/// selection and consumed uniformly by every mark-drawing routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmphasisState {
    pub dimmed: bool,
    pub highlighted: bool,
}

/// Selected entity ids plus the single hovered id.
///
/// Hover and selection are independent: the hovered id need not be selected,
/// and hover always wins for the record under the cursor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionModel {
    selected: IndexSet<String>,
    hovered: Option<String>,
    opacity: OpacityLevels,
}

impl SelectionModel {
    #[must_use]
    pub fn new(opacity: OpacityLevels) -> Self {
        Self {
            selected: IndexSet::new(),
            hovered: None,
            opacity,
        }
    }

    pub fn toggle(&mut self, id: &str) {
        if !self.selected.shift_remove(id) {
            self.selected.insert(id.to_owned());
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn set_hovered(&mut self, id: Option<&str>) {
        self.hovered = id.map(str::to_owned);
    }

    #[must_use]
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    #[must_use]
    pub fn selected_ids(&self) -> &IndexSet<String> {
        &self.selected
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Render opacity for one record.
    ///
    /// Empty selection leaves everyone at `neutral`; otherwise selected ids
    /// get `full` and the rest `dimmed`. The hovered id always gets `full`.
    #[must_use]
    pub fn opacity_for(&self, id: &str) -> f64 {
        if self.hovered.as_deref() == Some(id) {
            return self.opacity.full;
        }
        if self.selected.is_empty() {
            self.opacity.neutral
        } else if self.selected.contains(id) {
            self.opacity.full
        } else {
            self.opacity.dimmed
        }
    }

    /// Derived emphasis for one record under current hover/selection state.
    #[must_use]
    pub fn emphasis_for(&self, id: &str) -> EmphasisState {
        if self.hovered.as_deref() == Some(id) {
            return EmphasisState {
                dimmed: false,
                highlighted: true,
            };
        }
        if self.selected.is_empty() {
            EmphasisState {
                dimmed: false,
                highlighted: false,
            }
        } else if self.selected.contains(id) {
            EmphasisState {
                dimmed: false,
                highlighted: true,
            }
        } else {
            EmphasisState {
                dimmed: true,
                highlighted: false,
            }
        }
    }
}
