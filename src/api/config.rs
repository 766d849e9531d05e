use serde::{Deserialize, Serialize};

use crate::core::Period;
use crate::error::{VizError, VizResult};
use crate::interaction::OpacityLevels;

/// Pipeline bootstrap configuration.
///
/// Serializable so host applications can persist/load chart setup without
/// inventing their own ad-hoc format. One config parameterizes the generic
/// pipeline for a concrete dataset: which metric column drives the chart and
/// which period is active at mount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Metric column driving bar lengths, sorting and bin classification.
    pub metric: String,
    pub active_period: Period,
    /// Head-truncation applied after sorting; `None` keeps all rows.
    #[serde(default)]
    pub top_n: Option<usize>,
    #[serde(default = "default_headroom_ratio")]
    pub headroom_ratio: f64,
    #[serde(default = "default_band_padding_ratio")]
    pub band_padding_ratio: f64,
    /// Alpha applied to choropleth marks outside the highlighted bins.
    #[serde(default = "default_dim_alpha")]
    pub dim_alpha: f64,
    #[serde(default)]
    pub opacity: OpacityLevels,
}

impl PipelineConfig {
    #[must_use]
    pub fn new(metric: impl Into<String>, active_period: Period) -> Self {
        Self {
            metric: metric.into(),
            active_period,
            top_n: None,
            headroom_ratio: default_headroom_ratio(),
            band_padding_ratio: default_band_padding_ratio(),
            dim_alpha: default_dim_alpha(),
            opacity: OpacityLevels::default(),
        }
    }

    /// Sets post-sort head truncation.
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }

    /// Sets headroom above the natural domain maximum.
    #[must_use]
    pub fn with_headroom_ratio(mut self, headroom_ratio: f64) -> Self {
        self.headroom_ratio = headroom_ratio;
        self
    }

    /// Sets padding between adjacent bands.
    #[must_use]
    pub fn with_band_padding_ratio(mut self, band_padding_ratio: f64) -> Self {
        self.band_padding_ratio = band_padding_ratio;
        self
    }

    /// Sets the dim alpha for non-highlighted choropleth bins.
    #[must_use]
    pub fn with_dim_alpha(mut self, dim_alpha: f64) -> Self {
        self.dim_alpha = dim_alpha;
        self
    }

    /// Sets emphasis opacity tiers.
    #[must_use]
    pub fn with_opacity(mut self, opacity: OpacityLevels) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn validate(&self) -> VizResult<()> {
        if self.metric.is_empty() {
            return Err(VizError::InvalidData(
                "config metric name must not be empty".to_owned(),
            ));
        }
        if !self.headroom_ratio.is_finite() || self.headroom_ratio < 0.0 {
            return Err(VizError::InvalidData(
                "headroom ratio must be finite and >= 0".to_owned(),
            ));
        }
        if !self.band_padding_ratio.is_finite() || !(0.0..1.0).contains(&self.band_padding_ratio) {
            return Err(VizError::InvalidData(
                "band padding ratio must be finite and in [0, 1)".to_owned(),
            ));
        }
        if !self.dim_alpha.is_finite() || !(0.0..=1.0).contains(&self.dim_alpha) {
            return Err(VizError::InvalidData(
                "dim alpha must be finite and in [0, 1]".to_owned(),
            ));
        }
        self.opacity.validate()
    }

    /// Serializes config to pretty JSON for debug/config files.
    pub fn to_json_pretty(&self) -> VizResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| VizError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> VizResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| VizError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_headroom_ratio() -> f64 {
    0.1
}

fn default_band_padding_ratio() -> f64 {
    0.2
}

fn default_dim_alpha() -> f64 {
    0.4
}
