use serde::{Deserialize, Serialize};

use crate::error::{VizError, VizResult};

/// User-controlled cap on the visible upper bound of a linear domain.
///
/// Zooming narrows the domain to `[0, max]` below the natural data maximum,
/// magnifying the low end of the distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomRange {
    pub max: f64,
}

impl ZoomRange {
    pub fn new(max: f64) -> VizResult<Self> {
        if !max.is_finite() || max <= 0.0 {
            return Err(VizError::InvalidData(
                "zoom range max must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self { max })
    }
}

/// Linear value axis with a fixed zero lower bound.
///
/// Bar lengths are computed from the exact (un-niced) domain; `ticks` rounds
/// for axis labels only and never alters the value-to-pixel mapping.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    upper: f64,
}

impl LinearScale {
    pub fn new(upper: f64) -> VizResult<Self> {
        if !upper.is_finite() || upper <= 0.0 {
            return Err(VizError::InvalidData(
                "linear scale upper bound must be finite and > 0".to_owned(),
            ));
        }
        Ok(Self { upper })
    }

    /// Fits a scale to metric values.
    ///
    /// An active zoom wins over the natural maximum. Without zoom the domain
    /// gets `headroom_ratio` padding above the maximum so the largest bar
    /// never touches the plot edge. An empty, all-missing or all-zero value
    /// set defaults the pre-headroom maximum to `1.0` so the scale stays
    /// well-formed.
    #[must_use]
    pub fn from_values<I>(values: I, zoom: Option<ZoomRange>, headroom_ratio: f64) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        if let Some(zoom) = zoom {
            return Self { upper: zoom.max };
        }

        let natural_max = values
            .into_iter()
            .flatten()
            .filter(|value| value.is_finite())
            .fold(0.0_f64, f64::max);
        let natural_max = if natural_max > 0.0 { natural_max } else { 1.0 };
        Self {
            upper: natural_max * (1.0 + headroom_ratio.max(0.0)),
        }
    }

    #[must_use]
    pub fn upper(self) -> f64 {
        self.upper
    }

    /// Maps a value into `[0, range_length]` pixels.
    ///
    /// Missing values map to zero length. Values outside the domain clamp to
    /// the range edges: zoomed-out bars saturate at full length instead of
    /// overflowing the plot.
    #[must_use]
    pub fn value_to_pixel(self, value: Option<f64>, range_length: f64) -> f64 {
        let Some(value) = value else { return 0.0 };
        if !value.is_finite() || range_length <= 0.0 {
            return 0.0;
        }
        (value / self.upper).clamp(0.0, 1.0) * range_length
    }

    /// Rounded tick values for axis labelling.
    ///
    /// Steps follow a 1/2/5 ladder near `upper / target_count`. Ticks cover
    /// `[0, upper]`; the last tick may fall short of `upper` when the nice
    /// step does not divide it.
    #[must_use]
    pub fn ticks(self, target_count: usize) -> Vec<f64> {
        let target_count = target_count.max(1);
        let raw_step = self.upper / target_count as f64;
        let magnitude = 10.0_f64.powf(raw_step.log10().floor());
        let residual = raw_step / magnitude;
        let nice = if residual <= 1.0 {
            1.0
        } else if residual <= 2.0 {
            2.0
        } else if residual <= 5.0 {
            5.0
        } else {
            10.0
        };
        let step = nice * magnitude;

        let mut ticks = Vec::new();
        let mut tick = 0.0;
        let mut i = 0_u32;
        while tick <= self.upper * (1.0 + 1e-9) {
            ticks.push(tick);
            i += 1;
            tick = step * f64::from(i);
        }
        ticks
    }
}

/// Equal-width categorical slots over a pixel range.
///
/// The domain is positional: the ordered entity list from the data view, in
/// that exact order. Resorting the view changes bar order purely by handing
/// in a reordered domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandScale {
    domain: Vec<String>,
    range_length: f64,
    padding_ratio: f64,
}

impl BandScale {
    pub fn new(
        domain: Vec<String>,
        range_length: f64,
        padding_ratio: f64,
    ) -> VizResult<Self> {
        if !range_length.is_finite() || range_length < 0.0 {
            return Err(VizError::InvalidData(
                "band scale range length must be finite and >= 0".to_owned(),
            ));
        }
        if !padding_ratio.is_finite() || !(0.0..1.0).contains(&padding_ratio) {
            return Err(VizError::InvalidData(
                "band scale padding ratio must be finite and in [0, 1)".to_owned(),
            ));
        }
        Ok(Self {
            domain,
            range_length,
            padding_ratio,
        })
    }

    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Distance between the leading edges of adjacent bands.
    #[must_use]
    pub fn step(&self) -> f64 {
        if self.domain.is_empty() {
            return 0.0;
        }
        self.range_length / self.domain.len() as f64
    }

    /// Drawable width of one band.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        self.step() * (1.0 - self.padding_ratio)
    }

    /// Leading-edge pixel offset of `category`, or `None` when it is not in
    /// the domain.
    #[must_use]
    pub fn position(&self, category: &str) -> Option<f64> {
        let index = self.domain.iter().position(|c| c == category)?;
        let step = self.step();
        Some(index as f64 * step + step * self.padding_ratio / 2.0)
    }
}
