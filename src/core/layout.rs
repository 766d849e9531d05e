use serde::{Deserialize, Serialize};

/// Screen-size class derived from observed container width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Pixel dimensions shared by every chart at a given container width.
///
/// Margins and font size shrink monotonically with the size class. Hosts
/// call `classify` on mount, on every resize event and on fullscreen
/// enter/exit; the result is a pure function of width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub size_class: SizeClass,
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub font_size_px: f64,
}

impl ChartLayout {
    /// Width of the plot area after margins.
    #[must_use]
    pub fn plot_width(self) -> f64 {
        (self.width - self.margins.left - self.margins.right).max(0.0)
    }

    /// Height of the plot area after margins.
    #[must_use]
    pub fn plot_height(self) -> f64 {
        (self.height - self.margins.top - self.margins.bottom).max(0.0)
    }
}

const SMALL_MAX_WIDTH: f64 = 640.0;
const MEDIUM_MAX_WIDTH: f64 = 1024.0;

/// Maps a container width to a size class and chart dimensions.
#[must_use]
pub fn classify(container_width_px: f64) -> ChartLayout {
    let width = if container_width_px.is_finite() {
        container_width_px.max(0.0)
    } else {
        0.0
    };

    if width < SMALL_MAX_WIDTH {
        ChartLayout {
            size_class: SizeClass::Small,
            width,
            height: 300.0,
            margins: Margins {
                top: 8.0,
                right: 12.0,
                bottom: 32.0,
                left: 48.0,
            },
            font_size_px: 10.0,
        }
    } else if width < MEDIUM_MAX_WIDTH {
        ChartLayout {
            size_class: SizeClass::Medium,
            width,
            height: 420.0,
            margins: Margins {
                top: 12.0,
                right: 16.0,
                bottom: 40.0,
                left: 64.0,
            },
            font_size_px: 12.0,
        }
    } else {
        ChartLayout {
            size_class: SizeClass::Large,
            width,
            height: 520.0,
            margins: Margins {
                top: 16.0,
                right: 24.0,
                bottom: 48.0,
                left: 80.0,
            },
            font_size_px: 14.0,
        }
    }
}
