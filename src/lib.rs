//! vizflow: deterministic pipeline for interactive data visualizations.
//!
//! The crate owns the data-transformation core shared by ranked bar charts,
//! choropleth maps and comparison overlays: filtering/sorting views over
//! tabular records, value-to-pixel scales, bin classification and the
//! hover/selection emphasis model. Rendering, fetching and export encoding
//! stay with host applications.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod telemetry;

pub use api::{ChartPipeline, PipelineConfig};
pub use error::{VizError, VizResult};
