mod compare;
mod config;
mod pipeline;
mod view;

pub use compare::{CompareModel, growth_rate};
pub use config::PipelineConfig;
pub use pipeline::{ChartFrame, ChartPipeline, EntitySummary, ExportSnapshot, MarkStyle};
pub use view::{SortDirection, SortKey, SortSpec, ViewQuery, view};
