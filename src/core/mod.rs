mod bins;
mod color;
mod layout;
mod record;
mod scale;
mod types;

pub use bins::{Bin, BinSelection, BinSet, NO_DATA_BIN};
pub use color::Color;
pub use layout::{ChartLayout, Margins, SizeClass, classify};
pub use record::{Dataset, Record};
pub use scale::{BandScale, LinearScale, ZoomRange};
pub use types::Period;
