pub mod category_mapping;
pub mod error;
pub mod grid_range;
pub mod quantity;
pub mod raw;
pub mod sample;
pub mod timestamp;

pub use error::{ForcingError, Result};
pub use quantity::{Family, Grid, Quantity};
pub use sample::{Reading, Sample, Scalar, Series, SeriesMap, WindComponents};
pub use timestamp::Timestamp;
