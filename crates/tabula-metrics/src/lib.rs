pub mod classification;
pub mod error;
pub mod regression;

pub use classification::*;
pub use error::{MetricsError, MetricsResult};
pub use regression::*;
