pub mod error;
pub mod estimator;
pub mod regression;

pub use error::{LinearError, LinearResult};
pub use estimator::*;
pub use regression::*;
