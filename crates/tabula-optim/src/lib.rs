pub mod error;
pub mod gradient_descent;
pub mod vector;

pub use error::{OptimError, OptimResult};
pub use gradient_descent::{GradientDescent, GradientDescentConfig};
