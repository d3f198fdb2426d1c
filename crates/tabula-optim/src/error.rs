use thiserror::Error;

/// Errors raised while configuring or running an optimizer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OptimError {
    #[error(
        "Learning rate, precision, and max iterations are {learning_rate}, {precision}, {max_iterations}; they must all be positive"
    )]
    InvalidConfig {
        learning_rate: f64,
        precision: f64,
        max_iterations: usize,
    },

    #[error("Initial guess must not be empty")]
    EmptyInitialGuess,

    #[error("Gradient has {got} components, expected {expected}")]
    GradientLengthMismatch { expected: usize, got: usize },

    #[error("Gradient descent diverged at iteration {iteration}")]
    Diverged { iteration: usize },
}

pub type OptimResult<T> = Result<T, OptimError>;
