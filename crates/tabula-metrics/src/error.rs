use tabula_core::DataError;
use thiserror::Error;

/// Evaluation failure, generic over the error type of the evaluated model.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MetricsError<E> {
    #[error("Cannot evaluate on an empty test set")]
    EmptyTestSet,

    #[error("Regression metrics need exactly one float target, found {num_targets}")]
    InvalidRegressionTarget { num_targets: usize },

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("Model failed on test row {row}: {source}")]
    Model { row: usize, source: E },
}

pub type MetricsResult<T, E> = Result<T, MetricsError<E>>;
