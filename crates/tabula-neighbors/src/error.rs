use tabula_core::DataError;
use thiserror::Error;

/// Errors raised by the k-nearest-neighbours classifier.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KnnError {
    #[error("Invalid number of neighbours {k}, must be at least 1")]
    InvalidNumberOfNeighbours { k: usize },

    #[error("Cannot train on an empty dataset")]
    EmptyTrainingDataset,

    #[error("Cannot train on dataset with some non-float features")]
    NonFloatFeaturesTrainingSet,

    #[error("Cannot classify before training")]
    UntrainedClassifier,

    #[error("Test row has {got} features, training set has {expected}")]
    RowLengthMismatch { expected: usize, got: usize },

    #[error("Cannot classify row with some non-float features")]
    NonFloatFeaturesTestRow,

    #[error("Cannot vote with an empty neighbour collection")]
    EmptyVote,

    #[error(transparent)]
    Data(#[from] DataError),
}

pub type KnnResult<T> = Result<T, KnnError>;
