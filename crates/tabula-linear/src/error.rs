use tabula_core::DataError;
use tabula_optim::OptimError;
use thiserror::Error;

/// Errors raised by linear models and their parameter estimation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LinearError {
    #[error("Cannot train on dataset with some non-float features")]
    NonFloatFeaturesTrainingSet,

    #[error("Cannot train on dataset with some non-float targets")]
    NonFloatTargetsTrainingSet,

    #[error("Cannot train on dataset with {num_targets} targets, must have exactly 1")]
    InvalidNumberOfTargets { num_targets: usize },

    #[error("Cannot train on dataset with no features")]
    NoFeatures,

    #[error("Cannot train on an empty dataset")]
    EmptyTrainingDataset,

    #[error("Cannot estimate parameters with an untrained estimator")]
    UntrainedEstimator,

    #[error("Initial parameters must not be empty")]
    EmptyInitialParameters,

    #[error("Expected {expected} parameters, got {got}")]
    ParameterLengthMismatch { expected: usize, got: usize },

    #[error("Cannot predict before training")]
    UntrainedRegressor,

    #[error("Test row has {got} features, model expects {expected}")]
    RowLengthMismatch { expected: usize, got: usize },

    #[error("Cannot predict row with some non-float features")]
    NonFloatFeaturesTestRow,

    #[error(transparent)]
    Optim(#[from] OptimError),

    #[error(transparent)]
    Data(#[from] DataError),
}

pub type LinearResult<T> = Result<T, LinearError>;
