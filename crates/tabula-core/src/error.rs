use thiserror::Error;

/// Core error type for column encoding and dataset access.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DataError {
    #[error("Unable to parse '{value}' as a 64-bit float")]
    InvalidFloat { value: String },

    #[error("Value '{value}' is out of range for a 64-bit float")]
    FloatOutOfRange { value: String },

    #[error("Unknown code {code} for string column")]
    UnknownCode { code: f64 },

    #[error("Row has length {got}, expected {expected}")]
    RowLengthMismatch { expected: usize, got: usize },

    #[error("Cannot access row {index} in dataset with {num_rows} rows")]
    RowIndexOutOfBounds { index: usize, num_rows: usize },

    #[error("Dataset must have at least one feature column")]
    NoFeatures,

    #[error("Dataset must have at least one target column")]
    NoTargets,

    #[error("Column index {index} out of bounds for {num_columns} columns")]
    ColumnIndexOutOfBounds { index: usize, num_columns: usize },

    #[error("Column {index} is listed more than once")]
    DuplicateColumn { index: usize },

    #[error("Column {index} is neither a feature nor a target")]
    UncoveredColumn { index: usize },

    #[error("Invalid target range [{start}, {end}) for {num_columns} columns")]
    TargetOutOfBounds {
        start: usize,
        end: usize,
        num_columns: usize,
    },

    #[error("Column {index} is not a float column")]
    ExpectedFloatColumn { index: usize },

    #[error("Cannot add rows to a subset")]
    SubsetNotGrowable,
}

pub type DataResult<T> = Result<T, DataError>;
