use crate::row::Row;
use crate::value::Target;

/// Trait for trained models that predict a target for a row.
pub trait Classifier {
    type Error;

    fn classify(&self, row: &Row) -> Result<Target, Self::Error>;
}

/// Trait for trained models that predict a single float for a row.
pub trait Regressor {
    type Error;

    fn predict(&self, row: &Row) -> Result<f64, Self::Error>;
}
