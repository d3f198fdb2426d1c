pub mod column;
pub mod dataset;
pub mod error;
pub mod model;
pub mod partition;
pub mod row;
pub mod subset;
pub mod value;

pub use column::{infer_column_types, parse_float, ColumnType, StringEncoding};
pub use dataset::{Dataset, InMemoryDataset};
pub use error::{DataError, DataResult};
pub use model::{Classifier, Regressor};
pub use partition::ColumnPartition;
pub use row::Row;
pub use subset::Subset;
pub use value::{Slice, Target, Value};
