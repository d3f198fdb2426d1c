pub mod csv_io;
pub mod model_io;

pub use csv_io::{dataset_from_path, dataset_from_reader, CsvError, CsvOptions, CsvResult};
pub use model_io::{load_linear_model, save_linear_model, LinearModel, ModelIoError, ModelIoResult};
