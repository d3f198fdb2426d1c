use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tabula_core::{infer_column_types, DataError, Dataset, InMemoryDataset};
use thiserror::Error;
use tracing::info;

/// Errors raised while turning CSV input into a dataset.
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("Unable to open file {}: {source}", path.display())]
    OpenFile {
        path: PathBuf,
        source: io::Error,
    },

    #[error("CSV input needs a data row after the header")]
    NotEnoughLines,

    #[error("Unable to infer column types from the first data row: {0}")]
    ColumnTypes(#[source] DataError),

    #[error("Unable to create dataset: {0}")]
    CreateDataset(#[source] DataError),

    #[error("Unable to parse row on line {line}: {source}")]
    ParseRow { line: u64, source: DataError },

    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

pub type CsvResult<T> = Result<T, CsvError>;

/// Reader settings for CSV ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    /// Skip the first line as a header row.
    pub has_headers: bool,
    pub delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            has_headers: true,
            delimiter: b',',
        }
    }
}

impl CsvOptions {
    pub fn with_has_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn reader<R: io::Read>(&self, input: R) -> csv::Reader<R> {
        csv::ReaderBuilder::new()
            .has_headers(self.has_headers)
            .delimiter(self.delimiter)
            .from_reader(input)
    }
}

/// Load a CSV file into a dataset whose targets are the columns
/// `[target_start, target_end)`.
pub fn dataset_from_path<P: AsRef<Path>>(
    path: P,
    target_start: usize,
    target_end: usize,
    options: &CsvOptions,
) -> CsvResult<InMemoryDataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CsvError::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = dataset_from_reader(file, target_start, target_end, options)?;
    info!(
        path = %path.display(),
        rows = dataset.num_rows(),
        columns = dataset.num_columns(),
        "loaded csv dataset"
    );
    Ok(dataset)
}

/// Load CSV from any reader.
///
/// Column types come from the first data row, which is then stored like
/// every other row. Any row that does not fit those types aborts the load.
pub fn dataset_from_reader<R: io::Read>(
    input: R,
    target_start: usize,
    target_end: usize,
    options: &CsvOptions,
) -> CsvResult<InMemoryDataset> {
    let mut reader = options.reader(input);
    let mut records = reader.records();

    let first = records.next().ok_or(CsvError::NotEnoughLines)??;
    let first_values: Vec<&str> = first.iter().collect();
    let column_types = infer_column_types(&first_values).map_err(CsvError::ColumnTypes)?;
    let mut dataset = InMemoryDataset::from_target_range(target_start, target_end, column_types)
        .map_err(CsvError::CreateDataset)?;

    add_record(&mut dataset, &first)?;
    for record in records {
        add_record(&mut dataset, &record?)?;
    }
    Ok(dataset)
}

fn add_record(dataset: &mut InMemoryDataset, record: &csv::StringRecord) -> CsvResult<()> {
    let values: Vec<&str> = record.iter().collect();
    dataset
        .add_row_from_strings(&values)
        .map_err(|source| CsvError::ParseRow {
            line: record.position().map_or(0, |p| p.line()),
            source,
        })
}
