use tracing::debug;

use crate::column::{parse_float, ColumnType};
use crate::error::{DataError, DataResult};
use crate::partition::ColumnPartition;
use crate::row::Row;
use crate::value::{Slice, Target};

/// Trait for row-oriented datasets.
pub trait Dataset: Send + Sync {
    fn num_rows(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    fn num_features(&self) -> usize;

    fn num_targets(&self) -> usize;

    fn all_features_floats(&self) -> bool;

    fn all_targets_floats(&self) -> bool;

    /// Encode and append one row. Rejected rows leave the dataset untouched.
    fn add_row_from_strings(&mut self, values: &[&str]) -> DataResult<()>;

    /// Decode row `index`.
    fn row(&self, index: usize) -> DataResult<Row>;

    /// Decode only the features of row `index`.
    fn features(&self, index: usize) -> DataResult<Slice> {
        self.row(index).map(|row| row.into_parts().0)
    }

    /// Decode only the target of row `index`.
    fn target(&self, index: usize) -> DataResult<Target> {
        self.row(index).map(|row| row.into_parts().1)
    }
}

/// A dataset holding every row as a flat run of raw encoded values.
#[derive(Debug, Clone)]
pub struct InMemoryDataset {
    column_types: Vec<ColumnType>,
    partition: ColumnPartition,
    raw: Vec<f64>,
    all_features_floats: bool,
    all_targets_floats: bool,
}

impl InMemoryDataset {
    pub fn new(
        feature_columns: Vec<usize>,
        target_columns: Vec<usize>,
        column_types: Vec<ColumnType>,
    ) -> DataResult<Self> {
        let partition = ColumnPartition::new(feature_columns, target_columns, column_types.len())?;
        Ok(Self::with_partition(partition, column_types))
    }

    /// Build a dataset whose targets are the contiguous columns `[start, end)`.
    pub fn from_target_range(
        start: usize,
        end: usize,
        column_types: Vec<ColumnType>,
    ) -> DataResult<Self> {
        let partition = ColumnPartition::from_target_range(start, end, column_types.len())?;
        Ok(Self::with_partition(partition, column_types))
    }

    fn with_partition(partition: ColumnPartition, column_types: Vec<ColumnType>) -> Self {
        let all_floats =
            |indices: &[usize]| indices.iter().all(|&i| column_types[i].is_float());
        let all_features_floats = all_floats(partition.features());
        let all_targets_floats = all_floats(partition.targets());

        debug!(
            columns = column_types.len(),
            features = partition.num_features(),
            targets = partition.num_targets(),
            all_features_floats,
            all_targets_floats,
            "created dataset"
        );

        InMemoryDataset {
            column_types,
            partition,
            raw: Vec::new(),
            all_features_floats,
            all_targets_floats,
        }
    }

    pub fn num_columns(&self) -> usize {
        self.column_types.len()
    }

    pub fn column_types(&self) -> &[ColumnType] {
        &self.column_types
    }

    pub fn partition(&self) -> &ColumnPartition {
        &self.partition
    }

    fn raw_row(&self, index: usize) -> DataResult<&[f64]> {
        let num_rows = self.num_rows();
        if index >= num_rows {
            return Err(DataError::RowIndexOutOfBounds { index, num_rows });
        }
        let n = self.num_columns();
        Ok(&self.raw[index * n..(index + 1) * n])
    }

    fn decode(&self, all_floats: bool, indices: &[usize], raw_row: &[f64]) -> DataResult<Slice> {
        if all_floats {
            let values = indices
                .iter()
                .map(|&i| match self.column_types[i] {
                    ColumnType::Float => Ok(raw_row[i]),
                    ColumnType::String(_) => Err(DataError::ExpectedFloatColumn { index: i }),
                })
                .collect::<DataResult<Vec<f64>>>()?;
            Ok(Slice::Float(values))
        } else {
            let values = indices
                .iter()
                .map(|&i| self.column_types[i].value_from_raw(raw_row[i]))
                .collect::<DataResult<Vec<_>>>()?;
            Ok(Slice::Mixed(values))
        }
    }
}

impl Dataset for InMemoryDataset {
    fn num_rows(&self) -> usize {
        self.raw.len() / self.num_columns()
    }

    fn num_features(&self) -> usize {
        self.partition.num_features()
    }

    fn num_targets(&self) -> usize {
        self.partition.num_targets()
    }

    fn all_features_floats(&self) -> bool {
        self.all_features_floats
    }

    fn all_targets_floats(&self) -> bool {
        self.all_targets_floats
    }

    fn add_row_from_strings(&mut self, values: &[&str]) -> DataResult<()> {
        let expected = self.num_columns();
        if values.len() != expected {
            return Err(DataError::RowLengthMismatch {
                expected,
                got: values.len(),
            });
        }

        // Float columns are the only ones that can fail, so parse them before
        // any string column interns anything.
        let mut encoded = Vec::with_capacity(expected);
        for (column_type, value) in self.column_types.iter().zip(values) {
            encoded.push(match column_type {
                ColumnType::Float => parse_float(value)?,
                ColumnType::String(_) => 0.0,
            });
        }
        for ((column_type, value), raw) in self
            .column_types
            .iter_mut()
            .zip(values)
            .zip(encoded.iter_mut())
        {
            if let ColumnType::String(encoding) = column_type {
                *raw = encoding.persist(value);
            }
        }

        self.raw.extend_from_slice(&encoded);
        Ok(())
    }

    fn row(&self, index: usize) -> DataResult<Row> {
        let raw_row = self.raw_row(index)?;
        let features = self.decode(self.all_features_floats, self.partition.features(), raw_row)?;
        let target = self.decode(self.all_targets_floats, self.partition.targets(), raw_row)?;
        Ok(Row::new(features, target))
    }

    fn features(&self, index: usize) -> DataResult<Slice> {
        let raw_row = self.raw_row(index)?;
        self.decode(self.all_features_floats, self.partition.features(), raw_row)
    }

    fn target(&self, index: usize) -> DataResult<Target> {
        let raw_row = self.raw_row(index)?;
        self.decode(self.all_targets_floats, self.partition.targets(), raw_row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::infer_column_types;
    use crate::value::Value;

    fn mixed_dataset() -> InMemoryDataset {
        let types = infer_column_types(&["hi", "0", "0"]).unwrap();
        InMemoryDataset::new(vec![1, 2], vec![0], types).unwrap()
    }

    #[test]
    fn test_flags_and_counts() {
        let ds = mixed_dataset();
        assert!(ds.all_features_floats());
        assert!(!ds.all_targets_floats());
        assert_eq!(ds.num_features(), 2);
        assert_eq!(ds.num_targets(), 1);
        assert_eq!(ds.num_rows(), 0);
        assert!(ds.is_empty());

        let types = infer_column_types(&["hi", "0", "0"]).unwrap();
        let ds = InMemoryDataset::new(vec![0, 1], vec![2], types).unwrap();
        assert!(!ds.all_features_floats());
        assert!(ds.all_targets_floats());
    }

    #[test]
    fn test_construction_errors() {
        let types = infer_column_types(&["1", "2"]).unwrap();
        assert_eq!(
            InMemoryDataset::new(vec![], vec![0, 1], types.clone()).unwrap_err(),
            DataError::NoFeatures
        );
        assert_eq!(
            InMemoryDataset::from_target_range(0, 2, types.clone()).unwrap_err(),
            DataError::NoFeatures
        );
        assert!(matches!(
            InMemoryDataset::new(vec![0], vec![2], types),
            Err(DataError::ColumnIndexOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_add_and_read_rows() {
        let mut ds = mixed_dataset();
        ds.add_row_from_strings(&["hi", "1.5", "-2"]).unwrap();
        ds.add_row_from_strings(&["bye", "0", "3"]).unwrap();
        assert_eq!(ds.num_rows(), 2);

        let row = ds.row(1).unwrap();
        assert_eq!(row.features(), &Slice::Float(vec![0.0, 3.0]));
        assert_eq!(row.target(), &Slice::Mixed(vec![Value::from("bye")]));
        assert_eq!(ds.row(1).unwrap(), row);

        assert_eq!(
            ds.row(2).unwrap_err(),
            DataError::RowIndexOutOfBounds { index: 2, num_rows: 2 }
        );
    }

    #[test]
    fn test_features_and_target_decode_separately() {
        let mut ds = mixed_dataset();
        ds.add_row_from_strings(&["hi", "1.5", "-2"]).unwrap();
        ds.add_row_from_strings(&["bye", "0", "3"]).unwrap();

        let row = ds.row(1).unwrap();
        assert_eq!(&ds.features(1).unwrap(), row.features());
        assert_eq!(&ds.target(1).unwrap(), row.target());
        assert_eq!(
            ds.features(2).unwrap_err(),
            DataError::RowIndexOutOfBounds { index: 2, num_rows: 2 }
        );
        assert_eq!(
            ds.target(5).unwrap_err(),
            DataError::RowIndexOutOfBounds { index: 5, num_rows: 2 }
        );
    }

    #[test]
    fn test_mixed_features_decode() {
        let types = infer_column_types(&["a", "1", "2"]).unwrap();
        let mut ds = InMemoryDataset::new(vec![0, 1], vec![2], types).unwrap();
        ds.add_row_from_strings(&["cat", "4", "5"]).unwrap();
        let row = ds.row(0).unwrap();
        assert_eq!(
            row.features(),
            &Slice::Mixed(vec![Value::from("cat"), Value::Float(4.0)])
        );
        assert_eq!(row.target(), &Slice::Float(vec![5.0]));
    }

    #[test]
    fn test_rejected_row_leaves_no_trace() {
        let mut ds = mixed_dataset();
        assert_eq!(
            ds.add_row_from_strings(&["hi", "1"]).unwrap_err(),
            DataError::RowLengthMismatch { expected: 3, got: 2 }
        );
        assert!(matches!(
            ds.add_row_from_strings(&["new", "1", "nope"]),
            Err(DataError::InvalidFloat { .. })
        ));
        assert_eq!(ds.num_rows(), 0);
        match &ds.column_types()[0] {
            ColumnType::String(encoding) => assert!(encoding.is_empty()),
            ColumnType::Float => panic!("expected string column"),
        }
    }
}
