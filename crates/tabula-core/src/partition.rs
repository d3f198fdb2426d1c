use crate::error::{DataError, DataResult};

/// Split of a dataset's columns into feature and target indices.
///
/// Both sets are non-empty, disjoint, in range, and together cover every column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPartition {
    features: Vec<usize>,
    targets: Vec<usize>,
    num_columns: usize,
}

impl ColumnPartition {
    pub fn new(features: Vec<usize>, targets: Vec<usize>, num_columns: usize) -> DataResult<Self> {
        if targets.is_empty() {
            return Err(DataError::NoTargets);
        }
        if features.is_empty() {
            return Err(DataError::NoFeatures);
        }

        let mut seen = vec![false; num_columns];
        for &index in features.iter().chain(targets.iter()) {
            if index >= num_columns {
                return Err(DataError::ColumnIndexOutOfBounds { index, num_columns });
            }
            if seen[index] {
                return Err(DataError::DuplicateColumn { index });
            }
            seen[index] = true;
        }
        if let Some(index) = seen.iter().position(|&covered| !covered) {
            return Err(DataError::UncoveredColumn { index });
        }

        Ok(ColumnPartition {
            features,
            targets,
            num_columns,
        })
    }

    /// Targets are the columns in `[start, end)`, features are all the others.
    pub fn from_target_range(start: usize, end: usize, num_columns: usize) -> DataResult<Self> {
        if start >= end || end > num_columns {
            return Err(DataError::TargetOutOfBounds {
                start,
                end,
                num_columns,
            });
        }
        let features = (0..num_columns).filter(|i| !(start..end).contains(i)).collect();
        let targets = (start..end).collect();
        Self::new(features, targets, num_columns)
    }

    pub fn features(&self) -> &[usize] {
        &self.features
    }

    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    pub fn num_features(&self) -> usize {
        self.features.len()
    }

    pub fn num_targets(&self) -> usize {
        self.targets.len()
    }

    pub fn num_columns(&self) -> usize {
        self.num_columns
    }
}
