use crate::dataset::Dataset;
use crate::error::{DataError, DataResult};
use crate::row::Row;
use crate::value::{Slice, Target};

/// Read-only re-indexing of another dataset.
///
/// Row `i` of the subset is row `row_map[i]` of the superset. Nothing is
/// copied, and subsets cannot grow.
pub struct Subset<'a> {
    superset: &'a dyn Dataset,
    row_map: Vec<usize>,
}

impl<'a> Subset<'a> {
    pub fn new(superset: &'a dyn Dataset, row_map: Vec<usize>) -> Self {
        Subset { superset, row_map }
    }

    pub fn row_map(&self) -> &[usize] {
        &self.row_map
    }

    fn mapped(&self, index: usize) -> DataResult<usize> {
        self.row_map
            .get(index)
            .copied()
            .ok_or(DataError::RowIndexOutOfBounds {
                index,
                num_rows: self.row_map.len(),
            })
    }
}

impl Dataset for Subset<'_> {
    fn num_rows(&self) -> usize {
        self.row_map.len()
    }

    fn num_features(&self) -> usize {
        self.superset.num_features()
    }

    fn num_targets(&self) -> usize {
        self.superset.num_targets()
    }

    fn all_features_floats(&self) -> bool {
        self.superset.all_features_floats()
    }

    fn all_targets_floats(&self) -> bool {
        self.superset.all_targets_floats()
    }

    fn add_row_from_strings(&mut self, _values: &[&str]) -> DataResult<()> {
        Err(DataError::SubsetNotGrowable)
    }

    fn row(&self, index: usize) -> DataResult<Row> {
        self.superset.row(self.mapped(index)?)
    }

    fn features(&self, index: usize) -> DataResult<Slice> {
        self.superset.features(self.mapped(index)?)
    }

    fn target(&self, index: usize) -> DataResult<Target> {
        self.superset.target(self.mapped(index)?)
    }
}
