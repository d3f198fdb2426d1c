use rayon::prelude::*;
use tabula_core::{Classifier, Dataset, Row, Target};
use tracing::debug;

use crate::collection::NeighbourCollection;
use crate::distance::euclidean;
use crate::error::{KnnError, KnnResult};

/// K-Nearest Neighbors Classifier.
///
/// Training only keeps a reference to the dataset; each classification is a
/// single linear scan over it, keeping the `k` closest rows and voting on
/// their targets. Distances are squared Euclidean with an early bailout at
/// the current k-th best distance.
pub struct KnnClassifier<'a> {
    k: usize,
    training_data: Option<&'a dyn Dataset>,
}

impl<'a> KnnClassifier<'a> {
    pub fn new(k: usize) -> KnnResult<Self> {
        if k < 1 {
            return Err(KnnError::InvalidNumberOfNeighbours { k });
        }
        Ok(KnnClassifier {
            k,
            training_data: None,
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn is_trained(&self) -> bool {
        self.training_data.is_some()
    }

    pub fn train(&mut self, training_data: &'a dyn Dataset) -> KnnResult<()> {
        if !training_data.all_features_floats() {
            return Err(KnnError::NonFloatFeaturesTrainingSet);
        }
        if training_data.num_rows() == 0 {
            return Err(KnnError::EmptyTrainingDataset);
        }

        debug!(
            k = self.k,
            rows = training_data.num_rows(),
            features = training_data.num_features(),
            "trained knn classifier"
        );
        self.training_data = Some(training_data);
        Ok(())
    }

    pub fn classify(&self, row: &Row) -> KnnResult<Target> {
        let training_data = self.training_data.ok_or(KnnError::UntrainedClassifier)?;

        let expected = training_data.num_features();
        if row.num_features() != expected {
            return Err(KnnError::RowLengthMismatch {
                expected,
                got: row.num_features(),
            });
        }
        let query = row
            .features()
            .floats()
            .ok_or(KnnError::NonFloatFeaturesTestRow)?;

        let mut nearest = NeighbourCollection::new(self.k)?;
        for i in 0..training_data.num_rows() {
            let distance = {
                let candidate = training_data.features(i)?;
                let features = candidate
                    .floats()
                    .ok_or(KnnError::NonFloatFeaturesTrainingSet)?;
                euclidean(&query, &features, nearest.max_distance())
            };
            // targets are only decoded for rows that make the cut
            if nearest.accepts(distance) {
                nearest.insert(training_data.target(i)?, distance);
            }
        }

        nearest.vote()
    }

    /// Classify many rows in parallel. Results keep the order of `rows`.
    pub fn classify_batch(&self, rows: &[Row]) -> Vec<KnnResult<Target>> {
        debug!(rows = rows.len(), k = self.k, "classifying batch");
        rows.par_iter().map(|row| self.classify(row)).collect()
    }
}

impl Classifier for KnnClassifier<'_> {
    type Error = KnnError;

    fn classify(&self, row: &Row) -> KnnResult<Target> {
        KnnClassifier::classify(self, row)
    }
}
