use tabula_core::{Classifier, Dataset};
use tracing::debug;

use crate::error::{MetricsError, MetricsResult};

/// Number of test rows whose predicted target equals the recorded one.
pub fn correct_count<C: Classifier>(
    classifier: &C,
    test_set: &dyn Dataset,
) -> MetricsResult<usize, C::Error> {
    let mut correct = 0;
    for i in 0..test_set.num_rows() {
        let row = test_set.row(i)?;
        let predicted = classifier
            .classify(&row)
            .map_err(|source| MetricsError::Model { row: i, source })?;
        if &predicted == row.target() {
            correct += 1;
        }
    }
    Ok(correct)
}

/// Fraction of correctly classified test rows.
pub fn accuracy<C: Classifier>(classifier: &C, test_set: &dyn Dataset) -> MetricsResult<f64, C::Error> {
    let n = test_set.num_rows();
    if n == 0 {
        return Err(MetricsError::EmptyTestSet);
    }
    let correct = correct_count(classifier, test_set)?;
    debug!(correct, total = n, "evaluated classifier");
    Ok(correct as f64 / n as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use tabula_core::{infer_column_types, InMemoryDataset};
    use tabula_neighbors::{KnnClassifier, KnnError};

    fn labelled(rows: &[&[&str]]) -> InMemoryDataset {
        let types = infer_column_types(&["0", "0", "a"]).unwrap();
        let mut ds = InMemoryDataset::new(vec![0, 1], vec![2], types).unwrap();
        for row in rows {
            ds.add_row_from_strings(row).unwrap();
        }
        ds
    }

    fn training() -> InMemoryDataset {
        labelled(&[
            &["0", "0", "low"],
            &["1", "1", "low"],
            &["5", "5", "high"],
            &["6", "6", "high"],
        ])
    }

    #[test]
    fn test_accuracy() {
        let train = training();
        let mut knn = KnnClassifier::new(1).unwrap();
        knn.train(&train).unwrap();

        let test = labelled(&[
            &["0.1", "0.1", "low"],
            &["5.1", "5.1", "high"],
            &["0.2", "0.2", "high"],
        ]);
        assert_eq!(correct_count(&knn, &test).unwrap(), 2);
        assert_abs_diff_eq!(accuracy(&knn, &test).unwrap(), 2.0 / 3.0, epsilon = 1e-12);
        assert_eq!(accuracy(&knn, &train).unwrap(), 1.0);
    }

    #[test]
    fn test_empty_test_set() {
        let train = training();
        let mut knn = KnnClassifier::new(1).unwrap();
        knn.train(&train).unwrap();
        assert_eq!(
            accuracy(&knn, &labelled(&[])).unwrap_err(),
            MetricsError::EmptyTestSet
        );
    }

    #[test]
    fn test_model_error_is_reported_with_row() {
        let knn = KnnClassifier::new(1).unwrap();
        let test = labelled(&[&["0", "0", "low"]]);
        assert_eq!(
            accuracy(&knn, &test).unwrap_err(),
            MetricsError::Model {
                row: 0,
                source: KnnError::UntrainedClassifier
            }
        );
    }
}
