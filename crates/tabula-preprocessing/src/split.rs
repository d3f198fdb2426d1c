use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tabula_core::{Dataset, Subset};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SplitError {
    #[error("Unable to split dataset with invalid ratio {ratio:.2}")]
    InvalidRatio { ratio: f64 },

    #[error("Cannot split empty dataset")]
    EmptyDataset,
}

pub type SplitResult<T> = Result<T, SplitError>;

/// Randomly split a dataset into training and test views.
///
/// Rows are visited in shuffled order and each goes to the training side
/// with probability `training_ratio`, so the split sizes are only
/// approximately proportional. Returns `(training, test)` subsets over the
/// same dataset.
pub fn train_test_split<'a>(
    dataset: &'a dyn Dataset,
    training_ratio: f64,
    seed: Option<u64>,
) -> SplitResult<(Subset<'a>, Subset<'a>)> {
    if !(0.0..=1.0).contains(&training_ratio) {
        return Err(SplitError::InvalidRatio {
            ratio: training_ratio,
        });
    }
    let n = dataset.num_rows();
    if n == 0 {
        return Err(SplitError::EmptyDataset);
    }

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut rng);

    let mut training = Vec::with_capacity(n);
    let mut test = Vec::with_capacity(n);
    for index in indices {
        if rng.gen::<f64>() < training_ratio {
            training.push(index);
        } else {
            test.push(index);
        }
    }

    debug!(
        training = training.len(),
        test = test.len(),
        "split dataset"
    );
    Ok((Subset::new(dataset, training), Subset::new(dataset, test)))
}
