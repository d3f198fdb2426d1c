use tabula_core::Dataset;
use tabula_optim::vector::add;
use tabula_optim::{GradientDescent, GradientDescentConfig};
use tracing::debug;

use crate::error::{LinearError, LinearResult};

/// Check that a dataset can be used to fit a single-output model on float features.
pub fn validate_training_set(dataset: &dyn Dataset) -> LinearResult<()> {
    if !dataset.all_features_floats() {
        return Err(LinearError::NonFloatFeaturesTrainingSet);
    }
    if !dataset.all_targets_floats() {
        return Err(LinearError::NonFloatTargetsTrainingSet);
    }
    if dataset.num_targets() != 1 {
        return Err(LinearError::InvalidNumberOfTargets {
            num_targets: dataset.num_targets(),
        });
    }
    if dataset.num_features() == 0 {
        return Err(LinearError::NoFeatures);
    }
    if dataset.num_rows() == 0 {
        return Err(LinearError::EmptyTrainingDataset);
    }
    Ok(())
}

/// Gradient of the squared error of a linear model at one observation.
///
/// `parameters` holds one coefficient per feature followed by the constant
/// term. Returns `2(ŷ - y) * [x_0, .., x_n, 1]`.
pub fn least_squares_loss_gradient(
    parameters: &[f64],
    x: &[f64],
    y: f64,
) -> LinearResult<Vec<f64>> {
    if parameters.len() != x.len() + 1 {
        return Err(LinearError::ParameterLengthMismatch {
            expected: x.len() + 1,
            got: parameters.len(),
        });
    }

    let (coefficients, constant) = parameters.split_at(x.len());
    let prediction: f64 = constant[0]
        + coefficients
            .iter()
            .zip(x)
            .map(|(c, xi)| c * xi)
            .sum::<f64>();
    let z = 2.0 * (prediction - y);

    let mut gradient: Vec<f64> = x.iter().map(|xi| xi * z).collect();
    gradient.push(z);
    Ok(gradient)
}

/// Estimates model parameters by minimising a loss summed over a training set.
///
/// The loss is supplied as its per-observation gradient
/// `(parameters, features, target) -> ∇loss`.
pub struct GradientDescentEstimator<'a, F> {
    optimizer: GradientDescent,
    loss_gradient: F,
    training_set: Option<&'a dyn Dataset>,
}

impl<'a, F> GradientDescentEstimator<'a, F>
where
    F: Fn(&[f64], &[f64], f64) -> LinearResult<Vec<f64>>,
{
    pub fn new(config: GradientDescentConfig, loss_gradient: F) -> LinearResult<Self> {
        Ok(GradientDescentEstimator {
            optimizer: GradientDescent::new(config)?,
            loss_gradient,
            training_set: None,
        })
    }

    pub fn train(&mut self, training_set: &'a dyn Dataset) -> LinearResult<()> {
        validate_training_set(training_set)?;
        self.training_set = Some(training_set);
        Ok(())
    }

    pub fn estimate(&self, initial: &[f64]) -> LinearResult<Vec<f64>> {
        let training_set = self.training_set.ok_or(LinearError::UntrainedEstimator)?;
        if initial.is_empty() {
            return Err(LinearError::EmptyInitialParameters);
        }

        let mut observations = Vec::with_capacity(training_set.num_rows());
        for i in 0..training_set.num_rows() {
            let (features, target) = training_set.row(i)?.into_parts();
            let x = features
                .floats()
                .ok_or(LinearError::NonFloatFeaturesTrainingSet)?
                .into_owned();
            let y = target
                .floats()
                .and_then(|t| t.first().copied())
                .ok_or(LinearError::NonFloatTargetsTrainingSet)?;
            observations.push((x, y));
        }
        debug!(
            observations = observations.len(),
            parameters = initial.len(),
            "estimating parameters"
        );

        self.optimizer.minimize(initial, |guess| {
            let mut sum = vec![0.0; guess.len()];
            for (x, y) in &observations {
                let gradient = (self.loss_gradient)(guess, x.as_slice(), *y)?;
                if gradient.len() != sum.len() {
                    return Err(LinearError::ParameterLengthMismatch {
                        expected: sum.len(),
                        got: gradient.len(),
                    });
                }
                sum = add(&sum, &gradient);
            }
            Ok(sum)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use tabula_core::{infer_column_types, InMemoryDataset};

    fn config() -> GradientDescentConfig {
        GradientDescentConfig::default()
            .with_learning_rate(0.001)
            .with_precision(1e-12)
            .with_max_iterations(10_000)
    }

    fn dataset(first: &[&str], features: Vec<usize>, targets: Vec<usize>, rows: &[&[&str]]) -> InMemoryDataset {
        let types = infer_column_types(first).unwrap();
        let mut ds = InMemoryDataset::new(features, targets, types).unwrap();
        for row in rows {
            ds.add_row_from_strings(row).unwrap();
        }
        ds
    }

    fn plane(noise: f64, seed: u64) -> InMemoryDataset {
        let mut rng = StdRng::seed_from_u64(seed);
        let types = infer_column_types(&["1.0", "1.0", "1.0"]).unwrap();
        let mut ds = InMemoryDataset::new(vec![0, 1], vec![2], types).unwrap();
        for i in 0..20 {
            for j in 0..20 {
                let x0 = -1.9 + 0.2 * i as f64;
                let x1 = -1.9 + 0.2 * j as f64;
                let y = 2.0 * x0 - 3.0 * x1 + 4.0 + noise * rng.gen_range(-1.0..1.0);
                let row = [format!("{:.10}", x0), format!("{:.10}", x1), format!("{:.10}", y)];
                let row: Vec<&str> = row.iter().map(String::as_str).collect();
                ds.add_row_from_strings(&row).unwrap();
            }
        }
        ds
    }

    #[test]
    fn test_least_squares_gradient() {
        // prediction = 1*2 + 3 = 5, z = 2 * (5 - 4) = 2
        let g = least_squares_loss_gradient(&[1.0, 3.0], &[2.0], 4.0).unwrap();
        assert_eq!(g, vec![4.0, 2.0]);

        assert_eq!(
            least_squares_loss_gradient(&[1.0], &[2.0], 4.0).unwrap_err(),
            LinearError::ParameterLengthMismatch { expected: 2, got: 1 }
        );
    }

    #[test]
    fn test_train_validation() {
        let mut est = GradientDescentEstimator::new(config(), least_squares_loss_gradient).unwrap();

        let non_float_features = dataset(&["x", "1.0"], vec![0], vec![1], &[&["hi", "24"]]);
        assert_eq!(
            est.train(&non_float_features).unwrap_err(),
            LinearError::NonFloatFeaturesTrainingSet
        );

        let non_float_target = dataset(&["x", "1.0"], vec![1], vec![0], &[&["hi", "24"]]);
        assert_eq!(
            est.train(&non_float_target).unwrap_err(),
            LinearError::NonFloatTargetsTrainingSet
        );

        let two_targets = dataset(
            &["1.0", "1.0", "1.0"],
            vec![0],
            vec![1, 2],
            &[&["3.0", "24", "-1e8"]],
        );
        assert_eq!(
            est.train(&two_targets).unwrap_err(),
            LinearError::InvalidNumberOfTargets { num_targets: 2 }
        );

        let empty = dataset(&["1.0", "1.0"], vec![0], vec![1], &[]);
        assert_eq!(est.train(&empty).unwrap_err(), LinearError::EmptyTrainingDataset);

        let valid = dataset(&["1.0", "1.0"], vec![0], vec![1], &[&["-3.14", "24"]]);
        assert!(est.train(&valid).is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let result = GradientDescentEstimator::new(
            config().with_learning_rate(-0.3),
            least_squares_loss_gradient,
        );
        assert!(matches!(result, Err(LinearError::Optim(_))));
    }

    #[test]
    fn test_estimate_errors() {
        let ds = plane(0.0, 1);
        let mut est = GradientDescentEstimator::new(config(), least_squares_loss_gradient).unwrap();
        assert_eq!(est.estimate(&[0.0; 3]).unwrap_err(), LinearError::UntrainedEstimator);

        est.train(&ds).unwrap();
        assert_eq!(est.estimate(&[]).unwrap_err(), LinearError::EmptyInitialParameters);
        assert_eq!(
            est.estimate(&[1.75, -3.25]).unwrap_err(),
            LinearError::ParameterLengthMismatch { expected: 3, got: 2 }
        );
    }

    #[test]
    fn test_estimates_plane() {
        let ds = plane(0.1, 7);
        let mut est = GradientDescentEstimator::new(config(), least_squares_loss_gradient).unwrap();
        est.train(&ds).unwrap();

        let estimated = est.estimate(&[1.75, -3.25, 4.25]).unwrap();
        assert_eq!(estimated.len(), 3);
        for (got, want) in estimated.iter().zip([2.0, -3.0, 4.0]) {
            assert_abs_diff_eq!(*got, want, epsilon = 0.05);
        }
    }

    #[test]
    fn test_custom_loss_gradient() {
        // fit a constant: minimise sum (c - y)^2 over y in {1, 2, 3}
        let ds = dataset(&["0", "0"], vec![0], vec![1], &[&["0", "1"], &["0", "2"], &["0", "3"]]);
        let loss = |p: &[f64], _x: &[f64], y: f64| Ok::<_, LinearError>(vec![2.0 * (p[0] - y)]);
        let mut est = GradientDescentEstimator::new(config().with_learning_rate(0.05), loss).unwrap();
        est.train(&ds).unwrap();
        let c = est.estimate(&[0.0]).unwrap();
        assert_abs_diff_eq!(c[0], 2.0, epsilon = 1e-4);
    }
}
