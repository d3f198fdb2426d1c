use tabula_core::{Dataset, Regressor, Row};
use tabula_optim::GradientDescentConfig;
use tracing::info;

use crate::error::{LinearError, LinearResult};
use crate::estimator::{least_squares_loss_gradient, validate_training_set, GradientDescentEstimator};

/// Least-squares linear regression fitted by gradient descent.
///
/// Fits `y = c_0 x_0 + .. + c_n x_n + b` for a dataset with float features
/// and exactly one float target. Coefficients are stored feature-first with
/// the constant term last.
#[derive(Debug, Clone, Default)]
pub struct LinearRegressor {
    config: GradientDescentConfig,
    coefficients: Option<Vec<f64>>,
}

impl LinearRegressor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GradientDescentConfig) -> Self {
        LinearRegressor {
            config,
            coefficients: None,
        }
    }

    /// A trained regressor built from previously estimated coefficients.
    pub fn from_coefficients(coefficients: Vec<f64>) -> Self {
        LinearRegressor {
            config: GradientDescentConfig::default(),
            coefficients: Some(coefficients),
        }
    }

    pub fn config(&self) -> &GradientDescentConfig {
        &self.config
    }

    pub fn coefficients(&self) -> Option<&[f64]> {
        self.coefficients.as_deref()
    }

    pub fn is_trained(&self) -> bool {
        self.coefficients.is_some()
    }

    pub fn train(&mut self, training_data: &dyn Dataset) -> LinearResult<()> {
        validate_training_set(training_data)?;

        let mut estimator = GradientDescentEstimator::new(self.config, least_squares_loss_gradient)?;
        estimator.train(training_data)?;
        let initial = vec![0.0; training_data.num_features() + 1];
        let coefficients = estimator.estimate(&initial)?;

        info!(
            rows = training_data.num_rows(),
            features = training_data.num_features(),
            "trained linear regressor"
        );
        self.coefficients = Some(coefficients);
        Ok(())
    }

    pub fn predict(&self, row: &Row) -> LinearResult<f64> {
        let coefficients = self
            .coefficients
            .as_deref()
            .filter(|c| !c.is_empty())
            .ok_or(LinearError::UntrainedRegressor)?;

        let expected = coefficients.len() - 1;
        if row.num_features() != expected {
            return Err(LinearError::RowLengthMismatch {
                expected,
                got: row.num_features(),
            });
        }
        let features = row
            .features()
            .floats()
            .ok_or(LinearError::NonFloatFeaturesTestRow)?;

        let (weights, constant) = coefficients.split_at(expected);
        Ok(constant[0] + weights.iter().zip(features.iter()).map(|(w, x)| w * x).sum::<f64>())
    }
}

impl Regressor for LinearRegressor {
    type Error = LinearError;

    fn predict(&self, row: &Row) -> LinearResult<f64> {
        LinearRegressor::predict(self, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use tabula_core::{infer_column_types, InMemoryDataset, Slice, Value};

    fn fast_config() -> GradientDescentConfig {
        GradientDescentConfig::default()
            .with_learning_rate(0.001)
            .with_precision(1e-12)
            .with_max_iterations(10_000)
    }

    fn row(features: Vec<f64>) -> Row {
        Row::new(Slice::Float(features), Slice::Float(vec![]))
    }

    fn plane() -> InMemoryDataset {
        // y = 2 x0 - 3 x1 + 4
        let types = infer_column_types(&["1.0", "1.0", "1.0"]).unwrap();
        let mut ds = InMemoryDataset::new(vec![0, 1], vec![2], types).unwrap();
        for i in 0..20 {
            for j in 0..20 {
                let x0 = -1.9 + 0.2 * i as f64;
                let x1 = -1.9 + 0.2 * j as f64;
                let y = 2.0 * x0 - 3.0 * x1 + 4.0;
                let values = [x0.to_string(), x1.to_string(), y.to_string()];
                let values: Vec<&str> = values.iter().map(String::as_str).collect();
                ds.add_row_from_strings(&values).unwrap();
            }
        }
        ds
    }

    #[test]
    fn test_fit_and_predict() {
        let ds = plane();
        let mut model = LinearRegressor::with_config(fast_config());
        model.train(&ds).unwrap();

        let c = model.coefficients().unwrap();
        assert_eq!(c.len(), 3);
        assert_abs_diff_eq!(c[0], 2.0, epsilon = 1e-3);
        assert_abs_diff_eq!(c[1], -3.0, epsilon = 1e-3);
        assert_abs_diff_eq!(c[2], 4.0, epsilon = 1e-3);

        let pred = model.predict(&row(vec![1.0, 1.0])).unwrap();
        assert_abs_diff_eq!(pred, 3.0, epsilon = 1e-2);
    }

    #[test]
    fn test_predict_from_coefficients() {
        let model = LinearRegressor::from_coefficients(vec![0.5, -1.0, 2.0]);
        assert_eq!(model.predict(&row(vec![4.0, 1.0])).unwrap(), 3.0);
    }

    #[test]
    fn test_predict_errors() {
        let untrained = LinearRegressor::new();
        assert_eq!(
            untrained.predict(&row(vec![1.0])).unwrap_err(),
            LinearError::UntrainedRegressor
        );

        let model = LinearRegressor::from_coefficients(vec![1.0, 1.0]);
        assert_eq!(
            model.predict(&row(vec![1.0, 2.0])).unwrap_err(),
            LinearError::RowLengthMismatch { expected: 1, got: 2 }
        );
        let stringy = Row::new(Slice::Mixed(vec![Value::from("x")]), Slice::Float(vec![]));
        assert_eq!(
            model.predict(&stringy).unwrap_err(),
            LinearError::NonFloatFeaturesTestRow
        );
    }

    #[test]
    fn test_failed_training_keeps_previous_state() {
        let types = infer_column_types(&["1.0", "x"]).unwrap();
        let mut ds = InMemoryDataset::new(vec![0], vec![1], types).unwrap();
        ds.add_row_from_strings(&["1.0", "label"]).unwrap();

        let mut model = LinearRegressor::new();
        assert_eq!(model.train(&ds).unwrap_err(), LinearError::NonFloatTargetsTrainingSet);
        assert!(!model.is_trained());

        let mut trained = LinearRegressor::from_coefficients(vec![1.0, 2.0]);
        assert!(trained.train(&ds).is_err());
        assert_eq!(trained.coefficients(), Some(&[1.0, 2.0][..]));
    }
}
