use tabula_core::{Dataset, Regressor};

use crate::error::{MetricsError, MetricsResult};

/// Mean of squared differences between predictions and the single float target.
pub fn mean_squared_error<R: Regressor>(
    regressor: &R,
    test_set: &dyn Dataset,
) -> MetricsResult<f64, R::Error> {
    if test_set.num_targets() != 1 || !test_set.all_targets_floats() {
        return Err(MetricsError::InvalidRegressionTarget {
            num_targets: test_set.num_targets(),
        });
    }
    let n = test_set.num_rows();
    if n == 0 {
        return Err(MetricsError::EmptyTestSet);
    }

    let mut sum = 0.0;
    for i in 0..n {
        let row = test_set.row(i)?;
        let predicted = regressor
            .predict(&row)
            .map_err(|source| MetricsError::Model { row: i, source })?;
        let actual = row
            .target()
            .get(0)
            .and_then(|v| v.as_float())
            .ok_or(MetricsError::InvalidRegressionTarget { num_targets: 1 })?;
        sum += (predicted - actual).powi(2);
    }
    Ok(sum / n as f64)
}

pub fn root_mean_squared_error<R: Regressor>(
    regressor: &R,
    test_set: &dyn Dataset,
) -> MetricsResult<f64, R::Error> {
    mean_squared_error(regressor, test_set).map(f64::sqrt)
}
