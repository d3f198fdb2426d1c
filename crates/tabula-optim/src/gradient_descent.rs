use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{OptimError, OptimResult};
use crate::vector::{add, scale, squared_distance};

/// Tunables for [`GradientDescent`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientDescentConfig {
    pub learning_rate: f64,
    /// Stop once the squared length of a step drops below this.
    pub precision: f64,
    pub max_iterations: usize,
}

impl Default for GradientDescentConfig {
    fn default() -> Self {
        GradientDescentConfig {
            learning_rate: 0.004,
            precision: 1e-8,
            max_iterations: 100_000_000,
        }
    }
}

impl GradientDescentConfig {
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn validate(&self) -> OptimResult<()> {
        if self.learning_rate > 0.0 && self.precision > 0.0 && self.max_iterations > 0 {
            Ok(())
        } else {
            Err(OptimError::InvalidConfig {
                learning_rate: self.learning_rate,
                precision: self.precision,
                max_iterations: self.max_iterations,
            })
        }
    }
}

/// Plain (full-batch) gradient descent.
///
/// x ← x - lr * ∇f(x)
#[derive(Debug, Clone)]
pub struct GradientDescent {
    config: GradientDescentConfig,
}

impl GradientDescent {
    pub fn new(config: GradientDescentConfig) -> OptimResult<Self> {
        config.validate()?;
        Ok(GradientDescent { config })
    }

    pub fn config(&self) -> &GradientDescentConfig {
        &self.config
    }

    /// Walk downhill from `initial` until a step is shorter than the
    /// precision or the iteration budget runs out; the last iterate is
    /// returned in both cases.
    ///
    /// Errors from `gradient` are passed through untouched.
    pub fn minimize<F, E>(&self, initial: &[f64], mut gradient: F) -> Result<Vec<f64>, E>
    where
        F: FnMut(&[f64]) -> Result<Vec<f64>, E>,
        E: From<OptimError>,
    {
        if initial.is_empty() {
            return Err(OptimError::EmptyInitialGuess.into());
        }

        let mut current = initial.to_vec();
        for iteration in 0..self.config.max_iterations {
            let grad = gradient(&current)?;
            if grad.len() != current.len() {
                return Err(OptimError::GradientLengthMismatch {
                    expected: current.len(),
                    got: grad.len(),
                }
                .into());
            }

            let next = add(&current, &scale(-self.config.learning_rate, &grad));
            if next.iter().any(|v| !v.is_finite()) {
                warn!(iteration, "gradient descent diverged");
                return Err(OptimError::Diverged { iteration }.into());
            }

            if squared_distance(&next, &current) < self.config.precision {
                debug!(iterations = iteration + 1, "gradient descent converged");
                return Ok(next);
            }
            current = next;
        }

        debug!(
            iterations = self.config.max_iterations,
            "gradient descent stopped at iteration limit"
        );
        Ok(current)
    }
}
