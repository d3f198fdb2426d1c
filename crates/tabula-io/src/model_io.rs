use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tabula_linear::LinearRegressor;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ModelIoError {
    #[error("Cannot save an untrained model")]
    UntrainedModel,

    #[error("Model has no coefficients")]
    EmptyModel,

    #[error("Unable to access model file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Invalid model JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ModelIoResult<T> = Result<T, ModelIoError>;

/// Serializable coefficients of a linear model, constant term last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    pub fn from_regressor(regressor: &LinearRegressor) -> ModelIoResult<Self> {
        let coefficients = regressor
            .coefficients()
            .ok_or(ModelIoError::UntrainedModel)?;
        Ok(LinearModel {
            coefficients: coefficients.to_vec(),
        })
    }

    pub fn into_regressor(self) -> ModelIoResult<LinearRegressor> {
        if self.coefficients.is_empty() {
            return Err(ModelIoError::EmptyModel);
        }
        Ok(LinearRegressor::from_coefficients(self.coefficients))
    }
}

/// Save a trained regressor's coefficients to a JSON file.
pub fn save_linear_model<P: AsRef<Path>>(regressor: &LinearRegressor, path: P) -> ModelIoResult<()> {
    let path = path.as_ref();
    let model = LinearModel::from_regressor(regressor)?;
    let json = serde_json::to_string_pretty(&model)?;
    fs::write(path, json).map_err(|source| ModelIoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), coefficients = model.coefficients.len(), "saved linear model");
    Ok(())
}

/// Load a regressor previously written by [`save_linear_model`].
pub fn load_linear_model<P: AsRef<Path>>(path: P) -> ModelIoResult<LinearRegressor> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| ModelIoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let model: LinearModel = serde_json::from_str(&json)?;
    model.into_regressor()
}
