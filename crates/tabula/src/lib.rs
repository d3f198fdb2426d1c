//! # Tabula
//!
//! Typed tabular datasets with k-nearest-neighbour classification and
//! gradient-descent linear regression.
//!
//! ## Modules
//!
//! - **core**: Column types, string interning, rows and slices, in-memory datasets and subsets
//! - **neighbors**: Squared Euclidean distance, bounded neighbour collection, KNN classifier
//! - **optim**: Gradient descent with configurable learning rate and stopping rules
//! - **linear**: Parameter estimation and least-squares linear regression
//! - **io**: CSV ingestion and JSON model persistence
//! - **preprocessing**: Random train/test split
//! - **metrics**: Accuracy, MSE, RMSE
//! - **logging**: Global `tracing` subscriber setup

pub mod logging;

/// Datasets and column encoding.
pub use tabula_core as core;

/// Nearest neighbors.
pub use tabula_neighbors as neighbors;

/// Optimizers.
pub use tabula_optim as optim;

/// Linear models.
pub use tabula_linear as linear;

/// I/O utilities.
pub use tabula_io as io;

/// Data preprocessing.
pub use tabula_preprocessing as preprocessing;

/// Evaluation metrics.
pub use tabula_metrics as metrics;
