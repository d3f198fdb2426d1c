pub mod collection;
pub mod distance;
pub mod error;
pub mod knn;

pub use collection::{Neighbour, NeighbourCollection};
pub use distance::euclidean;
pub use error::{KnnError, KnnResult};
pub use knn::KnnClassifier;
