//! Fitted artifacts and the scaler/model inference adapter

pub mod classifier;
pub mod scaler;
pub mod store;

pub use classifier::LinearClassifier;
pub use scaler::StandardScaler;
pub use store::{ArtifactStore, Prediction, Recommender};
