//! In-process machine learning for the irrigation classifier
//!
//! CART decision trees with Gini impurity, bagged into a random forest with
//! majority voting. Small and binary-only: labels are plain `bool`.

mod forest;
mod matrix;
mod metrics;
mod split;
mod tree;

pub use forest::RandomForest;
pub use matrix::Matrix;
pub use metrics::{ConfusionCounts, EvaluationReport};
pub use split::train_test_split;
pub use tree::DecisionTree;

use thiserror::Error;

/// Errors from the model pipeline
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MlError {
    #[error("matrix dimensions do not match data length")]
    DimensionMismatch,

    #[error("sample and label counts differ: {samples} samples, {labels} labels")]
    LabelMismatch { samples: usize, labels: usize },

    #[error("cannot fit with zero samples")]
    EmptyTrainingSet,

    #[error("test_size must be strictly between 0 and 1, got {0}")]
    InvalidTestSize(f32),

    #[error("split would leave an empty train or test set")]
    DegenerateSplit,

    #[error("model has not been fitted")]
    NotFitted,

    #[error("feature count mismatch: expected {expected}, got {actual}")]
    FeatureMismatch { expected: usize, actual: usize },
}
