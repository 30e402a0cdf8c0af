//! Pre-trained classifier.
//!
//! - [`logistic`]: Logistic-regression scorer
//! - [`loader`]: Artifact loading and validation

pub mod loader;
pub mod logistic;

use serde::Serialize;
use thiserror::Error;

use crate::applicant::FeatureVector;

pub use loader::{load_model, ModelLoaderError};
pub use logistic::LogisticModel;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Model produced a non-finite score ({0}); check the input values")]
    NonFiniteScore(f64),

    #[error("Model expects {expected} coefficients, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Model parameter '{0}' is not finite")]
    NonFiniteParameter(&'static str),
}

/// Binary loan decision. Serialized as the integer label the model was
/// trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoanDecision {
    Rejected,
    Approved,
}

impl LoanDecision {
    pub fn label(self) -> u8 {
        match self {
            LoanDecision::Rejected => 0,
            LoanDecision::Approved => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LoanDecision::Rejected => "rejected",
            LoanDecision::Approved => "approved",
        }
    }
}

/// Summary of a loaded model, reported by the health endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub kind: String,
    pub n_features: usize,
    pub feature_names: Vec<String>,
}

/// A loaded, immutable classifier shared by all request handlers.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<LoanDecision, ModelError>;

    fn describe(&self) -> ModelInfo;
}
