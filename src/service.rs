//! Prediction service: the single object request handlers talk to.
//!
//! Owns the loaded classifier behind an `Arc`, so cloning the service for
//! each handler is cheap and the model is never mutated after startup.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::applicant::{encode, ApplicantRecord, FeatureVector, InvalidInputError};
use crate::model::{Classifier, LoanDecision, ModelError, ModelInfo};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Clone)]
pub struct PredictionService {
    model: Arc<dyn Classifier>,
}

impl PredictionService {
    pub fn new(model: Arc<dyn Classifier>) -> Self {
        Self { model }
    }

    /// Encode `record` and run it through the model.
    pub fn predict(&self, record: &ApplicantRecord) -> Result<LoanDecision, PredictError> {
        let features = encode(record)?;
        self.predict_features(&features)
    }

    pub fn predict_features(&self, features: &FeatureVector) -> Result<LoanDecision, PredictError> {
        debug!(features = ?features.as_slice(), "Running model");
        Ok(self.model.predict(features)?)
    }

    pub fn model_info(&self) -> ModelInfo {
        self.model.describe()
    }
}
