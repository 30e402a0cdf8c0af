//! Binary logistic regression.
//!
//! Scores are `intercept + Σ coefᵢ·xᵢ`; an applicant is approved when the
//! score is strictly positive, which is the same as a probability above 0.5.

use crate::applicant::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use crate::model::{Classifier, LoanDecision, ModelError, ModelInfo};

#[derive(Debug, Clone, PartialEq)]
pub struct LogisticModel {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LogisticModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, ModelError> {
        if coefficients.len() != FEATURE_COUNT {
            return Err(ModelError::DimensionMismatch {
                expected: FEATURE_COUNT,
                actual: coefficients.len(),
            });
        }
        if !coefficients.iter().all(|c| c.is_finite()) {
            return Err(ModelError::NonFiniteParameter("coefficients"));
        }
        if !intercept.is_finite() {
            return Err(ModelError::NonFiniteParameter("intercept"));
        }
        Ok(Self {
            coefficients,
            intercept,
        })
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Signed distance from the decision boundary.
    pub fn decision_function(&self, features: &FeatureVector) -> f64 {
        self.coefficients
            .iter()
            .zip(features.as_slice())
            .fold(self.intercept, |acc, (c, x)| acc + c * x)
    }

    /// Probability of approval.
    pub fn predict_proba(&self, features: &FeatureVector) -> f64 {
        sigmoid(self.decision_function(features))
    }
}

impl Classifier for LogisticModel {
    fn predict(&self, features: &FeatureVector) -> Result<LoanDecision, ModelError> {
        let score = self.decision_function(features);
        if !score.is_finite() {
            return Err(ModelError::NonFiniteScore(score));
        }
        Ok(if score > 0.0 {
            LoanDecision::Approved
        } else {
            LoanDecision::Rejected
        })
    }

    fn describe(&self) -> ModelInfo {
        ModelInfo {
            kind: "logistic_regression".to_string(),
            n_features: self.coefficients.len(),
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credit_only_model() -> LogisticModel {
        // Approve exactly when Credit_History is 1.
        let mut coefs = vec![0.0; FEATURE_COUNT];
        coefs[9] = 2.0;
        LogisticModel::new(coefs, -1.0).unwrap()
    }

    fn features_with_credit(credit: f64) -> FeatureVector {
        let mut values = [0.0; FEATURE_COUNT];
        values[9] = credit;
        FeatureVector::new(values)
    }

    #[test]
    fn test_sigmoid() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(10.0) > 0.99);
        assert!(sigmoid(-10.0) < 0.01);
    }

    #[test]
    fn test_predict_follows_decision_sign() {
        let model = credit_only_model();
        assert_eq!(
            model.predict(&features_with_credit(1.0)).unwrap(),
            LoanDecision::Approved
        );
        assert_eq!(
            model.predict(&features_with_credit(0.0)).unwrap(),
            LoanDecision::Rejected
        );
    }

    #[test]
    fn test_boundary_is_rejected() {
        let model = credit_only_model();
        // Score exactly 0.0.
        assert_eq!(
            model.predict(&features_with_credit(0.5)).unwrap(),
            LoanDecision::Rejected
        );
        assert!((model.predict_proba(&features_with_credit(0.5)) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_non_finite_input_is_an_error() {
        let model = credit_only_model();
        let err = model.predict(&features_with_credit(f64::NAN)).unwrap_err();
        assert!(matches!(err, ModelError::NonFiniteScore(_)));
    }

    #[test]
    fn test_new_validates_shape_and_values() {
        assert_eq!(
            LogisticModel::new(vec![1.0; 3], 0.0).unwrap_err(),
            ModelError::DimensionMismatch {
                expected: FEATURE_COUNT,
                actual: 3
            }
        );
        assert_eq!(
            LogisticModel::new(vec![f64::INFINITY; FEATURE_COUNT], 0.0).unwrap_err(),
            ModelError::NonFiniteParameter("coefficients")
        );
        assert_eq!(
            LogisticModel::new(vec![0.0; FEATURE_COUNT], f64::NAN).unwrap_err(),
            ModelError::NonFiniteParameter("intercept")
        );
    }

    #[test]
    fn test_describe() {
        let info = credit_only_model().describe();
        assert_eq!(info.n_features, 11);
        assert_eq!(info.feature_names[10], "Property_Area");
    }
}
