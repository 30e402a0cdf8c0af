//! Model artifact loading.
//!
//! The artifact is a small JSON document holding the fitted parameters of a
//! logistic regression together with the feature order it was trained on:
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "kind": "logistic_regression",
//!   "feature_names": ["Gender", "Married", ...],
//!   "coefficients": [0.05, 0.45, ...],
//!   "intercept": -2.3
//! }
//! ```
//!
//! Loading happens once at startup. Every error here is fatal to the server.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::applicant::FEATURE_NAMES;
use crate::model::{LogisticModel, ModelError};

/// Artifact format understood by this build.
pub const FORMAT_VERSION: u32 = 1;

const LOGISTIC_KIND: &str = "logistic_regression";

#[derive(Error, Debug)]
pub enum ModelLoaderError {
    #[error("Model file not found: {0}")]
    FileNotFound(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid model artifact: {0}")]
    InvalidFormat(#[from] serde_json::Error),

    #[error("Unsupported model format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("Unsupported model kind '{0}'")]
    UnsupportedKind(String),

    #[error("Feature order mismatch: {0}")]
    FeatureMismatch(String),

    #[error("Invalid model parameters: {0}")]
    InvalidParameters(#[from] ModelError),
}

/// On-disk layout of a model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,

    pub kind: String,

    /// Training column order. Optional, but checked when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,

    pub coefficients: Vec<f64>,

    pub intercept: f64,
}

impl ModelArtifact {
    /// Check the artifact against the encoder's feature contract and build
    /// the model.
    pub fn into_model(self) -> Result<LogisticModel, ModelLoaderError> {
        if self.format_version != FORMAT_VERSION {
            return Err(ModelLoaderError::UnsupportedVersion {
                found: self.format_version,
                expected: FORMAT_VERSION,
            });
        }
        if self.kind != LOGISTIC_KIND {
            return Err(ModelLoaderError::UnsupportedKind(self.kind));
        }
        if let Some(names) = &self.feature_names {
            check_feature_names(names)?;
        }
        Ok(LogisticModel::new(self.coefficients, self.intercept)?)
    }
}

fn check_feature_names(names: &[String]) -> Result<(), ModelLoaderError> {
    if names.len() != FEATURE_NAMES.len() {
        return Err(ModelLoaderError::FeatureMismatch(format!(
            "artifact lists {} features, encoder produces {}",
            names.len(),
            FEATURE_NAMES.len()
        )));
    }
    for (i, (got, want)) in names.iter().zip(FEATURE_NAMES).enumerate() {
        if got != want {
            return Err(ModelLoaderError::FeatureMismatch(format!(
                "position {i} is '{got}' in the artifact but '{want}' in the encoder"
            )));
        }
    }
    Ok(())
}

/// Load and validate the model artifact at `path`.
pub fn load_model(path: &Path) -> Result<LogisticModel, ModelLoaderError> {
    if !path.exists() {
        return Err(ModelLoaderError::FileNotFound(path.display().to_string()));
    }

    let data = std::fs::read_to_string(path)?;
    let artifact: ModelArtifact = serde_json::from_str(&data)?;
    let model = artifact.into_model()?;

    info!(
        path = %path.display(),
        n_features = model.coefficients().len(),
        intercept = model.intercept(),
        "Loaded model"
    );

    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applicant::FEATURE_COUNT;

    use std::io::Write;

    fn artifact() -> ModelArtifact {
        ModelArtifact {
            format_version: FORMAT_VERSION,
            kind: LOGISTIC_KIND.to_string(),
            feature_names: Some(FEATURE_NAMES.iter().map(|s| s.to_string()).collect()),
            coefficients: vec![0.1; FEATURE_COUNT],
            intercept: -1.0,
        }
    }

    fn write_json(value: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(value.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_artifact() {
        let file = write_json(&serde_json::to_string(&artifact()).unwrap());
        let model = load_model(file.path()).unwrap();
        assert_eq!(model.coefficients().len(), FEATURE_COUNT);
        assert_eq!(model.intercept(), -1.0);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_model(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ModelLoaderError::FileNotFound(_)));
    }

    #[test]
    fn test_corrupt_file() {
        let file = write_json("not a model {");
        let err = load_model(file.path()).unwrap_err();
        assert!(matches!(err, ModelLoaderError::InvalidFormat(_)));
    }

    #[test]
    fn test_feature_names_optional() {
        let mut a = artifact();
        a.feature_names = None;
        assert!(a.into_model().is_ok());
    }

    #[test]
    fn test_feature_order_is_checked() {
        let mut a = artifact();
        if let Some(names) = a.feature_names.as_mut() {
            names.swap(0, 1);
        }
        let err = a.into_model().unwrap_err();
        assert!(matches!(err, ModelLoaderError::FeatureMismatch(_)));
        assert!(err.to_string().contains("Married"));
    }

    #[test]
    fn test_wrong_coefficient_count() {
        let mut a = artifact();
        a.feature_names = None;
        a.coefficients.pop();
        let err = a.into_model().unwrap_err();
        assert!(matches!(
            err,
            ModelLoaderError::InvalidParameters(ModelError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_version_and_kind() {
        let mut a = artifact();
        a.format_version = 2;
        assert!(matches!(
            a.into_model(),
            Err(ModelLoaderError::UnsupportedVersion { found: 2, .. })
        ));

        let mut a = artifact();
        a.kind = "random_forest".to_string();
        assert!(matches!(
            a.into_model(),
            Err(ModelLoaderError::UnsupportedKind(_))
        ));
    }

    #[test]
    fn test_bundled_artifact_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("model/logistic_model.json");
        let model = load_model(&path).unwrap();
        assert_eq!(model.coefficients().len(), FEATURE_COUNT);
    }
}
