//! Serialized model artifact, owned by the training pipeline.

use crediflow_common::{CrediflowError, Result, FEATURE_COUNT, FEATURE_NAMES};
use serde::{Deserialize, Serialize};

/// Default decision threshold when the artifact does not carry one.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

/// Per-feature standardization parameters fitted during training.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

/// The on-disk model artifact: training schema plus logistic-regression
/// parameters. `feature_names` is the training column order and must match
/// [`FEATURE_NAMES`] exactly; the loader rejects anything else rather than
/// letting a reordered schema silently corrupt predictions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub scaler: Option<Scaler>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

impl ModelArtifact {
    /// Parse an artifact from its JSON representation and validate it
    /// against the canonical schema.
    pub fn from_json(json: &str) -> Result<Self> {
        let artifact: ModelArtifact = serde_json::from_str(json)?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.feature_names.len() != FEATURE_COUNT
            || self
                .feature_names
                .iter()
                .zip(FEATURE_NAMES.iter())
                .any(|(got, want)| got != want)
        {
            return Err(CrediflowError::Model(format!(
                "schema mismatch: artifact was trained on {:?}, expected {:?}",
                self.feature_names, FEATURE_NAMES
            )));
        }

        if self.coefficients.len() != FEATURE_COUNT {
            return Err(CrediflowError::Model(format!(
                "expected {} coefficients, artifact has {}",
                FEATURE_COUNT,
                self.coefficients.len()
            )));
        }

        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != FEATURE_COUNT || scaler.std.len() != FEATURE_COUNT {
                return Err(CrediflowError::Model(format!(
                    "scaler arity mismatch: {} means, {} stds",
                    scaler.mean.len(),
                    scaler.std.len()
                )));
            }
            if scaler.std.iter().any(|s| *s == 0.0) {
                return Err(CrediflowError::Model(
                    "scaler contains a zero standard deviation".to_string(),
                ));
            }
        }

        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(CrediflowError::Model(format!(
                "decision threshold {} outside [0, 1]",
                self.threshold
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact_json(names: &[&str]) -> String {
        serde_json::json!({
            "feature_names": names,
            "coefficients": vec![0.0; FEATURE_COUNT],
            "intercept": 0.0,
        })
        .to_string()
    }

    #[test]
    fn test_valid_artifact_parses() {
        let json = serde_json::json!({
            "feature_names": FEATURE_NAMES,
            "coefficients": vec![0.1; FEATURE_COUNT],
            "intercept": -1.0,
        })
        .to_string();
        let artifact = ModelArtifact::from_json(&json).unwrap();
        assert_eq!(artifact.threshold, DEFAULT_THRESHOLD);
        assert!(artifact.scaler.is_none());
    }

    #[test]
    fn test_schema_mismatch_is_rejected() {
        // Same names, Age and Experience swapped
        let mut names: Vec<&str> = FEATURE_NAMES.to_vec();
        names.swap(1, 2);
        let err = ModelArtifact::from_json(&artifact_json(&names)).unwrap_err();
        assert!(err.to_string().contains("schema mismatch"), "{err}");
    }

    #[test]
    fn test_wrong_coefficient_arity_is_rejected() {
        let json = serde_json::json!({
            "feature_names": FEATURE_NAMES,
            "coefficients": vec![0.1; FEATURE_COUNT - 1],
            "intercept": 0.0,
        })
        .to_string();
        let err = ModelArtifact::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("coefficients"), "{err}");
    }

    #[test]
    fn test_zero_std_scaler_is_rejected() {
        let json = serde_json::json!({
            "feature_names": FEATURE_NAMES,
            "coefficients": vec![0.1; FEATURE_COUNT],
            "intercept": 0.0,
            "scaler": { "mean": vec![0.0; FEATURE_COUNT], "std": vec![0.0; FEATURE_COUNT] },
        })
        .to_string();
        let err = ModelArtifact::from_json(&json).unwrap_err();
        assert!(err.to_string().contains("standard deviation"), "{err}");
    }

    #[test]
    fn test_out_of_range_threshold_is_rejected() {
        let json = serde_json::json!({
            "feature_names": FEATURE_NAMES,
            "coefficients": vec![0.1; FEATURE_COUNT],
            "intercept": 0.0,
            "threshold": 1.5,
        })
        .to_string();
        assert!(ModelArtifact::from_json(&json).is_err());
    }
}
