//! The prediction service wrapping a loaded model artifact.

use std::path::Path;

use anyhow::Context;
use crediflow_common::{LoanApplication, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::artifact::ModelArtifact;

/// Binary class label returned by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Label {
    /// Class 0 — unlikely to accept the loan offer.
    Decline,
    /// Class 1 — likely to accept the loan offer.
    Accept,
}

impl Label {
    pub fn as_u8(self) -> u8 {
        match self {
            Label::Decline => 0,
            Label::Accept => 1,
        }
    }
}

/// One prediction: the thresholded label plus the raw positive-class
/// probability it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: Label,
    pub probability: f64,
}

/// Pre-trained binary classifier, loaded once per process lifetime and
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct LoanClassifier {
    artifact: ModelArtifact,
}

impl LoanClassifier {
    /// Load and validate the artifact from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read model artifact {}", path.display()))?;
        let artifact = ModelArtifact::from_json(&json)?;
        info!(
            "Loan classifier ready: {} features, threshold {}",
            artifact.feature_names.len(),
            artifact.threshold
        );
        Ok(Self { artifact })
    }

    /// Build a classifier from an in-memory artifact, applying the same
    /// validation as [`load`](Self::load) so a malformed artifact can never
    /// reach `predict`.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        artifact.validate()?;
        Ok(Self { artifact })
    }

    /// Classify one applicant record. Pure and synchronous: standardize,
    /// dot with the coefficients, sigmoid, threshold.
    pub fn predict(&self, record: &LoanApplication) -> Prediction {
        let features = record.to_feature_vector();

        let mut logit = self.artifact.intercept;
        for (i, value) in features.iter().enumerate() {
            let x = match &self.artifact.scaler {
                Some(scaler) => (value - scaler.mean[i]) / scaler.std[i],
                None => *value,
            };
            logit += self.artifact.coefficients[i] * x;
        }

        let probability = sigmoid(logit);
        let label = if probability >= self.artifact.threshold {
            Label::Accept
        } else {
            Label::Decline
        };

        Prediction { label, probability }
    }

    pub fn threshold(&self) -> f64 {
        self.artifact.threshold
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::Scaler;
    use crediflow_common::{Education, Family, FEATURE_COUNT, FEATURE_NAMES};

    fn sample_record() -> LoanApplication {
        LoanApplication {
            id: 1,
            age: 45,
            experience: 20,
            income: 150,
            zip_code: 94305,
            family: Family::Three,
            cc_avg: 4.2,
            education: Education::Advanced,
            mortgage: 200,
            securities_account: true,
            cd_account: true,
            online: true,
            credit_card: false,
        }
    }

    fn artifact(coefficients: Vec<f64>, intercept: f64, scaler: Option<Scaler>) -> ModelArtifact {
        ModelArtifact {
            feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
            scaler,
            coefficients,
            intercept,
            threshold: 0.5,
        }
    }

    #[test]
    fn test_zero_model_predicts_at_threshold() {
        // All-zero coefficients: sigmoid(0) = 0.5, which meets the default
        // threshold, so the label is Accept.
        let clf = LoanClassifier::from_artifact(artifact(vec![0.0; FEATURE_COUNT], 0.0, None)).unwrap();
        let p = clf.predict(&sample_record());
        assert_eq!(p.probability, 0.5);
        assert_eq!(p.label, Label::Accept);
    }

    #[test]
    fn test_negative_intercept_declines() {
        let clf = LoanClassifier::from_artifact(artifact(vec![0.0; FEATURE_COUNT], -3.0, None)).unwrap();
        let p = clf.predict(&sample_record());
        assert!(p.probability < 0.05);
        assert_eq!(p.label, Label::Decline);
    }

    #[test]
    fn test_income_coefficient_drives_accept() {
        // Only the Income feature (index 3) carries weight.
        let mut coefficients = vec![0.0; FEATURE_COUNT];
        coefficients[3] = 0.05;
        let clf = LoanClassifier::from_artifact(artifact(coefficients, -5.0, None)).unwrap();

        let mut rich = sample_record();
        rich.income = 200; // logit = -5 + 10 = 5
        let mut poor = sample_record();
        poor.income = 20; // logit = -5 + 1 = -4

        assert_eq!(clf.predict(&rich).label, Label::Accept);
        assert_eq!(clf.predict(&poor).label, Label::Decline);
    }

    #[test]
    fn test_scaler_standardizes_before_dot() {
        // With mean equal to the record's own features and unit std, every
        // standardized value is 0 and the prediction is sigmoid(intercept).
        let record = sample_record();
        let scaler = Scaler {
            mean: record.to_feature_vector().to_vec(),
            std: vec![1.0; FEATURE_COUNT],
        };
        let clf = LoanClassifier::from_artifact(artifact(vec![2.0; FEATURE_COUNT], 1.0, Some(scaler))).unwrap();
        let p = clf.predict(&record);
        assert!((p.probability - sigmoid(1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_from_artifact_rejects_wrong_coefficient_arity() {
        let bad = artifact(vec![0.0; FEATURE_COUNT - 1], 0.0, None);
        assert!(LoanClassifier::from_artifact(bad).is_err());
    }

    #[test]
    fn test_from_artifact_rejects_short_scaler() {
        let scaler = Scaler {
            mean: vec![0.0; FEATURE_COUNT - 1],
            std: vec![1.0; FEATURE_COUNT - 1],
        };
        let bad = artifact(vec![0.0; FEATURE_COUNT], 0.0, Some(scaler));
        assert!(LoanClassifier::from_artifact(bad).is_err());
    }

    #[test]
    fn test_load_missing_artifact_fails() {
        let err = LoanClassifier::load("/nonexistent/model.json").unwrap_err();
        assert!(err.to_string().contains("model artifact"), "{err}");
    }

    #[test]
    fn test_sigmoid_bounds() {
        assert!(sigmoid(-50.0) < 1e-20);
        assert!(sigmoid(50.0) > 1.0 - 1e-20);
        assert_eq!(sigmoid(0.0), 0.5);
    }
}
