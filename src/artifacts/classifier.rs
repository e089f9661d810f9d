//! Fitted binary logistic-regression classifier.

use serde::{Deserialize, Serialize};

use crate::scoring::{Classification, Classifier, ClassifyError};

/// Model version this build understands.
pub const CREDIT_MODEL_VERSION: i64 = 1;

fn default_threshold() -> f32 {
    0.5
}

/// Versioned logistic-regression model over preprocessed applicant features.
///
/// The decision threshold is the model's own fitted property; callers must
/// not re-derive the label from the probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditModel {
    /// Artifact model version.
    pub model_version: i64,
    /// Number of `f32` values per feature vector.
    pub feature_len: usize,
    /// One weight per feature.
    pub weights: Vec<f32>,
    /// Intercept term.
    pub bias: f32,
    /// Positive-class decision threshold chosen during fitting.
    #[serde(default = "default_threshold")]
    pub threshold: f32,
}

impl CreditModel {
    /// Validate the model dimensions and parameters.
    pub fn validate(&self) -> Result<(), String> {
        if self.model_version != CREDIT_MODEL_VERSION {
            return Err(format!(
                "Unsupported model_version {} (expected {CREDIT_MODEL_VERSION})",
                self.model_version
            ));
        }
        if self.feature_len == 0 {
            return Err("feature_len must be > 0".to_string());
        }
        if self.weights.len() != self.feature_len {
            return Err(format!(
                "weights length {} does not match feature_len {}",
                self.weights.len(),
                self.feature_len
            ));
        }
        if self.weights.iter().any(|weight| !weight.is_finite()) {
            return Err("Non-finite weight".to_string());
        }
        if !self.bias.is_finite() {
            return Err("Non-finite bias".to_string());
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 || self.threshold >= 1.0 {
            return Err("threshold must lie strictly between 0 and 1".to_string());
        }
        Ok(())
    }

    /// Positive-class probability for one feature vector.
    fn positive_probability(&self, features: &[f32]) -> f32 {
        let mut logit = self.bias;
        for (weight, value) in self.weights.iter().zip(features) {
            logit += weight * value;
        }
        sigmoid(logit)
    }
}

impl Classifier for CreditModel {
    fn classify(&self, features: &[f32]) -> Result<Classification, ClassifyError> {
        if features.len() != self.feature_len {
            return Err(ClassifyError::FeatureLengthMismatch {
                expected: self.feature_len,
                actual: features.len(),
            });
        }
        let p1 = self.positive_probability(features);
        Ok(Classification {
            creditworthy: p1 >= self.threshold,
            probabilities: [1.0 - p1, p1],
        })
    }
}

/// Numerically-stable logistic function.
fn sigmoid(logit: f32) -> f32 {
    if logit >= 0.0 {
        1.0 / (1.0 + (-logit).exp())
    } else {
        let e = logit.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> CreditModel {
        CreditModel {
            model_version: CREDIT_MODEL_VERSION,
            feature_len: 3,
            weights: vec![1.0, -2.0, 0.5],
            bias: 0.25,
            threshold: 0.5,
        }
    }

    #[test]
    fn probabilities_are_complementary_and_bounded() {
        let outcome = model().classify(&[0.3, -1.2, 4.0]).unwrap();
        let [p0, p1] = outcome.probabilities;
        assert!((0.0..=1.0).contains(&p0));
        assert!((0.0..=1.0).contains(&p1));
        assert!((p0 + p1 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn label_follows_the_model_threshold() {
        let mut strict = model();
        strict.threshold = 0.9;
        // logit = 0.25 gives p1 ~ 0.56: positive at 0.5, negative at 0.9.
        let features = [0.0, 0.0, 0.0];
        assert!(model().classify(&features).unwrap().creditworthy);
        assert!(!strict.classify(&features).unwrap().creditworthy);
    }

    #[test]
    fn wrong_feature_length_is_rejected() {
        let err = model().classify(&[1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            ClassifyError::FeatureLengthMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn sigmoid_is_stable_at_extreme_logits() {
        assert!(sigmoid(80.0) > 0.999_999);
        assert!(sigmoid(-80.0) < 1e-6);
        assert!(sigmoid(80.0) <= 1.0);
        assert!(sigmoid(-80.0) >= 0.0);
    }

    #[test]
    fn validate_catches_dimension_and_threshold_mistakes() {
        assert!(model().validate().is_ok());

        let mut bad = model();
        bad.weights.pop();
        assert!(bad.validate().is_err());

        let mut bad = model();
        bad.threshold = 1.0;
        assert!(bad.validate().is_err());

        let mut bad = model();
        bad.bias = f32::NAN;
        assert!(bad.validate().is_err());
    }
}
