//! The scoring handler and the capability seams it depends on.

use thiserror::Error;

use crate::config::InputBounds;

use super::record::{ApplicantRecord, CreditHistory, ScoringRequest};

/// Errors an encoder may report for a record it cannot encode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// The record's category is missing from the fitted vocabulary.
    #[error("Category {category:?} is not in the fitted vocabulary")]
    UnknownCategory {
        /// Rejected category label.
        category: String,
    },
    /// The record's numeric fields do not match the fitted columns.
    #[error("Record does not match the fitted columns: {reason}")]
    ColumnMismatch {
        /// Human-readable mismatch description.
        reason: String,
    },
}

/// Errors a classifier may report for a feature vector it cannot score.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// The feature vector length does not match the fitted model.
    #[error("Feature vector has {actual} values but the model expects {expected}")]
    FeatureLengthMismatch {
        /// Length the model was fitted on.
        expected: usize,
        /// Length actually received.
        actual: usize,
    },
}

/// Per-request scoring failures, reported to the caller and never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// A numeric input lies outside its configured range.
    #[error("{field} {value} is outside the allowed range {min}-{max} INR")]
    OutOfRange {
        /// Which input violated its range.
        field: &'static str,
        /// Submitted value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },
    /// The credit-history label is not one of the known categories.
    #[error("Unknown credit history {value:?}; expected poor, fair, good, or excellent")]
    InvalidCategory {
        /// Rejected label.
        value: String,
    },
    /// The encoder rejected the record.
    #[error("Failed to encode applicant record: {0}")]
    Encoding(#[from] EncodeError),
    /// The classifier rejected the feature vector.
    #[error("Failed to classify applicant record: {0}")]
    Classify(#[from] ClassifyError),
}

/// Outcome of a single classifier call.
///
/// Label and probabilities always come from the same prediction, so a caller
/// can never pair a label with probabilities from a different call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// The classifier's own binary decision (true = positive class).
    pub creditworthy: bool,
    /// Probabilities for [negative, positive], each in [0, 1].
    pub probabilities: [f32; 2],
}

impl Classification {
    /// Probability of the positive (creditworthy) class.
    pub fn positive_probability(&self) -> f32 {
        self.probabilities[1]
    }
}

/// Fitted feature transform: applicant record in, numeric vector out.
pub trait FeatureEncoder {
    /// Encode a validated record into the model's feature space.
    fn encode(&self, record: &ApplicantRecord) -> Result<Vec<f32>, EncodeError>;
}

/// Fitted binary classifier over encoded feature vectors.
pub trait Classifier {
    /// Produce the label and class probabilities for one feature vector.
    fn classify(&self, features: &[f32]) -> Result<Classification, ClassifyError>;
}

/// Result of scoring one applicant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringResult {
    /// The classifier's binary decision.
    pub creditworthy: bool,
    /// Estimated probability of the positive class, in [0, 1].
    pub probability: f32,
}

/// Stateless request-to-result scoring pipeline.
///
/// Owns nothing mutable: the encoder and classifier are fitted, read-only
/// artifacts injected at construction, so one handler can serve any number
/// of submissions.
pub struct ScoringHandler<E, C> {
    encoder: E,
    classifier: C,
    bounds: InputBounds,
}

impl<E: FeatureEncoder, C: Classifier> ScoringHandler<E, C> {
    /// Build a handler around injected encoder/classifier capabilities.
    pub fn new(encoder: E, classifier: C, bounds: InputBounds) -> Self {
        Self {
            encoder,
            classifier,
            bounds,
        }
    }

    /// Bounds this handler enforces on numeric inputs.
    pub fn bounds(&self) -> InputBounds {
        self.bounds
    }

    /// Validate a raw request into an applicant record.
    ///
    /// The UI clamps its widgets to the same bounds, but requests can also be
    /// built programmatically, so the handler checks again rather than trust
    /// the caller.
    pub fn validate(&self, request: &ScoringRequest) -> Result<ApplicantRecord, ScoringError> {
        if !self.bounds.income.contains(request.income) {
            return Err(ScoringError::OutOfRange {
                field: "Annual income",
                value: request.income,
                min: self.bounds.income.min,
                max: self.bounds.income.max,
            });
        }
        if !self.bounds.debt.contains(request.debt) {
            return Err(ScoringError::OutOfRange {
                field: "Total debt",
                value: request.debt,
                min: self.bounds.debt.min,
                max: self.bounds.debt.max,
            });
        }
        let credit_history = CreditHistory::parse(&request.credit_history)
            .map_err(|value| ScoringError::InvalidCategory { value })?;
        Ok(ApplicantRecord {
            income: request.income,
            debt: request.debt,
            credit_history,
        })
    }

    /// Score one request: validate, encode, classify.
    ///
    /// Validation failures return before the encoder or classifier is
    /// touched. The returned label and probability are both taken from the
    /// single classifier call.
    pub fn score(&self, request: &ScoringRequest) -> Result<ScoringResult, ScoringError> {
        let record = self.validate(request)?;
        self.score_record(&record)
    }

    /// Score an already-validated record.
    pub fn score_record(&self, record: &ApplicantRecord) -> Result<ScoringResult, ScoringError> {
        let features = self.encoder.encode(record)?;
        let classification = self.classifier.classify(&features)?;
        Ok(ScoringResult {
            creditworthy: classification.creditworthy,
            probability: classification.positive_probability(),
        })
    }
}
