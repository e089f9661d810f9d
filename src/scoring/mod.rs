//! Applicant records and the one-shot scoring handler.
//!
//! The handler is stateless: each submission validates the raw request,
//! derives the debt-to-income ratio, and runs the record through the injected
//! encoder and classifier capabilities. Nothing is retried or cached.

mod handler;
mod record;

pub use handler::{
    Classification, Classifier, ClassifyError, EncodeError, FeatureEncoder, ScoringError,
    ScoringHandler, ScoringResult,
};
pub use record::{ApplicantRecord, CreditHistory, DTI_EPSILON, ScoringRequest};
