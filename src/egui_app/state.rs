//! Shared state types for the egui UI.

use crate::scoring::{CreditHistory, ScoringResult};

/// Form model consumed by the egui renderer.
///
/// Holds the current widget values plus the outcome of the most recent
/// submission. Nothing here is persisted; closing the app discards it.
#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    /// Annual income input (INR).
    pub income: f64,
    /// Total debt input (INR).
    pub debt: f64,
    /// Selected credit-history category.
    pub credit_history: CreditHistory,
    /// Result of the last successful submission.
    pub outcome: Option<ScoringResult>,
    /// User-facing message for the last failed submission.
    pub error: Option<String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            income: 500_000.0,
            debt: 200_000.0,
            credit_history: CreditHistory::Good,
            outcome: None,
            error: None,
        }
    }
}
