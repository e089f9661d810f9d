//! Controller mediating between the form widgets and the scoring handler.

use crate::artifacts::{CreditModel, FittedPreprocessor, LoadedArtifacts};
use crate::config::InputBounds;
use crate::scoring::{DTI_EPSILON, ScoringHandler, ScoringRequest};

use super::state::FormState;

/// Owns the loaded artifacts (via the handler) and the current form state.
pub struct ScoringController {
    handler: ScoringHandler<FittedPreprocessor, CreditModel>,
    /// Mutable form model rendered by the UI.
    pub form: FormState,
}

impl ScoringController {
    /// Build a controller around artifacts loaded at startup.
    pub fn new(artifacts: LoadedArtifacts, bounds: InputBounds) -> Self {
        let defaults = FormState::default();
        let form = FormState {
            income: bounds.income.clamp(defaults.income),
            debt: bounds.debt.clamp(defaults.debt),
            ..defaults
        };
        Self {
            handler: ScoringHandler::new(artifacts.preprocessor, artifacts.model, bounds),
            form,
        }
    }

    /// Bounds the input widgets should clamp to.
    pub fn bounds(&self) -> InputBounds {
        self.handler.bounds()
    }

    /// Ratio shown in the input summary before submission.
    pub fn preview_ratio(&self) -> f64 {
        self.form.debt / (self.form.income + DTI_EPSILON)
    }

    /// Score the current form values and record the outcome or error.
    pub fn submit(&mut self) {
        let request = ScoringRequest {
            income: self.form.income,
            debt: self.form.debt,
            credit_history: self.form.credit_history.as_str().to_string(),
        };
        match self.handler.score(&request) {
            Ok(result) => {
                tracing::info!(
                    income = request.income,
                    debt = request.debt,
                    credit_history = %request.credit_history,
                    creditworthy = result.creditworthy,
                    probability = result.probability,
                    "Scored applicant"
                );
                self.form.outcome = Some(result);
                self.form.error = None;
            }
            Err(err) => {
                tracing::warn!(
                    income = request.income,
                    debt = request.debt,
                    credit_history = %request.credit_history,
                    "Scoring failed: {err}"
                );
                self.form.outcome = None;
                self.form.error = Some(err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::load_bundled;
    use crate::config::InputRange;

    fn controller() -> ScoringController {
        ScoringController::new(load_bundled().unwrap(), InputBounds::default())
    }

    #[test]
    fn defaults_start_within_bounds_and_unscored() {
        let controller = controller();
        let bounds = controller.bounds();
        assert!(bounds.income.contains(controller.form.income));
        assert!(bounds.debt.contains(controller.form.debt));
        assert!(controller.form.outcome.is_none());
        assert!(controller.form.error.is_none());
    }

    #[test]
    fn narrow_bounds_pull_defaults_into_range() {
        let bounds = InputBounds {
            income: InputRange {
                min: 1_000_000.0,
                max: 2_000_000.0,
            },
            debt: InputRange {
                min: 50_000.0,
                max: 100_000.0,
            },
        };
        let controller = ScoringController::new(load_bundled().unwrap(), bounds);
        assert_eq!(controller.form.income, 1_000_000.0);
        assert_eq!(controller.form.debt, 100_000.0);
    }

    #[test]
    fn submit_records_an_outcome_for_valid_inputs() {
        let mut controller = controller();
        controller.submit();
        let outcome = controller.form.outcome.expect("outcome recorded");
        assert!((0.0..=1.0).contains(&outcome.probability));
        assert!(controller.form.error.is_none());
    }

    #[test]
    fn resubmitting_identical_inputs_is_idempotent() {
        let mut controller = controller();
        controller.submit();
        let first = controller.form.outcome;
        controller.submit();
        assert_eq!(controller.form.outcome, first);
    }

    #[test]
    fn preview_ratio_matches_the_record_derivation() {
        let mut controller = controller();
        controller.form.income = 500_000.0;
        controller.form.debt = 200_000.0;
        assert!((controller.preview_ratio() - 0.4).abs() < 1e-9);
    }
}
