//! Applicant input types and the derived debt-to-income feature.

use serde::{Deserialize, Serialize};

/// Epsilon added to income before dividing, so a zero income cannot divide by
/// zero. The configured bounds keep income well above zero; this matches the
/// fitted pipeline, which derived the ratio the same way.
pub const DTI_EPSILON: f64 = 1e-6;

/// Credit-history category, the closed set the pipeline was fitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditHistory {
    /// Repeated defaults or delinquencies.
    Poor,
    /// Some missed payments.
    Fair,
    /// Mostly on-time payments.
    Good,
    /// Spotless repayment record.
    Excellent,
}

impl CreditHistory {
    /// All categories, in display order (worst to best).
    pub const ALL: [CreditHistory; 4] = [
        CreditHistory::Poor,
        CreditHistory::Fair,
        CreditHistory::Good,
        CreditHistory::Excellent,
    ];

    /// Canonical lowercase label used in requests and artifacts.
    pub fn as_str(&self) -> &'static str {
        match self {
            CreditHistory::Poor => "poor",
            CreditHistory::Fair => "fair",
            CreditHistory::Good => "good",
            CreditHistory::Excellent => "excellent",
        }
    }

    /// Parse a category label, returning the rejected value on failure.
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "poor" => Ok(CreditHistory::Poor),
            "fair" => Ok(CreditHistory::Fair),
            "good" => Ok(CreditHistory::Good),
            "excellent" => Ok(CreditHistory::Excellent),
            other => Err(other.to_string()),
        }
    }
}

impl std::fmt::Display for CreditHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw scoring request as submitted by a caller.
///
/// The category arrives as a free string and is validated by the handler;
/// the ratio is never part of the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRequest {
    /// Annual income in INR.
    pub income: f64,
    /// Total debt in INR.
    pub debt: f64,
    /// Credit-history category label.
    pub credit_history: String,
}

/// Validated applicant record consumed by the encoder.
///
/// `debt_to_income` is intentionally not a field: it is recomputed from the
/// current income/debt pair on every access so the two can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApplicantRecord {
    /// Annual income in INR.
    pub income: f64,
    /// Total debt in INR.
    pub debt: f64,
    /// Validated credit-history category.
    pub credit_history: CreditHistory,
}

impl ApplicantRecord {
    /// Derived debt-to-income ratio.
    pub fn debt_to_income(&self) -> f64 {
        self.debt / (self.income + DTI_EPSILON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_known_categories() {
        for category in CreditHistory::ALL {
            assert_eq!(CreditHistory::parse(category.as_str()), Ok(category));
        }
    }

    #[test]
    fn rejects_unknown_and_miscased_categories() {
        assert_eq!(
            CreditHistory::parse("terrible"),
            Err("terrible".to_string())
        );
        assert_eq!(CreditHistory::parse("Good"), Err("Good".to_string()));
        assert_eq!(CreditHistory::parse(""), Err(String::new()));
    }

    #[test]
    fn serde_uses_lowercase_labels() {
        let json = serde_json::to_string(&CreditHistory::Excellent).unwrap();
        assert_eq!(json, "\"excellent\"");
        let back: CreditHistory = serde_json::from_str("\"poor\"").unwrap();
        assert_eq!(back, CreditHistory::Poor);
    }

    #[test]
    fn ratio_matches_definition_exactly() {
        let record = ApplicantRecord {
            income: 500_000.0,
            debt: 200_000.0,
            credit_history: CreditHistory::Good,
        };
        assert_eq!(record.debt_to_income(), 200_000.0 / (500_000.0 + 1e-6));
        assert!((record.debt_to_income() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn ratio_is_non_negative_for_non_negative_debt() {
        let record = ApplicantRecord {
            income: 200_000.0,
            debt: 0.0,
            credit_history: CreditHistory::Fair,
        };
        assert!(record.debt_to_income() >= 0.0);
    }

    #[test]
    fn ratio_tracks_field_updates() {
        let mut record = ApplicantRecord {
            income: 1_000_000.0,
            debt: 500_000.0,
            credit_history: CreditHistory::Good,
        };
        let before = record.debt_to_income();
        record.debt = 250_000.0;
        assert!(record.debt_to_income() < before);
    }
}
