//! Fitted feature preprocessor: standard scaling plus one-hot encoding.

use serde::{Deserialize, Serialize};

use crate::scoring::{ApplicantRecord, EncodeError, FeatureEncoder};

/// Preprocessor schema version this build understands.
pub const PREPROCESSOR_SCHEMA_VERSION: i64 = 1;

/// Fitted scaler parameters for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericColumn {
    /// Record field this column reads (`income`, `debt`, `debt_to_income`).
    pub name: String,
    /// Mean observed during fitting.
    pub mean: f64,
    /// Standard deviation observed during fitting.
    pub scale: f64,
}

/// Versioned column transform fitted alongside the classifier.
///
/// Encoding layout: scaled numeric columns in declared order, then one
/// indicator slot per vocabulary entry in fitted order. The vocabulary is
/// whatever the fit saw; with the bundled artifacts that is the four known
/// categories in lexicographic order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedPreprocessor {
    /// Artifact schema version.
    pub schema_version: i64,
    /// Scaler parameters per numeric column, in output order.
    pub numeric_columns: Vec<NumericColumn>,
    /// One-hot vocabulary for `credit_history`, in fitted order.
    pub categories: Vec<String>,
}

impl FittedPreprocessor {
    /// Length of the feature vectors this transform produces.
    pub fn feature_len(&self) -> usize {
        self.numeric_columns.len() + self.categories.len()
    }

    /// Validate structural invariants of the fitted transform.
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != PREPROCESSOR_SCHEMA_VERSION {
            return Err(format!(
                "Unsupported preprocessor schema_version {} (expected {PREPROCESSOR_SCHEMA_VERSION})",
                self.schema_version
            ));
        }
        if self.numeric_columns.is_empty() {
            return Err("No numeric columns defined".to_string());
        }
        for column in &self.numeric_columns {
            if !column.mean.is_finite() {
                return Err(format!("Column {} has a non-finite mean", column.name));
            }
            if !column.scale.is_finite() || column.scale <= 0.0 {
                return Err(format!("Column {} must have scale > 0", column.name));
            }
        }
        let mut names: Vec<&str> = self
            .numeric_columns
            .iter()
            .map(|column| column.name.as_str())
            .collect();
        names.sort_unstable();
        names.dedup();
        if names.len() != self.numeric_columns.len() {
            return Err("Duplicate numeric column names".to_string());
        }
        if self.categories.is_empty() {
            return Err("Empty one-hot vocabulary".to_string());
        }
        let mut vocabulary: Vec<&str> = self.categories.iter().map(String::as_str).collect();
        vocabulary.sort_unstable();
        vocabulary.dedup();
        if vocabulary.len() != self.categories.len() {
            return Err("Duplicate entries in one-hot vocabulary".to_string());
        }
        Ok(())
    }

    fn numeric_value(record: &ApplicantRecord, name: &str) -> Result<f64, EncodeError> {
        match name {
            "income" => Ok(record.income),
            "debt" => Ok(record.debt),
            "debt_to_income" => Ok(record.debt_to_income()),
            other => Err(EncodeError::ColumnMismatch {
                reason: format!("No record field for fitted column {other:?}"),
            }),
        }
    }
}

impl FeatureEncoder for FittedPreprocessor {
    fn encode(&self, record: &ApplicantRecord) -> Result<Vec<f32>, EncodeError> {
        let mut features = Vec::with_capacity(self.feature_len());
        for column in &self.numeric_columns {
            let raw = Self::numeric_value(record, &column.name)?;
            features.push(((raw - column.mean) / column.scale) as f32);
        }
        let label = record.credit_history.as_str();
        if !self.categories.iter().any(|entry| entry == label) {
            return Err(EncodeError::UnknownCategory {
                category: label.to_string(),
            });
        }
        for entry in &self.categories {
            features.push(if entry == label { 1.0 } else { 0.0 });
        }
        Ok(features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::CreditHistory;

    fn fitted() -> FittedPreprocessor {
        FittedPreprocessor {
            schema_version: PREPROCESSOR_SCHEMA_VERSION,
            numeric_columns: vec![
                NumericColumn {
                    name: "income".to_string(),
                    mean: 1_000_000.0,
                    scale: 500_000.0,
                },
                NumericColumn {
                    name: "debt".to_string(),
                    mean: 600_000.0,
                    scale: 400_000.0,
                },
                NumericColumn {
                    name: "debt_to_income".to_string(),
                    mean: 1.0,
                    scale: 2.0,
                },
            ],
            categories: vec![
                "excellent".to_string(),
                "fair".to_string(),
                "good".to_string(),
                "poor".to_string(),
            ],
        }
    }

    fn record() -> ApplicantRecord {
        ApplicantRecord {
            income: 500_000.0,
            debt: 200_000.0,
            credit_history: CreditHistory::Good,
        }
    }

    #[test]
    fn encodes_scaled_numerics_then_one_hot() {
        let features = fitted().encode(&record()).unwrap();
        assert_eq!(features.len(), 7);
        assert!((features[0] - (-1.0)).abs() < 1e-6);
        assert!((features[1] - (-1.0)).abs() < 1e-6);
        assert!((features[2] - (-0.3)).abs() < 1e-6);
        assert_eq!(&features[3..], &[0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn vocabulary_gap_is_an_unknown_category_error() {
        let mut transform = fitted();
        transform.categories.retain(|entry| entry != "good");
        let err = transform.encode(&record()).unwrap_err();
        assert_eq!(
            err,
            EncodeError::UnknownCategory {
                category: "good".to_string()
            }
        );
    }

    #[test]
    fn unfamiliar_fitted_column_is_a_column_mismatch() {
        let mut transform = fitted();
        transform.numeric_columns[2].name = "savings".to_string();
        let err = transform.encode(&record()).unwrap_err();
        assert!(matches!(err, EncodeError::ColumnMismatch { .. }));
    }

    #[test]
    fn validate_rejects_bad_scales_and_versions() {
        let mut transform = fitted();
        transform.numeric_columns[0].scale = 0.0;
        assert!(transform.validate().is_err());

        let mut transform = fitted();
        transform.schema_version = 99;
        assert!(transform.validate().is_err());

        let mut transform = fitted();
        transform.categories.push("good".to_string());
        assert!(transform.validate().is_err());

        assert!(fitted().validate().is_ok());
    }
}
