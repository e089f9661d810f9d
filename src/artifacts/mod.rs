//! Loading of the fitted preprocessor and classifier artifacts.
//!
//! Both artifacts are versioned JSON documents, resolved in order: explicit
//! config override, then a matching file in the `.credscope/models`
//! directory, then the copies bundled into the binary. Loading happens once
//! at startup; a failure here is fatal and the scoring form is never shown.

mod classifier;
mod preprocessor;

pub use classifier::{CREDIT_MODEL_VERSION, CreditModel};
pub use preprocessor::{FittedPreprocessor, NumericColumn, PREPROCESSOR_SCHEMA_VERSION};

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{app_dirs, config::ArtifactPaths};

/// Filename looked up in the models directory for the preprocessor.
pub const PREPROCESSOR_FILE_NAME: &str = "preprocessor.json";
/// Filename looked up in the models directory for the classifier.
pub const MODEL_FILE_NAME: &str = "credit_model.json";

const BUNDLED_PREPROCESSOR: &str = include_str!("../../assets/ml/preprocessor.json");
const BUNDLED_MODEL: &str = include_str!("../../assets/ml/credit_model.json");

/// Errors raised while loading the fitted artifacts at startup.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// Could not resolve the models directory.
    #[error("Failed to resolve models directory: {0}")]
    ModelsDir(#[from] app_dirs::AppDirError),
    /// Failed to read an artifact file.
    #[error("Failed to read artifact {path}: {source}")]
    Read {
        /// Artifact file path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// An artifact file is not valid JSON for its schema.
    #[error("Failed to parse artifact {name}: {source}")]
    Parse {
        /// Which artifact failed (`preprocessor` or `model`).
        name: &'static str,
        /// JSON parse error.
        source: serde_json::Error,
    },
    /// An artifact parsed but violates its structural invariants.
    #[error("Invalid artifact {name}: {reason}")]
    Invalid {
        /// Which artifact failed (`preprocessor` or `model`).
        name: &'static str,
        /// Validation failure description.
        reason: String,
    },
    /// The two artifacts disagree on the feature-space dimension.
    #[error(
        "Artifact mismatch: preprocessor produces {preprocessor_len} features \
         but the model expects {model_len}"
    )]
    FeatureSpaceMismatch {
        /// Feature count the preprocessor produces.
        preprocessor_len: usize,
        /// Feature count the model was fitted on.
        model_len: usize,
    },
}

/// The fitted artifacts, immutable after load.
#[derive(Debug, Clone)]
pub struct LoadedArtifacts {
    /// Fitted column transform.
    pub preprocessor: FittedPreprocessor,
    /// Fitted classifier.
    pub model: CreditModel,
}

/// Load both artifacts honoring config overrides.
pub fn load(overrides: &ArtifactPaths) -> Result<LoadedArtifacts, ArtifactError> {
    let models_dir = app_dirs::models_dir()?;
    let preprocessor: FittedPreprocessor = load_artifact(
        "preprocessor",
        overrides.preprocessor.as_deref(),
        &models_dir.join(PREPROCESSOR_FILE_NAME),
        BUNDLED_PREPROCESSOR,
    )?;
    preprocessor
        .validate()
        .map_err(|reason| ArtifactError::Invalid {
            name: "preprocessor",
            reason,
        })?;

    let model: CreditModel = load_artifact(
        "model",
        overrides.model.as_deref(),
        &models_dir.join(MODEL_FILE_NAME),
        BUNDLED_MODEL,
    )?;
    model.validate().map_err(|reason| ArtifactError::Invalid {
        name: "model",
        reason,
    })?;

    if preprocessor.feature_len() != model.feature_len {
        return Err(ArtifactError::FeatureSpaceMismatch {
            preprocessor_len: preprocessor.feature_len(),
            model_len: model.feature_len,
        });
    }
    Ok(LoadedArtifacts {
        preprocessor,
        model,
    })
}

/// Parse the artifacts bundled into the binary, ignoring disk entirely.
pub fn load_bundled() -> Result<LoadedArtifacts, ArtifactError> {
    let preprocessor: FittedPreprocessor = parse_json("preprocessor", BUNDLED_PREPROCESSOR)?;
    preprocessor
        .validate()
        .map_err(|reason| ArtifactError::Invalid {
            name: "preprocessor",
            reason,
        })?;
    let model: CreditModel = parse_json("model", BUNDLED_MODEL)?;
    model.validate().map_err(|reason| ArtifactError::Invalid {
        name: "model",
        reason,
    })?;
    Ok(LoadedArtifacts {
        preprocessor,
        model,
    })
}

fn load_artifact<T: DeserializeOwned>(
    name: &'static str,
    override_path: Option<&Path>,
    models_dir_path: &Path,
    bundled: &str,
) -> Result<T, ArtifactError> {
    if let Some(path) = override_path {
        return read_json(name, path);
    }
    if models_dir_path.exists() {
        return read_json(name, models_dir_path);
    }
    parse_json(name, bundled)
}

fn read_json<T: DeserializeOwned>(name: &'static str, path: &Path) -> Result<T, ArtifactError> {
    let text = std::fs::read_to_string(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_json(name, &text)
}

fn parse_json<T: DeserializeOwned>(name: &'static str, text: &str) -> Result<T, ArtifactError> {
    serde_json::from_str(text).map_err(|source| ArtifactError::Parse { name, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{ApplicantRecord, Classifier, CreditHistory, FeatureEncoder};
    use tempfile::tempdir;

    #[test]
    fn bundled_artifacts_parse_validate_and_agree() {
        let artifacts = load_bundled().unwrap();
        assert_eq!(
            artifacts.preprocessor.feature_len(),
            artifacts.model.feature_len
        );
        for category in CreditHistory::ALL {
            assert!(
                artifacts
                    .preprocessor
                    .categories
                    .contains(&category.as_str().to_string())
            );
        }
    }

    #[test]
    fn bundled_artifacts_score_a_typical_applicant() {
        let artifacts = load_bundled().unwrap();
        let record = ApplicantRecord {
            income: 500_000.0,
            debt: 200_000.0,
            credit_history: CreditHistory::Good,
        };
        let features = artifacts.preprocessor.encode(&record).unwrap();
        let outcome = artifacts.model.classify(&features).unwrap();
        let [p0, p1] = outcome.probabilities;
        assert!((0.0..=1.0).contains(&p0));
        assert!((0.0..=1.0).contains(&p1));
        assert!((p0 + p1 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn override_path_wins_over_bundled_model() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom_model.json");
        let mut model = load_bundled().unwrap().model;
        model.bias = 3.5;
        std::fs::write(&path, serde_json::to_string(&model).unwrap()).unwrap();

        let loaded: CreditModel = load_artifact(
            "model",
            Some(path.as_path()),
            &dir.path().join(MODEL_FILE_NAME),
            BUNDLED_MODEL,
        )
        .unwrap();
        assert_eq!(loaded.bias, 3.5);
    }

    #[test]
    fn unreadable_override_is_a_read_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = load_artifact::<CreditModel>(
            "model",
            Some(missing.as_path()),
            &dir.path().join(MODEL_FILE_NAME),
            BUNDLED_MODEL,
        )
        .unwrap_err();
        assert!(matches!(err, ArtifactError::Read { .. }));
    }

    #[test]
    fn garbage_artifact_is_a_parse_error() {
        let err = parse_json::<CreditModel>("model", "{not json").unwrap_err();
        assert!(matches!(err, ArtifactError::Parse { name: "model", .. }));
    }
}
