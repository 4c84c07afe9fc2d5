//! Error taxonomy for the scoring pipeline.
//!
//! Every failure a request can hit is one of these variants. The daemon maps
//! `ModelNotLoaded` to HTTP 500 and everything else to HTTP 400.

use std::path::PathBuf;

/// Errors raised while loading artifacts or scoring a patient
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CardioError {
    #[error("Failed to load artifact {}: {reason}", path.display())]
    ArtifactLoad { path: PathBuf, reason: String },

    #[error("Model not loaded")]
    ModelNotLoaded,

    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    #[error("Attribute '{name}' must be a number, got {found}")]
    InvalidAttributeType { name: String, found: &'static str },

    #[error("Attribute '{name}' has unusable value {value}: {reason}")]
    InvalidAttributeValue {
        name: String,
        value: f64,
        reason: &'static str,
    },

    #[error("Scoring failed: {0}")]
    Scoring(String),
}

impl CardioError {
    pub fn artifact_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        CardioError::ArtifactLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the failure is on the server side rather than the caller's input
    pub fn is_server_fault(&self) -> bool {
        matches!(
            self,
            CardioError::ModelNotLoaded | CardioError::ArtifactLoad { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CardioError>;
