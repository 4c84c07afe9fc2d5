//! Pre-trained scoring artifacts.
//!
//! Three JSON files are loaded once at startup:
//! - `features.json`: ordered feature names, the positional contract
//! - `scaler.json`: per-feature standardization (`mean`, `scale`)
//! - `model.json`: logistic regression (`coefficients`, `intercept`)
//!
//! The store is immutable after loading and is shared read-only across
//! requests. Scaling and scoring go through the `Scaler` and `Model` traits so
//! tests and alternative model kinds can be plugged in.

use crate::error::{CardioError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_FEATURES_FILE: &str = "features.json";
pub const DEFAULT_SCALER_FILE: &str = "scaler.json";
pub const DEFAULT_MODEL_FILE: &str = "model.json";

/// Feature scaler applied before scoring
pub trait Scaler: Send + Sync {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>>;
}

/// Probability-producing classifier
pub trait Model: Send + Sync {
    /// Probability of the positive (at-risk) class
    fn predict_probability(&self, features: &[f64]) -> Result<f64>;
}

/// Zero-mean / unit-variance standardization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Builds a scaler; zero scales (constant training columns) become 1
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Result<Self> {
        if mean.len() != scale.len() {
            return Err(CardioError::Scoring(format!(
                "scaler has {} means but {} scales",
                mean.len(),
                scale.len()
            )));
        }
        let scale = scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect();
        Ok(Self { mean, scale })
    }

    pub fn dimension(&self) -> usize {
        self.mean.len()
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>> {
        if features.len() != self.dimension() {
            return Err(CardioError::Scoring(format!(
                "scaler expects {} features, got {}",
                self.dimension(),
                features.len()
            )));
        }
        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect())
    }
}

/// Binary logistic regression over scaled features
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticModel {
    pub fn dimension(&self) -> usize {
        self.coefficients.len()
    }
}

impl Model for LogisticModel {
    fn predict_probability(&self, features: &[f64]) -> Result<f64> {
        if features.len() != self.dimension() {
            return Err(CardioError::Scoring(format!(
                "model expects {} features, got {}",
                self.dimension(),
                features.len()
            )));
        }
        let logit: f64 = self.intercept
            + features
                .iter()
                .zip(&self.coefficients)
                .map(|(x, w)| x * w)
                .sum::<f64>();
        Ok(sigmoid(logit))
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// On-disk model file
#[derive(Debug, Clone, Deserialize)]
struct ModelFile {
    kind: String,
    coefficients: Vec<f64>,
    intercept: f64,
}

const LOGISTIC_REGRESSION: &str = "logistic_regression";

/// Locations of the three artifact files
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactPaths {
    pub features: PathBuf,
    pub scaler: PathBuf,
    pub model: PathBuf,
}

impl ArtifactPaths {
    /// Default file names inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            features: dir.join(DEFAULT_FEATURES_FILE),
            scaler: dir.join(DEFAULT_SCALER_FILE),
            model: dir.join(DEFAULT_MODEL_FILE),
        }
    }
}

/// Loaded feature list, scaler and model
pub struct ArtifactStore {
    feature_names: Vec<String>,
    scaler: Box<dyn Scaler>,
    model: Box<dyn Model>,
}

impl std::fmt::Debug for ArtifactStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactStore")
            .field("feature_names", &self.feature_names)
            .finish_non_exhaustive()
    }
}

impl ArtifactStore {
    pub fn new(
        feature_names: Vec<String>,
        scaler: Box<dyn Scaler>,
        model: Box<dyn Model>,
    ) -> Self {
        Self {
            feature_names,
            scaler,
            model,
        }
    }

    /// Load all three artifacts; any failure fails the whole load
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let feature_names: Vec<String> = read_json(&paths.features)?;
        if feature_names.is_empty() {
            return Err(CardioError::artifact_load(
                &paths.features,
                "feature list is empty",
            ));
        }

        let scaler_file: StandardScaler = read_json(&paths.scaler)?;
        let scaler = StandardScaler::new(scaler_file.mean, scaler_file.scale)
            .map_err(|e| CardioError::artifact_load(&paths.scaler, e))?;

        let model_file: ModelFile = read_json(&paths.model)?;
        if model_file.kind != LOGISTIC_REGRESSION {
            return Err(CardioError::artifact_load(
                &paths.model,
                format!("unsupported model kind '{}'", model_file.kind),
            ));
        }
        let model = LogisticModel {
            coefficients: model_file.coefficients,
            intercept: model_file.intercept,
        };

        // Mismatches surface per request as scoring errors
        if scaler.dimension() != feature_names.len() || model.dimension() != feature_names.len() {
            warn!(
                "Artifact dimensions disagree: {} features, scaler {}, model {}",
                feature_names.len(),
                scaler.dimension(),
                model.dimension()
            );
        }

        info!(
            "Loaded model with {} features: {}",
            feature_names.len(),
            feature_names.join(", ")
        );

        Ok(Self::new(feature_names, Box::new(scaler), Box::new(model)))
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn scale(&self, features: &[f64]) -> Result<Vec<f64>> {
        self.scaler.transform(features)
    }

    pub fn predict_probability(&self, scaled: &[f64]) -> Result<f64> {
        self.model.predict_probability(scaled)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| CardioError::artifact_load(path, e))?;
    serde_json::from_str(&content).map_err(|e| CardioError::artifact_load(path, e))
}
