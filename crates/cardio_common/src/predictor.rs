//! End-to-end scoring of one patient.

use crate::artifacts::ArtifactStore;
use crate::attributes::AttributeMap;
use crate::error::{CardioError, Result};
use crate::features::{assemble, FeatureVector};
use crate::recommend::recommend;
use crate::risk::{classify, label, RiskCategory, RiskLabel};
use tracing::debug;

/// Everything produced for one request
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    /// Raw model probability in [0, 1]
    pub probability: f64,
    pub risk_category: RiskCategory,
    pub prediction: RiskLabel,
    pub recommendations: Vec<String>,
    pub features: FeatureVector,
}

impl Assessment {
    /// Probability as a percentage rounded to two decimals
    pub fn probability_percent(&self) -> f64 {
        (self.probability * 100.0 * 100.0).round() / 100.0
    }
}

/// assemble -> scale -> score -> classify + recommend
pub fn predict(store: &ArtifactStore, attrs: &AttributeMap) -> Result<Assessment> {
    // A BMI that would need dividing by a zero height fails the request,
    // whether or not `bmi` is one of the model features.
    attrs.bmi()?;

    let features = assemble(store.feature_names(), attrs)?;
    let scaled = store.scale(&features.values())?;
    let probability = store.predict_probability(&scaled)?;

    if !probability.is_finite() {
        return Err(CardioError::Scoring(format!(
            "model returned non-finite probability {}",
            probability
        )));
    }
    let probability = probability.clamp(0.0, 1.0);

    debug!("Scored {} features -> p={:.4}", features.len(), probability);

    Ok(Assessment {
        probability,
        risk_category: classify(probability),
        prediction: label(probability),
        recommendations: recommend(attrs, probability),
        features,
    })
}
