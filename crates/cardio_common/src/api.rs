//! JSON bodies exchanged between cardiod and its clients.

use crate::features::FeatureVector;
use crate::predictor::Assessment;
use crate::risk::{RiskCategory, RiskLabel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SERVICE_MESSAGE: &str = "Cardiovascular Disease Prediction API";

/// `GET /`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeResponse {
    pub message: String,
    pub status: String,
    pub endpoints: BTreeMap<String, String>,
}

impl Default for HomeResponse {
    fn default() -> Self {
        let endpoints = [
            ("/predict", "POST - Get prediction with patient data"),
            ("/health", "GET - API health check"),
            ("/features", "GET - Expected features and example input"),
            ("/metrics", "GET - Prometheus metrics"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            message: SERVICE_MESSAGE.to_string(),
            status: "running".to_string(),
            endpoints,
        }
    }
}

/// `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
}

impl HealthResponse {
    pub fn new(model_loaded: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            model_loaded,
        }
    }
}

/// Patient attributes as entered on a form. Also the example input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    /// 1: female, 2: male
    pub gender: u8,
    /// cm
    pub height: f64,
    /// kg
    pub weight: f64,
    pub ap_hi: u16,
    pub ap_lo: u16,
    pub cholesterol: u8,
    pub gluc: u8,
    pub smoke: u8,
    pub alco: u8,
    pub active: u8,
    /// years
    pub age: u16,
}

impl Default for PatientProfile {
    fn default() -> Self {
        Self {
            gender: 2,
            height: 170.0,
            weight: 70.0,
            ap_hi: 120,
            ap_lo: 80,
            cholesterol: 1,
            gluc: 1,
            smoke: 0,
            alco: 0,
            active: 1,
            age: 50,
        }
    }
}

/// `GET /features`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturesResponse {
    pub features: Vec<String>,
    pub descriptions: BTreeMap<String, String>,
    pub example_input: PatientProfile,
}

/// `POST /predict` success body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub success: bool,
    /// Percentage, two decimals
    pub probability: f64,
    pub risk_category: RiskCategory,
    pub prediction: RiskLabel,
    pub recommendations: Vec<String>,
    pub features_used: Vec<String>,
    pub features_values: FeatureVector,
}

impl From<Assessment> for PredictResponse {
    fn from(assessment: Assessment) -> Self {
        Self {
            success: true,
            probability: assessment.probability_percent(),
            risk_category: assessment.risk_category,
            prediction: assessment.prediction,
            recommendations: assessment.recommendations,
            features_used: assessment.features.names(),
            features_values: assessment.features,
        }
    }
}

/// Error body. `success` is omitted for the "model not loaded" case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub error: String,
}

impl ErrorResponse {
    pub fn bare(error: impl Into<String>) -> Self {
        Self {
            success: None,
            error: error.into(),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: Some(false),
            error: error.into(),
        }
    }
}
