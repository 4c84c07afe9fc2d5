//! Probability -> risk bands.
//!
//! Two independent readings of the same probability are reported: a
//! four-way category (cut at 0.3 / 0.6 / 0.8) and a binary label (cut at
//! 0.5). The thresholds differ on purpose and must not be unified.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const MODERATE_THRESHOLD: f64 = 0.3;
pub const HIGH_THRESHOLD: f64 = 0.6;
pub const VERY_HIGH_THRESHOLD: f64 = 0.8;

/// Probability above which the binary label reads "High Risk"
pub const LABEL_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Moderate Risk")]
    Moderate,
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Very High Risk")]
    VeryHigh,
}

impl RiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low Risk",
            RiskCategory::Moderate => "Moderate Risk",
            RiskCategory::High => "High Risk",
            RiskCategory::VeryHigh => "Very High Risk",
        }
    }

    /// Short lowercase key, used as a metrics label
    pub fn key(&self) -> &'static str {
        match self {
            RiskCategory::Low => "low",
            RiskCategory::Moderate => "moderate",
            RiskCategory::High => "high",
            RiskCategory::VeryHigh => "very_high",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    #[serde(rename = "High Risk")]
    HighRisk,
    #[serde(rename = "Low Risk")]
    LowRisk,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::HighRisk => "High Risk",
            RiskLabel::LowRisk => "Low Risk",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Four-way category; lower bounds inclusive
pub fn classify(probability: f64) -> RiskCategory {
    if probability < MODERATE_THRESHOLD {
        RiskCategory::Low
    } else if probability < HIGH_THRESHOLD {
        RiskCategory::Moderate
    } else if probability < VERY_HIGH_THRESHOLD {
        RiskCategory::High
    } else {
        RiskCategory::VeryHigh
    }
}

/// Binary label; exactly 0.5 is still low
pub fn label(probability: f64) -> RiskLabel {
    if probability > LABEL_THRESHOLD {
        RiskLabel::HighRisk
    } else {
        RiskLabel::LowRisk
    }
}
