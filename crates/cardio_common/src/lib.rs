//! Cardio Common - scoring pipeline shared by cardiod and cardioctl
//!
//! Turns a loosely specified patient attribute map into the ordered feature
//! vector a pre-trained model expects, then turns the model's probability
//! into risk bands and advice.

pub mod api;
pub mod artifacts;
pub mod attributes;
pub mod error;
pub mod features;
pub mod predictor;
pub mod recommend;
pub mod risk;

pub use artifacts::{ArtifactPaths, ArtifactStore, LogisticModel, Model, Scaler, StandardScaler};
pub use attributes::AttributeMap;
pub use error::{CardioError, Result};
pub use features::{assemble, FeatureVector};
pub use predictor::{predict, Assessment};
pub use recommend::recommend;
pub use risk::{classify, label, RiskCategory, RiskLabel};
