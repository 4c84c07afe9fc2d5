//! Configuration management for cardiod.
//!
//! Loads settings from a TOML file or uses defaults. Lookup order:
//! explicit path, `$CARDIOD_CONFIG`, then /etc/cardio/config.toml.
//! `$PORT` overrides the configured port.

use anyhow::{Context, Result};
use cardio_common::artifacts::{
    ArtifactPaths, DEFAULT_FEATURES_FILE, DEFAULT_MODEL_FILE, DEFAULT_SCALER_FILE,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/cardio/config.toml";

/// Environment variable naming an alternative config file
pub const CONFIG_ENV: &str = "CARDIOD_CONFIG";

/// Environment variable overriding the listen port
pub const PORT_ENV: &str = "PORT";

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum accepted request body in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Where the model artifacts live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactsConfig {
    #[serde(default = "default_artifacts_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_features_file")]
    pub features: String,

    #[serde(default = "default_scaler_file")]
    pub scaler: String,

    #[serde(default = "default_model_file")]
    pub model: String,
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

fn default_features_file() -> String {
    DEFAULT_FEATURES_FILE.to_string()
}

fn default_scaler_file() -> String {
    DEFAULT_SCALER_FILE.to_string()
}

fn default_model_file() -> String {
    DEFAULT_MODEL_FILE.to_string()
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        Self {
            dir: default_artifacts_dir(),
            features: default_features_file(),
            scaler: default_scaler_file(),
            model: default_model_file(),
        }
    }
}

impl ArtifactsConfig {
    pub fn paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            features: self.dir.join(&self.features),
            scaler: self.dir.join(&self.scaler),
            model: self.dir.join(&self.model),
        }
    }
}

/// Cross-origin settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; empty allows any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Complete cardiod configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardiodConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub artifacts: ArtifactsConfig,

    #[serde(default)]
    pub cors: CorsConfig,
}

impl CardiodConfig {
    /// Resolve the config file and load it, then apply `$PORT`
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load_from(path)?,
            None => match std::env::var_os(CONFIG_ENV) {
                Some(path) => Self::load_from(Path::new(&path))?,
                None => Self::load_or_default(Path::new(CONFIG_PATH)),
            },
        };

        if let Ok(port) = std::env::var(PORT_ENV) {
            config.apply_port_override(&port);
        }

        Ok(config)
    }

    /// Load a file that must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load if present, defaults otherwise
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{:#}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn apply_port_override(&mut self, port: &str) {
        match port.trim().parse::<u16>() {
            Ok(port) => self.server.port = port,
            Err(_) => warn!("Ignoring invalid {}={:?}", PORT_ENV, port),
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .with_context(|| format!("Invalid listen address {}", addr))
    }
}
