//! HTTP client for communicating with cardiod.

use crate::errors::{EXIT_GENERAL_ERROR, EXIT_INVALID_RESPONSE, EXIT_SERVICE_UNAVAILABLE};
use cardio_common::api::{
    ErrorResponse, FeaturesResponse, HealthResponse, HomeResponse, PredictResponse,
};
use cardio_common::error::CardioError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Default service location
pub const DEFAULT_URL: &str = "http://127.0.0.1:5000";

/// Client-side failures, each mapped to an exit code
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Cannot reach cardiod at {url}: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("cardiod is running but has no model loaded")]
    ModelNotLoaded,

    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid response from cardiod: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    pub fn exit_code(&self) -> i32 {
        match self {
            ClientError::Unreachable { .. } | ClientError::ModelNotLoaded => {
                EXIT_SERVICE_UNAVAILABLE
            }
            ClientError::Rejected { .. } => EXIT_GENERAL_ERROR,
            ClientError::InvalidResponse(_) => EXIT_INVALID_RESPONSE,
        }
    }
}

/// Client for the cardiod HTTP API
pub struct CardioClient {
    base_url: String,
    http: reqwest::Client,
}

impl CardioClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Unreachable {
                url: base_url.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn home(&self) -> Result<HomeResponse, ClientError> {
        self.get("/").await
    }

    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.get("/health").await
    }

    pub async fn features(&self) -> Result<FeaturesResponse, ClientError> {
        self.get("/features").await
    }

    /// Submit patient attributes (a flat JSON object)
    pub async fn predict(&self, patient: &serde_json::Value) -> Result<PredictResponse, ClientError> {
        let response = self
            .http
            .post(self.url("/predict"))
            .json(patient)
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.unreachable(e))?;
        interpret_predict(status, &body)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| self.unreachable(e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| self.unreachable(e))?;
        if !status.is_success() {
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        parse(&body)
    }

    fn unreachable(&self, e: reqwest::Error) -> ClientError {
        ClientError::Unreachable {
            url: self.base_url.clone(),
            reason: e.to_string(),
        }
    }
}

fn parse<T: DeserializeOwned>(body: &[u8]) -> Result<T, ClientError> {
    serde_json::from_slice(body).map_err(|e| ClientError::InvalidResponse(e.to_string()))
}

/// Map a `/predict` status and body onto the client result
pub fn interpret_predict(status: StatusCode, body: &[u8]) -> Result<PredictResponse, ClientError> {
    if status.is_success() {
        return parse(body);
    }

    let error: ErrorResponse = parse(body)?;
    if status == StatusCode::INTERNAL_SERVER_ERROR
        && error.error == CardioError::ModelNotLoaded.to_string()
    {
        return Err(ClientError::ModelNotLoaded);
    }

    Err(ClientError::Rejected {
        status: status.as_u16(),
        message: error.error,
    })
}
