//! Command implementations for cardioctl

use crate::client::CardioClient;
use crate::display;
use anyhow::{anyhow, Context, Result};
use cardio_common::api::PatientProfile;
use std::fs;
use std::path::Path;

pub async fn status(client: &CardioClient) -> Result<()> {
    let home = client.home().await?;
    let health = client.health().await?;
    print!("{}", display::render_status(client.base_url(), &home, &health));
    Ok(())
}

pub async fn features(client: &CardioClient) -> Result<()> {
    let features = client.features().await?;
    print!("{}", display::render_features(&features));
    Ok(())
}

pub async fn predict(client: &CardioClient, patient: serde_json::Value, raw_json: bool) -> Result<()> {
    let response = client.predict(&patient).await?;

    if raw_json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print!("{}", display::render_prediction(&response, &patient));
    }
    Ok(())
}

/// Patient attributes from a JSON file, or the profile built from flags
pub fn load_patient(file: Option<&Path>, profile: &PatientProfile) -> Result<serde_json::Value> {
    match file {
        Some(path) => {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let value: serde_json::Value = serde_json::from_str(&content)
                .with_context(|| format!("{} is not valid JSON", path.display()))?;
            if !value.is_object() {
                return Err(anyhow!(
                    "{} must contain a JSON object of patient attributes",
                    path.display()
                ));
            }
            Ok(value)
        }
        None => Ok(serde_json::to_value(profile)?),
    }
}
