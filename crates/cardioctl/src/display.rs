//! Terminal rendering for cardioctl output.

use cardio_common::api::{FeaturesResponse, HealthResponse, HomeResponse, PredictResponse};
use cardio_common::attributes::body_mass_index;
use cardio_common::RiskCategory;
use owo_colors::OwoColorize;
use std::fmt::Write;

/// Client-side BMI bands shown next to the patient summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi < 25.0 {
            BmiCategory::Normal
        } else if bmi < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBracket {
    Young,
    Adult,
    Senior,
}

impl AgeBracket {
    pub fn from_years(age: f64) -> Self {
        if age < 30.0 {
            AgeBracket::Young
        } else if age < 50.0 {
            AgeBracket::Adult
        } else {
            AgeBracket::Senior
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AgeBracket::Young => "Young",
            AgeBracket::Adult => "Adult",
            AgeBracket::Senior => "Senior",
        }
    }
}

/// One-line summary of the submitted measurements, if present
pub fn patient_summary(patient: &serde_json::Value) -> Option<String> {
    let height = patient.get("height")?.as_f64()?;
    let weight = patient.get("weight")?.as_f64()?;
    if height <= 0.0 {
        return None;
    }
    let bmi = body_mass_index(height, weight);

    let mut line = format!("BMI {:.2} ({})", bmi, BmiCategory::from_bmi(bmi).as_str());
    if let Some(age) = patient.get("age").and_then(|a| a.as_f64()) {
        let _ = write!(line, ", age {} ({})", age, AgeBracket::from_years(age).as_str());
    }
    Some(line)
}

fn colored_category(category: RiskCategory) -> String {
    match category {
        RiskCategory::Low => category.as_str().green().bold().to_string(),
        RiskCategory::Moderate => category.as_str().yellow().bold().to_string(),
        RiskCategory::High => category.as_str().red().bold().to_string(),
        RiskCategory::VeryHigh => category.as_str().bright_red().bold().to_string(),
    }
}

pub fn render_prediction(response: &PredictResponse, patient: &serde_json::Value) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", "Cardiovascular risk assessment".bold());
    let _ = writeln!(
        out,
        "  Assessed:    {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    );
    if let Some(summary) = patient_summary(patient) {
        let _ = writeln!(out, "  Patient:     {}", summary);
    }
    let _ = writeln!(out, "  Probability: {:.2}%", response.probability);
    let _ = writeln!(out, "  Category:    {}", colored_category(response.risk_category));
    let _ = writeln!(out, "  Prediction:  {}", response.prediction);

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Recommendations".bold());
    for (i, advice) in response.recommendations.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, advice);
    }

    out
}

pub fn render_features(response: &FeaturesResponse) -> String {
    let mut out = String::new();

    if response.features.is_empty() {
        let _ = writeln!(out, "{}", "No model loaded; feature list unavailable".yellow());
    } else {
        let _ = writeln!(out, "{}", "Model features (in order)".bold());
        for (i, name) in response.features.iter().enumerate() {
            let description = response
                .descriptions
                .get(name)
                .map(String::as_str)
                .unwrap_or("");
            let _ = writeln!(out, "  {:>2}. {:<12} {}", i + 1, name, description.dimmed());
        }
    }

    if let Ok(example) = serde_json::to_string(&response.example_input) {
        let _ = writeln!(out);
        let _ = writeln!(out, "Example input: {}", example);
    }

    out
}

pub fn render_status(url: &str, home: &HomeResponse, health: &HealthResponse) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{} ({})", home.message.bold(), url);
    let _ = writeln!(out, "  Service: {}", home.status);
    let model = if health.model_loaded {
        "loaded".green().to_string()
    } else {
        "NOT loaded".red().to_string()
    };
    let _ = writeln!(out, "  Model:   {}", model);
    let _ = writeln!(out, "  Endpoints:");
    for (path, description) in &home.endpoints {
        let _ = writeln!(out, "    {:<10} {}", path, description);
    }

    out
}
