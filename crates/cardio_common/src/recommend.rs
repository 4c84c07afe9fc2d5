//! Recommendation engine
//!
//! Independent rule checks over the raw attributes and the predicted
//! probability. Output order is rule order, not severity.

use crate::attributes::{AttributeMap, ACTIVE, ALCO, AP_HI, AP_LO, CHOLESTEROL, SMOKE};
use crate::risk::{HIGH_THRESHOLD, MODERATE_THRESHOLD};

pub const HIGH_CHOLESTEROL: &str =
    "High cholesterol detected. Consider dietary changes and exercise.";
pub const MODERATE_CHOLESTEROL: &str =
    "Moderate cholesterol level. Regular monitoring recommended.";
pub const ELEVATED_BLOOD_PRESSURE: &str =
    "Elevated blood pressure. Consult with a healthcare provider.";
pub const SMOKING_CESSATION: &str =
    "Smoking increases cardiovascular risk. Consider smoking cessation programs.";
pub const LIMIT_ALCOHOL: &str = "Limit alcohol consumption to reduce cardiovascular risk.";
pub const INCREASE_ACTIVITY: &str =
    "Incorporate regular physical activity (30 minutes daily, 5 days/week).";
pub const CARDIOLOGIST_CONSULTATION: &str =
    "High risk detected. Schedule a consultation with a cardiologist.";
pub const REGULAR_CHECKUPS: &str = "Moderate risk. Regular health check-ups are recommended.";
pub const HEALTHY_LIFESTYLE: &str =
    "Maintain healthy lifestyle with balanced diet and regular exercise.";

pub const SYSTOLIC_LIMIT: f64 = 140.0;
pub const DIASTOLIC_LIMIT: f64 = 90.0;
pub const OVERWEIGHT_BMI: f64 = 25.0;

/// Overweight advisory with the BMI to one decimal place
pub fn overweight_advisory(bmi: f64) -> String {
    format!(
        "BMI is {:.1} (overweight). Maintain a healthy weight through diet and exercise.",
        bmi
    )
}

/// Generate advice for one patient. Never empty.
pub fn recommend(attrs: &AttributeMap, probability: f64) -> Vec<String> {
    let mut advice = Vec::new();

    advice.extend(check_cholesterol(attrs));
    advice.extend(check_blood_pressure(attrs));
    advice.extend(check_smoking(attrs));
    advice.extend(check_alcohol(attrs));
    advice.extend(check_activity(attrs));
    advice.extend(check_bmi(attrs));
    advice.extend(check_overall_risk(probability));

    if advice.is_empty() {
        advice.push(HEALTHY_LIFESTYLE.to_string());
    }

    advice
}

/// Rule 1: cholesterol 3 is high, exactly 2 is moderate, 1 is fine
fn check_cholesterol(attrs: &AttributeMap) -> Option<String> {
    let level = attrs.get(CHOLESTEROL)?;
    if level > 2.0 {
        Some(HIGH_CHOLESTEROL.to_string())
    } else if level == 2.0 {
        Some(MODERATE_CHOLESTEROL.to_string())
    } else {
        None
    }
}

/// Rule 2: needs both readings
fn check_blood_pressure(attrs: &AttributeMap) -> Option<String> {
    let systolic = attrs.get(AP_HI)?;
    let diastolic = attrs.get(AP_LO)?;
    (systolic > SYSTOLIC_LIMIT || diastolic > DIASTOLIC_LIMIT)
        .then(|| ELEVATED_BLOOD_PRESSURE.to_string())
}

/// Rule 3
fn check_smoking(attrs: &AttributeMap) -> Option<String> {
    (attrs.get(SMOKE)? == 1.0).then(|| SMOKING_CESSATION.to_string())
}

/// Rule 4
fn check_alcohol(attrs: &AttributeMap) -> Option<String> {
    (attrs.get(ALCO)? == 1.0).then(|| LIMIT_ALCOHOL.to_string())
}

/// Rule 5: only an explicit 0 counts as inactive
fn check_activity(attrs: &AttributeMap) -> Option<String> {
    (attrs.get(ACTIVE)? == 0.0).then(|| INCREASE_ACTIVITY.to_string())
}

/// Rule 6: explicit `bmi` first, else height/weight.
///
/// An underivable BMI (zero height) is skipped here; the predictor rejects
/// that input before recommendations are generated.
fn check_bmi(attrs: &AttributeMap) -> Option<String> {
    let bmi = attrs.bmi().ok().flatten()?;
    (bmi > OVERWEIGHT_BMI).then(|| overweight_advisory(bmi))
}

/// Rule 7: consultation and check-up advice are mutually exclusive
fn check_overall_risk(probability: f64) -> Option<String> {
    if probability > HIGH_THRESHOLD {
        Some(CARDIOLOGIST_CONSULTATION.to_string())
    } else if probability > MODERATE_THRESHOLD {
        Some(REGULAR_CHECKUPS.to_string())
    } else {
        None
    }
}
