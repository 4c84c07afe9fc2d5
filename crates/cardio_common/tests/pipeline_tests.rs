//! Pipeline tests against the bundled artifacts.
//!
//! Loads `artifacts/` from the workspace root and runs complete patients
//! through assembly, scaling, scoring and post-processing.

use approx::assert_relative_eq;
use cardio_common::api::{PatientProfile, PredictResponse};
use cardio_common::recommend::{
    CARDIOLOGIST_CONSULTATION, ELEVATED_BLOOD_PRESSURE, HIGH_CHOLESTEROL, INCREASE_ACTIVITY,
    SMOKING_CESSATION,
};
use cardio_common::{predict, ArtifactPaths, ArtifactStore, AttributeMap, CardioError};
use std::path::PathBuf;

fn bundled_store() -> ArtifactStore {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../artifacts");
    ArtifactStore::load(&ArtifactPaths::in_dir(dir)).expect("bundled artifacts load")
}

fn example_attrs() -> AttributeMap {
    let value = serde_json::to_value(PatientProfile::default()).unwrap();
    AttributeMap::from_json(value).unwrap()
}

#[test]
fn test_bundled_feature_order() {
    let store = bundled_store();
    let names = store.feature_names();
    assert_eq!(names.len(), 12);
    assert_eq!(names.first().map(String::as_str), Some("gender"));
    assert_eq!(names.last().map(String::as_str), Some("bmi"));
}

#[test]
fn test_example_patient_derives_age_and_bmi() {
    let assessment = predict(&bundled_store(), &example_attrs()).unwrap();

    assert_eq!(assessment.features.get("age_years"), Some(50.0));
    assert_relative_eq!(assessment.features.get("bmi").unwrap(), 24.22, epsilon = 0.01);
    assert!((0.0..=1.0).contains(&assessment.probability));

    let response = PredictResponse::from(assessment);
    assert!((0.0..=100.0).contains(&response.probability));
    assert_eq!(response.features_used.len(), 12);
}

#[test]
fn test_partial_input_still_scores() {
    let attrs = AttributeMap::from_json_slice(br#"{"ap_hi": 160, "ap_lo": 100}"#).unwrap();
    let assessment = predict(&bundled_store(), &attrs).unwrap();

    assert_eq!(assessment.features.get("age_years"), Some(50.0));
    assert_eq!(assessment.features.get("bmi"), Some(25.0));
    assert_eq!(assessment.features.get("gender"), Some(0.0));
    assert_eq!(assessment.recommendations[0], ELEVATED_BLOOD_PRESSURE);
}

#[test]
fn test_probability_rises_with_blood_pressure() {
    let store = bundled_store();
    let mut attrs = example_attrs();
    let baseline = predict(&store, &attrs).unwrap().probability;

    attrs.insert("ap_hi", 180.0);
    let elevated = predict(&store, &attrs).unwrap().probability;
    assert!(elevated > baseline);
}

#[test]
fn test_high_risk_recommendation_chain() {
    let attrs: AttributeMap = [
        ("cholesterol", 3.0),
        ("ap_hi", 150.0),
        ("ap_lo", 95.0),
        ("smoke", 1.0),
        ("alco", 0.0),
        ("active", 0.0),
        ("height", 170.0),
        ("weight", 90.0),
    ]
    .into_iter()
    .collect();

    let advice = cardio_common::recommend(&attrs, 0.75);
    assert_eq!(advice.len(), 6);
    assert_eq!(advice[0], HIGH_CHOLESTEROL);
    assert_eq!(advice[1], ELEVATED_BLOOD_PRESSURE);
    assert_eq!(advice[2], SMOKING_CESSATION);
    assert_eq!(advice[3], INCREASE_ACTIVITY);
    assert!(advice[4].starts_with("BMI is 31.1"));
    assert_eq!(advice[5], CARDIOLOGIST_CONSULTATION);
}

#[test]
fn test_text_attribute_is_rejected_before_scoring() {
    let err = AttributeMap::from_json_slice(br#"{"height": "tall"}"#).unwrap_err();
    assert!(matches!(err, CardioError::InvalidAttributeType { .. }));
}

#[test]
fn test_zero_height_is_rejected() {
    let attrs = AttributeMap::from_json_slice(br#"{"height": 0, "weight": 70}"#).unwrap();
    let err = predict(&bundled_store(), &attrs).unwrap_err();
    assert!(matches!(err, CardioError::InvalidAttributeValue { .. }));
}
