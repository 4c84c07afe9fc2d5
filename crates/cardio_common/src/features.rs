//! Feature assembly: attribute map -> ordered model input.
//!
//! The model consumes a positional vector whose order is fixed by the
//! artifact's feature list. Values are kept keyed by name here and only
//! flattened to `Vec<f64>` at the scaler/model boundary.

use crate::attributes::{AttributeMap, AGE, BMI};
use crate::error::Result;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

pub const AGE_YEARS: &str = "age_years";

/// Imputed age when neither `age_years` nor `age` is supplied
pub const DEFAULT_AGE_YEARS: f64 = 50.0;

/// Imputed BMI when neither `bmi` nor height/weight are supplied
pub const DEFAULT_BMI: f64 = 25.0;

/// Imputed value for every other missing feature
pub const DEFAULT_FEATURE_VALUE: f64 = 0.0;

/// Ordered `(name, value)` pairs in model order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureVector {
    entries: Vec<(String, f64)>,
}

impl FeatureVector {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: f64) {
        self.entries.push((name.into(), value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value of the first entry with this name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(n, _)| n.clone()).collect()
    }

    /// Positional values, for the scaler and model
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, v)| *v).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }
}

// Serialized as a JSON object whose key order is the model order.
impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FeatureVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct FeatureVectorVisitor;

        impl<'de> Visitor<'de> for FeatureVectorVisitor {
            type Value = FeatureVector;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of feature names to numbers")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut vector = FeatureVector::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, value)) = access.next_entry::<String, f64>()? {
                    vector.push(name, value);
                }
                Ok(vector)
            }
        }

        deserializer.deserialize_map(FeatureVectorVisitor)
    }
}

/// Build the model input for `names` from `attrs`.
///
/// Present attributes are used as-is. Missing `age_years` falls back to `age`
/// (already in years) then 50; missing `bmi` is derived from height (cm) and
/// weight (kg) then 25; anything else missing becomes 0. The only failure is
/// a BMI derivation over a zero height.
pub fn assemble(names: &[String], attrs: &AttributeMap) -> Result<FeatureVector> {
    let mut vector = FeatureVector::with_capacity(names.len());

    for name in names {
        let value = match attrs.get(name) {
            Some(value) => value,
            None => impute(name, attrs)?,
        };
        vector.push(name.clone(), value);
    }

    debug_assert_eq!(vector.len(), names.len());
    Ok(vector)
}

fn impute(name: &str, attrs: &AttributeMap) -> Result<f64> {
    let value = match name {
        AGE_YEARS => attrs.get(AGE).unwrap_or(DEFAULT_AGE_YEARS),
        BMI => attrs.derived_bmi()?.unwrap_or(DEFAULT_BMI),
        _ => DEFAULT_FEATURE_VALUE,
    };
    Ok(value)
}

/// Human-readable descriptions for the known attribute vocabulary
pub fn feature_descriptions() -> BTreeMap<String, String> {
    [
        ("gender", "Gender (1: female, 2: male)"),
        ("height", "Height in cm"),
        ("weight", "Weight in kg"),
        ("ap_hi", "Systolic blood pressure"),
        ("ap_lo", "Diastolic blood pressure"),
        (
            "cholesterol",
            "Cholesterol level (1: normal, 2: above normal, 3: well above normal)",
        ),
        (
            "gluc",
            "Glucose level (1: normal, 2: above normal, 3: well above normal)",
        ),
        ("smoke", "Smoking (0: no, 1: yes)"),
        ("alco", "Alcohol intake (0: no, 1: yes)"),
        ("active", "Physical activity (0: no, 1: yes)"),
        ("age", "Age in years"),
        ("age_years", "Age in years (calculated automatically)"),
        ("bmi", "Body Mass Index (calculated automatically)"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}
