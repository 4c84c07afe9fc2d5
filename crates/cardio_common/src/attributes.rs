//! Per-request patient attributes.
//!
//! Request bodies are flat JSON objects. Keys are not fixed in advance, but
//! every value must be numeric-like: integers, floats, or booleans (read as
//! 0/1). Text, null, arrays and nested objects are rejected up front so the
//! rest of the pipeline only ever sees numbers.

use crate::error::{CardioError, Result};
use serde_json::Value;
use std::collections::BTreeMap;

pub const AGE: &str = "age";
pub const HEIGHT: &str = "height";
pub const WEIGHT: &str = "weight";
pub const BMI: &str = "bmi";
pub const CHOLESTEROL: &str = "cholesterol";
pub const AP_HI: &str = "ap_hi";
pub const AP_LO: &str = "ap_lo";
pub const SMOKE: &str = "smoke";
pub const ALCO: &str = "alco";
pub const ACTIVE: &str = "active";

/// Body mass index from height in centimetres and weight in kilograms
pub fn body_mass_index(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / height_m.powi(2)
}

/// Numeric attribute map built from one request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeMap {
    values: BTreeMap<String, f64>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw request body
    pub fn from_json_slice(body: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| CardioError::InvalidRequest(e.to_string()))?;
        Self::from_json(value)
    }

    /// Convert a JSON object, rejecting any value that is not numeric-like
    pub fn from_json(value: Value) -> Result<Self> {
        let object = match value {
            Value::Object(object) => object,
            other => {
                return Err(CardioError::InvalidRequest(format!(
                    "expected a JSON object of attributes, got {}",
                    json_kind(&other)
                )))
            }
        };

        let mut values = BTreeMap::new();
        for (name, raw) in object {
            let number = match &raw {
                Value::Number(n) => n.as_f64(),
                Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
                _ => None,
            };
            match number {
                Some(n) => {
                    values.insert(name, n);
                }
                None => {
                    return Err(CardioError::InvalidAttributeType {
                        name,
                        found: json_kind(&raw),
                    })
                }
            }
        }

        Ok(Self { values })
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// BMI computed from `height` and `weight`, ignoring any explicit `bmi`.
    ///
    /// Returns `Ok(None)` unless both are present. A zero height is rejected
    /// instead of producing an infinite BMI.
    pub fn derived_bmi(&self) -> Result<Option<f64>> {
        let (height, weight) = match (self.get(HEIGHT), self.get(WEIGHT)) {
            (Some(h), Some(w)) => (h, w),
            _ => return Ok(None),
        };

        if height == 0.0 {
            return Err(CardioError::InvalidAttributeValue {
                name: HEIGHT.to_string(),
                value: height,
                reason: "height must be non-zero to derive BMI",
            });
        }

        let bmi = body_mass_index(height, weight);
        if !bmi.is_finite() {
            return Err(CardioError::InvalidAttributeValue {
                name: HEIGHT.to_string(),
                value: height,
                reason: "derived BMI is not finite",
            });
        }
        Ok(Some(bmi))
    }

    /// Explicit `bmi` if supplied, else the derived value
    pub fn bmi(&self) -> Result<Option<f64>> {
        match self.get(BMI) {
            Some(bmi) => Ok(Some(bmi)),
            None => self.derived_bmi(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    #[test]
    fn test_accepts_integers_floats_and_booleans() {
        let attrs = AttributeMap::from_json(json!({
            "height": 170,
            "weight": 72.5,
            "smoke": true,
            "alco": false,
        }))
        .unwrap();

        assert_eq!(attrs.get("height"), Some(170.0));
        assert_eq!(attrs.get("weight"), Some(72.5));
        assert_eq!(attrs.get("smoke"), Some(1.0));
        assert_eq!(attrs.get("alco"), Some(0.0));
        assert_eq!(attrs.len(), 4);
    }

    #[test]
    fn test_rejects_text_values() {
        let err = AttributeMap::from_json(json!({"height": "170"})).unwrap_err();
        assert_eq!(
            err,
            CardioError::InvalidAttributeType {
                name: "height".to_string(),
                found: "string",
            }
        );
    }

    #[test]
    fn test_rejects_null_and_nested_values() {
        assert!(matches!(
            AttributeMap::from_json(json!({"gluc": null})),
            Err(CardioError::InvalidAttributeType { found: "null", .. })
        ));
        assert!(matches!(
            AttributeMap::from_json(json!({"gluc": [1, 2]})),
            Err(CardioError::InvalidAttributeType { found: "array", .. })
        ));
    }

    #[test]
    fn test_rejects_non_object_body() {
        assert!(matches!(
            AttributeMap::from_json(json!([1, 2, 3])),
            Err(CardioError::InvalidRequest(_))
        ));
        assert!(matches!(
            AttributeMap::from_json_slice(b"{not json"),
            Err(CardioError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_empty_object_is_valid() {
        let attrs = AttributeMap::from_json_slice(b"{}").unwrap();
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_derived_bmi() {
        let attrs: AttributeMap = [("height", 170.0), ("weight", 70.0)].into_iter().collect();
        assert_relative_eq!(attrs.derived_bmi().unwrap().unwrap(), 24.2214532, epsilon = 1e-6);
    }

    #[test]
    fn test_derived_bmi_needs_both_measurements() {
        let attrs: AttributeMap = [("height", 170.0)].into_iter().collect();
        assert_eq!(attrs.derived_bmi().unwrap(), None);
    }

    #[test]
    fn test_zero_height_is_rejected() {
        let attrs: AttributeMap = [("height", 0.0), ("weight", 70.0)].into_iter().collect();
        assert!(matches!(
            attrs.derived_bmi(),
            Err(CardioError::InvalidAttributeValue { value, .. }) if value == 0.0
        ));
    }

    #[test]
    fn test_explicit_bmi_wins_over_measurements() {
        let attrs: AttributeMap = [("bmi", 31.0), ("height", 0.0), ("weight", 70.0)]
            .into_iter()
            .collect();
        assert_eq!(attrs.bmi().unwrap(), Some(31.0));
    }
}
