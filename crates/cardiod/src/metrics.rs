//! Prometheus metrics for prediction traffic

use cardio_common::RiskCategory;
use prometheus::{
    register_histogram_with_registry, register_int_counter_vec_with_registry,
    register_int_gauge_with_registry, Encoder, Histogram, IntCounterVec, IntGauge, Registry,
    TextEncoder,
};
use std::sync::Arc;

/// Outcome labels for `cardio_predictions_total`
pub const OUTCOME_SUCCESS: &str = "success";
pub const OUTCOME_REJECTED: &str = "rejected";
pub const OUTCOME_UNAVAILABLE: &str = "unavailable";

#[derive(Clone)]
pub struct PredictionMetrics {
    pub predictions_total: IntCounterVec,
    pub risk_category_total: IntCounterVec,
    pub prediction_duration_seconds: Histogram,
    pub model_loaded: IntGauge,

    registry: Arc<Registry>,
}

impl PredictionMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let predictions_total = register_int_counter_vec_with_registry!(
            "cardio_predictions_total",
            "Total number of prediction requests by outcome",
            &["outcome"],
            registry
        )?;

        let risk_category_total = register_int_counter_vec_with_registry!(
            "cardio_risk_category_total",
            "Successful predictions by risk category",
            &["category"],
            registry
        )?;

        let prediction_duration_seconds = register_histogram_with_registry!(
            "cardio_prediction_duration_seconds",
            "Time spent assembling, scoring and post-processing one prediction",
            vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1],
            registry
        )?;

        let model_loaded = register_int_gauge_with_registry!(
            "cardio_model_loaded",
            "Whether the model artifacts loaded at startup (1) or not (0)",
            registry
        )?;

        Ok(Self {
            predictions_total,
            risk_category_total,
            prediction_duration_seconds,
            model_loaded,
            registry: Arc::new(registry),
        })
    }

    pub fn set_model_loaded(&self, loaded: bool) {
        self.model_loaded.set(i64::from(loaded));
    }

    pub fn record_success(&self, category: RiskCategory, seconds: f64) {
        self.predictions_total
            .with_label_values(&[OUTCOME_SUCCESS])
            .inc();
        self.risk_category_total
            .with_label_values(&[category.key()])
            .inc();
        self.prediction_duration_seconds.observe(seconds);
    }

    pub fn record_failure(&self, outcome: &str) {
        self.predictions_total.with_label_values(&[outcome]).inc();
    }

    /// Text exposition format
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| prometheus::Error::Msg(format!("metrics are not UTF-8: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_contains_registered_metrics() {
        let metrics = PredictionMetrics::new().unwrap();
        metrics.set_model_loaded(true);
        metrics.record_success(RiskCategory::High, 0.002);
        metrics.record_failure(OUTCOME_REJECTED);

        let output = metrics.export().unwrap();
        assert!(output.contains("cardio_model_loaded 1"));
        assert!(output.contains("cardio_predictions_total{outcome=\"success\"} 1"));
        assert!(output.contains("cardio_predictions_total{outcome=\"rejected\"} 1"));
        assert!(output.contains("cardio_risk_category_total{category=\"high\"} 1"));
        assert!(output.contains("cardio_prediction_duration_seconds_count 1"));
    }

    #[test]
    fn test_registries_are_independent() {
        let a = PredictionMetrics::new().unwrap();
        let b = PredictionMetrics::new().unwrap();
        a.record_failure(OUTCOME_UNAVAILABLE);
        assert!(!b.export().unwrap().contains("unavailable"));
    }
}
