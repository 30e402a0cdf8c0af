//! Prometheus metrics for the prediction endpoint.

use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Outcome label values for `loan_predictions_total`.
pub mod outcome {
    pub const APPROVED: &str = "approved";
    pub const REJECTED: &str = "rejected";
    pub const MISSING_INPUT: &str = "missing_input";
    pub const INVALID_INPUT: &str = "invalid_input";
    pub const MODEL_ERROR: &str = "model_error";
}

/// Per-application metric set. Each router gets its own registry so tests
/// can build several apps in one process.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    predictions: IntCounterVec,
    latency: Histogram,
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let predictions = IntCounterVec::new(
            Opts::new("loan_predictions_total", "Prediction requests by outcome"),
            &["outcome"],
        )?;
        let latency = Histogram::with_opts(
            HistogramOpts::new(
                "loan_prediction_duration_seconds",
                "Time spent handling /predict",
            )
            .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1]),
        )?;

        registry.register(Box::new(predictions.clone()))?;
        registry.register(Box::new(latency.clone()))?;

        Ok(Self {
            registry,
            predictions,
            latency,
        })
    }

    pub fn record(&self, outcome: &str, elapsed_secs: f64) {
        self.predictions.with_label_values(&[outcome]).inc();
        self.latency.observe(elapsed_secs);
    }

    pub fn count(&self, outcome: &str) -> u64 {
        self.predictions.with_label_values(&[outcome]).get()
    }

    /// Render all metrics in the Prometheus text format.
    pub fn render(&self) -> prometheus::Result<String> {
        let mut buf = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buf)?;
        String::from_utf8(buf).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_render() {
        let metrics = Metrics::new().unwrap();
        metrics.record(outcome::APPROVED, 0.001);
        metrics.record(outcome::APPROVED, 0.002);
        metrics.record(outcome::INVALID_INPUT, 0.0005);

        assert_eq!(metrics.count(outcome::APPROVED), 2);
        assert_eq!(metrics.count(outcome::REJECTED), 0);

        let text = metrics.render().unwrap();
        assert!(text.contains("loan_predictions_total{outcome=\"approved\"} 2"));
        assert!(text.contains("loan_prediction_duration_seconds_count 3"));
    }
}
