//! Prometheus metrics for quiz-service.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Later calls are no-ops.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
        }
        Err(e) => tracing::warn!(error = %e, "Prometheus recorder not installed"),
    }
}

/// Get metrics output in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Count a finished quiz request by outcome (`success` or an error kind).
pub fn record_generation(outcome: &'static str) {
    counter!("quiz_generations_total", "outcome" => outcome).increment(1);
}

/// Record provider latency.
pub fn record_provider_latency(provider: &'static str, model: &str, duration_secs: f64) {
    histogram!(
        "quiz_provider_latency_seconds",
        "provider" => provider,
        "model" => model.to_string()
    )
    .record(duration_secs);
}
