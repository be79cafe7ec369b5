use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use service_core::error::AppError;
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub fn init_metrics() -> Result<(), AppError> {
    let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!("failed to install Prometheus recorder: {}", e))
    })?;

    if METRICS_HANDLE.set(handle).is_err() {
        return Err(AppError::ConfigError(anyhow::anyhow!(
            "metrics handle already initialized"
        )));
    }

    Ok(())
}

pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Outcome is one of `ok`, `status`, `transport`, `decode`.
pub fn record_mist_call(method: &'static str, outcome: &'static str) {
    metrics::counter!(
        "mist_api_requests_total",
        "method" => method,
        "outcome" => outcome
    )
    .increment(1);
}

/// Event is one of `saved`, `loaded`, `missing`, `cleared`.
pub fn record_context_event(event: &'static str) {
    metrics::counter!("session_context_operations_total", "event" => event).increment(1);
}

pub fn record_not_implemented(operation: &'static str) {
    metrics::counter!("not_implemented_requests_total", "operation" => operation).increment(1);
}
