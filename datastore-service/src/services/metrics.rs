//! Prometheus metrics export.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::{Once, OnceLock};

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
static INIT: Once = Once::new();

/// Install the global Prometheus recorder. Later calls are no-ops, so test
/// binaries that spawn several applications in one process can call this
/// freely.
pub fn init_metrics() {
    INIT.call_once(|| {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .expect("failed to install Prometheus recorder");
        let _ = METRICS_HANDLE.set(handle);
    });
}

/// Render the recorded metrics in Prometheus text format for /metrics.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized".to_string())
}
