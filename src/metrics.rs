//! Prometheus counters for the analysis endpoints.
//!
//! The `metrics` macros are no-ops until a recorder is installed, so the
//! library and tests can record freely; only the binary calls [`Metrics::init`].

use axum::{routing::get, Router};
use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub const REQUESTS_TOTAL: &str = "text_insight_requests_total";
pub const FAILURES_TOTAL: &str = "text_insight_failures_total";

#[derive(Clone)]
pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global Prometheus recorder. Fails if one is already installed.
    pub fn init() -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .map_err(|e| anyhow::anyhow!("prometheus: install recorder: {e}"))?;
        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

pub fn record_request(endpoint: &'static str) {
    counter!(REQUESTS_TOTAL, "endpoint" => endpoint).increment(1);
}

pub fn record_failure(endpoint: &'static str) {
    counter!(FAILURES_TOTAL, "endpoint" => endpoint).increment(1);
}
