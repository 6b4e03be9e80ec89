//! Prometheus metrics handler
//!
//! `GET /metrics` renders the process-wide recorder in Prometheus text format.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use metrics::{describe_counter, describe_histogram, Unit};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// Register help text for every metric the service emits.
///
/// Call once after the recorder is installed.
pub fn describe_metrics() {
    describe_counter!("http_requests_total", "HTTP requests by method, route and status");
    describe_histogram!(
        "http_request_duration_seconds",
        Unit::Seconds,
        "HTTP request latency by method and route"
    );
    describe_counter!("favorite_toggles_total", "Favorite toggles by direction (added/removed)");
    describe_counter!(
        "membership_gate_redirects_total",
        "Requests sent to /settings by the paid-member gate"
    );
    describe_counter!(
        "billing_checkout_sessions_total",
        "Checkout sessions requested from the billing provider, by result"
    );
    describe_counter!(
        "billing_confirmations_total",
        "Checkout confirmations by outcome"
    );
}

/// `GET /metrics` (no auth)
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        state.handle.render(),
    )
}
