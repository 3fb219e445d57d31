//! Service middleware and metric helpers.
//!
//! ## Metrics Exposed (as structured logs on target `kit_optima::metrics`)
//!
//! - `request` - path, method, status and latency per request
//! - `optimization` - emitted by the optimizer for every run
//! - `cleaning` - row counts per cleaning run

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::info;

/// Metrics middleware that records request counts and latency.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status().as_u16();

    info!(
        target: "kit_optima::metrics",
        metric_type = "request",
        path = %path,
        method = %method,
        status = status,
        latency_ms = latency.as_millis() as u64,
        "request_metric"
    );

    response
}

/// Record cleaning run metrics.
pub fn record_cleaning_metrics(total_rows: usize, dropped_rows: usize, latency_ms: u64) {
    info!(
        target: "kit_optima::metrics",
        metric_type = "cleaning",
        total_rows = total_rows,
        dropped_rows = dropped_rows,
        latency_ms = latency_ms,
        "cleaning_metric"
    );
}
