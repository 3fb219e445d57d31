//! Axum routes for the Kit Optima service.

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::boq::{clean_boq, CleanedBoq, RawBoqRow};
use crate::optimizer::OptimizeError;
use crate::types::{OptimizationReport, ScheduleItem};
use crate::SERVICE_NAME;

use super::middleware::record_cleaning_metrics;
use super::state::ServiceState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to optimize a BoQ schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationRequest {
    /// Scheduled items.
    pub items: Vec<ScheduleItem>,
}

/// Request to clean raw BoQ rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanRequest {
    /// Raw rows.
    pub rows: Vec<RawBoqRow>,
}

/// Service health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub mode: String,
    /// Number of configured material overrides.
    pub materials: usize,
    pub wear_limits_fingerprint: String,
}

/// Structured error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
    /// Machine-readable error code.
    pub code: String,
    /// Offending element, when the error concerns one item.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_id: Option<String>,
    /// Additional error details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response with code and message.
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            element_id: None,
            details: None,
        }
    }

    /// Attach the offending element id.
    pub fn with_element_id(mut self, element_id: impl Into<String>) -> Self {
        self.element_id = Some(element_id.into());
        self
    }

    /// Add details to the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Handler error: status plus JSON body.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, body: ErrorResponse) -> ApiError {
    tracing::warn!(
        status = status.as_u16(),
        code = %body.code,
        error = %body.error,
        element_id = ?body.element_id,
        "Request error"
    );
    (status, Json(body))
}

fn malformed_payload(rejection: JsonRejection) -> ApiError {
    api_error(
        StatusCode::BAD_REQUEST,
        ErrorResponse::new(
            "MALFORMED_INPUT",
            "Cannot parse JSON payload. Check your data formatting.",
        )
        .with_details(rejection.body_text()),
    )
}

/// Map an optimizer error to its HTTP status.
pub fn optimize_error_status(error: &OptimizeError) -> StatusCode {
    match error {
        OptimizeError::EmptyInput => StatusCode::BAD_REQUEST,
        OptimizeError::InvalidDate { .. } | OptimizeError::InvalidDateRange { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

fn optimize_error(error: OptimizeError) -> ApiError {
    let mut body = ErrorResponse::new(error.code(), error.to_string());
    if let Some(element_id) = error.element_id() {
        body = body.with_element_id(element_id);
    }
    api_error(optimize_error_status(&error), body)
}

fn worker_failure(error: tokio::task::JoinError) -> ApiError {
    tracing::error!(error = %error, "Optimization worker failed");
    api_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorResponse::new("OPTIMIZATION_FAILED", "Optimization worker failed"),
    )
}

// ============================================================================
// Route Handlers
// ============================================================================

/// Optimize a BoQ schedule.
///
/// The CPU-bound work runs on the blocking pool; a worker panic surfaces as
/// a 500 instead of tearing down the connection.
async fn optimize_handler(
    State(state): State<Arc<ServiceState>>,
    payload: Result<Json<OptimizationRequest>, JsonRejection>,
) -> Result<Json<OptimizationReport>, ApiError> {
    let Json(request) = payload.map_err(malformed_payload)?;

    if request.items.is_empty() {
        return Err(optimize_error(OptimizeError::EmptyInput));
    }

    let optimizer = state.optimizer.clone();
    let report = tokio::task::spawn_blocking(move || optimizer.optimize(&request.items))
        .await
        .map_err(worker_failure)?
        .map_err(optimize_error)?;

    Ok(Json(report))
}

/// Clean raw BoQ rows into optimizer-ready items.
async fn clean_handler(
    payload: Result<Json<CleanRequest>, JsonRejection>,
) -> Result<Json<CleanedBoq>, ApiError> {
    let Json(request) = payload.map_err(malformed_payload)?;
    let start = Instant::now();

    let cleaned = clean_boq(&request.rows).map_err(|e| {
        api_error(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new("EMPTY_INPUT", e.to_string()),
        )
    })?;

    record_cleaning_metrics(
        cleaned.summary.total_rows,
        cleaned.summary.dropped_rows,
        start.elapsed().as_millis() as u64,
    );

    Ok(Json(cleaned))
}

/// Health check endpoint.
async fn health_handler(State(state): State<Arc<ServiceState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        mode: "live".to_string(),
        materials: state.limits().len(),
        wear_limits_fingerprint: state.limits_fingerprint().to_string(),
    })
}

// ============================================================================
// Router Construction
// ============================================================================

/// Create the Axum router for the Kit Optima service.
pub fn create_router(state: ServiceState) -> Router {
    let state = Arc::new(state);

    Router::new()
        // Optimization
        .route("/api/optimize-kitting", post(optimize_handler))
        .route("/optimize-kitting", post(optimize_handler))
        // BoQ preparation
        .route("/api/clean-boq", post(clean_handler))
        // Health
        .route("/health", get(health_handler))
        .route("/api/health", get(health_handler))
        .with_state(state)
}
