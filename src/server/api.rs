//! Prediction HTTP API.
//!
//! Routes:
//! - POST /predict
//! - GET /health
//! - GET /metrics
//! - everything else: static front-end, with `index.html` as the SPA fallback

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::header::{self, HeaderValue, InvalidHeaderValue};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::applicant::ApplicantRecord;
use crate::config::Config;
use crate::metrics::{outcome, Metrics};
use crate::model::{LoanDecision, ModelInfo};
use crate::service::{PredictError, PredictionService};

pub const MISSING_INPUT_MESSAGE: &str = "Missing input data";

/// Application state shared across handlers.
pub struct AppState {
    pub service: PredictionService,
    pub config: Arc<Config>,
    pub metrics: Metrics,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(service: PredictionService, config: Arc<Config>) -> prometheus::Result<Self> {
        Ok(Self {
            service,
            config,
            metrics: Metrics::new()?,
            start_time: Instant::now(),
        })
    }
}

/// Build the axum router with the API routes, CORS, tracing and the static
/// front-end.
pub fn build_router(state: Arc<AppState>) -> Result<Router, InvalidHeaderValue> {
    let cors = cors_layer(&state.config.server.allowed_origin)?;
    let frontend = frontend_service(&state.config.server.static_dir);

    Ok(Router::new()
        .route("/predict", post(predict))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .fallback_service(frontend)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

fn cors_layer(origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    Ok(CorsLayer::new()
        .allow_origin(HeaderValue::from_str(origin)?)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]))
}

/// Static files from `dir`; unknown paths get `index.html` with a 200 so
/// client-side routes survive a reload.
fn frontend_service(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}

// ─── Request/Response Types ────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
    pub model: ModelInfo,
}

/// A per-request failure, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    fn missing_input() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: MISSING_INPUT_MESSAGE.to_string(),
        }
    }

    /// Validation failures are 500 unless strict client errors are enabled.
    fn from_predict(err: &PredictError, strict_client_errors: bool) -> Self {
        let status = match err {
            PredictError::InvalidInput(_) if strict_client_errors => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

// ─── Route Handlers ────────────────────────────────────────────────────────

/// Parse the body into a record. `None` means there is nothing usable: an
/// empty body, invalid JSON, a non-object, or an object without fields.
fn parse_record(request_id: &str, body: &[u8]) -> Option<ApplicantRecord> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    info!(request_id, payload = %value, "Received prediction request");

    match value.as_object() {
        Some(fields) if !fields.is_empty() => serde_json::from_value(value).ok(),
        _ => None,
    }
}

async fn predict(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PredictResponse>, ApiError> {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let Some(record) = parse_record(&request_id, &body) else {
        warn!(request_id, body_bytes = body.len(), "Missing input data");
        state
            .metrics
            .record(outcome::MISSING_INPUT, start.elapsed().as_secs_f64());
        return Err(ApiError::missing_input());
    };

    match state.service.predict(&record) {
        Ok(decision) => {
            let label = match decision {
                LoanDecision::Approved => outcome::APPROVED,
                LoanDecision::Rejected => outcome::REJECTED,
            };
            state.metrics.record(label, start.elapsed().as_secs_f64());
            info!(request_id, decision = decision.as_str(), "Prediction complete");
            Ok(Json(PredictResponse {
                prediction: decision.label(),
            }))
        }
        Err(e) => {
            let label = match e {
                PredictError::InvalidInput(_) => outcome::INVALID_INPUT,
                PredictError::Model(_) => outcome::MODEL_ERROR,
            };
            state.metrics.record(label, start.elapsed().as_secs_f64());
            error!(request_id, error = %e, "Prediction error");
            Err(ApiError::from_predict(
                &e,
                state.config.server.strict_client_errors,
            ))
        }
    }
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        model: state.service.model_info(),
    })
}

async fn metrics(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, StatusCode> {
    let body = state.metrics.render().map_err(|e| {
        error!("Failed to render metrics: {e}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body))
}
