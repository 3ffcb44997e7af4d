//! HTTP request handlers for the payslip engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::compute;
use crate::export::{EXPORT_FILE_NAME, to_csv};
use crate::input::sanitize;
use crate::models::WageDeclaration;

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse, CalculationResponse, PresetsResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/export", post(export_handler))
        .route("/presets", get(presets_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a calculation request and returns the calculated pay result.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let declaration = match read_declaration(payload, &state, correlation_id) {
        Ok(declaration) => declaration,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let result = compute(&declaration, state.tables());
    info!(
        correlation_id = %correlation_id,
        gross_pay = %result.totals.gross_pay,
        net_pay = %result.totals.net_pay,
        warnings = result.audit_trace.warnings.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Calculation completed successfully"
    );

    (StatusCode::OK, Json(CalculationResponse::new(result))).into_response()
}

/// Handler for POST /export endpoint.
///
/// Runs the same calculation as `/calculate` and returns it as CSV.
async fn export_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing export request");

    let declaration = match read_declaration(payload, &state, correlation_id) {
        Ok(declaration) => declaration,
        Err(response) => return response,
    };

    let result = compute(&declaration, state.tables());
    match to_csv(&result, Utc::now()) {
        Ok(csv) => {
            info!(correlation_id = %correlation_id, bytes = csv.len(), "Export completed");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
                    ),
                ],
                csv,
            )
                .into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Export failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /presets endpoint.
///
/// Returns the configured flat-rate presets, input defaults and limits.
async fn presets_handler(State(state): State<AppState>) -> Json<PresetsResponse> {
    Json(PresetsResponse::from(state.tables()))
}

/// Turns a JSON payload into a sanitized declaration, or an error response.
fn read_declaration(
    payload: Result<Json<CalculationRequest>, JsonRejection>,
    state: &AppState,
    correlation_id: Uuid,
) -> Result<WageDeclaration, Response> {
    match payload {
        Ok(Json(request)) => Ok(sanitize(request.into(), state.tables())),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(ApiErrorResponse::bad_request(error).into_response())
        }
    }
}
