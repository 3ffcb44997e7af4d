//! Response types for the payslip engine API.
//!
//! This module defines the success bodies and the error response structures
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{FlatRatePreset, InputDefaults, InputLimits, TaxTables};
use crate::error::EngineError;
use crate::models::PayResult;

/// Response body for the `/calculate` endpoint.
///
/// Wraps the deterministic [`PayResult`] with per-request identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// The calculation result.
    pub result: PayResult,
}

impl CalculationResponse {
    /// Wraps a result with a fresh id and the current time.
    pub fn new(result: PayResult) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            result,
        }
    }
}

/// Response body for the `/presets` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresetsResponse {
    /// Flat-rate presets.
    pub presets: Vec<FlatRatePreset>,
    /// Input defaults.
    pub defaults: InputDefaults,
    /// Input limits.
    pub limits: InputLimits,
    /// Legacy overtime surtax rate.
    pub overtime_surtax_rate: Decimal,
}

impl From<&TaxTables> for PresetsResponse {
    fn from(tables: &TaxTables) -> Self {
        Self {
            presets: tables.presets().to_vec(),
            defaults: tables.defaults().clone(),
            limits: tables.limits().clone(),
            overtime_surtax_rate: tables.overtime_surtax_rate(),
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response with the given body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfig { field, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Invalid configuration",
                    format!("{}: {}", field, message),
                ),
            },
            EngineError::PresetNotFound { id } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "PRESET_NOT_FOUND",
                    format!("Tax preset not found: {}", id),
                    format!("The preset id '{}' is not configured", id),
                ),
            ),
            EngineError::SettingsError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "SETTINGS_ERROR",
                    "Settings could not be read or written",
                    format!("{}: {}", path, message),
                ),
            },
            EngineError::ExportError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("EXPORT_ERROR", "Export failed", message),
            },
        }
    }
}
