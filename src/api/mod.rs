//! HTTP API module for the payslip engine.
//!
//! This module provides the REST API endpoints for estimating net pay and
//! exporting the result as CSV.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, DeductionRequest, ReimbursementRequest};
pub use response::{ApiError, ApiErrorResponse, CalculationResponse, PresetsResponse};
pub use state::AppState;
