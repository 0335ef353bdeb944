//! # Error Handling Middleware
//!
//! Maps planner errors to HTTP status codes and JSON error bodies so every
//! handler reports failures the same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use planner_core::errors::PlannerError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps `PlannerError` and implements `IntoResponse`, producing
/// `{"error": "<message>"}` with a status matching the error kind.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use planner_api::middleware::error_handling::AppError;
/// use planner_core::{errors::PlannerError, models::WeekKey};
///
/// async fn handler(raw: String) -> Result<Json<WeekKey>, AppError> {
///     let week_key: WeekKey = raw.parse()?;
///     Ok(Json(week_key))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub PlannerError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            PlannerError::Validation(_) => StatusCode::BAD_REQUEST,
            PlannerError::MissingReferenceData(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PlannerError::InvalidSelection(_) => StatusCode::BAD_REQUEST,
            PlannerError::InsufficientSlots { .. } => StatusCode::CONFLICT,
            PlannerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {:#}", self.0);
        }

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

/// Allows `?` on `PlannerResult` inside handlers
impl From<PlannerError> for AppError {
    fn from(err: PlannerError) -> Self {
        AppError(err)
    }
}

/// Storage failures surface as `PlannerError::Storage`
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(PlannerError::Storage(err))
    }
}
