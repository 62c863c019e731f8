//! API error types with structured JSON responses.

use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::api::types::Flash;
use crate::core_state::CoreError;
use crate::error::RecordError;
use crate::forms::FieldErrors;

pub const DUPLICATE_APPOINTMENT_MESSAGE: &str =
    "This patient already has an appointment with this doctor on the selected date.";
pub const DOCTOR_IN_USE_MESSAGE: &str = "Cannot delete doctor with scheduled appointments!";

/// Structured error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
    /// Present for user-facing warnings (not-found, rule refusals).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
    #[error("Not found: {0}")]
    NotFound(String),
    /// Business-rule refusal: a warning for the user, not a failure.
    #[error("{message}")]
    Rejected { code: &'static str, message: String },
    /// The request could not be read as a form or query string at all.
    #[error("Malformed request: {message}")]
    Malformed { status: StatusCode, message: String },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, fields) = match self {
            ApiError::Validation(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_FAILED",
                "Please correct the highlighted fields".to_string(),
                Some(fields),
            ),
            ApiError::NotFound(detail) => (StatusCode::NOT_FOUND, "NOT_FOUND", detail, None),
            ApiError::Rejected { code, message } => (StatusCode::CONFLICT, code, message, None),
            ApiError::Malformed { status, message } => (status, "MALFORMED_REQUEST", message, None),
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let flash = (status == StatusCode::NOT_FOUND || status == StatusCode::CONFLICT)
            .then(|| Flash::danger(message.clone()));

        let body = ErrorBody {
            error: ErrorDetail {
                code,
                message,
                fields,
            },
            flash,
        };

        (status, Json(body)).into_response()
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::Validation(fields) => ApiError::Validation(fields),
            RecordError::NotFound { entity, .. } => ApiError::NotFound(format!("{entity} not found!")),
            RecordError::DuplicateAppointment { .. } => ApiError::Rejected {
                code: "DUPLICATE_APPOINTMENT",
                message: DUPLICATE_APPOINTMENT_MESSAGE.into(),
            },
            RecordError::DoctorHasAppointments { .. } => ApiError::Rejected {
                code: "DOCTOR_HAS_APPOINTMENTS",
                message: DOCTOR_IN_USE_MESSAGE.into(),
            },
            RecordError::Database(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(fields: FieldErrors) -> Self {
        ApiError::Validation(fields)
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::Malformed {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Malformed {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::LockPoisoned => ApiError::Internal("lock poisoned".into()),
            CoreError::Database(e) => ApiError::Internal(e.to_string()),
        }
    }
}
