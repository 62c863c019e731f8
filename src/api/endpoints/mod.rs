//! Endpoint handlers, one module per record kind.
//!
//! Handlers validate the submitted form first, then take the store lock
//! for the synchronous record operation and build the response.

pub mod appointments;
pub mod doctors;
pub mod home;
pub mod patients;

use axum::http::Uri;

use crate::api::error::ApiError;

/// Parse a record id from a path segment. Anything that is not an integer
/// cannot name a record, so it is a not-found rather than a bad request.
pub(crate) fn parse_id(raw: &str, entity: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ApiError::NotFound(format!("{entity} not found!")))
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No page at {}", uri.path()))
}
