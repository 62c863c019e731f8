//! Index endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::registry::{self, RecordCounts};

#[derive(Serialize)]
pub struct IndexResponse {
    pub app: &'static str,
    pub version: &'static str,
    pub counts: RecordCounts,
}

/// `GET /`: application name, version and record counts.
pub async fn index(State(ctx): State<ApiContext>) -> Result<Json<IndexResponse>, ApiError> {
    let conn = ctx.core.lock_db()?;
    let counts = registry::record_counts(&conn)?;

    Ok(Json(IndexResponse {
        app: crate::config::APP_NAME,
        version: crate::config::APP_VERSION,
        counts,
    }))
}
