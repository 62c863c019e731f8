//! Doctor endpoints.
//!
//! - `GET /doctors`, `POST /doctors`
//! - `GET /doctors/search?id=`
//! - `GET /doctors/:id`, `POST /doctors/:id`
//! - `POST /doctors/:id/delete`: refused while appointments reference the doctor

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::endpoints::parse_id;
use crate::api::error::ApiError;
use crate::api::types::{ApiContext, ApiForm, ApiQuery, Flash, SeeOther};
use crate::forms::DoctorForm;
use crate::models::Doctor;
use crate::registry;

#[derive(Serialize)]
pub struct DoctorsResponse {
    pub doctors: Vec<Doctor>,
}

#[derive(Serialize)]
pub struct DoctorResponse {
    pub doctor: Doctor,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub id: Option<String>,
}

/// `GET /doctors`
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<DoctorsResponse>, ApiError> {
    let conn = ctx.core.lock_db()?;
    let doctors = registry::list_doctors(&conn)?;
    Ok(Json(DoctorsResponse { doctors }))
}

/// `POST /doctors`
pub async fn add(
    State(ctx): State<ApiContext>,
    ApiForm(form): ApiForm<DoctorForm>,
) -> Result<SeeOther, ApiError> {
    let new_doctor = form.validate()?;
    let conn = ctx.core.lock_db()?;
    let doctor = registry::add_doctor(&conn, &new_doctor)?;

    Ok(SeeOther::to("/doctors")
        .with_flash(Flash::success("Doctor added successfully!"))
        .with_id(doctor.id))
}

/// `GET /doctors/search?id=`
pub async fn search(
    State(ctx): State<ApiContext>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Response, ApiError> {
    let Some(raw_id) = query.id.filter(|id| !id.trim().is_empty()) else {
        return Ok(SeeOther::to("/doctors").into_response());
    };

    let conn = ctx.core.lock_db()?;
    let doctor = registry::search_doctor(&conn, &raw_id)?;
    Ok(Json(DoctorsResponse {
        doctors: vec![doctor],
    })
    .into_response())
}

/// `GET /doctors/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<DoctorResponse>, ApiError> {
    let id = parse_id(&id, "Doctor")?;
    let conn = ctx.core.lock_db()?;
    let doctor = registry::get_doctor(&conn, id)?;
    Ok(Json(DoctorResponse { doctor }))
}

/// `POST /doctors/:id`
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    ApiForm(form): ApiForm<DoctorForm>,
) -> Result<SeeOther, ApiError> {
    let id = parse_id(&id, "Doctor")?;
    let conn = ctx.core.lock_db()?;
    registry::get_doctor(&conn, id)?;

    let changes = form.validate()?;
    let doctor = registry::update_doctor(&conn, id, &changes)?;

    Ok(SeeOther::to("/doctors")
        .with_flash(Flash::success("Doctor details updated successfully!"))
        .with_id(doctor.id))
}

/// `POST /doctors/:id/delete`
pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<SeeOther, ApiError> {
    let id = parse_id(&id, "Doctor")?;
    let conn = ctx.core.lock_db()?;
    registry::delete_doctor(&conn, id)?;

    Ok(SeeOther::to("/doctors").with_flash(Flash::success("Doctor deleted successfully!")))
}
