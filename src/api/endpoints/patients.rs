//! Patient endpoints.
//!
//! - `GET /patients`: all registered patients
//! - `POST /patients`: register a patient
//! - `GET /patients/search?id=`: look a patient up by id
//! - `GET /patients/:id`: one patient (edit form data)
//! - `POST /patients/:id`: update a patient
//! - `POST /patients/:id/discharge`: discharge (delete) a patient

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::endpoints::parse_id;
use crate::api::error::ApiError;
use crate::api::types::{ApiContext, ApiForm, ApiQuery, Flash, SeeOther};
use crate::forms::PatientForm;
use crate::models::Patient;
use crate::registry;

#[derive(Serialize)]
pub struct PatientsResponse {
    pub patients: Vec<Patient>,
}

#[derive(Serialize)]
pub struct PatientResponse {
    pub patient: Patient,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub id: Option<String>,
}

/// `GET /patients`
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<PatientsResponse>, ApiError> {
    let conn = ctx.core.lock_db()?;
    let patients = registry::list_patients(&conn)?;
    Ok(Json(PatientsResponse { patients }))
}

/// `POST /patients`
pub async fn register(
    State(ctx): State<ApiContext>,
    ApiForm(form): ApiForm<PatientForm>,
) -> Result<SeeOther, ApiError> {
    let new_patient = form.validate()?;
    let conn = ctx.core.lock_db()?;
    let patient = registry::register_patient(&conn, &new_patient)?;

    Ok(SeeOther::to("/")
        .with_flash(Flash::success("Patient Registered Successfully!"))
        .with_id(patient.id))
}

/// `GET /patients/search?id=`. A one-element list when found. Without an
/// id there is nothing to search for and the client is sent home.
pub async fn search(
    State(ctx): State<ApiContext>,
    ApiQuery(query): ApiQuery<SearchQuery>,
) -> Result<Response, ApiError> {
    let Some(raw_id) = query.id.filter(|id| !id.trim().is_empty()) else {
        return Ok(SeeOther::to("/").into_response());
    };

    let conn = ctx.core.lock_db()?;
    let patient = registry::search_patient(&conn, &raw_id)?;
    Ok(Json(PatientsResponse {
        patients: vec![patient],
    })
    .into_response())
}

/// `GET /patients/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<PatientResponse>, ApiError> {
    let id = parse_id(&id, "Patient")?;
    let conn = ctx.core.lock_db()?;
    let patient = registry::get_patient(&conn, id)?;
    Ok(Json(PatientResponse { patient }))
}

/// `POST /patients/:id`. The record must exist before the form is judged,
/// so an unknown id is a 404 even when the submission is also invalid.
pub async fn update(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    ApiForm(form): ApiForm<PatientForm>,
) -> Result<SeeOther, ApiError> {
    let id = parse_id(&id, "Patient")?;
    let conn = ctx.core.lock_db()?;
    registry::get_patient(&conn, id)?;

    let changes = form.validate()?;
    let patient = registry::update_patient(&conn, id, &changes)?;

    Ok(SeeOther::to("/")
        .with_flash(Flash::success("Patient details updated successfully!"))
        .with_id(patient.id))
}

/// `POST /patients/:id/discharge`
pub async fn discharge(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<SeeOther, ApiError> {
    let id = parse_id(&id, "Patient")?;
    let conn = ctx.core.lock_db()?;
    registry::discharge_patient(&conn, id)?;

    Ok(SeeOther::to("/").with_flash(Flash::success("Patient successfully discharged.")))
}
