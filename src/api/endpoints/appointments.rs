//! Appointment endpoints.
//!
//! - `GET /appointments`: scheduled appointments with names
//! - `POST /appointments`: schedule
//! - `GET /appointments/new`: selectable patients and doctors
//! - `GET /appointments/:id`: one appointment plus the selectable choices
//! - `POST /appointments/:id`: reschedule
//! - `POST /appointments/:id/discharge`: cancel

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::api::endpoints::parse_id;
use crate::api::error::ApiError;
use crate::api::types::{ApiContext, ApiForm, Flash, SeeOther};
use crate::forms::AppointmentForm;
use crate::models::{Appointment, AppointmentDetail};
use crate::scheduling::{self, AppointmentChoices};

#[derive(Serialize)]
pub struct AppointmentsResponse {
    pub appointments: Vec<AppointmentDetail>,
}

#[derive(Serialize)]
pub struct AppointmentFormResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment: Option<Appointment>,
    pub choices: AppointmentChoices,
}

/// `GET /appointments`
pub async fn list(State(ctx): State<ApiContext>) -> Result<Json<AppointmentsResponse>, ApiError> {
    let conn = ctx.core.lock_db()?;
    let appointments = scheduling::list_appointments(&conn)?;
    Ok(Json(AppointmentsResponse { appointments }))
}

/// `GET /appointments/new`
pub async fn choices(
    State(ctx): State<ApiContext>,
) -> Result<Json<AppointmentFormResponse>, ApiError> {
    let conn = ctx.core.lock_db()?;
    let choices = scheduling::appointment_choices(&conn)?;
    Ok(Json(AppointmentFormResponse {
        appointment: None,
        choices,
    }))
}

/// `POST /appointments`
pub async fn schedule(
    State(ctx): State<ApiContext>,
    ApiForm(form): ApiForm<AppointmentForm>,
) -> Result<SeeOther, ApiError> {
    let request = form.validate()?;
    let conn = ctx.core.lock_db()?;
    let appointment = scheduling::schedule(&conn, &request)?;

    Ok(SeeOther::to("/")
        .with_flash(Flash::success("Appointment Scheduled Successfully!"))
        .with_id(appointment.id))
}

/// `GET /appointments/:id`
pub async fn detail(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<Json<AppointmentFormResponse>, ApiError> {
    let id = parse_id(&id, "Appointment")?;
    let conn = ctx.core.lock_db()?;
    let appointment = scheduling::get_appointment(&conn, id)?;
    let choices = scheduling::appointment_choices(&conn)?;
    Ok(Json(AppointmentFormResponse {
        appointment: Some(appointment),
        choices,
    }))
}

/// `POST /appointments/:id`
pub async fn reschedule(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
    ApiForm(form): ApiForm<AppointmentForm>,
) -> Result<SeeOther, ApiError> {
    let id = parse_id(&id, "Appointment")?;
    let conn = ctx.core.lock_db()?;
    scheduling::get_appointment(&conn, id)?;

    let request = form.validate()?;
    let appointment = scheduling::reschedule(&conn, id, &request)?;

    Ok(SeeOther::to("/appointments")
        .with_flash(Flash::success("Appointment updated successfully!"))
        .with_id(appointment.id))
}

/// `POST /appointments/:id/discharge`
pub async fn cancel(
    State(ctx): State<ApiContext>,
    Path(id): Path<String>,
) -> Result<SeeOther, ApiError> {
    let id = parse_id(&id, "Appointment")?;
    let conn = ctx.core.lock_db()?;
    scheduling::cancel(&conn, id)?;

    Ok(SeeOther::to("/appointments")
        .with_flash(Flash::success("Appointment discharged successfully!")))
}
