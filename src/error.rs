//! Outcomes of record operations that are not plain success.
//!
//! Validation failures and rule violations are expected, user-visible
//! results; only `Database` indicates something actually went wrong.

use chrono::NaiveDate;
use thiserror::Error;

use crate::db::DatabaseError;
use crate::forms::FieldErrors;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Form validation failed: {0}")]
    Validation(FieldErrors),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error(
        "Patient {patient_id} already has an appointment with doctor {doctor_id} on {date}"
    )]
    DuplicateAppointment {
        patient_id: i64,
        doctor_id: i64,
        date: NaiveDate,
    },

    #[error("Doctor {doctor_id} has {count} appointment(s) on file")]
    DoctorHasAppointments { doctor_id: i64, count: i64 },

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl RecordError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        RecordError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

impl From<FieldErrors> for RecordError {
    fn from(errors: FieldErrors) -> Self {
        RecordError::Validation(errors)
    }
}

impl From<rusqlite::Error> for RecordError {
    fn from(err: rusqlite::Error) -> Self {
        RecordError::Database(err.into())
    }
}
