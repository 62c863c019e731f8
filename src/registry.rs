//! Patient and doctor records: registration, edits, lookups and removal.
//!
//! Discharging a patient is never blocked and takes the patient's
//! appointments with it. Deleting a doctor is refused while any
//! appointment still references them.

use rusqlite::Connection;

use crate::db;
use crate::error::RecordError;
use crate::models::*;

// ─── Patients ─────────────────────────────────────────────────────────────────

pub fn register_patient(conn: &Connection, new_patient: &NewPatient) -> Result<Patient, RecordError> {
    let id = db::insert_patient(conn, new_patient)?;
    tracing::info!(patient_id = id, "Patient registered");
    Ok(Patient {
        id,
        name: new_patient.name.clone(),
        age: new_patient.age,
        contact: new_patient.contact.clone(),
        address: new_patient.address.clone(),
    })
}

pub fn get_patient(conn: &Connection, id: i64) -> Result<Patient, RecordError> {
    db::get_patient(conn, id)?.ok_or_else(|| RecordError::not_found("Patient", id))
}

pub fn list_patients(conn: &Connection) -> Result<Vec<Patient>, RecordError> {
    Ok(db::get_all_patients(conn)?)
}

/// Looks up a patient from a raw search parameter. An id that does not
/// parse can never match a record, so it is reported as not found.
pub fn search_patient(conn: &Connection, raw_id: &str) -> Result<Patient, RecordError> {
    let raw_id = raw_id.trim();
    let id = raw_id
        .parse::<i64>()
        .map_err(|_| RecordError::not_found("Patient", raw_id))?;
    get_patient(conn, id)
}

pub fn update_patient(
    conn: &Connection,
    id: i64,
    changes: &NewPatient,
) -> Result<Patient, RecordError> {
    if !db::update_patient(conn, id, changes)? {
        return Err(RecordError::not_found("Patient", id));
    }
    tracing::info!(patient_id = id, "Patient details updated");
    get_patient(conn, id)
}

/// Removes the patient and, through the storage cascade, their appointments.
pub fn discharge_patient(conn: &Connection, id: i64) -> Result<(), RecordError> {
    if !db::delete_patient(conn, id)? {
        return Err(RecordError::not_found("Patient", id));
    }
    tracing::info!(patient_id = id, "Patient discharged");
    Ok(())
}

// ─── Doctors ──────────────────────────────────────────────────────────────────

pub fn add_doctor(conn: &Connection, new_doctor: &NewDoctor) -> Result<Doctor, RecordError> {
    let id = db::insert_doctor(conn, new_doctor)?;
    tracing::info!(doctor_id = id, "Doctor added");
    Ok(Doctor {
        id,
        name: new_doctor.name.clone(),
        specialization: new_doctor.specialization.clone(),
        contact: new_doctor.contact.clone(),
    })
}

pub fn get_doctor(conn: &Connection, id: i64) -> Result<Doctor, RecordError> {
    db::get_doctor(conn, id)?.ok_or_else(|| RecordError::not_found("Doctor", id))
}

pub fn list_doctors(conn: &Connection) -> Result<Vec<Doctor>, RecordError> {
    Ok(db::get_all_doctors(conn)?)
}

pub fn search_doctor(conn: &Connection, raw_id: &str) -> Result<Doctor, RecordError> {
    let raw_id = raw_id.trim();
    let id = raw_id
        .parse::<i64>()
        .map_err(|_| RecordError::not_found("Doctor", raw_id))?;
    get_doctor(conn, id)
}

pub fn update_doctor(conn: &Connection, id: i64, changes: &NewDoctor) -> Result<Doctor, RecordError> {
    if !db::update_doctor(conn, id, changes)? {
        return Err(RecordError::not_found("Doctor", id));
    }
    tracing::info!(doctor_id = id, "Doctor details updated");
    get_doctor(conn, id)
}

/// Deletes a doctor with no appointments on file. With one or more
/// referencing appointments the record is left untouched.
pub fn delete_doctor(conn: &Connection, id: i64) -> Result<(), RecordError> {
    let doctor = get_doctor(conn, id)?;

    let count = db::count_appointments_for_doctor(conn, doctor.id)?;
    if count > 0 {
        tracing::warn!(doctor_id = id, count, "Refusing to delete doctor with appointments");
        return Err(RecordError::DoctorHasAppointments { doctor_id: id, count });
    }

    match db::delete_doctor(conn, id) {
        Ok(_) => {
            tracing::info!(doctor_id = id, "Doctor deleted");
            Ok(())
        }
        Err(e) if e.is_foreign_key_violation() => {
            let count = db::count_appointments_for_doctor(conn, id)?;
            Err(RecordError::DoctorHasAppointments { doctor_id: id, count })
        }
        Err(e) => Err(e.into()),
    }
}

// ─── Summary ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RecordCounts {
    pub patients: i64,
    pub doctors: i64,
    pub appointments: i64,
}

pub fn record_counts(conn: &Connection) -> Result<RecordCounts, RecordError> {
    Ok(RecordCounts {
        patients: db::count_patients(conn)?,
        doctors: db::count_doctors(conn)?,
        appointments: db::count_appointments(conn)?,
    })
}
