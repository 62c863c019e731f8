//! Appointment scheduling rules.
//!
//! A (patient, doctor, date) tuple identifies at most one appointment.
//! The rule is checked before writing on both schedule and reschedule, and
//! the unique index on `appointments` backs it at storage level.

use rusqlite::Connection;

use crate::db::{self, DatabaseError};
use crate::error::RecordError;
use crate::forms::{FieldErrors, INVALID_CHOICE};
use crate::models::*;

/// Patients and doctors selectable on the appointment form.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AppointmentChoices {
    pub patients: Vec<Choice>,
    pub doctors: Vec<Choice>,
}

pub fn appointment_choices(conn: &Connection) -> Result<AppointmentChoices, RecordError> {
    Ok(AppointmentChoices {
        patients: db::patient_choices(conn)?,
        doctors: db::doctor_choices(conn)?,
    })
}

/// Both references must name existing records; a dangling one is reported
/// against its form field, like a value missing from a dropdown.
fn ensure_references_exist(conn: &Connection, appt: &NewAppointment) -> Result<(), RecordError> {
    let mut errors = FieldErrors::new();
    if db::get_patient(conn, appt.patient_id)?.is_none() {
        errors.add("patient_id", INVALID_CHOICE);
    }
    if db::get_doctor(conn, appt.doctor_id)?.is_none() {
        errors.add("doctor_id", INVALID_CHOICE);
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(RecordError::Validation(errors))
    }
}

fn duplicate(appt: &NewAppointment) -> RecordError {
    RecordError::DuplicateAppointment {
        patient_id: appt.patient_id,
        doctor_id: appt.doctor_id,
        date: appt.appointment_date,
    }
}

fn map_write_error(err: DatabaseError, appt: &NewAppointment) -> RecordError {
    if err.is_unique_violation() {
        duplicate(appt)
    } else {
        err.into()
    }
}

/// Books a new appointment unless the same tuple is already on file.
pub fn schedule(conn: &Connection, appt: &NewAppointment) -> Result<Appointment, RecordError> {
    ensure_references_exist(conn, appt)?;

    if let Some(existing) =
        db::find_appointment_by_tuple(conn, appt.patient_id, appt.doctor_id, appt.appointment_date)?
    {
        tracing::warn!(
            existing_id = existing.id,
            patient_id = appt.patient_id,
            doctor_id = appt.doctor_id,
            date = %appt.appointment_date,
            "Duplicate appointment rejected"
        );
        return Err(duplicate(appt));
    }

    let id = db::insert_appointment(conn, appt).map_err(|e| map_write_error(e, appt))?;
    tracing::info!(
        appointment_id = id,
        patient_id = appt.patient_id,
        doctor_id = appt.doctor_id,
        date = %appt.appointment_date,
        "Appointment scheduled"
    );

    Ok(Appointment {
        id,
        patient_id: appt.patient_id,
        doctor_id: appt.doctor_id,
        appointment_date: appt.appointment_date,
    })
}

/// Replaces patient, doctor and date of an existing appointment. Keeping
/// the appointment's own tuple is allowed; taking another one's is not.
pub fn reschedule(
    conn: &Connection,
    appointment_id: i64,
    appt: &NewAppointment,
) -> Result<Appointment, RecordError> {
    get_appointment(conn, appointment_id)?;
    ensure_references_exist(conn, appt)?;

    if let Some(existing) =
        db::find_appointment_by_tuple(conn, appt.patient_id, appt.doctor_id, appt.appointment_date)?
    {
        if existing.id != appointment_id {
            tracing::warn!(
                appointment_id,
                existing_id = existing.id,
                "Reschedule onto an existing appointment rejected"
            );
            return Err(duplicate(appt));
        }
    }

    let changed = db::update_appointment(conn, appointment_id, appt)
        .map_err(|e| map_write_error(e, appt))?;
    if !changed {
        return Err(RecordError::not_found("Appointment", appointment_id));
    }
    tracing::info!(appointment_id, date = %appt.appointment_date, "Appointment updated");

    Ok(Appointment {
        id: appointment_id,
        patient_id: appt.patient_id,
        doctor_id: appt.doctor_id,
        appointment_date: appt.appointment_date,
    })
}

pub fn cancel(conn: &Connection, appointment_id: i64) -> Result<(), RecordError> {
    if !db::delete_appointment(conn, appointment_id)? {
        return Err(RecordError::not_found("Appointment", appointment_id));
    }
    tracing::info!(appointment_id, "Appointment discharged");
    Ok(())
}

pub fn get_appointment(conn: &Connection, appointment_id: i64) -> Result<Appointment, RecordError> {
    db::get_appointment(conn, appointment_id)?
        .ok_or_else(|| RecordError::not_found("Appointment", appointment_id))
}

pub fn list_appointments(conn: &Connection) -> Result<Vec<AppointmentDetail>, RecordError> {
    Ok(db::list_appointment_details(conn)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;
    use chrono::NaiveDate;

    struct Fixture {
        conn: Connection,
        patient_id: i64,
        doctor_id: i64,
        other_doctor_id: i64,
    }

    fn setup() -> Fixture {
        let conn = open_memory_database().expect("open_memory_database");
        let patient_id = db::insert_patient(&conn, &NewPatient {
            name: "A".into(),
            age: 30,
            contact: "555".into(),
            address: "X".into(),
        })
        .unwrap();
        let doctor_id = db::insert_doctor(&conn, &NewDoctor {
            name: "D1".into(),
            specialization: "General Practice".into(),
            contact: "555-0001".into(),
        })
        .unwrap();
        let other_doctor_id = db::insert_doctor(&conn, &NewDoctor {
            name: "D2".into(),
            specialization: "Dermatology".into(),
            contact: "555-0002".into(),
        })
        .unwrap();
        Fixture {
            conn,
            patient_id,
            doctor_id,
            other_doctor_id,
        }
    }

    fn on(date: &str, patient_id: i64, doctor_id: i64) -> NewAppointment {
        NewAppointment {
            patient_id,
            doctor_id,
            appointment_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        }
    }

    #[test]
    fn schedule_creates_appointment() {
        let f = setup();
        let appt = schedule(&f.conn, &on("2024-01-01", f.patient_id, f.doctor_id)).unwrap();
        let stored = get_appointment(&f.conn, appt.id).unwrap();
        assert_eq!(stored, appt);
        assert_eq!(db::count_appointments(&f.conn).unwrap(), 1);
    }

    #[test]
    fn identical_tuple_twice_stores_one_row_and_warns_once() {
        let f = setup();
        let request = on("2024-01-01", f.patient_id, f.doctor_id);

        schedule(&f.conn, &request).unwrap();
        let err = schedule(&f.conn, &request).unwrap_err();

        assert!(matches!(err, RecordError::DuplicateAppointment { .. }));
        assert_eq!(db::count_appointments(&f.conn).unwrap(), 1);
    }

    #[test]
    fn same_patient_and_doctor_on_another_date_is_fine() {
        let f = setup();
        schedule(&f.conn, &on("2024-01-01", f.patient_id, f.doctor_id)).unwrap();
        schedule(&f.conn, &on("2024-01-02", f.patient_id, f.doctor_id)).unwrap();
        schedule(&f.conn, &on("2024-01-01", f.patient_id, f.other_doctor_id)).unwrap();
        assert_eq!(db::count_appointments(&f.conn).unwrap(), 3);
    }

    #[test]
    fn schedule_with_unknown_references_is_a_validation_failure() {
        let f = setup();
        let err = schedule(&f.conn, &on("2024-01-01", 999, 998)).unwrap_err();
        match err {
            RecordError::Validation(fields) => {
                assert_eq!(fields.get("patient_id"), Some(INVALID_CHOICE));
                assert_eq!(fields.get("doctor_id"), Some(INVALID_CHOICE));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
        assert_eq!(db::count_appointments(&f.conn).unwrap(), 0);
    }

    #[test]
    fn reschedule_overwrites_all_fields() {
        let f = setup();
        let appt = schedule(&f.conn, &on("2024-01-01", f.patient_id, f.doctor_id)).unwrap();

        let moved = reschedule(&f.conn, appt.id, &on("2024-02-15", f.patient_id, f.other_doctor_id))
            .unwrap();

        let stored = get_appointment(&f.conn, appt.id).unwrap();
        assert_eq!(stored, moved);
        assert_eq!(stored.doctor_id, f.other_doctor_id);
        assert_eq!(stored.appointment_date.to_string(), "2024-02-15");
    }

    #[test]
    fn reschedule_keeping_own_tuple_succeeds() {
        let f = setup();
        let request = on("2024-01-01", f.patient_id, f.doctor_id);
        let appt = schedule(&f.conn, &request).unwrap();
        assert!(reschedule(&f.conn, appt.id, &request).is_ok());
    }

    #[test]
    fn reschedule_onto_another_appointment_is_rejected() {
        let f = setup();
        let first = schedule(&f.conn, &on("2024-01-01", f.patient_id, f.doctor_id)).unwrap();
        let second = schedule(&f.conn, &on("2024-01-02", f.patient_id, f.doctor_id)).unwrap();

        let err = reschedule(&f.conn, second.id, &on("2024-01-01", f.patient_id, f.doctor_id))
            .unwrap_err();

        assert!(matches!(err, RecordError::DuplicateAppointment { .. }));
        assert_eq!(get_appointment(&f.conn, second.id).unwrap(), second);
        assert_eq!(get_appointment(&f.conn, first.id).unwrap(), first);
    }

    #[test]
    fn reschedule_missing_appointment_is_not_found() {
        let f = setup();
        let err = reschedule(&f.conn, 42, &on("2024-01-01", f.patient_id, f.doctor_id))
            .unwrap_err();
        assert!(matches!(err, RecordError::NotFound { entity: "Appointment", .. }));
    }

    #[test]
    fn cancel_deletes_and_then_reports_not_found() {
        let f = setup();
        let appt = schedule(&f.conn, &on("2024-01-01", f.patient_id, f.doctor_id)).unwrap();

        cancel(&f.conn, appt.id).unwrap();
        assert_eq!(db::count_appointments(&f.conn).unwrap(), 0);

        let err = cancel(&f.conn, appt.id).unwrap_err();
        assert!(matches!(err, RecordError::NotFound { .. }));
    }

    #[test]
    fn duplicate_from_unique_index_maps_to_rule_violation() {
        let f = setup();
        let request = on("2024-01-01", f.patient_id, f.doctor_id);
        db::insert_appointment(&f.conn, &request).unwrap();
        let err = db::insert_appointment(&f.conn, &request).unwrap_err();
        assert!(matches!(
            map_write_error(err, &request),
            RecordError::DuplicateAppointment { .. }
        ));
    }

    #[test]
    fn choices_and_listing() {
        let f = setup();
        schedule(&f.conn, &on("2024-01-01", f.patient_id, f.doctor_id)).unwrap();

        let choices = appointment_choices(&f.conn).unwrap();
        assert_eq!(choices.patients.len(), 1);
        assert_eq!(choices.doctors.len(), 2);

        let listed = list_appointments(&f.conn).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].patient_name, "A");
        assert_eq!(listed[0].doctor_name, "D1");
    }
}
