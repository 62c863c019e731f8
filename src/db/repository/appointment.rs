use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::DatabaseError;
use crate::models::*;

fn appointment_from_row(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        doctor_id: row.get(2)?,
        appointment_date: row.get(3)?,
    })
}

pub fn insert_appointment(
    conn: &Connection,
    appointment: &NewAppointment,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO appointments (patient_id, doctor_id, appointment_date) VALUES (?1, ?2, ?3)",
        params![
            appointment.patient_id,
            appointment.doctor_id,
            appointment.appointment_date,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_appointment(conn: &Connection, id: i64) -> Result<Option<Appointment>, DatabaseError> {
    conn.query_row(
        "SELECT id, patient_id, doctor_id, appointment_date FROM appointments WHERE id = ?1",
        params![id],
        appointment_from_row,
    )
    .optional()
    .map_err(DatabaseError::from)
}

/// Looks up the appointment holding a (patient, doctor, date) tuple, if any.
pub fn find_appointment_by_tuple(
    conn: &Connection,
    patient_id: i64,
    doctor_id: i64,
    date: NaiveDate,
) -> Result<Option<Appointment>, DatabaseError> {
    conn.query_row(
        "SELECT id, patient_id, doctor_id, appointment_date FROM appointments
         WHERE patient_id = ?1 AND doctor_id = ?2 AND appointment_date = ?3
         LIMIT 1",
        params![patient_id, doctor_id, date],
        appointment_from_row,
    )
    .optional()
    .map_err(DatabaseError::from)
}

pub fn update_appointment(
    conn: &Connection,
    id: i64,
    appointment: &NewAppointment,
) -> Result<bool, DatabaseError> {
    let changed = conn.execute(
        "UPDATE appointments SET patient_id = ?1, doctor_id = ?2, appointment_date = ?3
         WHERE id = ?4",
        params![
            appointment.patient_id,
            appointment.doctor_id,
            appointment.appointment_date,
            id,
        ],
    )?;
    Ok(changed > 0)
}

pub fn delete_appointment(conn: &Connection, id: i64) -> Result<bool, DatabaseError> {
    let changed = conn.execute("DELETE FROM appointments WHERE id = ?1", params![id])?;
    Ok(changed > 0)
}

pub fn count_appointments(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM appointments", [], |row| row.get(0))?;
    Ok(count)
}

pub fn count_appointments_for_doctor(conn: &Connection, doctor_id: i64) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM appointments WHERE doctor_id = ?1",
        params![doctor_id],
        |row| row.get(0),
    )?;
    Ok(count)
}

/// Lists all appointments with patient and doctor names, ordered by date.
pub fn list_appointment_details(conn: &Connection) -> Result<Vec<AppointmentDetail>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT a.id, a.patient_id, p.name, a.doctor_id, d.name, a.appointment_date
         FROM appointments a
         JOIN patients p ON a.patient_id = p.id
         JOIN doctors d ON a.doctor_id = d.id
         ORDER BY a.appointment_date, a.id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(AppointmentDetail {
            id: row.get(0)?,
            patient_id: row.get(1)?,
            patient_name: row.get(2)?,
            doctor_id: row.get(3)?,
            doctor_name: row.get(4)?,
            appointment_date: row.get(5)?,
        })
    })?;

    rows.collect::<Result<Vec<_>, _>>().map_err(DatabaseError::from)
}
