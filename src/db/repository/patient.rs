use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::DatabaseError;
use crate::models::*;

fn patient_from_row(row: &Row<'_>) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        contact: row.get(3)?,
        address: row.get(4)?,
    })
}

/// Inserts a patient and returns the assigned id.
pub fn insert_patient(conn: &Connection, patient: &NewPatient) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO patients (name, age, contact, address) VALUES (?1, ?2, ?3, ?4)",
        params![patient.name, patient.age, patient.contact, patient.address],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_patient(conn: &Connection, id: i64) -> Result<Option<Patient>, DatabaseError> {
    conn.query_row(
        "SELECT id, name, age, contact, address FROM patients WHERE id = ?1",
        params![id],
        patient_from_row,
    )
    .optional()
    .map_err(DatabaseError::from)
}

pub fn get_all_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT id, name, age, contact, address FROM patients ORDER BY id")?;
    let rows = stmt.query_map([], patient_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Overwrites every field. Returns false when no such patient exists.
pub fn update_patient(
    conn: &Connection,
    id: i64,
    patient: &NewPatient,
) -> Result<bool, DatabaseError> {
    let changed = conn.execute(
        "UPDATE patients SET name = ?1, age = ?2, contact = ?3, address = ?4 WHERE id = ?5",
        params![patient.name, patient.age, patient.contact, patient.address, id],
    )?;
    Ok(changed > 0)
}

/// Deletes the patient; their appointments go with them (ON DELETE CASCADE).
pub fn delete_patient(conn: &Connection, id: i64) -> Result<bool, DatabaseError> {
    let changed = conn.execute("DELETE FROM patients WHERE id = ?1", params![id])?;
    Ok(changed > 0)
}

pub fn count_patients(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
    Ok(count)
}

pub fn patient_choices(conn: &Connection) -> Result<Vec<Choice>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT id, name FROM patients ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok(Choice {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}
