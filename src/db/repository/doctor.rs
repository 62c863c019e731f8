use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::DatabaseError;
use crate::models::*;

fn doctor_from_row(row: &Row<'_>) -> rusqlite::Result<Doctor> {
    Ok(Doctor {
        id: row.get(0)?,
        name: row.get(1)?,
        specialization: row.get(2)?,
        contact: row.get(3)?,
    })
}

pub fn insert_doctor(conn: &Connection, doctor: &NewDoctor) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO doctors (name, specialization, contact) VALUES (?1, ?2, ?3)",
        params![doctor.name, doctor.specialization, doctor.contact],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_doctor(conn: &Connection, id: i64) -> Result<Option<Doctor>, DatabaseError> {
    conn.query_row(
        "SELECT id, name, specialization, contact FROM doctors WHERE id = ?1",
        params![id],
        doctor_from_row,
    )
    .optional()
    .map_err(DatabaseError::from)
}

pub fn get_all_doctors(conn: &Connection) -> Result<Vec<Doctor>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT id, name, specialization, contact FROM doctors ORDER BY id")?;
    let rows = stmt.query_map([], doctor_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn update_doctor(conn: &Connection, id: i64, doctor: &NewDoctor) -> Result<bool, DatabaseError> {
    let changed = conn.execute(
        "UPDATE doctors SET name = ?1, specialization = ?2, contact = ?3 WHERE id = ?4",
        params![doctor.name, doctor.specialization, doctor.contact, id],
    )?;
    Ok(changed > 0)
}

/// Fails with a foreign-key violation while appointments still reference the doctor.
pub fn delete_doctor(conn: &Connection, id: i64) -> Result<bool, DatabaseError> {
    let changed = conn.execute("DELETE FROM doctors WHERE id = ?1", params![id])?;
    Ok(changed > 0)
}

pub fn count_doctors(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM doctors", [], |row| row.get(0))?;
    Ok(count)
}

pub fn doctor_choices(conn: &Connection) -> Result<Vec<Choice>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT id, name FROM doctors ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok(Choice {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    })?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}
