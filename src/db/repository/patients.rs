use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::Patient;

pub fn insert_patient(
    conn: &Connection,
    name: &str,
    age: i64,
    gender: &str,
    disease_stage: &str,
) -> Result<Patient, DatabaseError> {
    conn.execute(
        "INSERT INTO patients (name, age, gender, disease_stage) VALUES (?1, ?2, ?3, ?4)",
        params![name, age, gender, disease_stage],
    )?;
    let id = conn.last_insert_rowid();
    Ok(Patient {
        id,
        name: name.to_string(),
        age,
        gender: gender.to_string(),
        disease_stage: disease_stage.to_string(),
    })
}

pub fn list_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, age, gender, disease_stage FROM patients ORDER BY id",
    )?;
    let rows = stmt.query_map([], patient_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn get_patient(conn: &Connection, id: i64) -> Result<Option<Patient>, DatabaseError> {
    let patient = conn
        .query_row(
            "SELECT id, name, age, gender, disease_stage FROM patients WHERE id = ?1",
            params![id],
            patient_from_row,
        )
        .optional()?;
    Ok(patient)
}

/// Case-insensitive exact-name lookup; first match wins.
pub fn find_patient_by_name_ci(
    conn: &Connection,
    name: &str,
) -> Result<Option<Patient>, DatabaseError> {
    let patient = conn
        .query_row(
            "SELECT id, name, age, gender, disease_stage FROM patients
             WHERE LOWER(name) = LOWER(?1) ORDER BY id LIMIT 1",
            params![name],
            patient_from_row,
        )
        .optional()?;
    Ok(patient)
}

fn patient_from_row(row: &rusqlite::Row<'_>) -> Result<Patient, rusqlite::Error> {
    Ok(Patient {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        gender: row.get(3)?,
        disease_stage: row.get(4)?,
    })
}
