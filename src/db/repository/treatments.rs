use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::db::repository::{medicines, patients};
use crate::models::Treatment;

/// Record a treatment outcome. `start_date` defaults to the current time.
///
/// Both referenced entities must exist; violations are reported as
/// [`DatabaseError::NotFound`] before touching the treatments table.
pub fn insert_treatment(
    conn: &Connection,
    patient_id: i64,
    medicine_id: i64,
    improvement_percent: f64,
    doctor_notes: Option<&str>,
) -> Result<Treatment, DatabaseError> {
    if patients::get_patient(conn, patient_id)?.is_none() {
        return Err(DatabaseError::NotFound {
            entity_type: "patient".into(),
            id: patient_id,
        });
    }
    let medicine = medicines::get_medicine(conn, medicine_id)?.ok_or(DatabaseError::NotFound {
        entity_type: "medicine".into(),
        id: medicine_id,
    })?;

    let start_date = chrono::Utc::now().to_rfc3339();
    conn.execute(
        "INSERT INTO treatments (patient_id, medicine_id, start_date, improvement_percent, doctor_notes)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![patient_id, medicine_id, start_date, improvement_percent, doctor_notes],
    )?;

    Ok(Treatment {
        id: conn.last_insert_rowid(),
        patient_id,
        medicine_id,
        start_date,
        end_date: None,
        improvement_percent,
        doctor_notes: doctor_notes.map(|n| n.to_string()),
        medicine_name: medicine.name,
    })
}

/// All treatments for a patient, oldest first, with resolved medicine names.
pub fn treatments_for_patient(
    conn: &Connection,
    patient_id: i64,
) -> Result<Vec<Treatment>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.patient_id, t.medicine_id, t.start_date, t.end_date,
                t.improvement_percent, t.doctor_notes, m.name
         FROM treatments t
         JOIN medicines m ON m.id = t.medicine_id
         WHERE t.patient_id = ?1
         ORDER BY t.id",
    )?;
    let rows = stmt.query_map(params![patient_id], treatment_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

fn treatment_from_row(row: &rusqlite::Row<'_>) -> Result<Treatment, rusqlite::Error> {
    Ok(Treatment {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        medicine_id: row.get(2)?,
        start_date: row.get(3)?,
        end_date: row.get(4)?,
        improvement_percent: row.get(5)?,
        doctor_notes: row.get(6)?,
        medicine_name: row.get(7)?,
    })
}
