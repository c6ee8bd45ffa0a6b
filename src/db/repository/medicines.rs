use rusqlite::{params, Connection, OptionalExtension};

use crate::db::DatabaseError;
use crate::models::Medicine;

pub fn insert_medicine(
    conn: &Connection,
    name: &str,
    kind: &str,
    description: Option<&str>,
) -> Result<Medicine, DatabaseError> {
    conn.execute(
        "INSERT INTO medicines (name, type, description) VALUES (?1, ?2, ?3)",
        params![name, kind, description],
    )?;
    let id = conn.last_insert_rowid();
    Ok(Medicine {
        id,
        name: name.to_string(),
        kind: kind.to_string(),
        description: description.map(|d| d.to_string()),
    })
}

pub fn list_medicines(conn: &Connection) -> Result<Vec<Medicine>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT id, name, type, description FROM medicines ORDER BY id")?;
    let rows = stmt.query_map([], medicine_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn get_medicine(conn: &Connection, id: i64) -> Result<Option<Medicine>, DatabaseError> {
    let medicine = conn
        .query_row(
            "SELECT id, name, type, description FROM medicines WHERE id = ?1",
            params![id],
            medicine_from_row,
        )
        .optional()?;
    Ok(medicine)
}

fn medicine_from_row(row: &rusqlite::Row<'_>) -> Result<Medicine, rusqlite::Error> {
    Ok(Medicine {
        id: row.get(0)?,
        name: row.get(1)?,
        kind: row.get(2)?,
        description: row.get(3)?,
    })
}
