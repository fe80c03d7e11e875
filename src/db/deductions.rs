use crate::db::{count, decimal_at, like_pattern};
use crate::errors::AppResult;
use crate::models::deduction::Deduction;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_row(row: &Row) -> rusqlite::Result<Deduction> {
    Ok(Deduction {
        id: row.get(0)?,
        description: row.get(1)?,
        default_amount: decimal_at(row, 2)?,
    })
}

pub fn list(conn: &Connection, filter: Option<&str>) -> AppResult<Vec<Deduction>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, description, default_amount FROM deductions
         WHERE ?1 IS NULL OR id LIKE ?1 ESCAPE '\\' OR description LIKE ?1 ESCAPE '\\'
         ORDER BY id",
    )?;
    let pattern = filter.map(like_pattern);
    let rows = stmt.query_map([pattern], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find(conn: &Connection, id: i64) -> AppResult<Option<Deduction>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, description, default_amount FROM deductions WHERE id = ?1",
    )?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn insert(conn: &Connection, d: &Deduction) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO deductions (description, default_amount) VALUES (?1, ?2)",
        params![d.description, d.default_amount.to_string()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, d: &Deduction) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE deductions SET description = ?1, default_amount = ?2 WHERE id = ?3",
        params![d.description, d.default_amount.to_string(), d.id],
    )?)
}

pub fn delete(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM deductions WHERE id = ?1", [id])?)
}

/// Payroll runs holding a snapshot of this template.
pub fn usage_count(conn: &Connection, id: i64) -> AppResult<i64> {
    Ok(count(
        conn,
        "SELECT COUNT(*) FROM payroll_deductions WHERE deduction_id = ?1",
        [id],
    )?)
}
