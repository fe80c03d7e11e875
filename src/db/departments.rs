use crate::db::{count, exists, like_pattern};
use crate::errors::AppResult;
use crate::models::department::Department;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_row(row: &Row) -> rusqlite::Result<Department> {
    Ok(Department {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

pub fn list(conn: &Connection, filter: Option<&str>) -> AppResult<Vec<Department>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name FROM departments
         WHERE ?1 IS NULL OR id LIKE ?1 ESCAPE '\\' OR name LIKE ?1 ESCAPE '\\'
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

pub fn find(conn: &Connection, id: i64) -> AppResult<Option<Department>> {
    let mut stmt = conn.prepare_cached("SELECT id, name FROM departments WHERE id = ?1")?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn exists_by_id(conn: &Connection, id: i64) -> AppResult<bool> {
    Ok(exists(conn, "SELECT 1 FROM departments WHERE id = ?1", [id])?)
}

pub fn insert(conn: &Connection, name: &str) -> AppResult<i64> {
    conn.execute("INSERT INTO departments (name) VALUES (?1)", [name])?;
    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, id: i64, name: &str) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE departments SET name = ?1 WHERE id = ?2",
        params![name, id],
    )?)
}

pub fn delete(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM departments WHERE id = ?1", [id])?)
}

/// Positions and employees that still point at the department.
pub fn dependents(conn: &Connection, id: i64) -> AppResult<(i64, i64)> {
    let positions = count(
        conn,
        "SELECT COUNT(*) FROM positions WHERE department_id = ?1",
        [id],
    )?;
    let employees = count(
        conn,
        "SELECT COUNT(*) FROM employees WHERE department_id = ?1",
        [id],
    )?;
    Ok((positions, employees))
}
