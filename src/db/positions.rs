use crate::db::{count, decimal_at, exists, like_pattern};
use crate::errors::AppResult;
use crate::models::position::{Position, PositionRow};
use rusqlite::{Connection, OptionalExtension, Row, params};

const SELECT_ROW: &str = "SELECT p.id, p.name, p.base_salary, p.department_id, d.name
    FROM positions p
    LEFT JOIN departments d ON p.department_id = d.id";

fn map_position(row: &Row) -> rusqlite::Result<Position> {
    Ok(Position {
        id: row.get(0)?,
        name: row.get(1)?,
        base_salary: decimal_at(row, 2)?,
        department_id: row.get(3)?,
    })
}

fn map_row(row: &Row) -> rusqlite::Result<PositionRow> {
    Ok(PositionRow {
        position: map_position(row)?,
        department_name: row.get(4)?,
    })
}

pub fn list(conn: &Connection, filter: Option<&str>) -> AppResult<Vec<PositionRow>> {
    let sql = format!(
        "{SELECT_ROW}
         WHERE ?1 IS NULL OR p.id LIKE ?1 ESCAPE '\\' OR p.name LIKE ?1 ESCAPE '\\'
         ORDER BY p.id"
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    let pattern = filter.map(like_pattern);
    let rows = stmt.query_map([pattern], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find(conn: &Connection, id: i64) -> AppResult<Option<Position>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, base_salary, department_id FROM positions WHERE id = ?1",
    )?;
    Ok(stmt.query_row([id], map_position).optional()?)
}

pub fn exists_by_id(conn: &Connection, id: i64) -> AppResult<bool> {
    Ok(exists(conn, "SELECT 1 FROM positions WHERE id = ?1", [id])?)
}

pub fn insert(conn: &Connection, p: &Position) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO positions (name, base_salary, department_id) VALUES (?1, ?2, ?3)",
        params![p.name, p.base_salary.to_string(), p.department_id],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, p: &Position) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE positions SET name = ?1, base_salary = ?2, department_id = ?3 WHERE id = ?4",
        params![p.name, p.base_salary.to_string(), p.department_id, p.id],
    )?)
}

pub fn delete(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM positions WHERE id = ?1", [id])?)
}

pub fn employee_count(conn: &Connection, id: i64) -> AppResult<i64> {
    Ok(count(
        conn,
        "SELECT COUNT(*) FROM employees WHERE position_id = ?1",
        [id],
    )?)
}
