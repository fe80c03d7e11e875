use crate::db::exists;
use crate::errors::AppResult;
use crate::models::role::Role;
use crate::models::user::{User, UserRow};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_user(row: &Row) -> rusqlite::Result<User> {
    let raw: String = row.get(4)?;
    let role = Role::from_db_str(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            Type::Text,
            format!("unknown role '{raw}'").into(),
        )
    })?;
    Ok(User {
        id: row.get(0)?,
        employee_id: row.get(1)?,
        username: row.get(2)?,
        password_hash: row.get(3)?,
        role,
    })
}

pub fn list(conn: &Connection, role: Option<Role>) -> AppResult<Vec<UserRow>> {
    let mut stmt = conn.prepare_cached(
        "SELECT u.id, u.employee_id, u.username, u.password_hash, u.role,
                e.first_name || ' ' || e.last_name
         FROM users u
         LEFT JOIN employees e ON u.employee_id = e.id
         WHERE ?1 IS NULL OR u.role = ?1
         ORDER BY u.id ASC",
    )?;
    let rows = stmt.query_map([role.map(|r| r.to_db_str())], |row| {
        Ok(UserRow {
            user: map_user(row)?,
            employee_name: row.get(5)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find(conn: &Connection, id: i64) -> AppResult<Option<User>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, employee_id, username, password_hash, role FROM users WHERE id = ?1",
    )?;
    Ok(stmt.query_row([id], map_user).optional()?)
}

pub fn find_by_username(conn: &Connection, username: &str) -> AppResult<Option<User>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, employee_id, username, password_hash, role FROM users WHERE username = ?1",
    )?;
    Ok(stmt.query_row([username], map_user).optional()?)
}

pub fn username_taken(conn: &Connection, username: &str, exclude_id: Option<i64>) -> AppResult<bool> {
    Ok(exists(
        conn,
        "SELECT 1 FROM users WHERE username = ?1 AND (?2 IS NULL OR id <> ?2)",
        params![username, exclude_id],
    )?)
}

/// Whether the employee already holds an account with this role.
pub fn has_account(
    conn: &Connection,
    employee_id: i64,
    role: Role,
    exclude_id: Option<i64>,
) -> AppResult<bool> {
    Ok(exists(
        conn,
        "SELECT 1 FROM users
         WHERE employee_id = ?1 AND role = ?2 AND (?3 IS NULL OR id <> ?3)",
        params![employee_id, role.to_db_str(), exclude_id],
    )?)
}

pub fn insert(
    conn: &Connection,
    employee_id: Option<i64>,
    username: &str,
    password_hash: &str,
    role: Role,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO users (employee_id, username, password_hash, role) VALUES (?1, ?2, ?3, ?4)",
        params![employee_id, username, password_hash, role.to_db_str()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, user: &User) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE users SET employee_id = ?1, username = ?2, password_hash = ?3, role = ?4
         WHERE id = ?5",
        params![
            user.employee_id,
            user.username,
            user.password_hash,
            user.role.to_db_str(),
            user.id
        ],
    )?)
}

pub fn delete(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM users WHERE id = ?1", [id])?)
}
