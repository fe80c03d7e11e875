use crate::db::{date_at, decimal_at, exists};
use crate::errors::AppResult;
use crate::models::timesheet::{Timesheet, TimesheetRow};
use crate::utils::date::to_db;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_timesheet(row: &Row) -> rusqlite::Result<Timesheet> {
    Ok(Timesheet {
        id: row.get(0)?,
        employee_id: row.get(1)?,
        work_date: date_at(row, 2)?,
        standard_hours: decimal_at(row, 3)?,
        rendered_hours: decimal_at(row, 4)?,
        overtime_hours: decimal_at(row, 5)?,
    })
}

fn map_row(row: &Row) -> rusqlite::Result<TimesheetRow> {
    Ok(TimesheetRow {
        timesheet: map_timesheet(row)?,
        first_name: row.get(6)?,
        last_name: row.get(7)?,
    })
}

/// Timesheets with employee names, newest work date last.
pub fn list(conn: &Connection, employee_id: Option<i64>) -> AppResult<Vec<TimesheetRow>> {
    let mut stmt = conn.prepare_cached(
        "SELECT t.id, t.employee_id, t.work_date, t.standard_hours,
                t.rendered_hours, t.overtime_hours, e.first_name, e.last_name
         FROM timesheets t
         JOIN employees e ON t.employee_id = e.id
         WHERE ?1 IS NULL OR t.employee_id = ?1
         ORDER BY t.work_date ASC, t.id ASC",
    )?;
    let rows = stmt.query_map([employee_id], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find(conn: &Connection, id: i64) -> AppResult<Option<Timesheet>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, employee_id, work_date, standard_hours, rendered_hours, overtime_hours
         FROM timesheets WHERE id = ?1",
    )?;
    Ok(stmt.query_row([id], map_timesheet).optional()?)
}

/// Whether another timesheet already covers `(employee_id, work_date)`.
pub fn date_taken(
    conn: &Connection,
    employee_id: i64,
    work_date: &NaiveDate,
    exclude_id: Option<i64>,
) -> AppResult<bool> {
    Ok(exists(
        conn,
        "SELECT 1 FROM timesheets
         WHERE employee_id = ?1 AND work_date = ?2 AND (?3 IS NULL OR id <> ?3)",
        params![employee_id, to_db(work_date), exclude_id],
    )?)
}

pub fn insert(conn: &Connection, t: &Timesheet) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO timesheets
            (employee_id, work_date, standard_hours, rendered_hours, overtime_hours)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            t.employee_id,
            to_db(&t.work_date),
            t.standard_hours.to_string(),
            t.rendered_hours.to_string(),
            t.overtime_hours.to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(conn: &Connection, t: &Timesheet) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE timesheets SET
            employee_id = ?1, work_date = ?2, standard_hours = ?3,
            rendered_hours = ?4, overtime_hours = ?5
         WHERE id = ?6",
        params![
            t.employee_id,
            to_db(&t.work_date),
            t.standard_hours.to_string(),
            t.rendered_hours.to_string(),
            t.overtime_hours.to_string(),
            t.id,
        ],
    )?)
}

pub fn delete_gross_pay(conn: &Connection, timesheet_id: i64) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM gross_pay WHERE timesheet_id = ?1",
        [timesheet_id],
    )?)
}

pub fn delete(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM timesheets WHERE id = ?1", [id])?)
}
