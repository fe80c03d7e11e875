use crate::db::{date_at, decimal_at, exists};
use crate::errors::AppResult;
use crate::models::payroll::{GrossPay, GrossPayLine, Payroll, PayrollDeductionLine};
use crate::utils::date::to_db;
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_payroll(row: &Row) -> rusqlite::Result<Payroll> {
    Ok(Payroll {
        id: row.get(0)?,
        employee_id: row.get(1)?,
        reference_no: row.get(2)?,
        start_cut_off: date_at(row, 3)?,
        end_cut_off: date_at(row, 4)?,
    })
}

/// Payroll header plus the employee's first and last name.
pub type PayrollHeader = (Payroll, String, String);

pub fn list(conn: &Connection, employee_id: Option<i64>) -> AppResult<Vec<PayrollHeader>> {
    let mut stmt = conn.prepare_cached(
        "SELECT p.id, p.employee_id, p.reference_no, p.start_cut_off, p.end_cut_off,
                e.first_name, e.last_name
         FROM payrolls p
         JOIN employees e ON p.employee_id = e.id
         WHERE ?1 IS NULL OR p.employee_id = ?1
         ORDER BY p.id ASC",
    )?;
    let rows = stmt.query_map([employee_id], |row| {
        Ok((map_payroll(row)?, row.get(5)?, row.get(6)?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find(conn: &Connection, id: i64) -> AppResult<Option<PayrollHeader>> {
    let mut stmt = conn.prepare_cached(
        "SELECT p.id, p.employee_id, p.reference_no, p.start_cut_off, p.end_cut_off,
                e.first_name, e.last_name
         FROM payrolls p
         JOIN employees e ON p.employee_id = e.id
         WHERE p.id = ?1",
    )?;
    Ok(stmt
        .query_row([id], |row| Ok((map_payroll(row)?, row.get(5)?, row.get(6)?)))
        .optional()?)
}

pub fn reference_exists(conn: &Connection, reference_no: &str) -> AppResult<bool> {
    Ok(exists(
        conn,
        "SELECT 1 FROM payrolls WHERE reference_no = ?1",
        [reference_no],
    )?)
}

pub fn insert(
    conn: &Connection,
    employee_id: i64,
    reference_no: &str,
    start: &NaiveDate,
    end: &NaiveDate,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO payrolls (employee_id, reference_no, start_cut_off, end_cut_off, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            employee_id,
            reference_no,
            to_db(start),
            to_db(end),
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Snapshot every deduction template into the payroll. Returns rows copied.
pub fn copy_deduction_templates(conn: &Connection, payroll_id: i64) -> AppResult<usize> {
    Ok(conn.execute(
        "INSERT INTO payroll_deductions (payroll_id, deduction_id, amount)
         SELECT ?1, id, default_amount FROM deductions ORDER BY id",
        [payroll_id],
    )?)
}

pub fn deduction_lines(conn: &Connection, payroll_id: i64) -> AppResult<Vec<PayrollDeductionLine>> {
    let mut stmt = conn.prepare_cached(
        "SELECT pd.id, pd.deduction_id, d.description, pd.amount
         FROM payroll_deductions pd
         JOIN deductions d ON pd.deduction_id = d.id
         WHERE pd.payroll_id = ?1
         ORDER BY pd.id ASC",
    )?;
    let rows = stmt.query_map([payroll_id], |row| {
        Ok(PayrollDeductionLine {
            id: row.get(0)?,
            deduction_id: row.get(1)?,
            description: row.get(2)?,
            amount: decimal_at(row, 3)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Timesheet ids of the employee in `[start, end]` split by whether
/// they already carry a gross-pay row: `(missing, present)`.
pub fn timesheets_in_range(
    conn: &Connection,
    employee_id: i64,
    start: &NaiveDate,
    end: &NaiveDate,
) -> AppResult<(Vec<i64>, Vec<i64>)> {
    let mut stmt = conn.prepare_cached(
        "SELECT t.id, g.id IS NOT NULL
         FROM timesheets t
         LEFT JOIN gross_pay g ON g.timesheet_id = t.id
         WHERE t.employee_id = ?1 AND t.work_date BETWEEN ?2 AND ?3
         ORDER BY t.work_date ASC",
    )?;
    let rows = stmt.query_map(params![employee_id, to_db(start), to_db(end)], |row| {
        Ok((row.get::<_, i64>(0)?, row.get::<_, bool>(1)?))
    })?;

    let mut missing = Vec::new();
    let mut present = Vec::new();
    for r in rows {
        let (id, has_gross) = r?;
        if has_gross {
            present.push(id);
        } else {
            missing.push(id);
        }
    }
    Ok((missing, present))
}

pub fn insert_gross_pay(
    conn: &Connection,
    timesheet_id: i64,
    std_rate: Decimal,
    ot_rate: Decimal,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO gross_pay (timesheet_id, std_hourly_rate, ot_hourly_rate)
         VALUES (?1, ?2, ?3)",
        params![timesheet_id, std_rate.to_string(), ot_rate.to_string()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn gross_pay_for(conn: &Connection, timesheet_id: i64) -> AppResult<Option<GrossPay>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, timesheet_id, std_hourly_rate, ot_hourly_rate
         FROM gross_pay WHERE timesheet_id = ?1",
    )?;
    Ok(stmt
        .query_row([timesheet_id], |row| {
            Ok(GrossPay {
                id: row.get(0)?,
                timesheet_id: row.get(1)?,
                std_hourly_rate: decimal_at(row, 2)?,
                ot_hourly_rate: decimal_at(row, 3)?,
            })
        })
        .optional()?)
}

/// Hours and rates of every priced timesheet covered by the payroll.
pub fn gross_pay_lines(conn: &Connection, payroll: &Payroll) -> AppResult<Vec<GrossPayLine>> {
    let mut stmt = conn.prepare_cached(
        "SELECT t.rendered_hours, t.overtime_hours, g.std_hourly_rate, g.ot_hourly_rate
         FROM timesheets t
         JOIN gross_pay g ON g.timesheet_id = t.id
         WHERE t.employee_id = ?1 AND t.work_date BETWEEN ?2 AND ?3
         ORDER BY t.work_date ASC",
    )?;
    let rows = stmt.query_map(
        params![
            payroll.employee_id,
            to_db(&payroll.start_cut_off),
            to_db(&payroll.end_cut_off)
        ],
        |row| {
            Ok(GrossPayLine {
                rendered_hours: decimal_at(row, 0)?,
                overtime_hours: decimal_at(row, 1)?,
                std_hourly_rate: decimal_at(row, 2)?,
                ot_hourly_rate: decimal_at(row, 3)?,
            })
        },
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn delete_deductions(conn: &Connection, payroll_id: i64) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM payroll_deductions WHERE payroll_id = ?1",
        [payroll_id],
    )?)
}

pub fn delete(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM payrolls WHERE id = ?1", [id])?)
}
