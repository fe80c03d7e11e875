use crate::config::Config;
use crate::core::access::{Capability, Session};
use crate::core::calculator::rates::hourly_rates;
use crate::core::calculator::totals::payroll_totals;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::{employees, payrolls};
use crate::errors::{AppError, AppResult};
use crate::models::payroll::{PayrollDeductionLine, PayrollRun, PayrollSummary};
use crate::ui::messages::warning;
use crate::utils::date::parse_range;
use crate::utils::validation;
use chrono::Utc;
use rusqlite::Connection;

pub struct PayrollLogic;

/// `PR-<employee>-<millis>`, bumping the millisecond part until unused.
fn next_reference(conn: &Connection, employee_id: i64, mut millis: i64) -> AppResult<String> {
    loop {
        let candidate = format!("PR-{employee_id}-{millis}");
        if !payrolls::reference_exists(conn, &candidate)? {
            return Ok(candidate);
        }
        millis += 1;
    }
}

/// Attach computed totals to a payroll header.
fn summarize(conn: &Connection, header: payrolls::PayrollHeader) -> AppResult<PayrollSummary> {
    let (payroll, first_name, last_name) = header;
    let lines = payrolls::gross_pay_lines(conn, &payroll)?;
    let deductions = payrolls::deduction_lines(conn, payroll.id)?;
    let totals = payroll_totals(&lines, &deductions)?;

    Ok(PayrollSummary {
        payroll,
        first_name,
        last_name,
        total_gross_pay: totals.gross,
        total_deduction: totals.deduction,
        net_pay: totals.net,
    })
}

impl PayrollLogic {
    /// Create a payroll run for one employee and cut-off range.
    ///
    /// The payroll row, the deduction snapshots and the new gross-pay
    /// rows are written in one transaction. Timesheets that already
    /// carry a gross-pay row are left as they are.
    pub fn generate(
        pool: &mut DbPool,
        cfg: &Config,
        session: &Session,
        employee_id_raw: &str,
        start: &str,
        end: &str,
    ) -> AppResult<PayrollRun> {
        session.require(Capability::GeneratePayroll)?;

        let employee_id = validation::employee_id(employee_id_raw)?;
        let (start, end) = parse_range(start, end)?;

        let employee = employees::find(&pool.conn, employee_id)?
            .ok_or_else(|| AppError::NotFound("Employee does not exist.".into()))?
            .employee;

        let rates = hourly_rates(employee.monthly_salary, cfg);
        if employee.monthly_salary.is_none() {
            warning(format!(
                "Employee {} has no monthly salary on file; hourly rates set to 0.00.",
                employee_id
            ));
            tracing::warn!(employee_id, "generating payroll without a monthly salary");
        }

        let tx = pool.transaction()?;

        let reference_no = next_reference(&tx, employee_id, Utc::now().timestamp_millis())?;
        let payroll_id = payrolls::insert(&tx, employee_id, &reference_no, &start, &end)?;
        let deductions_copied = payrolls::copy_deduction_templates(&tx, payroll_id)?;

        let (unpriced, priced) = payrolls::timesheets_in_range(&tx, employee_id, &start, &end)?;
        for timesheet_id in &unpriced {
            payrolls::insert_gross_pay(&tx, *timesheet_id, rates.standard, rates.overtime)?;
        }

        audit(
            &tx,
            "payroll",
            &reference_no,
            &format!(
                "Payroll for employee {} ({} to {}): {} deductions, {} gross-pay rows",
                employee_id,
                start,
                end,
                deductions_copied,
                unpriced.len()
            ),
        );

        tx.commit()?;

        tracing::info!(
            payroll_id,
            employee_id,
            reference_no = %reference_no,
            gross_pay_created = unpriced.len(),
            "payroll generated"
        );

        Ok(PayrollRun {
            payroll_id,
            reference_no,
            deductions_copied,
            gross_pay_created: unpriced.len(),
            timesheets_skipped: priced.len(),
        })
    }

    /// Payroll summaries. Employees only ever see their own.
    pub fn list(
        pool: &DbPool,
        session: &Session,
        employee_filter: Option<i64>,
    ) -> AppResult<Vec<PayrollSummary>> {
        let filter = if session.is_admin() {
            employee_filter
        } else {
            Some(session.target_employee(employee_filter)?)
        };

        payrolls::list(&pool.conn, filter)?
            .into_iter()
            .map(|header| summarize(&pool.conn, header))
            .collect()
    }

    /// One payroll with its totals and deduction lines.
    pub fn show(
        pool: &DbPool,
        session: &Session,
        payroll_id: i64,
    ) -> AppResult<(PayrollSummary, Vec<PayrollDeductionLine>)> {
        let header = payrolls::find(&pool.conn, payroll_id)?
            .ok_or_else(|| AppError::NotFound(format!("Payroll {payroll_id} does not exist.")))?;
        session.require(Capability::ViewEmployee(header.0.employee_id))?;

        let deductions = payrolls::deduction_lines(&pool.conn, payroll_id)?;
        Ok((summarize(&pool.conn, header)?, deductions))
    }

    pub fn deductions(
        pool: &DbPool,
        session: &Session,
        payroll_id: i64,
    ) -> AppResult<Vec<PayrollDeductionLine>> {
        Ok(Self::show(pool, session, payroll_id)?.1)
    }

    /// Remove a payroll and its deduction snapshots together.
    pub fn delete(pool: &mut DbPool, session: &Session, payroll_id: i64) -> AppResult<()> {
        session.require_admin()?;

        let tx = pool.transaction()?;
        let lines = payrolls::delete_deductions(&tx, payroll_id)?;
        if payrolls::delete(&tx, payroll_id)? == 0 {
            return Err(AppError::NotFound(format!(
                "Payroll {payroll_id} does not exist."
            )));
        }
        audit(
            &tx,
            "del",
            &format!("payroll {payroll_id}"),
            &format!("Deleted payroll and {lines} deduction lines"),
        );
        tx.commit()?;

        tracing::info!(payroll_id, deduction_lines = lines, "payroll deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;
    use chrono::NaiveDate;

    fn pool_with_employee() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool.conn
            .execute(
                "INSERT INTO employees (id, last_name, first_name) VALUES (1, 'Cruz', 'Juan')",
                [],
            )
            .unwrap();
        pool
    }

    #[test]
    fn free_reference_is_used_as_is() {
        let pool = pool_with_employee();
        assert_eq!(next_reference(&pool.conn, 1, 1000).unwrap(), "PR-1-1000");
    }

    #[test]
    fn taken_reference_bumps_the_millis() {
        let pool = pool_with_employee();
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        payrolls::insert(&pool.conn, 1, "PR-1-1000", &day, &day).unwrap();
        payrolls::insert(&pool.conn, 1, "PR-1-1001", &day, &day).unwrap();

        assert_eq!(next_reference(&pool.conn, 1, 1000).unwrap(), "PR-1-1002");
        assert_eq!(next_reference(&pool.conn, 2, 1000).unwrap(), "PR-2-1000");
    }
}
