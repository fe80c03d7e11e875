use crate::config::Config;
use crate::core::access::Session;
use crate::core::form;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::{employees, timesheets};
use crate::errors::{AppError, AppResult};
use crate::models::timesheet::{Timesheet, TimesheetRow};
use crate::utils::date::require_date;
use crate::utils::money::parse_amount;
use crate::utils::validation;
use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const MAX_DAY_HOURS: Decimal = dec!(24);

/// Raw timesheet fields as typed on the command line.
#[derive(Debug, Default, Clone, Args)]
pub struct TimesheetForm {
    #[arg(long)]
    pub employee_id: Option<String>,
    #[arg(long = "date", help = "Work date (YYYY-MM-DD)")]
    pub work_date: Option<String>,
    #[arg(long = "rendered", help = "Hours actually worked")]
    pub rendered_hours: Option<String>,
    #[arg(long = "standard", help = "Standard hours for the day (default from config)")]
    pub standard_hours: Option<String>,
}

pub struct TimesheetLogic;

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Timesheet {id} does not exist."))
}

fn hours(field: &str, raw: &str) -> AppResult<Decimal> {
    let h = parse_amount(field, raw)?;
    if h > MAX_DAY_HOURS {
        return Err(AppError::Validation(format!(
            "{field} cannot exceed 24 hours."
        )));
    }
    Ok(h)
}

/// Validate references and uniqueness, then derive overtime.
fn build(
    pool: &DbPool,
    id: i64,
    employee_id: i64,
    work_date: chrono::NaiveDate,
    standard: Decimal,
    rendered: Decimal,
) -> AppResult<Timesheet> {
    if !employees::exists_by_id(&pool.conn, employee_id)? {
        return Err(AppError::NotFound("Employee does not exist.".into()));
    }
    let exclude = (id != 0).then_some(id);
    if timesheets::date_taken(&pool.conn, employee_id, &work_date, exclude)? {
        return Err(AppError::Conflict(format!(
            "Employee {employee_id} already has a timesheet for {work_date}."
        )));
    }
    Ok(Timesheet::new(id, employee_id, work_date, standard, rendered))
}

impl TimesheetLogic {
    /// Admins see everything (optionally one employee); employees see their own.
    pub fn list(
        pool: &DbPool,
        session: &Session,
        employee_filter: Option<i64>,
    ) -> AppResult<Vec<TimesheetRow>> {
        let filter = if session.is_admin() {
            employee_filter
        } else {
            Some(session.target_employee(employee_filter)?)
        };
        timesheets::list(&pool.conn, filter)
    }

    pub fn add(pool: &DbPool, cfg: &Config, session: &Session, f: &TimesheetForm) -> AppResult<i64> {
        session.require_admin()?;

        let employee_id = validation::employee_id(f.employee_id.as_deref().unwrap_or_default())?;
        let work_date = require_date(f.work_date.as_deref().unwrap_or_default())?;
        let rendered = hours(
            "Rendered hours",
            f.rendered_hours.as_deref().unwrap_or_default(),
        )?;
        let standard = form::optional(f.standard_hours.as_deref(), |v| hours("Standard hours", v))?
            .unwrap_or(cfg.standard_hours);

        let ts = build(pool, 0, employee_id, work_date, standard, rendered)?;
        let id = timesheets::insert(&pool.conn, &ts)?;
        audit(
            &pool.conn,
            "add",
            &format!("timesheet {id}"),
            &format!(
                "Employee {} on {}: {} h ({} overtime)",
                ts.employee_id, ts.work_date, ts.rendered_hours, ts.overtime_hours
            ),
        );
        Ok(id)
    }

    /// Re-derives overtime. A priced timesheet keeps its rates unless it
    /// moves to another employee; then its gross-pay row is dropped so the
    /// next payroll run prices it at the new employee's salary.
    pub fn edit(pool: &mut DbPool, session: &Session, id: i64, f: &TimesheetForm) -> AppResult<()> {
        session.require_admin()?;
        let current = timesheets::find(&pool.conn, id)?.ok_or_else(|| not_found(id))?;

        let employee_id = match f.employee_id.as_deref() {
            Some(v) => validation::employee_id(v)?,
            None => current.employee_id,
        };
        let work_date = match f.work_date.as_deref() {
            Some(v) => require_date(v)?,
            None => current.work_date,
        };
        let rendered = match f.rendered_hours.as_deref() {
            Some(v) => hours("Rendered hours", v)?,
            None => current.rendered_hours,
        };
        let standard = match f.standard_hours.as_deref() {
            Some(v) => hours("Standard hours", v)?,
            None => current.standard_hours,
        };

        let ts = build(pool, id, employee_id, work_date, standard, rendered)?;
        let reassigned = ts.employee_id != current.employee_id;

        let tx = pool.transaction()?;
        let repriced = if reassigned {
            timesheets::delete_gross_pay(&tx, id)?
        } else {
            0
        };
        timesheets::update(&tx, &ts)?;
        audit(&tx, "edit", &format!("timesheet {id}"), "Timesheet updated");
        tx.commit()?;

        if repriced > 0 {
            tracing::info!(
                timesheet_id = id,
                from = current.employee_id,
                to = ts.employee_id,
                "gross pay dropped after reassignment"
            );
        }
        Ok(())
    }

    /// Removes the gross-pay row first, then the timesheet.
    pub fn delete(pool: &mut DbPool, session: &Session, id: i64) -> AppResult<()> {
        session.require_admin()?;

        let tx = pool.transaction()?;
        timesheets::delete_gross_pay(&tx, id)?;
        if timesheets::delete(&tx, id)? == 0 {
            return Err(not_found(id));
        }
        audit(&tx, "del", &format!("timesheet {id}"), "Timesheet deleted");
        tx.commit()?;
        Ok(())
    }
}
