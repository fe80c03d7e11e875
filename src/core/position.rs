use crate::core::access::Session;
use crate::core::form;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::{departments, positions};
use crate::errors::{AppError, AppResult};
use crate::models::position::{Position, PositionRow};
use crate::utils::money::{parse_amount, parse_optional_amount};
use crate::utils::validation;
use clap::Args;
use rust_decimal::Decimal;

/// Raw position fields as typed on the command line.
#[derive(Debug, Default, Clone, Args)]
pub struct PositionForm {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub base_salary: Option<String>,
    #[arg(long)]
    pub department_id: Option<String>,
}

pub struct PositionLogic;

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Position {id} does not exist."))
}

fn check_department(pool: &DbPool, department_id: Option<i64>) -> AppResult<()> {
    if let Some(d) = department_id
        && !departments::exists_by_id(&pool.conn, d)?
    {
        return Err(AppError::NotFound(format!("Department {d} does not exist.")));
    }
    Ok(())
}

impl PositionLogic {
    pub fn list(pool: &DbPool, session: &Session, filter: Option<&str>) -> AppResult<Vec<PositionRow>> {
        session.require_admin()?;
        positions::list(&pool.conn, filter)
    }

    pub fn add(pool: &DbPool, session: &Session, form: &PositionForm) -> AppResult<i64> {
        session.require_admin()?;

        let name = form.name.as_deref().unwrap_or_default();
        validation::required("Position name", name)?;
        let base_salary = parse_optional_amount("Base salary", form.base_salary.as_deref())?
            .unwrap_or(Decimal::ZERO);
        let department_id = form::optional(form.department_id.as_deref(), |v| {
            form::parse_id("Department ID", v)
        })?;
        check_department(pool, department_id)?;

        let position = Position {
            id: 0,
            name: name.trim().to_string(),
            base_salary,
            department_id,
        };
        let id = positions::insert(&pool.conn, &position)?;
        audit(&pool.conn, "add", &format!("position {id}"), &position.name);
        Ok(id)
    }

    pub fn edit(pool: &DbPool, session: &Session, id: i64, form: &PositionForm) -> AppResult<()> {
        session.require_admin()?;
        let current = positions::find(&pool.conn, id)?.ok_or_else(|| not_found(id))?;

        let name = form::merge_required(current.name, form.name.as_deref(), |v| {
            validation::required("Position name", v)
        })?;
        let base_salary = match form.base_salary.as_deref() {
            Some(v) => parse_amount("Base salary", v)?,
            None => current.base_salary,
        };
        let department_id = form::merge(current.department_id, form.department_id.as_deref(), |v| {
            form::parse_id("Department ID", v)
        })?;
        check_department(pool, department_id)?;

        let position = Position {
            id,
            name,
            base_salary,
            department_id,
        };
        positions::update(&pool.conn, &position)?;
        audit(&pool.conn, "edit", &format!("position {id}"), &position.name);
        Ok(())
    }

    /// Refused while employees hold the position.
    pub fn delete(pool: &DbPool, session: &Session, id: i64) -> AppResult<()> {
        session.require_admin()?;
        if positions::find(&pool.conn, id)?.is_none() {
            return Err(not_found(id));
        }

        let employees = positions::employee_count(&pool.conn, id)?;
        if employees > 0 {
            return Err(AppError::Conflict(format!(
                "Position {id} is still held by {employees} employee(s)."
            )));
        }

        positions::delete(&pool.conn, id)?;
        audit(&pool.conn, "del", &format!("position {id}"), "Position deleted");
        Ok(())
    }
}
