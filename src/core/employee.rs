use crate::core::access::{Capability, Session};
use crate::core::form;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::{departments, employees, positions};
use crate::errors::{AppError, AppResult};
use crate::models::employee::{Employee, EmployeeRow, Gender};
use crate::utils::money::parse_amount;
use crate::utils::validation;
use clap::Args;

/// Raw employee fields as typed on the command line.
#[derive(Debug, Default, Clone, Args)]
pub struct EmployeeForm {
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long, help = "M = Male, F = Female")]
    pub gender: Option<String>,
    #[arg(long)]
    pub age: Option<String>,
    #[arg(long, help = "Date of birth (YYYY-MM-DD)")]
    pub dob: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long, help = "Date of hire (YYYY-MM-DD)")]
    pub date_of_hire: Option<String>,
    #[arg(long)]
    pub department_id: Option<String>,
    #[arg(long)]
    pub position_id: Option<String>,
    #[arg(long)]
    pub monthly_salary: Option<String>,
}

pub struct EmployeeLogic;

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Employee {id} does not exist."))
}

fn parse_gender(v: &str) -> AppResult<Gender> {
    Gender::from_code(v)
        .ok_or_else(|| AppError::Validation("Gender must be Male or Female.".into()))
}

fn parse_email(v: &str) -> AppResult<String> {
    validation::email(v)?;
    Ok(v.to_string())
}

fn text(v: &str) -> AppResult<String> {
    Ok(v.to_string())
}

/// Apply the form on top of `base`, validating every supplied field.
fn apply_form(pool: &DbPool, base: Employee, f: &EmployeeForm) -> AppResult<Employee> {
    let last_name = form::merge_required(base.last_name, f.last_name.as_deref(), |v| {
        validation::person_name("Last name", v)
    })?;
    let first_name = form::merge_required(base.first_name, f.first_name.as_deref(), |v| {
        validation::person_name("First name", v)
    })?;

    let e = Employee {
        id: base.id,
        last_name,
        first_name,
        email: form::merge(base.email, f.email.as_deref(), parse_email)?,
        gender: form::merge(base.gender, f.gender.as_deref(), parse_gender)?,
        age: form::merge(base.age, f.age.as_deref(), form::parse_age)?,
        dob: form::merge(base.dob, f.dob.as_deref(), |v| form::labeled_date("DOB", v))?,
        address: form::merge(base.address, f.address.as_deref(), text)?,
        phone: form::merge(base.phone, f.phone.as_deref(), text)?,
        date_of_hire: form::merge(base.date_of_hire, f.date_of_hire.as_deref(), |v| {
            form::labeled_date("Date of hire", v)
        })?,
        department_id: form::merge(base.department_id, f.department_id.as_deref(), |v| {
            form::parse_id("Department ID", v)
        })?,
        position_id: form::merge(base.position_id, f.position_id.as_deref(), |v| {
            form::parse_id("Position ID", v)
        })?,
        monthly_salary: form::merge(base.monthly_salary, f.monthly_salary.as_deref(), |v| {
            parse_amount("Monthly salary", v)
        })?,
    };

    if let Some(d) = e.department_id
        && !departments::exists_by_id(&pool.conn, d)?
    {
        return Err(AppError::NotFound(format!("Department {d} does not exist.")));
    }
    if let Some(p) = e.position_id
        && !positions::exists_by_id(&pool.conn, p)?
    {
        return Err(AppError::NotFound(format!("Position {p} does not exist.")));
    }

    Ok(e)
}

impl EmployeeLogic {
    pub fn list(pool: &DbPool, session: &Session, filter: Option<&str>) -> AppResult<Vec<EmployeeRow>> {
        session.require_admin()?;
        employees::list(&pool.conn, filter)
    }

    /// Single profile; employees may only open their own.
    pub fn show(pool: &DbPool, session: &Session, id: i64) -> AppResult<EmployeeRow> {
        session.require(Capability::ViewEmployee(id))?;
        employees::find(&pool.conn, id)?.ok_or_else(|| not_found(id))
    }

    pub fn add(pool: &DbPool, session: &Session, f: &EmployeeForm) -> AppResult<i64> {
        session.require_admin()?;
        if f.last_name.is_none() {
            return Err(AppError::Validation("Last name cannot be empty.".into()));
        }
        if f.first_name.is_none() {
            return Err(AppError::Validation("First name cannot be empty.".into()));
        }

        let e = apply_form(pool, Employee::default(), f)?;
        let id = employees::insert(&pool.conn, &e)?;
        audit(&pool.conn, "add", &format!("employee {id}"), &e.full_name());
        tracing::info!(employee_id = id, "employee added");
        Ok(id)
    }

    pub fn edit(pool: &DbPool, session: &Session, id: i64, f: &EmployeeForm) -> AppResult<()> {
        session.require_admin()?;
        let current = employees::find(&pool.conn, id)?
            .ok_or_else(|| not_found(id))?
            .employee;

        let e = apply_form(pool, current, f)?;
        employees::update(&pool.conn, &e)?;
        audit(&pool.conn, "edit", &format!("employee {id}"), &e.full_name());
        Ok(())
    }

    /// Refused while timesheets, payrolls or accounts reference the employee.
    pub fn delete(pool: &DbPool, session: &Session, id: i64) -> AppResult<()> {
        session.require_admin()?;
        if !employees::exists_by_id(&pool.conn, id)? {
            return Err(not_found(id));
        }

        let deps = employees::dependents(&pool.conn, id)?;
        if !deps.is_empty() {
            return Err(AppError::Conflict(format!(
                "Employee {id} still has {} timesheet(s), {} payroll(s) and {} account(s).",
                deps.timesheets, deps.payrolls, deps.users
            )));
        }

        employees::delete(&pool.conn, id)?;
        audit(&pool.conn, "del", &format!("employee {id}"), "Employee deleted");
        Ok(())
    }
}
