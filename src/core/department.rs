use crate::core::access::Session;
use crate::db::departments;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::department::Department;
use crate::utils::validation;

pub struct DepartmentLogic;

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Department {id} does not exist."))
}

impl DepartmentLogic {
    pub fn list(pool: &DbPool, session: &Session, filter: Option<&str>) -> AppResult<Vec<Department>> {
        session.require_admin()?;
        departments::list(&pool.conn, filter)
    }

    pub fn add(pool: &DbPool, session: &Session, name: &str) -> AppResult<i64> {
        session.require_admin()?;
        validation::required("Department name", name)?;

        let id = departments::insert(&pool.conn, name.trim())?;
        audit(&pool.conn, "add", &format!("department {id}"), name.trim());
        tracing::info!(department_id = id, "department added");
        Ok(id)
    }

    pub fn edit(pool: &DbPool, session: &Session, id: i64, name: &str) -> AppResult<()> {
        session.require_admin()?;
        validation::required("Department name", name)?;

        if departments::update(&pool.conn, id, name.trim())? == 0 {
            return Err(not_found(id));
        }
        audit(&pool.conn, "edit", &format!("department {id}"), name.trim());
        Ok(())
    }

    /// Refused while positions or employees still reference the department.
    pub fn delete(pool: &DbPool, session: &Session, id: i64) -> AppResult<()> {
        session.require_admin()?;
        if departments::find(&pool.conn, id)?.is_none() {
            return Err(not_found(id));
        }

        let (positions, employees) = departments::dependents(&pool.conn, id)?;
        if positions > 0 || employees > 0 {
            return Err(AppError::Conflict(format!(
                "Department {id} is still used by {positions} position(s) and {employees} employee(s)."
            )));
        }

        departments::delete(&pool.conn, id)?;
        audit(&pool.conn, "del", &format!("department {id}"), "Department deleted");
        Ok(())
    }
}
