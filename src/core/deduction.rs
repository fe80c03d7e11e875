use crate::core::access::Session;
use crate::db::deductions;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::deduction::Deduction;
use crate::utils::money::parse_amount;
use crate::utils::validation;

pub struct DeductionLogic;

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Deduction {id} does not exist."))
}

/// "Default Amount must be a number." rather than the generic parse error.
fn amount(raw: &str) -> AppResult<rust_decimal::Decimal> {
    parse_amount("Default Amount", raw).map_err(|e| match e {
        AppError::InvalidNumber { .. } => {
            AppError::Validation("Default Amount must be a number.".into())
        }
        other => other,
    })
}

impl DeductionLogic {
    pub fn list(pool: &DbPool, session: &Session, filter: Option<&str>) -> AppResult<Vec<Deduction>> {
        session.require_admin()?;
        deductions::list(&pool.conn, filter)
    }

    pub fn add(pool: &DbPool, session: &Session, description: &str, default_amount: &str) -> AppResult<i64> {
        session.require_admin()?;
        validation::required("Description", description)?;
        let default_amount = amount(default_amount)?;

        let d = Deduction {
            id: 0,
            description: description.trim().to_string(),
            default_amount,
        };
        let id = deductions::insert(&pool.conn, &d)?;
        audit(&pool.conn, "add", &format!("deduction {id}"), &d.description);
        Ok(id)
    }

    /// Changing a template never touches amounts already copied into payrolls.
    pub fn edit(
        pool: &DbPool,
        session: &Session,
        id: i64,
        description: Option<&str>,
        default_amount: Option<&str>,
    ) -> AppResult<()> {
        session.require_admin()?;
        let mut d = deductions::find(&pool.conn, id)?.ok_or_else(|| not_found(id))?;

        if let Some(desc) = description {
            validation::required("Description", desc)?;
            d.description = desc.trim().to_string();
        }
        if let Some(raw) = default_amount {
            d.default_amount = amount(raw)?;
        }

        deductions::update(&pool.conn, &d)?;
        audit(&pool.conn, "edit", &format!("deduction {id}"), &d.description);
        Ok(())
    }

    /// Refused once the template has been copied into a payroll.
    pub fn delete(pool: &DbPool, session: &Session, id: i64) -> AppResult<()> {
        session.require_admin()?;
        if deductions::find(&pool.conn, id)?.is_none() {
            return Err(not_found(id));
        }

        let used = deductions::usage_count(&pool.conn, id)?;
        if used > 0 {
            return Err(AppError::Conflict(format!(
                "Deduction {id} is referenced by {used} payroll deduction line(s)."
            )));
        }

        deductions::delete(&pool.conn, id)?;
        audit(&pool.conn, "del", &format!("deduction {id}"), "Deduction deleted");
        Ok(())
    }
}
