use crate::errors::{AppError, AppResult};
use crate::models::role::Role;

/// Authenticated identity handed to every operation.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: i64,
    pub employee_id: Option<i64>,
    pub username: String,
    pub role: Role,
}

/// What an operation needs from the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ManageRecords,
    GeneratePayroll,
    GlobalSearch,
    Export,
    /// Read access to one employee's own data.
    ViewEmployee(i64),
}

impl Capability {
    fn describe(&self) -> String {
        match self {
            Capability::ManageRecords => "managing records requires an Admin account".into(),
            Capability::GeneratePayroll => "generating payroll requires an Admin account".into(),
            Capability::GlobalSearch => "global search requires an Admin account".into(),
            Capability::Export => "exporting payrolls requires an Admin account".into(),
            Capability::ViewEmployee(id) => format!("you may not view records of employee {id}"),
        }
    }
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn allows(&self, cap: Capability) -> bool {
        match (self.role, cap) {
            (Role::Admin, _) => true,
            (Role::Employee, Capability::ViewEmployee(id)) => self.employee_id == Some(id),
            (Role::Employee, _) => false,
        }
    }

    pub fn require(&self, cap: Capability) -> AppResult<()> {
        if self.allows(cap) {
            Ok(())
        } else {
            tracing::warn!(user = %self.username, ?cap, "capability denied");
            Err(AppError::Forbidden(cap.describe()))
        }
    }

    pub fn require_admin(&self) -> AppResult<()> {
        self.require(Capability::ManageRecords)
    }

    /// Employee whose data a self-service view shows: the requested one
    /// for admins, otherwise the caller's own linked employee.
    pub fn target_employee(&self, requested: Option<i64>) -> AppResult<i64> {
        let id = match (requested, self.employee_id) {
            (Some(id), _) => id,
            (None, Some(own)) => own,
            (None, None) => {
                return Err(AppError::Validation(format!(
                    "Account '{}' is not linked to an employee; pass --employee.",
                    self.username
                )));
            }
        };
        self.require(Capability::ViewEmployee(id))?;
        Ok(id)
    }
}
