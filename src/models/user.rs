use crate::models::role::Role;
use serde::Serialize;

/// Account row. The password hash never leaves the data-access layer
/// except for verification.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub employee_id: Option<i64>,
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
    pub role: Role,
}

/// User joined with the linked employee's display name.
#[derive(Debug, Clone, Serialize)]
pub struct UserRow {
    #[serde(flatten)]
    pub user: User,
    pub employee_name: Option<String>,
}
