use crate::core::access::Session;
use crate::core::auth::hash_password;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::{employees, users};
use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::models::user::{User, UserRow};
use crate::utils::validation;
use clap::Args;

/// Raw account fields as typed on the command line.
#[derive(Debug, Default, Clone, Args)]
pub struct UserForm {
    #[arg(long)]
    pub employee_id: Option<String>,
    #[arg(long)]
    pub username: Option<String>,
    #[arg(id = "new_password", long = "new-password", value_name = "PASSWORD")]
    pub password: Option<String>,
    #[arg(long, help = "admin or employee (default: employee)")]
    pub role: Option<String>,
}

pub struct UserLogic;

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("User {id} does not exist."))
}

fn parse_role(raw: &str) -> AppResult<Role> {
    Role::from_code(raw)
        .ok_or_else(|| AppError::Validation("Role must be admin or employee.".into()))
}

/// Shared checks for a new or changed account: linked employee exists,
/// one account per (employee, role), unique username.
fn check_account(pool: &DbPool, user: &User, exclude_id: Option<i64>) -> AppResult<()> {
    match (user.role, user.employee_id) {
        (Role::Employee, None) => {
            return Err(AppError::Validation(
                "Employee accounts must be linked to an employee ID.".into(),
            ));
        }
        (_, Some(emp)) => {
            if !employees::exists_by_id(&pool.conn, emp)? {
                return Err(AppError::NotFound("Employee ID does not exist.".into()));
            }
            if users::has_account(&pool.conn, emp, user.role, exclude_id)? {
                return Err(AppError::Conflict(format!(
                    "Employee {emp} already has an account with role {}.",
                    user.role
                )));
            }
        }
        (Role::Admin, None) => {}
    }

    if users::username_taken(&pool.conn, &user.username, exclude_id)? {
        return Err(AppError::Conflict(
            "Username already exists. Choose another.".into(),
        ));
    }
    Ok(())
}

impl UserLogic {
    pub fn list(pool: &DbPool, session: &Session, role: Option<&str>) -> AppResult<Vec<UserRow>> {
        session.require_admin()?;
        let role = role.map(parse_role).transpose()?;
        users::list(&pool.conn, role)
    }

    pub fn add(pool: &DbPool, session: &Session, f: &UserForm) -> AppResult<i64> {
        session.require_admin()?;

        let username = f.username.as_deref().unwrap_or_default();
        let password = f.password.as_deref().unwrap_or_default();
        validation::username(username)?;
        validation::password(password)?;
        let role = match f.role.as_deref() {
            Some(r) => parse_role(r)?,
            None => Role::Employee,
        };
        let employee_id = f
            .employee_id
            .as_deref()
            .map(validation::employee_id)
            .transpose()?;

        let mut user = User {
            id: 0,
            employee_id,
            username: username.trim().to_string(),
            password_hash: String::new(),
            role,
        };
        check_account(pool, &user, None)?;

        user.password_hash = hash_password(password)?;
        let id = users::insert(
            &pool.conn,
            user.employee_id,
            &user.username,
            &user.password_hash,
            user.role,
        )?;
        audit(
            &pool.conn,
            "add",
            &format!("user {id}"),
            &format!("{} account '{}'", user.role, user.username),
        );
        Ok(id)
    }

    pub fn edit(pool: &DbPool, session: &Session, id: i64, f: &UserForm) -> AppResult<()> {
        session.require_admin()?;
        let mut user = users::find(&pool.conn, id)?.ok_or_else(|| not_found(id))?;

        if let Some(name) = f.username.as_deref() {
            validation::username(name)?;
            user.username = name.trim().to_string();
        }
        if let Some(r) = f.role.as_deref() {
            user.role = parse_role(r)?;
        }
        if let Some(raw) = f.employee_id.as_deref() {
            user.employee_id = if raw.trim().is_empty() {
                None
            } else {
                Some(validation::employee_id(raw)?)
            };
        }
        if let Some(pw) = f.password.as_deref() {
            validation::password(pw)?;
        }
        check_account(pool, &user, Some(id))?;

        if let Some(pw) = f.password.as_deref() {
            user.password_hash = hash_password(pw)?;
        }
        users::update(&pool.conn, &user)?;
        audit(&pool.conn, "edit", &format!("user {id}"), &user.username);
        Ok(())
    }

    pub fn delete(pool: &DbPool, session: &Session, id: i64) -> AppResult<()> {
        session.require_admin()?;
        if id == session.user_id {
            return Err(AppError::Conflict(
                "You cannot delete the account you are logged in with.".into(),
            ));
        }
        if users::delete(&pool.conn, id)? == 0 {
            return Err(not_found(id));
        }
        audit(&pool.conn, "del", &format!("user {id}"), "Account deleted");
        Ok(())
    }
}
