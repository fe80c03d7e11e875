use crate::core::access::Session;
use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::{employees, users};
use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::models::user::User;
use crate::utils::validation;
use argon2::{
    Argon2, PasswordHash, PasswordVerifier,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};

/// Hash a password into a salted Argon2id PHC string.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string();
    Ok(hash)
}

/// Check a password against a stored PHC string.
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(password_hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

pub struct AuthLogic;

impl AuthLogic {
    /// Validate the credentials and open a session.
    pub fn login(pool: &DbPool, username: &str, password: &str) -> AppResult<Session> {
        validation::username(username)?;
        validation::password(password)?;

        let user = users::find_by_username(&pool.conn, username.trim())?
            .ok_or(AppError::InvalidCredentials)?;

        // a malformed stored hash is treated like a wrong password
        let ok = verify_password(password, &user.password_hash).unwrap_or_else(|e| {
            tracing::warn!(user_id = user.id, error = %e, "stored password hash is unreadable");
            false
        });
        if !ok {
            tracing::info!(username = %user.username, "login rejected");
            return Err(AppError::InvalidCredentials);
        }

        tracing::debug!(user_id = user.id, role = %user.role, "login ok");
        Ok(Session {
            user_id: user.id,
            employee_id: user.employee_id,
            username: user.username,
            role: user.role,
        })
    }

    /// Self registration: an Employee account for an existing employee.
    pub fn register(
        pool: &DbPool,
        employee_id_raw: &str,
        username: &str,
        password: &str,
    ) -> AppResult<User> {
        let employee_id = validation::employee_id(employee_id_raw)?;
        validation::username(username)?;
        validation::password(password)?;
        let username = username.trim();

        if !employees::exists_by_id(&pool.conn, employee_id)? {
            return Err(AppError::NotFound("Employee ID does not exist.".into()));
        }
        if users::has_account(&pool.conn, employee_id, Role::Employee, None)? {
            return Err(AppError::Conflict(format!(
                "Employee {employee_id} already has an account."
            )));
        }
        if users::username_taken(&pool.conn, username, None)? {
            return Err(AppError::Conflict(
                "Username already exists. Choose another.".into(),
            ));
        }

        let hash = hash_password(password)?;
        let id = users::insert(&pool.conn, Some(employee_id), username, &hash, Role::Employee)?;
        audit(
            &pool.conn,
            "register",
            username,
            &format!("Employee {employee_id} registered an account"),
        );

        Ok(User {
            id,
            employee_id: Some(employee_id),
            username: username.to_string(),
            password_hash: hash,
            role: Role::Employee,
        })
    }

    /// First Admin account, not linked to any employee. Used by `init`.
    pub fn bootstrap_admin(pool: &DbPool, username: &str, password: &str) -> AppResult<i64> {
        validation::username(username)?;
        validation::password(password)?;
        let username = username.trim();

        if users::username_taken(&pool.conn, username, None)? {
            return Err(AppError::Conflict(
                "Username already exists. Choose another.".into(),
            ));
        }

        let hash = hash_password(password)?;
        let id = users::insert(&pool.conn, None, username, &hash, Role::Admin)?;
        audit(&pool.conn, "init", username, "Bootstrap admin account created");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;

    fn pool() -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        init_db(&pool.conn).unwrap();
        pool
    }

    #[test]
    fn hash_roundtrip() {
        let hash = hash_password("secret").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("secret", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn same_password_gets_different_salts() {
        assert_ne!(hash_password("x").unwrap(), hash_password("x").unwrap());
    }

    #[test]
    fn login_with_bootstrap_admin() {
        let pool = pool();
        AuthLogic::bootstrap_admin(&pool, "root", "toor").unwrap();

        let s = AuthLogic::login(&pool, "root", "toor").unwrap();
        assert_eq!(s.role, Role::Admin);
        assert_eq!(s.employee_id, None);

        assert!(matches!(
            AuthLogic::login(&pool, "root", "nope"),
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            AuthLogic::login(&pool, "ghost", "toor"),
            Err(AppError::InvalidCredentials)
        ));
    }

    #[test]
    fn blank_credentials_fail_validation() {
        let pool = pool();
        assert!(matches!(
            AuthLogic::login(&pool, "", "x"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn register_needs_an_existing_employee() {
        let pool = pool();
        assert!(matches!(
            AuthLogic::register(&pool, "9", "someone", "pw"),
            Err(AppError::NotFound(_))
        ));
    }
}
