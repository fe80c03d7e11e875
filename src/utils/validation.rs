//! Field validators shared by login, registration and record forms.
//! Every check runs before any database call.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::sync::LazyLock;

pub const MAX_USERNAME: usize = 50;
pub const MAX_PASSWORD: usize = 20;
pub const MAX_NAME: usize = 50;
pub const MAX_EMPLOYEE_ID_DIGITS: usize = 8;

static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z ]+$").expect("static regex"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+$").expect("static regex"));

fn invalid(msg: impl Into<String>) -> AppError {
    AppError::Validation(msg.into())
}

fn is_blank(v: &str) -> bool {
    v.trim().is_empty()
}

pub fn username(v: &str) -> AppResult<()> {
    if is_blank(v) {
        return Err(invalid("Username cannot be empty."));
    }
    if v.chars().count() > MAX_USERNAME {
        return Err(invalid(format!(
            "Username cannot exceed {MAX_USERNAME} characters."
        )));
    }
    Ok(())
}

pub fn password(v: &str) -> AppResult<()> {
    if is_blank(v) {
        return Err(invalid("Password cannot be empty."));
    }
    if v.chars().count() > MAX_PASSWORD {
        return Err(invalid(format!(
            "Password cannot exceed {MAX_PASSWORD} characters."
        )));
    }
    Ok(())
}

/// Person names: letters and spaces only.
pub fn person_name(label: &str, v: &str) -> AppResult<()> {
    if is_blank(v) {
        return Err(invalid(format!("{label} cannot be empty.")));
    }
    if v.chars().count() > MAX_NAME {
        return Err(invalid(format!(
            "{label} cannot exceed {MAX_NAME} characters."
        )));
    }
    if !NAME_RE.is_match(v) {
        return Err(invalid(format!(
            "{label} can only contain letters and spaces."
        )));
    }
    Ok(())
}

pub fn email(v: &str) -> AppResult<()> {
    if is_blank(v) {
        return Err(invalid("Email cannot be empty."));
    }
    if !EMAIL_RE.is_match(v) {
        return Err(invalid("Invalid email format."));
    }
    Ok(())
}

/// Employee ids typed by hand: digits only, at most eight of them.
pub fn employee_id(v: &str) -> AppResult<i64> {
    let v = v.trim();
    if v.is_empty() {
        return Err(invalid("Employee ID cannot be empty."));
    }
    if !v.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("Employee ID must contain numbers only."));
    }
    if v.len() > MAX_EMPLOYEE_ID_DIGITS {
        return Err(invalid(format!(
            "Employee ID cannot exceed {MAX_EMPLOYEE_ID_DIGITS} digits."
        )));
    }
    v.parse::<i64>()
        .map_err(|_| invalid("Employee ID must contain numbers only."))
}

/// Free-text label that must not be blank (department name, description...).
pub fn required(label: &str, v: &str) -> AppResult<()> {
    if is_blank(v) {
        return Err(invalid(format!("{label} cannot be empty.")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_bounds() {
        assert!(username("alice").is_ok());
        assert!(username("   ").is_err());
        assert!(username(&"a".repeat(50)).is_ok());
        assert!(username(&"a".repeat(51)).is_err());
    }

    #[test]
    fn password_bounds() {
        assert!(password(&"p".repeat(20)).is_ok());
        let err = password(&"p".repeat(21)).unwrap_err();
        assert_eq!(err.to_string(), "Password cannot exceed 20 characters.");
    }

    #[test]
    fn names_are_letters_and_spaces() {
        assert!(person_name("First name", "Mary Ann").is_ok());
        assert!(person_name("First name", "R2D2").is_err());
        assert!(person_name("Last name", "").is_err());
    }

    #[test]
    fn email_shape() {
        assert!(email("juan.cruz@example.ph").is_ok());
        assert!(email("juan.cruz.example.ph").is_err());
    }

    #[test]
    fn employee_id_digits() {
        assert_eq!(employee_id(" 42 ").unwrap(), 42);
        assert!(employee_id("4a").is_err());
        assert!(employee_id("123456789").is_err());
    }
}
