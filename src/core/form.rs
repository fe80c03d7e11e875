//! Helpers shared by the record add/edit operations. Raw values come
//! straight from the command line; an edit leaves a field untouched
//! when it is absent and clears an optional field when it is blank.

use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_date;
use chrono::NaiveDate;

/// Merge an optional field of an edit form into its stored value.
pub fn merge<T>(
    current: Option<T>,
    raw: Option<&str>,
    parse: impl FnOnce(&str) -> AppResult<T>,
) -> AppResult<Option<T>> {
    match raw.map(str::trim) {
        None => Ok(current),
        Some("") => Ok(None),
        Some(v) => parse(v).map(Some),
    }
}

/// Parse an optional field of an add form; blank counts as absent.
pub fn optional<T>(raw: Option<&str>, parse: impl FnOnce(&str) -> AppResult<T>) -> AppResult<Option<T>> {
    merge(None, raw, parse)
}

/// Merge a mandatory text field: absent keeps it, present is validated.
pub fn merge_required(
    current: String,
    raw: Option<&str>,
    validate: impl FnOnce(&str) -> AppResult<()>,
) -> AppResult<String> {
    match raw {
        None => Ok(current),
        Some(v) => {
            validate(v)?;
            Ok(v.trim().to_string())
        }
    }
}

pub fn parse_id(label: &str, raw: &str) -> AppResult<i64> {
    raw.trim().parse::<i64>().map_err(|_| AppError::InvalidNumber {
        field: label.to_string(),
        value: raw.to_string(),
    })
}

pub fn parse_age(raw: &str) -> AppResult<u32> {
    match raw.trim().parse::<u32>() {
        Ok(a) if a <= 150 => Ok(a),
        _ => Err(AppError::Validation("Age must be a number.".into())),
    }
}

/// Date field whose error names the field, e.g. "DOB must be YYYY-MM-DD".
pub fn labeled_date(label: &str, raw: &str) -> AppResult<NaiveDate> {
    parse_date(raw).ok_or_else(|| AppError::Validation(format!("{label} must be YYYY-MM-DD")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_keeps_blank_clears() {
        let parse = |v: &str| parse_id("Department ID", v);
        assert_eq!(merge(Some(3), None, parse).unwrap(), Some(3));
        assert_eq!(merge(Some(3), Some(" "), parse).unwrap(), None);
        assert_eq!(merge(Some(3), Some("7"), parse).unwrap(), Some(7));
    }

    #[test]
    fn bad_values_name_the_field() {
        let err = parse_id("Department ID", "x").unwrap_err();
        assert_eq!(err.to_string(), "Department ID must be a number (got 'x')");
        let err = labeled_date("DOB", "01/02/1990").unwrap_err();
        assert_eq!(err.to_string(), "DOB must be YYYY-MM-DD");
    }
}
