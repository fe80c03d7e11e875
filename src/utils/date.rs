use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub const DATE_FMT: &str = "%Y-%m-%d";

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FMT).ok()
}

/// Parse a mandatory `YYYY-MM-DD` field.
pub fn require_date(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// Parse an optional `YYYY-MM-DD` field; blank counts as absent.
pub fn optional_date(s: Option<&str>) -> AppResult<Option<NaiveDate>> {
    match s.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => require_date(v).map(Some),
    }
}

/// Parse a cut-off range and check that it is not inverted.
pub fn parse_range(start: &str, end: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let s = require_date(start)?;
    let e = require_date(end)?;
    if s > e {
        return Err(AppError::Validation(format!(
            "Start cut-off {} is after end cut-off {}.",
            s, e
        )));
    }
    Ok((s, e))
}

pub fn to_db(d: &NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_iso_dates() {
        assert!(parse_date("2025-02-30").is_none());
        assert!(parse_date("15/01/2025").is_none());
        assert!(matches!(require_date("2025-1-x"), Err(AppError::InvalidDate(_))));
    }

    #[test]
    fn inverted_range_is_a_validation_error() {
        assert!(parse_range("2025-01-01", "2025-01-15").is_ok());
        assert!(matches!(
            parse_range("2025-02-01", "2025-01-15"),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn blank_optional_date_is_none() {
        assert_eq!(optional_date(Some("  ")).unwrap(), None);
        assert_eq!(optional_date(None).unwrap(), None);
        assert!(optional_date(Some("1990-05-01")).unwrap().is_some());
    }
}
