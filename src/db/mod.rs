//! Data-access layer: one module per table, one function per operation.
//! Functions take a plain `&Connection` so they run the same inside
//! and outside a transaction.

pub mod deductions;
pub mod departments;
pub mod employees;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod payrolls;
pub mod pool;
pub mod positions;
pub mod search;
pub mod stats;
pub mod timesheets;
pub mod users;

use crate::errors::AppError;
use crate::utils::date::DATE_FMT;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row};
use std::str::FromStr;

fn conversion_error(idx: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

/// Read a TEXT column holding a fixed-point value.
pub(crate) fn decimal_at(row: &Row, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    Decimal::from_str(&raw).map_err(|_| {
        conversion_error(
            idx,
            AppError::InvalidNumber {
                field: format!("column {idx}"),
                value: raw.clone(),
            },
        )
    })
}

pub(crate) fn opt_decimal_at(row: &Row, idx: usize) -> rusqlite::Result<Option<Decimal>> {
    match row.get::<_, Option<String>>(idx)? {
        None => Ok(None),
        Some(raw) => Decimal::from_str(&raw).map(Some).map_err(|_| {
            conversion_error(
                idx,
                AppError::InvalidNumber {
                    field: format!("column {idx}"),
                    value: raw.clone(),
                },
            )
        }),
    }
}

/// Read a TEXT column holding a `YYYY-MM-DD` date.
pub(crate) fn date_at(row: &Row, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    NaiveDate::parse_from_str(&raw, DATE_FMT)
        .map_err(|_| conversion_error(idx, AppError::InvalidDate(raw.clone())))
}

pub(crate) fn opt_date_at(row: &Row, idx: usize) -> rusqlite::Result<Option<NaiveDate>> {
    match row.get::<_, Option<String>>(idx)? {
        None => Ok(None),
        Some(raw) if raw.is_empty() => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(&raw, DATE_FMT)
            .map(Some)
            .map_err(|_| conversion_error(idx, AppError::InvalidDate(raw.clone()))),
    }
}

/// `SELECT 1 FROM <table> WHERE id = ?` style existence probe.
pub(crate) fn exists(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare_cached(sql)?;
    Ok(stmt.query_row(params, |_| Ok(())).optional()?.is_some())
}

pub(crate) fn count(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> rusqlite::Result<i64> {
    let mut stmt = conn.prepare_cached(sql)?;
    stmt.query_row(params, |row| row.get(0))
}

/// Build a `%term%` pattern for `LIKE ... ESCAPE '\'`.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("ann"), "%ann%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}
