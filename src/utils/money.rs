//! Fixed-point parsing and rounding for salaries, hours and amounts.

use crate::errors::{AppError, AppResult};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use std::str::FromStr;

/// Largest accepted salary, amount or hour value: twelve integer digits.
pub const MAX_AMOUNT: Decimal = dec!(999999999999.99);

/// Round half-up to `dp` decimals (all payroll values are non-negative).
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to cents and pin the scale so 100 prints as 100.00.
pub fn to_cents(value: Decimal) -> Decimal {
    let mut v = round_half_up(value, 2);
    v.rescale(2);
    v
}

/// Parse a user supplied decimal, naming the field in the error.
pub fn parse_decimal(field: &str, raw: &str) -> AppResult<Decimal> {
    Decimal::from_str(raw.trim()).map_err(|_| AppError::InvalidNumber {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

/// Parse a decimal that must not be negative.
pub fn parse_amount(field: &str, raw: &str) -> AppResult<Decimal> {
    let v = parse_decimal(field, raw)?;
    if v.is_sign_negative() && !v.is_zero() {
        return Err(AppError::Validation(format!("{field} cannot be negative.")));
    }
    if v > MAX_AMOUNT {
        return Err(AppError::Validation(format!(
            "{field} cannot exceed {MAX_AMOUNT}."
        )));
    }
    Ok(v)
}

pub fn parse_optional_amount(field: &str, raw: Option<&str>) -> AppResult<Option<Decimal>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_amount(field, v).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_up_rounding() {
        assert_eq!(round_half_up(dec!(0.125), 2), dec!(0.13));
        assert_eq!(round_half_up(dec!(0.124), 2), dec!(0.12));
        assert_eq!(to_cents(dec!(100)).to_string(), "100.00");
    }

    #[test]
    fn parse_errors_name_the_field() {
        let err = parse_amount("Default Amount", "abc").unwrap_err();
        assert_eq!(err.to_string(), "Default Amount must be a number (got 'abc')");
        assert!(matches!(
            parse_amount("Base Salary", "-1"),
            Err(AppError::Validation(_))
        ));
        assert_eq!(parse_optional_amount("x", Some(" ")).unwrap(), None);
    }

    #[test]
    fn amounts_are_capped_at_twelve_integer_digits() {
        assert_eq!(
            parse_amount("Salary", "999999999999.99").unwrap(),
            MAX_AMOUNT
        );
        assert!(matches!(
            parse_amount("Salary", "1000000000000"),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            parse_amount("Default Amount", "50000000000000000000000000000"),
            Err(AppError::Validation(_))
        ));
    }
}
