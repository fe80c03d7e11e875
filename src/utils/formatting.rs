//! Formatting utilities used for CLI and export outputs.

use rust_decimal::Decimal;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Two-decimal rendering of a money/hours value, blank when missing.
pub fn fmt_money(value: Option<Decimal>) -> String {
    match value {
        Some(v) => crate::utils::money::to_cents(v).to_string(),
        None => String::new(),
    }
}

pub fn opt<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}
