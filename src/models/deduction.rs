use rust_decimal::Decimal;
use serde::Serialize;

/// Deduction template: copied into every payroll run at generation time.
#[derive(Debug, Clone, Serialize)]
pub struct Deduction {
    pub id: i64,
    pub description: String,
    pub default_amount: Decimal,
}
