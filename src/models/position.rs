use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Position {
    pub id: i64,
    pub name: String,
    pub base_salary: Decimal,
    pub department_id: Option<i64>,
}

/// Position joined with its department name for listings.
#[derive(Debug, Clone, Serialize)]
pub struct PositionRow {
    #[serde(flatten)]
    pub position: Position,
    pub department_name: Option<String>,
}
