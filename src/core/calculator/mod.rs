pub mod rates;
pub mod totals;
