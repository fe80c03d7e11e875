use crate::models::payroll::PayrollSummary;
use crate::utils::money::to_cents;
use rust_decimal::Decimal;
use serde::Serialize;

/// Flat payroll row shared by the CSV and JSON writers.
#[derive(Debug, Clone, Serialize)]
pub struct PayrollExport {
    pub payroll_id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub reference_no: String,
    pub start_cut_off: String,
    pub end_cut_off: String,
    pub total_gross_pay: Decimal,
    pub total_deduction: Decimal,
    pub net_pay: Decimal,
}

impl From<&PayrollSummary> for PayrollExport {
    fn from(s: &PayrollSummary) -> Self {
        Self {
            payroll_id: s.payroll.id,
            employee_id: s.payroll.employee_id,
            employee_name: format!("{} {}", s.first_name, s.last_name),
            reference_no: s.payroll.reference_no.clone(),
            start_cut_off: s.payroll.start_cut_off.to_string(),
            end_cut_off: s.payroll.end_cut_off.to_string(),
            total_gross_pay: to_cents(s.total_gross_pay),
            total_deduction: to_cents(s.total_deduction),
            net_pay: to_cents(s.net_pay),
        }
    }
}
