use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Payroll {
    pub id: i64,
    pub employee_id: i64,
    pub reference_no: String,
    pub start_cut_off: NaiveDate,
    pub end_cut_off: NaiveDate,
}

/// Deduction snapshot attached to one payroll run.
#[derive(Debug, Clone, Serialize)]
pub struct PayrollDeductionLine {
    pub id: i64,
    pub deduction_id: i64,
    pub description: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct GrossPay {
    pub id: i64,
    pub timesheet_id: i64,
    pub std_hourly_rate: Decimal,
    pub ot_hourly_rate: Decimal,
}

/// Hours and rates of one timesheet counted in a payroll's gross pay.
#[derive(Debug, Clone)]
pub struct GrossPayLine {
    pub rendered_hours: Decimal,
    pub overtime_hours: Decimal,
    pub std_hourly_rate: Decimal,
    pub ot_hourly_rate: Decimal,
}

/// Payroll with its computed totals and the employee's name.
#[derive(Debug, Clone, Serialize)]
pub struct PayrollSummary {
    #[serde(flatten)]
    pub payroll: Payroll,
    pub first_name: String,
    pub last_name: String,
    pub total_gross_pay: Decimal,
    pub total_deduction: Decimal,
    pub net_pay: Decimal,
}

/// Outcome of one payroll generation.
#[derive(Debug, Clone)]
pub struct PayrollRun {
    pub payroll_id: i64,
    pub reference_no: String,
    pub deductions_copied: usize,
    pub gross_pay_created: usize,
    pub timesheets_skipped: usize,
}
