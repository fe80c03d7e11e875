use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Timesheet {
    pub id: i64,
    pub employee_id: i64,
    pub work_date: NaiveDate,
    pub standard_hours: Decimal,
    pub rendered_hours: Decimal,
    pub overtime_hours: Decimal,
}

impl Timesheet {
    /// Build a timesheet, deriving overtime from rendered vs standard hours.
    pub fn new(
        id: i64,
        employee_id: i64,
        work_date: NaiveDate,
        standard_hours: Decimal,
        rendered_hours: Decimal,
    ) -> Self {
        let overtime_hours = (rendered_hours - standard_hours).max(Decimal::ZERO);
        Self {
            id,
            employee_id,
            work_date,
            standard_hours,
            rendered_hours,
            overtime_hours,
        }
    }

    /// Hours paid at the standard rate.
    pub fn regular_hours(&self) -> Decimal {
        self.rendered_hours - self.overtime_hours
    }
}

/// Timesheet joined with the employee's name for listings.
#[derive(Debug, Clone, Serialize)]
pub struct TimesheetRow {
    #[serde(flatten)]
    pub timesheet: Timesheet,
    pub first_name: String,
    pub last_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    }

    #[test]
    fn overtime_is_hours_beyond_standard() {
        let ts = Timesheet::new(0, 1, day(), dec!(8), dec!(10.5));
        assert_eq!(ts.overtime_hours, dec!(2.5));
        assert_eq!(ts.regular_hours(), dec!(8));
    }

    #[test]
    fn short_day_has_no_overtime() {
        let ts = Timesheet::new(0, 1, day(), dec!(8), dec!(6));
        assert_eq!(ts.overtime_hours, Decimal::ZERO);
        assert_eq!(ts.regular_hours(), dec!(6));
    }
}
