use crate::errors::{AppError, AppResult};
use crate::models::payroll::{GrossPayLine, PayrollDeductionLine};
use crate::utils::money::to_cents;
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayrollTotals {
    pub gross: Decimal,
    pub deduction: Decimal,
    pub net: Decimal,
}

fn overflow(what: &str) -> AppError {
    AppError::Validation(format!("{what} is too large to compute."))
}

pub fn line_gross(line: &GrossPayLine) -> AppResult<Decimal> {
    let regular = line
        .rendered_hours
        .checked_sub(line.overtime_hours)
        .ok_or_else(|| overflow("Regular hours"))?;
    let regular_pay = regular
        .checked_mul(line.std_hourly_rate)
        .ok_or_else(|| overflow("Regular pay"))?;
    let overtime_pay = line
        .overtime_hours
        .checked_mul(line.ot_hourly_rate)
        .ok_or_else(|| overflow("Overtime pay"))?;
    regular_pay
        .checked_add(overtime_pay)
        .ok_or_else(|| overflow("Gross pay"))
}

fn checked_sum(values: impl IntoIterator<Item = Decimal>, what: &str) -> AppResult<Decimal> {
    values.into_iter().try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(v).ok_or_else(|| overflow(what))
    })
}

/// Aggregate one payroll: gross over its priced timesheets, deductions
/// over its snapshot lines, net as the difference.
pub fn payroll_totals(
    lines: &[GrossPayLine],
    deductions: &[PayrollDeductionLine],
) -> AppResult<PayrollTotals> {
    let line_pay = lines.iter().map(line_gross).collect::<AppResult<Vec<_>>>()?;
    let gross = to_cents(checked_sum(line_pay, "Total gross pay")?);
    let deduction = to_cents(checked_sum(
        deductions.iter().map(|d| d.amount),
        "Total deduction",
    )?);
    let net = gross
        .checked_sub(deduction)
        .ok_or_else(|| overflow("Net pay"))?;

    Ok(PayrollTotals {
        gross,
        deduction,
        net,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(rendered: Decimal, overtime: Decimal) -> GrossPayLine {
        GrossPayLine {
            rendered_hours: rendered,
            overtime_hours: overtime,
            std_hourly_rate: dec!(100.00),
            ot_hourly_rate: dec!(125.00),
        }
    }

    fn deduction(amount: Decimal) -> PayrollDeductionLine {
        PayrollDeductionLine {
            id: 0,
            deduction_id: 0,
            description: "x".into(),
            amount,
        }
    }

    #[test]
    fn overtime_hours_use_the_overtime_rate() {
        assert_eq!(line_gross(&line(dec!(10), dec!(2))).unwrap(), dec!(1050.00));
    }

    #[test]
    fn totals_and_net() {
        let t = payroll_totals(
            &[line(dec!(8), dec!(0)), line(dec!(10), dec!(2))],
            &[deduction(dec!(150.00)), deduction(dec!(50.50))],
        )
        .unwrap();
        assert_eq!(t.gross, dec!(1850.00));
        assert_eq!(t.deduction, dec!(200.50));
        assert_eq!(t.net, dec!(1649.50));
    }

    #[test]
    fn empty_payroll_is_all_zero() {
        let t = payroll_totals(&[], &[]).unwrap();
        assert!(t.gross.is_zero() && t.deduction.is_zero() && t.net.is_zero());
        assert_eq!(t.net.to_string(), "0.00");
    }

    #[test]
    fn overflowing_deductions_are_an_error() {
        let huge = dec!(50000000000000000000000000000);
        let err = payroll_totals(&[], &[deduction(huge), deduction(huge)]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn overflowing_line_pay_is_an_error() {
        let l = GrossPayLine {
            rendered_hours: Decimal::MAX,
            overtime_hours: Decimal::ZERO,
            std_hourly_rate: dec!(2),
            ot_hourly_rate: Decimal::ZERO,
        };
        assert!(line_gross(&l).is_err());
        assert!(payroll_totals(&[l], &[]).is_err());
    }
}
