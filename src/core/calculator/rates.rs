use crate::config::Config;
use crate::utils::money::round_half_up;
use rust_decimal::Decimal;

/// Hourly rates stored on a gross-pay row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourlyRates {
    pub standard: Decimal,
    pub overtime: Decimal,
}

/// Standard rate = salary / monthly hours, overtime = standard × multiplier,
/// both rounded half-up to cents. No salary on file yields zero rates.
pub fn hourly_rates(monthly_salary: Option<Decimal>, cfg: &Config) -> HourlyRates {
    let Some(salary) = monthly_salary else {
        return HourlyRates {
            standard: Decimal::ZERO,
            overtime: Decimal::ZERO,
        };
    };

    let standard = round_half_up(salary / cfg.monthly_hours(), 2);
    let overtime = round_half_up(standard * cfg.overtime_multiplier, 2);
    HourlyRates { standard, overtime }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn salary_17600_gives_100_and_125() {
        let r = hourly_rates(Some(dec!(17600.00)), &Config::default());
        assert_eq!(r.standard, dec!(100.00));
        assert_eq!(r.overtime, dec!(125.00));
    }

    #[test]
    fn rates_round_half_up_to_cents() {
        // 20000 / 176 = 113.636..., then 113.64 × 1.25
        let r = hourly_rates(Some(dec!(20000)), &Config::default());
        assert_eq!(r.standard, dec!(113.64));
        assert_eq!(r.overtime, dec!(142.05));
    }

    #[test]
    fn missing_salary_means_zero_rates() {
        let r = hourly_rates(None, &Config::default());
        assert!(r.standard.is_zero() && r.overtime.is_zero());
    }

    #[test]
    fn divisor_follows_config() {
        let cfg = Config {
            working_days_per_month: 20,
            ..Config::default()
        };
        let r = hourly_rates(Some(dec!(16000)), &cfg);
        assert_eq!(r.standard, dec!(100.00));
    }
}
