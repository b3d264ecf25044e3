use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::constants::{
    DAYS_PER_YEAR_DECIMAL, DECIMAL_PRECISION, RISK_FREE_RATE_PERCENT, SQRT_TRADING_DAYS_APPROX,
    TRADING_DAYS_PER_YEAR,
};

use super::backtest_model::{PerformanceMetrics, SimulatedPoint};

/// Derives return and risk statistics from an ordered simulated value curve.
///
/// Every division-by-zero and zero-volatility case resolves to a zero
/// sentinel rather than NaN/Infinity so results stay serializable.
pub fn calculate_metrics(points: &[SimulatedPoint]) -> PerformanceMetrics {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return empty_metrics(),
    };

    let initial_value = first.portfolio_value;
    let final_value = last.portfolio_value;

    let total_return = final_value - initial_value;
    let total_return_percent = if initial_value.is_zero() {
        Decimal::ZERO
    } else {
        total_return / initial_value * Decimal::ONE_HUNDRED
    };

    // Elapsed calendar days between first and last data point, not the
    // nominal requested window.
    let days = (last.date - first.date).num_days();
    let annualized_return_percent =
        calculate_annualized_return(initial_value, final_value, days, total_return_percent);

    let max_drawdown_percent = calculate_max_drawdown(points);
    let volatility_percent = calculate_volatility(points);

    let sharpe_ratio = if volatility_percent.is_zero() {
        Decimal::ZERO
    } else {
        (annualized_return_percent - RISK_FREE_RATE_PERCENT) / volatility_percent
    };

    PerformanceMetrics {
        total_return: total_return.round_dp(DECIMAL_PRECISION),
        total_return_percent: total_return_percent.round_dp(DECIMAL_PRECISION),
        annualized_return_percent: annualized_return_percent.round_dp(DECIMAL_PRECISION),
        max_drawdown_percent: max_drawdown_percent.round_dp(DECIMAL_PRECISION),
        volatility_percent: volatility_percent.round_dp(DECIMAL_PRECISION),
        sharpe_ratio: sharpe_ratio.round_dp(DECIMAL_PRECISION),
        excess_return_percent: None,
    }
}

fn empty_metrics() -> PerformanceMetrics {
    PerformanceMetrics {
        total_return: Decimal::ZERO,
        total_return_percent: Decimal::ZERO,
        annualized_return_percent: Decimal::ZERO,
        max_drawdown_percent: Decimal::ZERO,
        volatility_percent: Decimal::ZERO,
        sharpe_ratio: Decimal::ZERO,
        excess_return_percent: None,
    }
}

/// ((final/initial)^(365/days) - 1) * 100, guarded for `days <= 0` and
/// non-positive value ratios.
fn calculate_annualized_return(
    initial_value: Decimal,
    final_value: Decimal,
    days: i64,
    total_return_percent: Decimal,
) -> Decimal {
    if days <= 0 || initial_value.is_zero() {
        return total_return_percent;
    }

    let ratio = final_value / initial_value;
    if ratio <= Decimal::ZERO {
        // Total loss (or worse); cap at -100% rather than raising a
        // negative base to a fractional power.
        return dec!(-100);
    }

    let exponent = DAYS_PER_YEAR_DECIMAL / Decimal::from(days);
    (ratio.powd(exponent) - Decimal::ONE) * Decimal::ONE_HUNDRED
}

/// Running-peak drawdown, reported as a negative percentage.
fn calculate_max_drawdown(points: &[SimulatedPoint]) -> Decimal {
    if points.len() <= 1 {
        return Decimal::ZERO;
    }

    let mut peak = points[0].portfolio_value;
    let mut max_drawdown = Decimal::ZERO;

    for point in points {
        if point.portfolio_value > peak {
            peak = point.portfolio_value;
        } else if peak > Decimal::ZERO {
            let drawdown = (peak - point.portfolio_value) / peak * Decimal::ONE_HUNDRED;
            max_drawdown = max_drawdown.max(drawdown);
        }
    }

    -max_drawdown
}

/// Sample standard deviation of day-over-day simple returns, annualized by
/// sqrt(252), in percent.
fn calculate_volatility(points: &[SimulatedPoint]) -> Decimal {
    if points.len() <= 1 {
        return Decimal::ZERO;
    }

    let mut daily_returns = Vec::with_capacity(points.len() - 1);
    for window in points.windows(2) {
        let previous = window[0].portfolio_value;
        let current = window[1].portfolio_value;
        if previous.is_zero() {
            daily_returns.push(Decimal::ZERO);
        } else {
            daily_returns.push(current / previous - Decimal::ONE);
        }
    }

    if daily_returns.len() < 2 {
        return Decimal::ZERO;
    }

    let count = Decimal::from(daily_returns.len() as u64);
    let mean: Decimal = daily_returns.iter().copied().sum::<Decimal>() / count;
    let sum_squared_diff: Decimal = daily_returns
        .iter()
        .map(|&r| {
            let diff = r - mean;
            diff * diff
        })
        .sum();

    let variance = sum_squared_diff / (count - Decimal::ONE);
    if variance.is_sign_negative() {
        return Decimal::ZERO;
    }

    let daily_volatility = variance.sqrt().unwrap_or(Decimal::ZERO);
    let annualization_factor = Decimal::from(TRADING_DAYS_PER_YEAR)
        .sqrt()
        .unwrap_or(SQRT_TRADING_DAYS_APPROX);

    daily_volatility * annualization_factor * Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn curve(values: &[Decimal]) -> Vec<SimulatedPoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &value)| SimulatedPoint {
                date: start + chrono::Duration::days(i as i64),
                portfolio_value: value,
                cumulative_return_percent: Decimal::ZERO,
                benchmark_return_percent: None,
            })
            .collect()
    }

    #[test]
    fn test_total_and_drawdown_on_known_curve() {
        // 100 -> 110 -> 90 -> 120: peak 110, trough 90.
        let points = curve(&[dec!(100), dec!(110), dec!(90), dec!(120)]);
        let metrics = calculate_metrics(&points);

        assert_eq!(metrics.total_return, dec!(20));
        assert_eq!(metrics.total_return_percent, dec!(20));
        // -(110 - 90) / 110 * 100
        assert_eq!(metrics.max_drawdown_percent, dec!(-18.181818));
        assert!(metrics.volatility_percent > Decimal::ZERO);
    }

    #[test]
    fn test_single_point_boundary() {
        let points = curve(&[dec!(100)]);
        let metrics = calculate_metrics(&points);

        assert_eq!(metrics.total_return, Decimal::ZERO);
        assert_eq!(metrics.max_drawdown_percent, Decimal::ZERO);
        assert_eq!(metrics.volatility_percent, Decimal::ZERO);
        assert_eq!(metrics.sharpe_ratio, Decimal::ZERO);
    }

    #[test]
    fn test_flat_curve_has_zero_volatility_and_sharpe() {
        let points = curve(&[dec!(100), dec!(100), dec!(100), dec!(100)]);
        let metrics = calculate_metrics(&points);

        assert_eq!(metrics.volatility_percent, Decimal::ZERO);
        assert_eq!(metrics.sharpe_ratio, Decimal::ZERO);
        assert_eq!(metrics.max_drawdown_percent, Decimal::ZERO);
    }

    #[test]
    fn test_rising_curve_has_zero_drawdown() {
        let points = curve(&[dec!(100), dec!(105), dec!(111), dec!(120)]);
        let metrics = calculate_metrics(&points);
        assert_eq!(metrics.max_drawdown_percent, Decimal::ZERO);
    }

    #[test]
    fn test_annualized_return_over_one_year() {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let points = vec![
            SimulatedPoint {
                date: start,
                portfolio_value: dec!(100),
                cumulative_return_percent: Decimal::ZERO,
                benchmark_return_percent: None,
            },
            SimulatedPoint {
                date: end,
                portfolio_value: dec!(110),
                cumulative_return_percent: dec!(10),
                benchmark_return_percent: None,
            },
        ];

        let metrics = calculate_metrics(&points);
        // 365 elapsed days: annualized == total within rounding.
        assert_eq!(metrics.annualized_return_percent, dec!(10));
    }

    #[test]
    fn test_empty_curve_yields_zero_sentinels() {
        let metrics = calculate_metrics(&[]);
        assert_eq!(metrics.total_return, Decimal::ZERO);
        assert_eq!(metrics.sharpe_ratio, Decimal::ZERO);
    }
}
