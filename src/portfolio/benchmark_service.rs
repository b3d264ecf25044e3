use std::collections::HashMap;

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::errors::Result;
use crate::market_data::market_data_model::PricePoint;
use crate::market_data::series_aligner::build_date_axis;

use super::backtest_model::{BenchmarkComparison, SimulatedPoint};
use super::simulation_service::PerformanceSimulator;

/// Runs the single-symbol variant of the portfolio simulation against a
/// benchmark and merges its return curve onto the portfolio's points.
pub struct BenchmarkComparator<'a> {
    simulator: &'a PerformanceSimulator,
}

impl<'a> BenchmarkComparator<'a> {
    pub fn new(simulator: &'a PerformanceSimulator) -> Self {
        Self { simulator }
    }

    /// Simulates `symbol` with weight 1.0 over its own date axis, then sets
    /// `benchmark_return_percent` on portfolio points by exact date match
    /// only; dates the benchmark lacks stay unset. Degrades to `None` with
    /// a warning when the benchmark has no usable data.
    pub fn compare(
        &self,
        symbol: &str,
        series: Vec<PricePoint>,
        portfolio_points: &mut [SimulatedPoint],
        start_date: NaiveDate,
        end_date: NaiveDate,
        total_value: Decimal,
        display_currency: &str,
    ) -> Result<Option<BenchmarkComparison>> {
        if series.is_empty() {
            warn!("Benchmark '{}': no historical data, comparison skipped", symbol);
            return Ok(None);
        }

        let mut weights = HashMap::new();
        weights.insert(symbol.to_string(), dec!(1));
        let mut series_by_symbol = HashMap::new();
        series_by_symbol.insert(symbol.to_string(), series);

        let axis = build_date_axis(&series_by_symbol, start_date, end_date);
        if axis.is_empty() {
            warn!(
                "Benchmark '{}': no quotes between {} and {}, comparison skipped",
                symbol, start_date, end_date
            );
            return Ok(None);
        }

        let (positions, _warnings) = match self.simulator.build_positions(
            &weights,
            &series_by_symbol,
            start_date,
            total_value,
            display_currency,
        ) {
            Ok(built) => built,
            Err(e) => {
                // A broken benchmark never fails the backtest itself.
                warn!("Benchmark '{}': simulation failed ({}), comparison skipped", symbol, e);
                return Ok(None);
            }
        };
        let benchmark_points =
            self.simulator
                .simulate(&positions, &series_by_symbol, &axis, display_currency)?;

        let returns_by_date: HashMap<NaiveDate, Decimal> = benchmark_points
            .iter()
            .map(|point| (point.date, point.cumulative_return_percent))
            .collect();

        for point in portfolio_points.iter_mut() {
            point.benchmark_return_percent = returns_by_date.get(&point.date).copied();
        }

        let benchmark_final = benchmark_points
            .last()
            .map_or(Decimal::ZERO, |point| point.cumulative_return_percent);
        let portfolio_final = portfolio_points
            .last()
            .map_or(Decimal::ZERO, |point| point.cumulative_return_percent);

        Ok(Some(BenchmarkComparison {
            symbol: symbol.to_string(),
            cumulative_return_percent: benchmark_final,
            excess_return_percent: portfolio_final - benchmark_final,
        }))
    }
}
