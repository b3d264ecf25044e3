use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;

use crate::constants::DECIMAL_PRECISION;
use crate::errors::{CalculatorError, Result};
use crate::fx::CurrencyBridge;
use crate::market_data::market_data_model::PricePoint;
use crate::market_data::series_aligner::resolve_price;

use super::backtest_model::SimulatedPoint;

/// A fixed buy-and-hold position reconstructed from period-start prices.
#[derive(Debug, Clone)]
pub struct SimulatedPosition {
    pub symbol: String,
    pub shares: Decimal,
    pub native_currency: String,
    pub start_price: Decimal,
}

/// Reconstructs fixed share counts from weights and period-start prices,
/// then revalues the whole portfolio on every aligned date.
pub struct PerformanceSimulator {
    currency_bridge: Arc<CurrencyBridge>,
}

impl PerformanceSimulator {
    pub fn new(currency_bridge: Arc<CurrencyBridge>) -> Self {
        Self { currency_bridge }
    }

    /// Builds one buy-and-hold position per weighted symbol.
    ///
    /// A symbol with no usable series is excluded with a recorded warning;
    /// remaining weights are NOT re-normalized. An unsupported currency
    /// pair fails loudly here, before any simulation; only price gaps are
    /// absorbed. Fails with InsufficientData when nothing is simulatable.
    pub fn build_positions(
        &self,
        weights: &HashMap<String, Decimal>,
        series_by_symbol: &HashMap<String, Vec<PricePoint>>,
        start_date: NaiveDate,
        total_value: Decimal,
        display_currency: &str,
    ) -> Result<(Vec<SimulatedPosition>, Vec<String>)> {
        let mut symbols: Vec<&String> = weights.keys().collect();
        symbols.sort();

        let mut positions = Vec::with_capacity(symbols.len());
        let mut warnings = Vec::new();

        for symbol in symbols {
            let weight = weights[symbol];

            let series = match series_by_symbol.get(symbol) {
                Some(series) if !series.is_empty() => series,
                _ => {
                    warn!("Symbol '{}': no historical data, excluded from simulation", symbol);
                    warnings.push(format!(
                        "Symbol '{}' has no historical data and was excluded",
                        symbol
                    ));
                    continue;
                }
            };

            let start_price = match resolve_price(series, start_date) {
                Some(price) => price,
                None => {
                    // Series begins well after the window start; anchor on
                    // its earliest quote.
                    let earliest = &series[0];
                    warn!(
                        "Symbol '{}': no price resolvable at {}, using earliest quote from {}",
                        symbol, start_date, earliest.date
                    );
                    warnings.push(format!(
                        "Symbol '{}' has no price at {}; simulation anchored on {}",
                        symbol, start_date, earliest.date
                    ));
                    earliest.price
                }
            };

            if start_price <= Decimal::ZERO {
                warnings.push(format!(
                    "Symbol '{}' has a non-positive start price and was excluded",
                    symbol
                ));
                continue;
            }

            let native_currency = self.currency_bridge.native_currency(symbol).to_string();
            let investment = weight * total_value;
            let invested_native = self.currency_bridge.convert(
                investment,
                display_currency,
                &native_currency,
                start_date,
            )?;

            positions.push(SimulatedPosition {
                symbol: symbol.clone(),
                shares: invested_native / start_price,
                native_currency,
                start_price,
            });
        }

        if positions.is_empty() {
            return Err(CalculatorError::InsufficientData(
                "no usable historical data for any holding".to_string(),
            )
            .into());
        }

        Ok((positions, warnings))
    }

    /// Revalues the fixed positions on every axis date and derives the
    /// cumulative-return curve. The first point's return is exactly zero.
    pub fn simulate(
        &self,
        positions: &[SimulatedPosition],
        series_by_symbol: &HashMap<String, Vec<PricePoint>>,
        date_axis: &[NaiveDate],
        display_currency: &str,
    ) -> Result<Vec<SimulatedPoint>> {
        if date_axis.is_empty() {
            return Err(CalculatorError::InsufficientData(
                "no dates to simulate in the requested window".to_string(),
            )
            .into());
        }

        let mut values = Vec::with_capacity(date_axis.len());
        for &date in date_axis {
            let mut portfolio_value = Decimal::ZERO;

            for position in positions {
                let series = match series_by_symbol.get(&position.symbol) {
                    Some(series) => series,
                    None => continue,
                };
                let price = match resolve_price(series, date) {
                    Some(price) => price,
                    None => {
                        debug!(
                            "Symbol '{}': price gap on {}, contributes nothing",
                            position.symbol, date
                        );
                        continue;
                    }
                };

                let native_value = position.shares * price;
                match self.currency_bridge.convert(
                    native_value,
                    &position.native_currency,
                    display_currency,
                    date,
                ) {
                    Ok(value) => portfolio_value += value,
                    Err(e) => {
                        debug!(
                            "Symbol '{}': FX gap on {} ({}), contributes nothing",
                            position.symbol, date, e
                        );
                    }
                }
            }

            values.push(portfolio_value);
        }

        let initial_value = values[0];
        let points = date_axis
            .iter()
            .zip(values.iter())
            .enumerate()
            .map(|(index, (&date, &value))| {
                let cumulative_return_percent = if index == 0 || initial_value.is_zero() {
                    Decimal::ZERO
                } else {
                    ((value - initial_value) / initial_value * Decimal::ONE_HUNDRED)
                        .round_dp(DECIMAL_PRECISION)
                };
                SimulatedPoint {
                    date,
                    portfolio_value: value.round_dp(DECIMAL_PRECISION),
                    cumulative_return_percent,
                    benchmark_return_percent: None,
                }
            })
            .collect();

        Ok(points)
    }
}
