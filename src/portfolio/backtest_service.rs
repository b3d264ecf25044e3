use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;

use crate::errors::{CalculatorError, Result, ValidationError};
use crate::fx::{CurrencyBridge, RateProviderTrait};
use crate::holdings::{calculate_weights, Holding};
use crate::market_data::market_data_model::PricePoint;
use crate::market_data::series_aligner::build_date_axis;
use crate::market_data::HistoricalPriceProviderTrait;

use super::backtest_model::{BacktestPeriod, BacktestReport};
use super::benchmark_service::BenchmarkComparator;
use super::contribution_service::ContributionAttributor;
use super::metrics_service::calculate_metrics;
use super::simulation_service::PerformanceSimulator;

#[async_trait]
pub trait BacktestServiceTrait: Send + Sync {
    /// Replays the current holdings as a fixed buy-and-hold portfolio over
    /// `[start_date, end_date]` and derives performance, risk and
    /// attribution figures, optionally against a benchmark symbol.
    async fn run_backtest(
        &self,
        holdings: &[Holding],
        start_date: NaiveDate,
        end_date: NaiveDate,
        display_currency: &str,
        benchmark_symbol: Option<&str>,
    ) -> Result<BacktestReport>;
}

/// Stateless, request-scoped backtest engine. Collaborators supply prices
/// and FX rates; everything else is pure computation.
pub struct BacktestService {
    price_provider: Arc<dyn HistoricalPriceProviderTrait>,
    simulator: PerformanceSimulator,
    attributor: ContributionAttributor,
}

impl BacktestService {
    pub fn new(
        price_provider: Arc<dyn HistoricalPriceProviderTrait>,
        rate_provider: Arc<dyn RateProviderTrait>,
    ) -> Self {
        let currency_bridge = Arc::new(CurrencyBridge::new(rate_provider));
        Self {
            price_provider,
            simulator: PerformanceSimulator::new(Arc::clone(&currency_bridge)),
            attributor: ContributionAttributor::new(currency_bridge),
        }
    }

    /// Issues one independent fetch per symbol and joins them all; a failed
    /// fetch degrades that symbol to an empty series with a warning instead
    /// of aborting the join.
    async fn fetch_series(
        &self,
        symbols: &[String],
        start_date: NaiveDate,
        end_date: NaiveDate,
        warnings: &mut Vec<String>,
    ) -> HashMap<String, Vec<PricePoint>> {
        let fetches = symbols.iter().map(|symbol| {
            let provider = Arc::clone(&self.price_provider);
            let symbol = symbol.clone();
            async move {
                let result = provider
                    .get_historical_prices(&symbol, start_date, end_date)
                    .await;
                (symbol, result)
            }
        });

        let results = futures::future::join_all(fetches).await;

        let mut series_by_symbol = HashMap::new();
        for (symbol, result) in results {
            match result {
                Ok(series) => {
                    debug!("Fetched {} price points for '{}'", series.len(), symbol);
                    series_by_symbol.insert(symbol, series);
                }
                Err(e) => {
                    warn!("Failed to fetch prices for '{}': {}", symbol, e);
                    warnings.push(format!("Price fetch failed for '{}': {}", symbol, e));
                }
            }
        }
        series_by_symbol
    }
}

#[async_trait]
impl BacktestServiceTrait for BacktestService {
    async fn run_backtest(
        &self,
        holdings: &[Holding],
        start_date: NaiveDate,
        end_date: NaiveDate,
        display_currency: &str,
        benchmark_symbol: Option<&str>,
    ) -> Result<BacktestReport> {
        if start_date > end_date {
            return Err(ValidationError::InvalidInput(format!(
                "Start date {} must not be after end date {}",
                start_date, end_date
            ))
            .into());
        }
        if display_currency.is_empty() {
            return Err(ValidationError::MissingField("displayCurrency".to_string()).into());
        }
        if holdings.is_empty() {
            return Err(
                CalculatorError::InsufficientData("no holdings to simulate".to_string()).into(),
            );
        }

        let weights = calculate_weights(holdings);
        if weights.is_empty() {
            return Err(CalculatorError::InsufficientData(
                "total portfolio value is zero".to_string(),
            )
            .into());
        }
        let total_value: Decimal = holdings.iter().map(|holding| holding.current_value).sum();

        // Fan-out: per-symbol fetches (plus the benchmark) are independent.
        let mut symbols: Vec<String> = weights.keys().cloned().collect();
        symbols.sort();
        if let Some(benchmark) = benchmark_symbol {
            if !symbols.iter().any(|symbol| symbol == benchmark) {
                symbols.push(benchmark.to_string());
            }
        }

        let mut warnings = Vec::new();
        let mut series_by_symbol = self
            .fetch_series(&symbols, start_date, end_date, &mut warnings)
            .await;

        let benchmark_series = benchmark_symbol
            .map(|symbol| {
                if weights.contains_key(symbol) {
                    // Benchmark doubles as a holding; keep its series for both.
                    series_by_symbol.get(symbol).cloned().unwrap_or_default()
                } else {
                    series_by_symbol.remove(symbol).unwrap_or_default()
                }
            })
            .unwrap_or_default();

        let date_axis = build_date_axis(&series_by_symbol, start_date, end_date);
        if date_axis.is_empty() {
            return Err(CalculatorError::InsufficientData(format!(
                "no usable historical data between {} and {}",
                start_date, end_date
            ))
            .into());
        }

        // Sequential from here: simulate -> metrics -> attribute -> compare.
        let (positions, position_warnings) = self.simulator.build_positions(
            &weights,
            &series_by_symbol,
            start_date,
            total_value,
            display_currency,
        )?;
        warnings.extend(position_warnings);

        let mut performance = self.simulator.simulate(
            &positions,
            &series_by_symbol,
            &date_axis,
            display_currency,
        )?;

        let mut metrics = calculate_metrics(&performance);

        let last_axis_date = *date_axis.last().unwrap_or(&end_date);
        let asset_contributions = self.attributor.attribute(
            holdings,
            &weights,
            &series_by_symbol,
            start_date,
            last_axis_date,
            total_value,
            display_currency,
        );

        let benchmark = match benchmark_symbol {
            Some(symbol) => {
                let comparator = BenchmarkComparator::new(&self.simulator);
                let comparison = comparator.compare(
                    symbol,
                    benchmark_series,
                    &mut performance,
                    start_date,
                    end_date,
                    total_value,
                    display_currency,
                )?;
                if comparison.is_none() {
                    warnings.push(format!(
                        "Benchmark '{}' has no usable data; comparison skipped",
                        symbol
                    ));
                }
                if let Some(comparison) = &comparison {
                    metrics.excess_return_percent = Some(comparison.excess_return_percent);
                }
                comparison
            }
            None => None,
        };

        Ok(BacktestReport {
            period: BacktestPeriod {
                start_date,
                end_date,
                display_currency: display_currency.to_string(),
            },
            performance,
            metrics,
            asset_contributions,
            benchmark,
            warnings,
        })
    }
}
