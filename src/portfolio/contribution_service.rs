use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use log::warn;
use rust_decimal::Decimal;

use crate::constants::DECIMAL_PRECISION;
use crate::fx::CurrencyBridge;
use crate::holdings::Holding;
use crate::market_data::market_data_model::PricePoint;
use crate::market_data::series_aligner::resolve_price;

use super::backtest_model::AssetContribution;

/// Decomposes total portfolio return into per-asset dollar and percentage
/// contributions.
pub struct ContributionAttributor {
    currency_bridge: Arc<CurrencyBridge>,
}

impl ContributionAttributor {
    pub fn new(currency_bridge: Arc<CurrencyBridge>) -> Self {
        Self { currency_bridge }
    }

    /// Recomputes each weighted symbol's fixed share count and isolated
    /// return, exactly as the simulator does, and expresses it against the
    /// whole portfolio's initial value.
    ///
    /// Symbols with no price data are excluded without re-normalizing the
    /// remaining weights. Sorted descending by dollar contribution; ties
    /// keep holdings order (stable sort).
    pub fn attribute(
        &self,
        holdings: &[Holding],
        weights: &HashMap<String, Decimal>,
        series_by_symbol: &HashMap<String, Vec<PricePoint>>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        total_value: Decimal,
        display_currency: &str,
    ) -> Vec<AssetContribution> {
        let mut contributions = Vec::with_capacity(holdings.len());

        for holding in holdings {
            let weight = match weights.get(&holding.symbol) {
                Some(weight) => *weight,
                None => continue,
            };

            let series = match series_by_symbol.get(&holding.symbol) {
                Some(series) if !series.is_empty() => series,
                _ => {
                    warn!(
                        "Symbol '{}': no historical data, excluded from attribution",
                        holding.symbol
                    );
                    continue;
                }
            };

            let start_price = resolve_price(series, start_date).unwrap_or(series[0].price);
            let end_price = resolve_price(series, end_date)
                .unwrap_or_else(|| series[series.len() - 1].price);
            if start_price <= Decimal::ZERO {
                continue;
            }

            let native_currency = self.currency_bridge.native_currency(&holding.symbol);
            let investment = weight * total_value;
            let invested_native = match self.currency_bridge.convert(
                investment,
                display_currency,
                native_currency,
                start_date,
            ) {
                Ok(amount) => amount,
                Err(e) => {
                    warn!(
                        "Symbol '{}': attribution skipped, conversion failed: {}",
                        holding.symbol, e
                    );
                    continue;
                }
            };

            let shares = invested_native / start_price;
            let return_native = shares * (end_price - start_price);
            let return_amount = match self.currency_bridge.convert(
                return_native,
                native_currency,
                display_currency,
                end_date,
            ) {
                Ok(amount) => amount,
                Err(e) => {
                    warn!(
                        "Symbol '{}': attribution skipped, conversion failed: {}",
                        holding.symbol, e
                    );
                    continue;
                }
            };

            let return_percent = (end_price / start_price - Decimal::ONE) * Decimal::ONE_HUNDRED;
            let contribution_percent = if total_value.is_zero() {
                Decimal::ZERO
            } else {
                return_amount / total_value * Decimal::ONE_HUNDRED
            };

            contributions.push(AssetContribution {
                symbol: holding.symbol.clone(),
                name: holding.display_name(),
                weight_percent: (weight * Decimal::ONE_HUNDRED).round_dp(DECIMAL_PRECISION),
                return_amount: return_amount.round_dp(DECIMAL_PRECISION),
                return_percent: return_percent.round_dp(DECIMAL_PRECISION),
                contribution_amount: return_amount.round_dp(DECIMAL_PRECISION),
                contribution_percent: contribution_percent.round_dp(DECIMAL_PRECISION),
            });
        }

        contributions.sort_by(|a, b| b.contribution_amount.cmp(&a.contribution_amount));
        contributions
    }
}
