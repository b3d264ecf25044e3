use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use log::{debug, warn};
use rust_decimal::Decimal;

use crate::constants::{ALL_HOLDINGS_GROUP, DECIMAL_PRECISION, UNCATEGORIZED_GROUP};
use crate::errors::{CalculatorError, Result, ValidationError};
use crate::fx::markets;
use crate::holdings::Holding;
use crate::market_data::market_data_model::PricePoint;
use crate::market_data::series_aligner::resolve_price;
use crate::market_data::HistoricalPriceProviderTrait;

use super::grouping_model::{Classification, GroupBy, GroupedMetrics, HoldingGroup};

/// Days of recent quotes fetched to locate the previous trading day.
const DAY_CHANGE_LOOKBACK_DAYS: i64 = 7;

#[async_trait]
pub trait GroupingServiceTrait: Send + Sync {
    /// Partitions a holdings snapshot into named groups along one dimension
    /// and computes per-group totals plus portfolio-wide gain and day-change
    /// figures. `group_by` is the caller-supplied dimension string
    /// (`assetStyle`, `assetClass`, `currency`, `none`).
    async fn get_grouped_metrics(
        &self,
        holdings: &[Holding],
        classification: &Classification,
        display_currency: &str,
        group_by: &str,
    ) -> Result<GroupedMetrics>;
}

pub struct GroupingService {
    price_provider: Arc<dyn HistoricalPriceProviderTrait>,
}

impl GroupingService {
    pub fn new(price_provider: Arc<dyn HistoricalPriceProviderTrait>) -> Self {
        Self { price_provider }
    }

    fn group_key(
        holding: &Holding,
        classification: &Classification,
        group_by: GroupBy,
    ) -> String {
        match group_by {
            GroupBy::AssetStyle => classification
                .styles
                .get(&holding.symbol)
                .cloned()
                .unwrap_or_else(|| UNCATEGORIZED_GROUP.to_string()),
            GroupBy::AssetClass => classification
                .asset_classes
                .get(&holding.symbol)
                .cloned()
                .unwrap_or_else(|| UNCATEGORIZED_GROUP.to_string()),
            GroupBy::Currency => markets::native_currency_for_symbol(&holding.symbol).to_string(),
            GroupBy::None => ALL_HOLDINGS_GROUP.to_string(),
        }
    }

    /// Fetches a short recent series per symbol (independent, joined) for
    /// previous-trading-day resolution. Failures degrade to missing series.
    async fn fetch_recent_series(
        &self,
        holdings: &[Holding],
    ) -> HashMap<String, Vec<PricePoint>> {
        let end_date = Utc::now().date_naive();
        let start_date = end_date - Duration::days(DAY_CHANGE_LOOKBACK_DAYS);

        let fetches = holdings.iter().map(|holding| {
            let provider = Arc::clone(&self.price_provider);
            let symbol = holding.symbol.clone();
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
                    series_by_symbol.insert(symbol, series);
                }
                Err(e) => {
                    warn!(
                        "Failed to fetch recent prices for '{}': {}; day change degrades to zero",
                        symbol, e
                    );
                }
            }
        }
        series_by_symbol
    }

    /// Previous-day value for one holding, from the ratio of the previous
    /// trading day's price to the latest price. The ratio is
    /// currency-invariant, so no FX round trip is needed. `None` means no
    /// usable data: the holding degrades to "no change".
    fn previous_day_value(
        holding: &Holding,
        series_by_symbol: &HashMap<String, Vec<PricePoint>>,
    ) -> Option<Decimal> {
        let series = series_by_symbol.get(&holding.symbol)?;
        let latest = series.last()?;
        if latest.price <= Decimal::ZERO {
            return None;
        }
        let previous_target = latest.date - Duration::days(1);
        let previous_price = resolve_price(series, previous_target)?;
        Some(holding.current_value * previous_price / latest.price)
    }
}

#[async_trait]
impl GroupingServiceTrait for GroupingService {
    async fn get_grouped_metrics(
        &self,
        holdings: &[Holding],
        classification: &Classification,
        display_currency: &str,
        group_by: &str,
    ) -> Result<GroupedMetrics> {
        let group_by = GroupBy::parse(group_by)?;
        if display_currency.is_empty() {
            return Err(ValidationError::MissingField("displayCurrency".to_string()).into());
        }

        if holdings.is_empty() {
            return Err(
                CalculatorError::InsufficientData("no holdings to group".to_string()).into(),
            );
        }

        let total_value: Decimal = holdings.iter().map(|holding| holding.current_value).sum();
        let total_cost: Decimal = holdings.iter().map(|holding| holding.cost_basis).sum();
        let total_gain = total_value - total_cost;
        let percentage_return = if total_cost.is_zero() {
            Decimal::ZERO
        } else {
            total_gain / total_cost * Decimal::ONE_HUNDRED
        };

        // Day change needs yesterday's prices; fetched concurrently, each
        // failure degrading that holding to "no change".
        let series_by_symbol = self.fetch_recent_series(holdings).await;
        let mut previous_total = Decimal::ZERO;
        for holding in holdings {
            match Self::previous_day_value(holding, &series_by_symbol) {
                Some(previous_value) => previous_total += previous_value,
                None => {
                    debug!(
                        "Symbol '{}': no previous-day price, treated as unchanged",
                        holding.symbol
                    );
                    previous_total += holding.current_value;
                }
            }
        }
        let day_change = total_value - previous_total;
        let day_change_percent = if previous_total.is_zero() {
            Decimal::ZERO
        } else {
            day_change / previous_total * Decimal::ONE_HUNDRED
        };

        // Single pass over holdings; chronology never matters here, so a
        // plain map plus a final sort by value is enough.
        let mut grouped: HashMap<String, Vec<Holding>> = HashMap::new();
        for holding in holdings {
            let key = Self::group_key(holding, classification, group_by);
            grouped.entry(key).or_default().push(holding.clone());
        }

        let mut groups: Vec<HoldingGroup> = grouped
            .into_iter()
            .map(|(group_name, members)| {
                let group_value: Decimal =
                    members.iter().map(|holding| holding.current_value).sum();
                let percentage_of_total = if total_value.is_zero() {
                    Decimal::ZERO
                } else {
                    (group_value / total_value * Decimal::ONE_HUNDRED)
                        .round_dp(DECIMAL_PRECISION)
                };
                HoldingGroup {
                    group_name,
                    group_value: group_value.round_dp(DECIMAL_PRECISION),
                    percentage_of_total,
                    holdings: members,
                }
            })
            .collect();
        groups.sort_by(|a, b| b.group_value.cmp(&a.group_value));

        Ok(GroupedMetrics {
            total_value: total_value.round_dp(DECIMAL_PRECISION),
            total_gain: total_gain.round_dp(DECIMAL_PRECISION),
            percentage_return: percentage_return.round_dp(DECIMAL_PRECISION),
            day_change: day_change.round_dp(DECIMAL_PRECISION),
            day_change_percent: day_change_percent.round_dp(DECIMAL_PRECISION),
            groups,
        })
    }
}
