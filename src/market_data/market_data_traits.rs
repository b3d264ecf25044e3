use async_trait::async_trait;
use chrono::NaiveDate;

use super::market_data_errors::MarketDataError;
use super::market_data_model::PricePoint;

/// Collaborator that supplies historical daily prices.
///
/// Implementations own fetching, caching and rate limiting; the engine only
/// requires that returned series are ascending by date with positive prices.
#[async_trait]
pub trait HistoricalPriceProviderTrait: Send + Sync {
    async fn get_historical_prices(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PricePoint>, MarketDataError>;
}
