pub mod market_data_errors;
pub mod market_data_model;
pub mod market_data_traits;
pub mod series_aligner;

pub use market_data_errors::MarketDataError;
pub use market_data_model::PricePoint;
pub use market_data_traits::HistoricalPriceProviderTrait;
