pub mod currency_bridge;
pub mod fx_errors;
pub mod fx_traits;
pub mod markets;

pub use currency_bridge::CurrencyBridge;
pub use fx_errors::FxError;
pub use fx_traits::RateProviderTrait;
