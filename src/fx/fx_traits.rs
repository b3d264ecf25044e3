use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::fx_errors::FxError;

/// Collaborator that converts amounts between currencies.
///
/// Rate sourcing and caching live behind this trait. Implementations must
/// fail loudly (`FxError::RateNotFound`) on unsupported pairs rather than
/// guessing a rate.
pub trait RateProviderTrait: Send + Sync {
    fn convert(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
        date: NaiveDate,
    ) -> Result<Decimal, FxError>;
}
