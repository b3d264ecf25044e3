use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::fx_errors::FxError;
use super::fx_traits::RateProviderTrait;
use super::markets;

/// Converts amounts between a holding's native currency and the requested
/// display currency, delegating rate lookups to the injected provider.
#[derive(Clone)]
pub struct CurrencyBridge {
    rate_provider: Arc<dyn RateProviderTrait>,
}

impl CurrencyBridge {
    pub fn new(rate_provider: Arc<dyn RateProviderTrait>) -> Self {
        Self { rate_provider }
    }

    /// Native trading currency for a symbol, inferred from its market suffix.
    pub fn native_currency(&self, symbol: &str) -> &'static str {
        markets::native_currency_for_symbol(symbol)
    }

    pub fn convert(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
        date: NaiveDate,
    ) -> Result<Decimal, FxError> {
        if from_currency.is_empty() || to_currency.is_empty() {
            return Err(FxError::InvalidCurrencyPair(format!(
                "'{}'/'{}'",
                from_currency, to_currency
            )));
        }
        if from_currency == to_currency {
            return Ok(amount);
        }

        self.rate_provider
            .convert(amount, from_currency, to_currency, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    struct PanickingProvider;

    impl RateProviderTrait for PanickingProvider {
        fn convert(
            &self,
            _amount: Decimal,
            _from_currency: &str,
            _to_currency: &str,
            _date: NaiveDate,
        ) -> Result<Decimal, FxError> {
            panic!("provider must not be hit for same-currency conversions");
        }
    }

    struct FixedRateProvider {
        rate: Decimal,
    }

    impl RateProviderTrait for FixedRateProvider {
        fn convert(
            &self,
            amount: Decimal,
            _from_currency: &str,
            _to_currency: &str,
            _date: NaiveDate,
        ) -> Result<Decimal, FxError> {
            Ok(amount * self.rate)
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_same_currency_short_circuits() {
        let bridge = CurrencyBridge::new(Arc::new(PanickingProvider));
        let converted = bridge
            .convert(dec!(100), "USD", "USD", date(2024, 1, 2))
            .unwrap();
        assert_eq!(converted, dec!(100));
    }

    #[test]
    fn test_delegates_cross_currency() {
        let bridge = CurrencyBridge::new(Arc::new(FixedRateProvider { rate: dec!(1350) }));
        let converted = bridge
            .convert(dec!(10), "USD", "KRW", date(2024, 1, 2))
            .unwrap();
        assert_eq!(converted, dec!(13500));
    }

    #[test]
    fn test_empty_currency_is_invalid_pair() {
        let bridge = CurrencyBridge::new(Arc::new(PanickingProvider));
        let result = bridge.convert(dec!(1), "", "USD", date(2024, 1, 2));
        assert!(matches!(result, Err(FxError::InvalidCurrencyPair(_))));
    }
}
