use std::collections::HashMap;

use rust_decimal::Decimal;

use super::holdings_model::Holding;

/// Derives each holding's fractional share of total portfolio value.
///
/// Returns an empty map when there are no holdings or the total current
/// value is zero; callers treat an empty map as "cannot simulate". Weights
/// are left unrounded since they feed further arithmetic.
pub fn calculate_weights(holdings: &[Holding]) -> HashMap<String, Decimal> {
    if holdings.is_empty() {
        return HashMap::new();
    }

    let total_value: Decimal = holdings.iter().map(|holding| holding.current_value).sum();
    if total_value <= Decimal::ZERO {
        return HashMap::new();
    }

    holdings
        .iter()
        .filter(|holding| holding.current_value > Decimal::ZERO)
        .map(|holding| {
            (
                holding.symbol.clone(),
                holding.current_value / total_value,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn holding(symbol: &str, current_value: Decimal) -> Holding {
        Holding {
            symbol: symbol.to_string(),
            name: None,
            shares: dec!(1),
            cost_basis: current_value,
            current_price: current_value,
            current_value,
            currency: "USD".to_string(),
        }
    }

    #[test]
    fn test_weights_are_value_fractions() {
        let holdings = vec![holding("AAPL", dec!(6000)), holding("MSFT", dec!(4000))];
        let weights = calculate_weights(&holdings);

        assert_eq!(weights.len(), 2);
        assert_eq!(weights["AAPL"], dec!(0.6));
        assert_eq!(weights["MSFT"], dec!(0.4));

        let total: Decimal = weights.values().copied().sum();
        assert_eq!(total, dec!(1));
    }

    #[test]
    fn test_empty_holdings_yield_empty_map() {
        assert!(calculate_weights(&[]).is_empty());
    }

    #[test]
    fn test_zero_total_value_yields_empty_map() {
        let holdings = vec![holding("AAPL", dec!(0))];
        assert!(calculate_weights(&holdings).is_empty());
    }

    #[test]
    fn test_zero_value_holding_is_dropped() {
        let holdings = vec![holding("AAPL", dec!(100)), holding("MSFT", dec!(0))];
        let weights = calculate_weights(&holdings);
        assert_eq!(weights.len(), 1);
        assert_eq!(weights["AAPL"], dec!(1));
    }
}
