use std::collections::HashMap;
use std::sync::OnceLock;

/// Default native currency when a symbol carries no market suffix.
pub const DEFAULT_CURRENCY: &str = "USD";

static MARKET_CURRENCIES: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

fn get_market_currencies() -> &'static HashMap<&'static str, &'static str> {
    MARKET_CURRENCIES.get_or_init(|| {
        let mut map = HashMap::new();

        // Asia-Pacific
        map.insert("KS", "KRW"); // KOSPI
        map.insert("KQ", "KRW"); // KOSDAQ
        map.insert("T", "JPY"); // Tokyo
        map.insert("HK", "HKD");
        map.insert("SS", "CNY"); // Shanghai
        map.insert("SZ", "CNY"); // Shenzhen
        map.insert("TW", "TWD");
        map.insert("SI", "SGD");
        map.insert("AX", "AUD");
        map.insert("NZ", "NZD");

        // Europe
        map.insert("L", "GBP"); // London; quotes normalized from pence upstream
        map.insert("PA", "EUR"); // Paris
        map.insert("DE", "EUR"); // Xetra
        map.insert("F", "EUR"); // Frankfurt
        map.insert("MI", "EUR"); // Milan
        map.insert("AS", "EUR"); // Amsterdam
        map.insert("MC", "EUR"); // Madrid
        map.insert("BR", "EUR"); // Brussels
        map.insert("SW", "CHF"); // SIX
        map.insert("ST", "SEK"); // Stockholm
        map.insert("OL", "NOK"); // Oslo
        map.insert("CO", "DKK"); // Copenhagen

        // Americas
        map.insert("TO", "CAD"); // Toronto
        map.insert("V", "CAD"); // TSX Venture
        map.insert("SA", "BRL"); // B3
        map.insert("MX", "MXN");

        map
    })
}

/// Infers a symbol's native trading currency from its market suffix
/// (`7203.T` trades in JPY, `SHOP.TO` in CAD). Suffix-less symbols are
/// treated as US listings.
pub fn native_currency_for_symbol(symbol: &str) -> &'static str {
    match symbol.rsplit_once('.') {
        Some((_, suffix)) if !suffix.is_empty() => get_market_currencies()
            .get(suffix)
            .copied()
            .unwrap_or(DEFAULT_CURRENCY),
        _ => DEFAULT_CURRENCY,
    }
}
