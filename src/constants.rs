use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Decimal precision for calculated values
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display amounts
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Trading days per year, used to annualize volatility
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// sqrt(252), fallback when Decimal sqrt fails
pub const SQRT_TRADING_DAYS_APPROX: Decimal = dec!(15.874507866);

/// Calendar days per year, used to annualize returns
pub const DAYS_PER_YEAR_DECIMAL: Decimal = dec!(365);

/// Fixed risk-free rate (in percent) for the Sharpe ratio
pub const RISK_FREE_RATE_PERCENT: Decimal = dec!(2.0);

/// How far after a target date a quote may be used when no earlier quote
/// exists. Covers simulation windows that start before an asset's first
/// listing. Tunable; widening it trades accuracy for coverage.
pub const FUTURE_PRICE_TOLERANCE_DAYS: i64 = 30;

/// Group name for holdings without a style or class assignment
pub const UNCATEGORIZED_GROUP: &str = "Uncategorized";

/// Group name used when no grouping dimension is requested
pub const ALL_HOLDINGS_GROUP: &str = "All Holdings";
