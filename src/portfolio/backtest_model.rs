use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Portfolio value on one aligned date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedPoint {
    pub date: NaiveDate,
    pub portfolio_value: Decimal,
    pub cumulative_return_percent: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark_return_percent: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub total_return: Decimal,
    pub total_return_percent: Decimal,
    pub annualized_return_percent: Decimal,
    /// Peak-to-trough decline, reported as a negative percentage (0 when the
    /// curve never falls).
    pub max_drawdown_percent: Decimal,
    pub volatility_percent: Decimal,
    /// 0 (not NaN/Infinity) when volatility is 0, to stay serializable.
    pub sharpe_ratio: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excess_return_percent: Option<Decimal>,
}

/// One asset's share of the portfolio's simulated return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetContribution {
    pub symbol: String,
    pub name: String,
    pub weight_percent: Decimal,
    pub return_amount: Decimal,
    pub return_percent: Decimal,
    pub contribution_amount: Decimal,
    /// Expressed against the whole portfolio's initial value, not the
    /// asset's own investment.
    pub contribution_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestPeriod {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub display_currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkComparison {
    pub symbol: String,
    pub cumulative_return_percent: Decimal,
    pub excess_return_percent: Decimal,
}

/// Full backtest response: the simulated curve, derived risk statistics,
/// per-asset attribution and the optional benchmark comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacktestReport {
    pub period: BacktestPeriod,
    pub performance: Vec<SimulatedPoint>,
    pub metrics: PerformanceMetrics,
    pub asset_contributions: Vec<AssetContribution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<BenchmarkComparison>,
    /// Non-fatal annotations: symbols excluded for missing data, degraded
    /// benchmark, absorbed fetch failures.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}
