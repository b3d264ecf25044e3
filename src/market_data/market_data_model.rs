use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One quote in a per-symbol daily price series.
///
/// Series are ascending by date and may contain gaps (weekends, holidays,
/// market-specific closures). Providers filter out zero and null prices
/// before handing a series to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: Decimal,
}
