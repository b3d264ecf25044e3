use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A user's current position in one symbol.
///
/// Snapshots are owned by the caller and immutable per request. Monetary
/// fields (`cost_basis`, `current_price`, `current_value`) are already
/// expressed in the requested display currency; `currency` records it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub shares: Decimal,
    pub cost_basis: Decimal,
    pub current_price: Decimal,
    pub current_value: Decimal,
    pub currency: String,
}

impl Holding {
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.symbol.clone())
    }
}
