use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::holdings::Holding;

/// Grouping dimension for a holdings snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupBy {
    AssetStyle,
    AssetClass,
    Currency,
    None,
}

impl GroupBy {
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "assetStyle" => Ok(GroupBy::AssetStyle),
            "assetClass" => Ok(GroupBy::AssetClass),
            "currency" => Ok(GroupBy::Currency),
            "none" => Ok(GroupBy::None),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown groupBy value '{}'",
                other
            ))),
        }
    }
}

/// Per-symbol classification metadata supplied by the lookup collaborator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// symbol -> user-defined style name
    pub styles: HashMap<String, String>,
    /// symbol -> asset class label
    pub asset_classes: HashMap<String, String>,
}

/// One named group of holdings along the requested dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingGroup {
    pub group_name: String,
    pub group_value: Decimal,
    pub percentage_of_total: Decimal,
    pub holdings: Vec<Holding>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedMetrics {
    pub total_value: Decimal,
    pub total_gain: Decimal,
    pub percentage_return: Decimal,
    pub day_change: Decimal,
    pub day_change_percent: Decimal,
    pub groups: Vec<HoldingGroup>,
}
