pub mod grouping_model;
pub mod grouping_service;

pub use grouping_model::{Classification, GroupBy, GroupedMetrics, HoldingGroup};
pub use grouping_service::{GroupingService, GroupingServiceTrait};
