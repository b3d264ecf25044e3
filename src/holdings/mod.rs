pub mod holdings_model;
pub mod weight_service;

pub use holdings_model::Holding;
pub use weight_service::calculate_weights;
