pub mod constants;
pub mod errors;
pub mod fx;
pub mod holdings;
pub mod market_data;
pub mod portfolio;

pub use holdings::*;
pub use portfolio::*;
