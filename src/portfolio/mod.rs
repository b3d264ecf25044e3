pub mod backtest_model;
pub mod backtest_service;
pub mod benchmark_service;
pub mod contribution_service;
pub mod grouping;
pub mod metrics_service;
pub mod simulation_service;


pub use backtest_model::*;
pub use backtest_service::*;
pub use grouping::*;
