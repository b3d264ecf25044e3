use thiserror::Error;

use crate::fx::fx_errors::FxError;
use crate::market_data::market_data_errors::MarketDataError;

// Type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Currency operation failed: {0}")]
    Currency(#[from] CurrencyError),

    #[error("Market data operation failed: {0}")]
    MarketData(#[from] MarketDataError),

    #[error("Calculation failed: {0}")]
    Calculation(#[from] CalculatorError),
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

#[derive(Error, Debug)]
pub enum CurrencyError {
    #[error("Failed to convert between currencies: {0}")]
    ConversionFailed(String),

    #[error("Currency '{0}' is not supported")]
    Unsupported(String),
}

#[derive(Error, Debug)]
pub enum CalculatorError {
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Calculation error: {0}")]
    Calculation(String),
}

impl From<FxError> for Error {
    fn from(err: FxError) -> Self {
        Error::Currency(CurrencyError::ConversionFailed(err.to_string()))
    }
}
