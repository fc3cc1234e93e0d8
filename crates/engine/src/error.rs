use thiserror::Error;

/// Why an evaluation produced no result.
///
/// Callers only need to tell the first two apart: too little history is the caller's
/// problem, a bad price is the data's.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Not enough data: {available} observations available, {required} required")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid price {price} at index {index}")]
    InvalidPrice { index: usize, price: f64 },

    #[error("Invalid window: {0}")]
    InvalidWindow(String),

    #[error("Strategy error: {0}")]
    Strategy(strategies::StrategyError),

    #[error("Analytics error: {0}")]
    Analytics(analytics::AnalyticsError),
}

impl From<strategies::StrategyError> for EngineError {
    fn from(error: strategies::StrategyError) -> Self {
        match error {
            strategies::StrategyError::InvalidParameters(message) => EngineError::InvalidWindow(message),
            other => EngineError::Strategy(other),
        }
    }
}

impl From<analytics::AnalyticsError> for EngineError {
    fn from(error: analytics::AnalyticsError) -> Self {
        match error {
            analytics::AnalyticsError::InvalidPrice { index, price } => {
                EngineError::InvalidPrice { index, price }
            }
            other => EngineError::Analytics(other),
        }
    }
}
