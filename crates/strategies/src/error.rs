use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrategyError {
    #[error("Strategy received invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Moving averages must be aligned: short has {short} values, long has {long}")]
    LengthMismatch { short: usize, long: usize },
}
