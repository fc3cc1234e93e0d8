use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Invalid price {price} at index {index}: a period return needs a positive prior close")]
    InvalidPrice { index: usize, price: f64 },

    #[error("Price and signal series must be aligned: {prices} prices, {signals} signals")]
    LengthMismatch { prices: usize, signals: usize },
}
