use core_types::Position;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// The outcome of one crossover evaluation.
///
/// This struct is the final output of the strategy engine and the response body of the
/// performance endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyResult {
    pub short_window: usize,
    pub long_window: usize,
    /// Compounded return in percent, rounded to two decimals.
    pub total_return: f64,
    /// The position at the final period: 1, -1 or 0.
    pub last_signal: Position,
}

impl StrategyResult {
    pub fn new(short_window: usize, long_window: usize, total: f64, last_signal: Position) -> Self {
        Self {
            short_window,
            long_window,
            total_return: round_percentage(total),
            last_signal,
        }
    }
}

/// Scales a fractional return to percent and rounds it to two decimals.
///
/// Rounding is half-to-even on the exact binary value of the scaled float. Non-finite
/// values are scaled but left unrounded.
pub fn round_percentage(fraction: f64) -> f64 {
    let percent = fraction * 100.0;
    Decimal::from_f64_retain(percent)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
        // The rounded decimal has at most two fractional digits, and parsing its text gives
        // the nearest f64. `to_f64` can be off by an ulp.
        .and_then(|d| d.to_string().parse::<f64>().ok())
        .unwrap_or(percent)
}
