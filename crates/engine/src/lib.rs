//! # Strategy Engine
//!
//! Evaluates a moving-average crossover over a full price history and reports the
//! compounded return of following it.
//!
//! The engine is a stateless calculator: it takes an immutable `TimeSeries` snapshot and two
//! window lengths, and either returns a `StrategyResult` or fails as a whole. Nothing is
//! cached between calls, so any number of evaluations may run in parallel.

use analytics::compound_return;
use core_types::{SignalSeries, TimeSeries};
use strategies::{crossover_signal, rolling_mean, RollingSeries};

pub mod error;

pub use analytics::StrategyResult;
pub use error::EngineError;

/// Every intermediate series of one evaluation, for callers that want to show more than
/// the headline numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub result: StrategyResult,
    pub closes: Vec<f64>,
    pub short_ma: RollingSeries,
    pub long_ma: RollingSeries,
    pub signal: SignalSeries,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct StrategyEngine {}

impl StrategyEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluates the crossover of `short_window` against `long_window` over `series`.
    ///
    /// # Errors
    ///
    /// * `InvalidWindow` if either window is 0.
    /// * `InsufficientData` if the series is shorter than `long_window`. Only the long
    ///   window is checked, even when `short_window` is the larger of the two.
    /// * `InvalidPrice` if a close that a period return divides by is not positive.
    pub fn evaluate(
        &self,
        series: &TimeSeries,
        short_window: usize,
        long_window: usize,
    ) -> Result<StrategyResult, EngineError> {
        self.analyze(series, short_window, long_window)
            .map(|evaluation| evaluation.result)
    }

    /// Like [`StrategyEngine::evaluate`], but keeps the moving averages and the signal.
    pub fn analyze(
        &self,
        series: &TimeSeries,
        short_window: usize,
        long_window: usize,
    ) -> Result<Evaluation, EngineError> {
        if short_window == 0 || long_window == 0 {
            return Err(EngineError::InvalidWindow(format!(
                "windows must be at least 1 (short={}, long={})",
                short_window, long_window
            )));
        }
        if series.len() < long_window {
            return Err(EngineError::InsufficientData {
                required: long_window,
                available: series.len(),
            });
        }

        let closes = series.closes();
        let short_ma = rolling_mean(&closes, short_window)?;
        let long_ma = rolling_mean(&closes, long_window)?;
        let signal = crossover_signal(&short_ma, &long_ma)?;
        let total = compound_return(&closes, &signal)?;

        let result = StrategyResult::new(short_window, long_window, total, signal.last());
        tracing::debug!(
            observations = series.len(),
            short_window,
            long_window,
            total_return = result.total_return,
            last_signal = result.last_signal.value(),
            "Evaluated crossover strategy"
        );

        Ok(Evaluation {
            result,
            closes,
            short_ma,
            long_ma,
            signal,
        })
    }
}
