//! # Crossover Strategy Library
//!
//! The windowed aggregation and signal derivation of the moving-average crossover.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of databases,
//!   APIs, or configuration. It depends only on `core-types`.
//! - **Explicit Warm-up:** Values that cannot be computed yet are `None`, never a NaN or a
//!   zero that silently flows downstream.
//!
//! ## Public API
//!
//! - `rolling_mean`: The trailing simple moving average over a close series.
//! - `crossover_signal`: Long/short/flat positions from a short and a long average.
//! - `RollingSeries`: The output of `rolling_mean`.
//! - `StrategyError`: The specific error types that can be returned from this crate.

pub mod error;
pub mod ma_crossover;
pub mod rolling;

pub use error::StrategyError;
pub use ma_crossover::crossover_signal;
pub use rolling::{rolling_mean, RollingSeries};
