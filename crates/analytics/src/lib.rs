//! # Analytics
//!
//! Turns a crossover signal into a realized strategy return.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0).
//! - **No Look-ahead:** The position held during a period is the signal known at the close
//!   of the previous one.
//!
//! ## Public API
//!
//! - `compound_return`: The total fractional return of following a signal.
//! - `StrategyResult`: The standardized struct reported to callers.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

pub mod error;
pub mod report;
pub mod returns;

pub use error::AnalyticsError;
pub use report::{round_percentage, StrategyResult};
pub use returns::{compound_return, period_returns, strategy_returns};
