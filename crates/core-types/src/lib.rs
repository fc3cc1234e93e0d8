//! # Core Types
//!
//! The shared vocabulary of the workspace: price observations, the time-ordered series
//! handed to the signal engine, and the tri-state position a crossover produces.
//!
//! This crate has no knowledge of databases, HTTP or configuration. Every other crate
//! depends on it.

pub mod enums;
pub mod error;
pub mod series;
pub mod structs;
pub mod time;

// Re-export the core types to provide a clean public API.
pub use enums::Position;
pub use error::CoreError;
pub use series::{SignalSeries, TimeSeries};
pub use structs::{NewObservation, Observation, StoredObservation};
