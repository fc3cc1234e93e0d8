use crate::enums::Position;
use crate::structs::{Observation, StoredObservation};
use rust_decimal::prelude::ToPrimitive;

/// An immutable, time-ordered snapshot of observations.
///
/// The ordering is trusted, not checked: the store that produced the observations is
/// responsible for returning them ascending by timestamp. Duplicate timestamps are kept in
/// the order they were given.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    observations: Vec<Observation>,
}

impl TimeSeries {
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// The closing prices as floats, aligned index-for-index with the observations.
    ///
    /// A close that cannot be represented as an `f64` becomes NaN, which the return
    /// calculation later reports as an invalid price.
    pub fn closes(&self) -> Vec<f64> {
        self.observations
            .iter()
            .map(|o| o.close.to_f64().unwrap_or(f64::NAN))
            .collect()
    }
}

impl From<Vec<Observation>> for TimeSeries {
    fn from(observations: Vec<Observation>) -> Self {
        Self::new(observations)
    }
}

impl From<Vec<StoredObservation>> for TimeSeries {
    fn from(records: Vec<StoredObservation>) -> Self {
        Self::new(records.into_iter().map(|r| r.observation).collect())
    }
}

/// A position per period, aligned index-for-index with the series it was derived from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalSeries(Vec<Position>);

impl SignalSeries {
    pub fn new(positions: Vec<Position>) -> Self {
        Self(positions)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Position> {
        self.0.get(index).copied()
    }

    /// The position at the final index, or `Flat` for an empty series.
    pub fn last(&self) -> Position {
        self.0.last().copied().unwrap_or_default()
    }

    pub fn as_slice(&self) -> &[Position] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.0.iter().copied()
    }
}

impl From<Vec<Position>> for SignalSeries {
    fn from(positions: Vec<Position>) -> Self {
        Self(positions)
    }
}
