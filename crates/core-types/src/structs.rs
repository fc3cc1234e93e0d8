use crate::error::CoreError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A single OHLCV observation for one period.
///
/// Prices are carried as decimals exactly as they were recorded. Only `close` is consumed
/// by the signal engine; the rest travels with the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Observation {
    /// The ordering key of the series.
    #[serde(rename = "datetime")]
    #[sqlx(rename = "datetime")]
    pub timestamp: DateTime<Utc>,
    #[serde(with = "rust_decimal::serde::float")]
    pub open: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub high: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub low: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub close: Decimal,
    pub volume: i64,
}

/// An observation as returned by a record store, with its store-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct StoredObservation {
    pub id: i64,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub observation: Observation,
}

/// An incoming, not yet validated record.
///
/// Deserialization already rejects malformed timestamps and non-numeric prices;
/// [`NewObservation::validate`] enforces the range checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewObservation {
    #[serde(deserialize_with = "crate::time::deserialize_timestamp")]
    pub datetime: DateTime<Utc>,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: i64,
}

impl NewObservation {
    /// Checks that every price and the volume are strictly positive and converts the
    /// record into an [`Observation`].
    pub fn validate(&self) -> Result<Observation, CoreError> {
        let prices = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ];
        for (field, value) in prices {
            if value <= Decimal::ZERO {
                return Err(CoreError::InvalidInput(
                    field.to_string(),
                    format!("must be greater than 0, got {}", value),
                ));
            }
        }
        if self.volume <= 0 {
            return Err(CoreError::InvalidInput(
                "volume".to_string(),
                format!("must be greater than 0, got {}", self.volume),
            ));
        }

        Ok(Observation {
            timestamp: self.datetime,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
        })
    }
}

impl From<Observation> for NewObservation {
    fn from(observation: Observation) -> Self {
        Self {
            datetime: observation.timestamp,
            open: observation.open,
            high: observation.high,
            low: observation.low,
            close: observation.close,
            volume: observation.volume,
        }
    }
}
