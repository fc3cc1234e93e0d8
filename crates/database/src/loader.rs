//! Bulk loading of OHLCV history from CSV files.

use crate::error::DbError;
use crate::store::ObservationStore;
use core_types::time::parse_timestamp;
use core_types::NewObservation;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// A CSV row as written, before any parsing. Every column may be missing.
#[derive(Debug, Default, Deserialize)]
struct CsvRow {
    datetime: Option<String>,
    open: Option<String>,
    high: Option<String>,
    low: Option<String>,
    close: Option<String>,
    volume: Option<String>,
}

/// The valid records of a CSV file and how many rows were dropped.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LoadReport {
    pub records: Vec<NewObservation>,
    pub skipped: usize,
}

impl LoadReport {
    pub fn valid(&self) -> usize {
        self.records.len()
    }
}

/// Reads and validates every row of the CSV file at `path`.
pub fn read_csv_file(path: impl AsRef<Path>) -> Result<LoadReport, DbError> {
    let file = std::fs::File::open(path.as_ref())?;
    read_csv(file)
}

/// Reads and validates every row of a CSV document with a
/// `datetime,open,high,low,close,volume` header.
///
/// Rows without a `datetime` or `close` are dropped silently. Rows that fail to parse or
/// validate are dropped with a warning. Only an unreadable document is an error.
pub fn read_csv<R: Read>(reader: R) -> Result<LoadReport, DbError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut report = LoadReport::default();
    for (line, row) in csv_reader.deserialize::<CsvRow>().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                tracing::warn!(line = line + 2, error = %e, "Skipping unreadable row");
                report.skipped += 1;
                continue;
            }
        };

        if is_blank(&row.datetime) || is_blank(&row.close) {
            report.skipped += 1;
            continue;
        }

        match parse_row(&row) {
            Ok(record) => report.records.push(record),
            Err(reason) => {
                tracing::warn!(line = line + 2, ?row, %reason, "Skipping invalid row");
                report.skipped += 1;
            }
        }
    }

    tracing::info!(
        valid = report.valid(),
        skipped = report.skipped,
        "Read CSV rows"
    );
    Ok(report)
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().is_none_or(str::is_empty)
}

fn parse_row(row: &CsvRow) -> Result<NewObservation, String> {
    let datetime = parse_timestamp(required(&row.datetime, "datetime")?)
        .map_err(|e| e.to_string())?;
    let record = NewObservation {
        datetime,
        open: parse_decimal(&row.open, "open")?,
        high: parse_decimal(&row.high, "high")?,
        low: parse_decimal(&row.low, "low")?,
        close: parse_decimal(&row.close, "close")?,
        volume: parse_volume(&row.volume)?,
    };
    record.validate().map_err(|e| e.to_string())?;
    Ok(record)
}

fn required<'a>(field: &'a Option<String>, name: &str) -> Result<&'a str, String> {
    field
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("missing {}", name))
}

fn parse_decimal(field: &Option<String>, name: &str) -> Result<Decimal, String> {
    let text = required(field, name)?;
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|e| format!("invalid {} '{}': {}", name, text, e))
}

/// Volumes are written as floats by some exporters (`1200.0`); the fraction is dropped.
fn parse_volume(field: &Option<String>) -> Result<i64, String> {
    let text = required(field, "volume")?;
    let value = text
        .parse::<f64>()
        .map_err(|e| format!("invalid volume '{}': {}", text, e))?;
    if !value.is_finite() || value.abs() >= i64::MAX as f64 {
        return Err(format!("invalid volume '{}'", text));
    }
    Ok(value.trunc() as i64)
}

/// Replaces the contents of `store` with `records`, inserting `chunk_size` rows at a time.
///
/// The store is cleared even when there is nothing to insert. `progress` is called after
/// every chunk with the number of rows inserted so far.
pub async fn bulk_load<S, F>(
    store: &S,
    records: &[NewObservation],
    chunk_size: usize,
    mut progress: F,
) -> Result<u64, DbError>
where
    S: ObservationStore + ?Sized,
    F: FnMut(u64),
{
    let removed = store.clear().await?;
    tracing::info!(removed, "Cleared existing data");

    if records.is_empty() {
        tracing::warn!("No valid rows to insert");
        return Ok(0);
    }

    let mut inserted = 0u64;
    for chunk in records.chunks(chunk_size.max(1)) {
        inserted += store.insert_many(chunk).await?;
        tracing::debug!(inserted, total = records.len(), "Inserted chunk");
        progress(inserted);
    }

    tracing::info!(inserted, "Bulk load complete");
    Ok(inserted)
}
