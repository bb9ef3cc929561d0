//! The embedded user-sample dataset.
//!
//! The CSV text is compiled into the binary and parsed once at startup:
//!
//! ```text
//! sample_date,total_users,new_users
//! 1729008013,660,47
//! ```
//!
//! - `sample_date`: Unix epoch seconds
//! - `total_users`: all registered users
//! - `new_users`: users (included in `total_users`) that never completed a first sign-in

use crate::models::{DateRange, Row};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::io::Read;
use std::ops::Range;
use thiserror::Error;

/// Aggregated dump of a shipping app's user counts, one sample per day.
pub const EMBEDDED_CSV: &str = include_str!("../data/user_samples.csv");

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {line}: timestamp {value} is out of range")]
    Timestamp { line: u64, value: i64 },
    #[error("row {line}: new_users ({new_users}) exceeds total_users ({total_users})")]
    NewExceedsTotal {
        line: u64,
        total_users: u32,
        new_users: u32,
    },
    #[error("row {line}: sample_date is earlier than the previous row")]
    OutOfOrder { line: u64 },
}

/// Wire shape of one CSV record.
#[derive(Debug, Deserialize)]
struct RawRow {
    sample_date: i64,
    total_users: u32,
    new_users: u32,
}

/// Immutable, date-ordered sequence of rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    /// Parse the compiled-in sample data.
    pub fn load_embedded() -> Result<Self, DatasetError> {
        Self::from_csv_reader(EMBEDDED_CSV.as_bytes())
    }

    /// Like [`Dataset::load_embedded`], but a parse failure yields an empty dataset
    /// so the caller can still draw an (empty) chart.
    pub fn load_embedded_or_empty() -> Self {
        match Self::load_embedded() {
            Ok(ds) => ds,
            Err(err) => {
                log::warn!("embedded dataset failed to load, continuing without data: {err}");
                Self::default()
            }
        }
    }

    /// Parse CSV with a `sample_date,total_users,new_users` header.
    /// Any bad record fails the whole load.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut rows: Vec<Row> = Vec::new();
        for (i, rec) in rdr.deserialize::<RawRow>().enumerate() {
            let raw = rec?;
            // header is line 1
            let line = i as u64 + 2;
            let sample_date = DateTime::<Utc>::from_timestamp(raw.sample_date, 0).ok_or(
                DatasetError::Timestamp {
                    line,
                    value: raw.sample_date,
                },
            )?;
            if raw.new_users > raw.total_users {
                return Err(DatasetError::NewExceedsTotal {
                    line,
                    total_users: raw.total_users,
                    new_users: raw.new_users,
                });
            }
            if rows.last().is_some_and(|prev| prev.sample_date > sample_date) {
                return Err(DatasetError::OutOfOrder { line });
            }
            rows.push(Row::new(sample_date, raw.total_users, raw.new_users));
        }
        log::debug!("loaded {} user samples", rows.len());
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// First to last sample date. `None` for an empty dataset.
    pub fn total_range(&self) -> Option<DateRange> {
        let first = self.rows.first()?;
        let last = self.rows.last()?;
        DateRange::new(first.sample_date, last.sample_date).ok()
    }

    /// Index range of the rows whose sample date lies inside `window`.
    pub fn window_indices(&self, window: &DateRange) -> Range<usize> {
        let lo = self.rows.partition_point(|r| r.sample_date < window.start());
        let hi = self.rows.partition_point(|r| r.sample_date <= window.end());
        lo..hi.max(lo)
    }

    /// Rows whose sample date lies inside `window`.
    pub fn rows_in(&self, window: &DateRange) -> &[Row] {
        &self.rows[self.window_indices(window)]
    }

    /// Largest `total_users` among `rows`, used to size the value axis.
    pub fn max_total(rows: &[Row]) -> u32 {
        rows.iter().map(|r| r.total_users).max().unwrap_or(0)
    }
}
