//! Defines the typed trip record and the immutable table of records produced by a load.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A single bike rental event, validated once at load time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    /// Zero-based row index in the source file.
    pub trip_id: usize,
    /// When the trip started, in the naive local time supplied by the input.
    pub started_at: NaiveDateTime,
    /// When the trip ended, if the input carries an `ended_at` column.
    pub ended_at: Option<NaiveDateTime>,
    /// Name of the station the trip started at. `None` is its own bucket when counting.
    pub start_station_name: Option<String>,
    /// Daily maximum temperature attached to the trip, in whatever unit the source uses.
    pub max_temperature: Option<f64>,
}

impl TripRecord {
    /// Creates a record with only the required start time set.
    pub fn new(trip_id: usize, started_at: NaiveDateTime) -> Self {
        Self {
            trip_id,
            started_at,
            ended_at: None,
            start_station_name: None,
            max_temperature: None,
        }
    }

    pub fn with_station(mut self, station: impl Into<String>) -> Self {
        self.start_station_name = Some(station.into());
        self
    }

    pub fn with_max_temperature(mut self, max_temperature: f64) -> Self {
        self.max_temperature = Some(max_temperature);
        self
    }

    pub fn with_ended_at(mut self, ended_at: NaiveDateTime) -> Self {
        self.ended_at = Some(ended_at);
        self
    }

    /// Calendar date the trip started on.
    pub fn date(&self) -> NaiveDate {
        self.started_at.date()
    }

    /// Hour of day (0-23) the trip started in. Derived from `started_at`, never stored.
    pub fn start_hour(&self) -> u32 {
        self.started_at.hour()
    }
}

/// An immutable snapshot of every trip read from one input file.
///
/// Cloning is cheap: the records are shared behind an [`Arc`]. Every derived view
/// ([`TripTable::daily_trends`], [`TripTable::top_stations`], ...) is a fresh
/// computation over this snapshot.
#[derive(Debug, Clone)]
pub struct TripTable {
    source: PathBuf,
    records: Arc<[TripRecord]>,
    temperature_column: Option<String>,
}

impl TripTable {
    /// Wraps already validated records.
    ///
    /// # Arguments
    ///
    /// * `source` - The file the records were read from.
    /// * `records` - The trip rows, in file order.
    /// * `temperature_column` - Name of the max-temperature column, if the input had one.
    pub fn new(
        source: impl Into<PathBuf>,
        records: Vec<TripRecord>,
        temperature_column: Option<String>,
    ) -> Self {
        Self {
            source: source.into(),
            records: records.into(),
            temperature_column,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The column max temperatures were read from, or `None` when the input carries no weather.
    pub fn temperature_column(&self) -> Option<&str> {
        self.temperature_column.as_deref()
    }

    pub fn has_temperature(&self) -> bool {
        self.temperature_column.is_some()
    }
}
