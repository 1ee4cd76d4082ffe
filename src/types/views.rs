//! Read-only aggregate views computed from a [`crate::TripTable`].
//!
//! Every view keeps its rows in display order and can be turned into a polars
//! [`DataFrame`] for charting.

use chrono::NaiveDate;
use polars::prelude::{DataFrame, PolarsResult};
use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};

pub const HOURS_PER_DAY: usize = 24;

const DATE_FORMAT: &str = "%Y-%m-%d";
const MISSING_STATION_LABEL: &str = "(no station)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub trip_count: u64,
}

/// Trips per calendar date, ascending by date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DailyCountView {
    entries: Vec<DailyCount>,
}

impl DailyCountView {
    pub(crate) fn new(entries: Vec<DailyCount>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[DailyCount] {
        &self.entries
    }

    pub fn get(&self, date: NaiveDate) -> Option<u64> {
        self.entries
            .binary_search_by_key(&date, |entry| entry.date)
            .ok()
            .map(|idx| self.entries[idx].trip_count)
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|entry| entry.trip_count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Columns: `date` (string, `YYYY-MM-DD`), `trip_count`.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let dates: Vec<String> = self
            .entries
            .iter()
            .map(|entry| entry.date.format(DATE_FORMAT).to_string())
            .collect();
        let counts: Vec<u64> = self.entries.iter().map(|entry| entry.trip_count).collect();
        polars::df!("date" => dates, "trip_count" => counts)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyTemperature {
    pub date: NaiveDate,
    pub mean_max_temperature: f64,
}

/// Mean max temperature per calendar date, ascending by date.
///
/// Empty when the input carried no temperature column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DailyTempView {
    entries: Vec<DailyTemperature>,
}

impl DailyTempView {
    pub(crate) fn new(entries: Vec<DailyTemperature>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[DailyTemperature] {
        &self.entries
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.entries
            .binary_search_by_key(&date, |entry| entry.date)
            .ok()
            .map(|idx| self.entries[idx].mean_max_temperature)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let dates: Vec<String> = self
            .entries
            .iter()
            .map(|entry| entry.date.format(DATE_FORMAT).to_string())
            .collect();
        let temps: Vec<f64> = self
            .entries
            .iter()
            .map(|entry| entry.mean_max_temperature)
            .collect();
        polars::df!("date" => dates, "max_temperature" => temps)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyTrend {
    pub date: NaiveDate,
    pub trip_count: u64,
    pub mean_max_temperature: f64,
}

/// Inner join of daily trip counts and daily mean max temperature on date.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DailyTrendsTable {
    rows: Vec<DailyTrend>,
}

impl DailyTrendsTable {
    pub(crate) fn new(rows: Vec<DailyTrend>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[DailyTrend] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Columns: `date`, `trip_count`, `max_temperature`.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let dates: Vec<String> = self
            .rows
            .iter()
            .map(|row| row.date.format(DATE_FORMAT).to_string())
            .collect();
        let counts: Vec<u64> = self.rows.iter().map(|row| row.trip_count).collect();
        let temps: Vec<f64> = self.rows.iter().map(|row| row.mean_max_temperature).collect();
        polars::df!(
            "date" => dates,
            "trip_count" => counts,
            "max_temperature" => temps
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationCount {
    /// `None` collects the trips whose start station was missing.
    pub station: Option<String>,
    pub trip_count: u64,
}

impl StationCount {
    pub fn label(&self) -> &str {
        self.station.as_deref().unwrap_or(MISSING_STATION_LABEL)
    }
}

/// The busiest start stations, descending by trip count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StationCountView {
    entries: Vec<StationCount>,
}

impl StationCountView {
    pub(crate) fn new(entries: Vec<StationCount>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[StationCount] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Columns: `station` (missing names rendered as a placeholder label), `trip_count`.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let labels: Vec<&str> = self.entries.iter().map(StationCount::label).collect();
        let counts: Vec<u64> = self.entries.iter().map(|entry| entry.trip_count).collect();
        polars::df!("station" => labels, "trip_count" => counts)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourlyCount {
    pub hour: u32,
    pub trip_count: u64,
}

/// Trips per hour of day. Always holds exactly 24 entries, hours 0 through 23.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HourlyCountView {
    entries: Vec<HourlyCount>,
}

impl HourlyCountView {
    pub(crate) fn from_counts(counts: [u64; HOURS_PER_DAY]) -> Self {
        let entries = counts
            .iter()
            .zip(0u32..)
            .map(|(&trip_count, hour)| HourlyCount { hour, trip_count })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[HourlyCount] {
        &self.entries
    }

    /// Trip count for `hour`, zero for hours outside 0..=23.
    pub fn get(&self, hour: u32) -> u64 {
        self.entries
            .get(hour as usize)
            .map(|entry| entry.trip_count)
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|entry| entry.trip_count).sum()
    }

    /// Columns: `hour` (zero-padded string so charts keep every tick), `trip_count`.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let hours: Vec<String> = self
            .entries
            .iter()
            .map(|entry| format!("{:02}", entry.hour))
            .collect();
        let counts: Vec<u64> = self.entries.iter().map(|entry| entry.trip_count).collect();
        polars::df!("hour" => hours, "trip_count" => counts)
    }
}

impl Default for HourlyCountView {
    fn default() -> Self {
        Self::from_counts([0; HOURS_PER_DAY])
    }
}

// --- Plain-text tables for terminal output ---

impl Display for DailyCountView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<12} {:>10}", "date", "trips")?;
        for entry in &self.entries {
            writeln!(f, "{:<12} {:>10}", entry.date.to_string(), entry.trip_count)?;
        }
        Ok(())
    }
}

impl Display for DailyTempView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<12} {:>10}", "date", "max temp")?;
        for entry in &self.entries {
            writeln!(f, "{:<12} {:>10.1}", entry.date.to_string(), entry.mean_max_temperature)?;
        }
        Ok(())
    }
}

impl Display for DailyTrendsTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<12} {:>10} {:>10}", "date", "trips", "max temp")?;
        for row in &self.rows {
            writeln!(
                f,
                "{:<12} {:>10} {:>10.1}",
                row.date.to_string(),
                row.trip_count,
                row.mean_max_temperature
            )?;
        }
        Ok(())
    }
}

impl Display for StationCountView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let width = self
            .entries
            .iter()
            .map(|entry| entry.label().chars().count())
            .max()
            .unwrap_or(0)
            .max("station".len());
        writeln!(f, "{:<width$} {:>10}", "station", "trips", width = width)?;
        for entry in &self.entries {
            writeln!(
                f,
                "{:<width$} {:>10}",
                entry.label(),
                entry.trip_count,
                width = width
            )?;
        }
        Ok(())
    }
}

impl Display for HourlyCountView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<6} {:>10}", "hour", "trips")?;
        for entry in &self.entries {
            writeln!(f, "{:<6} {:>10}", format!("{:02}", entry.hour), entry.trip_count)?;
        }
        Ok(())
    }
}
