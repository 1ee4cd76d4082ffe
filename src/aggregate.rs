//! The trip aggregations behind every dashboard chart.
//!
//! All operations are single-pass grouping/counting over an immutable [`TripTable`].
//! Daily and hourly keys are both taken from [`TripRecord::started_at`], so the two
//! views always agree on which trips they count.

use crate::error::DashboardError;
use crate::types::trip::{TripRecord, TripTable};
use crate::types::views::{
    DailyCount, DailyCountView, DailyTempView, DailyTemperature, DailyTrend, DailyTrendsTable,
    HourlyCountView, StationCount, StationCountView, HOURS_PER_DAY,
};
use crate::types::year::{StartEndDate, Year};
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Number of stations shown on the popular stations page.
pub const DEFAULT_TOP_STATIONS: usize = 20;

impl TripTable {
    /// Trips that pass the optional year filter, in file order.
    pub fn trips_in(&self, year_filter: Option<Year>) -> impl Iterator<Item = &TripRecord> + '_ {
        self.records()
            .iter()
            .filter(move |trip| year_filter.map_or(true, |year| year.contains(trip.date())))
    }

    /// Number of trips that pass the optional year filter.
    pub fn row_count(&self, year_filter: Option<Year>) -> usize {
        self.trips_in(year_filter).count()
    }

    /// Distinct years with at least one trip, ascending.
    pub fn years(&self) -> Vec<Year> {
        self.records()
            .iter()
            .map(|trip| trip.started_at.year())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(Year)
            .collect()
    }

    /// First and last trip date, or `None` for an empty table.
    pub fn date_range(&self) -> Option<StartEndDate> {
        let mut dates = self.records().iter().map(TripRecord::date);
        let first = dates.next()?;
        let (start, end) = dates.fold((first, first), |(lo, hi), date| {
            (lo.min(date), hi.max(date))
        });
        Some(StartEndDate { start, end })
    }

    /// Trips per calendar date, covering exactly the dates present after filtering.
    pub fn daily_trip_counts(&self, year_filter: Option<Year>) -> DailyCountView {
        let mut counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for trip in self.trips_in(year_filter) {
            *counts.entry(trip.date()).or_insert(0) += 1;
        }
        DailyCountView::new(
            counts
                .into_iter()
                .map(|(date, trip_count)| DailyCount { date, trip_count })
                .collect(),
        )
    }

    /// Mean max temperature per calendar date.
    ///
    /// Empty when the table has no temperature column. Dates on which no trip
    /// carried a temperature are left out.
    pub fn daily_mean_temperature(&self, year_filter: Option<Year>) -> DailyTempView {
        if !self.has_temperature() {
            return DailyTempView::default();
        }

        let mut sums: BTreeMap<NaiveDate, (f64, u64)> = BTreeMap::new();
        for trip in self.trips_in(year_filter) {
            if let Some(temperature) = trip.max_temperature {
                let (sum, count) = sums.entry(trip.date()).or_insert((0.0, 0));
                *sum += temperature;
                *count += 1;
            }
        }
        DailyTempView::new(
            sums.into_iter()
                .map(|(date, (sum, count))| DailyTemperature {
                    date,
                    mean_max_temperature: sum / count as f64,
                })
                .collect(),
        )
    }

    /// Daily trip counts inner-joined with daily mean max temperature.
    ///
    /// Dates missing from either side are dropped.
    pub fn daily_trends(&self, year_filter: Option<Year>) -> DailyTrendsTable {
        let temperatures = self.daily_mean_temperature(year_filter);
        if temperatures.is_empty() {
            return DailyTrendsTable::default();
        }

        let rows = self
            .daily_trip_counts(year_filter)
            .entries()
            .iter()
            .filter_map(|count| {
                temperatures
                    .get(count.date)
                    .map(|mean_max_temperature| DailyTrend {
                        date: count.date,
                        trip_count: count.trip_count,
                        mean_max_temperature,
                    })
            })
            .collect();
        DailyTrendsTable::new(rows)
    }

    /// The `n` start stations with the most trips, descending by count.
    ///
    /// Ties keep the order in which stations first appear in the table. Trips
    /// without a station name are counted together as one `None` entry.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidParameter`] if `n` is zero.
    pub fn top_stations(&self, n: usize) -> Result<StationCountView, DashboardError> {
        if n < 1 {
            return Err(DashboardError::InvalidParameter {
                name: "n",
                value: n as i64,
                reason: "at least one station must be requested",
            });
        }

        let mut positions: HashMap<Option<&str>, usize> = HashMap::new();
        let mut counts: Vec<(Option<&str>, u64)> = Vec::new();
        for trip in self.records() {
            let station = trip.start_station_name.as_deref();
            let idx = *positions.entry(station).or_insert_with(|| {
                counts.push((station, 0));
                counts.len() - 1
            });
            counts[idx].1 += 1;
        }

        // Stable: equal counts stay in first-seen order.
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(n);

        Ok(StationCountView::new(
            counts
                .into_iter()
                .map(|(station, trip_count)| StationCount {
                    station: station.map(str::to_string),
                    trip_count,
                })
                .collect(),
        ))
    }

    /// Trips per hour of day. Always 24 entries; hours without trips count zero.
    pub fn hourly_trip_counts(&self) -> HourlyCountView {
        let mut counts = [0u64; HOURS_PER_DAY];
        for trip in self.records() {
            counts[trip.start_hour() as usize] += 1;
        }
        HourlyCountView::from_counts(counts)
    }
}
