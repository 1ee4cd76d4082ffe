use crate::trip_data::error::DataLoadError;
use crate::types::trip::TripRecord;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::debug;
use polars::prelude::*;
use std::path::Path;

pub(crate) const COL_STARTED_AT: &str = "started_at";
pub(crate) const COL_ENDED_AT: &str = "ended_at";
pub(crate) const COL_START_STATION: &str = "start_station_name";

/// Max temperature columns, in order of preference.
pub(crate) const TEMPERATURE_COLUMNS: [&str; 6] = [
    "TMAX",
    "tmax",
    "max_temperature",
    "max_temp",
    "max_temp_c",
    "max_temp_f",
];

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parses a timestamp string the way trip exports write them.
///
/// Offsets in RFC 3339 strings are ignored: the wall-clock part is kept as-is.
/// A bare date resolves to midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.naive_local())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Casts a column to `String`, or `None` when the frame lacks it.
fn string_column(df: &DataFrame, name: &str, path: &Path) -> Result<Option<Column>, DataLoadError> {
    match df.column(name) {
        Ok(column) => column
            .cast(&DataType::String)
            .map(Some)
            .map_err(|source| DataLoadError::ColumnType {
                path: path.to_path_buf(),
                column: name.to_string(),
                expected: "text",
                source,
            }),
        Err(_) => Ok(None),
    }
}

fn as_str<'a>(column: &'a Column, name: &str, path: &Path) -> Result<&'a StringChunked, DataLoadError> {
    column.str().map_err(|source| DataLoadError::ColumnType {
        path: path.to_path_buf(),
        column: name.to_string(),
        expected: "text",
        source,
    })
}

/// Finds the first known max temperature column and casts it to `Float64`.
fn temperature_column(df: &DataFrame, path: &Path) -> Result<Option<(String, Column)>, DataLoadError> {
    let Some(name) = TEMPERATURE_COLUMNS
        .iter()
        .find(|name| df.column(name).is_ok())
    else {
        return Ok(None);
    };
    let column = df
        .column(name)
        .and_then(|column| column.cast(&DataType::Float64))
        .map_err(|source| DataLoadError::ColumnType {
            path: path.to_path_buf(),
            column: name.to_string(),
            expected: "a number",
            source,
        })?;
    Ok(Some((name.to_string(), column)))
}

fn parse_required_timestamp(
    values: &StringChunked,
    row: usize,
    column: &str,
    path: &Path,
) -> Result<NaiveDateTime, DataLoadError> {
    let raw = values.get(row).ok_or_else(|| DataLoadError::MissingValue {
        path: path.to_path_buf(),
        column: column.to_string(),
        row,
    })?;
    parse_timestamp(raw).ok_or_else(|| DataLoadError::InvalidTimestamp {
        path: path.to_path_buf(),
        column: column.to_string(),
        row,
        value: raw.to_string(),
    })
}

fn parse_optional_timestamp(
    values: &StringChunked,
    row: usize,
    column: &str,
    path: &Path,
) -> Result<Option<NaiveDateTime>, DataLoadError> {
    match values.get(row) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_timestamp(raw)
            .map(Some)
            .ok_or_else(|| DataLoadError::InvalidTimestamp {
                path: path.to_path_buf(),
                column: column.to_string(),
                row,
                value: raw.to_string(),
            }),
    }
}

/// The validated rows of a trip frame, plus which temperature column fed them.
pub(crate) struct ExtractedTrips {
    pub records: Vec<TripRecord>,
    pub temperature_column: Option<String>,
}

/// Converts a raw CSV frame into typed trip records.
///
/// Fails on the first row whose `started_at` is missing or unparseable, so a
/// load either yields every row or none.
pub(crate) fn extract_trip_records(
    df: &DataFrame,
    path: &Path,
) -> Result<ExtractedTrips, DataLoadError> {
    let started_col =
        string_column(df, COL_STARTED_AT, path)?.ok_or_else(|| DataLoadError::MissingColumn {
            path: path.to_path_buf(),
            column: COL_STARTED_AT.to_string(),
        })?;
    let started = as_str(&started_col, COL_STARTED_AT, path)?;

    let ended_col = string_column(df, COL_ENDED_AT, path)?;
    let ended = ended_col
        .as_ref()
        .map(|column| as_str(column, COL_ENDED_AT, path))
        .transpose()?;

    let station_col = string_column(df, COL_START_STATION, path)?;
    let stations = station_col
        .as_ref()
        .map(|column| as_str(column, COL_START_STATION, path))
        .transpose()?;

    let temperature = temperature_column(df, path)?;
    let temperatures = match &temperature {
        Some((name, column)) => Some(column.f64().map_err(|source| DataLoadError::ColumnType {
            path: path.to_path_buf(),
            column: name.clone(),
            expected: "a number",
            source,
        })?),
        None => None,
    };
    match &temperature {
        Some((name, _)) => debug!("Using '{}' as max temperature column for {:?}", name, path),
        None => debug!("No max temperature column in {:?}", path),
    }

    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let started_at = parse_required_timestamp(started, row, COL_STARTED_AT, path)?;
        let ended_at = match ended {
            Some(values) => parse_optional_timestamp(values, row, COL_ENDED_AT, path)?,
            None => None,
        };
        let start_station_name = stations
            .and_then(|values| values.get(row))
            .map(str::to_string);
        let max_temperature = temperatures
            .and_then(|values| values.get(row))
            .filter(|value| !value.is_nan());

        records.push(TripRecord {
            trip_id: row,
            started_at,
            ended_at,
            start_station_name,
            max_temperature,
        });
    }

    Ok(ExtractedTrips {
        records,
        temperature_column: temperature.map(|(name, _)| name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn ymd_hm(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn parses_common_export_formats() {
        let expected = ymd_hm(2022, 1, 1, 8, 30);
        assert_eq!(parse_timestamp("2022-01-01 08:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2022-01-01T08:30"), Some(expected));
        assert_eq!(parse_timestamp("2022-01-01 08:30"), Some(expected));
        assert_eq!(parse_timestamp("01/01/2022 08:30"), Some(expected));
        assert_eq!(
            parse_timestamp("2022-01-01 08:30:00.123").map(|dt| dt.nanosecond()),
            Some(123_000_000)
        );
        assert_eq!(
            parse_timestamp("2022-01-01"),
            Some(ymd_hm(2022, 1, 1, 0, 0))
        );
    }

    #[test]
    fn keeps_wall_clock_of_offset_timestamps() {
        assert_eq!(
            parse_timestamp("2022-06-01T23:15:00-04:00"),
            Some(ymd_hm(2022, 6, 1, 23, 15))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2022-13-01 08:00"), None);
    }

    #[test]
    fn extracts_rows_with_optional_columns() -> Result<(), Box<dyn std::error::Error>> {
        let df = polars::df!(
            "started_at" => ["2022-01-01 08:00:00", "2022-01-02 18:00:00"],
            "ended_at" => [Some("2022-01-01 08:20:00"), None],
            "start_station_name" => [Some("A"), None],
            "TMAX" => [Some(41i64), None]
        )?;

        let extracted = extract_trip_records(&df, Path::new("mem.csv"))?;

        assert_eq!(extracted.temperature_column.as_deref(), Some("TMAX"));
        assert_eq!(extracted.records.len(), 2);
        assert_eq!(extracted.records[0].max_temperature, Some(41.0));
        assert_eq!(extracted.records[0].start_station_name.as_deref(), Some("A"));
        assert_eq!(
            extracted.records[0].ended_at,
            Some(ymd_hm(2022, 1, 1, 8, 20))
        );
        assert_eq!(extracted.records[1].trip_id, 1);
        assert_eq!(extracted.records[1].start_station_name, None);
        assert_eq!(extracted.records[1].max_temperature, None);
        Ok(())
    }

    #[test]
    fn missing_started_at_column_fails() -> Result<(), Box<dyn std::error::Error>> {
        let df = polars::df!("start_station_name" => ["A"])?;
        let result = extract_trip_records(&df, Path::new("mem.csv"));
        assert!(matches!(
            result,
            Err(DataLoadError::MissingColumn { ref column, .. }) if column == COL_STARTED_AT
        ));
        Ok(())
    }

    #[test]
    fn one_bad_timestamp_fails_whole_frame() -> Result<(), Box<dyn std::error::Error>> {
        let df = polars::df!("started_at" => ["2022-01-01 08:00:00", "not a time"])?;
        let result = extract_trip_records(&df, Path::new("mem.csv"));
        assert!(matches!(
            result,
            Err(DataLoadError::InvalidTimestamp { row: 1, .. })
        ));
        Ok(())
    }

    #[test]
    fn unparseable_ended_at_fails_whole_frame() -> Result<(), Box<dyn std::error::Error>> {
        let df = polars::df!(
            "started_at" => ["2022-01-01 08:00:00"],
            "ended_at" => ["garbage"]
        )?;
        let result = extract_trip_records(&df, Path::new("mem.csv"));
        assert!(matches!(
            result,
            Err(DataLoadError::InvalidTimestamp { ref column, ref value, row: 0, .. })
                if column == COL_ENDED_AT && value == "garbage"
        ));
        Ok(())
    }

    #[test]
    fn null_started_at_fails() -> Result<(), Box<dyn std::error::Error>> {
        let df = polars::df!("started_at" => [Some("2022-01-01 08:00:00"), None])?;
        let result = extract_trip_records(&df, Path::new("mem.csv"));
        assert!(matches!(result, Err(DataLoadError::MissingValue { row: 1, .. })));
        Ok(())
    }
}
