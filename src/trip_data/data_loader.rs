use crate::trip_data::error::DataLoadError;
use crate::trip_data::extractor::extract_trip_records;
use crate::types::trip::TripTable;
use log::{info, warn};
use polars::prelude::*;
use std::io;
use std::path::Path;
use tokio::{fs, task};

/// Reads trip CSV files into validated [`TripTable`]s.
///
/// Uncached: every call re-reads the file. Use [`crate::TripStore`] to share loads.
#[derive(Debug, Clone, Default)]
pub struct TripDataLoader {
    infer_schema_length: Option<usize>,
}

impl TripDataLoader {
    /// A loader that scans the whole file before fixing column types.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits schema inference to the first `rows` rows. Faster on large files, but
    /// a column whose type changes after that point fails the load.
    pub fn with_infer_schema_length(mut self, rows: usize) -> Self {
        self.infer_schema_length = Some(rows);
        self
    }

    /// Loads and validates the trip file at `path`.
    ///
    /// The path is checked up front; parsing happens on a blocking task.
    ///
    /// # Errors
    ///
    /// Returns [`DataLoadError::FileNotFound`] if nothing exists at `path`,
    /// [`DataLoadError::CsvRead`] if the file is not tabular, and the column
    /// variants of [`DataLoadError`] if `started_at` is missing or unparseable.
    pub async fn load(&self, path: &Path) -> Result<TripTable, DataLoadError> {
        match fs::metadata(path).await {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => return Err(DataLoadError::NotAFile(path.to_path_buf())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Trip data file {:?} does not exist", path);
                return Err(DataLoadError::FileNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(DataLoadError::FileRead(path.to_path_buf(), e)),
        }

        let loader = self.clone();
        let path_buf = path.to_path_buf();
        task::spawn_blocking(move || loader.load_blocking(&path_buf)).await?
    }

    /// Synchronous variant of [`TripDataLoader::load`] for hosts without a runtime.
    pub fn load_blocking(&self, path: &Path) -> Result<TripTable, DataLoadError> {
        if !path.exists() {
            return Err(DataLoadError::FileNotFound(path.to_path_buf()));
        }

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(self.infer_schema_length)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|source| DataLoadError::CsvRead {
                path: path.to_path_buf(),
                source,
            })?
            .finish()
            .map_err(|source| DataLoadError::CsvRead {
                path: path.to_path_buf(),
                source,
            })?;

        let extracted = extract_trip_records(&df, path)?;
        info!(
            "Loaded {} trips from {:?} (temperature column: {})",
            extracted.records.len(),
            path,
            extracted.temperature_column.as_deref().unwrap_or("none")
        );

        Ok(TripTable::new(
            path,
            extracted.records,
            extracted.temperature_column,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn loads_trips_with_weather() -> Result<(), Box<dyn std::error::Error>> {
        let file = write_csv(
            "ride_id,started_at,ended_at,start_station_name,TMAX\n\
             r1,2022-01-01 08:00:00,2022-01-01 08:12:00,A,40\n\
             r2,2022-01-01 08:30:00,2022-01-01 08:45:00,A,40\n\
             r3,2022-01-02 18:00:00,2022-01-02 18:30:00,B,38.5\n",
        );

        let table = TripDataLoader::new().load(file.path()).await?;

        assert_eq!(table.len(), 3);
        assert_eq!(table.temperature_column(), Some("TMAX"));
        assert_eq!(table.records()[2].max_temperature, Some(38.5));
        assert_eq!(table.records()[2].start_hour(), 18);
        assert_eq!(table.source(), file.path());
        Ok(())
    }

    #[tokio::test]
    async fn loads_trips_without_weather() -> Result<(), Box<dyn std::error::Error>> {
        let file = write_csv(
            "started_at,ended_at,start_station_name\n\
             2024-05-01 07:59:59.120,2024-05-01 08:10:00.000,W 21 St & 6 Ave\n",
        );

        let table = TripDataLoader::new().load(file.path()).await?;

        assert_eq!(table.len(), 1);
        assert!(!table.has_temperature());
        assert_eq!(table.records()[0].start_hour(), 7);
        Ok(())
    }

    #[tokio::test]
    async fn numeric_station_names_stay_text() -> Result<(), Box<dyn std::error::Error>> {
        let file = write_csv("started_at,start_station_name\n2022-01-01 08:00:00,6140\n");

        let table = TripDataLoader::new().load(file.path()).await?;

        assert_eq!(
            table.records()[0].start_station_name.as_deref(),
            Some("6140")
        );
        Ok(())
    }

    #[tokio::test]
    async fn missing_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");

        let result = TripDataLoader::new().load(&missing).await;

        assert!(matches!(result, Err(DataLoadError::FileNotFound(ref p)) if *p == missing));
    }

    #[tokio::test]
    async fn directory_is_not_a_trip_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = TripDataLoader::new().load(dir.path()).await;
        assert!(matches!(result, Err(DataLoadError::NotAFile(_))));
    }

    #[tokio::test]
    async fn missing_started_at_fails_the_load() {
        let file = write_csv("start_station_name,TMAX\nA,40\n");
        let result = TripDataLoader::new().load(file.path()).await;
        assert!(matches!(result, Err(DataLoadError::MissingColumn { .. })));
    }

    #[tokio::test]
    async fn empty_file_is_not_tabular() {
        let file = write_csv("");
        let result = TripDataLoader::new().load(file.path()).await;
        assert!(matches!(result, Err(DataLoadError::CsvRead { ref path, .. }) if path == file.path()));
    }

    #[tokio::test]
    async fn bad_ended_at_fails_the_whole_load() {
        let file = write_csv(
            "started_at,ended_at\n\
             2022-01-01 08:00:00,2022-01-01 08:10:00\n\
             2022-01-01 09:00:00,soon\n",
        );
        let result = TripDataLoader::new().load(file.path()).await;
        assert!(matches!(
            result,
            Err(DataLoadError::InvalidTimestamp { ref column, row: 1, .. }) if column == "ended_at"
        ));
    }

    #[test]
    fn blocking_load_matches_async_semantics() -> Result<(), Box<dyn std::error::Error>> {
        let file = write_csv("started_at\n2022-01-01T08:00\n2022-01-01T09:00\n");
        let table = TripDataLoader::new()
            .with_infer_schema_length(1)
            .load_blocking(file.path())?;
        assert_eq!(table.len(), 2);
        Ok(())
    }
}
