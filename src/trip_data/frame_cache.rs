use crate::trip_data::data_loader::TripDataLoader;
use crate::trip_data::error::DataLoadError;
use crate::types::trip::TripTable;
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};

type TableCell = Arc<OnceCell<TripTable>>;

/// Keyed store of loaded trip tables (path → table), owned by the host.
///
/// A path is read at most once for the lifetime of the store. Changes to the file on
/// disk are not picked up until the entry is dropped with [`TripStore::invalidate`]
/// or [`TripStore::clear`].
#[derive(Default)]
pub struct TripStore {
    loader: TripDataLoader,
    tables: Mutex<HashMap<PathBuf, TableCell>>,
}

impl TripStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loader(loader: TripDataLoader) -> Self {
        Self {
            loader,
            tables: Mutex::new(HashMap::new()),
        }
    }

    async fn cell(&self, path: &Path) -> TableCell {
        let mut tables = self.tables.lock().await;
        Arc::clone(tables.entry(path.to_path_buf()).or_default())
    }

    /// Returns the table for `path`, loading it on first use.
    ///
    /// Concurrent callers for the same path wait on one read; loads of other paths
    /// and the inspection methods are not held up by it. Failed loads leave the
    /// store untouched, so a later call retries the file.
    pub async fn load(&self, path: impl AsRef<Path>) -> Result<TripTable, DataLoadError> {
        let path = path.as_ref();
        let cell = self.cell(path).await;
        if let Some(table) = cell.get() {
            debug!("Trip store hit for {:?}", path);
            return Ok(table.clone());
        }

        let result = cell
            .get_or_try_init(|| async {
                info!("Trip store miss for {:?}, reading file", path);
                self.loader.load(path).await
            })
            .await;

        match result {
            Ok(table) => Ok(table.clone()),
            Err(e) => {
                let mut tables = self.tables.lock().await;
                let unused = tables
                    .get(path)
                    .is_some_and(|current| Arc::ptr_eq(current, &cell) && !current.initialized());
                if unused {
                    tables.remove(path);
                }
                Err(e)
            }
        }
    }

    /// Drops the cached table for `path`. Returns whether a loaded table was dropped.
    pub async fn invalidate(&self, path: impl AsRef<Path>) -> bool {
        let removed = self
            .tables
            .lock()
            .await
            .remove(path.as_ref())
            .is_some_and(|cell| cell.initialized());
        if removed {
            info!("Invalidated cached trips for {:?}", path.as_ref());
        }
        removed
    }

    pub async fn clear(&self) {
        self.tables.lock().await.clear();
    }

    /// Whether a loaded table is cached for `path`. Loads still in flight do not count.
    pub async fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.tables
            .lock()
            .await
            .get(path.as_ref())
            .is_some_and(|cell| cell.initialized())
    }

    pub async fn len(&self) -> usize {
        self.tables
            .lock()
            .await
            .values()
            .filter(|cell| cell.initialized())
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn trip_file(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "started_at,start_station_name").unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn second_load_is_served_from_cache() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = trip_file(&["2022-01-01 08:00:00,A"]);
        let store = TripStore::new();

        let first = store.load(file.path()).await?;
        assert_eq!(first.len(), 1);

        // The file grows, but the cached snapshot does not.
        writeln!(file, "2022-01-01 09:00:00,B")?;
        file.flush()?;

        let second = store.load(file.path()).await?;
        assert_eq!(second.len(), 1);
        assert!(std::ptr::eq(first.records(), second.records()));
        assert_eq!(store.len().await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn invalidate_forces_a_reload() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = trip_file(&["2022-01-01 08:00:00,A"]);
        let store = TripStore::new();
        store.load(file.path()).await?;

        writeln!(file, "2022-01-01 09:00:00,B")?;
        file.flush()?;

        assert!(store.invalidate(file.path()).await);
        assert!(!store.invalidate(file.path()).await);
        let reloaded = store.load(file.path()).await?;
        assert_eq!(reloaded.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn failed_load_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");
        let store = TripStore::new();

        let result = store.load(&missing).await;

        assert!(matches!(result, Err(DataLoadError::FileNotFound(_))));
        assert!(!store.contains(&missing).await);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn store_stays_responsive_during_a_load() -> Result<(), Box<dyn std::error::Error>> {
        let first = trip_file(&["2022-01-01 08:00:00,A"]);
        let second = trip_file(&["2022-01-02 08:00:00,B", "2022-01-03 08:00:00,C"]);
        let store = Arc::new(TripStore::new());

        // Claim the first path's slot without loading it, as a slow reader would.
        let pending = store.cell(first.path()).await;
        assert!(!pending.initialized());

        let other = tokio::time::timeout(Duration::from_secs(5), store.load(second.path())).await??;
        assert_eq!(other.len(), 2);
        assert!(!store.contains(first.path()).await);
        assert!(store.contains(second.path()).await);
        assert_eq!(store.len().await, 1);

        let table = store.load(first.path()).await?;
        assert_eq!(table.len(), 1);
        assert_eq!(store.len().await, 2);
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_loads_share_one_table() -> Result<(), Box<dyn std::error::Error>> {
        let file = trip_file(&["2022-01-01 08:00:00,A", "2022-01-02 08:00:00,B"]);
        let store = Arc::new(TripStore::new());
        let path = file.path().to_path_buf();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                let path = path.clone();
                tokio::spawn(async move { store.load(path).await })
            })
            .collect();

        let mut tables = Vec::new();
        for handle in handles {
            tables.push(handle.await??);
        }
        assert!(tables
            .windows(2)
            .all(|pair| std::ptr::eq(pair[0].records(), pair[1].records())));
        assert_eq!(store.len().await, 1);

        store.clear().await;
        assert!(store.is_empty().await);
        Ok(())
    }
}
