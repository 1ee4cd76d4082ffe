use crate::error::DashboardError;
use log::{debug, warn};
use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// A pre-generated, self-contained HTML map, kept exactly as read from disk.
#[derive(Debug, Clone)]
pub struct MapArtifact {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl MapArtifact {
    /// Reads the map file. Its contents are never parsed or validated.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::MapArtifactMissing`] if the file does not exist and
    /// [`DashboardError::MapArtifactRead`] for any other I/O failure.
    pub async fn load(path: &Path) -> Result<Self, DashboardError> {
        match fs::read(path).await {
            Ok(bytes) => {
                debug!("Read {} byte map artifact from {:?}", bytes.len(), path);
                Ok(Self {
                    path: path.to_path_buf(),
                    bytes,
                })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Map artifact {:?} not found", path);
                Err(DashboardError::MapArtifactMissing(path.to_path_buf()))
            }
            Err(e) => Err(DashboardError::MapArtifactRead(path.to_path_buf(), e)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The document as text. Invalid UTF-8 sequences are replaced, not rejected.
    pub fn html(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_document_verbatim() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("map.html");
        let document = "<html><body><div id=\"kepler\">ñ</div></body></html>";
        std::fs::write(&path, document)?;

        let map = MapArtifact::load(&path).await?;

        assert_eq!(map.bytes(), document.as_bytes());
        assert_eq!(map.html(), document);
        assert_eq!(map.path(), path.as_path());
        Ok(())
    }

    #[tokio::test]
    async fn invalid_utf8_is_replaced() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("map.html");
        std::fs::write(&path, b"<p>\xff</p>")?;

        let map = MapArtifact::load(&path).await?;

        assert_eq!(map.len(), 8);
        assert_eq!(map.html(), "<p>\u{fffd}</p>");
        Ok(())
    }

    #[tokio::test]
    async fn missing_map_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.html");

        let result = MapArtifact::load(&path).await;

        assert!(matches!(result, Err(DashboardError::MapArtifactMissing(ref p)) if *p == path));
    }
}
