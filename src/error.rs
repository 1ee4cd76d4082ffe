use crate::trip_data::error::DataLoadError;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),

    #[error("Invalid value {value} for parameter '{name}': {reason}")]
    InvalidParameter {
        name: &'static str,
        value: i64,
        reason: &'static str,
    },

    #[error("Map artifact '{0}' does not exist")]
    MapArtifactMissing(PathBuf),

    #[error("Failed to read map artifact '{0}'")]
    MapArtifactRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to build chart frame")]
    Frame(#[from] PolarsError),

    #[error("Failed to serialize chart data")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write '{0}'")]
    Write(PathBuf, #[source] std::io::Error),
}
