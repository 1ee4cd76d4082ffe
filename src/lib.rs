//! Bike-share trip aggregation and a page-based dashboard on top of it.
//!
//! Load a trip CSV into an immutable [`TripTable`] (directly with [`TripDataLoader`]
//! or through the keyed [`TripStore`]), then derive daily, station and hourly views
//! from it. [`Dashboard`] renders those views as the six navigable pages.
//!
//! ```no_run
//! use citibike_dashboard::{TripStore, Year};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = TripStore::new();
//! let trips = store.load("citibike_weather_merged_2022.csv").await?;
//!
//! let trends = trips.daily_trends(Some(Year(2022)));
//! let stations = trips.top_stations(20)?;
//! let hours = trips.hourly_trip_counts();
//! println!("{}\n{}\n{}", trends, stations, hours);
//! # Ok(())
//! # }
//! ```

mod aggregate;
#[cfg(feature = "charts")]
pub mod charts;
mod dashboard;
mod error;
mod trip_data;
mod types;

pub use error::DashboardError;
pub use trip_data::error::DataLoadError;

pub use aggregate::DEFAULT_TOP_STATIONS;
pub use dashboard::config::*;
pub use dashboard::export_page;
pub use dashboard::map_artifact::MapArtifact;
pub use dashboard::page::{Page, UnknownPage};
pub use dashboard::section::{Chart, PageView, Section};
pub use dashboard::Dashboard;

pub use trip_data::data_loader::TripDataLoader;
pub use trip_data::extractor::parse_timestamp;
pub use trip_data::frame_cache::TripStore;

pub use types::trip::{TripRecord, TripTable};
pub use types::views::*;
pub use types::year::{StartEndDate, Year};
