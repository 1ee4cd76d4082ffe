use crate::aggregate::DEFAULT_TOP_STATIONS;
use crate::types::year::Year;
use bon::Builder;
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "citibike_trips_2024_sample.csv";
pub const DEFAULT_MAP_PATH: &str = "citibike_arc_map_2022.html";
pub const DEFAULT_TITLE: &str = "NYC Citi Bike Dashboard";

/// Settings for a [`crate::Dashboard`].
///
/// # Examples
///
/// ```
/// use citibike_dashboard::{DashboardConfig, Year};
///
/// let config = DashboardConfig::builder()
///     .data_path("citibike_weather_merged_2022.csv")
///     .year_filter(Year(2022))
///     .build();
///
/// assert_eq!(config.top_stations, 20);
/// assert_eq!(config.map_path.to_str(), Some("citibike_arc_map_2022.html"));
/// ```
#[derive(Debug, Clone, Builder)]
pub struct DashboardConfig {
    /// Trip CSV every data page reads from.
    #[builder(into)]
    pub data_path: PathBuf,
    /// Pre-built trip flow map shown verbatim on the map page.
    #[builder(into, default = PathBuf::from(DEFAULT_MAP_PATH))]
    pub map_path: PathBuf,
    /// Restricts the daily views to one year. `None` keeps every trip.
    pub year_filter: Option<Year>,
    #[builder(default = DEFAULT_TOP_STATIONS)]
    pub top_stations: usize,
    #[builder(into, default = DEFAULT_TITLE.to_string())]
    pub title: String,
    /// Height in pixels the embedded map asks for.
    #[builder(default = 600)]
    pub map_height: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self::builder().data_path(DEFAULT_DATA_PATH).build()
    }
}
