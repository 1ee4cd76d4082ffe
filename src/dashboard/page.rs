//! Dashboard navigation: the six pages and the handler each one dispatches to.

use crate::dashboard::config::DashboardConfig;
use crate::dashboard::handlers;
use crate::dashboard::map_artifact::MapArtifact;
use crate::dashboard::section::Section;
use crate::error::DashboardError;
use crate::trip_data::error::DataLoadError;
use crate::types::trip::TripTable;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One entry of the dashboard's navigation control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Introduction,
    DailyTrends,
    PopularStations,
    TripFlowMap,
    HourlyUsage,
    Recommendations,
}

/// Everything a page handler may read. Loads have already happened.
pub(crate) struct PageContext<'a> {
    pub config: &'a DashboardConfig,
    pub trips: Option<&'a Result<TripTable, DataLoadError>>,
    pub map: Option<&'a Result<MapArtifact, DashboardError>>,
}

impl PageContext<'_> {
    /// The loaded trip table, or the error section to show in its place.
    pub fn trip_table(&self) -> Result<&TripTable, Section> {
        match self.trips {
            Some(Ok(table)) => Ok(table),
            Some(Err(e)) => Err(Section::error(format!("Could not load trip data: {}", e))),
            None => Err(Section::error("Trip data was not loaded for this page")),
        }
    }
}

pub(crate) type PageHandler = fn(&PageContext<'_>) -> Vec<Section>;

impl Page {
    /// Navigation order.
    pub const ALL: [Page; 6] = [
        Page::Introduction,
        Page::DailyTrends,
        Page::PopularStations,
        Page::TripFlowMap,
        Page::HourlyUsage,
        Page::Recommendations,
    ];

    /// The label shown in the navigation control.
    pub fn label(self) -> &'static str {
        match self {
            Page::Introduction => "Introduction",
            Page::DailyTrends => "Daily Trends & Weather Analysis",
            Page::PopularStations => "Popular Stations Analysis",
            Page::TripFlowMap => "Trip Flow Map",
            Page::HourlyUsage => "Hourly Usage Analysis",
            Page::Recommendations => "Recommendations",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Page::Introduction => "introduction",
            Page::DailyTrends => "daily-trends",
            Page::PopularStations => "popular-stations",
            Page::TripFlowMap => "trip-flow-map",
            Page::HourlyUsage => "hourly-usage",
            Page::Recommendations => "recommendations",
        }
    }

    /// Whether rendering this page needs the trip table.
    pub fn uses_trip_data(self) -> bool {
        matches!(
            self,
            Page::DailyTrends | Page::PopularStations | Page::HourlyUsage
        )
    }

    /// Whether rendering this page needs the map artifact.
    pub fn uses_map_artifact(self) -> bool {
        self == Page::TripFlowMap
    }

    pub(crate) fn handler(self) -> PageHandler {
        match self {
            Page::Introduction => handlers::introduction,
            Page::DailyTrends => handlers::daily_trends,
            Page::PopularStations => handlers::popular_stations,
            Page::TripFlowMap => handlers::trip_flow_map,
            Page::HourlyUsage => handlers::hourly_usage,
            Page::Recommendations => handlers::recommendations,
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown page '{0}', expected one of: introduction, daily-trends, popular-stations, trip-flow-map, hourly-usage, recommendations")]
pub struct UnknownPage(pub String);

impl FromStr for Page {
    type Err = UnknownPage;

    /// Accepts a slug (`daily-trends`) or a navigation label, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Page::ALL
            .into_iter()
            .find(|page| {
                page.slug().eq_ignore_ascii_case(wanted) || page.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| UnknownPage(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_offers_six_pages_in_order() {
        let labels: Vec<&str> = Page::ALL.iter().map(|page| page.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Introduction",
                "Daily Trends & Weather Analysis",
                "Popular Stations Analysis",
                "Trip Flow Map",
                "Hourly Usage Analysis",
                "Recommendations",
            ]
        );
    }

    #[test]
    fn parses_slugs_and_labels() {
        for page in Page::ALL {
            assert_eq!(page.slug().parse::<Page>(), Ok(page));
            assert_eq!(page.label().parse::<Page>(), Ok(page));
            assert_eq!(page.label().to_uppercase().parse::<Page>(), Ok(page));
        }
        assert!(matches!("weather".parse::<Page>(), Err(UnknownPage(s)) if s == "weather"));
    }

    #[test]
    fn serializes_as_slug() {
        for page in Page::ALL {
            assert_eq!(
                serde_json::to_value(page).unwrap(),
                serde_json::Value::String(page.slug().to_string())
            );
        }
    }

    #[test]
    fn only_analysis_pages_need_trips() {
        let data_pages: Vec<Page> = Page::ALL
            .into_iter()
            .filter(|page| page.uses_trip_data())
            .collect();
        assert_eq!(
            data_pages,
            vec![Page::DailyTrends, Page::PopularStations, Page::HourlyUsage]
        );
        assert!(Page::TripFlowMap.uses_map_artifact());
        assert!(!Page::Introduction.uses_map_artifact());
    }
}
