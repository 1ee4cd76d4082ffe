// Static commentary shown alongside the charts.

pub const INTRODUCTION_HEADING: &str = "NYC Citi Bike Usage: A Strategic Analysis";

pub const INTRODUCTION_SUBTITLE: &str = "Dashboard for Informed Decision-Making";

/// Orientation note for the navigation control.
pub const NAVIGATION_BLURB: &str = "\
This dashboard presents an analysis of NYC Citi Bike usage patterns.
Pick a page from the navigation to switch between analytical views.";

pub const INTRODUCTION: &str = "\
The bike-share program is part of the city's transport network, and running it well
depends on knowing how riders actually use it.

This dashboard looks at trip records to answer questions about **supply, demand and
operational efficiency**:

- how temperature shapes daily ridership,
- which start stations carry the most demand,
- how trips flow across the city,
- how demand moves through the hours of a day.

Pick a page from the navigation to explore each view.";

pub const DAILY_TRENDS_LEAD: &str =
    "How does temperature affect the number of daily bike trips?";

pub const DAILY_TRENDS_INTERPRETATION: &str = "\
- **Temperature drives ridership:** trip counts climb as daily highs rise.
- **Seasonal pattern:** ridership peaks from late spring to early autumn and drops sharply in winter.
- **Implication:** fleet size and station capacity do not need to stay constant through the year.";

pub const POPULAR_STATIONS_LEAD: &str =
    "Where do journeys begin? These stations are the busiest starting points in the network.";

pub const POPULAR_STATIONS_INTERPRETATION: &str = "\
- **High-demand hubs:** the top stations sit near dense housing, transit hubs and business districts.
- **Concentration:** most of them cluster in Manhattan, around Midtown and the West Side.
- **Operational risk:** these stations are the first to run out of bikes or free docks and need constant rebalancing.";

pub const TRIP_FLOW_MAP_LEAD: &str =
    "Aggregated trip flows across New York City, rendered as an arc map.";

pub const TRIP_FLOW_MAP_MISSING_HINT: &str =
    "Generate the trip flow map and place it at the configured map path to show it here.";

pub const TRIP_FLOW_MAP_INTERPRETATION: &str = "\
- **Commuter corridors:** the heaviest arcs link residential neighbourhoods with commercial centres.
- **Waterfront routes:** paths along the Hudson and East River carry both commuting and leisure traffic.
- **Coverage gaps:** trips ending far from any station point at areas that could use a new one.";

pub const HOURLY_USAGE_LEAD: &str =
    "When are bikes most in demand? Trip counts broken down by the hour a trip started.";

pub const HOURLY_USAGE_INTERPRETATION: &str = "\
- **Two peaks:** a morning spike around 8-9 AM and a broader evening peak from 5-7 PM.
- **Midday lull:** usage dips between 11 AM and 2 PM before ramping up again.
- **Rebalancing:** move bikes toward business districts after the morning rush and back toward residential areas in the afternoon.";

pub const RECOMMENDATIONS_LEAD: &str =
    "Recommendations for running the bike-share program more efficiently, based on the analysis.";

pub const RECOMMENDATIONS: [(&str, &str); 3] = [
    (
        "1. Seasonal fleet management",
        "\
- **Problem:** ridership is much lower from November to April, yet the full fleet stays in service.
- **Recommendation:** take 50-60% of bikes out of service in winter for maintenance and storage,
  cutting wear and rebalancing costs.",
    ),
    (
        "2. Station placement and capacity",
        "\
- **Problem:** a handful of stations are hotspots, while some waterfront areas are underserved.
- **Recommendation:** add 15-25% more docks at the top 20 stations, and survey busy waterfront
  destinations for 2-3 new stations.",
    ),
    (
        "3. Data-driven rebalancing",
        "\
- **Problem:** bikes pile up in business districts in the morning and in residential areas in the evening.
- **Recommendation:** after the 9 AM peak, move bikes out of commercial hubs; from 3 PM, restock them
  ahead of the evening rush. Pilot small ride credits for riders who help rebalance.",
    ),
];
