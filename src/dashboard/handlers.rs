//! One function per dashboard page. Handlers never fail: problems become sections.

use crate::dashboard::content;
use crate::dashboard::page::PageContext;
use crate::dashboard::section::{Chart, Section};
use crate::types::trip::TripTable;
use crate::types::year::Year;

fn with_year(title: &str, year_filter: Option<Year>) -> String {
    match year_filter {
        Some(year) => format!("{} ({})", title, year),
        None => title.to_string(),
    }
}

/// One line on how much data the page is drawn from.
fn coverage(table: &TripTable, year_filter: Option<Year>) -> Section {
    let span = match table.date_range() {
        Some(range) => format!("from {}", range),
        None => "with no dates".to_string(),
    };
    let text = match year_filter {
        Some(year) => format!(
            "{} of {} trips started in {} (data runs {}).",
            table.row_count(year_filter),
            table.len(),
            year,
            span
        ),
        None => format!("{} trips, {}.", table.len(), span),
    };
    Section::markdown(text)
}

fn interpretation(text: &str) -> [Section; 3] {
    [
        Section::Divider,
        Section::heading("Interpretation"),
        Section::markdown(text),
    ]
}

pub(crate) fn introduction(ctx: &PageContext<'_>) -> Vec<Section> {
    vec![
        Section::heading(ctx.config.title.as_str()),
        Section::heading(content::INTRODUCTION_HEADING),
        Section::markdown(format!("*{}*", content::INTRODUCTION_SUBTITLE)),
        Section::markdown(content::INTRODUCTION),
        Section::Divider,
        Section::notice(content::NAVIGATION_BLURB),
    ]
}

pub(crate) fn daily_trends(ctx: &PageContext<'_>) -> Vec<Section> {
    let mut sections = vec![Section::markdown(content::DAILY_TRENDS_LEAD)];
    let table = match ctx.trip_table() {
        Ok(table) => table,
        Err(section) => {
            sections.push(section);
            return sections;
        }
    };

    let year_filter = ctx.config.year_filter;
    sections.push(coverage(table, year_filter));
    if let Some(year) = year_filter {
        if table.row_count(year_filter) == 0 {
            let years: Vec<String> = table.years().iter().map(Year::to_string).collect();
            sections.push(Section::notice(format!(
                "No trips started in {}. Years with data: {}.",
                year,
                if years.is_empty() {
                    "none".to_string()
                } else {
                    years.join(", ")
                }
            )));
            return sections;
        }
    }

    let trends = table.daily_trends(year_filter);
    if trends.is_empty() {
        let reason = if table.has_temperature() {
            "No days have both trips and temperature readings"
        } else {
            "The trip data carries no temperature column"
        };
        sections.push(Section::notice(format!(
            "{}; showing daily trip counts only.",
            reason
        )));
        sections.push(Section::chart(
            with_year("Daily Bike Trips", year_filter),
            Chart::DailyTrips(table.daily_trip_counts(year_filter)),
        ));
    } else {
        sections.push(Section::chart(
            with_year("Daily Bike Trips vs. Maximum Temperature", year_filter),
            Chart::DailyTrends(trends),
        ));
    }

    sections.extend(interpretation(content::DAILY_TRENDS_INTERPRETATION));
    sections
}

pub(crate) fn popular_stations(ctx: &PageContext<'_>) -> Vec<Section> {
    let mut sections = vec![Section::markdown(content::POPULAR_STATIONS_LEAD)];
    let table = match ctx.trip_table() {
        Ok(table) => table,
        Err(section) => {
            sections.push(section);
            return sections;
        }
    };

    let n = ctx.config.top_stations;
    match table.top_stations(n) {
        Ok(view) => sections.push(Section::chart(
            format!("Top {} Most Popular Start Stations", n),
            Chart::TopStations(view),
        )),
        Err(e) => sections.push(Section::error(e.to_string())),
    }

    sections.extend(interpretation(content::POPULAR_STATIONS_INTERPRETATION));
    sections
}

pub(crate) fn trip_flow_map(ctx: &PageContext<'_>) -> Vec<Section> {
    let mut sections = vec![Section::markdown(content::TRIP_FLOW_MAP_LEAD)];

    match ctx.map {
        Some(Ok(map)) => sections.push(Section::Html {
            source: map.path().to_path_buf(),
            height: ctx.config.map_height,
            document: map.bytes().to_vec(),
        }),
        Some(Err(e)) => sections.push(Section::warning(format!(
            "{}. {}",
            e,
            content::TRIP_FLOW_MAP_MISSING_HINT
        ))),
        None => sections.push(Section::warning(content::TRIP_FLOW_MAP_MISSING_HINT)),
    }

    sections.extend(interpretation(content::TRIP_FLOW_MAP_INTERPRETATION));
    sections
}

pub(crate) fn hourly_usage(ctx: &PageContext<'_>) -> Vec<Section> {
    let mut sections = vec![Section::markdown(content::HOURLY_USAGE_LEAD)];
    match ctx.trip_table() {
        Ok(table) => sections.push(Section::chart(
            "Bike Usage by Hour of the Day",
            Chart::HourlyUsage(table.hourly_trip_counts()),
        )),
        Err(section) => {
            sections.push(section);
            return sections;
        }
    }

    sections.extend(interpretation(content::HOURLY_USAGE_INTERPRETATION));
    sections
}

pub(crate) fn recommendations(_ctx: &PageContext<'_>) -> Vec<Section> {
    let mut sections = vec![Section::markdown(content::RECOMMENDATIONS_LEAD)];
    for (heading, body) in content::RECOMMENDATIONS {
        sections.push(Section::heading(heading));
        sections.push(Section::markdown(body));
    }
    sections
}
