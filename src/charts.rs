//! Standalone HTML charts for dashboard sections.
//!
//! Single-series line charts go through plotlars. Charts that mix trace types or
//! colour bars by value are assembled directly with plotly.

use crate::dashboard::section::Chart;
use crate::error::DashboardError;
use crate::types::views::{DailyTrendsTable, HourlyCountView, StationCountView};
use plotlars::{Plot as _, Rgb, Text, TimeSeriesPlot};
use plotly::common::{
    AxisSide, ColorScale, ColorScaleElement, ColorScalePalette, Line, Marker, Mode, Orientation,
    Title,
};
use plotly::layout::{Axis, Layout, TickMode};
use plotly::{Bar, Plot, Scatter};
use std::path::Path;

const TRIPS_COLOR: Rgb = Rgb(69, 157, 230);

/// Plasma stops, low to high.
const PLASMA: [(f64, &str); 5] = [
    (0.0, "#0d0887"),
    (0.25, "#7e03a8"),
    (0.5, "#cc4778"),
    (0.75, "#f89540"),
    (1.0, "#f0f921"),
];

/// Renders `chart` and writes it as a self-contained HTML page at `path`.
pub fn write_chart_html(title: &str, chart: &Chart, path: &Path) -> Result<(), DashboardError> {
    match chart {
        Chart::DailyTrends(view) => daily_trends_plot(title, view).write_html(path),
        Chart::DailyTrips(_) => {
            let frame = chart.to_frame()?;
            TimeSeriesPlot::builder()
                .data(&frame)
                .x("date")
                .y("trip_count")
                .colors(vec![TRIPS_COLOR])
                .plot_title(Text::from(title).size(18))
                .x_title("Date")
                .y_title("Number of Trips")
                .build()
                .write_html(path.to_string_lossy().into_owned());
        }
        Chart::TopStations(view) => top_stations_plot(title, view).write_html(path),
        Chart::HourlyUsage(view) => hourly_usage_plot(title, view).write_html(path),
    }
    Ok(())
}

/// Trips as bars on the left axis, mean max temperature as a line on the right.
fn daily_trends_plot(title: &str, view: &DailyTrendsTable) -> Plot {
    let dates: Vec<String> = view.rows().iter().map(|row| row.date.to_string()).collect();
    let trips: Vec<u64> = view.rows().iter().map(|row| row.trip_count).collect();
    let temps: Vec<f64> = view
        .rows()
        .iter()
        .map(|row| row.mean_max_temperature)
        .collect();

    let mut plot = Plot::new();
    plot.add_trace(
        Bar::new(dates.clone(), trips)
            .name("Daily Trips")
            .marker(Marker::new().color("skyblue")),
    );
    plot.add_trace(
        Scatter::new(dates, temps)
            .name("Max Temperature")
            .mode(Mode::LinesMarkers)
            .line(Line::new().color("orangered"))
            .y_axis("y2"),
    );
    plot.set_layout(
        Layout::new()
            .title(Title::with_text(title))
            .x_axis(Axis::new().title(Title::with_text("Date")))
            .y_axis(Axis::new().title(Title::with_text("Number of Trips")))
            .y_axis2(
                Axis::new()
                    .title(Title::with_text("Max Temperature"))
                    .overlaying("y")
                    .side(AxisSide::Right)
                    .show_grid(false),
            ),
    );
    plot
}

/// Horizontal bars coloured by trip count, busiest station on top.
fn top_stations_plot(title: &str, view: &StationCountView) -> Plot {
    // Plotly draws the first category at the bottom.
    let entries: Vec<_> = view.entries().iter().rev().collect();
    let labels: Vec<String> = entries.iter().map(|entry| entry.label().to_string()).collect();
    let counts: Vec<u64> = entries.iter().map(|entry| entry.trip_count).collect();
    let colors: Vec<f64> = counts.iter().map(|&count| count as f64).collect();

    let mut plot = Plot::new();
    plot.add_trace(
        Bar::new(counts, labels)
            .orientation(Orientation::Horizontal)
            .marker(
                Marker::new()
                    .color_array(colors)
                    .color_scale(ColorScale::Palette(ColorScalePalette::Viridis))
                    .show_scale(true),
            ),
    );
    plot.set_layout(
        Layout::new()
            .title(Title::with_text(title))
            .x_axis(Axis::new().title(Title::with_text("Number of Trips")))
            .y_axis(Axis::new().title(Title::with_text("Station Name"))),
    );
    plot
}

/// One bar per hour, coloured by trip count, with a tick on every hour.
fn hourly_usage_plot(title: &str, view: &HourlyCountView) -> Plot {
    let hours: Vec<u32> = view.entries().iter().map(|entry| entry.hour).collect();
    let counts: Vec<u64> = view.entries().iter().map(|entry| entry.trip_count).collect();
    let colors: Vec<f64> = counts.iter().map(|&count| count as f64).collect();
    let scale = PLASMA
        .iter()
        .map(|&(stop, color)| ColorScaleElement(stop, color.to_string()))
        .collect();

    let mut plot = Plot::new();
    plot.add_trace(
        Bar::new(hours, counts).marker(
            Marker::new()
                .color_array(colors)
                .color_scale(ColorScale::Vector(scale))
                .show_scale(true),
        ),
    );
    plot.set_layout(
        Layout::new()
            .title(Title::with_text(title))
            .x_axis(
                Axis::new()
                    .title(Title::with_text("Hour of Day (0-23)"))
                    .tick_mode(TickMode::Linear)
                    .tick0(0.0)
                    .dtick(1.0),
            )
            .y_axis(Axis::new().title(Title::with_text("Number of Trips"))),
    );
    plot
}
