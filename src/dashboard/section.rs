use crate::dashboard::page::Page;
use crate::types::views::{DailyCountView, DailyTrendsTable, HourlyCountView, StationCountView};
use polars::prelude::{DataFrame, PolarsResult};
use serde::Serialize;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// The data behind one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Chart {
    /// Trips and mean max temperature per day, on two axes.
    DailyTrends(DailyTrendsTable),
    /// Trips per day, for inputs without weather.
    DailyTrips(DailyCountView),
    TopStations(StationCountView),
    HourlyUsage(HourlyCountView),
}

impl Chart {
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        match self {
            Chart::DailyTrends(view) => view.to_frame(),
            Chart::DailyTrips(view) => view.to_frame(),
            Chart::TopStations(view) => view.to_frame(),
            Chart::HourlyUsage(view) => view.to_frame(),
        }
    }
}

impl Display for Chart {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Chart::DailyTrends(view) => Display::fmt(view, f),
            Chart::DailyTrips(view) => Display::fmt(view, f),
            Chart::TopStations(view) => Display::fmt(view, f),
            Chart::HourlyUsage(view) => Display::fmt(view, f),
        }
    }
}

/// One block of a rendered page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    Heading {
        text: String,
    },
    Markdown {
        text: String,
    },
    Chart {
        title: String,
        chart: Chart,
    },
    /// An external HTML document, passed through untouched.
    Html {
        source: PathBuf,
        height: u32,
        /// The document exactly as read from disk, not necessarily valid UTF-8.
        #[serde(skip)]
        document: Vec<u8>,
    },
    /// A "no data" state, not a failure.
    Notice {
        text: String,
    },
    Warning {
        text: String,
    },
    Error {
        text: String,
    },
    Divider,
}

impl Section {
    pub fn heading(text: impl Into<String>) -> Self {
        Section::Heading { text: text.into() }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Section::Markdown { text: text.into() }
    }

    pub fn chart(title: impl Into<String>, chart: Chart) -> Self {
        Section::Chart {
            title: title.into(),
            chart,
        }
    }

    pub fn notice(text: impl Into<String>) -> Self {
        Section::Notice { text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Section::Warning { text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Section::Error { text: text.into() }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Section::Error { .. })
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Section::Heading { text } => writeln!(f, "## {}", text),
            Section::Markdown { text } => writeln!(f, "{}", text.trim()),
            Section::Chart { title, chart } => {
                writeln!(f, "[{}]", title)?;
                write!(f, "{}", chart)
            }
            Section::Html {
                source, document, ..
            } => writeln!(
                f,
                "[embedded HTML document {:?}, {} bytes]",
                source,
                document.len()
            ),
            Section::Notice { text } => writeln!(f, "note: {}", text),
            Section::Warning { text } => writeln!(f, "warning: {}", text),
            Section::Error { text } => writeln!(f, "error: {}", text),
            Section::Divider => writeln!(f, "---"),
        }
    }
}

/// A rendered dashboard page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub page: Page,
    pub title: String,
    pub sections: Vec<Section>,
}

impl PageView {
    pub fn charts(&self) -> impl Iterator<Item = (&str, &Chart)> + '_ {
        self.sections.iter().filter_map(|section| match section {
            Section::Chart { title, chart } => Some((title.as_str(), chart)),
            _ => None,
        })
    }

    pub fn has_errors(&self) -> bool {
        self.sections.iter().any(Section::is_error)
    }
}

impl Display for PageView {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.title)?;
        for section in &self.sections {
            writeln!(f)?;
            write!(f, "{}", section)?;
        }
        Ok(())
    }
}
