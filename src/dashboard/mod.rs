//! Page-based presentation of the trip aggregations.
//!
//! A [`Dashboard`] owns its [`TripStore`], so every page rendered through it
//! shares one load of the trip file.

pub mod config;
mod content;
mod handlers;
pub mod map_artifact;
pub mod page;
pub mod section;

use crate::dashboard::config::DashboardConfig;
use crate::dashboard::map_artifact::MapArtifact;
use crate::dashboard::page::{Page, PageContext};
use crate::dashboard::section::{PageView, Section};
use crate::error::DashboardError;
use crate::trip_data::frame_cache::TripStore;
use log::{debug, info};
use std::path::{Path, PathBuf};
use tokio::fs;

#[cfg(not(feature = "charts"))]
#[derive(serde::Serialize)]
struct ChartExport<'a> {
    title: &'a str,
    chart: &'a section::Chart,
}

pub struct Dashboard {
    config: DashboardConfig,
    store: TripStore,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        Self::with_store(config, TripStore::new())
    }

    /// Uses an existing store, e.g. one shared with other dashboards over the same files.
    pub fn with_store(config: DashboardConfig, store: TripStore) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn store(&self) -> &TripStore {
        &self.store
    }

    /// Renders one page.
    ///
    /// Never fails: a trip load error or a missing map shows up as a section of the
    /// returned page, and does not affect any other page.
    pub async fn render(&self, page: Page) -> PageView {
        debug!("Rendering page '{}'", page.slug());
        let trips = if page.uses_trip_data() {
            Some(self.store.load(&self.config.data_path).await)
        } else {
            None
        };
        let map = if page.uses_map_artifact() {
            Some(MapArtifact::load(&self.config.map_path).await)
        } else {
            None
        };

        let context = PageContext {
            config: &self.config,
            trips: trips.as_ref(),
            map: map.as_ref(),
        };
        let handler = page.handler();
        PageView {
            page,
            title: page.label().to_string(),
            sections: handler(&context),
        }
    }

    /// Renders every page in navigation order.
    pub async fn render_all(&self) -> Vec<PageView> {
        let mut views = Vec::with_capacity(Page::ALL.len());
        for page in Page::ALL {
            views.push(self.render(page).await);
        }
        views
    }
}

/// Writes the exportable parts of a rendered page into `dir`.
///
/// Embedded HTML is written as-is to `<slug>.html`. Each chart becomes
/// `<slug>-<n>.html` when the `charts` feature is enabled, and `<slug>-<n>.json`
/// (the chart data) otherwise. Returns the files written.
pub async fn export_page(view: &PageView, dir: &Path) -> Result<Vec<PathBuf>, DashboardError> {
    fs::create_dir_all(dir)
        .await
        .map_err(|e| DashboardError::Write(dir.to_path_buf(), e))?;

    let slug = view.page.slug();
    let mut written = Vec::new();

    for section in &view.sections {
        if let Section::Html { document, .. } = section {
            let path = dir.join(format!("{}.html", slug));
            fs::write(&path, document)
                .await
                .map_err(|e| DashboardError::Write(path.clone(), e))?;
            written.push(path);
        }
    }

    for (idx, (title, chart)) in view.charts().enumerate() {
        #[cfg(feature = "charts")]
        let path = {
            let path = dir.join(format!("{}-{}.html", slug, idx + 1));
            crate::charts::write_chart_html(title, chart, &path)?;
            path
        };
        #[cfg(not(feature = "charts"))]
        let path = {
            let path = dir.join(format!("{}-{}.json", slug, idx + 1));
            let body = serde_json::to_vec_pretty(&ChartExport { title, chart })?;
            fs::write(&path, body)
                .await
                .map_err(|e| DashboardError::Write(path.clone(), e))?;
            path
        };
        written.push(path);
    }

    info!("Exported {} file(s) for page '{}'", written.len(), slug);
    Ok(written)
}
