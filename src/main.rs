//! Command-line front end: renders dashboard pages to the terminal or as JSON.

use anyhow::{Context, Result};
use citibike_dashboard::{
    export_page, Dashboard, DashboardConfig, Page, Year, DEFAULT_DATA_PATH, DEFAULT_MAP_PATH,
    DEFAULT_TITLE, DEFAULT_TOP_STATIONS,
};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "citibike-dashboard")]
#[command(about = "Explore bike-share trip data as a page-based dashboard", long_about = None)]
struct Cli {
    /// Trip CSV to analyze
    #[arg(short, long, default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Pre-built trip flow map (HTML) for the map page
    #[arg(short, long, default_value = DEFAULT_MAP_PATH)]
    map: PathBuf,

    /// Page to render, by slug or label. Renders every page when omitted
    #[arg(short, long)]
    page: Option<Page>,

    /// Only count trips from this year in the daily views
    #[arg(short, long)]
    year: Option<i32>,

    /// Number of stations on the popular stations page
    #[arg(short, long, default_value_t = DEFAULT_TOP_STATIONS)]
    top: usize,

    /// Dashboard title
    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,

    /// Print pages as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Also write the map and chart files for each page into this directory
    #[arg(short, long)]
    out_dir: Option<PathBuf>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = DashboardConfig::builder()
        .data_path(cli.data)
        .map_path(cli.map)
        .maybe_year_filter(cli.year.map(Year))
        .top_stations(cli.top)
        .title(cli.title)
        .build();
    info!(
        "Dashboard over {:?} (year filter: {})",
        config.data_path,
        config
            .year_filter
            .map(|year| year.to_string())
            .unwrap_or_else(|| "none".to_string())
    );
    let dashboard = Dashboard::new(config);

    let pages = match cli.page {
        Some(page) => vec![page],
        None => Page::ALL.to_vec(),
    };

    let mut views = Vec::with_capacity(pages.len());
    for page in pages {
        views.push(dashboard.render(page).await);
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&views).context("Failed to serialize pages")?;
        println!("{}", json);
    } else {
        for view in &views {
            println!("{}", view);
        }
    }

    if let Some(dir) = cli.out_dir {
        for view in &views {
            let files = export_page(view, &dir)
                .await
                .with_context(|| format!("Failed to export page '{}'", view.page.slug()))?;
            for file in files {
                info!("Wrote {}", file.display());
            }
        }
    }

    Ok(())
}
