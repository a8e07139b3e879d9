//! # DashboardService
//!
//! Presentation shell for the league projection dashboard.
//!
//! Loads the projection feed, runs the standings engine for the selected
//! league and assembles the headline cards, the divergence chart model and
//! the detailed projection table. Views are printed as text or exported as
//! JSON for an external plot renderer.

pub mod assets;
pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod view;

// Re-export main types for easy usage
pub use assets::{logo_zoom, LogoAsset, LogoResolver};
pub use chart::{DivergenceChart, Emphasis};
pub use config::DashboardConfig;
pub use error::{DashboardError, Result};
pub use report::{HeadlineCards, ProjectionTable};
pub use view::DashboardView;

/// Initialize tracing for the dashboard binary
///
/// `RUST_LOG` controls the filter (default `info`); `DASHBOARD_LOG_FORMAT=json`
/// switches to JSON lines.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = std::env::var("DASHBOARD_LOG_FORMAT").map(|f| f == "json").unwrap_or(false);

    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).with_writer(std::io::stderr).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    }
}
