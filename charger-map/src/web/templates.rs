//! Askama templates for the web frontend.

use askama::Template;

/// Initial camera for the map page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialView {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
}

impl Default for InitialView {
    /// Continental United States.
    fn default() -> Self {
        Self {
            longitude: -100.0,
            latitude: 40.0,
            zoom: 3.5,
        }
    }
}

/// How often the map page checks for a new publication.
pub const POLL_INTERVAL_MS: u64 = 30_000;

/// Full-screen map page.
///
/// The page polls `status_url` and refetches `sites_url` whenever the
/// publication count changes, so it picks up the first publication after
/// startup and every periodic refresh after that.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: InitialView,
    pub sites_url: &'static str,
    pub style_url: &'static str,
    pub status_url: &'static str,
    pub poll_interval_ms: u64,
}
