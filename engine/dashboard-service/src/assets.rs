//! # Team Logos
//!
//! Resolves team names to logo images and computes their on-chart zoom.
//! A missing or unreadable logo is never an error; the chart is drawn
//! without it.

use crate::config::AssetConfig;
use image::RgbaImage;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// A decoded team logo
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogoAsset {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Larger side of the non-transparent bounding box, in pixels
    pub content_extent: u32,
}

/// Zoom that renders `content_px` pixels at roughly `target_px`, clamped to
/// `[min_zoom, max_zoom]`
///
/// Zero-size content falls back to `fallback_zoom` before clamping.
pub fn logo_zoom(
    target_px: f64,
    content_px: u32,
    min_zoom: f64,
    max_zoom: f64,
    fallback_zoom: f64,
) -> f64 {
    let zoom = if content_px > 0 { target_px / f64::from(content_px) } else { fallback_zoom };
    zoom.max(min_zoom).min(max_zoom)
}

/// Larger side of the bounding box of pixels with non-zero alpha
///
/// Fully transparent images report their full size.
pub fn content_extent(image: &RgbaImage) -> u32 {
    let (width, height) = image.dimensions();
    let mut bounds: Option<(u32, u32, u32, u32)> = None;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((min_x, min_y, max_x, max_y)) => {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            }
        });
    }

    match bounds {
        Some((min_x, min_y, max_x, max_y)) => (max_x - min_x + 1).max(max_y - min_y + 1),
        None => width.max(height),
    }
}

/// Looks up `<logo_dir>/<team>.png`
#[derive(Debug, Clone)]
pub struct LogoResolver {
    config: AssetConfig,
}

impl LogoResolver {
    pub fn new(config: AssetConfig) -> Self {
        Self { config }
    }

    /// Load a team's logo, or `None` if it is absent or cannot be decoded
    pub fn resolve(&self, team: &str) -> Option<LogoAsset> {
        if !is_plain_file_stem(team) {
            warn!("Ignoring logo lookup for unsafe team name '{}'", team);
            return None;
        }

        let path = self.config.logo_dir.join(format!("{team}.png"));
        if !path.is_file() {
            debug!("No logo for '{}' at {:?}", team, path);
            return None;
        }

        let decoded = match image::open(&path) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!("Ignoring unreadable logo {:?}: {}", path, e);
                return None;
            }
        };

        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Some(LogoAsset { content_extent: content_extent(&rgba), path, width, height })
    }

    /// On-chart zoom for a resolved logo
    pub fn zoom_for(&self, asset: &LogoAsset) -> f64 {
        logo_zoom(
            self.config.target_size_px,
            asset.content_extent,
            self.config.min_zoom,
            self.config.max_zoom,
            self.config.fallback_zoom,
        )
    }
}

/// A team name that names exactly one file inside the logo directory
fn is_plain_file_stem(team: &str) -> bool {
    if team.contains(|c: char| c == '/' || c == '\\') {
        return false;
    }
    let mut components = Path::new(team).components();
    matches!((components.next(), components.next()), (Some(Component::Normal(_)), None))
}
