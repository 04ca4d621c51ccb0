use dotenvy::dotenv;
use std::env;

use gamemap_types::geometry::ZoomRange;

/// Ratio of each image dimension added around the map as pannable space.
pub const MAP_PADDING_RATIO: f64 = 0.5;

/// Notes longer than this are truncated in sidebar rows.
pub const NOTE_EXCERPT_LEN: usize = 50;

#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub port: u16,
    pub zoom_range: ZoomRange,
    pub sidebar_zoom: i8,
    pub assets_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let backend_url = match env::var("GAMEMAP_BACKEND_URL") {
            Ok(val) => val.trim_end_matches('/').to_string(),
            Err(_) => "http://127.0.0.1:5000".to_string(),
        };

        let port = match env::var("GAMEMAP_PORT") {
            Ok(val) => val.parse::<u16>().unwrap_or(8080),
            Err(_) => 8080,
        };

        let zoom_range = ZoomRange::DEFAULT;

        let sidebar_zoom = match env::var("GAMEMAP_SIDEBAR_ZOOM") {
            Ok(val) => zoom_range.clamp(val.parse::<i8>().unwrap_or(1)),
            Err(_) => 1,
        };

        let assets_dir = match env::var("GAMEMAP_ASSETS_DIR") {
            Ok(val) => val,
            Err(_) => "gamemap_web/assets".to_string(),
        };

        Self {
            backend_url,
            port,
            zoom_range,
            sidebar_zoom,
            assets_dir,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://127.0.0.1:5000".to_string(),
            port: 8080,
            zoom_range: ZoomRange::DEFAULT,
            sidebar_zoom: 1,
            assets_dir: "gamemap_web/assets".to_string(),
        }
    }
}
