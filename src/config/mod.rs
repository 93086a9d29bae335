use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::PanBounds;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("pinch_sensitivity must be positive, got {0}")]
    PinchSensitivity(f64),
    #[error("pan bounds must be non-negative, got {horizontal}x{vertical}")]
    PanBounds { horizontal: f64, vertical: f64 },
    #[error("axis_threshold must be non-negative, got {0}")]
    AxisThreshold(f64),
    #[error("filmstrip item_size must be positive, got {0}")]
    FilmstripItemSize(f64),
}

const APP_DIR: &str = "lightbox";
const APP_CONFIG_FILE: &str = "config.json";

const DEFAULT_PINCH_SENSITIVITY: f64 = 50.0;
const DEFAULT_AXIS_THRESHOLD: f64 = 10.0;
const DEFAULT_DEMO_CATALOG_SIZE: usize = 50;

/// Thresholds that drive gesture interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Pinch travel (px) per unit of zoom scale.
    pub pinch_sensitivity: f64,
    pub pan_bounds: PanBounds,
    /// Minimum displacement (px) on the dominant axis before a drag commits.
    pub axis_threshold: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            pinch_sensitivity: DEFAULT_PINCH_SENSITIVITY,
            pan_bounds: PanBounds::default(),
            axis_threshold: DEFAULT_AXIS_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilmstripConfig {
    pub item_size: f64,
    pub height: f64,
    /// Strip width as a fraction of the client width.
    pub width_ratio: f64,
}

impl Default for FilmstripConfig {
    fn default() -> Self {
        Self {
            item_size: 100.0,
            height: 75.0,
            width_ratio: 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub min_tile_width: f64,
    pub gap: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            min_tile_width: 250.0,
            gap: 16.0,
        }
    }
}

/// Viewer settings from `config.json`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    #[serde(flatten)]
    pub gesture: GestureConfig,
    pub filmstrip: FilmstripConfig,
    pub grid: GridConfig,
    pub demo_catalog_size: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            gesture: GestureConfig::default(),
            filmstrip: FilmstripConfig::default(),
            grid: GridConfig::default(),
            demo_catalog_size: DEFAULT_DEMO_CATALOG_SIZE,
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let gesture = &self.gesture;
        if !(gesture.pinch_sensitivity.is_finite() && gesture.pinch_sensitivity > 0.0) {
            return Err(ConfigError::PinchSensitivity(gesture.pinch_sensitivity));
        }
        let bounds = gesture.pan_bounds;
        if !(bounds.horizontal >= 0.0 && bounds.vertical >= 0.0) {
            return Err(ConfigError::PanBounds {
                horizontal: bounds.horizontal,
                vertical: bounds.vertical,
            });
        }
        if !(gesture.axis_threshold >= 0.0) {
            return Err(ConfigError::AxisThreshold(gesture.axis_threshold));
        }
        if !(self.filmstrip.item_size > 0.0) {
            return Err(ConfigError::FilmstripItemSize(self.filmstrip.item_size));
        }
        Ok(())
    }
}

pub fn load_viewer_config() -> ViewerConfig {
    let (xdg_config_home, home) = config_env_dirs();
    match app_config_path(
        APP_DIR,
        APP_CONFIG_FILE,
        xdg_config_home.as_deref(),
        home.as_deref(),
    ) {
        Ok(path) => load_viewer_config_from(&path),
        Err(_) => ViewerConfig::default(),
    }
}

pub fn load_viewer_config_from(path: &Path) -> ViewerConfig {
    if !path.exists() {
        return ViewerConfig::default();
    }
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_viewer_config(&contents).unwrap_or_else(|| {
            tracing::warn!(?path, "invalid config.json; using defaults");
            ViewerConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            ViewerConfig::default()
        }
    }
}

fn parse_viewer_config(contents: &str) -> Option<ViewerConfig> {
    let config: ViewerConfig = match serde_json::from_str(contents) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(?err, "failed to parse config.json");
            return None;
        }
    };
    if let Err(err) = config.validate() {
        tracing::warn!(%err, "rejected config.json values");
        return None;
    }
    Some(config)
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(
            "lightbox",
            "config.json",
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/config-root/lightbox/config.json"));
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path(
            "lightbox",
            "config.json",
            Some(Path::new("")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/home/.config/lightbox/config.json"));
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path("lightbox", "config.json", None, None).unwrap_err();
        assert_eq!(error, ConfigPathError::MissingHomeDirectory);
    }

    #[test]
    fn parse_viewer_config_fills_missing_fields_with_defaults() {
        let config = parse_viewer_config(
            r#"{ "pinch_sensitivity": 80.0, "filmstrip": { "height": 90.0 } }"#,
        )
        .expect("partial config should parse");

        assert_eq!(config.gesture.pinch_sensitivity, 80.0);
        assert_eq!(config.gesture.pan_bounds, PanBounds::new(100.0, 50.0));
        assert_eq!(config.gesture.axis_threshold, 10.0);
        assert_eq!(config.filmstrip.height, 90.0);
        assert_eq!(config.filmstrip.item_size, 100.0);
        assert_eq!(config.demo_catalog_size, 50);
    }

    #[test]
    fn parse_viewer_config_rejects_invalid_values() {
        assert!(parse_viewer_config(r#"{ "pinch_sensitivity": 0.0 }"#).is_none());
        assert!(parse_viewer_config(
            r#"{ "pan_bounds": { "horizontal": -1.0, "vertical": 5.0 } }"#
        )
        .is_none());
        assert!(parse_viewer_config("not json").is_none());
    }

    #[test]
    fn load_viewer_config_from_missing_file_uses_defaults() {
        let config = load_viewer_config_from(Path::new("/nonexistent/lightbox/config.json"));
        assert_eq!(config, ViewerConfig::default());
    }
}
