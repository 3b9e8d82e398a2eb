//! Application configuration.

use imgmark_core::{ShapeStyle, StrokeColor};
use peniko::Color;
use peniko::color::{Srgb, parse_color};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid stroke color {value:?}: {reason}")]
    InvalidColor { value: String, reason: String },
    #[error("{name} must be a positive number of pixels, got {value}")]
    InvalidSize { name: &'static str, value: f64 },
}

/// Application configuration.
///
/// Every field is optional in the JSON file; missing ones fall back to
/// [`AppConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix of every window title.
    pub title: String,
    pub width: f32,
    pub height: f32,
    /// CSS color string, e.g. `"#00ff00"` or `"lime"`.
    pub stroke_color: String,
    pub stroke_width: f64,
    /// Radius of the first-point marker of the line tool.
    pub marker_radius: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "imgmark".to_string(),
            width: 1280.0,
            height: 800.0,
            stroke_color: "#00ff00".to_string(),
            stroke_width: ShapeStyle::DEFAULT_STROKE_WIDTH,
            marker_radius: ShapeStyle::DEFAULT_MARKER_RADIUS,
        }
    }
}

impl AppConfig {
    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Window title for a window showing `what`.
    pub fn window_title(&self, what: impl std::fmt::Display) -> String {
        format!("{} - {}", self.title, what)
    }

    /// The style every drawing session uses.
    pub fn shape_style(&self) -> Result<ShapeStyle, ConfigError> {
        check_size("stroke_width", self.stroke_width)?;
        check_size("marker_radius", self.marker_radius)?;

        let mut style = ShapeStyle {
            stroke_width: self.stroke_width,
            marker_radius: self.marker_radius,
            ..ShapeStyle::default()
        };
        style.set_stroke(parse_stroke_color(&self.stroke_color)?);
        Ok(style)
    }
}

fn check_size(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSize { name, value })
    }
}

/// Parse a CSS color string. Translucent colors are made opaque.
fn parse_stroke_color(value: &str) -> Result<Color, ConfigError> {
    let color = parse_color(value.trim())
        .map_err(|err| ConfigError::InvalidColor {
            value: value.to_string(),
            reason: err.to_string(),
        })?
        .to_alpha_color::<Srgb>();

    let stroke = StrokeColor::from(color);
    if stroke.a != u8::MAX {
        log::warn!("Stroke color {value:?} is translucent, drawing it opaque");
    }
    Ok(StrokeColor { a: u8::MAX, ..stroke }.into())
}
