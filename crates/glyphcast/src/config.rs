//! Typesetter configuration

use std::path::Path;

use glyphcast_layout::LayoutRequest;
use glyphcast_render::CacheOptions;
use serde::{Deserialize, Serialize};
use tiny_skia::Color;

use crate::{Error, Result};

/// Cached rasters are kept at this many pixels per device pixel when the
/// resolution is derived from the font size
const CACHE_OVERSAMPLE: f32 = 2.0;

/// Layout and rendering options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Font size in CSS pixels
    pub font_size: f32,

    /// Container width in CSS pixels, used when `wrap` is set
    pub container_width: f32,

    /// Wrap lines at `container_width`
    pub wrap: bool,

    /// Device pixels per CSS pixel
    pub pixel_ratio: f32,

    /// Glyph cache pixels per font unit; derived from the font size if unset
    pub cache_resolution: Option<f32>,

    /// Glyph color: `#rgb`, `#rrggbb` or `#rrggbbaa`
    pub color: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font_size: 20.0,
            container_width: 800.0,
            wrap: true,
            pixel_ratio: 1.0,
            cache_resolution: None,
            color: "#000000".to_string(),
        }
    }
}

impl Config {
    /// Parse TOML; missing keys keep their defaults
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
        parse_color(&config.color)?;
        Ok(config)
    }

    /// Load a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Layout request for these options
    pub fn request(&self) -> LayoutRequest {
        let request = if self.wrap {
            LayoutRequest::new(self.font_size, self.container_width)
        } else {
            LayoutRequest::unbounded(self.font_size)
        };
        request.with_pixel_ratio(self.pixel_ratio)
    }

    /// Glyph cache options for a font with `units_per_em`
    pub fn cache_options(&self, units_per_em: u16) -> Result<CacheOptions> {
        let color = parse_color(&self.color)?;
        let mut options = match self.cache_resolution {
            Some(resolution) => CacheOptions {
                resolution,
                ..CacheOptions::default()
            },
            None => CacheOptions::for_size(
                units_per_em,
                self.font_size * self.pixel_ratio,
                CACHE_OVERSAMPLE,
            ),
        };
        options.color = color;
        Ok(options)
    }
}

/// Parse a hex color
pub fn parse_color(s: &str) -> Result<Color> {
    let invalid = || Error::Config(format!("invalid color {s:?}"));
    let hex = s.strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map_err(|_| invalid());
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());

    let (r, g, b, a) = match hex.len() {
        3 => (digit(0)? * 17, digit(1)? * 17, digit(2)? * 17, 255),
        6 => (byte(0)?, byte(2)?, byte(4)?, 255),
        8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
        _ => return Err(invalid()),
    };
    Ok(Color::from_rgba8(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphcast_layout::ContainerWidth;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        let request = config.request();
        assert_eq!(request.font_size, 20.0);
        assert_eq!(request.width, ContainerWidth::Bounded(800.0));
        assert_eq!(request.pixel_ratio, 1.0);
    }

    #[test]
    fn test_partial_toml() {
        let config = Config::from_toml_str("font_size = 32.0\nwrap = false\n").unwrap();
        assert_eq!(config.font_size, 32.0);
        assert_eq!(config.pixel_ratio, 1.0);
        assert_eq!(config.request().width, ContainerWidth::Unbounded);
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            Config::from_toml_str("font_size = \"big\""),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("color = \"red\""),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#fff").unwrap(), Color::WHITE);
        assert_eq!(parse_color("#000000").unwrap(), Color::BLACK);
        assert_eq!(
            parse_color("#ff000080").unwrap(),
            Color::from_rgba8(255, 0, 0, 128)
        );
        assert!(parse_color("000000").is_err());
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#ggg").is_err());
        assert!(parse_color("#ééé").is_err());
    }

    #[test]
    fn test_cache_options() {
        let config = Config {
            cache_resolution: Some(0.25),
            color: "#00f".to_string(),
            ..Config::default()
        };
        let options = config.cache_options(1000).unwrap();
        assert_eq!(options.resolution, 0.25);
        assert_eq!(options.color, Color::from_rgba8(0, 0, 255, 255));

        // 20px at 2x oversampling over 1000 units per em
        let derived = Config::default().cache_options(1000).unwrap();
        assert!((derived.resolution - 0.04).abs() < 1e-6);
    }
}
