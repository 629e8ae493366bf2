//! Configuration types for style defaults and gallery rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from
//! TOML. Every field is optional and falls back to the built-in defaults.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining style and gallery settings.
//! - [`StyleConfig`] - Colors and measures new element styles start with.
//! - [`GalleryConfig`] - Grid layout of the element gallery.
//!
//! # Example
//!
//! ```
//! # use bpmn_style::config::AppConfig;
//! let config = AppConfig::default();
//! let defaults = config.style().to_defaults().unwrap();
//! assert_eq!(defaults.marker_size(), 10.0);
//! assert_eq!(config.gallery().columns(), 4);
//! ```

use serde::Deserialize;

use bpmn_style_core::{color::Color, geometry::Insets};

use crate::{error::StyleError, style::StyleDefaults};

const DEFAULT_GALLERY_COLUMNS: usize = 4;
const DEFAULT_GALLERY_SPACING: f64 = 60.0;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Style defaults section.
    #[serde(default)]
    style: StyleConfig,

    /// Gallery layout section.
    #[serde(default)]
    gallery: GalleryConfig,
}

impl AppConfig {
    pub fn new(style: StyleConfig, gallery: GalleryConfig) -> Self {
        Self { style, gallery }
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn gallery(&self) -> &GalleryConfig {
        &self.gallery
    }
}

/// Colors and measures new element styles are created with.
///
/// Colors are CSS color strings. Unset fields keep the built-in value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StyleConfig {
    #[serde(default)]
    background: Option<String>,
    #[serde(default)]
    outline: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    initiating_message: Option<String>,
    #[serde(default)]
    response_message: Option<String>,
    #[serde(default)]
    band_background: Option<String>,
    #[serde(default)]
    pool_header: Option<String>,
    #[serde(default)]
    marker_size: Option<f64>,
    #[serde(default)]
    corner_radius: Option<f64>,
    #[serde(default)]
    insets: Option<f64>,
}

impl StyleConfig {
    /// Resolves the configuration on top of the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::Color`] for an unparsable color and
    /// [`StyleError::InvalidParameter`] for a negative or non-finite measure.
    pub fn to_defaults(&self) -> Result<StyleDefaults, StyleError> {
        let mut defaults = StyleDefaults::default();

        if let Some(color) = parse_color("background", &self.background)? {
            defaults = defaults.with_background(color);
        }
        if let Some(color) = parse_color("outline", &self.outline)? {
            defaults = defaults.with_outline(color);
        }
        if let Some(color) = parse_color("icon", &self.icon)? {
            defaults = defaults.with_icon(color);
        }
        if let Some(color) = parse_color("initiating_message", &self.initiating_message)? {
            defaults = defaults.with_initiating_message(color);
        }
        if let Some(color) = parse_color("response_message", &self.response_message)? {
            defaults = defaults.with_response_message(color);
        }
        if let Some(color) = parse_color("band_background", &self.band_background)? {
            defaults = defaults.with_band_background(color);
        }
        if let Some(color) = parse_color("pool_header", &self.pool_header)? {
            defaults = defaults.with_pool_header(color);
        }

        if let Some(size) = self.marker_size {
            defaults = defaults.with_marker_size(StyleError::check_length("marker_size", size)?);
        }
        if let Some(radius) = self.corner_radius {
            defaults =
                defaults.with_corner_radius(StyleError::check_length("corner_radius", radius)?);
        }
        if let Some(insets) = self.insets {
            let insets = StyleError::check_length("insets", insets)?;
            defaults = defaults.with_insets(Insets::uniform(insets));
        }

        Ok(defaults)
    }
}

fn parse_color(field: &str, value: &Option<String>) -> Result<Option<Color>, StyleError> {
    value
        .as_deref()
        .map(Color::new)
        .transpose()
        .map_err(|err| StyleError::Color(format!("{field}: {err}")))
}

/// Grid layout of the element gallery.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GalleryConfig {
    #[serde(default)]
    columns: Option<usize>,
    #[serde(default)]
    spacing: Option<f64>,
}

impl GalleryConfig {
    pub fn new(columns: Option<usize>, spacing: Option<f64>) -> Self {
        Self { columns, spacing }
    }

    /// Number of gallery columns, at least one.
    pub fn columns(&self) -> usize {
        self.columns.unwrap_or(DEFAULT_GALLERY_COLUMNS).max(1)
    }

    /// Gap between gallery cells.
    pub fn spacing(&self) -> f64 {
        self.spacing
            .filter(|spacing| spacing.is_finite() && *spacing >= 0.0)
            .unwrap_or(DEFAULT_GALLERY_SPACING)
    }

    /// Returns a copy with the column count replaced.
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = Some(columns);
        self
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        let defaults = config.style().to_defaults().unwrap();
        assert_eq!(&defaults, StyleDefaults::shared());
        assert_eq!(config.gallery().columns(), 4);
        assert_approx_eq!(f64, config.gallery().spacing(), 60.0);
    }

    #[test]
    fn test_partial_style_section() {
        let config: AppConfig = toml::from_str(
            r##"
            [style]
            outline = "#336699"
            marker_size = 14.0
            insets = 8.0

            [gallery]
            columns = 3
            "##,
        )
        .unwrap();
        let defaults = config.style().to_defaults().unwrap();
        assert_eq!(defaults.outline(), Color::new("#336699").unwrap());
        assert_approx_eq!(f64, defaults.marker_size(), 14.0);
        assert_eq!(defaults.insets(), Insets::uniform(8.0));
        assert_eq!(defaults.background(), StyleDefaults::shared().background());
        assert_eq!(config.gallery().columns(), 3);
    }

    #[test]
    fn test_invalid_color() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            icon = "not-a-color"
            "#,
        )
        .unwrap();
        let err = config.style().to_defaults().unwrap_err();
        assert!(matches!(err, StyleError::Color(message) if message.starts_with("icon:")));
    }

    #[test]
    fn test_negative_measure() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            corner_radius = -2.0
            "#,
        )
        .unwrap();
        assert_eq!(
            config.style().to_defaults(),
            Err(StyleError::InvalidParameter {
                parameter: "corner_radius",
                value: -2.0
            })
        );
    }

    #[test]
    fn test_gallery_columns_at_least_one() {
        let gallery = GalleryConfig::new(Some(0), Some(-5.0));
        assert_eq!(gallery.columns(), 1);
        assert_approx_eq!(f64, gallery.spacing(), 60.0);
        assert_eq!(gallery.with_columns(6).columns(), 6);
    }
}
