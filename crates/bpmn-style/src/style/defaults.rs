//! Shared default colors and measures.
//!
//! Every style copies its initial values from a [`StyleDefaults`]. The
//! built-in instance is a process-wide constant; configured instances come
//! from [`StyleConfig`](crate::config::StyleConfig).

use std::sync::LazyLock;

use bpmn_style_core::{color::Color, geometry::Insets};

/// Default corner radius of activities and choreographies.
pub const DEFAULT_CORNER_RADIUS: f64 = 10.0;
/// Default marker cell size.
pub const DEFAULT_MARKER_SIZE: f64 = 10.0;
/// Default base insets on every side.
pub const DEFAULT_INSETS: f64 = 5.0;

static BUILT_IN: LazyLock<StyleDefaults> = LazyLock::new(StyleDefaults::built_in);

/// Initial colors and measures of new styles.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleDefaults {
    background: Color,
    outline: Color,
    icon: Color,
    initiating_message: Color,
    response_message: Color,
    band_background: Color,
    pool_header: Color,
    marker_size: f64,
    corner_radius: f64,
    insets: Insets,
}

impl StyleDefaults {
    fn built_in() -> Self {
        Self {
            background: Color::from_static("#ffffff"),
            outline: Color::from_static("#000000"),
            icon: Color::from_static("#000000"),
            initiating_message: Color::from_static("#ffffff"),
            response_message: Color::from_static("#d3d3d3"),
            band_background: Color::from_static("#e6e6e6"),
            pool_header: Color::from_static("#f0f0f0"),
            marker_size: DEFAULT_MARKER_SIZE,
            corner_radius: DEFAULT_CORNER_RADIUS,
            insets: Insets::uniform(DEFAULT_INSETS),
        }
    }

    /// The built-in defaults, shared by every style created without explicit
    /// defaults.
    pub fn shared() -> &'static StyleDefaults {
        &BUILT_IN
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn outline(&self) -> Color {
        self.outline
    }

    pub fn icon(&self) -> Color {
        self.icon
    }

    pub fn initiating_message(&self) -> Color {
        self.initiating_message
    }

    pub fn response_message(&self) -> Color {
        self.response_message
    }

    pub fn band_background(&self) -> Color {
        self.band_background
    }

    pub fn pool_header(&self) -> Color {
        self.pool_header
    }

    pub fn marker_size(&self) -> f64 {
        self.marker_size
    }

    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    pub fn insets(&self) -> Insets {
        self.insets
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn with_outline(mut self, color: Color) -> Self {
        self.outline = color;
        self
    }

    pub fn with_icon(mut self, color: Color) -> Self {
        self.icon = color;
        self
    }

    pub fn with_initiating_message(mut self, color: Color) -> Self {
        self.initiating_message = color;
        self
    }

    pub fn with_response_message(mut self, color: Color) -> Self {
        self.response_message = color;
        self
    }

    pub fn with_band_background(mut self, color: Color) -> Self {
        self.band_background = color;
        self
    }

    pub fn with_pool_header(mut self, color: Color) -> Self {
        self.pool_header = color;
        self
    }

    pub fn with_marker_size(mut self, size: f64) -> Self {
        self.marker_size = size;
        self
    }

    pub fn with_corner_radius(mut self, radius: f64) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }
}

impl Default for StyleDefaults {
    fn default() -> Self {
        BUILT_IN.clone()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_built_in_values() {
        let defaults = StyleDefaults::shared();
        assert_eq!(defaults.background(), Color::new("#ffffff").unwrap());
        assert_approx_eq!(f64, defaults.marker_size(), 10.0);
        assert_approx_eq!(f64, defaults.corner_radius(), 10.0);
        assert_eq!(defaults.insets(), Insets::uniform(5.0));
    }

    #[test]
    fn test_default_matches_shared() {
        assert_eq!(&StyleDefaults::default(), StyleDefaults::shared());
    }

    #[test]
    fn test_builders() {
        let defaults = StyleDefaults::default()
            .with_marker_size(14.0)
            .with_outline(Color::new("navy").unwrap());
        assert_approx_eq!(f64, defaults.marker_size(), 14.0);
        assert_eq!(defaults.outline(), Color::new("navy").unwrap());
    }
}
