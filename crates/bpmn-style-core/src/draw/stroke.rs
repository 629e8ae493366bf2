//! Stroke definitions for outlines, icon glyphs and connectors.
//!
//! BPMN notation distinguishes elements largely by their line treatment: a
//! call activity has a thick border, an event sub-process a dotted one, a
//! group a dash-dot one and a non-interrupting event a dashed ring. This
//! module captures those treatments in [`StrokeDefinition`].
//!
//! Use the [`apply_stroke!`](crate::apply_stroke!) macro to write a stroke
//! onto an SVG element:
//!
//! ```
//! use bpmn_style_core::color::Color;
//! use bpmn_style_core::draw::StrokeDefinition;
//! use svg::node::element as svg_element;
//!
//! let stroke = StrokeDefinition::thick(Color::default());
//! let path = svg_element::Path::new().set("d", "M0,0 L10,0");
//! let path = bpmn_style_core::apply_stroke!(path, &stroke);
//! ```

use crate::color::Color;

/// Width of a regular outline.
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;

/// Width of emphasized outlines (call activities, end events).
pub const THICK_STROKE_WIDTH: f64 = 3.0;

/// Line pattern of a stroke.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    /// 5px dash, 5px gap.
    Dashed,
    /// 2px dot, 3px gap.
    Dotted,
    /// 10px dash, 5px gap, 2px dot, 5px gap.
    DashDot,
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or `None` for solid lines.
    pub fn dash_array(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5"),
            Self::Dotted => Some("2,3"),
            Self::DashDot => Some("10,5,2,5"),
        }
    }
}

/// Complete description of a stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f64,
    style: StrokeStyle,
}

impl StrokeDefinition {
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    /// Regular solid outline.
    pub fn solid(color: Color) -> Self {
        Self::new(color, DEFAULT_STROKE_WIDTH)
    }

    /// Emphasized solid outline.
    pub fn thick(color: Color) -> Self {
        Self::new(color, THICK_STROKE_WIDTH)
    }

    pub fn dashed(color: Color) -> Self {
        Self::solid(color).with_style(StrokeStyle::Dashed)
    }

    pub fn dotted(color: Color) -> Self {
        Self::solid(color).with_style(StrokeStyle::Dotted)
    }

    pub fn dash_dot(color: Color) -> Self {
        Self::solid(color).with_style(StrokeStyle::DashDot)
    }

    fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }
}

/// Applies every stroke attribute of a [`StrokeDefinition`] to an SVG element.
///
/// Sets `stroke`, `stroke-opacity`, `stroke-width` and, for patterned
/// strokes, `stroke-dasharray`.
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let stroke: &$crate::draw::StrokeDefinition = $stroke;
        let mut element = $element
            .set("stroke", stroke.color().to_string())
            .set("stroke-opacity", stroke.color().alpha())
            .set("stroke-width", stroke.width());
        if let Some(dash_array) = stroke.style().dash_array() {
            element = element.set("stroke-dasharray", dash_array);
        }
        element
    }};
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use svg::node::element as svg_element;

    use super::*;

    #[test]
    fn test_presets() {
        let color = Color::default();
        assert_approx_eq!(f64, StrokeDefinition::solid(color).width(), 1.0);
        assert_approx_eq!(f64, StrokeDefinition::thick(color).width(), 3.0);
        assert_eq!(StrokeDefinition::dotted(color).style(), StrokeStyle::Dotted);
        assert_eq!(
            StrokeDefinition::dash_dot(color).style(),
            StrokeStyle::DashDot
        );
    }

    #[test]
    fn test_apply_stroke_sets_dash_array() {
        let stroke = StrokeDefinition::dashed(Color::default());
        let path = crate::apply_stroke!(svg_element::Path::new(), &stroke);
        let rendered = path.to_string();
        assert!(rendered.contains("stroke-dasharray=\"5,5\""));
        assert!(rendered.contains("stroke-width=\"1\""));
    }

    #[test]
    fn test_apply_stroke_solid_has_no_dash_array() {
        let stroke = StrokeDefinition::thick(Color::default());
        let rendered = crate::apply_stroke!(svg_element::Path::new(), &stroke).to_string();
        assert!(!rendered.contains("stroke-dasharray"));
        assert!(rendered.contains("stroke-width=\"3\""));
    }
}
