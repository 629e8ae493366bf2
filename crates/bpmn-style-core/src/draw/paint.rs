//! Fill and stroke of a leaf icon.

use crate::{color::Color, draw::StrokeDefinition};

/// How a leaf icon's path is painted: an optional fill beneath an optional stroke.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paint {
    fill: Option<Color>,
    stroke: Option<StrokeDefinition>,
}

impl Paint {
    pub fn new(fill: Option<Color>, stroke: Option<StrokeDefinition>) -> Self {
        Self { fill, stroke }
    }

    /// Fill only.
    pub fn filled(color: Color) -> Self {
        Self::new(Some(color), None)
    }

    /// Stroke only.
    pub fn stroked(stroke: StrokeDefinition) -> Self {
        Self::new(None, Some(stroke))
    }

    /// Fill with a stroke on top.
    pub fn filled_and_stroked(fill: Color, stroke: StrokeDefinition) -> Self {
        Self::new(Some(fill), Some(stroke))
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn stroke(&self) -> Option<&StrokeDefinition> {
        self.stroke.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let stroke = StrokeDefinition::solid(Color::default());
        assert_eq!(Paint::default().fill(), None);
        assert!(Paint::default().stroke().is_none());
        let red = Color::from_static("red");
        assert_eq!(Paint::filled(red).fill(), Some(red));
        assert_eq!(Paint::stroked(stroke.clone()).stroke(), Some(&stroke));
        assert!(Paint::stroked(stroke).fill().is_none());
    }
}
