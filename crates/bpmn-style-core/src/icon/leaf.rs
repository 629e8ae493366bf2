//! Leaf icons: a shape and the paint it is drawn with.

use kurbo::BezPath;

use crate::{
    draw::Paint,
    geometry::{Bounds, Point, Side},
    path::{self, CornerRadii, UnitPath},
};

/// Geometry of a leaf icon, resolved against the bounds it is arranged in.
#[derive(Debug, Clone, PartialEq)]
pub enum LeafShape {
    /// A shared unit-square template.
    Glyph(&'static UnitPath),
    Rectangle,
    RoundedRectangle(CornerRadii),
    Ellipse,
    Diamond,
    Hexagon,
    DataObject { fold: f64 },
    DataObjectFold { fold: f64 },
    DataStore,
    DataStoreLip,
    Bracket { side: Side, arm: f64 },
    /// A straight line between two points given as fractions of the bounds.
    Segment { from: (f64, f64), to: (f64, f64) },
}

impl LeafShape {
    /// Builds the path of this shape within `bounds`.
    pub fn path(&self, bounds: Bounds) -> BezPath {
        match self {
            Self::Glyph(glyph) => glyph.to_path(bounds),
            Self::Rectangle => path::rectangle(bounds),
            Self::RoundedRectangle(radii) => path::rounded_rectangle_corners(bounds, *radii),
            Self::Ellipse => path::ellipse(bounds),
            Self::Diamond => path::diamond(bounds),
            Self::Hexagon => path::hexagon(bounds),
            Self::DataObject { fold } => path::data_object(bounds, *fold),
            Self::DataObjectFold { fold } => path::data_object_fold(bounds, *fold),
            Self::DataStore => path::data_store(bounds),
            Self::DataStoreLip => path::data_store_lip(bounds),
            Self::Bracket { side, arm } => path::bracket(bounds, *side, *arm),
            Self::Segment { from, to } => {
                let transform = path::unit_transform(bounds);
                let from = transform * kurbo::Point::new(from.0, from.1);
                let to = transform * kurbo::Point::new(to.0, to.1);
                path::segment(Point::from(from), Point::from(to))
            }
        }
    }
}

/// An individually sizable drawable.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafIcon {
    shape: LeafShape,
    paint: Paint,
}

impl LeafIcon {
    pub fn new(shape: LeafShape, paint: Paint) -> Self {
        Self { shape, paint }
    }

    pub fn shape(&self) -> &LeafShape {
        &self.shape
    }

    pub fn paint(&self) -> &Paint {
        &self.paint
    }

    /// Builds the path of this leaf within `bounds`.
    pub fn path(&self, bounds: Bounds) -> BezPath {
        self.shape.path(bounds)
    }

    /// Returns `true` if this leaf draws exactly the given shared glyph.
    pub fn is_glyph(&self, glyph: &UnitPath) -> bool {
        matches!(self.shape, LeafShape::Glyph(template) if std::ptr::eq(template, glyph))
    }
}

#[cfg(test)]
mod tests {
    use crate::{color::Color, draw::StrokeDefinition, icon::glyph};

    use super::*;

    #[test]
    fn test_glyph_identity() {
        let leaf = LeafIcon::new(
            LeafShape::Glyph(&glyph::TILDE),
            Paint::stroked(StrokeDefinition::solid(Color::default())),
        );
        assert!(leaf.is_glyph(&glyph::TILDE));
        assert!(!leaf.is_glyph(&glyph::LOOP));
    }

    #[test]
    fn test_segment_uses_relative_end_points() {
        let shape = LeafShape::Segment {
            from: (0.5, 0.0),
            to: (0.5, 1.0),
        };
        let path = shape.path(Bounds::from_xywh(10.0, 0.0, 20.0, 40.0));
        let points: Vec<_> = path
            .elements()
            .iter()
            .filter_map(|element| element.end_point())
            .collect();
        assert_eq!(
            points,
            vec![kurbo::Point::new(20.0, 0.0), kurbo::Point::new(20.0, 40.0)]
        );
    }

    #[test]
    fn test_every_shape_handles_zero_bounds() {
        let shapes = [
            LeafShape::Glyph(&glyph::GEAR),
            LeafShape::Rectangle,
            LeafShape::RoundedRectangle(CornerRadii::uniform(10.0)),
            LeafShape::Ellipse,
            LeafShape::Diamond,
            LeafShape::Hexagon,
            LeafShape::DataObject { fold: 10.0 },
            LeafShape::DataObjectFold { fold: 10.0 },
            LeafShape::DataStore,
            LeafShape::DataStoreLip,
            LeafShape::Bracket {
                side: Side::West,
                arm: 8.0,
            },
            LeafShape::Segment {
                from: (0.0, 0.0),
                to: (1.0, 1.0),
            },
        ];
        for shape in &shapes {
            assert!(path::is_finite(&shape.path(Bounds::default())));
        }
    }
}
