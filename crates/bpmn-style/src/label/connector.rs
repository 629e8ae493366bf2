//! Labels that float next to their owner and connect back to it.

use kurbo::BezPath;
use log::debug;

use bpmn_style_core::{
    color::Color,
    draw::{RenderLayer, StrokeDefinition},
    geometry::{Bounds, Insets, Point, Side, Size},
    icon::{Extent, Icon, IconRef, Placement},
    path,
};

use crate::style::{AnnotationSide, IconSlot, StyleDefaults, icon_factory};

/// Size of the envelope drawn in front of message label text.
const ENVELOPE_SIZE: Size = Size::new(20.0, 14.0);
/// Gap between the envelope and the text of a message label.
const ENVELOPE_GAP: f64 = 5.0;

/// What a connector-anchored label decorates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectorLabelKind {
    /// A text annotation: bracket toward the owner, dotted association.
    Annotation,
    /// A message: envelope before the text, dashed connector.
    Message,
}

/// Style of a label that sits beside its owner and is joined to it by a
/// connector.
///
/// The side the label occupies is not stored. It is derived from the
/// label's current center on every query: annotations are left or right of
/// their owner, messages north or south of it.
#[derive(Debug, Clone)]
pub struct ConnectorLabelStyle {
    kind: ConnectorLabelKind,
    background: Color,
    outline: Color,
    message_fill: Color,
    insets: Insets,
    mod_count: u64,

    /// One cached icon per side, indexed by [`side_index`].
    icons: [IconSlot; 4],
}

fn side_index(side: Side) -> usize {
    match side {
        Side::North => 0,
        Side::East => 1,
        Side::South => 2,
        Side::West => 3,
    }
}

impl ConnectorLabelStyle {
    pub fn new(kind: ConnectorLabelKind) -> Self {
        Self::with_defaults(kind, StyleDefaults::shared())
    }

    pub fn with_defaults(kind: ConnectorLabelKind, defaults: &StyleDefaults) -> Self {
        Self {
            kind,
            background: defaults.background(),
            outline: defaults.outline(),
            message_fill: defaults.initiating_message(),
            insets: defaults.insets(),
            mod_count: 0,
            icons: Default::default(),
        }
    }

    pub fn kind(&self) -> ConnectorLabelKind {
        self.kind
    }

    pub fn mod_count(&self) -> u64 {
        self.mod_count
    }

    fn invalidate(&mut self) {
        self.mod_count += 1;
        for slot in &self.icons {
            slot.invalidate();
        }
    }

    pub fn set_background(&mut self, color: Color) {
        if self.background != color {
            self.background = color;
            self.invalidate();
        }
    }

    pub fn set_outline(&mut self, color: Color) {
        if self.outline != color {
            self.outline = color;
            self.invalidate();
        }
    }

    pub fn set_message_fill(&mut self, color: Color) {
        if self.message_fill != color {
            self.message_fill = color;
            self.invalidate();
        }
    }

    /// The side of `owner` the label currently occupies.
    pub fn side(&self, label: Bounds, owner: Bounds) -> Side {
        let label = label.center();
        let owner = owner.center();
        match self.kind {
            ConnectorLabelKind::Annotation if label.x() < owner.x() => Side::West,
            ConnectorLabelKind::Annotation => Side::East,
            ConnectorLabelKind::Message if label.y() < owner.y() => Side::North,
            ConnectorLabelKind::Message => Side::South,
        }
    }

    /// Bracket side of an annotation label: the edge facing its owner.
    pub fn annotation_side(&self, label: Bounds, owner: Bounds) -> AnnotationSide {
        match self.side(label, owner) {
            Side::West => AnnotationSide::Right,
            _ => AnnotationSide::Left,
        }
    }

    /// Decoration drawn behind the label text.
    pub fn icon(&self, label: Bounds, owner: Bounds) -> IconRef {
        let side = self.side(label, owner);
        self.icons[side_index(side)].get_or_build(|| {
            debug!(kind:? = self.kind, side:?; "Building connector label icon");
            match self.kind {
                ConnectorLabelKind::Annotation => icon_factory::annotation_shape(
                    self.annotation_side(label, owner),
                    self.background,
                    self.outline,
                ),
                ConnectorLabelKind::Message => Icon::placed(
                    icon_factory::message_shape(self.message_fill, self.outline),
                    Placement::new(
                        (0.0, 0.5),
                        (0.0, 0.5),
                        Extent::Fixed(ENVELOPE_SIZE.width()),
                        Extent::Fixed(ENVELOPE_SIZE.height()),
                    ),
                ),
            }
        })
    }

    /// The part of the label left for text.
    pub fn text_bounds(&self, label: Bounds) -> Bounds {
        match self.kind {
            ConnectorLabelKind::Annotation => label.inset_by(self.insets),
            ConnectorLabelKind::Message => {
                label.inset_by(Insets::default().with_left(ENVELOPE_SIZE.width() + ENVELOPE_GAP))
            }
        }
    }

    /// Endpoints of the connector: the middle of the label edge facing the
    /// owner, and the middle of the owner edge facing the label.
    pub fn connector_points(&self, label: Bounds, owner: Bounds) -> (Point, Point) {
        let side = self.side(label, owner);
        (edge_middle(label, side.opposite()), edge_middle(owner, side))
    }

    pub fn connector(&self, label: Bounds, owner: Bounds) -> BezPath {
        let (from, to) = self.connector_points(label, owner);
        path::segment(from, to)
    }

    pub fn connector_stroke(&self) -> StrokeDefinition {
        match self.kind {
            ConnectorLabelKind::Annotation => StrokeDefinition::dotted(self.outline),
            ConnectorLabelKind::Message => StrokeDefinition::dashed(self.outline),
        }
    }

    pub fn layer(&self) -> RenderLayer {
        RenderLayer::Label
    }
}

/// Middle of the given edge of `bounds`.
fn edge_middle(bounds: Bounds, side: Side) -> Point {
    let center = bounds.center();
    match side {
        Side::North => center.with_y(bounds.min_y()),
        Side::South => center.with_y(bounds.max_y()),
        Side::West => center.with_x(bounds.min_x()),
        Side::East => center.with_x(bounds.max_x()),
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use bpmn_style_core::{draw::StrokeStyle, icon::LeafShape};

    use super::*;

    fn owner() -> Bounds {
        Bounds::from_xywh(100.0, 100.0, 100.0, 60.0)
    }

    #[test]
    fn test_annotation_side_follows_center() {
        let style = ConnectorLabelStyle::new(ConnectorLabelKind::Annotation);
        let left = Bounds::from_xywh(0.0, 100.0, 60.0, 40.0);
        let right = Bounds::from_xywh(250.0, 100.0, 60.0, 40.0);
        assert_eq!(style.side(left, owner()), Side::West);
        assert_eq!(style.side(right, owner()), Side::East);
        assert_eq!(style.annotation_side(left, owner()), AnnotationSide::Right);

        let (from, to) = style.connector_points(left, owner());
        assert_eq!(from, Point::new(60.0, 120.0));
        assert_eq!(to, Point::new(100.0, 130.0));
    }

    #[test]
    fn test_bracket_faces_owner() {
        let style = ConnectorLabelStyle::new(ConnectorLabelKind::Annotation);
        let left = Bounds::from_xywh(0.0, 100.0, 60.0, 40.0);
        let icon = style.icon(left, owner());
        let leaves = icon.arranged_leaves(left);
        assert!(leaves.iter().any(|(leaf, _)| matches!(
            leaf.shape(),
            LeafShape::Bracket {
                side: Side::East,
                ..
            }
        )));
    }

    #[test]
    fn test_message_side_and_icon_cache() {
        let style = ConnectorLabelStyle::new(ConnectorLabelKind::Message);
        let above = Bounds::from_xywh(120.0, 40.0, 80.0, 14.0);
        let below = Bounds::from_xywh(120.0, 200.0, 80.0, 14.0);
        assert_eq!(style.side(above, owner()), Side::North);
        assert_eq!(style.side(below, owner()), Side::South);
        assert_eq!(style.connector_stroke().style(), StrokeStyle::Dashed);

        let icon = style.icon(above, owner());
        assert!(Rc::ptr_eq(&icon, &style.icon(above, owner())));
        let leaves = icon.arranged_leaves(above);
        assert_eq!(leaves[0].1, Bounds::from_xywh(120.0, 40.0, 20.0, 14.0));
        assert_eq!(style.text_bounds(above), Bounds::from_xywh(145.0, 40.0, 55.0, 14.0));
    }

    #[test]
    fn test_setters_invalidate() {
        let mut style = ConnectorLabelStyle::new(ConnectorLabelKind::Message);
        let label = Bounds::from_xywh(120.0, 40.0, 80.0, 14.0);
        let icon = style.icon(label, owner());
        style.set_outline(Color::new("#ff0000").unwrap());
        assert_eq!(style.mod_count(), 1);
        assert!(!Rc::ptr_eq(&icon, &style.icon(label, owner())));
    }
}
