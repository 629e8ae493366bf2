//! Composable icon trees.
//!
//! An icon is either a [`LeafIcon`] or one of three combinators:
//!
//! - [`Icon::Placed`]: positions a child relative to the outer rectangle
//!   according to a [`Placement`].
//! - [`Icon::Combined`]: paints every child in the same rectangle; later
//!   children paint on top.
//! - [`Icon::LineUp`]: lays children out left to right in fixed-size cells.
//!
//! Trees are immutable once built and shared through [`IconRef`]. Setting the
//! bounds of a tree is a pure traversal ([`Icon::arrange`]) that resolves the
//! rectangle of every leaf; render backends materialize leaves through
//! [`RenderContext`](crate::render::RenderContext).
//!
//! ```
//! # use bpmn_style_core::color::Color;
//! # use bpmn_style_core::draw::{Paint, StrokeDefinition};
//! # use bpmn_style_core::geometry::{Bounds, Size};
//! # use bpmn_style_core::icon::{Alignment, Icon, LeafShape, Placement, glyph};
//! let stroke = Paint::stroked(StrokeDefinition::solid(Color::default()));
//! let markers = Icon::line_up(
//!     vec![
//!         Icon::leaf(LeafShape::Glyph(&glyph::LOOP), stroke.clone()),
//!         Icon::leaf(LeafShape::Glyph(&glyph::TILDE), stroke.clone()),
//!     ],
//!     Size::new(10.0, 10.0),
//!     5.0,
//!     Alignment::Center,
//! )
//! .unwrap();
//! let activity = Icon::combined(vec![
//!     Icon::leaf(LeafShape::Rectangle, stroke),
//!     Icon::placed(markers, Placement::south(5.0, Size::new(25.0, 10.0))),
//! ]);
//! let leaves = activity.arranged_leaves(Bounds::from_xywh(0.0, 0.0, 100.0, 60.0));
//! assert_eq!(leaves.len(), 3);
//! assert_eq!(leaves[1].1, Bounds::from_xywh(37.5, 45.0, 10.0, 10.0));
//! ```

pub mod glyph;
mod leaf;
mod placement;

use std::rc::Rc;

pub use leaf::{LeafIcon, LeafShape};
pub use placement::{Extent, Placement};

use crate::{
    draw::Paint,
    error::CoreError,
    geometry::{Bounds, Size},
};

/// Shared handle to an immutable icon tree.
pub type IconRef = Rc<Icon>;

/// Horizontal alignment of a [`LineUpIcon`] row inside its outer rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// A node of an icon tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Icon {
    Leaf(LeafIcon),
    Placed(PlacedIcon),
    Combined(Vec<IconRef>),
    LineUp(LineUpIcon),
}

/// A child icon positioned inside its outer rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedIcon {
    child: IconRef,
    placement: Placement,
}

impl PlacedIcon {
    pub fn child(&self) -> &IconRef {
        &self.child
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Rectangle the child is arranged in for the given outer rectangle.
    pub fn child_bounds(&self, outer: Bounds) -> Bounds {
        self.placement.resolve(outer, self.child.preferred_size())
    }
}

/// Children laid out left to right in equally sized cells.
#[derive(Debug, Clone, PartialEq)]
pub struct LineUpIcon {
    children: Vec<IconRef>,
    cell: Size,
    spacing: f64,
    alignment: Alignment,
}

impl LineUpIcon {
    pub fn children(&self) -> &[IconRef] {
        &self.children
    }

    pub fn cell(&self) -> Size {
        self.cell
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Size of the whole row: `n * cell_width + (n - 1) * spacing` wide.
    pub fn total_size(&self) -> Size {
        let count = self.children.len();
        if count == 0 {
            return Size::default();
        }
        let count = count as f64;
        Size::new(
            count * self.cell.width() + (count - 1.0) * self.spacing,
            self.cell.height(),
        )
    }

    /// Cell rectangles of every child, in child order.
    pub fn cell_bounds(&self, outer: Bounds) -> Vec<Bounds> {
        let outer = outer.normalized();
        let total = self.total_size();
        let start_x = match self.alignment {
            Alignment::Left => outer.min_x(),
            Alignment::Center => outer.min_x() + (outer.width() - total.width()) / 2.0,
            Alignment::Right => outer.max_x() - total.width(),
        };
        let y = outer.min_y() + (outer.height() - self.cell.height()) / 2.0;
        let step = self.cell.width() + self.spacing;

        (0..self.children.len())
            .map(|index| {
                Bounds::from_xywh(
                    start_x + index as f64 * step,
                    y,
                    self.cell.width(),
                    self.cell.height(),
                )
            })
            .collect()
    }
}

impl Icon {
    /// Creates a shared leaf icon.
    pub fn leaf(shape: LeafShape, paint: Paint) -> IconRef {
        Rc::new(Self::Leaf(LeafIcon::new(shape, paint)))
    }

    /// Wraps `child` with a placement.
    pub fn placed(child: IconRef, placement: Placement) -> IconRef {
        Rc::new(Self::Placed(PlacedIcon { child, placement }))
    }

    /// Layers `children` in the same rectangle. An empty list is legal and
    /// renders nothing.
    pub fn combined(children: Vec<IconRef>) -> IconRef {
        Rc::new(Self::Combined(children))
    }

    /// An icon that renders nothing.
    pub fn empty() -> IconRef {
        Self::combined(Vec::new())
    }

    /// Lays out `children` left to right in cells of `cell` size.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidValue`] if the cell size or spacing is
    /// negative or not finite.
    pub fn line_up(
        children: Vec<IconRef>,
        cell: Size,
        spacing: f64,
        alignment: Alignment,
    ) -> Result<IconRef, CoreError> {
        CoreError::check_non_negative("line-up cell width", cell.width())?;
        CoreError::check_non_negative("line-up cell height", cell.height())?;
        CoreError::check_non_negative("line-up spacing", spacing)?;
        Ok(Rc::new(Self::LineUp(LineUpIcon {
            children,
            cell,
            spacing,
            alignment,
        })))
    }

    /// Natural size of the icon, if it has one.
    ///
    /// Only line-ups, fixed-size placements and combinations of those have a
    /// natural size; leaves stretch to whatever they are given.
    pub fn preferred_size(&self) -> Option<Size> {
        match self {
            Self::Leaf(_) => None,
            Self::Placed(placed) => placed.placement().fixed_size(),
            Self::Combined(children) => children
                .iter()
                .filter_map(|child| child.preferred_size())
                .reduce(Size::max),
            Self::LineUp(line_up) => Some(line_up.total_size()),
        }
    }

    /// Propagates `outer` through the tree and visits every leaf, in paint
    /// order, with the rectangle it is drawn in.
    pub fn arrange<'a>(&'a self, outer: Bounds, visit: &mut dyn FnMut(&'a LeafIcon, Bounds)) {
        match self {
            Self::Leaf(leaf) => visit(leaf, outer),
            Self::Placed(placed) => placed.child.arrange(placed.child_bounds(outer), visit),
            Self::Combined(children) => {
                for child in children {
                    child.arrange(outer, visit);
                }
            }
            Self::LineUp(line_up) => {
                for (child, cell) in line_up.children.iter().zip(line_up.cell_bounds(outer)) {
                    child.arrange(cell, visit);
                }
            }
        }
    }

    /// Collects every leaf with its resolved rectangle, in paint order.
    pub fn arranged_leaves(&self, outer: Bounds) -> Vec<(&LeafIcon, Bounds)> {
        let mut leaves = Vec::new();
        self.arrange(outer, &mut |leaf, bounds| leaves.push((leaf, bounds)));
        leaves
    }

    /// Number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Placed(placed) => placed.child.leaf_count(),
            Self::Combined(children) => children.iter().map(|child| child.leaf_count()).sum(),
            Self::LineUp(line_up) => line_up
                .children
                .iter()
                .map(|child| child.leaf_count())
                .sum(),
        }
    }

    /// Returns `true` if some leaf satisfies `predicate`.
    pub fn any_leaf(&self, predicate: &dyn Fn(&LeafIcon) -> bool) -> bool {
        match self {
            Self::Leaf(leaf) => predicate(leaf),
            Self::Placed(placed) => placed.child.any_leaf(predicate),
            Self::Combined(children) => children.iter().any(|child| child.any_leaf(predicate)),
            Self::LineUp(line_up) => line_up
                .children
                .iter()
                .any(|child| child.any_leaf(predicate)),
        }
    }

    /// Returns `true` if `icon` is this tree or one of its sub-trees, by identity.
    pub fn contains(&self, icon: &IconRef) -> bool {
        if std::ptr::eq(self, Rc::as_ptr(icon)) {
            return true;
        }
        match self {
            Self::Leaf(_) => false,
            Self::Placed(placed) => placed.child.contains(icon),
            Self::Combined(children) => children.iter().any(|child| child.contains(icon)),
            Self::LineUp(line_up) => line_up.children.iter().any(|child| child.contains(icon)),
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{color::Color, draw::StrokeDefinition};

    fn check_line_up_cells_do_not_overlap(
        count: usize,
        cell: f64,
        spacing: f64,
    ) -> Result<(), TestCaseError> {
        let children = (0..count)
            .map(|_| {
                Icon::leaf(
                    LeafShape::Glyph(&glyph::MINUS),
                    Paint::stroked(StrokeDefinition::solid(Color::default())),
                )
            })
            .collect();
        let icon = Icon::line_up(children, Size::new(cell, cell), spacing, Alignment::Center)
            .map_err(|err| TestCaseError::fail(err.to_string()))?;
        let leaves = icon.arranged_leaves(Bounds::from_xywh(0.0, 0.0, 200.0, 50.0));
        prop_assert_eq!(leaves.len(), count);
        for pair in leaves.windows(2) {
            prop_assert!(pair[0].1.max_x() <= pair[1].1.min_x() + 1e-9);
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn line_up_cells_do_not_overlap(count in 0usize..8, cell in 0.0f64..30.0, spacing in 0.0f64..10.0) {
            check_line_up_cells_do_not_overlap(count, cell, spacing)?;
        }
    }
}
