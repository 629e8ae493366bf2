//! Materializing icon trees into backend visuals.
//!
//! A [`RenderContext`] turns individual leaves into backend objects. Icon
//! trees drive it through [`Icon::create_visual`] and
//! [`Icon::update_visual`], producing an [`IconVisual`] tree that mirrors
//! the icon's structure so a later update can walk both in lockstep and
//! reuse every leaf visual in place.

pub mod svg;

use crate::{
    geometry::Bounds,
    icon::{Icon, LeafIcon},
};

/// Creates and updates the backend object of a single leaf.
pub trait RenderContext {
    /// Backend object a leaf is materialized as.
    type Visual;

    /// Creates the visual of `leaf` arranged in `bounds`.
    fn create_leaf(&mut self, leaf: &LeafIcon, bounds: Bounds) -> Self::Visual;

    /// Moves an existing visual of `leaf` to `bounds`.
    ///
    /// `previous` was created for the same leaf, possibly at other bounds.
    fn update_leaf(
        &mut self,
        leaf: &LeafIcon,
        bounds: Bounds,
        previous: Self::Visual,
    ) -> Self::Visual;
}

/// Retained visual tree of an icon.
///
/// Placements are transparent: a placed icon's visual is its child's visual.
/// Combinations and line-ups become groups with one entry per child.
#[derive(Debug, Clone, PartialEq)]
pub enum IconVisual<V> {
    Leaf(V),
    Group(Vec<IconVisual<V>>),
}

impl<V> IconVisual<V> {
    /// Number of leaf visuals in the tree.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Group(children) => children.iter().map(IconVisual::leaf_count).sum(),
        }
    }

    /// Leaf visuals in paint order.
    pub fn leaves(&self) -> Vec<&V> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a V>) {
        match self {
            Self::Leaf(visual) => leaves.push(visual),
            Self::Group(children) => {
                for child in children {
                    child.collect_leaves(leaves);
                }
            }
        }
    }
}

impl Icon {
    /// Materializes the whole tree arranged in `bounds`.
    pub fn create_visual<C: RenderContext>(
        &self,
        context: &mut C,
        bounds: Bounds,
    ) -> IconVisual<C::Visual> {
        match self {
            Self::Leaf(leaf) => IconVisual::Leaf(context.create_leaf(leaf, bounds)),
            Self::Placed(placed) => placed
                .child()
                .create_visual(context, placed.child_bounds(bounds)),
            Self::Combined(children) => IconVisual::Group(
                children
                    .iter()
                    .map(|child| child.create_visual(context, bounds))
                    .collect(),
            ),
            Self::LineUp(line_up) => IconVisual::Group(
                line_up
                    .children()
                    .iter()
                    .zip(line_up.cell_bounds(bounds))
                    .map(|(child, cell)| child.create_visual(context, cell))
                    .collect(),
            ),
        }
    }

    /// Re-arranges a visual previously created for this tree.
    ///
    /// Leaf visuals are handed back to the context for in-place updates. If
    /// `previous` does not have this tree's structure, the affected sub-tree
    /// is created from scratch instead.
    pub fn update_visual<C: RenderContext>(
        &self,
        context: &mut C,
        bounds: Bounds,
        previous: IconVisual<C::Visual>,
    ) -> IconVisual<C::Visual> {
        match (self, previous) {
            (Self::Leaf(leaf), IconVisual::Leaf(visual)) => {
                IconVisual::Leaf(context.update_leaf(leaf, bounds, visual))
            }
            (Self::Placed(placed), previous) => {
                placed
                    .child()
                    .update_visual(context, placed.child_bounds(bounds), previous)
            }
            (Self::Combined(children), IconVisual::Group(visuals))
                if children.len() == visuals.len() =>
            {
                IconVisual::Group(
                    children
                        .iter()
                        .zip(visuals)
                        .map(|(child, visual)| child.update_visual(context, bounds, visual))
                        .collect(),
                )
            }
            (Self::LineUp(line_up), IconVisual::Group(visuals))
                if line_up.children().len() == visuals.len() =>
            {
                let cells = line_up.cell_bounds(bounds);
                IconVisual::Group(
                    line_up
                        .children()
                        .iter()
                        .zip(cells)
                        .zip(visuals)
                        .map(|((child, cell), visual)| child.update_visual(context, cell, visual))
                        .collect(),
                )
            }
            _ => self.create_visual(context, bounds),
        }
    }
}
