//! Retained node visuals.
//!
//! A [`RenderedNode`] remembers the icon tree and layout a visual was built
//! for. [`update_node_visual`] compares them with the style's current state
//! and does the least work that brings the visual up to date: nothing when
//! neither changed, an in-place re-arrangement when only the layout moved,
//! and a rebuild when the style produced a new icon tree.

use std::rc::Rc;

use log::debug;

use bpmn_style_core::{geometry::Bounds, icon::IconRef};

use crate::style::ElementStyle;

pub use bpmn_style_core::render::{IconVisual, RenderContext, svg};

/// A materialized node together with the state it was built from.
#[derive(Debug, Clone)]
pub struct RenderedNode<V> {
    visual: IconVisual<V>,
    icon: IconRef,
    mod_count: u64,
    layout: Bounds,
}

impl<V> RenderedNode<V> {
    pub fn visual(&self) -> &IconVisual<V> {
        &self.visual
    }

    pub fn icon(&self) -> &IconRef {
        &self.icon
    }

    /// Modification count of the style at the last render.
    pub fn mod_count(&self) -> u64 {
        self.mod_count
    }

    pub fn layout(&self) -> Bounds {
        self.layout
    }
}

/// What [`update_node_visual`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderUpdate {
    /// Nothing changed; the previous visual was returned as is.
    Reused,
    /// Only the layout changed; existing leaf visuals were moved.
    Rearranged,
    /// The icon tree changed; every leaf visual was created anew.
    Rebuilt,
}

/// Materializes `style` arranged at `layout`.
pub fn create_node_visual<C, S>(context: &mut C, style: &S, layout: Bounds) -> RenderedNode<C::Visual>
where
    C: RenderContext,
    S: ElementStyle + ?Sized,
{
    let icon = style.icon();
    let visual = icon.create_visual(context, layout);
    debug!(kind = style.kind().name(), leaves = visual.leaf_count(); "Created node visual");
    RenderedNode {
        visual,
        icon,
        mod_count: style.mod_count(),
        layout,
    }
}

/// Brings `previous` up to date with the current state of `style`.
///
/// The icon tree is compared by identity. Styles return the same tree until
/// a parameter it depends on changes, so a modification that only affects
/// insets or size constraints still counts as a layout-only update.
pub fn update_node_visual<C, S>(
    context: &mut C,
    style: &S,
    layout: Bounds,
    previous: RenderedNode<C::Visual>,
) -> (RenderedNode<C::Visual>, RenderUpdate)
where
    C: RenderContext,
    S: ElementStyle + ?Sized,
{
    let icon = style.icon();
    let mod_count = style.mod_count();

    if !Rc::ptr_eq(&icon, &previous.icon) {
        debug!(
            kind = style.kind().name(),
            previous = previous.mod_count,
            current = mod_count;
            "Rebuilding node visual"
        );
        let visual = icon.create_visual(context, layout);
        let node = RenderedNode {
            visual,
            icon,
            mod_count,
            layout,
        };
        return (node, RenderUpdate::Rebuilt);
    }

    if layout == previous.layout {
        let node = RenderedNode {
            mod_count,
            ..previous
        };
        return (node, RenderUpdate::Reused);
    }

    debug!(kind = style.kind().name(), layout:?; "Re-arranging node visual");
    let visual = icon.update_visual(context, layout, previous.visual);
    let node = RenderedNode {
        visual,
        icon,
        mod_count,
        layout,
    };
    (node, RenderUpdate::Rearranged)
}

#[cfg(test)]
mod tests {
    use super::{svg::SvgContext, *};
    use crate::style::{
        ChoreographyStyle, ElementStyle, LoopCharacteristic, NodeStyle, Participant,
    };

    fn choreography() -> NodeStyle {
        let mut style = ChoreographyStyle::new();
        style.top_participants_mut().push(Participant::new(false));
        style.bottom_participants_mut().push(Participant::new(false));
        style.into()
    }

    #[test]
    fn test_unchanged_node_is_reused() {
        let style = choreography();
        let layout = Bounds::from_xywh(0.0, 0.0, 100.0, 80.0);
        let mut context = SvgContext::new();

        let node = create_node_visual(&mut context, &style, layout);
        let created = context.created();
        let (node, update) = update_node_visual(&mut context, &style, layout, node);
        assert_eq!(update, RenderUpdate::Reused);
        assert_eq!(context.created(), created);
        assert_eq!(context.updated(), 0);
        assert_eq!(node.mod_count(), style.mod_count());
    }

    #[test]
    fn test_bounds_change_rearranges() {
        let style = choreography();
        let mut context = SvgContext::new();
        let node = create_node_visual(&mut context, &style, Bounds::from_xywh(0.0, 0.0, 100.0, 80.0));
        let created = context.created();
        let icon = node.icon().clone();

        let moved = Bounds::from_xywh(50.0, 20.0, 120.0, 90.0);
        let (node, update) = update_node_visual(&mut context, &style, moved, node);
        assert_eq!(update, RenderUpdate::Rearranged);
        assert_eq!(context.created(), created);
        assert_eq!(context.updated(), created);
        assert!(Rc::ptr_eq(node.icon(), &icon));
        assert_eq!(node.layout(), moved);
    }

    #[test]
    fn test_structural_change_rebuilds() {
        let mut style = choreography();
        let layout = Bounds::from_xywh(0.0, 0.0, 100.0, 80.0);
        let mut context = SvgContext::new();
        let node = create_node_visual(&mut context, &style, layout);
        let created = context.created();

        style
            .as_choreography_mut()
            .unwrap()
            .top_participants_mut()
            .push(Participant::new(true));
        let (node, update) = update_node_visual(&mut context, &style, layout, node);
        assert_eq!(update, RenderUpdate::Rebuilt);
        assert!(context.created() > created);
        assert_eq!(node.visual().leaf_count(), style.icon().leaf_count());
    }

    #[test]
    fn test_marker_change_rebuilds_activity() {
        let mut style: NodeStyle = crate::style::ActivityStyle::new().into();
        let layout = Bounds::from_xywh(0.0, 0.0, 100.0, 60.0);
        let mut context = SvgContext::new();
        let node = create_node_visual(&mut context, &style, layout);

        style
            .as_activity_mut()
            .unwrap()
            .set_loop_characteristic(LoopCharacteristic::Loop);
        let (node, update) = update_node_visual(&mut context, &style, layout, node);
        assert_eq!(update, RenderUpdate::Rebuilt);
        assert_eq!(node.visual().leaf_count(), 2);
    }
}
