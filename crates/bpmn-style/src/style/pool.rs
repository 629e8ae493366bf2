use kurbo::BezPath;
use log::debug;

use bpmn_style_core::{
    color::Color,
    draw::RenderLayer,
    geometry::{Bounds, Insets, Side, Size},
    icon::{Icon, IconRef, Placement},
    path,
};

use super::{
    ElementKind, ElementStyle, IconSlot, StyleDefaults, check_insets, icon_factory,
    set_if_changed, types::PoolOrientation,
};
use crate::{error::StyleError, insets::InsetsProvider};

/// Thickness of the header strip a new pool starts with.
pub const DEFAULT_HEADER_SIZE: f64 = 20.0;

/// Room left for lanes next to the header in the minimum size.
const MIN_LANE_EXTENT: f64 = 40.0;

/// Style of a pool: a rectangle with a header strip on its left
/// (horizontal) or top (vertical) side and optional multi-instance bars.
#[derive(Debug, Clone)]
pub struct PoolStyle {
    orientation: PoolOrientation,
    header_size: f64,
    multiple_instance: bool,
    background: Color,
    header_color: Color,
    outline: Color,
    icon_color: Color,
    marker_size: f64,
    insets: Insets,
    mod_count: u64,

    body_icon: IconSlot,
    header_icon: IconSlot,
    marker_icon: IconSlot,
    combined: IconSlot,
}

impl PoolStyle {
    pub fn new() -> Self {
        Self::with_defaults(StyleDefaults::shared())
    }

    pub fn with_defaults(defaults: &StyleDefaults) -> Self {
        Self {
            orientation: PoolOrientation::default(),
            header_size: DEFAULT_HEADER_SIZE,
            multiple_instance: false,
            background: defaults.background(),
            header_color: defaults.pool_header(),
            outline: defaults.outline(),
            icon_color: defaults.icon(),
            marker_size: defaults.marker_size(),
            insets: Insets::default(),
            mod_count: 0,
            body_icon: IconSlot::new(),
            header_icon: IconSlot::new(),
            marker_icon: IconSlot::new(),
            combined: IconSlot::new(),
        }
    }

    pub fn orientation(&self) -> PoolOrientation {
        self.orientation
    }

    pub fn header_size(&self) -> f64 {
        self.header_size
    }

    pub fn multiple_instance(&self) -> bool {
        self.multiple_instance
    }

    /// The side the header strip is drawn on.
    pub fn header_side(&self) -> Side {
        match self.orientation {
            PoolOrientation::Horizontal => Side::West,
            PoolOrientation::Vertical => Side::North,
        }
    }

    pub fn set_orientation(&mut self, orientation: PoolOrientation) {
        if set_if_changed(&mut self.orientation, orientation, &mut self.mod_count) {
            self.combined.invalidate();
        }
    }

    /// # Errors
    ///
    /// Returns [`StyleError::InvalidParameter`] for a negative or non-finite
    /// size.
    pub fn set_header_size(&mut self, size: f64) -> Result<(), StyleError> {
        let size = StyleError::check_length("header size", size)?;
        if set_if_changed(&mut self.header_size, size, &mut self.mod_count) {
            self.combined.invalidate();
        }
        Ok(())
    }

    pub fn set_multiple_instance(&mut self, multiple_instance: bool) {
        if set_if_changed(
            &mut self.multiple_instance,
            multiple_instance,
            &mut self.mod_count,
        ) {
            self.combined.invalidate();
        }
    }

    pub fn set_background(&mut self, color: Color) {
        if set_if_changed(&mut self.background, color, &mut self.mod_count) {
            self.body_icon.invalidate();
            self.combined.invalidate();
        }
    }

    pub fn set_header_color(&mut self, color: Color) {
        if set_if_changed(&mut self.header_color, color, &mut self.mod_count) {
            self.header_icon.invalidate();
            self.combined.invalidate();
        }
    }

    pub fn set_outline(&mut self, color: Color) {
        if set_if_changed(&mut self.outline, color, &mut self.mod_count) {
            self.body_icon.invalidate();
            self.header_icon.invalidate();
            self.combined.invalidate();
        }
    }

    pub fn set_icon_color(&mut self, color: Color) {
        if set_if_changed(&mut self.icon_color, color, &mut self.mod_count) {
            self.marker_icon.invalidate();
            self.combined.invalidate();
        }
    }

    /// # Errors
    ///
    /// Returns [`StyleError::InvalidParameter`] for a negative or non-finite
    /// size.
    pub fn set_marker_size(&mut self, size: f64) -> Result<(), StyleError> {
        let size = StyleError::check_length("marker size", size)?;
        if set_if_changed(&mut self.marker_size, size, &mut self.mod_count) {
            self.combined.invalidate();
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`StyleError::InvalidParameter`] if any side is negative or
    /// non-finite.
    pub fn set_insets(&mut self, insets: Insets) -> Result<(), StyleError> {
        let insets = check_insets(insets)?;
        set_if_changed(&mut self.insets, insets, &mut self.mod_count);
        Ok(())
    }

    /// The header strip of `layout`.
    pub fn header_bounds(&self, layout: Bounds) -> Bounds {
        self.header_bounds_at(layout, self.header_side())
    }

    /// A strip of header thickness along `side` of `layout`, clamped to the
    /// layout.
    pub fn header_bounds_at(&self, layout: Bounds, side: Side) -> Bounds {
        let layout = layout.normalized();
        let (x, y, w, h) = (layout.min_x(), layout.min_y(), layout.width(), layout.height());
        match side {
            Side::North => Bounds::from_xywh(x, y, w, self.header_size.min(h)),
            Side::South => {
                let size = self.header_size.min(h);
                Bounds::from_xywh(x, layout.max_y() - size, w, size)
            }
            Side::West => Bounds::from_xywh(x, y, self.header_size.min(w), h),
            Side::East => {
                let size = self.header_size.min(w);
                Bounds::from_xywh(layout.max_x() - size, y, size, h)
            }
        }
    }

    fn header_placement(&self) -> Placement {
        match self.orientation {
            PoolOrientation::Horizontal => Placement::left_strip(self.header_size),
            PoolOrientation::Vertical => Placement::top_band(0.0, self.header_size),
        }
    }
}

impl Default for PoolStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl InsetsProvider for PoolStyle {
    fn base_insets(&self) -> Insets {
        self.insets
    }

    fn feature_insets(&self) -> Insets {
        let insets = match self.orientation {
            PoolOrientation::Horizontal => Insets::default().with_left(self.header_size),
            PoolOrientation::Vertical => Insets::default().with_top(self.header_size),
        };
        if self.multiple_instance {
            insets.with_bottom(self.marker_size + icon_factory::MARKER_GAP)
        } else {
            insets
        }
    }
}

impl ElementStyle for PoolStyle {
    fn kind(&self) -> ElementKind {
        ElementKind::Pool
    }

    fn mod_count(&self) -> u64 {
        self.mod_count
    }

    fn icon(&self) -> IconRef {
        self.combined.get_or_build(|| {
            debug!(
                orientation:? = self.orientation,
                multiple_instance = self.multiple_instance;
                "Building pool icon"
            );
            let body = self
                .body_icon
                .get_or_build(|| icon_factory::rectangle(self.background, self.outline));
            let header = self
                .header_icon
                .get_or_build(|| icon_factory::rectangle(self.header_color, self.outline));
            let mut children = vec![body, Icon::placed(header, self.header_placement())];
            if self.multiple_instance {
                let bars = self
                    .marker_icon
                    .get_or_build(|| icon_factory::collection_marker(self.icon_color));
                children.push(Icon::placed(
                    bars,
                    Placement::south(icon_factory::MARKER_GAP, Size::square(self.marker_size)),
                ));
            }
            Icon::combined(children)
        })
    }

    fn outline(&self, layout: Bounds) -> BezPath {
        path::rectangle(layout)
    }

    fn minimum_size(&self) -> Size {
        match self.orientation {
            PoolOrientation::Horizontal => {
                Size::new(self.header_size + MIN_LANE_EXTENT, MIN_LANE_EXTENT)
            }
            PoolOrientation::Vertical => {
                Size::new(MIN_LANE_EXTENT, self.header_size + MIN_LANE_EXTENT)
            }
        }
    }

    fn layer(&self) -> RenderLayer {
        RenderLayer::Container
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_header_follows_orientation() {
        let mut style = PoolStyle::new();
        let layout = Bounds::from_xywh(10.0, 10.0, 300.0, 100.0);
        assert_eq!(style.header_bounds(layout), Bounds::from_xywh(10.0, 10.0, 20.0, 100.0));
        assert_eq!(style.insets(), Insets::default().with_left(20.0));

        style.set_orientation(PoolOrientation::Vertical);
        assert_eq!(style.header_bounds(layout), Bounds::from_xywh(10.0, 10.0, 300.0, 20.0));
        assert_eq!(style.insets(), Insets::default().with_top(20.0));

        let icon = style.icon();
        let leaves = icon.arranged_leaves(layout);
        assert_eq!(leaves[1].1, style.header_bounds(layout));
    }

    #[test]
    fn test_header_bounds_clamp_to_layout() {
        let style = PoolStyle::new();
        let layout = Bounds::from_xywh(0.0, 0.0, 12.0, 8.0);
        assert_eq!(
            style.header_bounds_at(layout, Side::East),
            Bounds::from_xywh(0.0, 0.0, 12.0, 8.0)
        );
        assert_eq!(
            style.header_bounds_at(layout, Side::South),
            Bounds::from_xywh(0.0, 0.0, 12.0, 8.0)
        );
    }

    #[test]
    fn test_multiple_instance_marker() {
        let mut style = PoolStyle::new();
        let before = style.icon();
        style.set_multiple_instance(true);
        let after = style.icon();
        assert_eq!(after.leaf_count(), before.leaf_count() + 1);
        assert_eq!(style.insets().bottom(), 15.0);
        if let (Icon::Combined(old), Icon::Combined(new)) = (&*before, &*after) {
            assert!(Rc::ptr_eq(&old[0], &new[0]));
        } else {
            panic!("pool icon should be combined");
        }
    }

    #[test]
    fn test_header_size_and_color() {
        let mut style = PoolStyle::new();
        let layout = Bounds::from_xywh(0.0, 0.0, 300.0, 100.0);
        style.set_header_size(40.0).unwrap();
        assert_eq!(style.header_bounds(layout), Bounds::from_xywh(0.0, 0.0, 40.0, 100.0));
        assert_eq!(style.insets().left(), 40.0);
        assert!(style.set_header_size(-1.0).is_err());
        assert_eq!(style.header_size(), 40.0);

        let before = style.icon();
        let blue = Color::new("#0000ff").unwrap();
        style.set_header_color(blue);
        let after = style.icon();
        assert!(!Rc::ptr_eq(&before, &after));
        let leaves = after.arranged_leaves(layout);
        assert_eq!(leaves[1].0.paint().fill(), Some(blue));
    }
}
