use kurbo::BezPath;
use log::debug;

use bpmn_style_core::{
    color::Color,
    draw::RenderLayer,
    geometry::{Bounds, Insets, Size},
    icon::IconRef,
    path,
};

use super::{
    ElementKind, ElementStyle, IconSlot, StyleDefaults, check_insets, icon_factory,
    set_if_changed,
};
use crate::{error::StyleError, insets::InsetsProvider};

/// Groups keep their label clear of the dash-dot border.
const GROUP_INSETS: f64 = 15.0;

const MIN_GROUP_SIZE: Size = Size::new(40.0, 40.0);

/// Style of a group: an unfilled dash-dot rounded rectangle drawn beneath
/// flow nodes.
#[derive(Debug, Clone)]
pub struct GroupStyle {
    outline: Color,
    corner_radius: f64,
    insets: Insets,
    mod_count: u64,

    shape_icon: IconSlot,
}

impl GroupStyle {
    pub fn new() -> Self {
        Self::with_defaults(StyleDefaults::shared())
    }

    pub fn with_defaults(defaults: &StyleDefaults) -> Self {
        Self {
            outline: defaults.outline(),
            corner_radius: defaults.corner_radius(),
            insets: Insets::uniform(GROUP_INSETS),
            mod_count: 0,
            shape_icon: IconSlot::new(),
        }
    }

    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    pub fn set_outline(&mut self, color: Color) {
        if set_if_changed(&mut self.outline, color, &mut self.mod_count) {
            self.shape_icon.invalidate();
        }
    }

    /// # Errors
    ///
    /// Returns [`StyleError::InvalidParameter`] for a negative or non-finite
    /// radius.
    pub fn set_corner_radius(&mut self, radius: f64) -> Result<(), StyleError> {
        let radius = StyleError::check_length("corner radius", radius)?;
        if set_if_changed(&mut self.corner_radius, radius, &mut self.mod_count) {
            self.shape_icon.invalidate();
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
}

impl Default for GroupStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl InsetsProvider for GroupStyle {
    fn base_insets(&self) -> Insets {
        self.insets
    }
}

impl ElementStyle for GroupStyle {
    fn kind(&self) -> ElementKind {
        ElementKind::Group
    }

    fn mod_count(&self) -> u64 {
        self.mod_count
    }

    fn icon(&self) -> IconRef {
        self.shape_icon.get_or_build(|| {
            debug!(corner_radius = self.corner_radius; "Building group icon");
            icon_factory::group_shape(self.outline, self.corner_radius)
        })
    }

    fn outline(&self, layout: Bounds) -> BezPath {
        path::rounded_rectangle(layout, self.corner_radius)
    }

    fn minimum_size(&self) -> Size {
        MIN_GROUP_SIZE
    }

    fn layer(&self) -> RenderLayer {
        RenderLayer::Container
    }
}
