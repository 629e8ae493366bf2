use kurbo::BezPath;
use log::debug;

use bpmn_style_core::{
    color::Color,
    geometry::{Bounds, Insets, Size},
    icon::IconRef,
    path,
};

use super::{
    ElementKind, ElementStyle, IconSlot, StyleDefaults, check_insets, icon_factory,
    set_if_changed,
};
use crate::{error::StyleError, insets::InsetsProvider};

const MIN_DATA_STORE_SIZE: Size = Size::new(30.0, 30.0);

/// Style of a data store: a cylinder.
#[derive(Debug, Clone)]
pub struct DataStoreStyle {
    background: Color,
    outline: Color,
    insets: Insets,
    mod_count: u64,

    shape_icon: IconSlot,
}

impl DataStoreStyle {
    pub fn new() -> Self {
        Self::with_defaults(StyleDefaults::shared())
    }

    pub fn with_defaults(defaults: &StyleDefaults) -> Self {
        Self {
            background: defaults.background(),
            outline: defaults.outline(),
            insets: defaults.insets(),
            mod_count: 0,
            shape_icon: IconSlot::new(),
        }
    }

    pub fn set_background(&mut self, color: Color) {
        if set_if_changed(&mut self.background, color, &mut self.mod_count) {
            self.shape_icon.invalidate();
        }
    }

    pub fn set_outline(&mut self, color: Color) {
        if set_if_changed(&mut self.outline, color, &mut self.mod_count) {
            self.shape_icon.invalidate();
        }
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

impl Default for DataStoreStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl InsetsProvider for DataStoreStyle {
    fn base_insets(&self) -> Insets {
        self.insets
    }
}

impl ElementStyle for DataStoreStyle {
    fn kind(&self) -> ElementKind {
        ElementKind::DataStore
    }

    fn mod_count(&self) -> u64 {
        self.mod_count
    }

    fn icon(&self) -> IconRef {
        self.shape_icon.get_or_build(|| {
            debug!(mod_count = self.mod_count; "Building data store icon");
            icon_factory::data_store_shape(self.background, self.outline)
        })
    }

    fn outline(&self, layout: Bounds) -> BezPath {
        path::data_store(layout)
    }

    fn minimum_size(&self) -> Size {
        MIN_DATA_STORE_SIZE
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use bpmn_style_core::geometry::Point;

    use super::*;

    #[test]
    fn test_outline_color_rebuilds() {
        let mut style = DataStoreStyle::new();
        let icon = style.icon();
        assert_eq!(icon.leaf_count(), 2);
        assert!(Rc::ptr_eq(&icon, &style.icon()));

        style.set_outline(Color::new("#804000").unwrap());
        assert_eq!(style.mod_count(), 1);
        assert!(!Rc::ptr_eq(&icon, &style.icon()));
    }

    #[test]
    fn test_cylinder_hit() {
        let style = DataStoreStyle::new();
        let layout = Bounds::from_xywh(0.0, 0.0, 40.0, 40.0);
        let context = Default::default();
        assert!(style.is_hit(&context, Point::new(20.0, 20.0), layout));
        assert!(!style.is_hit(&context, Point::new(0.5, 0.5), layout));
    }
}
