use kurbo::BezPath;
use log::debug;

use bpmn_style_core::{
    color::Color,
    geometry::{Bounds, Insets, Point, Size},
    icon::{Icon, IconRef, Placement},
    path,
};

use super::{
    ElementKind, ElementStyle, IconSlot, StyleDefaults, check_insets, icon_factory,
    set_if_changed, types::DataType,
};
use crate::{error::StyleError, insets::InsetsProvider};

const MIN_DATA_OBJECT_SIZE: Size = Size::new(25.0, 30.0);

/// Offset and size of the input/output arrow in the north-west corner.
const DATA_ICON_OFFSET: f64 = 3.0;
const DATA_ICON_SIZE: f64 = 12.0;

/// Style of a data object: a page with a folded corner, an optional
/// input/output arrow and optional collection bars.
#[derive(Debug, Clone)]
pub struct DataObjectStyle {
    data_type: DataType,
    collection: bool,
    background: Color,
    outline: Color,
    icon_color: Color,
    marker_size: f64,
    insets: Insets,
    mod_count: u64,

    shape_icon: IconSlot,
    data_icon: IconSlot<Option<IconRef>>,
    collection_icon: IconSlot,
    combined: IconSlot,
}

impl DataObjectStyle {
    pub fn new() -> Self {
        Self::with_defaults(StyleDefaults::shared())
    }

    pub fn with_defaults(defaults: &StyleDefaults) -> Self {
        Self {
            data_type: DataType::default(),
            collection: false,
            background: defaults.background(),
            outline: defaults.outline(),
            icon_color: defaults.icon(),
            marker_size: defaults.marker_size(),
            insets: defaults.insets(),
            mod_count: 0,
            shape_icon: IconSlot::new(),
            data_icon: IconSlot::new(),
            collection_icon: IconSlot::new(),
            combined: IconSlot::new(),
        }
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn collection(&self) -> bool {
        self.collection
    }

    pub fn set_data_type(&mut self, data_type: DataType) {
        if set_if_changed(&mut self.data_type, data_type, &mut self.mod_count) {
            self.data_icon.invalidate();
            self.combined.invalidate();
        }
    }

    pub fn set_collection(&mut self, collection: bool) {
        if set_if_changed(&mut self.collection, collection, &mut self.mod_count) {
            self.combined.invalidate();
        }
    }

    pub fn set_background(&mut self, color: Color) {
        if set_if_changed(&mut self.background, color, &mut self.mod_count) {
            self.shape_icon.invalidate();
            self.combined.invalidate();
        }
    }

    pub fn set_outline(&mut self, color: Color) {
        if set_if_changed(&mut self.outline, color, &mut self.mod_count) {
            self.shape_icon.invalidate();
            self.combined.invalidate();
        }
    }

    pub fn set_icon_color(&mut self, color: Color) {
        if set_if_changed(&mut self.icon_color, color, &mut self.mod_count) {
            self.data_icon.invalidate();
            self.collection_icon.invalidate();
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
}

impl Default for DataObjectStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl InsetsProvider for DataObjectStyle {
    fn base_insets(&self) -> Insets {
        self.insets
    }

    fn feature_insets(&self) -> Insets {
        if self.collection {
            Insets::default().with_bottom(self.marker_size + icon_factory::MARKER_GAP)
        } else {
            Insets::default()
        }
    }
}

impl ElementStyle for DataObjectStyle {
    fn kind(&self) -> ElementKind {
        ElementKind::DataObject
    }

    fn mod_count(&self) -> u64 {
        self.mod_count
    }

    fn icon(&self) -> IconRef {
        self.combined.get_or_build(|| {
            debug!(
                data_type:? = self.data_type,
                collection = self.collection;
                "Building data object icon"
            );
            let shape = self
                .shape_icon
                .get_or_build(|| icon_factory::data_object_shape(self.background, self.outline));
            let mut children = vec![shape];

            let data_icon = self
                .data_icon
                .get_or_build(|| icon_factory::data_type_icon(self.data_type, self.icon_color));
            if let Some(icon) = data_icon {
                children.push(Icon::placed(
                    icon,
                    Placement::north_west(
                        Point::new(DATA_ICON_OFFSET, DATA_ICON_OFFSET),
                        Size::square(DATA_ICON_SIZE),
                    ),
                ));
            }

            if self.collection {
                let bars = self
                    .collection_icon
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
        path::data_object(layout, icon_factory::DATA_OBJECT_FOLD)
    }

    fn minimum_size(&self) -> Size {
        MIN_DATA_OBJECT_SIZE
    }
}

#[cfg(test)]
mod tests {
    use bpmn_style_core::icon::glyph;

    use super::*;

    #[test]
    fn test_output_collection() {
        let mut style = DataObjectStyle::new();
        style.set_data_type(DataType::Output);
        style.set_collection(true);
        assert_eq!(style.mod_count(), 2);
        assert_eq!(style.insets().bottom(), 20.0);

        let layout = Bounds::from_xywh(0.0, 0.0, 40.0, 50.0);
        let icon = style.icon();
        let leaves = icon.arranged_leaves(layout);
        // page, fold, arrow, bars
        assert_eq!(leaves.len(), 4);
        assert!(leaves[2].0.is_glyph(&glyph::ARROW));
        assert!(leaves[2].0.paint().fill().is_some());
        assert_eq!(leaves[2].1, Bounds::from_xywh(3.0, 3.0, 12.0, 12.0));
        assert!(leaves[3].0.is_glyph(&glyph::PARALLEL_BARS));
        assert_eq!(leaves[3].1, Bounds::from_xywh(15.0, 35.0, 10.0, 10.0));
    }

    #[test]
    fn test_cut_corner_is_not_hit() {
        let style = DataObjectStyle::new();
        let layout = Bounds::from_xywh(0.0, 0.0, 40.0, 50.0);
        let context = Default::default();
        assert!(style.is_hit(&context, Point::new(5.0, 5.0), layout));
        assert!(!style.is_hit(&context, Point::new(39.0, 1.0), layout));
    }
}
