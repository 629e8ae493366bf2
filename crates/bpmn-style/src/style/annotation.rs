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
    set_if_changed, types::AnnotationSide,
};
use crate::{error::StyleError, insets::InsetsProvider};

const MIN_ANNOTATION_SIZE: Size = Size::new(20.0, 20.0);

/// Style of a text annotation: a filled background with a bracket on one
/// side. The outline is the full rectangle so the text area is hittable.
#[derive(Debug, Clone)]
pub struct AnnotationStyle {
    side: AnnotationSide,
    background: Color,
    outline: Color,
    insets: Insets,
    mod_count: u64,

    shape_icon: IconSlot,
}

impl AnnotationStyle {
    pub fn new() -> Self {
        Self::with_defaults(StyleDefaults::shared())
    }

    pub fn with_defaults(defaults: &StyleDefaults) -> Self {
        Self {
            side: AnnotationSide::default(),
            background: defaults.background(),
            outline: defaults.outline(),
            insets: defaults.insets(),
            mod_count: 0,
            shape_icon: IconSlot::new(),
        }
    }

    pub fn side(&self) -> AnnotationSide {
        self.side
    }

    pub fn set_side(&mut self, side: AnnotationSide) {
        if set_if_changed(&mut self.side, side, &mut self.mod_count) {
            self.shape_icon.invalidate();
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

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl InsetsProvider for AnnotationStyle {
    fn base_insets(&self) -> Insets {
        self.insets
    }
}

impl ElementStyle for AnnotationStyle {
    fn kind(&self) -> ElementKind {
        ElementKind::Annotation
    }

    fn mod_count(&self) -> u64 {
        self.mod_count
    }

    fn icon(&self) -> IconRef {
        self.shape_icon.get_or_build(|| {
            debug!(side:? = self.side; "Building annotation icon");
            icon_factory::annotation_shape(self.side, self.background, self.outline)
        })
    }

    fn outline(&self, layout: Bounds) -> BezPath {
        path::rectangle(layout)
    }

    fn minimum_size(&self) -> Size {
        MIN_ANNOTATION_SIZE
    }
}

#[cfg(test)]
mod tests {
    use bpmn_style_core::{geometry::Side, icon::LeafShape};

    use super::*;

    fn bracket_side(style: &AnnotationStyle) -> Option<Side> {
        let icon = style.icon();
        let layout = Bounds::from_xywh(0.0, 0.0, 80.0, 40.0);
        let side = icon
            .arranged_leaves(layout)
            .iter()
            .find_map(|(leaf, _)| match leaf.shape() {
                LeafShape::Bracket { side, .. } => Some(*side),
                _ => None,
            });
        side
    }

    #[test]
    fn test_bracket_follows_side() {
        let mut style = AnnotationStyle::new();
        assert_eq!(bracket_side(&style), Some(Side::West));

        style.set_side(AnnotationSide::Right);
        assert_eq!(bracket_side(&style), Some(Side::East));
        style.set_side(AnnotationSide::Right);
        assert_eq!(style.mod_count(), 1);
    }
}
