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

const MIN_MESSAGE_SIZE: Size = Size::new(20.0, 14.0);

/// Style of a standalone message: an envelope, shaded when the message is
/// not the initiating one.
#[derive(Debug, Clone)]
pub struct MessageStyle {
    shaded: bool,
    initiating_fill: Color,
    response_fill: Color,
    outline: Color,
    insets: Insets,
    mod_count: u64,

    shape_icon: IconSlot,
}

impl MessageStyle {
    pub fn new() -> Self {
        Self::with_defaults(StyleDefaults::shared())
    }

    pub fn with_defaults(defaults: &StyleDefaults) -> Self {
        Self {
            shaded: false,
            initiating_fill: defaults.initiating_message(),
            response_fill: defaults.response_message(),
            outline: defaults.outline(),
            insets: Insets::default(),
            mod_count: 0,
            shape_icon: IconSlot::new(),
        }
    }

    pub fn shaded(&self) -> bool {
        self.shaded
    }

    pub fn set_shaded(&mut self, shaded: bool) {
        if set_if_changed(&mut self.shaded, shaded, &mut self.mod_count) {
            self.shape_icon.invalidate();
        }
    }

    pub fn set_outline(&mut self, color: Color) {
        if set_if_changed(&mut self.outline, color, &mut self.mod_count) {
            self.shape_icon.invalidate();
        }
    }

    /// Sets the fills of initiating and shaded envelopes.
    pub fn set_fills(&mut self, initiating: Color, response: Color) {
        let initiating_changed =
            set_if_changed(&mut self.initiating_fill, initiating, &mut self.mod_count);
        let response_changed =
            set_if_changed(&mut self.response_fill, response, &mut self.mod_count);
        if initiating_changed || response_changed {
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

    fn fill(&self) -> Color {
        if self.shaded {
            self.response_fill
        } else {
            self.initiating_fill
        }
    }
}

impl Default for MessageStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl InsetsProvider for MessageStyle {
    fn base_insets(&self) -> Insets {
        self.insets
    }
}

impl ElementStyle for MessageStyle {
    fn kind(&self) -> ElementKind {
        ElementKind::Message
    }

    fn mod_count(&self) -> u64 {
        self.mod_count
    }

    fn icon(&self) -> IconRef {
        self.shape_icon.get_or_build(|| {
            debug!(shaded = self.shaded; "Building message icon");
            icon_factory::message_shape(self.fill(), self.outline)
        })
    }

    fn outline(&self, layout: Bounds) -> BezPath {
        path::rectangle(layout)
    }

    fn minimum_size(&self) -> Size {
        MIN_MESSAGE_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_fill(style: &MessageStyle) -> Option<Color> {
        let icon = style.icon();
        let fill = icon.arranged_leaves(Bounds::from_xywh(0.0, 0.0, 20.0, 14.0))[0]
            .0
            .paint()
            .fill();
        fill
    }

    #[test]
    fn test_shaded_uses_response_fill() {
        let mut style = MessageStyle::new();
        let defaults = StyleDefaults::shared();
        assert_eq!(body_fill(&style), Some(defaults.initiating_message()));

        style.set_shaded(true);
        assert_eq!(body_fill(&style), Some(defaults.response_message()));
    }

    #[test]
    fn test_set_fills_counts_each_change() {
        let mut style = MessageStyle::new();
        let red = Color::new("#ff0000").unwrap();
        let blue = Color::new("#0000ff").unwrap();
        style.set_fills(red, blue);
        assert_eq!(style.mod_count(), 2);
        style.set_fills(red, blue);
        assert_eq!(style.mod_count(), 2);
    }
}
