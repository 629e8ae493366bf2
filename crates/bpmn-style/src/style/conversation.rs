use kurbo::BezPath;
use log::debug;

use bpmn_style_core::{
    color::Color,
    geometry::{Bounds, Insets, Size},
    icon::{Icon, IconRef, Placement},
    path,
};

use super::{
    ElementKind, ElementStyle, IconSlot, StyleDefaults, check_insets, icon_factory,
    set_if_changed, types::ConversationType,
};
use crate::{error::StyleError, insets::InsetsProvider};

const MIN_CONVERSATION_SIZE: Size = Size::new(30.0, 26.0);

/// Style of a conversation: a hexagon, with a plus marker for
/// sub-conversations.
#[derive(Debug, Clone)]
pub struct ConversationStyle {
    conversation_type: ConversationType,
    background: Color,
    outline: Color,
    icon_color: Color,
    marker_size: f64,
    insets: Insets,
    mod_count: u64,

    shape_icon: IconSlot,
    marker_icon: IconSlot,
    combined: IconSlot,
}

impl ConversationStyle {
    pub fn new() -> Self {
        Self::with_defaults(StyleDefaults::shared())
    }

    pub fn with_defaults(defaults: &StyleDefaults) -> Self {
        Self {
            conversation_type: ConversationType::default(),
            background: defaults.background(),
            outline: defaults.outline(),
            icon_color: defaults.icon(),
            marker_size: defaults.marker_size(),
            insets: defaults.insets(),
            mod_count: 0,
            shape_icon: IconSlot::new(),
            marker_icon: IconSlot::new(),
            combined: IconSlot::new(),
        }
    }

    pub fn conversation_type(&self) -> ConversationType {
        self.conversation_type
    }

    pub fn set_conversation_type(&mut self, conversation_type: ConversationType) {
        let was_called = self.conversation_type.is_called();
        if set_if_changed(
            &mut self.conversation_type,
            conversation_type,
            &mut self.mod_count,
        ) {
            if was_called != conversation_type.is_called() {
                self.shape_icon.invalidate();
            }
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
}

impl Default for ConversationStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl InsetsProvider for ConversationStyle {
    fn base_insets(&self) -> Insets {
        self.insets
    }

    fn feature_insets(&self) -> Insets {
        if self.conversation_type.is_sub_conversation() {
            Insets::default().with_bottom(self.marker_size + icon_factory::MARKER_GAP)
        } else {
            Insets::default()
        }
    }
}

impl ElementStyle for ConversationStyle {
    fn kind(&self) -> ElementKind {
        ElementKind::Conversation
    }

    fn mod_count(&self) -> u64 {
        self.mod_count
    }

    fn icon(&self) -> IconRef {
        self.combined.get_or_build(|| {
            debug!(conversation_type:? = self.conversation_type; "Building conversation icon");
            let shape = self.shape_icon.get_or_build(|| {
                icon_factory::conversation_shape(
                    self.conversation_type,
                    self.background,
                    self.outline,
                )
            });
            let mut children = vec![shape];
            if self.conversation_type.is_sub_conversation() {
                let marker = self
                    .marker_icon
                    .get_or_build(|| icon_factory::sub_conversation_marker(self.icon_color));
                children.push(Icon::placed(
                    marker,
                    Placement::south(icon_factory::MARKER_GAP, Size::square(self.marker_size)),
                ));
            }
            Icon::combined(children)
        })
    }

    fn outline(&self, layout: Bounds) -> BezPath {
        path::hexagon(layout)
    }

    fn minimum_size(&self) -> Size {
        MIN_CONVERSATION_SIZE
    }
}
