use kurbo::BezPath;
use log::debug;

use bpmn_style_core::{
    color::Color,
    geometry::{Bounds, Insets, Size},
    icon::{Icon, IconRef},
    path,
};

use super::{
    ElementKind, ElementStyle, IconSlot, StyleDefaults, check_insets, icon_factory,
    set_if_changed,
    types::{EventCharacteristic, EventType},
};
use crate::{error::StyleError, insets::InsetsProvider};

const MIN_EVENT_SIZE: Size = Size::square(20.0);

/// Share of the smaller side taken by the type icon.
const TYPE_ICON_RATIO: f64 = 0.55;

/// Style of an event: one or two rings with a type icon.
///
/// Throwing and end events fill their type icon.
#[derive(Debug, Clone)]
pub struct EventStyle {
    characteristic: EventCharacteristic,
    event_type: EventType,
    background: Color,
    outline: Color,
    icon_color: Color,
    insets: Insets,
    mod_count: u64,

    ring_icon: IconSlot,
    type_icon: IconSlot<Option<IconRef>>,
    combined: IconSlot,
}

impl EventStyle {
    pub fn new() -> Self {
        Self::with_defaults(StyleDefaults::shared())
    }

    pub fn with_defaults(defaults: &StyleDefaults) -> Self {
        Self {
            characteristic: EventCharacteristic::default(),
            event_type: EventType::default(),
            background: defaults.background(),
            outline: defaults.outline(),
            icon_color: defaults.icon(),
            insets: defaults.insets(),
            mod_count: 0,
            ring_icon: IconSlot::new(),
            type_icon: IconSlot::new(),
            combined: IconSlot::new(),
        }
    }

    pub fn characteristic(&self) -> EventCharacteristic {
        self.characteristic
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn set_characteristic(&mut self, characteristic: EventCharacteristic) {
        let was_throwing = self.characteristic.is_throwing();
        if set_if_changed(&mut self.characteristic, characteristic, &mut self.mod_count) {
            self.ring_icon.invalidate();
            if was_throwing != characteristic.is_throwing() {
                self.type_icon.invalidate();
            }
            self.combined.invalidate();
        }
    }

    pub fn set_event_type(&mut self, event_type: EventType) {
        if set_if_changed(&mut self.event_type, event_type, &mut self.mod_count) {
            self.type_icon.invalidate();
            self.combined.invalidate();
        }
    }

    pub fn set_background(&mut self, color: Color) {
        if set_if_changed(&mut self.background, color, &mut self.mod_count) {
            self.ring_icon.invalidate();
            self.type_icon.invalidate();
            self.combined.invalidate();
        }
    }

    pub fn set_outline(&mut self, color: Color) {
        if set_if_changed(&mut self.outline, color, &mut self.mod_count) {
            self.ring_icon.invalidate();
            self.combined.invalidate();
        }
    }

    pub fn set_icon_color(&mut self, color: Color) {
        if set_if_changed(&mut self.icon_color, color, &mut self.mod_count) {
            self.type_icon.invalidate();
            self.combined.invalidate();
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

    pub fn type_icon(&self) -> Option<IconRef> {
        self.type_icon.get_or_build(|| {
            icon_factory::event_type_icon(
                self.event_type,
                self.characteristic.is_throwing(),
                self.icon_color,
                self.background,
            )
        })
    }
}

impl Default for EventStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl InsetsProvider for EventStyle {
    fn base_insets(&self) -> Insets {
        self.insets
    }
}

impl ElementStyle for EventStyle {
    fn kind(&self) -> ElementKind {
        ElementKind::Event
    }

    fn mod_count(&self) -> u64 {
        self.mod_count
    }

    fn icon(&self) -> IconRef {
        self.combined.get_or_build(|| {
            debug!(
                characteristic:? = self.characteristic,
                event_type:? = self.event_type;
                "Building event icon"
            );
            let ring = self.ring_icon.get_or_build(|| {
                icon_factory::event_ring(self.characteristic, self.background, self.outline)
            });
            let mut children = vec![ring];
            if let Some(icon) = self.type_icon() {
                children.push(icon_factory::place_centered(icon, TYPE_ICON_RATIO));
            }
            Icon::combined(children)
        })
    }

    fn outline(&self, layout: Bounds) -> BezPath {
        path::ellipse(layout)
    }

    fn minimum_size(&self) -> Size {
        MIN_EVENT_SIZE
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_throwing_fills_type_icon() {
        let mut style = EventStyle::new();
        style.set_event_type(EventType::Escalation);
        let catching = style.type_icon().unwrap();
        assert!(!catching.any_leaf(&|leaf| leaf.paint().fill().is_some()));

        style.set_characteristic(EventCharacteristic::Throwing);
        let throwing = style.type_icon().unwrap();
        assert!(throwing.any_leaf(&|leaf| leaf.paint().fill().is_some()));
    }

    #[test]
    fn test_characteristic_keeps_type_icon_when_fill_unchanged() {
        let mut style = EventStyle::new();
        style.set_event_type(EventType::Timer);
        let icon = style.type_icon().unwrap();

        style.set_characteristic(EventCharacteristic::Catching);
        assert!(Rc::ptr_eq(&icon, &style.type_icon().unwrap()));
        assert_eq!(style.icon().leaf_count(), 2 + 2);
    }

    #[test]
    fn test_plain_start_event() {
        let style = EventStyle::new();
        assert_eq!(style.characteristic(), EventCharacteristic::Start);
        assert!(style.type_icon().is_none());
        assert_eq!(style.icon().leaf_count(), 1);
    }
}
