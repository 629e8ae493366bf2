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
    set_if_changed, types::GatewayType,
};
use crate::{error::StyleError, insets::InsetsProvider};

const MIN_GATEWAY_SIZE: Size = Size::square(20.0);

/// Share of the smaller side taken by the type icon.
const TYPE_ICON_RATIO: f64 = 0.5;

/// Style of a gateway: a diamond with a centered type icon.
#[derive(Debug, Clone)]
pub struct GatewayStyle {
    gateway_type: GatewayType,
    background: Color,
    outline: Color,
    icon_color: Color,
    insets: Insets,
    mod_count: u64,

    shape_icon: IconSlot,
    type_icon: IconSlot<Option<IconRef>>,
    combined: IconSlot,
}

impl GatewayStyle {
    pub fn new() -> Self {
        Self::with_defaults(StyleDefaults::shared())
    }

    pub fn with_defaults(defaults: &StyleDefaults) -> Self {
        Self {
            gateway_type: GatewayType::default(),
            background: defaults.background(),
            outline: defaults.outline(),
            icon_color: defaults.icon(),
            insets: defaults.insets(),
            mod_count: 0,
            shape_icon: IconSlot::new(),
            type_icon: IconSlot::new(),
            combined: IconSlot::new(),
        }
    }

    pub fn gateway_type(&self) -> GatewayType {
        self.gateway_type
    }

    pub fn set_gateway_type(&mut self, gateway_type: GatewayType) {
        if set_if_changed(&mut self.gateway_type, gateway_type, &mut self.mod_count) {
            self.type_icon.invalidate();
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
        self.type_icon
            .get_or_build(|| icon_factory::gateway_type_icon(self.gateway_type, self.icon_color))
    }
}

impl Default for GatewayStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl InsetsProvider for GatewayStyle {
    fn base_insets(&self) -> Insets {
        self.insets
    }
}

impl ElementStyle for GatewayStyle {
    fn kind(&self) -> ElementKind {
        ElementKind::Gateway
    }

    fn mod_count(&self) -> u64 {
        self.mod_count
    }

    fn icon(&self) -> IconRef {
        self.combined.get_or_build(|| {
            debug!(gateway_type:? = self.gateway_type; "Building gateway icon");
            let shape = self
                .shape_icon
                .get_or_build(|| icon_factory::gateway_shape(self.background, self.outline));
            let mut children = vec![shape];
            if let Some(icon) = self.type_icon() {
                children.push(icon_factory::place_centered(icon, TYPE_ICON_RATIO));
            }
            Icon::combined(children)
        })
    }

    fn outline(&self, layout: Bounds) -> BezPath {
        path::diamond(layout)
    }

    fn minimum_size(&self) -> Size {
        MIN_GATEWAY_SIZE
    }
}
