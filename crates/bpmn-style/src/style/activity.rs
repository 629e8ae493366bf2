//! Tasks, sub-processes, transactions and call activities.

use kurbo::BezPath;
use log::{debug, warn};

use bpmn_style_core::{
    color::Color,
    geometry::{Bounds, Insets, Size},
    icon::{Icon, IconRef},
    path,
};

use super::{
    ElementKind, ElementStyle, IconSlot, StyleDefaults, check_insets, icon_factory,
    set_if_changed,
    types::{ActivityType, LoopCharacteristic, SubState, TaskType},
};
use crate::{error::StyleError, insets::InsetsProvider};

/// Minimum layout size of an activity without markers.
pub const MIN_ACTIVITY_SIZE: Size = Size::new(40.0, 40.0);

/// Horizontal room around a marker row when computing the minimum width.
const MARKER_ROW_MARGIN: f64 = 10.0;

/// Style of an activity.
///
/// The icon is a rounded body, an optional task-type icon in the north-west
/// corner and a centered row of markers along the bottom edge, in that paint
/// order. Markers appear in the order loop, ad-hoc, compensation, sub-state.
#[derive(Debug, Clone)]
pub struct ActivityStyle {
    activity_type: ActivityType,
    task_type: TaskType,
    loop_characteristic: LoopCharacteristic,
    sub_state: SubState,
    ad_hoc: bool,
    compensation: bool,
    background: Color,
    outline: Color,
    icon_color: Color,
    corner_radius: f64,
    marker_size: f64,
    minimum_size: Size,
    insets: Insets,
    mod_count: u64,

    shape_icon: IconSlot,
    type_icon: IconSlot<Option<IconRef>>,
    loop_icon: IconSlot<Option<IconRef>>,
    ad_hoc_icon: IconSlot,
    compensation_icon: IconSlot,
    sub_state_icon: IconSlot<Option<IconRef>>,
    marker_row: IconSlot<Option<IconRef>>,
    combined: IconSlot,
}

impl ActivityStyle {
    /// Creates a task with the built-in defaults.
    pub fn new() -> Self {
        Self::with_defaults(StyleDefaults::shared())
    }

    pub fn with_defaults(defaults: &StyleDefaults) -> Self {
        Self {
            activity_type: ActivityType::default(),
            task_type: TaskType::default(),
            loop_characteristic: LoopCharacteristic::default(),
            sub_state: SubState::default(),
            ad_hoc: false,
            compensation: false,
            background: defaults.background(),
            outline: defaults.outline(),
            icon_color: defaults.icon(),
            corner_radius: defaults.corner_radius(),
            marker_size: defaults.marker_size(),
            minimum_size: MIN_ACTIVITY_SIZE,
            insets: defaults.insets(),
            mod_count: 0,
            shape_icon: IconSlot::new(),
            type_icon: IconSlot::new(),
            loop_icon: IconSlot::new(),
            ad_hoc_icon: IconSlot::new(),
            compensation_icon: IconSlot::new(),
            sub_state_icon: IconSlot::new(),
            marker_row: IconSlot::new(),
            combined: IconSlot::new(),
        }
    }

    pub fn activity_type(&self) -> ActivityType {
        self.activity_type
    }

    pub fn task_type(&self) -> TaskType {
        self.task_type
    }

    pub fn loop_characteristic(&self) -> LoopCharacteristic {
        self.loop_characteristic
    }

    pub fn sub_state(&self) -> SubState {
        self.sub_state
    }

    pub fn ad_hoc(&self) -> bool {
        self.ad_hoc
    }

    pub fn compensation(&self) -> bool {
        self.compensation
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn outline_color(&self) -> Color {
        self.outline
    }

    pub fn icon_color(&self) -> Color {
        self.icon_color
    }

    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    pub fn marker_size(&self) -> f64 {
        self.marker_size
    }

    pub fn set_activity_type(&mut self, activity_type: ActivityType) {
        if set_if_changed(&mut self.activity_type, activity_type, &mut self.mod_count) {
            self.shape_icon.invalidate();
            self.combined.invalidate();
        }
    }

    pub fn set_task_type(&mut self, task_type: TaskType) {
        if set_if_changed(&mut self.task_type, task_type, &mut self.mod_count) {
            self.type_icon.invalidate();
            self.combined.invalidate();
        }
    }

    pub fn set_loop_characteristic(&mut self, characteristic: LoopCharacteristic) {
        if set_if_changed(
            &mut self.loop_characteristic,
            characteristic,
            &mut self.mod_count,
        ) {
            self.loop_icon.invalidate();
            self.invalidate_marker_row();
        }
    }

    pub fn set_sub_state(&mut self, sub_state: SubState) {
        if set_if_changed(&mut self.sub_state, sub_state, &mut self.mod_count) {
            self.sub_state_icon.invalidate();
            self.invalidate_marker_row();
        }
    }

    pub fn set_ad_hoc(&mut self, ad_hoc: bool) {
        if set_if_changed(&mut self.ad_hoc, ad_hoc, &mut self.mod_count) {
            self.invalidate_marker_row();
        }
    }

    pub fn set_compensation(&mut self, compensation: bool) {
        if set_if_changed(&mut self.compensation, compensation, &mut self.mod_count) {
            self.invalidate_marker_row();
        }
    }

    pub fn set_background(&mut self, color: Color) {
        if set_if_changed(&mut self.background, color, &mut self.mod_count) {
            // the send-task envelope flap is drawn in the background color
            self.shape_icon.invalidate();
            self.type_icon.invalidate();
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
            self.loop_icon.invalidate();
            self.ad_hoc_icon.invalidate();
            self.compensation_icon.invalidate();
            self.sub_state_icon.invalidate();
            self.invalidate_marker_row();
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
            self.combined.invalidate();
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`StyleError::InvalidParameter`] for a negative or non-finite
    /// size.
    pub fn set_marker_size(&mut self, size: f64) -> Result<(), StyleError> {
        let size = StyleError::check_length("marker size", size)?;
        if set_if_changed(&mut self.marker_size, size, &mut self.mod_count) {
            self.invalidate_marker_row();
        }
        Ok(())
    }

    /// Sets the minimum size floor that markers can only widen.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::InvalidParameter`] for negative or non-finite
    /// dimensions.
    pub fn set_minimum_size(&mut self, size: Size) -> Result<(), StyleError> {
        StyleError::check_length("minimum width", size.width())?;
        StyleError::check_length("minimum height", size.height())?;
        set_if_changed(&mut self.minimum_size, size, &mut self.mod_count);
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

    fn invalidate_marker_row(&self) {
        self.marker_row.invalidate();
        self.combined.invalidate();
    }

    /// Number of markers currently shown.
    pub fn marker_count(&self) -> usize {
        [
            self.loop_characteristic != LoopCharacteristic::None,
            self.ad_hoc,
            self.compensation,
            self.sub_state != SubState::None,
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// The rounded body.
    pub fn shape_icon(&self) -> IconRef {
        self.shape_icon.get_or_build(|| {
            icon_factory::activity_shape(
                self.activity_type,
                self.background,
                self.outline,
                self.corner_radius,
            )
        })
    }

    /// The task-type icon, unplaced.
    pub fn type_icon(&self) -> Option<IconRef> {
        self.type_icon.get_or_build(|| {
            icon_factory::task_type_icon(self.task_type, self.icon_color, self.background)
        })
    }

    /// The active markers, unplaced, in row order.
    pub fn marker_icons(&self) -> Vec<IconRef> {
        let mut markers = Vec::with_capacity(4);
        if let Some(icon) = self.loop_icon.get_or_build(|| {
            icon_factory::loop_marker(self.loop_characteristic, self.icon_color)
        }) {
            markers.push(icon);
        }
        if self.ad_hoc {
            markers.push(
                self.ad_hoc_icon
                    .get_or_build(|| icon_factory::ad_hoc_marker(self.icon_color)),
            );
        }
        if self.compensation {
            markers.push(
                self.compensation_icon
                    .get_or_build(|| icon_factory::compensation_marker(self.icon_color)),
            );
        }
        if let Some(icon) = self
            .sub_state_icon
            .get_or_build(|| icon_factory::sub_state_marker(self.sub_state, self.icon_color))
        {
            markers.push(icon);
        }
        markers
    }

    /// The marker row, or `None` without active markers.
    pub fn marker_row(&self) -> Option<IconRef> {
        self.marker_row.get_or_build(|| {
            let markers = self.marker_icons();
            if markers.is_empty() {
                return None;
            }
            match icon_factory::marker_row(markers, self.marker_size) {
                Ok(row) => Some(row),
                Err(err) => {
                    warn!(err:%; "Dropping activity marker row");
                    None
                }
            }
        })
    }
}

impl Default for ActivityStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl InsetsProvider for ActivityStyle {
    fn base_insets(&self) -> Insets {
        self.insets
    }

    /// The task-type icon takes room on the left, the marker row at the
    /// bottom.
    fn feature_insets(&self) -> Insets {
        let mut insets = Insets::default();
        if self.task_type != TaskType::Abstract {
            insets = insets.with_left(icon_factory::TYPE_ICON_OFFSET + icon_factory::TYPE_ICON_SIZE);
        }
        if self.marker_count() > 0 {
            insets = insets.with_bottom(self.marker_size + icon_factory::MARKER_GAP);
        }
        insets
    }
}

impl ElementStyle for ActivityStyle {
    fn kind(&self) -> ElementKind {
        ElementKind::Activity
    }

    fn mod_count(&self) -> u64 {
        self.mod_count
    }

    fn icon(&self) -> IconRef {
        self.combined.get_or_build(|| {
            debug!(
                mod_count = self.mod_count,
                markers = self.marker_count();
                "Building activity icon"
            );
            let mut children = vec![self.shape_icon()];
            if let Some(icon) = self.type_icon() {
                children.push(icon_factory::place_type_icon(icon));
            }
            if let Some(row) = self.marker_row() {
                children.push(icon_factory::place_marker_row(row));
            }
            Icon::combined(children)
        })
    }

    fn outline(&self, layout: Bounds) -> BezPath {
        path::rounded_rectangle(layout, self.corner_radius)
    }

    /// The floor widened to fit the marker row:
    /// `max(floor, 10 + n * (marker_size + 5))`.
    fn minimum_size(&self) -> Size {
        let count = self.marker_count();
        if count == 0 {
            return self.minimum_size;
        }
        let row_width = MARKER_ROW_MARGIN
            + count as f64 * (self.marker_size + icon_factory::MARKER_SPACING);
        self.minimum_size
            .with_width(self.minimum_size.width().max(row_width))
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use float_cmp::assert_approx_eq;

    use bpmn_style_core::icon::glyph;

    use super::*;

    fn fully_marked(marker_size: f64) -> ActivityStyle {
        let mut style = ActivityStyle::new();
        style.set_marker_size(marker_size).unwrap();
        style.set_loop_characteristic(LoopCharacteristic::Loop);
        style.set_ad_hoc(true);
        style.set_compensation(true);
        style.set_sub_state(SubState::Collapsed);
        style
    }

    #[test]
    fn test_marker_width_accumulation() {
        let style = fully_marked(14.0);
        assert_eq!(style.marker_count(), 4);
        assert_approx_eq!(f64, style.minimum_size().width(), 40f64.max(10.0 + 4.0 * 19.0));
        assert_approx_eq!(f64, style.minimum_size().width(), 86.0);
    }

    #[test]
    fn test_minimum_size_floor_without_markers() {
        let style = ActivityStyle::new();
        assert_eq!(style.minimum_size(), MIN_ACTIVITY_SIZE);

        let mut style = ActivityStyle::new();
        style.set_ad_hoc(true);
        // 10 + 1 * 15 stays below the floor
        assert_approx_eq!(f64, style.minimum_size().width(), 40.0);
    }

    #[test]
    fn test_ad_hoc_toggle() {
        let mut style = ActivityStyle::new();
        let start = style.mod_count();

        style.set_ad_hoc(true);
        style.set_ad_hoc(false);
        style.set_ad_hoc(true);

        assert_eq!(style.mod_count() - start, 3);
        let icon = style.icon();
        assert!(icon.any_leaf(&|leaf| leaf.is_glyph(&glyph::TILDE)));
    }

    #[test]
    fn test_setting_same_value_is_not_a_change() {
        let mut style = ActivityStyle::new();
        style.set_ad_hoc(false);
        style.set_task_type(TaskType::Abstract);
        style.set_corner_radius(style.corner_radius()).unwrap();
        assert_eq!(style.mod_count(), 0);
    }

    #[test]
    fn test_clean_reads_are_idempotent() {
        let style = fully_marked(10.0);
        let count = style.mod_count();
        let first = style.icon();
        let second = style.icon();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(first, second);
        assert_eq!(style.mod_count(), count);

        let layout = Bounds::from_xywh(0.0, 0.0, 100.0, 60.0);
        assert_eq!(style.outline(layout), style.outline(layout));
    }

    #[test]
    fn test_outline_color_keeps_marker_icons() {
        let mut style = fully_marked(10.0);
        let shape = style.shape_icon();
        let markers = style.marker_icons();
        let icon = style.icon();

        style.set_outline(Color::new("#ff0000").unwrap());
        assert_eq!(style.outline_color(), Color::new("#ff0000").unwrap());

        assert!(!Rc::ptr_eq(&shape, &style.shape_icon()));
        assert!(!Rc::ptr_eq(&icon, &style.icon()));
        for (before, after) in markers.iter().zip(style.marker_icons()) {
            assert!(Rc::ptr_eq(before, &after));
        }
    }

    #[test]
    fn test_icon_paint_order() {
        let mut style = ActivityStyle::new();
        style.set_task_type(TaskType::Service);
        style.set_ad_hoc(true);
        let layout = Bounds::from_xywh(0.0, 0.0, 100.0, 60.0);
        let icon = style.icon();
        let leaves = icon.arranged_leaves(layout);

        assert_eq!(leaves.len(), 3);
        assert_eq!(leaves[0].1, layout);
        assert!(leaves[1].0.is_glyph(&glyph::GEAR));
        assert_eq!(leaves[1].1, Bounds::from_xywh(5.0, 5.0, 16.0, 16.0));
        assert!(leaves[2].0.is_glyph(&glyph::TILDE));
        assert_eq!(leaves[2].1, Bounds::from_xywh(45.0, 45.0, 10.0, 10.0));
    }

    #[test]
    fn test_feature_insets() {
        let mut style = ActivityStyle::new();
        assert_eq!(style.insets(), Insets::uniform(5.0));

        style.set_task_type(TaskType::User);
        style.set_loop_characteristic(LoopCharacteristic::Sequential);
        assert_eq!(style.insets(), Insets::new(5.0, 5.0, 20.0, 26.0));
    }

    #[test]
    fn test_rejects_invalid_values() {
        let mut style = ActivityStyle::new();
        assert!(style.set_corner_radius(-1.0).is_err());
        assert!(style.set_marker_size(f64::INFINITY).is_err());
        assert!(style.set_insets(Insets::new(0.0, -1.0, 0.0, 0.0)).is_err());
        assert!(style.set_minimum_size(Size::new(-5.0, 10.0)).is_err());
        assert_eq!(style.mod_count(), 0);
    }

    #[test]
    fn test_transaction_outline_hit() {
        let mut style = ActivityStyle::new();
        style.set_activity_type(ActivityType::Transaction);
        let layout = Bounds::from_xywh(0.0, 0.0, 100.0, 60.0);
        assert_eq!(style.icon().leaf_count(), 2);
        assert!(style.is_hit(&Default::default(), layout.center(), layout));
    }
}
