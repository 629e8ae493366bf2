//! Choreography activities: a task body framed by participant bands, with
//! optional initiating and response messages outside the element.
//!
//! Top participants stack downward from the top edge, bottom participants
//! upward from the bottom edge; in both lists the first participant is the
//! outermost band. The task-name band is what remains in between.

use kurbo::BezPath;
use log::{debug, trace, warn};

use bpmn_style_core::{
    color::Color,
    draw::{Paint, StrokeDefinition},
    geometry::{Bounds, Insets, Point, Size},
    icon::{Extent, Icon, IconRef, LeafShape, Placement},
    path::{self, CornerRadii},
};

use super::{
    ElementKind, ElementStyle, HitTestContext, IconSlot, KeyedIconSlot, Participant,
    ParticipantList, ParticipantListMut, StyleDefaults, check_insets, hit_outline, icon_factory, set_if_changed,
    types::{ChoreographyType, LoopCharacteristic, SubState},
};
use crate::{error::StyleError, insets::InsetsProvider};

/// Size of the envelope of a displayed message.
pub const MESSAGE_SIZE: Size = Size::new(20.0, 14.0);
/// Distance between the element and a displayed message.
pub const MESSAGE_GAP: f64 = 15.0;
/// Extra reach around message tabs when hit-testing.
pub const MESSAGE_HIT_TOLERANCE: f64 = 3.0;

/// Height reserved for the task name when computing the minimum size.
const MIN_TASK_BAND_HEIGHT: f64 = 20.0;
const MIN_CHOREOGRAPHY_WIDTH: f64 = 40.0;

/// Gap between a multi-instance marker and the bottom of its band.
const BAND_MARKER_GAP: f64 = 2.0;

/// Resolved geometry of one participant band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticipantBand {
    top: bool,
    index: usize,
    bounds: Bounds,
    radii: CornerRadii,
    multi_instance: bool,
}

impl ParticipantBand {
    /// Returns `true` for bands of the top participant list.
    pub fn is_top(&self) -> bool {
        self.top
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Corner radii of the band; only outermost bands are rounded.
    pub fn radii(&self) -> CornerRadii {
        self.radii
    }

    pub fn multi_instance(&self) -> bool {
        self.multi_instance
    }

    /// The part of the band left for the participant name, above a
    /// multi-instance marker.
    pub fn label_bounds(&self) -> Bounds {
        let height = self.bounds.height().min(super::PARTICIPANT_SIZE);
        Bounds::from_xywh(
            self.bounds.min_x(),
            self.bounds.min_y(),
            self.bounds.width(),
            height,
        )
    }
}

/// Style of a choreography task or call choreography.
#[derive(Debug, Clone)]
pub struct ChoreographyStyle {
    choreography_type: ChoreographyType,
    loop_characteristic: LoopCharacteristic,
    sub_state: SubState,
    initiating_message: bool,
    response_message: bool,
    initiating_at_top: bool,
    top: ParticipantList,
    bottom: ParticipantList,
    background: Color,
    band_background: Color,
    outline: Color,
    icon_color: Color,
    initiating_fill: Color,
    response_fill: Color,
    corner_radius: f64,
    marker_size: f64,
    insets: Insets,
    mod_count: u64,

    body_icon: IconSlot,
    marker_row: IconSlot<Option<IconRef>>,
    icon: KeyedIconSlot,
}

impl ChoreographyStyle {
    pub fn new() -> Self {
        Self::with_defaults(StyleDefaults::shared())
    }

    pub fn with_defaults(defaults: &StyleDefaults) -> Self {
        Self {
            choreography_type: ChoreographyType::default(),
            loop_characteristic: LoopCharacteristic::default(),
            sub_state: SubState::default(),
            initiating_message: false,
            response_message: false,
            initiating_at_top: true,
            top: ParticipantList::new(),
            bottom: ParticipantList::new(),
            background: defaults.background(),
            band_background: defaults.band_background(),
            outline: defaults.outline(),
            icon_color: defaults.icon(),
            initiating_fill: defaults.initiating_message(),
            response_fill: defaults.response_message(),
            corner_radius: defaults.corner_radius(),
            marker_size: defaults.marker_size(),
            insets: defaults.insets(),
            mod_count: 0,
            body_icon: IconSlot::new(),
            marker_row: IconSlot::new(),
            icon: KeyedIconSlot::new(),
        }
    }

    pub fn choreography_type(&self) -> ChoreographyType {
        self.choreography_type
    }

    pub fn loop_characteristic(&self) -> LoopCharacteristic {
        self.loop_characteristic
    }

    pub fn sub_state(&self) -> SubState {
        self.sub_state
    }

    pub fn initiating_message(&self) -> bool {
        self.initiating_message
    }

    pub fn response_message(&self) -> bool {
        self.response_message
    }

    pub fn initiating_at_top(&self) -> bool {
        self.initiating_at_top
    }

    pub fn corner_radius(&self) -> f64 {
        self.corner_radius
    }

    pub fn top_participants(&self) -> &ParticipantList {
        &self.top
    }

    pub fn bottom_participants(&self) -> &ParticipantList {
        &self.bottom
    }

    /// Edit access to the top list. Edits show up in
    /// [`ElementStyle::mod_count`] through the list's aggregate counter.
    pub fn top_participants_mut(&mut self) -> ParticipantListMut<'_> {
        ParticipantListMut::new(&mut self.top)
    }

    pub fn bottom_participants_mut(&mut self) -> ParticipantListMut<'_> {
        ParticipantListMut::new(&mut self.bottom)
    }

    /// Replaces the top (`true`) or bottom list.
    ///
    /// The old list's aggregate plus one is folded into the style's own
    /// counter, so [`ElementStyle::mod_count`] still grows.
    pub fn set_participants(&mut self, top: bool, participants: ParticipantList) {
        let list = if top { &mut self.top } else { &mut self.bottom };
        let previous = std::mem::replace(list, participants);
        self.mod_count += previous.mod_count() + 1;
        trace!(top, len = self.participants(top).len(); "Replaced participant list");
    }

    pub fn participants(&self, top: bool) -> &ParticipantList {
        if top { &self.top } else { &self.bottom }
    }

    pub fn participant(&self, top: bool, index: usize) -> Option<&Participant> {
        self.participants(top).get(index)
    }

    pub fn set_choreography_type(&mut self, choreography_type: ChoreographyType) {
        if set_if_changed(
            &mut self.choreography_type,
            choreography_type,
            &mut self.mod_count,
        ) {
            self.body_icon.invalidate();
        }
    }

    pub fn set_loop_characteristic(&mut self, characteristic: LoopCharacteristic) {
        if set_if_changed(
            &mut self.loop_characteristic,
            characteristic,
            &mut self.mod_count,
        ) {
            self.marker_row.invalidate();
        }
    }

    pub fn set_sub_state(&mut self, sub_state: SubState) {
        if set_if_changed(&mut self.sub_state, sub_state, &mut self.mod_count) {
            self.marker_row.invalidate();
        }
    }

    pub fn set_initiating_message(&mut self, shown: bool) {
        set_if_changed(&mut self.initiating_message, shown, &mut self.mod_count);
    }

    pub fn set_response_message(&mut self, shown: bool) {
        set_if_changed(&mut self.response_message, shown, &mut self.mod_count);
    }

    /// Moves the initiating participant, and with it the initiating message,
    /// to the top (`true`) or bottom of the element.
    pub fn set_initiating_at_top(&mut self, at_top: bool) {
        set_if_changed(&mut self.initiating_at_top, at_top, &mut self.mod_count);
    }

    pub fn set_background(&mut self, color: Color) {
        if set_if_changed(&mut self.background, color, &mut self.mod_count) {
            self.body_icon.invalidate();
        }
    }

    pub fn set_band_background(&mut self, color: Color) {
        set_if_changed(&mut self.band_background, color, &mut self.mod_count);
    }

    pub fn set_outline(&mut self, color: Color) {
        if set_if_changed(&mut self.outline, color, &mut self.mod_count) {
            self.body_icon.invalidate();
        }
    }

    pub fn set_icon_color(&mut self, color: Color) {
        if set_if_changed(&mut self.icon_color, color, &mut self.mod_count) {
            self.marker_row.invalidate();
        }
    }

    /// Sets the envelope fills of initiating and response messages.
    pub fn set_message_fills(&mut self, initiating: Color, response: Color) {
        if (self.initiating_fill, self.response_fill) != (initiating, response) {
            self.initiating_fill = initiating;
            self.response_fill = response;
            self.mod_count += 1;
        }
    }

    /// # Errors
    ///
    /// Returns [`StyleError::InvalidParameter`] for a negative or non-finite
    /// radius.
    pub fn set_corner_radius(&mut self, radius: f64) -> Result<(), StyleError> {
        let radius = StyleError::check_length("corner radius", radius)?;
        if set_if_changed(&mut self.corner_radius, radius, &mut self.mod_count) {
            self.body_icon.invalidate();
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
            self.marker_row.invalidate();
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

    /// Returns `true` if a message is drawn above the element.
    pub fn top_message_visible(&self) -> bool {
        (self.initiating_message && self.initiating_at_top)
            || (self.response_message && !self.initiating_at_top)
    }

    /// Returns `true` if a message is drawn below the element.
    pub fn bottom_message_visible(&self) -> bool {
        (self.initiating_message && !self.initiating_at_top)
            || (self.response_message && self.initiating_at_top)
    }

    fn message_visible(&self, top: bool) -> bool {
        if top {
            self.top_message_visible()
        } else {
            self.bottom_message_visible()
        }
    }

    /// The message on the initiating side is the initiating message.
    fn message_fill(&self, top: bool) -> Color {
        if top == self.initiating_at_top {
            self.initiating_fill
        } else {
            self.response_fill
        }
    }

    /// The area between the participant stacks.
    pub fn task_band_bounds(&self, layout: Bounds) -> Bounds {
        let layout = layout.normalized();
        let top = self.top.total_size();
        let bottom = self.bottom.total_size();
        Bounds::from_xywh(
            layout.min_x(),
            layout.min_y() + top,
            layout.width(),
            (layout.height() - top - bottom).max(0.0),
        )
    }

    /// Geometry of the band at `index` of the top or bottom list.
    pub fn band(&self, layout: Bounds, top: bool, index: usize) -> Option<ParticipantBand> {
        let layout = layout.normalized();
        let list = self.participants(top);
        let participant = list.get(index)?;
        let offset = list.offset_of(index)?;
        let size = participant.size();

        let (y, radii) = if top {
            let radii = if index == 0 {
                CornerRadii::top(self.corner_radius)
            } else {
                CornerRadii::default()
            };
            (layout.min_y() + offset, radii)
        } else {
            let radii = if index == 0 {
                CornerRadii::bottom(self.corner_radius)
            } else {
                CornerRadii::default()
            };
            (layout.max_y() - offset - size, radii)
        };

        let band = ParticipantBand {
            top,
            index,
            bounds: Bounds::from_xywh(layout.min_x(), y, layout.width(), size),
            radii,
            multi_instance: participant.multi_instance(),
        };
        trace!(top, index, bounds:? = band.bounds; "Resolved participant band");
        Some(band)
    }

    /// Every band, top list first, each list from the outermost band inward.
    pub fn bands(&self, layout: Bounds) -> Vec<ParticipantBand> {
        let top = (0..self.top.len()).filter_map(|index| self.band(layout, true, index));
        let bottom = (0..self.bottom.len()).filter_map(|index| self.band(layout, false, index));
        top.chain(bottom).collect()
    }

    /// Envelope bounds of the message above (`top`) or below the element, if
    /// that message is displayed.
    pub fn message_bounds(&self, layout: Bounds, top: bool) -> Option<Bounds> {
        if !self.message_visible(top) {
            return None;
        }
        let placement = if top {
            Placement::above(MESSAGE_GAP, MESSAGE_SIZE)
        } else {
            Placement::below(MESSAGE_GAP, MESSAGE_SIZE)
        };
        Some(placement.resolve(layout, None))
    }

    /// The message envelope together with the gap connecting it to the
    /// element.
    fn message_tab(&self, layout: Bounds, top: bool) -> Option<Bounds> {
        let envelope = self.message_bounds(layout, top)?;
        let layout = layout.normalized();
        let tab = if top {
            Bounds::new(
                envelope.min_x(),
                envelope.min_y(),
                envelope.max_x(),
                layout.min_y(),
            )
        } else {
            Bounds::new(
                envelope.min_x(),
                layout.max_y(),
                envelope.max_x(),
                envelope.max_y(),
            )
        };
        Some(tab)
    }

    fn body_icon(&self) -> IconRef {
        self.body_icon.get_or_build(|| {
            let stroke = match self.choreography_type {
                ChoreographyType::Task => StrokeDefinition::solid(self.outline),
                ChoreographyType::Call => StrokeDefinition::thick(self.outline),
            };
            Icon::leaf(
                LeafShape::RoundedRectangle(CornerRadii::uniform(self.corner_radius)),
                Paint::filled_and_stroked(self.background, stroke),
            )
        })
    }

    fn marker_row(&self) -> Option<IconRef> {
        self.marker_row.get_or_build(|| {
            let markers: Vec<IconRef> = [
                icon_factory::loop_marker(self.loop_characteristic, self.icon_color),
                icon_factory::sub_state_marker(self.sub_state, self.icon_color),
            ]
            .into_iter()
            .flatten()
            .collect();
            if markers.is_empty() {
                return None;
            }
            match icon_factory::marker_row(markers, self.marker_size) {
                Ok(row) => Some(row),
                Err(err) => {
                    warn!(err:%; "Dropping choreography marker row");
                    None
                }
            }
        })
    }

    fn band_icon(&self, participant: &Participant, radii: CornerRadii) -> IconRef {
        let band = Icon::leaf(
            LeafShape::RoundedRectangle(radii),
            Paint::filled_and_stroked(self.band_background, StrokeDefinition::solid(self.outline)),
        );
        if !participant.multi_instance() {
            return band;
        }
        Icon::combined(vec![
            band,
            Icon::placed(
                icon_factory::collection_marker(self.icon_color),
                Placement::south(BAND_MARKER_GAP, Size::square(self.marker_size)),
            ),
        ])
    }

    fn band_icons(&self) -> Vec<IconRef> {
        let mut icons = Vec::with_capacity(self.top.len() + self.bottom.len());
        let mut offset = 0.0;
        for (index, participant) in self.top.iter().enumerate() {
            let radii = if index == 0 {
                CornerRadii::top(self.corner_radius)
            } else {
                CornerRadii::default()
            };
            icons.push(Icon::placed(
                self.band_icon(participant, radii),
                Placement::top_band(offset, participant.size()),
            ));
            offset += participant.size();
        }
        let mut offset = 0.0;
        for (index, participant) in self.bottom.iter().enumerate() {
            let radii = if index == 0 {
                CornerRadii::bottom(self.corner_radius)
            } else {
                CornerRadii::default()
            };
            icons.push(Icon::placed(
                self.band_icon(participant, radii),
                Placement::bottom_band(offset, participant.size()),
            ));
            offset += participant.size();
        }
        icons
    }

    /// Places `icon` in the task band of whatever layout the tree is
    /// arranged in.
    fn in_task_band(&self, icon: IconRef) -> IconRef {
        let top = self.top.total_size();
        let bottom = self.bottom.total_size();
        Icon::placed(
            icon,
            Placement::new(
                (0.0, 0.0),
                (0.0, 0.0),
                Extent::Relative(1.0),
                Extent::Shrink(top + bottom),
            )
            .with_offset(Point::new(0.0, top)),
        )
    }

    fn message_icon(&self, top: bool) -> IconRef {
        let envelope = icon_factory::message_shape(self.message_fill(top), self.outline);
        let connector = Icon::leaf(
            LeafShape::Segment {
                from: (0.5, 0.0),
                to: (0.5, 1.0),
            },
            Paint::stroked(StrokeDefinition::dotted(self.outline)),
        );
        let line_size = Size::new(0.0, MESSAGE_GAP);
        let (envelope_placement, line_placement) = if top {
            (
                Placement::above(MESSAGE_GAP, MESSAGE_SIZE),
                Placement::above(0.0, line_size),
            )
        } else {
            (
                Placement::below(MESSAGE_GAP, MESSAGE_SIZE),
                Placement::below(0.0, line_size),
            )
        };
        Icon::combined(vec![
            Icon::placed(connector, line_placement),
            Icon::placed(envelope, envelope_placement),
        ])
    }

    fn build_icon(&self) -> IconRef {
        let mut children = vec![self.body_icon()];
        children.extend(self.band_icons());
        if let Some(row) = self.marker_row() {
            children.push(self.in_task_band(icon_factory::place_marker_row(row)));
        }
        for top in [true, false] {
            if self.message_visible(top) {
                children.push(self.message_icon(top));
            }
        }
        Icon::combined(children)
    }
}

impl Default for ChoreographyStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl InsetsProvider for ChoreographyStyle {
    fn base_insets(&self) -> Insets {
        self.insets
    }

    /// Participant bands take exactly their summed sizes. The marker row
    /// shares the task band with the name and adds nothing.
    fn feature_insets(&self) -> Insets {
        Insets::default()
            .with_top(self.top.total_size())
            .with_bottom(self.bottom.total_size())
    }
}

impl ElementStyle for ChoreographyStyle {
    fn kind(&self) -> ElementKind {
        ElementKind::Choreography
    }

    /// Own changes plus both participant lists' aggregates.
    fn mod_count(&self) -> u64 {
        self.mod_count + self.top.mod_count() + self.bottom.mod_count()
    }

    fn icon(&self) -> IconRef {
        let key = self.mod_count();
        self.icon.get_or_build(key, || {
            debug!(
                mod_count = key,
                top = self.top.len(),
                bottom = self.bottom.len();
                "Building choreography icon"
            );
            self.build_icon()
        })
    }

    /// Rounded body plus a rectangular tab toward each displayed message.
    fn outline(&self, layout: Bounds) -> BezPath {
        let mut outline = path::rounded_rectangle(layout, self.corner_radius);
        for top in [true, false] {
            if let Some(tab) = self.message_tab(layout, top) {
                outline.extend(path::rectangle(tab).elements().iter().copied());
            }
        }
        outline
    }

    fn bounds(&self, layout: Bounds) -> Bounds {
        let mut bounds = layout.normalized();
        for top in [true, false] {
            if let Some(envelope) = self.message_bounds(layout, top) {
                bounds = bounds.merge(envelope);
            }
        }
        bounds
    }

    fn minimum_size(&self) -> Size {
        let markers = usize::from(self.loop_characteristic != LoopCharacteristic::None)
            + usize::from(self.sub_state != SubState::None);
        let row_width = if markers == 0 {
            0.0
        } else {
            2.0 * icon_factory::MARKER_GAP
                + markers as f64 * (self.marker_size + icon_factory::MARKER_SPACING)
        };
        Size::new(
            MIN_CHOREOGRAPHY_WIDTH.max(row_width),
            self.top.total_size() + self.bottom.total_size() + MIN_TASK_BAND_HEIGHT,
        )
    }

    /// The body is tested with the caller's tolerance, message tabs with
    /// [`MESSAGE_HIT_TOLERANCE`] on top of it.
    fn is_hit(&self, context: &HitTestContext, point: Point, layout: Bounds) -> bool {
        let body = path::rounded_rectangle(layout, self.corner_radius);
        if hit_outline(&body, context, point) {
            return true;
        }
        let reach = context.tolerance() + MESSAGE_HIT_TOLERANCE;
        [true, false]
            .into_iter()
            .filter_map(|top| self.message_tab(layout, top))
            .any(|tab| tab.expand(reach).contains(point))
    }
}
