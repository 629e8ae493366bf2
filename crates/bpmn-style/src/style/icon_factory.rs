//! Builders for the icons BPMN styles are composed of.
//!
//! Every function returns a fresh immutable tree. Styles cache the results
//! and combine them into their full icon.

use bpmn_style_core::{
    color::Color,
    draw::{Paint, StrokeDefinition},
    error::CoreError,
    geometry::{Point, Side, Size},
    icon::{Alignment, Extent, Icon, IconRef, LeafShape, Placement, glyph},
    path::{CornerRadii, UnitPath},
};

use super::types::{
    ActivityType, AnnotationSide, ConversationType, DataType, EventCharacteristic, EventType,
    GatewayType, LoopCharacteristic, SubState, TaskType,
};

/// Gap between the two borders of transactions and intermediate events.
pub const DOUBLE_BORDER_GAP: f64 = 3.0;
/// Horizontal gap between markers of a marker row.
pub const MARKER_SPACING: f64 = 5.0;
/// Distance between a marker row and the bottom edge of its element.
pub const MARKER_GAP: f64 = 5.0;
/// Size of the task-type icon.
pub const TYPE_ICON_SIZE: f64 = 16.0;
/// Offset of the task-type icon from the top-left corner.
pub const TYPE_ICON_OFFSET: f64 = 5.0;
/// Cut-off corner of data objects.
pub const DATA_OBJECT_FOLD: f64 = 10.0;
/// Length of the horizontal arms of annotation brackets.
pub const ANNOTATION_ARM: f64 = 8.0;

fn solid(color: Color) -> StrokeDefinition {
    StrokeDefinition::solid(color)
}

/// A glyph drawn with a one-pixel stroke.
pub fn stroked_glyph(template: &'static UnitPath, color: Color) -> IconRef {
    Icon::leaf(LeafShape::Glyph(template), Paint::stroked(solid(color)))
}

/// A glyph filled and outlined with the same color.
pub fn filled_glyph(template: &'static UnitPath, color: Color) -> IconRef {
    Icon::leaf(
        LeafShape::Glyph(template),
        Paint::filled_and_stroked(color, solid(color)),
    )
}

/// A glyph filled when `filled` is set, outlined otherwise.
fn glyph_icon(template: &'static UnitPath, color: Color, filled: bool) -> IconRef {
    if filled {
        filled_glyph(template, color)
    } else {
        stroked_glyph(template, color)
    }
}

/// Message envelope: a rectangle with a closing flap.
///
/// `fill` of `None` leaves the body transparent.
pub fn envelope(fill: Option<Color>, outline: Color, flap: Color) -> IconRef {
    Icon::combined(vec![
        Icon::leaf(LeafShape::Rectangle, Paint::new(fill, Some(solid(outline)))),
        stroked_glyph(&glyph::ENVELOPE_FLAP, flap),
    ])
}

/// A small square frame with a glyph inside, as used by the collapsed
/// sub-process marker.
fn framed(template: &'static UnitPath, color: Color) -> IconRef {
    Icon::combined(vec![
        Icon::leaf(LeafShape::Rectangle, Paint::stroked(solid(color))),
        Icon::placed(stroked_glyph(template, color), Placement::inset(2.0)),
    ])
}

/// Rounded activity body, bordered according to the activity type.
pub fn activity_shape(
    activity_type: ActivityType,
    background: Color,
    outline: Color,
    corner_radius: f64,
) -> IconRef {
    let radii = CornerRadii::uniform(corner_radius);
    let body = |stroke: StrokeDefinition| {
        Icon::leaf(
            LeafShape::RoundedRectangle(radii),
            Paint::filled_and_stroked(background, stroke),
        )
    };

    match activity_type {
        ActivityType::Task | ActivityType::SubProcess => body(solid(outline)),
        ActivityType::Transaction => Icon::combined(vec![
            body(solid(outline)),
            Icon::placed(
                Icon::leaf(
                    LeafShape::RoundedRectangle(CornerRadii::uniform(
                        (corner_radius - DOUBLE_BORDER_GAP).max(0.0),
                    )),
                    Paint::stroked(solid(outline)),
                ),
                Placement::inset(DOUBLE_BORDER_GAP),
            ),
        ]),
        ActivityType::EventSubProcess => body(StrokeDefinition::dotted(outline)),
        ActivityType::CallActivity => body(StrokeDefinition::thick(outline)),
    }
}

/// Task-type icon, or `None` for abstract tasks.
pub fn task_type_icon(task_type: TaskType, color: Color, background: Color) -> Option<IconRef> {
    let icon = match task_type {
        TaskType::Abstract => return None,
        TaskType::Send => envelope(Some(color), color, background),
        TaskType::Receive => envelope(None, color, color),
        TaskType::User => Icon::leaf(
            LeafShape::Glyph(&glyph::USER),
            Paint::filled_and_stroked(background, solid(color)),
        ),
        TaskType::Manual => stroked_glyph(&glyph::HAND, color),
        TaskType::BusinessRule => Icon::combined(vec![
            Icon::leaf(
                LeafShape::Glyph(&glyph::TABLE_HEADER),
                Paint::filled(color.with_alpha(0.4)),
            ),
            stroked_glyph(&glyph::TABLE, color),
        ]),
        TaskType::Service => Icon::leaf(
            LeafShape::Glyph(&glyph::GEAR),
            Paint::filled_and_stroked(background, solid(color)),
        ),
        TaskType::Script => stroked_glyph(&glyph::SCROLL, color),
    };
    Some(icon)
}

/// Loop marker, or `None` without a loop characteristic.
pub fn loop_marker(characteristic: LoopCharacteristic, color: Color) -> Option<IconRef> {
    match characteristic {
        LoopCharacteristic::None => None,
        LoopCharacteristic::Loop => Some(stroked_glyph(&glyph::LOOP, color)),
        LoopCharacteristic::Parallel => Some(filled_glyph(&glyph::PARALLEL_BARS, color)),
        LoopCharacteristic::Sequential => Some(filled_glyph(&glyph::SEQUENTIAL_BARS, color)),
    }
}

pub fn ad_hoc_marker(color: Color) -> IconRef {
    stroked_glyph(&glyph::TILDE, color)
}

pub fn compensation_marker(color: Color) -> IconRef {
    stroked_glyph(&glyph::COMPENSATION, color)
}

/// Plus marker for collapsed, minus marker for expanded elements.
pub fn sub_state_marker(sub_state: SubState, color: Color) -> Option<IconRef> {
    match sub_state {
        SubState::None => None,
        SubState::Collapsed => Some(framed(&glyph::PLUS, color)),
        SubState::Expanded => Some(framed(&glyph::MINUS, color)),
    }
}

/// Horizontally centered row of square markers.
///
/// # Errors
///
/// Returns [`CoreError::InvalidValue`] if `marker_size` is negative.
pub fn marker_row(markers: Vec<IconRef>, marker_size: f64) -> Result<IconRef, CoreError> {
    Icon::line_up(
        markers,
        Size::square(marker_size),
        MARKER_SPACING,
        Alignment::Center,
    )
}

/// Places a marker row `MARKER_GAP` above the bottom edge at its natural size.
pub fn place_marker_row(row: IconRef) -> IconRef {
    Icon::placed(
        row,
        Placement::south_with(MARKER_GAP, Extent::Inherit, Extent::Inherit),
    )
}

/// Places a task-type icon in the north-west corner.
pub fn place_type_icon(icon: IconRef) -> IconRef {
    Icon::placed(
        icon,
        Placement::north_west(
            Point::new(TYPE_ICON_OFFSET, TYPE_ICON_OFFSET),
            Size::square(TYPE_ICON_SIZE),
        ),
    )
}

/// Places an icon centered, at `ratio` of the smaller element side.
pub fn place_centered(icon: IconRef, ratio: f64) -> IconRef {
    Icon::placed(
        icon,
        Placement::center(Extent::MinSide(ratio), Extent::MinSide(ratio)),
    )
}

pub fn gateway_shape(background: Color, outline: Color) -> IconRef {
    Icon::leaf(
        LeafShape::Diamond,
        Paint::filled_and_stroked(background, solid(outline)),
    )
}

/// Gateway type icon, or `None` for exclusive gateways without marker.
pub fn gateway_type_icon(gateway_type: GatewayType, color: Color) -> Option<IconRef> {
    let ring = || Icon::leaf(LeafShape::Ellipse, Paint::stroked(solid(color)));
    let inner = |icon: IconRef| Icon::placed(icon, Placement::inset(DOUBLE_BORDER_GAP));
    let icon = match gateway_type {
        GatewayType::ExclusiveWithoutMarker => return None,
        GatewayType::ExclusiveWithMarker => filled_glyph(&glyph::X_CROSS, color),
        GatewayType::Inclusive => Icon::leaf(
            LeafShape::Ellipse,
            Paint::stroked(StrokeDefinition::thick(color)),
        ),
        GatewayType::Parallel => filled_glyph(&glyph::CROSS, color),
        GatewayType::Complex => Icon::leaf(
            LeafShape::Glyph(&glyph::ASTERISK),
            Paint::stroked(StrokeDefinition::thick(color)),
        ),
        GatewayType::EventBased => Icon::combined(vec![
            ring(),
            inner(ring()),
            place_centered(stroked_glyph(&glyph::PENTAGON, color), 0.5),
        ]),
        GatewayType::ExclusiveEventBased => Icon::combined(vec![
            ring(),
            place_centered(stroked_glyph(&glyph::PENTAGON, color), 0.5),
        ]),
        GatewayType::ParallelEventBased => Icon::combined(vec![
            ring(),
            place_centered(stroked_glyph(&glyph::CROSS, color), 0.6),
        ]),
    };
    Some(icon)
}

/// Event ring: single for start events, double for intermediate events,
/// thick for end events. Non-interrupting events use dashed strokes.
pub fn event_ring(characteristic: EventCharacteristic, background: Color, outline: Color) -> IconRef {
    let stroke = if characteristic.is_non_interrupting() {
        StrokeDefinition::dashed(outline)
    } else if characteristic == EventCharacteristic::End {
        StrokeDefinition::thick(outline)
    } else {
        solid(outline)
    };
    let ring = Icon::leaf(
        LeafShape::Ellipse,
        Paint::filled_and_stroked(background, stroke.clone()),
    );

    if characteristic.is_intermediate() {
        Icon::combined(vec![
            ring,
            Icon::placed(
                Icon::leaf(LeafShape::Ellipse, Paint::stroked(stroke)),
                Placement::inset(DOUBLE_BORDER_GAP),
            ),
        ])
    } else {
        ring
    }
}

/// Event type icon, or `None` for plain events. Throwing events fill it.
pub fn event_type_icon(
    event_type: EventType,
    filled: bool,
    color: Color,
    background: Color,
) -> Option<IconRef> {
    let icon = match event_type {
        EventType::Plain => return None,
        EventType::Message if filled => envelope(Some(color), color, background),
        EventType::Message => envelope(None, color, color),
        EventType::Timer => Icon::combined(vec![
            Icon::leaf(
                LeafShape::Ellipse,
                Paint::filled_and_stroked(background, solid(color)),
            ),
            stroked_glyph(&glyph::CLOCK, color),
        ]),
        EventType::Escalation => glyph_icon(&glyph::ESCALATION, color, filled),
        EventType::Conditional => Icon::leaf(
            LeafShape::Glyph(&glyph::CONDITIONAL),
            Paint::filled_and_stroked(background, solid(color)),
        ),
        EventType::Link => glyph_icon(&glyph::ARROW, color, filled),
        EventType::Error => glyph_icon(&glyph::LIGHTNING, color, filled),
        EventType::Cancel => glyph_icon(&glyph::X_CROSS, color, filled),
        EventType::Compensation => glyph_icon(&glyph::COMPENSATION, color, filled),
        EventType::Signal => glyph_icon(&glyph::TRIANGLE, color, filled),
        EventType::Multiple => glyph_icon(&glyph::PENTAGON, color, filled),
        EventType::ParallelMultiple => glyph_icon(&glyph::CROSS, color, filled),
        EventType::Terminate => Icon::leaf(
            LeafShape::Ellipse,
            Paint::filled_and_stroked(color, solid(color)),
        ),
    };
    Some(icon)
}

/// Hexagon body; called conversations get a thick border.
pub fn conversation_shape(
    conversation_type: ConversationType,
    background: Color,
    outline: Color,
) -> IconRef {
    let stroke = if conversation_type.is_called() {
        StrokeDefinition::thick(outline)
    } else {
        solid(outline)
    };
    Icon::leaf(
        LeafShape::Hexagon,
        Paint::filled_and_stroked(background, stroke),
    )
}

/// Page with a folded corner.
pub fn data_object_shape(background: Color, outline: Color) -> IconRef {
    Icon::combined(vec![
        Icon::leaf(
            LeafShape::DataObject {
                fold: DATA_OBJECT_FOLD,
            },
            Paint::filled_and_stroked(background, solid(outline)),
        ),
        Icon::leaf(
            LeafShape::DataObjectFold {
                fold: DATA_OBJECT_FOLD,
            },
            Paint::stroked(solid(outline)),
        ),
    ])
}

/// Input arrow (outlined) or output arrow (filled), or `None`.
pub fn data_type_icon(data_type: DataType, color: Color) -> Option<IconRef> {
    match data_type {
        DataType::None => None,
        DataType::Input => Some(stroked_glyph(&glyph::ARROW, color)),
        DataType::Output => Some(filled_glyph(&glyph::ARROW, color)),
    }
}

/// Three vertical bars marking collections and multi-instance pools.
pub fn collection_marker(color: Color) -> IconRef {
    filled_glyph(&glyph::PARALLEL_BARS, color)
}

/// Plus in a frame marking sub-conversations.
pub fn sub_conversation_marker(color: Color) -> IconRef {
    framed(&glyph::PLUS, color)
}

/// Cylinder with the lip of its top cap.
pub fn data_store_shape(background: Color, outline: Color) -> IconRef {
    Icon::combined(vec![
        Icon::leaf(
            LeafShape::DataStore,
            Paint::filled_and_stroked(background, solid(outline)),
        ),
        Icon::leaf(LeafShape::DataStoreLip, Paint::stroked(solid(outline))),
    ])
}

/// Annotation background with a bracket on the given side.
pub fn annotation_shape(side: AnnotationSide, background: Color, outline: Color) -> IconRef {
    let side = match side {
        AnnotationSide::Left => Side::West,
        AnnotationSide::Right => Side::East,
    };
    Icon::combined(vec![
        Icon::leaf(LeafShape::Rectangle, Paint::filled(background)),
        Icon::leaf(
            LeafShape::Bracket {
                side,
                arm: ANNOTATION_ARM,
            },
            Paint::stroked(solid(outline)),
        ),
    ])
}

/// Dash-dot rounded rectangle without fill.
pub fn group_shape(outline: Color, corner_radius: f64) -> IconRef {
    Icon::leaf(
        LeafShape::RoundedRectangle(CornerRadii::uniform(corner_radius)),
        Paint::stroked(StrokeDefinition::dash_dot(outline)),
    )
}

/// Plain rectangle body.
pub fn rectangle(background: Color, outline: Color) -> IconRef {
    Icon::leaf(
        LeafShape::Rectangle,
        Paint::filled_and_stroked(background, solid(outline)),
    )
}

/// Message envelope as a standalone element; non-initiating messages are
/// shaded.
pub fn message_shape(fill: Color, outline: Color) -> IconRef {
    envelope(Some(fill), outline, outline)
}

#[cfg(test)]
mod tests {
    use bpmn_style_core::geometry::Bounds;

    use super::*;

    fn black() -> Color {
        Color::default()
    }

    fn white() -> Color {
        Color::new("#ffffff").unwrap()
    }

    #[test]
    fn test_abstract_and_plain_have_no_icon() {
        assert!(task_type_icon(TaskType::Abstract, black(), white()).is_none());
        assert!(event_type_icon(EventType::Plain, false, black(), white()).is_none());
        assert!(gateway_type_icon(GatewayType::ExclusiveWithoutMarker, black()).is_none());
        assert!(loop_marker(LoopCharacteristic::None, black()).is_none());
        assert!(sub_state_marker(SubState::None, black()).is_none());
        assert!(data_type_icon(DataType::None, black()).is_none());
    }

    #[test]
    fn test_transaction_has_double_border() {
        let single = activity_shape(ActivityType::Task, white(), black(), 10.0);
        let double = activity_shape(ActivityType::Transaction, white(), black(), 10.0);
        assert_eq!(single.leaf_count(), 1);
        assert_eq!(double.leaf_count(), 2);

        let leaves = double.arranged_leaves(Bounds::from_xywh(0.0, 0.0, 100.0, 60.0));
        assert_eq!(leaves[1].1, Bounds::from_xywh(3.0, 3.0, 94.0, 54.0));
    }

    #[test]
    fn test_intermediate_events_have_two_rings() {
        let start = event_ring(EventCharacteristic::Start, white(), black());
        let catching = event_ring(EventCharacteristic::Catching, white(), black());
        assert_eq!(start.leaf_count(), 1);
        assert_eq!(catching.leaf_count(), 2);
    }

    #[test]
    fn test_throwing_fills_icon() {
        let filled = event_type_icon(EventType::Signal, true, black(), white()).unwrap();
        let outlined = event_type_icon(EventType::Signal, false, black(), white()).unwrap();
        assert!(filled.any_leaf(&|leaf| leaf.paint().fill().is_some()));
        assert!(!outlined.any_leaf(&|leaf| leaf.paint().fill().is_some()));
    }

    #[test]
    fn test_marker_row_width() {
        let row = marker_row(
            vec![ad_hoc_marker(black()), compensation_marker(black())],
            14.0,
        )
        .unwrap();
        assert_eq!(row.preferred_size(), Some(Size::new(33.0, 14.0)));
        assert!(marker_row(Vec::new(), -1.0).is_err());
    }

    #[test]
    fn test_type_icon_placement() {
        let icon = place_type_icon(stroked_glyph(&glyph::GEAR, black()));
        let leaves = icon.arranged_leaves(Bounds::from_xywh(10.0, 10.0, 100.0, 60.0));
        assert_eq!(leaves[0].1, Bounds::from_xywh(15.0, 15.0, 16.0, 16.0));
    }
}
