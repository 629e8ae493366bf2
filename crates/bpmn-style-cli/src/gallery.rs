//! A scene showing every element kind.
//!
//! Exhibits are laid out row by row in equal cells, each element centered
//! in its cell. Choreographies and pools carry band labels; a few tasks
//! carry connector-anchored notes below them.

use log::debug;

use bpmn_style::{
    StyleError,
    config::GalleryConfig,
    geometry::{Bounds, Point, Side, Size},
    identifier::Id,
    label::{ConnectorLabelKind, LabelParameter},
    scene::Scene,
    style::{
        ActivityStyle, ActivityType, AnnotationStyle, ChoreographyStyle, ConversationStyle,
        ConversationType, DataObjectStyle, DataStoreStyle, DataType, EventCharacteristic,
        EventStyle, EventType, GatewayStyle, GatewayType, GroupStyle, LoopCharacteristic,
        MessageStyle, NodeStyle, Participant, PoolOrientation, PoolStyle, StyleDefaults, SubState,
        TaskType,
    },
};

/// Size of a connector-anchored note.
const NOTE_SIZE: Size = Size::new(90.0, 30.0);
/// Gap between an exhibit and its note.
const NOTE_GAP: f64 = 10.0;

struct Exhibit {
    name: &'static str,
    style: NodeStyle,
    size: Size,
    labels: Vec<(LabelParameter, &'static str)>,
    note: Option<(ConnectorLabelKind, &'static str)>,
}

impl Exhibit {
    fn new(name: &'static str, style: impl Into<NodeStyle>, size: Size) -> Self {
        Self {
            name,
            style: style.into(),
            size,
            labels: Vec::new(),
            note: None,
        }
    }

    fn with_label(mut self, parameter: LabelParameter, text: &'static str) -> Self {
        self.labels.push((parameter, text));
        self
    }

    fn with_note(mut self, kind: ConnectorLabelKind, text: &'static str) -> Self {
        self.note = Some((kind, text));
        self
    }
}

/// Builds the gallery scene with styles created from `defaults`.
///
/// # Errors
///
/// Returns a [`StyleError`] if an exhibit cannot be added to the scene.
pub fn build(defaults: &StyleDefaults, gallery: &GalleryConfig) -> Result<Scene, StyleError> {
    let exhibits = exhibits(defaults);
    let cell = exhibits
        .iter()
        .fold(Size::default(), |cell, exhibit| cell.max(exhibit.size));
    let columns = gallery.columns();
    let spacing = gallery.spacing();

    let mut scene = Scene::new();
    for (index, exhibit) in exhibits.into_iter().enumerate() {
        let column = (index % columns) as f64;
        let row = (index / columns) as f64;
        let center = Point::new(
            column * (cell.width() + spacing) + cell.width() / 2.0,
            row * (cell.height() + spacing) + cell.height() / 2.0,
        );
        let layout = Bounds::new_from_center(center, exhibit.size);
        let id = Id::new(exhibit.name);
        debug!(id:% = id, layout:?; "Placing exhibit");

        scene.add_node(id, exhibit.style, layout)?;
        for (parameter, text) in exhibit.labels {
            scene.add_band_label(id, parameter, text)?;
        }
        if let Some((kind, text)) = exhibit.note {
            scene.add_connector_label(id, kind, text, note_bounds(kind, layout))?;
        }
    }
    Ok(scene)
}

/// Where a note of `kind` sits below an exhibit laid out at `layout`.
fn note_bounds(kind: ConnectorLabelKind, layout: Bounds) -> Bounds {
    let top = layout.max_y() + NOTE_GAP;
    match kind {
        // right of center, so the bracket faces back toward the owner
        ConnectorLabelKind::Annotation => Bounds::from_xywh(
            layout.center().x() + NOTE_GAP,
            top,
            NOTE_SIZE.width(),
            NOTE_SIZE.height(),
        ),
        ConnectorLabelKind::Message => Bounds::from_xywh(
            layout.center().x() - NOTE_SIZE.width() / 2.0,
            top,
            NOTE_SIZE.width(),
            NOTE_SIZE.height(),
        ),
    }
}

fn exhibits(defaults: &StyleDefaults) -> Vec<Exhibit> {
    let task_size = Size::new(100.0, 60.0);
    let event_size = Size::square(36.0);

    let mut user_task = ActivityStyle::with_defaults(defaults);
    user_task.set_task_type(TaskType::User);

    let mut send_task = ActivityStyle::with_defaults(defaults);
    send_task.set_task_type(TaskType::Send);
    send_task.set_loop_characteristic(LoopCharacteristic::Loop);

    let mut sub_process = ActivityStyle::with_defaults(defaults);
    sub_process.set_activity_type(ActivityType::SubProcess);
    sub_process.set_sub_state(SubState::Collapsed);
    sub_process.set_ad_hoc(true);

    let mut transaction = ActivityStyle::with_defaults(defaults);
    transaction.set_activity_type(ActivityType::Transaction);
    transaction.set_loop_characteristic(LoopCharacteristic::Parallel);
    transaction.set_compensation(true);

    let mut call_activity = ActivityStyle::with_defaults(defaults);
    call_activity.set_activity_type(ActivityType::CallActivity);
    call_activity.set_task_type(TaskType::Service);
    call_activity.set_loop_characteristic(LoopCharacteristic::Sequential);

    let gateway = |gateway_type| {
        let mut style = GatewayStyle::with_defaults(defaults);
        style.set_gateway_type(gateway_type);
        style
    };

    let event = |characteristic, event_type| {
        let mut style = EventStyle::with_defaults(defaults);
        style.set_characteristic(characteristic);
        style.set_event_type(event_type);
        style
    };

    let mut choreography = ChoreographyStyle::with_defaults(defaults);
    choreography
        .top_participants_mut()
        .push(Participant::new(false));
    choreography
        .bottom_participants_mut()
        .push(Participant::new(true));
    choreography.set_initiating_message(true);
    choreography.set_loop_characteristic(LoopCharacteristic::Loop);

    let conversation = |conversation_type| {
        let mut style = ConversationStyle::with_defaults(defaults);
        style.set_conversation_type(conversation_type);
        style
    };

    let mut data_input = DataObjectStyle::with_defaults(defaults);
    data_input.set_data_type(DataType::Input);
    data_input.set_collection(true);

    let mut pool = PoolStyle::with_defaults(defaults);
    pool.set_multiple_instance(true);

    let mut lane = PoolStyle::with_defaults(defaults);
    lane.set_orientation(PoolOrientation::Vertical);

    let mut shaded_message = MessageStyle::with_defaults(defaults);
    shaded_message.set_shaded(true);

    vec![
        Exhibit::new("user_task", user_task, task_size)
            .with_note(ConnectorLabelKind::Annotation, "Reviewed daily"),
        Exhibit::new("send_task", send_task, task_size)
            .with_note(ConnectorLabelKind::Message, "Invoice"),
        Exhibit::new("sub_process", sub_process, task_size),
        Exhibit::new("transaction", transaction, task_size),
        Exhibit::new("call_activity", call_activity, task_size),
        Exhibit::new(
            "exclusive_gateway",
            gateway(GatewayType::ExclusiveWithMarker),
            Size::square(50.0),
        ),
        Exhibit::new(
            "parallel_gateway",
            gateway(GatewayType::Parallel),
            Size::square(50.0),
        ),
        Exhibit::new(
            "event_based_gateway",
            gateway(GatewayType::EventBased),
            Size::square(50.0),
        ),
        Exhibit::new(
            "message_start",
            event(EventCharacteristic::Start, EventType::Message),
            event_size,
        ),
        Exhibit::new(
            "timer_catch",
            event(EventCharacteristic::Catching, EventType::Timer),
            event_size,
        ),
        Exhibit::new(
            "signal_throw",
            event(EventCharacteristic::Throwing, EventType::Signal),
            event_size,
        ),
        Exhibit::new(
            "terminate_end",
            event(EventCharacteristic::End, EventType::Terminate),
            event_size,
        ),
        Exhibit::new("choreography", choreography, Size::new(120.0, 110.0))
            .with_label(LabelParameter::TaskNameBand, "Ship order")
            .with_label(LabelParameter::ParticipantBand { top: true, index: 0 }, "Buyer")
            .with_label(
                LabelParameter::ParticipantBand {
                    top: false,
                    index: 0,
                },
                "Seller",
            )
            .with_label(LabelParameter::NorthMessage, "Order"),
        Exhibit::new(
            "conversation",
            conversation(ConversationType::Conversation),
            Size::new(50.0, 44.0),
        ),
        Exhibit::new(
            "called_sub_conversation",
            conversation(ConversationType::CalledSubConversation),
            Size::new(50.0, 44.0),
        ),
        Exhibit::new("data_input", data_input, Size::new(36.0, 50.0)),
        Exhibit::new(
            "data_store",
            DataStoreStyle::with_defaults(defaults),
            Size::square(50.0),
        ),
        Exhibit::new(
            "annotation",
            AnnotationStyle::with_defaults(defaults),
            Size::new(100.0, 50.0),
        ),
        Exhibit::new("pool", pool, Size::new(260.0, 120.0))
            .with_label(LabelParameter::PoolHeader(Side::West), "Supplier"),
        Exhibit::new("lane", lane, Size::new(140.0, 140.0))
            .with_label(LabelParameter::PoolHeader(Side::North), "Carrier"),
        Exhibit::new(
            "group",
            GroupStyle::with_defaults(defaults),
            Size::new(160.0, 110.0),
        ),
        Exhibit::new(
            "message",
            MessageStyle::with_defaults(defaults),
            Size::new(40.0, 28.0),
        ),
        Exhibit::new("shaded_message", shaded_message, Size::new(40.0, 28.0)),
    ]
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use bpmn_style::style::ElementStyle;

    use super::*;

    fn gallery() -> Scene {
        build(StyleDefaults::shared(), &GalleryConfig::default()).unwrap()
    }

    #[test]
    fn test_every_kind_is_shown() {
        let scene = gallery();
        let kinds: HashSet<&str> = scene
            .iter()
            .map(|(_, node)| node.style().kind().name())
            .collect();
        assert_eq!(kinds.len(), 11);
    }

    #[test]
    fn test_cells_do_not_overlap() {
        let scene = gallery();
        let layouts: Vec<Bounds> = scene.iter().map(|(_, node)| node.layout()).collect();
        for (index, first) in layouts.iter().enumerate() {
            for second in &layouts[index + 1..] {
                let overlap = first.min_x() < second.max_x()
                    && second.min_x() < first.max_x()
                    && first.min_y() < second.max_y()
                    && second.min_y() < first.max_y();
                assert!(!overlap, "{first:?} overlaps {second:?}");
            }
        }
    }

    #[test]
    fn test_columns() {
        let scene = build(
            StyleDefaults::shared(),
            &GalleryConfig::default().with_columns(1),
        )
        .unwrap();
        let xs: HashSet<u64> = scene
            .iter()
            .map(|(_, node)| node.layout().center().x().to_bits())
            .collect();
        assert_eq!(xs.len(), 1);
    }

    #[test]
    fn test_labels_attached() {
        let scene = gallery();
        let choreography = scene.node(Id::new("choreography")).unwrap();
        assert_eq!(choreography.labels().len(), 4);
        let task = scene.node(Id::new("user_task")).unwrap();
        assert_eq!(task.labels()[0].text(), "Reviewed daily");
    }
}
