//! Integration tests for the public style API
//!
//! These tests drive styles only through the crate's public surface, the
//! way a host application would.

use std::rc::Rc;

use float_cmp::assert_approx_eq;

use bpmn_style::{
    StyleError,
    geometry::{Bounds, Point},
    icon::glyph,
    identifier::Id,
    insets::InsetsProvider,
    label::LabelParameter,
    path::is_finite,
    render::svg::SvgContext,
    scene::Scene,
    style::{
        ActivityStyle, AnnotationStyle, ChoreographyStyle, ConversationStyle, ConversationType,
        DataObjectStyle, DataStoreStyle, DataType, ElementStyle, EventStyle, GatewayStyle,
        GatewayType, GroupStyle, LoopCharacteristic, MessageStyle, NodeStyle, Participant,
        PoolStyle, SubState,
    },
};

/// Styles of every kind with as many features enabled as possible.
fn decorated_styles() -> Vec<NodeStyle> {
    let mut activity = ActivityStyle::new();
    activity.set_loop_characteristic(LoopCharacteristic::Parallel);
    activity.set_ad_hoc(true);
    activity.set_compensation(true);
    activity.set_sub_state(SubState::Collapsed);

    let mut gateway = GatewayStyle::new();
    gateway.set_gateway_type(GatewayType::Complex);

    let mut choreography = ChoreographyStyle::new();
    choreography.top_participants_mut().push(Participant::new(true));
    choreography.bottom_participants_mut().push(Participant::new(false));
    choreography.set_initiating_message(true);
    choreography.set_response_message(true);
    choreography.set_loop_characteristic(LoopCharacteristic::Loop);

    let mut conversation = ConversationStyle::new();
    conversation.set_conversation_type(ConversationType::CalledSubConversation);

    let mut data_object = DataObjectStyle::new();
    data_object.set_data_type(DataType::Input);
    data_object.set_collection(true);

    let mut pool = PoolStyle::new();
    pool.set_multiple_instance(true);

    vec![
        activity.into(),
        gateway.into(),
        EventStyle::new().into(),
        choreography.into(),
        conversation.into(),
        data_object.into(),
        DataStoreStyle::new().into(),
        AnnotationStyle::new().into(),
        pool.into(),
        GroupStyle::new().into(),
        MessageStyle::new().into(),
    ]
}

#[test]
fn test_clean_reads_return_the_same_tree() {
    for style in decorated_styles() {
        let first = style.icon();
        let second = style.icon();
        assert!(
            Rc::ptr_eq(&first, &second),
            "{} rebuilt its icon without a change",
            style.kind().name()
        );
    }
}

#[test]
fn test_degenerate_layouts_produce_finite_paths() {
    let layouts = [
        Bounds::default(),
        Bounds::from_xywh(10.0, 10.0, 0.0, 30.0),
        Bounds::from_xywh(10.0, 10.0, 1.0, 1.0),
    ];
    for style in decorated_styles() {
        let icon = style.icon();
        for layout in layouts {
            assert!(
                is_finite(&style.outline(layout)),
                "{} outline at {layout:?}",
                style.kind().name()
            );
            for (leaf, bounds) in icon.arranged_leaves(layout) {
                assert!(
                    is_finite(&leaf.path(bounds)),
                    "{} leaf at {layout:?}",
                    style.kind().name()
                );
            }
        }
    }
}

#[test]
fn test_every_mutation_advances_the_counter() {
    let mut task = ActivityStyle::new();
    let mut previous = task.mod_count();
    let mut icon = task.icon();

    task.set_loop_characteristic(LoopCharacteristic::Sequential);
    task.set_marker_size(12.0).unwrap();
    task.set_ad_hoc(true);
    assert_eq!(task.mod_count(), previous + 3);
    assert!(!Rc::ptr_eq(&icon, &task.icon()));

    previous = task.mod_count();
    icon = task.icon();
    task.set_ad_hoc(true);
    assert_eq!(task.mod_count(), previous);
    assert!(Rc::ptr_eq(&icon, &task.icon()));
}

#[test]
fn test_marker_width_accumulates() {
    let mut task = ActivityStyle::new();
    task.set_marker_size(14.0).unwrap();
    task.set_loop_characteristic(LoopCharacteristic::Loop);
    task.set_ad_hoc(true);
    task.set_compensation(true);
    task.set_sub_state(SubState::Collapsed);

    assert_eq!(task.marker_count(), 4);
    assert_approx_eq!(f64, task.minimum_size().width(), 40.0_f64.max(10.0 + 4.0 * 19.0));
}

#[test]
fn test_ad_hoc_round_trip() {
    let mut task = ActivityStyle::new();
    let start = task.mod_count();
    task.set_ad_hoc(true);
    task.set_ad_hoc(false);
    task.set_ad_hoc(true);
    assert_eq!(task.mod_count(), start + 3);
    assert!(task.icon().any_leaf(&|leaf| leaf.is_glyph(&glyph::TILDE)));
}

#[test]
fn test_choreography_bands() {
    let mut choreography = ChoreographyStyle::new();
    choreography.top_participants_mut().push(Participant::new(false));
    let layout = Bounds::from_xywh(0.0, 0.0, 100.0, 80.0);

    assert_eq!(
        choreography.task_band_bounds(layout),
        Bounds::new(0.0, 20.0, 100.0, 80.0)
    );

    let before = choreography.mod_count();
    choreography
        .top_participants_mut()
        .get_mut(0)
        .unwrap()
        .set_multi_instance(true);
    assert!(choreography.mod_count() > before);
    assert_approx_eq!(f64, choreography.insets().top(), 5.0 + 32.0);
}

#[test]
fn test_participant_insets_ignore_order() {
    let build = |flags: &[bool]| {
        let mut style = ChoreographyStyle::new();
        for multi in flags {
            style.bottom_participants_mut().push(Participant::new(*multi));
        }
        style.insets()
    };
    assert_eq!(build(&[true, false, false]), build(&[false, false, true]));
    assert!(build(&[true]).bottom() >= build(&[]).bottom());
}

#[test]
fn test_scene_round_trip() -> Result<(), StyleError> {
    let mut scene = Scene::new();
    let id = Id::new("review");
    scene.add_node(id, ActivityStyle::new(), Bounds::from_xywh(0.0, 0.0, 100.0, 60.0))?;
    assert_eq!(scene.hit_test(Point::new(50.0, 30.0)), Some(id));

    let mut context = SvgContext::new();
    let (document, stats) = scene.render_svg(&mut context);
    assert_eq!(stats.rebuilt, 1);
    let rendered = document.to_string();
    assert!(rendered.contains("<svg"));
    assert!(rendered.contains("viewBox"));

    scene.set_layout(id, Bounds::from_xywh(20.0, 0.0, 100.0, 60.0))?;
    let (_, stats) = scene.render_svg(&mut context);
    assert_eq!(stats.rearranged, 1);

    assert!(matches!(
        scene.add_band_label(Id::new("nothing"), LabelParameter::TaskNameBand, "x"),
        Err(StyleError::UnknownElement(_))
    ));
    Ok(())
}
