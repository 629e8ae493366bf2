//! Element styles for every BPMN node kind.
//!
//! A style owns the typed parameters of one diagram element, a modification
//! counter and lazily built icon caches. Setters that change a value bump
//! the counter and invalidate the sub-icons depending on that value; reads
//! rebuild whatever is missing.
//!
//! ```
//! # use bpmn_style::style::{ActivityStyle, ElementStyle, LoopCharacteristic};
//! let mut task = ActivityStyle::new();
//! let before = task.mod_count();
//! task.set_loop_characteristic(LoopCharacteristic::Loop);
//! assert!(task.mod_count() > before);
//!
//! // Reading twice without a change returns the same tree
//! assert!(std::rc::Rc::ptr_eq(&task.icon(), &task.icon()));
//! ```

mod activity;
mod annotation;
mod cache;
mod choreography;
mod conversation;
mod data_object;
mod data_store;
mod defaults;
mod event;
mod gateway;
mod group;
pub mod icon_factory;
mod message;
mod participant;
mod pool;
mod types;

use kurbo::{BezPath, ParamCurveNearest, Shape};

use bpmn_style_core::{
    draw::RenderLayer,
    geometry::{Bounds, Insets, Point, Size},
    icon::IconRef,
};

pub use activity::{ActivityStyle, MIN_ACTIVITY_SIZE};
pub use annotation::AnnotationStyle;
pub use cache::{IconSlot, KeyedIconSlot};
pub use choreography::{
    ChoreographyStyle, MESSAGE_GAP, MESSAGE_HIT_TOLERANCE, MESSAGE_SIZE, ParticipantBand,
};
pub use conversation::ConversationStyle;
pub use data_object::DataObjectStyle;
pub use data_store::DataStoreStyle;
pub use defaults::{DEFAULT_CORNER_RADIUS, DEFAULT_INSETS, DEFAULT_MARKER_SIZE, StyleDefaults};
pub use event::EventStyle;
pub use gateway::GatewayStyle;
pub use group::GroupStyle;
pub use message::MessageStyle;
pub use participant::{
    MULTI_INSTANCE_PARTICIPANT_SIZE, PARTICIPANT_SIZE, Participant, ParticipantList,
    ParticipantListMut, ParticipantMut,
};
pub use pool::{DEFAULT_HEADER_SIZE, PoolStyle};
pub use types::{
    ActivityType, AnnotationSide, ChoreographyType, ConversationType, DataType,
    EventCharacteristic, EventType, GatewayType, LoopCharacteristic, PoolOrientation, SubState,
    TaskType,
};

use crate::{error::StyleError, insets::InsetsProvider};

/// Hit-test tolerance used when none is configured.
pub const DEFAULT_HIT_TOLERANCE: f64 = 0.0;

/// Accuracy of nearest-point queries against outline segments.
const NEAREST_ACCURACY: f64 = 1e-3;

/// The BPMN kind of an element style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Activity,
    Gateway,
    Event,
    Choreography,
    Conversation,
    DataObject,
    DataStore,
    Annotation,
    Pool,
    Group,
    Message,
}

impl ElementKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::Gateway => "gateway",
            Self::Event => "event",
            Self::Choreography => "choreography",
            Self::Conversation => "conversation",
            Self::DataObject => "data-object",
            Self::DataStore => "data-store",
            Self::Annotation => "annotation",
            Self::Pool => "pool",
            Self::Group => "group",
            Self::Message => "message",
        }
    }
}

/// Parameters of a hit test supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTestContext {
    tolerance: f64,
}

impl HitTestContext {
    /// Creates a context accepting points up to `tolerance` outside an
    /// outline. Negative or non-finite values count as zero.
    pub fn new(tolerance: f64) -> Self {
        let tolerance = if tolerance.is_finite() {
            tolerance.max(0.0)
        } else {
            0.0
        };
        Self { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl Default for HitTestContext {
    fn default() -> Self {
        Self::new(DEFAULT_HIT_TOLERANCE)
    }
}

/// Returns `true` if `point` is inside `outline` or within the context's
/// tolerance of it.
pub fn hit_outline(outline: &BezPath, context: &HitTestContext, point: Point) -> bool {
    let point = kurbo::Point::from(point);
    if outline.contains(point) {
        return true;
    }
    let tolerance = context.tolerance();
    tolerance > 0.0
        && outline
            .segments()
            .any(|segment| segment.nearest(point, NEAREST_ACCURACY).distance_sq <= tolerance * tolerance)
}

/// Operations every element style provides.
pub trait ElementStyle: InsetsProvider {
    fn kind(&self) -> ElementKind;

    /// Monotonic counter bumped by every value-changing mutation.
    fn mod_count(&self) -> u64;

    /// The full icon tree, rebuilt only when parameters changed since the
    /// last read.
    fn icon(&self) -> IconRef;

    /// Closed outline for hit-testing and edge clipping.
    fn outline(&self, layout: Bounds) -> BezPath;

    /// Area the element paints, which may exceed `layout`.
    fn bounds(&self, layout: Bounds) -> Bounds {
        layout
    }

    /// Smallest layout size the element can be given.
    fn minimum_size(&self) -> Size;

    fn is_hit(&self, context: &HitTestContext, point: Point, layout: Bounds) -> bool {
        hit_outline(&self.outline(layout), context, point)
    }

    /// Layer the element's visuals are emitted to.
    fn layer(&self) -> RenderLayer {
        RenderLayer::Node
    }
}

/// Assigns `value` to `field` if it differs, bumping `mod_count`.
///
/// Returns `true` if the value changed.
pub(crate) fn set_if_changed<T: PartialEq>(field: &mut T, value: T, mod_count: &mut u64) -> bool {
    if *field == value {
        return false;
    }
    *field = value;
    *mod_count += 1;
    true
}

/// Checks that configured base insets are finite and not negative.
pub(crate) fn check_insets(insets: Insets) -> Result<Insets, StyleError> {
    for (parameter, value) in [
        ("insets.top", insets.top()),
        ("insets.right", insets.right()),
        ("insets.bottom", insets.bottom()),
        ("insets.left", insets.left()),
    ] {
        StyleError::check_length(parameter, value)?;
    }
    Ok(insets)
}

/// The style of one diagram node, dispatched over the BPMN kinds.
#[derive(Debug, Clone)]
pub enum NodeStyle {
    Activity(ActivityStyle),
    Gateway(GatewayStyle),
    Event(EventStyle),
    Choreography(ChoreographyStyle),
    Conversation(ConversationStyle),
    DataObject(DataObjectStyle),
    DataStore(DataStoreStyle),
    Annotation(AnnotationStyle),
    Pool(PoolStyle),
    Group(GroupStyle),
    Message(MessageStyle),
}

macro_rules! dispatch {
    ($self:expr, $style:ident => $body:expr) => {
        match $self {
            NodeStyle::Activity($style) => $body,
            NodeStyle::Gateway($style) => $body,
            NodeStyle::Event($style) => $body,
            NodeStyle::Choreography($style) => $body,
            NodeStyle::Conversation($style) => $body,
            NodeStyle::DataObject($style) => $body,
            NodeStyle::DataStore($style) => $body,
            NodeStyle::Annotation($style) => $body,
            NodeStyle::Pool($style) => $body,
            NodeStyle::Group($style) => $body,
            NodeStyle::Message($style) => $body,
        }
    };
}

impl NodeStyle {
    pub fn as_choreography(&self) -> Option<&ChoreographyStyle> {
        match self {
            Self::Choreography(style) => Some(style),
            _ => None,
        }
    }

    pub fn as_choreography_mut(&mut self) -> Option<&mut ChoreographyStyle> {
        match self {
            Self::Choreography(style) => Some(style),
            _ => None,
        }
    }

    pub fn as_pool(&self) -> Option<&PoolStyle> {
        match self {
            Self::Pool(style) => Some(style),
            _ => None,
        }
    }

    pub fn as_activity_mut(&mut self) -> Option<&mut ActivityStyle> {
        match self {
            Self::Activity(style) => Some(style),
            _ => None,
        }
    }
}

impl InsetsProvider for NodeStyle {
    fn base_insets(&self) -> Insets {
        dispatch!(self, style => style.base_insets())
    }

    fn feature_insets(&self) -> Insets {
        dispatch!(self, style => style.feature_insets())
    }

    fn insets(&self) -> Insets {
        dispatch!(self, style => style.insets())
    }
}

impl ElementStyle for NodeStyle {
    fn kind(&self) -> ElementKind {
        dispatch!(self, style => style.kind())
    }

    fn mod_count(&self) -> u64 {
        dispatch!(self, style => style.mod_count())
    }

    fn icon(&self) -> IconRef {
        dispatch!(self, style => style.icon())
    }

    fn outline(&self, layout: Bounds) -> BezPath {
        dispatch!(self, style => style.outline(layout))
    }

    fn bounds(&self, layout: Bounds) -> Bounds {
        dispatch!(self, style => style.bounds(layout))
    }

    fn minimum_size(&self) -> Size {
        dispatch!(self, style => style.minimum_size())
    }

    fn is_hit(&self, context: &HitTestContext, point: Point, layout: Bounds) -> bool {
        dispatch!(self, style => style.is_hit(context, point, layout))
    }

    fn layer(&self) -> RenderLayer {
        dispatch!(self, style => style.layer())
    }
}

macro_rules! impl_from_style {
    ($($variant:ident($style:ty)),* $(,)?) => {
        $(
            impl From<$style> for NodeStyle {
                fn from(style: $style) -> Self {
                    Self::$variant(style)
                }
            }
        )*
    };
}

impl_from_style!(
    Activity(ActivityStyle),
    Gateway(GatewayStyle),
    Event(EventStyle),
    Choreography(ChoreographyStyle),
    Conversation(ConversationStyle),
    DataObject(DataObjectStyle),
    DataStore(DataStoreStyle),
    Annotation(AnnotationStyle),
    Pool(PoolStyle),
    Group(GroupStyle),
    Message(MessageStyle),
);

#[cfg(test)]
mod tests {
    use super::*;

    /// One style of every kind with default parameters.
    pub(crate) fn every_kind() -> Vec<NodeStyle> {
        vec![
            ActivityStyle::new().into(),
            GatewayStyle::new().into(),
            EventStyle::new().into(),
            ChoreographyStyle::new().into(),
            ConversationStyle::new().into(),
            DataObjectStyle::new().into(),
            DataStoreStyle::new().into(),
            AnnotationStyle::new().into(),
            PoolStyle::new().into(),
            GroupStyle::new().into(),
            MessageStyle::new().into(),
        ]
    }

    #[test]
    fn test_set_if_changed() {
        let mut mod_count = 0;
        let mut flag = false;
        assert!(!set_if_changed(&mut flag, false, &mut mod_count));
        assert_eq!(mod_count, 0);
        assert!(set_if_changed(&mut flag, true, &mut mod_count));
        assert_eq!(mod_count, 1);
        assert!(flag);
    }

    #[test]
    fn test_hit_outline_tolerance() {
        let outline = bpmn_style_core::path::rectangle(Bounds::from_xywh(0.0, 0.0, 10.0, 10.0));
        let outside = Point::new(12.0, 5.0);
        assert!(hit_outline(&outline, &HitTestContext::default(), Point::new(5.0, 5.0)));
        assert!(!hit_outline(&outline, &HitTestContext::default(), outside));
        assert!(hit_outline(&outline, &HitTestContext::new(2.5), outside));
        assert!(!hit_outline(&outline, &HitTestContext::new(1.5), outside));
    }

    #[test]
    fn test_negative_tolerance_counts_as_zero() {
        assert_eq!(HitTestContext::new(-4.0).tolerance(), 0.0);
        assert_eq!(HitTestContext::new(f64::NAN).tolerance(), 0.0);
    }

    #[test]
    fn test_dispatch_matches_kind() {
        let kinds: Vec<ElementKind> = every_kind().iter().map(|style| style.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ElementKind::Activity,
                ElementKind::Gateway,
                ElementKind::Event,
                ElementKind::Choreography,
                ElementKind::Conversation,
                ElementKind::DataObject,
                ElementKind::DataStore,
                ElementKind::Annotation,
                ElementKind::Pool,
                ElementKind::Group,
                ElementKind::Message,
            ]
        );
    }

    #[test]
    fn test_containers_use_container_layer() {
        for style in every_kind() {
            let expected = match style.kind() {
                ElementKind::Pool | ElementKind::Group => RenderLayer::Container,
                _ => RenderLayer::Node,
            };
            assert_eq!(style.layer(), expected, "{}", style.kind().name());
        }
    }

    #[test]
    fn test_centers_are_hit() {
        let layout = Bounds::from_xywh(0.0, 0.0, 100.0, 80.0);
        for style in every_kind() {
            assert!(
                style.is_hit(&HitTestContext::default(), layout.center(), layout),
                "{}",
                style.kind().name()
            );
        }
    }

    #[test]
    fn test_insets_never_below_base() {
        for style in every_kind() {
            let insets = style.insets();
            let base = style.base_insets();
            assert!(insets.top() >= base.top());
            assert!(insets.right() >= base.right());
            assert!(insets.bottom() >= base.bottom());
            assert!(insets.left() >= base.left());
        }
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::{tests::every_kind, *};

    fn degenerate_bounds() -> impl Strategy<Value = Bounds> {
        (-50.0f64..50.0, -50.0f64..50.0, -20.0f64..1.0, -20.0f64..1.0)
            .prop_map(|(x, y, width, height)| Bounds::from_xywh(x, y, width, height))
    }

    fn check_outlines_finite(layout: Bounds) -> Result<(), TestCaseError> {
        for style in every_kind() {
            let outline = style.outline(layout);
            prop_assert!(
                bpmn_style_core::path::is_finite(&outline),
                "{} outline has non-finite coordinates",
                style.kind().name()
            );
            prop_assert!(style.bounds(layout).is_finite());
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn outlines_finite_for_degenerate_bounds(layout in degenerate_bounds()) {
            check_outlines_finite(layout)?;
        }
    }
}
