//! BPMN sub-type enumerations shared by styles and the icon factory.

/// Kind of activity, which determines the border of the activity shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ActivityType {
    #[default]
    Task,
    SubProcess,
    /// Double border.
    Transaction,
    /// Dotted border.
    EventSubProcess,
    /// Thick border.
    CallActivity,
}

/// Task type, shown as an icon in the north-west corner of a task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaskType {
    #[default]
    Abstract,
    Send,
    Receive,
    User,
    Manual,
    BusinessRule,
    Service,
    Script,
}

/// Loop characteristic marker of activities and choreographies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LoopCharacteristic {
    #[default]
    None,
    Loop,
    Parallel,
    Sequential,
}

/// Collapsed or expanded state of sub-processes and sub-choreographies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SubState {
    #[default]
    None,
    /// Shows a plus marker.
    Collapsed,
    /// Shows a minus marker.
    Expanded,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum GatewayType {
    ExclusiveWithoutMarker,
    #[default]
    ExclusiveWithMarker,
    Inclusive,
    Parallel,
    Complex,
    EventBased,
    ExclusiveEventBased,
    ParallelEventBased,
}

/// Where an event sits in the flow. Determines its ring and whether the
/// type icon is filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EventCharacteristic {
    #[default]
    Start,
    SubProcessInterrupting,
    SubProcessNonInterrupting,
    Catching,
    BoundaryInterrupting,
    BoundaryNonInterrupting,
    Throwing,
    End,
}

impl EventCharacteristic {
    /// Intermediate events are drawn with a double ring.
    pub fn is_intermediate(self) -> bool {
        matches!(
            self,
            Self::Catching
                | Self::BoundaryInterrupting
                | Self::BoundaryNonInterrupting
                | Self::Throwing
        )
    }

    /// Non-interrupting events are drawn with dashed rings.
    pub fn is_non_interrupting(self) -> bool {
        matches!(
            self,
            Self::SubProcessNonInterrupting | Self::BoundaryNonInterrupting
        )
    }

    /// Throwing and end events fill their type icon.
    pub fn is_throwing(self) -> bool {
        matches!(self, Self::Throwing | Self::End)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EventType {
    #[default]
    Plain,
    Message,
    Timer,
    Escalation,
    Conditional,
    Link,
    Error,
    Cancel,
    Compensation,
    Signal,
    Multiple,
    ParallelMultiple,
    Terminate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ChoreographyType {
    #[default]
    Task,
    /// Thick border.
    Call,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConversationType {
    #[default]
    Conversation,
    SubConversation,
    CalledConversation,
    CalledSubConversation,
}

impl ConversationType {
    pub fn is_called(self) -> bool {
        matches!(self, Self::CalledConversation | Self::CalledSubConversation)
    }

    pub fn is_sub_conversation(self) -> bool {
        matches!(self, Self::SubConversation | Self::CalledSubConversation)
    }
}

/// Input/output marker of a data object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DataType {
    #[default]
    None,
    Input,
    Output,
}

/// Side of an annotation the bracket is drawn on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AnnotationSide {
    #[default]
    Left,
    Right,
}

/// Direction a pool's lanes run in. Horizontal pools have their header on
/// the left, vertical pools on top.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PoolOrientation {
    #[default]
    Horizontal,
    Vertical,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_characteristics() {
        assert!(EventCharacteristic::Catching.is_intermediate());
        assert!(!EventCharacteristic::Start.is_intermediate());
        assert!(EventCharacteristic::BoundaryNonInterrupting.is_non_interrupting());
        assert!(EventCharacteristic::End.is_throwing());
        assert!(!EventCharacteristic::Catching.is_throwing());
    }

    #[test]
    fn test_conversation_types() {
        assert!(ConversationType::CalledSubConversation.is_called());
        assert!(ConversationType::CalledSubConversation.is_sub_conversation());
        assert!(!ConversationType::Conversation.is_sub_conversation());
    }
}
