//! Label placement.
//!
//! [`LabelParameter`] places labels relative to a band of their owner, such
//! as the task-name band of a choreography or a pool header. Parameters are
//! stateless: the geometry is recomputed from the owner's current style and
//! layout on every query. [`ConnectorLabelStyle`] draws labels that float
//! next to their owner and connect back to it.

mod connector;

use log::trace;

use bpmn_style_core::geometry::{Bounds, OrientedRect, Point, Rotation, Side, Size};

use crate::style::{NodeStyle, Participant};

pub use connector::{ConnectorLabelKind, ConnectorLabelStyle};

/// Gap between a message envelope and its label.
pub const MESSAGE_LABEL_GAP: f64 = 5.0;

/// Where a band-relative label is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelParameter {
    /// The task name between a choreography's participant stacks.
    TaskNameBand,
    /// The name of the participant at `index` of the top or bottom list.
    ParticipantBand { top: bool, index: usize },
    /// Next to the message drawn above a choreography.
    NorthMessage,
    /// Next to the message drawn below a choreography.
    SouthMessage,
    /// The header strip along the given side of a pool. Labels on east and
    /// west headers are turned to run along the strip.
    PoolHeader(Side),
}

impl LabelParameter {
    /// Returns `true` if the parameter can place labels of `owner`.
    pub fn supports(&self, owner: &NodeStyle) -> bool {
        match self {
            Self::TaskNameBand | Self::NorthMessage | Self::SouthMessage => {
                owner.as_choreography().is_some()
            }
            Self::ParticipantBand { top, index } => owner
                .as_choreography()
                .is_some_and(|style| style.participant(*top, *index).is_some()),
            Self::PoolHeader(_) => owner.as_pool().is_some(),
        }
    }

    /// Computes the oriented rectangle of a label of `label_size` owned by
    /// `owner` laid out at `layout`.
    ///
    /// Owners of another kind, out-of-range participant indices and hidden
    /// messages yield an empty rectangle at the center of `layout`.
    pub fn geometry(&self, label_size: Size, owner: &NodeStyle, layout: Bounds) -> OrientedRect {
        let geometry = self.resolve(label_size, owner, layout);
        trace!(parameter:? = self, geometry:?; "Resolved label geometry");
        geometry.unwrap_or_else(|| OrientedRect::empty_at(layout.center()))
    }

    fn resolve(&self, label_size: Size, owner: &NodeStyle, layout: Bounds) -> Option<OrientedRect> {
        match self {
            Self::TaskNameBand => {
                let style = owner.as_choreography()?;
                Some(OrientedRect::centered_in(
                    style.task_band_bounds(layout),
                    label_size,
                ))
            }
            Self::ParticipantBand { top, index } => {
                let band = owner.as_choreography()?.band(layout, *top, *index)?;
                Some(OrientedRect::centered_in(band.label_bounds(), label_size))
            }
            Self::NorthMessage | Self::SouthMessage => {
                let top = matches!(self, Self::NorthMessage);
                let envelope = owner.as_choreography()?.message_bounds(layout, top)?;
                let center = Point::new(
                    envelope.max_x() + MESSAGE_LABEL_GAP + label_size.width() / 2.0,
                    envelope.center().y(),
                );
                Some(OrientedRect::new(center, label_size, Rotation::None))
            }
            Self::PoolHeader(side) => {
                let header = owner.as_pool()?.header_bounds_at(layout, *side);
                let rotation = match side {
                    Side::West => Rotation::CounterClockwise,
                    Side::East => Rotation::Clockwise,
                    Side::North | Side::South => Rotation::None,
                };
                Some(OrientedRect::new(header.center(), label_size, rotation))
            }
        }
    }
}

/// The participant a parameter refers to, resolved through its owner.
pub fn participant_of<'a>(parameter: &LabelParameter, owner: &'a NodeStyle) -> Option<&'a Participant> {
    match parameter {
        LabelParameter::ParticipantBand { top, index } => {
            owner.as_choreography()?.participant(*top, *index)
        }
        _ => None,
    }
}
