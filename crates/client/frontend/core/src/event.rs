//! Events published by the sync worker and utilities for reacting to them.
use crate::message::MessageLog;
use crate::view_model::SyncAction;

/// Notifications broadcast to every frontend subscriber.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncEvent {
    /// A new [`crate::ViewState`] snapshot is available.
    StateChanged,
    ActionStarted(SyncAction),
    ActionFinished { action: SyncAction, succeeded: bool },
    /// The single user-facing success message, sent after a confirmed claim.
    ClaimAcknowledged,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct EventImpact {
    pub requires_redraw: bool,
}

impl EventImpact {
    pub const fn none() -> Self {
        Self {
            requires_redraw: false,
        }
    }

    pub const fn redraw() -> Self {
        Self {
            requires_redraw: true,
        }
    }

    pub fn combine(self, other: Self) -> Self {
        Self {
            requires_redraw: self.requires_redraw || other.requires_redraw,
        }
    }
}

pub trait EventConsumer {
    fn on_event(&mut self, event: &SyncEvent) -> EventImpact;
    fn message_log(&self) -> &MessageLog;
    fn message_log_mut(&mut self) -> &mut MessageLog;
}
