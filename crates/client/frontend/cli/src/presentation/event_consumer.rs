//! Maintains the CLI message log in response to sync events.
use client_frontend_core::{
    SyncEvent,
    event::{EventConsumer, EventImpact},
    message::MessageLog,
};

pub const CLAIM_ACKNOWLEDGEMENT: &str = "Successfully claimed Crypto Dev Tokens";

pub struct CliEventConsumer {
    log: MessageLog,
}

impl CliEventConsumer {
    pub fn new(log: MessageLog) -> Self {
        Self { log }
    }
}

impl EventConsumer for CliEventConsumer {
    fn on_event(&mut self, event: &SyncEvent) -> EventImpact {
        match event {
            SyncEvent::ClaimAcknowledged => {
                self.log.push_info(CLAIM_ACKNOWLEDGEMENT);
                EventImpact::redraw()
            }
            // Failures stay in the log file; the view shows the reset values.
            SyncEvent::StateChanged
            | SyncEvent::ActionStarted(_)
            | SyncEvent::ActionFinished { .. } => EventImpact::redraw(),
        }
    }

    fn message_log(&self) -> &MessageLog {
        &self.log
    }

    fn message_log_mut(&mut self) -> &mut MessageLog {
        &mut self.log
    }
}
