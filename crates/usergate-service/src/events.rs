//! In-process account event bus.

use tokio::sync::broadcast;
use tracing::trace;

use usergate_core::events::{AccountEvent, DomainEvent};
use usergate_core::types::AccountId;

const DEFAULT_CAPACITY: usize = 256;

/// Fan-out of account events to any number of subscribers.
///
/// Publishing never fails: with no subscribers the event is dropped, and
/// slow subscribers observe `Lagged` rather than blocking publishers.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Create a bus with the given per-subscriber buffer.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish an event caused by `actor`.
    pub fn publish(&self, actor: Option<AccountId>, payload: AccountEvent) {
        let event = DomainEvent::new(actor.map(AccountId::into_uuid), payload);
        let delivered = self.tx.send(event).unwrap_or(0);
        trace!(delivered, "Account event published");
    }

    /// Subscribe to all events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
