//! Domain events emitted by account operations.
//!
//! Events are published on the in-process event bus and consumed by
//! loggers and any other interested subscriber.

pub mod account;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use account::{AccountEvent, BulkActionKind};

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The account that caused the event (if applicable).
    pub actor_id: Option<Uuid>,
    /// The event payload.
    pub payload: AccountEvent,
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(actor_id: Option<Uuid>, payload: AccountEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_id,
            payload,
        }
    }
}
