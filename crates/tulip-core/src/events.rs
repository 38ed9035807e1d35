//! Auction notifications and the in-memory event log.

use serde::{Deserialize, Serialize};

use crate::types::{Amount, AuctionId, Identity};

/// Notification emitted by the engine after a state change commits.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "kind")]
pub enum AuctionEvent {
    /// A new auction was registered. `duration` is the effective duration,
    /// after the zero-duration default has been applied.
    Created {
        index: AuctionId,
        item: String,
        starting_price: Amount,
        duration: u64,
    },
    /// An auction was bought.
    Ended {
        index: AuctionId,
        final_price: Amount,
        buyer: Identity,
    },
}

impl AuctionEvent {
    /// Registry index the event refers to.
    pub fn index(&self) -> AuctionId {
        match self {
            Self::Created { index, .. } | Self::Ended { index, .. } => *index,
        }
    }
}

/// Receiver of engine notifications.
///
/// Delivery is synchronous. The engine only emits once the triggering
/// operation can no longer fail, so a reverted call is never observed.
pub trait EventSink: Send {
    fn emit(&mut self, event: AuctionEvent);
}

/// Event sink that records every notification in order.
#[derive(Debug, Default, Clone)]
pub struct MemoryEventLog {
    events: Vec<AuctionEvent>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[AuctionEvent] {
        &self.events
    }

    pub fn last(&self) -> Option<&AuctionEvent> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for MemoryEventLog {
    fn emit(&mut self, event: AuctionEvent) {
        self.events.push(event);
    }
}
