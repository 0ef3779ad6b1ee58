//! Match lifecycle events for spectators and other consumers.
//!
//! Publication is best-effort over a broadcast channel: consumers may lag or
//! be absent entirely with no effect on match correctness.

use serde::Serialize;
use tokio::sync::broadcast;

use arena_engine::{MatchState, RatingDeltas, TurnRecord};

/// Events emitted while a match runs.
#[derive(Clone, Debug, Serialize)]
pub enum MatchEvent {
    /// A match entered its turn loop.
    Started {
        match_id: String,
        player1: String,
        player2: String,
    },
    /// One turn resolved.
    Turn {
        match_id: String,
        record: TurnRecord,
    },
    /// The match finished; carries the full final state and rating deltas.
    Finished {
        match_id: String,
        state: Box<MatchState>,
        deltas: RatingDeltas,
    },
}

impl MatchEvent {
    pub fn match_id(&self) -> &str {
        match self {
            Self::Started { match_id, .. }
            | Self::Turn { match_id, .. }
            | Self::Finished { match_id, .. } => match_id,
        }
    }
}

/// Broadcast-based event bus shared by every match the arena runs.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<MatchEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event. Having no subscribers is normal, not an error.
    pub fn publish(&self, event: MatchEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!("no subscribers for match event");
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MatchEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
