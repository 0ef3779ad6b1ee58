//! Unified error types surfaced by the runtime.
//!
//! Provider failures are deliberately shallow: the orchestrator treats every
//! one of them the same way (substitute the heuristic fallback and keep the
//! match moving), so the variants exist for logs and tests rather than for
//! recovery strategies.

use thiserror::Error;

/// A decision provider failed to produce an action.
///
/// This never ends a match. The orchestrator logs it and plays the fallback.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to encode decision payload")]
    Encode(#[source] serde_json::Error),

    #[error("transport failure calling decision endpoint")]
    Transport(#[source] reqwest::Error),

    #[error("decision endpoint returned status {status}")]
    BadStatus { status: u16 },

    #[error("malformed decision reply: {reason}")]
    MalformedReply { reason: String },

    #[error("language model completion failed: {reason}")]
    Completion { reason: String },
}

/// Synchronous failures at the arena boundary (registration, matchmaking).
#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("unknown participant {id}")]
    UnknownParticipant { id: String },

    #[error("participant name {name:?} is invalid: {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("participant name {name:?} is already taken")]
    NameTaken { name: String },

    #[error(transparent)]
    Roster(#[from] arena_engine::RosterError),
}
