//! Async orchestration for the battle arena.
//!
//! This crate wires the decision provider abstraction, the matchmaking
//! queue, and the event bus into a cohesive runtime over the pure
//! `arena-engine` rules. Consumers construct an [`ArenaService`] to register
//! participants and let the queue pair them, or drive a single
//! [`MatchOrchestrator`] directly.
//!
//! Modules are organized by responsibility:
//! - [`orchestrator`] hosts the per-match state machine
//! - [`provider`] defines the decision-sourcing trait; [`providers`] holds
//!   the heuristic, webhook, and language-model implementations
//! - [`arena`] owns matchmaking and supervised match execution
//! - [`events`] carries best-effort lifecycle events to spectators
//! - [`registry`] and [`sink`] are the long-lived stores the service owns
pub mod arena;
pub mod error;
pub mod events;
pub mod orchestrator;
pub mod provider;
pub mod providers;
pub mod registry;
pub mod sink;
pub mod view;

pub use arena::ArenaService;
pub use error::{ArenaError, ProviderError};
pub use events::{EventBus, MatchEvent};
pub use orchestrator::{MatchOrchestrator, MatchReport, OrchestratorConfig};
pub use provider::{Decision, DecisionProvider, FixedProvider};
pub use providers::{HeuristicProvider, LlmConfig, LlmProvider, WebhookProvider};
pub use registry::{DecisionSource, Participant, ParticipantRegistry};
pub use sink::{MemorySink, ResultSink};
pub use view::TurnView;
