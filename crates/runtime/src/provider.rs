//! Asynchronous abstraction for sourcing a side's turn decisions.
//!
//! The orchestrator plugs in [`DecisionProvider`] implementations so a match
//! can run against a local policy, a remote participant's webhook, or a
//! language model without caring which.

use async_trait::async_trait;

use arena_engine::TurnAction;

use crate::error::ProviderError;
use crate::view::TurnView;

/// A chosen action plus the narrative that travels with it into the replay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    pub action: TurnAction,
    /// The raw wire token the decision arrived as (or the canonical token
    /// for locally generated decisions).
    pub token: String,
    /// Strategic reasoning shown to spectators.
    pub thinking: String,
    /// In-character trash talk.
    pub taunt: String,
}

impl Decision {
    /// A bare decision with no narrative attached.
    pub fn from_action(action: TurnAction) -> Self {
        Self {
            action,
            token: action.token(),
            thinking: String::new(),
            taunt: String::new(),
        }
    }
}

/// Trait for producing one side's action each turn.
///
/// Different implementations can handle:
/// - A deterministic local policy (the universal fallback)
/// - A remote participant's signed webhook
/// - A language-model completion
/// - Testing fixtures
#[async_trait]
pub trait DecisionProvider: Send + Sync {
    /// Produce an action for the side described by `view`.
    ///
    /// Implementations should respect `view.deadline_ms` where they can; the
    /// orchestrator enforces it regardless and substitutes a fallback on
    /// timeout or error.
    async fn decide(&self, view: &TurnView) -> Result<Decision, ProviderError>;
}

/// A provider that always plays the same action.
/// Useful for testing or as a stand-in opponent.
pub struct FixedProvider(pub TurnAction);

#[async_trait]
impl DecisionProvider for FixedProvider {
    async fn decide(&self, _view: &TurnView) -> Result<Decision, ProviderError> {
        Ok(Decision::from_action(self.0))
    }
}
