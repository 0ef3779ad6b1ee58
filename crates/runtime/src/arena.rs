//! The arena service: matchmaking queue and match execution.
//!
//! One `ArenaService` is constructed at process start and owns the
//! participant registry, the FIFO queue, the event bus, and the result sink.
//! Matches it pairs up run as supervised tokio tasks whose outcomes are
//! always logged, never silently dropped.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use arena_engine::{MatchOutcome, MatchState, Side};

use crate::error::ArenaError;
use crate::events::EventBus;
use crate::orchestrator::{MatchOrchestrator, MatchReport, OrchestratorConfig};
use crate::provider::DecisionProvider;
use crate::providers::{HeuristicProvider, LlmProvider, WebhookProvider};
use crate::registry::{DecisionSource, Participant, ParticipantRegistry};
use crate::sink::ResultSink;

/// Everything needed to run one match.
struct MatchSetup {
    state: MatchState,
    provider1: Arc<dyn DecisionProvider>,
    provider2: Arc<dyn DecisionProvider>,
    participant1: Participant,
    participant2: Participant,
}

/// Long-lived matchmaking and execution service.
pub struct ArenaService {
    registry: Arc<ParticipantRegistry>,
    sink: Arc<dyn ResultSink>,
    events: EventBus,
    config: OrchestratorConfig,
    queue: Mutex<VecDeque<String>>,
}

impl ArenaService {
    pub fn new(
        registry: Arc<ParticipantRegistry>,
        sink: Arc<dyn ResultSink>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            registry,
            sink,
            events: EventBus::new(),
            config,
            queue: Mutex::new(VecDeque::new()),
        }
    }

    pub fn registry(&self) -> &ParticipantRegistry {
        &self.registry
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Adds a participant to the matchmaking queue and pairs whatever the
    /// queue now allows. Returns the 1-based queue position, or 0 if the
    /// caller was paired immediately.
    ///
    /// Joining with an unknown id is rejected synchronously and affects
    /// nobody else in the queue.
    pub fn join(&self, id: &str) -> Result<usize, ArenaError> {
        if !self.registry.contains(id) {
            return Err(ArenaError::UnknownParticipant { id: id.to_string() });
        }

        // "Read length, pop two, construct match" is a single critical
        // section so concurrent joins can never double-pair anyone.
        let mut pairs = Vec::new();
        let position = {
            let mut queue = lock(&self.queue);
            if !queue.iter().any(|q| q == id) {
                queue.push_back(id.to_string());
            }
            while queue.len() >= 2 {
                let first = queue.pop_front();
                let second = queue.pop_front();
                if let (Some(first), Some(second)) = (first, second) {
                    pairs.push((first, second));
                }
            }
            queue
                .iter()
                .position(|q| q == id)
                .map(|i| i + 1)
                .unwrap_or(0)
        };

        for (first, second) in pairs {
            self.spawn_match(&first, &second);
        }
        Ok(position)
    }

    /// Removes a participant from the queue, returning the 1-based position
    /// it held, or `None` if it was not queued (a no-op).
    pub fn leave(&self, id: &str) -> Option<usize> {
        let mut queue = lock(&self.queue);
        let position = queue.iter().position(|q| q == id)?;
        queue.remove(position);
        Some(position + 1)
    }

    pub fn queue_len(&self) -> usize {
        lock(&self.queue).len()
    }

    /// Builds a `Pending` match between two registered participants without
    /// running it.
    pub fn create_match(&self, id1: &str, id2: &str) -> Result<MatchState, ArenaError> {
        Ok(self.prepare_match(id1, id2)?.state)
    }

    /// Runs a match between two registered participants to completion on the
    /// caller's task. Used for exhibitions and tools; queue pairings go
    /// through [`Self::join`] instead.
    pub async fn run_match(&self, id1: &str, id2: &str) -> Result<MatchReport, ArenaError> {
        let setup = self.prepare_match(id1, id2)?;
        Ok(Self::execute(
            self.config.clone(),
            self.events.clone(),
            Arc::clone(&self.registry),
            Arc::clone(&self.sink),
            setup,
        )
        .await)
    }

    /// Schedules a paired match as a supervised background task.
    fn spawn_match(&self, id1: &str, id2: &str) {
        let setup = match self.prepare_match(id1, id2) {
            Ok(setup) => setup,
            Err(error) => {
                tracing::error!(%id1, %id2, %error, "failed to set up paired match");
                return;
            }
        };

        let match_id = setup.state.id.clone();
        tracing::info!(
            %match_id,
            player1 = %setup.participant1.name,
            player2 = %setup.participant2.name,
            "queue paired a match"
        );

        let config = self.config.clone();
        let events = self.events.clone();
        let registry = Arc::clone(&self.registry);
        let sink = Arc::clone(&self.sink);
        let task = tokio::spawn(async move {
            Self::execute(config, events, registry, sink, setup).await
        });

        // Supervise the work item: panics and cancellations are reported,
        // not swallowed.
        tokio::spawn(async move {
            match task.await {
                Ok(report) => {
                    tracing::debug!(match_id = %report.state.id, "match task completed")
                }
                Err(error) => tracing::error!(%match_id, %error, "match task failed"),
            }
        });
    }

    fn prepare_match(&self, id1: &str, id2: &str) -> Result<MatchSetup, ArenaError> {
        let participant1 = self
            .registry
            .get(id1)
            .ok_or_else(|| ArenaError::UnknownParticipant { id: id1.to_string() })?;
        let participant2 = self
            .registry
            .get(id2)
            .ok_or_else(|| ArenaError::UnknownParticipant { id: id2.to_string() })?;

        let player1 = participant1
            .team
            .build_side(&participant1.id, &participant1.name)?;
        let player2 = participant2
            .team
            .build_side(&participant2.id, &participant2.name)?;

        let match_id = format!("match_{}_{}", Utc::now().timestamp_millis(), short_nonce());
        Ok(MatchSetup {
            state: MatchState::new(match_id, player1, player2),
            provider1: make_provider(&participant1),
            provider2: make_provider(&participant2),
            participant1,
            participant2,
        })
    }

    /// Runs the orchestrator and lands the result: rating updates in the
    /// registry, the full report in the sink.
    async fn execute(
        config: OrchestratorConfig,
        events: EventBus,
        registry: Arc<ParticipantRegistry>,
        sink: Arc<dyn ResultSink>,
        setup: MatchSetup,
    ) -> MatchReport {
        let ratings = (setup.participant1.rating, setup.participant2.rating);
        let orchestrator = MatchOrchestrator::new(config, events);
        let report = orchestrator
            .run(
                setup.state,
                setup.provider1.as_ref(),
                setup.provider2.as_ref(),
                ratings,
            )
            .await;

        let (won1, won2) = match report.state.outcome {
            Some(MatchOutcome::Winner(Side::One)) => (true, false),
            Some(MatchOutcome::Winner(Side::Two)) => (false, true),
            _ => (false, false),
        };
        registry.apply_result(&setup.participant1.id, report.deltas.side1, won1);
        registry.apply_result(&setup.participant2.id, report.deltas.side2, won2);

        if let Err(error) = sink.record(&report).await {
            tracing::error!(
                match_id = %report.state.id,
                %error,
                "result sink rejected finished match"
            );
        }
        report
    }
}

fn make_provider(participant: &Participant) -> Arc<dyn DecisionProvider> {
    match &participant.source {
        DecisionSource::Heuristic => Arc::new(HeuristicProvider::new()),
        DecisionSource::Webhook { callback_url } => Arc::new(WebhookProvider::new(
            callback_url.clone(),
            participant.secret.clone(),
        )),
        DecisionSource::Llm(config) => Arc::new(
            LlmProvider::new(config.clone()).with_personality(participant.team.personality.clone()),
        ),
    }
}

fn short_nonce() -> String {
    use rand::Rng;
    format!("{:04x}", rand::thread_rng().gen_range(0u32..0x1_0000))
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
