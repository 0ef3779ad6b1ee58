//! The per-match state machine.
//!
//! One orchestrator instance owns one [`MatchState`] and drives it
//! `Pending → Active → Finished`, fetching both sides' decisions
//! concurrently under a shared deadline each turn and resolving them through
//! the pure engine. Matches never share mutable state with each other; the
//! only cross-match object is the event bus.

use std::cmp::Ordering;
use std::time::Duration;

use chrono::Utc;
use tokio::time::{error::Elapsed, timeout};

use arena_engine::{
    ActionRecord, MatchOutcome, MatchRules, MatchState, MatchStatus, MatchVerdict, RatingDeltas,
    Side, check_winner, process_turn, rating_deltas,
};

use crate::error::ProviderError;
use crate::events::{EventBus, MatchEvent};
use crate::provider::{Decision, DecisionProvider};
use crate::providers::HeuristicProvider;
use crate::view::TurnView;

/// Tunables for a match run.
#[derive(Clone, Debug)]
pub struct OrchestratorConfig {
    pub rules: MatchRules,
    /// Per-side decision budget for each turn.
    pub turn_deadline: Duration,
}

impl OrchestratorConfig {
    pub const DEFAULT_TURN_DEADLINE: Duration = Duration::from_secs(5);
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            rules: MatchRules::default(),
            turn_deadline: Self::DEFAULT_TURN_DEADLINE,
        }
    }
}

/// A finished match plus the rating adjustments it produced, ready for the
/// result sink.
#[derive(Clone, Debug)]
pub struct MatchReport {
    pub state: MatchState,
    pub deltas: RatingDeltas,
}

/// Drives one match to completion.
pub struct MatchOrchestrator {
    config: OrchestratorConfig,
    events: EventBus,
    fallback: HeuristicProvider,
}

impl MatchOrchestrator {
    pub fn new(config: OrchestratorConfig, events: EventBus) -> Self {
        Self {
            config,
            events,
            fallback: HeuristicProvider::new(),
        }
    }

    /// Runs the turn loop until a verdict or the turn cap.
    ///
    /// `ratings` are both sides' pre-match ratings, used to compute the Elo
    /// deltas reported alongside the final state. This function cannot fail:
    /// provider problems degrade to fallback moves and the match always
    /// produces a complete replay.
    pub async fn run(
        &self,
        mut state: MatchState,
        provider1: &dyn DecisionProvider,
        provider2: &dyn DecisionProvider,
        ratings: (i32, i32),
    ) -> MatchReport {
        let rules = self.config.rules.clone();
        let deadline = self.config.turn_deadline;
        let deadline_ms = deadline.as_millis() as u64;

        state.status = MatchStatus::Active;
        state.started_at = Some(Utc::now());
        tracing::info!(
            match_id = %state.id,
            player1 = %state.player1.name,
            player2 = %state.player2.name,
            "match started"
        );
        self.events.publish(MatchEvent::Started {
            match_id: state.id.clone(),
            player1: state.player1.name.clone(),
            player2: state.player2.name.clone(),
        });

        for turn in 1..=rules.max_turns {
            if state.player1.active.is_none() || state.player2.active.is_none() {
                break;
            }
            state.current_turn = turn;

            let view1 = TurnView::for_side(&state, Side::One, deadline_ms);
            let view2 = TurnView::for_side(&state, Side::Two, deadline_ms);

            // Both requests go out before either is awaited. Each carries
            // its own deadline; one side timing out does not cancel the
            // other side's in-flight call.
            let (outcome1, outcome2) = tokio::join!(
                timeout(deadline, provider1.decide(&view1)),
                timeout(deadline, provider2.decide(&view2)),
            );
            let decision1 = self.settle(Side::One, &view1, outcome1);
            let decision2 = self.settle(Side::Two, &view2, outcome2);

            let mut record = process_turn(
                &mut state.player1,
                &mut state.player2,
                decision1.action,
                decision2.action,
                turn,
                &rules,
            );
            attach_narrative(record.record_mut(Side::One), decision1);
            attach_narrative(record.record_mut(Side::Two), decision2);

            self.events.publish(MatchEvent::Turn {
                match_id: state.id.clone(),
                record: record.clone(),
            });
            state.replay.push(record);

            match check_winner(&state.player1, &state.player2, &rules) {
                MatchVerdict::Undecided => {}
                MatchVerdict::Winner(side) => {
                    return self.finish(state, MatchOutcome::Winner(side), ratings);
                }
                MatchVerdict::Draw => {
                    return self.finish(state, MatchOutcome::Draw, ratings);
                }
            }
        }

        // Turn cap reached: whoever has strictly more knockouts takes it.
        let outcome = match state.player1.knockouts.cmp(&state.player2.knockouts) {
            Ordering::Greater => MatchOutcome::Winner(Side::One),
            Ordering::Less => MatchOutcome::Winner(Side::Two),
            Ordering::Equal => MatchOutcome::Draw,
        };
        self.finish(state, outcome, ratings)
    }

    /// Collapses a provider call's outcome into a playable decision,
    /// substituting the heuristic fallback on error or timeout.
    fn settle(
        &self,
        side: Side,
        view: &TurnView,
        outcome: Result<Result<Decision, ProviderError>, Elapsed>,
    ) -> Decision {
        match outcome {
            Ok(Ok(decision)) => decision,
            Ok(Err(error)) => {
                tracing::warn!(
                    match_id = %view.match_id,
                    %side,
                    %error,
                    "decision provider failed, playing fallback"
                );
                let mut decision = self.fallback.choose(view);
                decision.thinking =
                    format!("(Lost contact, instinct takes over.) {}", decision.thinking);
                decision
            }
            Err(_) => {
                tracing::warn!(
                    match_id = %view.match_id,
                    %side,
                    "decision timed out, playing fallback"
                );
                let mut decision = self.fallback.choose(view);
                decision.thinking =
                    format!("(Took too long, instinct takes over.) {}", decision.thinking);
                decision
            }
        }
    }

    fn finish(
        &self,
        mut state: MatchState,
        outcome: MatchOutcome,
        ratings: (i32, i32),
    ) -> MatchReport {
        state.status = MatchStatus::Finished;
        state.outcome = Some(outcome);
        state.finished_at = Some(Utc::now());

        let deltas = rating_deltas(outcome, ratings.0, ratings.1);
        match state.winner_name() {
            Some(winner) => tracing::info!(
                match_id = %state.id,
                %winner,
                turns = state.replay.len(),
                "match finished"
            ),
            None => tracing::info!(
                match_id = %state.id,
                turns = state.replay.len(),
                "match finished in a draw"
            ),
        }

        self.events.publish(MatchEvent::Finished {
            match_id: state.id.clone(),
            state: Box::new(state.clone()),
            deltas,
        });

        MatchReport { state, deltas }
    }
}

fn attach_narrative(record: &mut ActionRecord, decision: Decision) {
    record.token = decision.token;
    record.thinking = decision.thinking;
    record.taunt = decision.taunt;
}
