use std::time::Duration;

use async_trait::async_trait;

use arena_engine::{
    Attack, ElementType, Fighter, MatchOutcome, MatchState, MatchStatus, Player, Side, TurnAction,
};
use arena_runtime::{
    Decision, DecisionProvider, EventBus, FixedProvider, MatchEvent, MatchOrchestrator,
    OrchestratorConfig, ProviderError, TurnView,
};

/// Provider that never answers inside any reasonable deadline.
struct SleepyProvider;

#[async_trait]
impl DecisionProvider for SleepyProvider {
    async fn decide(&self, _view: &TurnView) -> Result<Decision, ProviderError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Decision::from_action(TurnAction::Pass))
    }
}

/// Provider that fails on the transport level every turn.
struct BrokenProvider;

#[async_trait]
impl DecisionProvider for BrokenProvider {
    async fn decide(&self, _view: &TurnView) -> Result<Decision, ProviderError> {
        Err(ProviderError::MalformedReply {
            reason: "no decision today".to_string(),
        })
    }
}

fn attack(name: &str, cost: u8, damage: u32) -> Attack {
    Attack {
        name: name.into(),
        energy_cost: cost,
        damage,
        effect: None,
        description: String::new(),
    }
}

fn fighter(name: &str, hp: u32, attacks: Vec<Attack>) -> Fighter {
    Fighter {
        name: name.into(),
        element: ElementType::Normal,
        hp,
        max_hp: hp,
        weakness: ElementType::Fighting,
        retreat_cost: 1,
        catchphrase: String::new(),
        attacks,
    }
}

fn quick_config() -> OrchestratorConfig {
    OrchestratorConfig {
        turn_deadline: Duration::from_millis(20),
        ..OrchestratorConfig::default()
    }
}

fn lopsided_match() -> MatchState {
    let strong = Player::from_roster(
        "strong",
        "Strong",
        vec![fighter("Crusher", 200, vec![attack("Flatten", 1, 200)])],
    );
    let weak = Player::from_roster(
        "weak",
        "Weak",
        vec![fighter("Pebble", 50, vec![attack("Poke", 1, 5)])],
    );
    MatchState::new("match_lopsided", strong, weak)
}

#[tokio::test]
async fn decisive_match_finishes_with_winner_and_antisymmetric_deltas() {
    let orchestrator = MatchOrchestrator::new(quick_config(), EventBus::new());
    let p1 = FixedProvider(TurnAction::Attack { index: 0 });
    let p2 = FixedProvider(TurnAction::Attack { index: 0 });

    let report = orchestrator
        .run(lopsided_match(), &p1, &p2, (1200, 1200))
        .await;

    assert_eq!(report.state.status, MatchStatus::Finished);
    assert_eq!(report.state.outcome, Some(MatchOutcome::Winner(Side::One)));
    assert_eq!(report.state.winner_name(), Some("Strong"));
    assert_eq!(report.deltas.side1, 16);
    assert_eq!(report.deltas.side2, -16);
    // One exchange was enough.
    assert_eq!(report.state.replay.len(), 1);
}

#[tokio::test]
async fn events_arrive_in_lifecycle_order() {
    let events = EventBus::new();
    let mut rx = events.subscribe();
    let orchestrator = MatchOrchestrator::new(quick_config(), events);
    let p1 = FixedProvider(TurnAction::Attack { index: 0 });
    let p2 = FixedProvider(TurnAction::Attack { index: 0 });

    let report = orchestrator
        .run(lopsided_match(), &p1, &p2, (1200, 1200))
        .await;

    let mut received = Vec::new();
    while let Ok(event) = rx.try_recv() {
        received.push(event);
    }

    assert!(matches!(received.first(), Some(MatchEvent::Started { .. })));
    assert!(matches!(received.last(), Some(MatchEvent::Finished { .. })));
    let turn_events = received
        .iter()
        .filter(|e| matches!(e, MatchEvent::Turn { .. }))
        .count();
    assert_eq!(turn_events, report.state.replay.len());
}

#[tokio::test]
async fn total_timeout_on_both_sides_still_finishes_within_the_cap() {
    let config = quick_config();
    let max_turns = config.rules.max_turns as usize;
    let orchestrator = MatchOrchestrator::new(config, EventBus::new());

    let report = orchestrator
        .run(lopsided_match(), &SleepyProvider, &SleepyProvider, (1200, 1200))
        .await;

    assert_eq!(report.state.status, MatchStatus::Finished);
    assert!(report.state.outcome.is_some());
    assert!(report.state.replay.len() <= max_turns);
    // Every turn was decided by the fallback and narrated as such.
    assert!(
        report
            .state
            .replay
            .iter()
            .all(|r| r.side1.thinking.contains("instinct takes over"))
    );
}

#[tokio::test]
async fn provider_errors_become_fallback_moves_not_match_failures() {
    let orchestrator = MatchOrchestrator::new(quick_config(), EventBus::new());
    let p2 = FixedProvider(TurnAction::Attack { index: 0 });

    let report = orchestrator
        .run(lopsided_match(), &BrokenProvider, &p2, (1200, 1200))
        .await;

    assert_eq!(report.state.status, MatchStatus::Finished);
    let first = &report.state.replay[0];
    assert!(first.side1.thinking.contains("instinct takes over"));
    // The fallback still played a real move for the strong side.
    assert!(matches!(first.side1.action, TurnAction::Attack { .. }));
}

#[tokio::test]
async fn draw_when_cap_expires_with_level_knockouts() {
    let orchestrator = MatchOrchestrator::new(quick_config(), EventBus::new());
    // Nobody can afford anything: passing contest to the cap.
    let p1 = FixedProvider(TurnAction::Pass);
    let p2 = FixedProvider(TurnAction::Pass);

    let report = orchestrator
        .run(lopsided_match(), &p1, &p2, (1300, 1100))
        .await;

    assert_eq!(report.state.status, MatchStatus::Finished);
    assert_eq!(report.state.outcome, Some(MatchOutcome::Draw));
    assert_eq!(report.state.replay.len(), 30);
    assert_eq!(report.deltas.side1, 0);
    assert_eq!(report.deltas.side2, 0);
}
