//! The visible game state handed to decision providers.
//!
//! A side sees its own fighters in full, but only the public face of the
//! opponent: the active fighter's stats and a bench head-count, never the
//! opposing movesets. The same structure is the webhook wire payload, so
//! everything here is serde-serializable.

use serde::{Deserialize, Serialize};

use arena_engine::{EffectKind, ElementType, MatchState, Player, Side, TurnRecord};

/// One attack as shown to its owner.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AttackView {
    pub name: String,
    pub cost: u8,
    pub damage: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<EffectKind>,
}

/// The requesting side's active fighter, moveset included.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OwnFighterView {
    pub name: String,
    pub element: ElementType,
    pub hp: u32,
    pub max_hp: u32,
    pub weakness: ElementType,
    pub retreat_cost: u8,
    pub attacks: Vec<AttackView>,
}

/// A benched fighter summary (own side only).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BenchView {
    pub name: String,
    pub element: ElementType,
    pub hp: u32,
    pub max_hp: u32,
}

/// The opponent's active fighter: public stats only.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FoeFighterView {
    pub name: String,
    pub element: ElementType,
    pub hp: u32,
    pub max_hp: u32,
    pub weakness: ElementType,
}

/// Everything the requesting side knows about itself.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OwnSideView {
    pub name: String,
    pub active: Option<OwnFighterView>,
    pub bench: Vec<BenchView>,
    pub energy: u8,
    pub knockouts: u8,
}

/// Everything the requesting side may know about the opponent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FoeSideView {
    pub name: String,
    pub active: Option<FoeFighterView>,
    pub bench_count: usize,
    pub knockouts: u8,
}

/// A recent turn, from the requesting side's perspective.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub turn: u32,
    pub your_action: String,
    pub your_damage: u32,
    pub foe_action: String,
    pub foe_damage: u32,
}

/// The full request handed to a [`crate::DecisionProvider`] for one turn.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TurnView {
    pub match_id: String,
    pub turn: u32,
    pub you: OwnSideView,
    pub foe: FoeSideView,
    /// Up to the last five resolved turns, oldest first.
    pub history: Vec<HistoryEntry>,
    /// Time budget for this decision, in milliseconds.
    pub deadline_ms: u64,
}

/// How many resolved turns a provider gets to see.
const HISTORY_WINDOW: usize = 5;

impl TurnView {
    /// Snapshots the match from one side's perspective.
    pub fn for_side(state: &MatchState, side: Side, deadline_ms: u64) -> Self {
        let you = state.player(side);
        let foe = state.player(side.other());
        Self {
            match_id: state.id.clone(),
            turn: state.current_turn,
            you: own_side_view(you),
            foe: foe_side_view(foe),
            history: history_window(&state.replay, side),
            deadline_ms,
        }
    }
}

fn own_side_view(player: &Player) -> OwnSideView {
    OwnSideView {
        name: player.name.clone(),
        active: player.active.as_ref().map(|f| OwnFighterView {
            name: f.name.clone(),
            element: f.element,
            hp: f.hp,
            max_hp: f.max_hp,
            weakness: f.weakness,
            retreat_cost: f.retreat_cost,
            attacks: f
                .attacks
                .iter()
                .map(|a| AttackView {
                    name: a.name.clone(),
                    cost: a.energy_cost,
                    damage: a.damage,
                    effect: a.effect.map(|e| e.kind),
                })
                .collect(),
        }),
        bench: player
            .bench
            .iter()
            .map(|f| BenchView {
                name: f.name.clone(),
                element: f.element,
                hp: f.hp,
                max_hp: f.max_hp,
            })
            .collect(),
        energy: player.energy,
        knockouts: player.knockouts,
    }
}

fn foe_side_view(player: &Player) -> FoeSideView {
    FoeSideView {
        name: player.name.clone(),
        active: player.active.as_ref().map(|f| FoeFighterView {
            name: f.name.clone(),
            element: f.element,
            hp: f.hp,
            max_hp: f.max_hp,
            weakness: f.weakness,
        }),
        bench_count: player.bench.len(),
        knockouts: player.knockouts,
    }
}

fn history_window(replay: &[TurnRecord], side: Side) -> Vec<HistoryEntry> {
    let start = replay.len().saturating_sub(HISTORY_WINDOW);
    replay[start..]
        .iter()
        .map(|record| {
            let yours = record.record(side);
            let theirs = record.record(side.other());
            HistoryEntry {
                turn: record.turn,
                your_action: yours.token.clone(),
                your_damage: yours.damage,
                foe_action: theirs.token.clone(),
                foe_damage: theirs.damage,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_content::builtin_teams;
    use arena_engine::MatchState;

    fn sample_match() -> MatchState {
        let teams = builtin_teams();
        let p1 = teams[0].build_side("p1", "Cinder").unwrap();
        let p2 = teams[1].build_side("p2", "Tide").unwrap();
        MatchState::new("match_test", p1, p2)
    }

    #[test]
    fn own_view_exposes_moveset_but_foe_view_does_not() {
        let state = sample_match();
        let view = TurnView::for_side(&state, Side::One, 5000);
        let own = view.you.active.as_ref().unwrap();
        assert!(!own.attacks.is_empty());
        assert!(view.foe.active.is_some());
        assert_eq!(view.foe.bench_count, 2);

        let json = serde_json::to_value(&view).unwrap();
        assert!(json["foe"]["active"].get("attacks").is_none());
    }

    #[test]
    fn views_are_symmetric_across_sides() {
        let state = sample_match();
        let one = TurnView::for_side(&state, Side::One, 5000);
        let two = TurnView::for_side(&state, Side::Two, 5000);
        assert_eq!(one.you.name, two.foe.name);
        assert_eq!(two.you.name, one.foe.name);
    }
}
