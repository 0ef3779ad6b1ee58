//! Per-turn resolution: the reducer that applies both sides' actions.

use serde::{Deserialize, Serialize};

use super::attack::execute_attack;
use crate::action::TurnAction;
use crate::config::MatchRules;
use crate::roster::Player;

/// The two sides of a match. Side one always resolves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    One,
    Two,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One => f.write_str("side 1"),
            Self::Two => f.write_str("side 2"),
        }
    }
}

/// One side's share of a [`TurnRecord`].
///
/// `token`, `thinking`, and `taunt` are filled in by the orchestrator from
/// the decision that produced the action; the resolution itself only knows
/// the structured action and its numeric consequences.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub action: TurnAction,
    pub token: String,
    #[serde(default)]
    pub thinking: String,
    #[serde(default)]
    pub taunt: String,
    pub damage: u32,
    pub energy_spent: u8,
    pub healed: u32,
    /// Whether this side's active fighter was knocked out this turn.
    pub knocked_out: bool,
}

impl ActionRecord {
    fn new(action: TurnAction) -> Self {
        Self {
            action,
            token: action.token(),
            thinking: String::new(),
            taunt: String::new(),
            damage: 0,
            energy_spent: 0,
            healed: 0,
            knocked_out: false,
        }
    }
}

/// Append-only record of one resolved turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub side1: ActionRecord,
    pub side2: ActionRecord,
    /// Human-readable narration of everything that happened, in resolution
    /// order.
    pub events: Vec<String>,
}

impl TurnRecord {
    pub fn record(&self, side: Side) -> &ActionRecord {
        match side {
            Side::One => &self.side1,
            Side::Two => &self.side2,
        }
    }

    pub fn record_mut(&mut self, side: Side) -> &mut ActionRecord {
        match side {
            Side::One => &mut self.side1,
            Side::Two => &mut self.side2,
        }
    }
}

/// Resolves one full turn.
///
/// Order of operations is fixed and is itself a rule:
///
/// 1. Both sides regenerate +1 energy (capped), unconditionally.
/// 2. Side 1's action is applied in full.
/// 3. Side 2's action is applied in full.
/// 4. Knockouts are resolved, side 1's credit first.
///
/// Simultaneous lethal damage therefore lands side-1-first in the event log
/// and in the knockout counters. This tie-break is not configurable.
pub fn process_turn(
    p1: &mut Player,
    p2: &mut Player,
    action1: TurnAction,
    action2: TurnAction,
    turn: u32,
    rules: &MatchRules,
) -> TurnRecord {
    let mut record = TurnRecord {
        turn,
        side1: ActionRecord::new(action1),
        side2: ActionRecord::new(action2),
        events: Vec::new(),
    };

    p1.gain_energy(rules);
    p2.gain_energy(rules);

    apply_action(p1, p2, action1, &mut record.side1, &mut record.events, rules);
    apply_action(p2, p1, action2, &mut record.side2, &mut record.events, rules);

    // Side 1's knockouts are credited before side 2's: the same
    // side-1-first ordering used for action application.
    record.side2.knocked_out = resolve_knockout(p2, p1, &mut record.events, rules);
    record.side1.knocked_out = resolve_knockout(p1, p2, &mut record.events, rules);

    record
}

/// Applies a single side's action against its foe, narrating into `events`.
///
/// Invalid choices (bad indices, unaffordable costs) fizzle with a logged
/// reason and cost nothing; the turn always continues.
fn apply_action(
    side: &mut Player,
    foe: &mut Player,
    action: TurnAction,
    record: &mut ActionRecord,
    events: &mut Vec<String>,
    rules: &MatchRules,
) {
    match action {
        TurnAction::Attack { index } => {
            let energy = side.energy;
            let (Some(attacker), Some(defender)) = (side.active.as_mut(), foe.active.as_mut())
            else {
                events.push(format!("{} has no fighter able to attack.", side.name));
                return;
            };
            let outcome = execute_attack(attacker, defender, index, energy, rules);
            defender.take_damage(outcome.damage);
            side.spend_energy(outcome.energy_spent);
            record.damage = outcome.damage;
            record.energy_spent = outcome.energy_spent;
            record.healed = outcome.healed;
            events.push(outcome.description);
        }
        TurnAction::Retreat { bench_index } => {
            let Some(active) = side.active.as_ref() else {
                events.push(format!("{} has no fighter to retreat.", side.name));
                return;
            };
            let Some(target) = side.bench.get(bench_index) else {
                events.push(format!(
                    "{} tries to retreat but bench slot {} is empty!",
                    side.name, bench_index
                ));
                return;
            };
            if target.is_knocked_out() {
                events.push(format!(
                    "{} cannot retreat into the knocked out {}!",
                    side.name, target.name
                ));
                return;
            }
            let cost = active.retreat_cost;
            if side.energy < cost {
                events.push(format!(
                    "{} doesn't have enough energy to retreat {} ({} needed, {} available)!",
                    side.name, active.name, cost, side.energy
                ));
                return;
            }
            let outgoing = active.name.clone();
            side.spend_energy(cost);
            side.swap_active(bench_index);
            record.energy_spent = cost;
            let incoming = side
                .active
                .as_ref()
                .map(|f| f.name.clone())
                .unwrap_or_default();
            events.push(format!(
                "{} retreats {} and sends out {}!",
                side.name, outgoing, incoming
            ));
        }
        TurnAction::Pass => {
            events.push(format!("{} passes the turn.", side.name));
        }
    }
}

/// Checks whether `downed`'s active fighter fell this turn; if so, credits
/// `scorer` and promotes the first viable bench replacement (or clears the
/// active slot when none remains). Returns true on a knockout.
fn resolve_knockout(
    downed: &mut Player,
    scorer: &mut Player,
    events: &mut Vec<String>,
    rules: &MatchRules,
) -> bool {
    let fallen = match downed.active.as_ref() {
        Some(active) if active.is_knocked_out() => active.name.clone(),
        _ => return false,
    };

    scorer.knockouts += 1;
    events.push(format!(
        "{} is knocked out! {} scores a knockout ({}/{})!",
        fallen, scorer.name, scorer.knockouts, rules.knockouts_to_win
    ));

    match downed.promote_replacement() {
        Some(next) => events.push(format!("{} sends out {}!", downed.name, next)),
        None => events.push(format!("{} has no fighters left!", downed.name)),
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Attack, ElementType, Fighter};

    fn attack(name: &str, cost: u8, damage: u32) -> Attack {
        Attack {
            name: name.into(),
            energy_cost: cost,
            damage,
            effect: None,
            description: String::new(),
        }
    }

    fn fighter(
        name: &str,
        element: ElementType,
        weakness: ElementType,
        hp: u32,
        attacks: Vec<Attack>,
    ) -> Fighter {
        Fighter {
            name: name.into(),
            element,
            hp,
            max_hp: hp.max(100),
            weakness,
            retreat_cost: 1,
            catchphrase: String::new(),
            attacks,
        }
    }

    fn side(name: &str, fighters: Vec<Fighter>) -> Player {
        Player::from_roster(name.to_ascii_lowercase(), name, fighters)
    }

    #[test]
    fn emberclaw_versus_tidecaller_opening_exchange() {
        let rules = MatchRules::default();
        // Emberclaw is weak to water; Tidecaller attacks with the advantage.
        let mut p1 = side(
            "Cinder",
            vec![fighter(
                "Emberclaw",
                ElementType::Fire,
                ElementType::Water,
                100,
                vec![attack("Flame Rake", 1, 30)],
            )],
        );
        let mut p2 = side(
            "Tide",
            vec![fighter(
                "Tidecaller",
                ElementType::Water,
                ElementType::Grass,
                100,
                vec![attack("Riptide", 1, 25)],
            )],
        );

        let record = process_turn(
            &mut p1,
            &mut p2,
            TurnAction::Attack { index: 0 },
            TurnAction::Attack { index: 0 },
            1,
            &rules,
        );

        assert_eq!(p1.active.as_ref().unwrap().hp, 55); // 25 base + 20 bonus
        assert_eq!(p2.active.as_ref().unwrap().hp, 70);
        assert_eq!(p1.energy, 0); // regen +1, spend 1
        assert_eq!(p2.energy, 0);
        assert_eq!(record.side1.damage, 30);
        assert_eq!(record.side2.damage, 45);
        assert!(!record.side1.knocked_out);
        assert!(!record.side2.knocked_out);
    }

    #[test]
    fn retreat_fails_on_insufficient_energy_while_opponent_resolves() {
        let rules = MatchRules::default();
        let mut retreating = fighter(
            "Wall",
            ElementType::Normal,
            ElementType::Fighting,
            100,
            vec![attack("Bump", 1, 10)],
        );
        retreating.retreat_cost = 2;
        let mut p1 = side(
            "Turtle",
            vec![
                retreating,
                fighter(
                    "Backup",
                    ElementType::Normal,
                    ElementType::Fighting,
                    100,
                    vec![attack("Bump", 1, 10)],
                ),
            ],
        );
        let mut p2 = side(
            "Striker",
            vec![fighter(
                "Lancer",
                ElementType::Fighting,
                ElementType::Psychic,
                100,
                vec![attack("Jab", 1, 20)],
            )],
        );

        // Energy 0 at turn start: after regen the pool holds 1, below the
        // retreat cost of 2. The retreat must fizzle in place while the
        // opposing attack still lands.
        let record = process_turn(
            &mut p1,
            &mut p2,
            TurnAction::Retreat { bench_index: 0 },
            TurnAction::Attack { index: 0 },
            1,
            &rules,
        );

        assert_eq!(p1.active.as_ref().unwrap().name, "Wall");
        assert_eq!(p1.energy, 1); // nothing spent
        assert!(
            record
                .events
                .iter()
                .any(|e| e.contains("doesn't have enough energy to retreat"))
        );
        // Fighting hits Wall's weakness for 20 + 20.
        assert_eq!(p1.active.as_ref().unwrap().hp, 60);
    }

    #[test]
    fn simultaneous_lethal_damage_credits_side_one_first() {
        let rules = MatchRules::default();
        let mut p1 = side(
            "First",
            vec![fighter(
                "GlassA",
                ElementType::Fire,
                ElementType::Water,
                10,
                vec![attack("Blast", 1, 200)],
            )],
        );
        let mut p2 = side(
            "Second",
            vec![fighter(
                "GlassB",
                ElementType::Water,
                ElementType::Fire,
                10,
                vec![attack("Blast", 1, 200)],
            )],
        );

        let record = process_turn(
            &mut p1,
            &mut p2,
            TurnAction::Attack { index: 0 },
            TurnAction::Attack { index: 0 },
            1,
            &rules,
        );

        assert!(record.side1.knocked_out);
        assert!(record.side2.knocked_out);
        assert_eq!(p1.knockouts, 1);
        assert_eq!(p2.knockouts, 1);

        // Side 1's credit is narrated before side 2's.
        let first_ko = record
            .events
            .iter()
            .position(|e| e.contains("First scores a knockout"))
            .expect("side 1 knockout logged");
        let second_ko = record
            .events
            .iter()
            .position(|e| e.contains("Second scores a knockout"))
            .expect("side 2 knockout logged");
        assert!(first_ko < second_ko);
        assert!(p1.active.is_none());
        assert!(p2.active.is_none());
    }

    #[test]
    fn knockout_promotes_first_viable_bench_fighter() {
        let rules = MatchRules::default();
        let mut p1 = side(
            "Hammer",
            vec![fighter(
                "Smasher",
                ElementType::Fighting,
                ElementType::Psychic,
                100,
                vec![attack("Crush", 1, 200)],
            )],
        );
        let mut p2 = side(
            "Deep",
            vec![
                fighter(
                    "Frontline",
                    ElementType::Normal,
                    ElementType::Fighting,
                    10,
                    vec![attack("Tap", 1, 5)],
                ),
                fighter(
                    "Spent",
                    ElementType::Normal,
                    ElementType::Fighting,
                    0,
                    vec![attack("Tap", 1, 5)],
                ),
                fighter(
                    "Fresh",
                    ElementType::Normal,
                    ElementType::Fighting,
                    80,
                    vec![attack("Tap", 1, 5)],
                ),
            ],
        );

        process_turn(
            &mut p1,
            &mut p2,
            TurnAction::Attack { index: 0 },
            TurnAction::Pass,
            1,
            &rules,
        );

        assert_eq!(p1.knockouts, 1);
        assert_eq!(p2.active.as_ref().unwrap().name, "Fresh");
        assert_eq!(p2.bench.len(), 1);
        assert_eq!(p2.bench[0].name, "Spent");
    }

    #[test]
    fn invariants_hold_after_arbitrary_turns() {
        let rules = MatchRules::default();
        let mut p1 = side(
            "A",
            vec![
                fighter(
                    "A1",
                    ElementType::Fire,
                    ElementType::Water,
                    100,
                    vec![attack("Hit", 1, 30), attack("Big", 3, 60)],
                ),
                fighter(
                    "A2",
                    ElementType::Grass,
                    ElementType::Fire,
                    100,
                    vec![attack("Hit", 1, 30)],
                ),
            ],
        );
        let mut p2 = side(
            "B",
            vec![fighter(
                "B1",
                ElementType::Water,
                ElementType::Electric,
                100,
                vec![attack("Hit", 1, 30)],
            )],
        );

        let actions = [
            TurnAction::Attack { index: 0 },
            TurnAction::Attack { index: 1 },
            TurnAction::Retreat { bench_index: 0 },
            TurnAction::Attack { index: 7 },
            TurnAction::Pass,
            TurnAction::Retreat { bench_index: 9 },
        ];
        for (turn, pair) in actions.iter().zip(actions.iter().rev()).enumerate() {
            process_turn(&mut p1, &mut p2, *pair.0, *pair.1, turn as u32 + 1, &rules);
            for p in [&p1, &p2] {
                assert!(p.energy <= rules.energy_cap);
                if let Some(f) = &p.active {
                    assert!(f.hp <= f.max_hp);
                }
                for f in &p.bench {
                    assert!(f.hp <= f.max_hp);
                }
            }
        }
    }

    #[test]
    fn passing_side_still_gains_energy() {
        let rules = MatchRules::default();
        let mut p1 = side(
            "A",
            vec![fighter(
                "A1",
                ElementType::Fire,
                ElementType::Water,
                100,
                vec![attack("Hit", 1, 30)],
            )],
        );
        let mut p2 = side(
            "B",
            vec![fighter(
                "B1",
                ElementType::Water,
                ElementType::Electric,
                100,
                vec![attack("Hit", 1, 30)],
            )],
        );

        process_turn(
            &mut p1,
            &mut p2,
            TurnAction::Pass,
            TurnAction::Pass,
            1,
            &rules,
        );
        assert_eq!(p1.energy, 1);
        assert_eq!(p2.energy, 1);
    }
}
