//! Deterministic local decision policy.
//!
//! This is the universal fallback: it never fails, so every timeout and
//! transport error elsewhere degrades to a sensible move instead of a stuck
//! match.

use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use arena_engine::TurnAction;

use crate::error::ProviderError;
use crate::provider::{Decision, DecisionProvider};
use crate::view::TurnView;

/// Active HP fraction below which the policy looks for a retreat.
const CRITICAL_HP_PERCENT: u32 = 30;
/// Chance of deviating from the strongest affordable attack, for variety.
const VARIETY_CHANCE: f64 = 0.15;

/// Local policy provider.
///
/// Preference order:
/// 1. Retreat a critically damaged active to a healthier bench fighter,
///    when the retreat cost is affordable.
/// 2. The strongest attack the energy pool covers (with a small chance of
///    picking a different affordable attack so repeat matchups don't play
///    out move-for-move identically).
/// 3. Pass.
pub struct HeuristicProvider {
    rng: Mutex<SmallRng>,
}

impl HeuristicProvider {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(SmallRng::from_entropy()),
        }
    }

    /// Seeded variant for reproducible tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }

    /// Synchronous core of the policy. Infallible: there is always at least
    /// a `PASS` to play.
    pub fn choose(&self, view: &TurnView) -> Decision {
        let Some(active) = view.you.active.as_ref() else {
            let mut decision = Decision::from_action(TurnAction::Pass);
            decision.thinking = "Nothing left to send out.".to_string();
            return decision;
        };

        // Retreat check: critically hurt, a healthier body available, and
        // the energy to pay for the rotation.
        let critical = active.hp * 100 < active.max_hp * CRITICAL_HP_PERCENT;
        if critical && view.you.energy >= active.retreat_cost {
            let healthiest = view
                .you
                .bench
                .iter()
                .enumerate()
                .filter(|(_, f)| f.hp > active.hp)
                .max_by_key(|(_, f)| f.hp);
            if let Some((bench_index, fighter)) = healthiest {
                let mut decision = Decision::from_action(TurnAction::Retreat { bench_index });
                decision.thinking = format!(
                    "{} is fading, rotating to {}.",
                    active.name, fighter.name
                );
                tracing::debug!(
                    side = %view.you.name,
                    from = %active.name,
                    to = %fighter.name,
                    "heuristic retreats critical active"
                );
                return decision;
            }
        }

        let mut affordable: Vec<usize> = active
            .attacks
            .iter()
            .enumerate()
            .filter(|(_, a)| a.cost <= view.you.energy)
            .map(|(i, _)| i)
            .collect();
        if affordable.is_empty() {
            let mut decision = Decision::from_action(TurnAction::Pass);
            decision.thinking = "Saving up energy.".to_string();
            return decision;
        }

        affordable.sort_by_key(|&i| std::cmp::Reverse(active.attacks[i].damage));
        let mut pick = affordable[0];
        if affordable.len() > 1 {
            let mut rng = self.rng.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
            if rng.gen_bool(VARIETY_CHANCE) {
                let alternatives = &affordable[1..];
                pick = alternatives[rng.gen_range(0..alternatives.len())];
            }
        }

        let attack = &active.attacks[pick];
        let mut decision = Decision::from_action(TurnAction::Attack { index: pick });
        decision.thinking = format!("Going for {}, best we can afford.", attack.name);
        tracing::debug!(
            side = %view.you.name,
            attack = %attack.name,
            "heuristic picks attack"
        );
        decision
    }
}

impl Default for HeuristicProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DecisionProvider for HeuristicProvider {
    async fn decide(&self, view: &TurnView) -> Result<Decision, ProviderError> {
        Ok(self.choose(view))
    }
}
