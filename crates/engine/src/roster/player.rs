//! Per-side battle state.

use serde::{Deserialize, Serialize};

use super::Fighter;
use crate::config::MatchRules;

/// One side of a match: the active fighter, the bench, the energy pool, and
/// the knockout score.
///
/// # Invariants
///
/// - `energy` never exceeds the rules' cap and never underflows.
/// - `knockouts` only increases.
/// - `active` is `None` only when no fighter on this side has hp > 0.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Participant identity this side plays for.
    pub id: String,
    /// Display name shown in narration and replays.
    pub name: String,
    pub active: Option<Fighter>,
    /// Remaining fighters in bench order. Order carries no gameplay meaning
    /// beyond index addressing for the retreat action.
    pub bench: Vec<Fighter>,
    pub energy: u8,
    pub knockouts: u8,
}

impl Player {
    /// Builds a side from a roster: the first fighter starts active, the
    /// rest go to the bench in order. Energy and knockouts start at zero.
    pub fn from_roster(id: impl Into<String>, name: impl Into<String>, fighters: Vec<Fighter>) -> Self {
        let mut fighters = fighters.into_iter();
        Self {
            id: id.into(),
            name: name.into(),
            active: fighters.next(),
            bench: fighters.collect(),
            energy: 0,
            knockouts: 0,
        }
    }

    /// Start-of-turn energy regeneration: +1, capped.
    pub fn gain_energy(&mut self, rules: &MatchRules) {
        self.energy = (self.energy + 1).min(rules.energy_cap);
    }

    pub fn spend_energy(&mut self, cost: u8) {
        self.energy = self.energy.saturating_sub(cost);
    }

    /// True while this side still has any fighter with hp > 0.
    pub fn has_viable_fighter(&self) -> bool {
        self.active.as_ref().is_some_and(|f| !f.is_knocked_out())
            || self.bench.iter().any(|f| !f.is_knocked_out())
    }

    /// Swaps the active fighter with the chosen bench slot in place: the
    /// outgoing fighter lands in the vacated index, so the bench keeps its
    /// size and every other slot keeps its address.
    ///
    /// The caller validates affordability and slot viability; this is the
    /// raw rotation.
    pub fn swap_active(&mut self, bench_index: usize) {
        if let Some(active) = self.active.as_mut()
            && let Some(slot) = self.bench.get_mut(bench_index)
        {
            std::mem::swap(active, slot);
        }
    }

    /// Replaces a knocked-out active with the first bench fighter that still
    /// has hp > 0, removing it from the bench. Returns the promoted
    /// fighter's name, or `None` if the side is out of fighters (active
    /// becomes `None`).
    pub fn promote_replacement(&mut self) -> Option<String> {
        let replacement = self.bench.iter().position(|f| !f.is_knocked_out());
        match replacement {
            Some(index) => {
                let fighter = self.bench.remove(index);
                let name = fighter.name.clone();
                self.active = Some(fighter);
                Some(name)
            }
            None => {
                self.active = None;
                None
            }
        }
    }
}
