//! Roster value types: elements, attacks, and fighters.
//!
//! These are pure data with load-time invariants. Once a match starts, only
//! the combat resolution functions in [`crate::combat`] mutate them.

mod player;

pub use player::Player;

use serde::{Deserialize, Serialize};

use crate::config::MatchRules;
use crate::error::RosterError;

/// Closed set of fighter elements.
///
/// Elemental advantage is expressed per fighter as a single `weakness`
/// element rather than a full matchup table: being hit by that element adds
/// a flat damage bonus and nothing else.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ElementType {
    Fire,
    Water,
    Grass,
    Electric,
    Psychic,
    Fighting,
    Dark,
    Normal,
}

/// Tag describing an attack's optional side effect.
///
/// Only [`EffectKind::Heal`] changes state when the attack lands; the other
/// tags are narrated into the event log and tracked nowhere else. There is
/// no persistent per-turn status state in this model.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum EffectKind {
    Burn,
    Paralyze,
    Heal,
    EnergyBoost,
    Shield,
}

/// An attack's effect tag plus its magnitude (HP healed, shield strength,
/// etc. depending on the kind).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackEffect {
    pub kind: EffectKind,
    pub magnitude: u32,
}

/// A single move in a fighter's moveset. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attack {
    pub name: String,
    /// Energy the owning side must pay to use this attack.
    pub energy_cost: u8,
    /// Base damage before the elemental bonus.
    pub damage: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<AttackEffect>,
    #[serde(default)]
    pub description: String,
}

/// A combatant. Created from a team definition with `hp == max_hp`; mutated
/// only by the combat resolution engine. HP is clamped to `0..=max_hp` at
/// every mutation site.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    pub name: String,
    pub element: ElementType,
    pub hp: u32,
    pub max_hp: u32,
    /// Element this fighter takes bonus damage from.
    pub weakness: ElementType,
    /// Energy required to voluntarily bench this fighter.
    pub retreat_cost: u8,
    #[serde(default)]
    pub catchphrase: String,
    pub attacks: Vec<Attack>,
}

impl Fighter {
    /// Checks the load-time invariants: positive max HP, 1 to
    /// [`MatchRules::MAX_ATTACKS`] attacks, hp within bounds.
    pub fn validate(&self) -> Result<(), RosterError> {
        if self.max_hp == 0 {
            return Err(RosterError::ZeroMaxHp {
                fighter: self.name.clone(),
            });
        }
        if self.hp > self.max_hp {
            return Err(RosterError::HpAboveMax {
                fighter: self.name.clone(),
                hp: self.hp,
                max_hp: self.max_hp,
            });
        }
        if self.attacks.is_empty() {
            return Err(RosterError::NoAttacks {
                fighter: self.name.clone(),
            });
        }
        if self.attacks.len() > MatchRules::MAX_ATTACKS {
            return Err(RosterError::TooManyAttacks {
                fighter: self.name.clone(),
                count: self.attacks.len(),
            });
        }
        Ok(())
    }

    pub fn is_knocked_out(&self) -> bool {
        self.hp == 0
    }

    /// Reduces HP, flooring at zero.
    pub fn take_damage(&mut self, damage: u32) {
        self.hp = self.hp.saturating_sub(damage);
    }

    /// Restores HP up to `max_hp`, returning the amount actually healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = (self.hp + amount).min(self.max_hp);
        self.hp - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strike() -> Attack {
        Attack {
            name: "Strike".into(),
            energy_cost: 1,
            damage: 30,
            effect: None,
            description: String::new(),
        }
    }

    fn fighter() -> Fighter {
        Fighter {
            name: "Starter".into(),
            element: ElementType::Normal,
            hp: 100,
            max_hp: 100,
            weakness: ElementType::Fighting,
            retreat_cost: 1,
            catchphrase: String::new(),
            attacks: vec![strike()],
        }
    }

    #[test]
    fn damage_floors_at_zero() {
        let mut f = fighter();
        f.take_damage(250);
        assert_eq!(f.hp, 0);
        assert!(f.is_knocked_out());
    }

    #[test]
    fn heal_clamps_to_max_and_reports_actual_amount() {
        let mut f = fighter();
        f.take_damage(10);
        assert_eq!(f.heal(30), 10);
        assert_eq!(f.hp, f.max_hp);
        assert_eq!(f.heal(5), 0);
    }

    #[test]
    fn validate_rejects_empty_moveset() {
        let mut f = fighter();
        f.attacks.clear();
        assert!(matches!(f.validate(), Err(RosterError::NoAttacks { .. })));
    }

    #[test]
    fn validate_rejects_oversized_moveset() {
        let mut f = fighter();
        f.attacks = vec![strike(), strike(), strike()];
        assert!(matches!(
            f.validate(),
            Err(RosterError::TooManyAttacks { count: 3, .. })
        ));
    }

    #[test]
    fn element_parses_case_insensitively() {
        use std::str::FromStr;
        assert_eq!(ElementType::from_str("FIRE").unwrap(), ElementType::Fire);
        assert_eq!(ElementType::Electric.to_string(), "electric");
    }
}
