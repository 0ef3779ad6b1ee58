//! Single-attack resolution.

use serde::{Deserialize, Serialize};

use super::damage::compute_damage;
use crate::config::MatchRules;
use crate::roster::{EffectKind, Fighter};

/// Everything that came out of one attack attempt.
///
/// A failed attempt (bad index, unaffordable cost) is still an outcome:
/// `executed` is false, damage and energy are zero, and `description` says
/// why. Callers never see an error for a player's bad choice.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub executed: bool,
    pub damage: u32,
    pub energy_spent: u8,
    pub super_effective: bool,
    /// HP actually restored to the attacker by a heal effect.
    pub healed: u32,
    pub effect: Option<EffectKind>,
    pub description: String,
}

impl AttackOutcome {
    fn fizzle(description: String) -> Self {
        Self {
            executed: false,
            damage: 0,
            energy_spent: 0,
            super_effective: false,
            healed: 0,
            effect: None,
            description,
        }
    }
}

/// Resolves one attack from `attacker` against `defender`.
///
/// Validates the attack index and the side's energy, computes damage via
/// [`compute_damage`], and applies the attack's effect tag. Only
/// [`EffectKind::Heal`] mutates state (the attacker's HP); every other tag
/// is narration. The caller applies `damage` to the defender and deducts
/// `energy_spent` from the side's pool.
pub fn execute_attack(
    attacker: &mut Fighter,
    defender: &Fighter,
    attack_index: usize,
    energy: u8,
    rules: &MatchRules,
) -> AttackOutcome {
    let Some(attack) = attacker.attacks.get(attack_index) else {
        return AttackOutcome::fizzle(format!(
            "{} fumbles! It has no attack in slot {}!",
            attacker.name,
            attack_index + 1
        ));
    };

    if energy < attack.energy_cost {
        return AttackOutcome::fizzle(format!(
            "{} doesn't have enough energy for {} ({} needed, {} available)!",
            attacker.name, attack.name, attack.energy_cost, energy
        ));
    }

    let attack = attack.clone();
    let outcome = compute_damage(&attack, attacker.element, defender.weakness, rules);

    let mut description = format!(
        "{} uses {} on {} for {} damage!",
        attacker.name, attack.name, defender.name, outcome.damage
    );
    if outcome.super_effective {
        description.push_str(" It's super effective!");
    }

    let mut healed = 0;
    if let Some(effect) = attack.effect {
        match effect.kind {
            EffectKind::Heal => {
                healed = attacker.heal(effect.magnitude);
                description.push_str(&format!(
                    " {} recovers {} HP.",
                    attacker.name, healed
                ));
            }
            kind => {
                // Log-only tags: narrated, no state tracked across turns.
                description.push_str(&format!(" ({kind})"));
            }
        }
    }

    AttackOutcome {
        executed: true,
        damage: outcome.damage,
        energy_spent: attack.energy_cost,
        super_effective: outcome.super_effective,
        healed,
        effect: attack.effect.map(|e| e.kind),
        description,
    }
}
