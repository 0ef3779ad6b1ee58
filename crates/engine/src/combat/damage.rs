//! Damage calculation.

use crate::config::MatchRules;
use crate::roster::{Attack, ElementType};

/// Result of a damage computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageOutcome {
    pub damage: u32,
    /// Whether the elemental bonus applied.
    pub super_effective: bool,
}

/// Computes the damage an attack deals to a defender.
///
/// # Formula
///
/// ```text
/// damage = attack.damage
/// if attacker_element == defender_weakness:
///     damage += weakness_bonus
/// ```
///
/// The bonus is a flat addition, not a multiplier. An attacker whose own
/// element happens to equal its own weakness is treated exactly like any
/// other elemental match: the comparison is only ever attacker element
/// against defender weakness.
pub fn compute_damage(
    attack: &Attack,
    attacker_element: ElementType,
    defender_weakness: ElementType,
    rules: &MatchRules,
) -> DamageOutcome {
    let super_effective = attacker_element == defender_weakness;
    let damage = if super_effective {
        attack.damage + rules.weakness_bonus
    } else {
        attack.damage
    };
    DamageOutcome {
        damage,
        super_effective,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attack(damage: u32) -> Attack {
        Attack {
            name: "Test".into(),
            energy_cost: 1,
            damage,
            effect: None,
            description: String::new(),
        }
    }

    #[test]
    fn base_damage_without_advantage() {
        let rules = MatchRules::default();
        let out = compute_damage(&attack(30), ElementType::Fire, ElementType::Water, &rules);
        assert_eq!(out.damage, 30);
        assert!(!out.super_effective);
    }

    #[test]
    fn weakness_adds_flat_bonus() {
        let rules = MatchRules::default();
        let out = compute_damage(&attack(25), ElementType::Water, ElementType::Water, &rules);
        assert_eq!(out.damage, 25 + rules.weakness_bonus);
        assert!(out.super_effective);
    }

    #[test]
    fn zero_damage_attack_still_gains_bonus() {
        let rules = MatchRules::default();
        let out = compute_damage(&attack(0), ElementType::Dark, ElementType::Dark, &rules);
        assert_eq!(out.damage, rules.weakness_bonus);
    }
}
