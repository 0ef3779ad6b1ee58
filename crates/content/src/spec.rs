//! Serializable team definition formats.

use serde::{Deserialize, Serialize};

use arena_engine::{
    Attack, AttackEffect, EffectKind, ElementType, Fighter, Player, RosterError,
};

/// One attack in a team file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AttackSpec {
    pub name: String,
    pub energy_cost: u8,
    pub damage: u32,
    #[serde(default)]
    pub effect: Option<(EffectKind, u32)>,
    #[serde(default)]
    pub description: String,
}

/// One fighter in a team file. HP always starts at `max_hp`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FighterSpec {
    pub name: String,
    pub element: ElementType,
    pub max_hp: u32,
    pub weakness: ElementType,
    pub retreat_cost: u8,
    #[serde(default)]
    pub catchphrase: String,
    pub attacks: Vec<AttackSpec>,
}

/// A full team definition: display flavor plus the ordered roster.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TeamSpec {
    pub team_name: String,
    #[serde(default)]
    pub personality: String,
    pub fighters: Vec<FighterSpec>,
}

impl AttackSpec {
    fn build(&self) -> Attack {
        Attack {
            name: self.name.clone(),
            energy_cost: self.energy_cost,
            damage: self.damage,
            effect: self
                .effect
                .map(|(kind, magnitude)| AttackEffect { kind, magnitude }),
            description: self.description.clone(),
        }
    }
}

impl FighterSpec {
    fn build(&self) -> Result<Fighter, RosterError> {
        let fighter = Fighter {
            name: self.name.clone(),
            element: self.element,
            hp: self.max_hp,
            max_hp: self.max_hp,
            weakness: self.weakness,
            retreat_cost: self.retreat_cost,
            catchphrase: self.catchphrase.clone(),
            attacks: self.attacks.iter().map(AttackSpec::build).collect(),
        };
        fighter.validate()?;
        Ok(fighter)
    }
}

impl TeamSpec {
    /// Validates every fighter without building a side.
    pub fn validate(&self) -> Result<(), RosterError> {
        if self.fighters.is_empty() {
            return Err(RosterError::EmptyTeam);
        }
        for fighter in &self.fighters {
            fighter.build()?;
        }
        Ok(())
    }

    /// Builds a match-ready side from this definition: first fighter active,
    /// the rest benched in order, every fighter at full HP.
    pub fn build_side(
        &self,
        participant_id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<Player, RosterError> {
        if self.fighters.is_empty() {
            return Err(RosterError::EmptyTeam);
        }
        let fighters = self
            .fighters
            .iter()
            .map(FighterSpec::build)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Player::from_roster(participant_id, display_name, fighters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::builtin_teams;

    #[test]
    fn builtin_teams_all_validate() {
        let teams = builtin_teams();
        assert!(!teams.is_empty());
        for team in &teams {
            team.validate()
                .unwrap_or_else(|e| panic!("{} invalid: {e}", team.team_name));
        }
    }

    #[test]
    fn build_side_starts_everyone_at_full_hp() {
        let team = &builtin_teams()[0];
        let side = team.build_side("p1", "Tester").unwrap();
        let active = side.active.as_ref().unwrap();
        assert_eq!(active.hp, active.max_hp);
        for f in &side.bench {
            assert_eq!(f.hp, f.max_hp);
        }
        assert_eq!(side.energy, 0);
        assert_eq!(side.knockouts, 0);
    }

    #[test]
    fn empty_team_is_rejected() {
        let team = TeamSpec {
            team_name: "Ghosts".into(),
            personality: String::new(),
            fighters: Vec::new(),
        };
        assert!(matches!(
            team.build_side("p1", "Nobody"),
            Err(RosterError::EmptyTeam)
        ));
    }
}
