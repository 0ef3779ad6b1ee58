//! Load-time roster validation errors.
//!
//! In-match failures (bad indices, unaffordable actions) are deliberately
//! *not* errors: they resolve to fizzle outcomes with a narrated reason so a
//! turn can never abort. Only constructing an invalid roster is refused.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("team has no fighters")]
    EmptyTeam,

    #[error("fighter {fighter} has zero max HP")]
    ZeroMaxHp { fighter: String },

    #[error("fighter {fighter} has {hp} HP above its maximum of {max_hp}")]
    HpAboveMax { fighter: String, hp: u32, max_hp: u32 },

    #[error("fighter {fighter} has no attacks")]
    NoAttacks { fighter: String },

    #[error("fighter {fighter} has {count} attacks, more than the moveset allows")]
    TooManyAttacks { fighter: String, count: usize },
}
