//! Deterministic combat rules shared by the orchestrator and offline tools.
//!
//! `arena-engine` defines the canonical data model (fighters, sides, match
//! state) and exposes pure resolution APIs. All mid-match mutation flows
//! through [`combat::process_turn`]; nothing here performs I/O or awaits
//! anything, which keeps every match exactly replayable from its action
//! sequence.
pub mod action;
pub mod combat;
pub mod config;
pub mod error;
pub mod match_state;
pub mod rating;
pub mod roster;

pub use action::TurnAction;
pub use combat::{
    ActionRecord, AttackOutcome, DamageOutcome, MatchVerdict, Side, TurnRecord, check_winner,
    compute_damage, execute_attack, process_turn,
};
pub use config::MatchRules;
pub use error::RosterError;
pub use match_state::{MatchOutcome, MatchState, MatchStatus};
pub use rating::{K_FACTOR, RatingDeltas, elo_adjustment, rating_deltas};
pub use roster::{Attack, AttackEffect, EffectKind, ElementType, Fighter, Player};
