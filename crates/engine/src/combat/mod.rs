//! Combat resolution.
//!
//! Pure, deterministic transformations over two [`crate::roster::Player`]
//! states. No I/O, no randomness; given the same inputs every function
//! produces the same outcome, which is what makes replays exact.
//!
//! - [`compute_damage`] is the only place elemental advantage applies.
//! - [`execute_attack`] validates and resolves a single attack; failures are
//!   normal zero-effect outcomes, never errors.
//! - [`process_turn`] is the per-turn reducer: side 1 fully, then side 2, a
//!   fixed tie-break that also orders simultaneous knockouts.
//! - [`check_winner`] evaluates the terminal conditions.

mod attack;
mod damage;
mod turn;
mod winner;

pub use attack::{AttackOutcome, execute_attack};
pub use damage::{DamageOutcome, compute_damage};
pub use turn::{ActionRecord, Side, TurnRecord, process_turn};
pub use winner::{MatchVerdict, check_winner};
