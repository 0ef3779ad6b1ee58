//! Data-driven team definitions and loaders.
//!
//! This crate houses the built-in teams and a RON loader for external team
//! files. Content is consumed at match creation and never appears in match
//! state; the engine only ever sees fully validated [`arena_engine::Player`]
//! values.

mod builtin;
mod loader;
mod spec;

pub use builtin::{builtin_teams, default_team};
pub use loader::TeamLoader;
pub use spec::{AttackSpec, FighterSpec, TeamSpec};
