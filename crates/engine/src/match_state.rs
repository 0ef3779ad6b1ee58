//! Match lifecycle state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::combat::{Side, TurnRecord};
use crate::roster::Player;

/// Lifecycle of a match. Transitions are one-way:
/// `Pending → Active → Finished`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Pending,
    Active,
    Finished,
}

/// Final outcome of a finished match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    Winner(Side),
    Draw,
}

/// A complete match: both sides, the replay, and the lifecycle bookkeeping.
///
/// Owned and mutated exclusively by one orchestrator while `Active`; once
/// `Finished` the replay and outcome never change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchState {
    pub id: String,
    pub player1: Player,
    pub player2: Player,
    pub replay: Vec<TurnRecord>,
    pub current_turn: u32,
    pub status: MatchStatus,
    pub outcome: Option<MatchOutcome>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl MatchState {
    /// Creates a `Pending` match between two initialized sides.
    pub fn new(id: impl Into<String>, player1: Player, player2: Player) -> Self {
        Self {
            id: id.into(),
            player1,
            player2,
            replay: Vec::new(),
            current_turn: 0,
            status: MatchStatus::Pending,
            outcome: None,
            started_at: None,
            finished_at: None,
        }
    }

    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::One => &self.player1,
            Side::Two => &self.player2,
        }
    }

    pub fn player_mut(&mut self, side: Side) -> &mut Player {
        match side {
            Side::One => &mut self.player1,
            Side::Two => &mut self.player2,
        }
    }

    /// Display name for the outcome: the winner's name, or `None` for a
    /// draw or an unfinished match.
    pub fn winner_name(&self) -> Option<&str> {
        match self.outcome? {
            MatchOutcome::Winner(side) => Some(self.player(side).name.as_str()),
            MatchOutcome::Draw => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == MatchStatus::Finished
    }
}
