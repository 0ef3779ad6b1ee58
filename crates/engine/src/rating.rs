//! Elo-style rating updates.
//!
//! Pure math over pre-match ratings; persistence (including the floor the
//! store applies) belongs to the result sink, not here.

use serde::{Deserialize, Serialize};

use crate::combat::Side;
use crate::match_state::MatchOutcome;

/// Standard K-factor for the adjustment magnitude.
pub const K_FACTOR: f64 = 32.0;

/// Per-side rating adjustments for one match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingDeltas {
    pub side1: i32,
    pub side2: i32,
}

impl RatingDeltas {
    pub const ZERO: Self = Self { side1: 0, side2: 0 };

    pub fn for_side(&self, side: Side) -> i32 {
        match side {
            Side::One => self.side1,
            Side::Two => self.side2,
        }
    }
}

/// Computes the winner's and loser's deltas from their pre-match ratings.
///
/// ```text
/// expected = 1 / (1 + 10^((loser - winner) / 400))
/// winner_delta = round(K * (1 - expected))
/// loser_delta  = round(K * (0 - (1 - expected)))
/// ```
///
/// Anti-symmetric within rounding: the winner gains what the loser sheds.
pub fn elo_adjustment(winner_rating: i32, loser_rating: i32) -> (i32, i32) {
    let exponent = f64::from(loser_rating - winner_rating) / 400.0;
    let expected_winner = 1.0 / (1.0 + 10f64.powf(exponent));
    let winner_delta = (K_FACTOR * (1.0 - expected_winner)).round() as i32;
    let loser_delta = (K_FACTOR * (0.0 - (1.0 - expected_winner))).round() as i32;
    (winner_delta, loser_delta)
}

/// Maps a match outcome onto per-side deltas. A draw adjusts nobody.
pub fn rating_deltas(outcome: MatchOutcome, rating1: i32, rating2: i32) -> RatingDeltas {
    match outcome {
        MatchOutcome::Draw => RatingDeltas::ZERO,
        MatchOutcome::Winner(Side::One) => {
            let (w, l) = elo_adjustment(rating1, rating2);
            RatingDeltas { side1: w, side2: l }
        }
        MatchOutcome::Winner(Side::Two) => {
            let (w, l) = elo_adjustment(rating2, rating1);
            RatingDeltas { side1: l, side2: w }
        }
    }
}
