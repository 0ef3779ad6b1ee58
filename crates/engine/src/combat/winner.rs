//! Terminal-condition evaluation.

use serde::{Deserialize, Serialize};

use super::turn::Side;
use crate::config::MatchRules;
use crate::roster::Player;

/// Outcome of a terminal-condition check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchVerdict {
    /// Both sides can still fight.
    Undecided,
    Winner(Side),
    /// Neither side has a viable fighter. Simultaneous elimination is a
    /// draw, never an error.
    Draw,
}

/// Evaluates whether the match is decided.
///
/// A side wins outright at the knockout threshold regardless of remaining
/// fighters, or by being the only side with a fighter at hp > 0. Side 1 is
/// checked first, the fixed tie-break used everywhere else in resolution.
pub fn check_winner(p1: &Player, p2: &Player, rules: &MatchRules) -> MatchVerdict {
    if p1.knockouts >= rules.knockouts_to_win {
        return MatchVerdict::Winner(Side::One);
    }
    if p2.knockouts >= rules.knockouts_to_win {
        return MatchVerdict::Winner(Side::Two);
    }

    match (p1.has_viable_fighter(), p2.has_viable_fighter()) {
        (true, true) => MatchVerdict::Undecided,
        (true, false) => MatchVerdict::Winner(Side::One),
        (false, true) => MatchVerdict::Winner(Side::Two),
        (false, false) => MatchVerdict::Draw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::{Attack, ElementType, Fighter};

    fn fighter(hp: u32) -> Fighter {
        Fighter {
            name: "F".into(),
            element: ElementType::Normal,
            hp,
            max_hp: 100,
            weakness: ElementType::Fighting,
            retreat_cost: 1,
            catchphrase: String::new(),
            attacks: vec![Attack {
                name: "Hit".into(),
                energy_cost: 1,
                damage: 10,
                effect: None,
                description: String::new(),
            }],
        }
    }

    fn player(fighters: Vec<Fighter>) -> Player {
        Player::from_roster("id", "P", fighters)
    }

    #[test]
    fn undecided_while_both_sides_viable() {
        let rules = MatchRules::default();
        let p1 = player(vec![fighter(50)]);
        let p2 = player(vec![fighter(1)]);
        assert_eq!(check_winner(&p1, &p2, &rules), MatchVerdict::Undecided);
    }

    #[test]
    fn eliminated_side_loses() {
        let rules = MatchRules::default();
        let mut p1 = player(vec![fighter(0)]);
        p1.promote_replacement();
        let p2 = player(vec![fighter(30)]);
        assert_eq!(
            check_winner(&p1, &p2, &rules),
            MatchVerdict::Winner(Side::Two)
        );
    }

    #[test]
    fn mutual_elimination_is_a_draw() {
        let rules = MatchRules::default();
        let mut p1 = player(vec![fighter(0)]);
        p1.promote_replacement();
        let mut p2 = player(vec![fighter(0)]);
        p2.promote_replacement();
        assert_eq!(check_winner(&p1, &p2, &rules), MatchVerdict::Draw);
    }

    #[test]
    fn knockout_threshold_wins_with_fighters_remaining() {
        let rules = MatchRules::default();
        let mut p1 = player(vec![fighter(100)]);
        p1.knockouts = rules.knockouts_to_win;
        let p2 = player(vec![fighter(100), fighter(100)]);
        assert_eq!(
            check_winner(&p1, &p2, &rules),
            MatchVerdict::Winner(Side::One)
        );
    }

    #[test]
    fn simultaneous_threshold_resolves_side_one_first() {
        let rules = MatchRules::default();
        let mut p1 = player(vec![fighter(100)]);
        let mut p2 = player(vec![fighter(100)]);
        p1.knockouts = rules.knockouts_to_win;
        p2.knockouts = rules.knockouts_to_win;
        assert_eq!(
            check_winner(&p1, &p2, &rules),
            MatchVerdict::Winner(Side::One)
        );
    }
}
