//! Per-turn action choices and their wire vocabulary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A side's chosen action for one turn.
///
/// Indices are bound-checked at resolution time, not here: an out-of-range
/// choice is a legal value that fizzles, never a parse error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TurnAction {
    Attack { index: usize },
    Retreat { bench_index: usize },
    Pass,
}

impl TurnAction {
    /// Parses one token of the decision vocabulary: `ATTACK_1`, `ATTACK_2`,
    /// `RETREAT_<index>`, `PASS`. Case-insensitive; the underscore is
    /// optional because remote agents routinely drop it.
    pub fn parse_token(token: &str) -> Option<Self> {
        let token = token.trim().to_ascii_uppercase();
        match token.as_str() {
            "ATTACK_1" | "ATTACK1" => Some(Self::Attack { index: 0 }),
            "ATTACK_2" | "ATTACK2" => Some(Self::Attack { index: 1 }),
            "PASS" => Some(Self::Pass),
            _ => {
                let rest = token.strip_prefix("RETREAT")?;
                let digits = rest.trim_start_matches('_');
                let bench_index = if digits.is_empty() {
                    0
                } else {
                    digits.parse().ok()?
                };
                Some(Self::Retreat { bench_index })
            }
        }
    }

    /// Canonical wire form of this action.
    pub fn token(&self) -> String {
        match self {
            Self::Attack { index } => format!("ATTACK_{}", index + 1),
            Self::Retreat { bench_index } => format!("RETREAT_{bench_index}"),
            Self::Pass => "PASS".to_string(),
        }
    }
}

impl fmt::Display for TurnAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_tokens() {
        assert_eq!(
            TurnAction::parse_token("ATTACK_1"),
            Some(TurnAction::Attack { index: 0 })
        );
        assert_eq!(
            TurnAction::parse_token("RETREAT_1"),
            Some(TurnAction::Retreat { bench_index: 1 })
        );
        assert_eq!(TurnAction::parse_token("PASS"), Some(TurnAction::Pass));
    }

    #[test]
    fn parses_sloppy_spellings() {
        assert_eq!(
            TurnAction::parse_token(" attack2 "),
            Some(TurnAction::Attack { index: 1 })
        );
        assert_eq!(
            TurnAction::parse_token("retreat"),
            Some(TurnAction::Retreat { bench_index: 0 })
        );
        assert_eq!(
            TurnAction::parse_token("Retreat_2"),
            Some(TurnAction::Retreat { bench_index: 2 })
        );
    }

    #[test]
    fn rejects_unknown_tokens() {
        assert_eq!(TurnAction::parse_token("FIGHT"), None);
        assert_eq!(TurnAction::parse_token("ATTACK_9"), None);
        assert_eq!(TurnAction::parse_token(""), None);
    }

    #[test]
    fn tokens_round_trip() {
        for action in [
            TurnAction::Attack { index: 1 },
            TurnAction::Retreat { bench_index: 0 },
            TurnAction::Pass,
        ] {
            assert_eq!(TurnAction::parse_token(&action.token()), Some(action));
        }
    }
}
