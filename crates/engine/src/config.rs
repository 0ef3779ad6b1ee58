/// Match rule constants and tunable parameters.
///
/// Every resolution function takes the rules by reference so alternate
/// formats (longer matches, deeper energy pools) stay a construction-site
/// decision rather than a compile-time fork.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchRules {
    /// Hard cap on the number of turns before the match is scored on
    /// knockouts.
    pub max_turns: u32,
    /// Upper bound on a side's energy pool.
    pub energy_cap: u8,
    /// Knockout count at which a side wins outright.
    pub knockouts_to_win: u8,
    /// Flat damage bonus when the attacker's element matches the defender's
    /// weakness. Additive, never a multiplier.
    pub weakness_bonus: u32,
}

impl MatchRules {
    // ===== compile-time constants used for roster validation =====
    /// Maximum number of attacks a fighter may carry.
    pub const MAX_ATTACKS: usize = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_TURNS: u32 = 30;
    pub const DEFAULT_ENERGY_CAP: u8 = 5;
    pub const DEFAULT_KNOCKOUTS_TO_WIN: u8 = 3;
    pub const DEFAULT_WEAKNESS_BONUS: u32 = 20;

    pub fn new() -> Self {
        Self {
            max_turns: Self::DEFAULT_MAX_TURNS,
            energy_cap: Self::DEFAULT_ENERGY_CAP,
            knockouts_to_win: Self::DEFAULT_KNOCKOUTS_TO_WIN,
            weakness_bonus: Self::DEFAULT_WEAKNESS_BONUS,
        }
    }
}

impl Default for MatchRules {
    fn default() -> Self {
        Self::new()
    }
}
