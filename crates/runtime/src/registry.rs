//! Participant registry.
//!
//! Explicit long-lived state owned by the arena service, constructed once at
//! process start. Nothing in here is ambient module state, so tests can run
//! any number of independent arenas side by side.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rand::RngCore;

use arena_content::{TeamSpec, default_team};

use crate::error::ArenaError;
use crate::providers::LlmConfig;

/// How a participant's decisions are sourced each turn.
#[derive(Clone, Debug)]
pub enum DecisionSource {
    /// The built-in local policy.
    Heuristic,
    /// A remote callback, signed with the participant's secret.
    Webhook { callback_url: String },
    /// A language-model coach.
    Llm(LlmConfig),
}

/// A registered participant.
#[derive(Clone, Debug)]
pub struct Participant {
    pub id: String,
    pub name: String,
    /// Shared secret for webhook payload signatures.
    pub secret: String,
    pub rating: i32,
    pub games_played: u32,
    pub wins: u32,
    pub source: DecisionSource,
    pub team: TeamSpec,
    pub created_at: DateTime<Utc>,
}

/// Thread-safe participant store. Acts as the rating store too, which is
/// where the rating floor lives.
pub struct ParticipantRegistry {
    participants: Mutex<HashMap<String, Participant>>,
}

impl ParticipantRegistry {
    pub const DEFAULT_RATING: i32 = 1200;
    /// Ratings never drop below this, no matter how the deltas add up.
    pub const MIN_RATING: i32 = 100;

    pub fn new() -> Self {
        Self {
            participants: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a new participant and returns it (secret included; this is
    /// the only time the caller sees it).
    ///
    /// Names must be 2-32 characters from `[A-Za-z0-9_-]` and unique
    /// case-insensitively. Passing no team assigns the default one.
    pub fn register(
        &self,
        name: &str,
        source: DecisionSource,
        team: Option<TeamSpec>,
    ) -> Result<Participant, ArenaError> {
        validate_name(name)?;
        let team = team.unwrap_or_else(default_team);
        team.validate()?;

        let mut participants = lock(&self.participants);
        if participants
            .values()
            .any(|p| p.name.eq_ignore_ascii_case(name))
        {
            return Err(ArenaError::NameTaken {
                name: name.to_string(),
            });
        }

        let participant = Participant {
            id: format!("agent_{}", random_hex(12)),
            name: name.to_string(),
            secret: random_hex(32),
            rating: Self::DEFAULT_RATING,
            games_played: 0,
            wins: 0,
            source,
            team,
            created_at: Utc::now(),
        };
        participants.insert(participant.id.clone(), participant.clone());
        tracing::info!(id = %participant.id, name = %participant.name, "participant registered");
        Ok(participant)
    }

    pub fn get(&self, id: &str) -> Option<Participant> {
        lock(&self.participants).get(id).cloned()
    }

    pub fn get_by_name(&self, name: &str) -> Option<Participant> {
        lock(&self.participants)
            .values()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        lock(&self.participants).contains_key(id)
    }

    /// Applies a match result: rating delta (floored at
    /// [`Self::MIN_RATING`]), games played, and the win column.
    pub fn apply_result(&self, id: &str, delta: i32, won: bool) {
        let mut participants = lock(&self.participants);
        let Some(participant) = participants.get_mut(id) else {
            tracing::warn!(%id, "match result for unknown participant dropped");
            return;
        };
        participant.rating = (participant.rating + delta).max(Self::MIN_RATING);
        participant.games_played += 1;
        if won {
            participant.wins += 1;
        }
    }

    /// Ranked view for leaderboards: highest rating first.
    pub fn leaderboard(&self, limit: usize) -> Vec<Participant> {
        let mut all: Vec<Participant> = lock(&self.participants).values().cloned().collect();
        all.sort_by(|a, b| b.rating.cmp(&a.rating).then_with(|| a.name.cmp(&b.name)));
        all.truncate(limit);
        all
    }
}

impl Default for ParticipantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_name(name: &str) -> Result<(), ArenaError> {
    if name.len() < 2 || name.len() > 32 {
        return Err(ArenaError::InvalidName {
            name: name.to_string(),
            reason: "must be 2-32 characters",
        });
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ArenaError::InvalidName {
            name: name.to_string(),
            reason: "only letters, numbers, underscores, and hyphens allowed",
        });
    }
    Ok(())
}

fn random_hex(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    rand::thread_rng().fill_bytes(&mut buf);
    hex::encode(buf)
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
