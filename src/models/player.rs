//! Player data structures and per-player pairing history.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in teams, matches and lookups).
pub type PlayerId = Uuid;

/// Statistics view of a player (for API / leaderboard display).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub current_score: f64,
    pub games_played: u32,
    pub win_percentage: f64,
    pub points_per_game: f64,
    pub strength_of_schedule: f64,
    pub rank: usize,
}

/// A player tracked across rounds.
///
/// `previous_teammates`, `previous_opponents` and `bye_history` are append-only:
/// round completion pushes onto them in chronological order, nothing removes entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Cumulative points; fractional when bonus scoring is enabled.
    pub current_score: f64,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    /// Teammate ids from every completed match, in chronological order.
    pub previous_teammates: Vec<PlayerId>,
    /// Opponent ids from every completed match, in chronological order.
    pub previous_opponents: Vec<PlayerId>,
    /// Round numbers in which this player sat out.
    pub bye_history: Vec<u32>,
    /// Optional 1-5 seeding estimate entered at setup; informational only.
    pub initial_skill_rating: Option<u8>,
    /// Inactive players are skipped for byes and groups but keep their history.
    pub is_active: bool,
    /// Round in which the player was deactivated, if any.
    pub removed_in_round: Option<u32>,
}

impl Player {
    /// Create a new player with the given name. History starts empty, score at zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            current_score: 0.0,
            games_played: 0,
            wins: 0,
            losses: 0,
            previous_teammates: Vec::new(),
            previous_opponents: Vec::new(),
            bye_history: Vec::new(),
            initial_skill_rating: None,
            is_active: true,
            removed_in_round: None,
        }
    }

    /// New player with an initial skill rating (clamped to 1-5).
    pub fn with_skill_rating(name: impl Into<String>, rating: u8) -> Self {
        Self {
            initial_skill_rating: Some(rating.clamp(1, 5)),
            ..Self::new(name)
        }
    }

    /// Number of byes this player has had so far.
    pub fn bye_count(&self) -> usize {
        self.bye_history.len()
    }

    /// Most recent round in which this player had a bye, if any.
    pub fn last_bye_round(&self) -> Option<u32> {
        self.bye_history.iter().copied().max()
    }

    /// Whether this player has partnered with `other` in a previous round.
    pub fn has_partnered_with(&self, other: PlayerId) -> bool {
        self.previous_teammates.contains(&other)
    }

    /// Whether this player has faced `other` in a previous round.
    pub fn has_faced(&self, other: PlayerId) -> bool {
        self.previous_opponents.contains(&other)
    }
}
