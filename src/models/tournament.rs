//! Tournament state, configuration and errors.

use crate::models::game::{MatchId, Round};
use crate::models::player::{Player, PlayerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// Player not found in the tournament.
    PlayerNotFound(PlayerId),
    /// A player with this name already exists (names are unique, case-insensitive).
    DuplicatePlayerName,
    /// Match not found in the current round.
    MatchNotFound(MatchId),
    /// Not all matches in the current round have a recorded score.
    IncompleteResults,
    /// Player count or group configuration is invalid for the chosen mode.
    InvalidConfiguration(String),
    /// Round generation failed; carries the pairing engine's error messages.
    GenerationFailed(Vec<String>),
    /// CSV player import could not be parsed.
    CsvImport(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::PlayerNotFound(_) => write!(f, "Player not found"),
            TournamentError::DuplicatePlayerName => {
                write!(f, "A player with this name already exists")
            }
            TournamentError::MatchNotFound(_) => write!(f, "Match not found in current round"),
            TournamentError::IncompleteResults => {
                write!(f, "Not all matches have a recorded score")
            }
            TournamentError::InvalidConfiguration(msg) => write!(f, "{}", msg),
            TournamentError::GenerationFailed(errors) => {
                write!(f, "Round generation failed: {}", errors.join("; "))
            }
            TournamentError::CsvImport(msg) => write!(f, "CSV import failed: {}", msg),
        }
    }
}

/// How match points are awarded when a round completes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringSystem {
    /// Winners get 3 points, losers 0.
    #[default]
    WinLoss,
    /// Winners get 3 points, losers 0, plus each side's share of 1 bonus point
    /// proportional to the game score (when bonus points are enabled).
    WinLossBonus,
}

/// How players are partitioned into groups each round.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupMode {
    /// All groups of 4; byes = n mod 4. Up to 40 players.
    #[default]
    Fours,
    /// Groups of 8 and 12 only; byes pad the remainder to a multiple of 4.
    /// Up to 30 players.
    Mixed { prefer_larger: bool },
    /// Explicit group counts; byes are whatever is left over (at most 3).
    Custom {
        groups_of_4: usize,
        groups_of_8: usize,
        groups_of_12: usize,
    },
}

/// Tournament-wide settings, fixed at creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub max_players: usize,
    pub scoring_system: ScoringSystem,
    pub bonus_points_enabled: bool,
    /// Points awarded to an active player for sitting out a round.
    pub bye_points: f64,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            max_players: 40,
            scoring_system: ScoringSystem::WinLoss,
            bonus_points_enabled: false,
            bye_points: 3.0,
        }
    }
}

/// Result of the group size solver: how one round splits into groups and byes.
///
/// Invariants: `groups_of_4 * 4 + groups_of_8 * 8 + groups_of_12 * 12 ==
/// active_players_per_round` and `active_players_per_round + byes == total_players`
/// whenever `total_groups > 0`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupSizeConfiguration {
    pub total_players: usize,
    pub byes: usize,
    pub active_players_per_round: usize,
    pub groups_of_4: usize,
    pub groups_of_8: usize,
    pub groups_of_12: usize,
    pub total_groups: usize,
}

/// Full tournament state: players, completed and in-progress rounds, configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    /// All players ever added, by id (deactivated players stay here).
    pub players: HashMap<PlayerId, Player>,
    pub rounds: Vec<Round>,
    /// 1-based number of the round currently being played; 0 before start.
    pub current_round: u32,
    pub is_started: bool,
    pub configuration: TournamentConfig,
    pub group_mode: GroupMode,
    /// Snapshot of the size solver output, computed when the tournament starts.
    pub group_configuration: GroupSizeConfiguration,
}

impl Tournament {
    /// Create a new tournament in setup (not started) with no players.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        configuration: TournamentConfig,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description,
            created_at: Utc::now(),
            players: HashMap::new(),
            rounds: Vec::new(),
            current_round: 0,
            is_started: false,
            configuration,
            group_mode: GroupMode::default(),
            group_configuration: GroupSizeConfiguration::default(),
        }
    }

    /// Add a player (setup only). Names must be unique (case-insensitive) and non-empty.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        skill_rating: Option<u8>,
    ) -> Result<PlayerId, TournamentError> {
        if self.is_started {
            return Err(TournamentError::InvalidState);
        }
        let name = name.into();
        let name_trimmed = name.trim();
        if name_trimmed.is_empty() {
            return Err(TournamentError::InvalidState);
        }
        let is_duplicate = self
            .players
            .values()
            .any(|p| p.name.eq_ignore_ascii_case(name_trimmed));
        if is_duplicate {
            return Err(TournamentError::DuplicatePlayerName);
        }
        let player = match skill_rating {
            Some(r) => Player::with_skill_rating(name_trimmed, r),
            None => Player::new(name_trimmed),
        };
        let id = player.id;
        self.players.insert(id, player);
        Ok(id)
    }

    /// Remove a player by id (setup only).
    pub fn remove_player(&mut self, player_id: PlayerId) -> Result<(), TournamentError> {
        if self.is_started {
            return Err(TournamentError::InvalidState);
        }
        self.players
            .remove(&player_id)
            .map(|_| ())
            .ok_or(TournamentError::PlayerNotFound(player_id))
    }

    /// Mark a player inactive: excluded from byes and groups in future rounds,
    /// but all history is kept and points already earned stand.
    pub fn deactivate_player(&mut self, player_id: PlayerId) -> Result<(), TournamentError> {
        let round = self.current_round;
        let p = self
            .players
            .get_mut(&player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        p.is_active = false;
        p.removed_in_round = Some(round);
        Ok(())
    }

    /// Bring a deactivated player back into future rounds.
    pub fn reactivate_player(&mut self, player_id: PlayerId) -> Result<(), TournamentError> {
        let p = self
            .players
            .get_mut(&player_id)
            .ok_or(TournamentError::PlayerNotFound(player_id))?;
        p.is_active = true;
        p.removed_in_round = None;
        Ok(())
    }

    /// Choose how groups are formed (setup only). Validation happens at start.
    pub fn set_group_mode(&mut self, mode: GroupMode) -> Result<(), TournamentError> {
        if self.is_started {
            return Err(TournamentError::InvalidState);
        }
        self.group_mode = mode;
        Ok(())
    }

    /// The round currently being played, if it has been generated.
    pub fn current_round_mut(&mut self) -> Option<&mut Round> {
        let n = self.current_round;
        self.rounds.iter_mut().find(|r| r.round_number == n)
    }

    /// Immutable view of the round currently being played.
    pub fn current_round_ref(&self) -> Option<&Round> {
        self.rounds.iter().find(|r| r.round_number == self.current_round)
    }

    /// Snapshot of every player, in no particular order.
    pub fn player_snapshot(&self) -> Vec<Player> {
        self.players.values().cloned().collect()
    }
}
