//! Team, GameMatch and Round for 2v2 group play.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// A 2-player team, formed fresh each round.
///
/// A team is identified by its two member ids; both are carried explicitly so
/// the scoring layer can recover membership without parsing anything.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub player_1: PlayerId,
    pub player_2: PlayerId,
    /// Sum of both members' scores at the time the team was formed.
    pub combined_score: f64,
}

impl Team {
    pub fn new(player_1: PlayerId, player_2: PlayerId, combined_score: f64) -> Self {
        Self {
            player_1,
            player_2,
            combined_score,
        }
    }

    /// Both member ids.
    pub fn members(&self) -> [PlayerId; 2] {
        [self.player_1, self.player_2]
    }

    /// Whether the given player is on this team.
    pub fn contains(&self, id: PlayerId) -> bool {
        self.player_1 == id || self.player_2 == id
    }

    /// The other member of the team, if `id` is on it.
    pub fn partner_of(&self, id: PlayerId) -> Option<PlayerId> {
        if self.player_1 == id {
            Some(self.player_2)
        } else if self.player_2 == id {
            Some(self.player_1)
        } else {
            None
        }
    }
}

/// A single 2v2 match between two teams, belonging to exactly one round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub round_number: u32,
    pub team_1: Team,
    pub team_2: Team,
    /// None until a score is entered.
    pub team_1_score: Option<u32>,
    pub team_2_score: Option<u32>,
    pub is_completed: bool,
}

impl GameMatch {
    pub fn new(team_1: Team, team_2: Team, round_number: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            round_number,
            team_1,
            team_2,
            team_1_score: None,
            team_2_score: None,
            is_completed: false,
        }
    }

    /// Whether the given player took part in this match.
    pub fn involves(&self, id: PlayerId) -> bool {
        self.team_1.contains(id) || self.team_2.contains(id)
    }

    /// The opposing team of the given player, if they played in this match.
    pub fn opponents_of(&self, id: PlayerId) -> Option<&Team> {
        if self.team_1.contains(id) {
            Some(&self.team_2)
        } else if self.team_2.contains(id) {
            Some(&self.team_1)
        } else {
            None
        }
    }
}

/// One round of the tournament: its matches and the players sitting out.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based, monotonically increasing.
    pub round_number: u32,
    pub matches: Vec<GameMatch>,
    /// Players sitting out this round.
    pub byes: Vec<PlayerId>,
    /// Set once every match has a recorded score and the round is submitted.
    pub is_completed: bool,
}

impl Round {
    /// Create an empty, uncompleted round.
    pub fn new(round_number: u32) -> Self {
        Self {
            round_number,
            matches: Vec::new(),
            byes: Vec::new(),
            is_completed: false,
        }
    }
}
