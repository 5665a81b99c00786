//! Data structures for the roundnet tournament: players, teams, matches, rounds.

mod game;
mod player;
mod tournament;

pub use game::{GameMatch, MatchId, Round, Team};
pub use player::{Player, PlayerId, PlayerStats};
pub use tournament::{
    GroupMode, GroupSizeConfiguration, ScoringSystem, Tournament, TournamentConfig,
    TournamentError, TournamentId,
};
