//! Tournament business logic: sizing, byes, grouping, pairing, rounds, scoring.

mod byes;
mod group_sizing;
mod grouping;
mod pairing;
mod round_generation;
mod scoring;
mod setup;

pub use byes::{assign_byes, ByeAssignment};
pub use group_sizing::{
    calculate_groups, max_players, validate_custom_groups, validate_player_count, SizingError,
    MAX_PLAYERS_FOURS, MAX_PLAYERS_MIXED, MIN_PLAYERS,
};
pub use grouping::{build_groups, strength_of_schedule};
pub use pairing::{
    count_repeat_opponents, count_repeat_partners, find_best_match_set, find_best_team_set,
    generate_all_match_sets, generate_all_team_sets, MatchGenerationResult, PairingError,
    TeamGenerationResult,
};
pub use round_generation::{generate_next_round, generate_round, RoundResult};
pub use scoring::{complete_round, leaderboard, player_stats, update_match_score};
pub use setup::{import_players, start_tournament};
