//! Roundnet Swiss tournament web app: library with models and pairing logic.

pub mod logic;
pub mod models;

pub use logic::{
    assign_byes, build_groups, calculate_groups, complete_round, count_repeat_opponents,
    count_repeat_partners, find_best_match_set, find_best_team_set, generate_all_match_sets,
    generate_all_team_sets, generate_next_round, generate_round, import_players, leaderboard,
    player_stats, start_tournament, strength_of_schedule, update_match_score, validate_custom_groups,
    validate_player_count, ByeAssignment, MatchGenerationResult, PairingError, RoundResult,
    SizingError, TeamGenerationResult,
};
pub use models::{
    GameMatch, GroupMode, GroupSizeConfiguration, MatchId, Player, PlayerId, PlayerStats, Round,
    ScoringSystem, Team, Tournament, TournamentConfig, TournamentError, TournamentId,
};
