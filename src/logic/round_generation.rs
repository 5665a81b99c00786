//! Round orchestration: byes, groups, and per-group pairing in one pass.

use crate::logic::byes::assign_byes;
use crate::logic::group_sizing::{calculate_groups, SizingError};
use crate::logic::grouping::build_groups;
use crate::logic::pairing::{
    find_best_match_set, find_best_team_set, generate_all_match_sets, generate_all_team_sets,
    PairingError,
};
use crate::models::{
    GameMatch, GroupMode, Player, PlayerId, Round, Tournament, TournamentError,
};

/// Outcome of generating one round. On failure the round is empty and `errors`
/// explains why; no partially paired round is ever returned as successful.
#[derive(Clone, Debug)]
pub struct RoundResult {
    pub success: bool,
    pub round: Round,
    pub byes: Vec<PlayerId>,
    pub groups: Vec<Vec<Player>>,
    pub errors: Vec<String>,
}

impl RoundResult {
    fn failed(round_number: u32, error: String) -> Self {
        Self {
            success: false,
            round: Round::new(round_number),
            byes: Vec::new(),
            groups: Vec::new(),
            errors: vec![error],
        }
    }
}

/// Anything that can abort round generation.
#[derive(Clone, Debug, PartialEq)]
enum GenerationError {
    Sizing(SizingError),
    Pairing(PairingError),
    /// The size solver found no group partition for a nonzero seated count.
    NoViableGroups { active: usize },
    /// Bye assignment left a different number of players than the solver seated.
    SeatingMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationError::Sizing(e) => write!(f, "{}", e),
            GenerationError::Pairing(e) => write!(f, "{}", e),
            GenerationError::NoViableGroups { active } => {
                write!(f, "No viable group partition for {} active players", active)
            }
            GenerationError::SeatingMismatch { expected, actual } => {
                write!(
                    f,
                    "Expected {} seated players after byes, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl From<SizingError> for GenerationError {
    fn from(e: SizingError) -> Self {
        GenerationError::Sizing(e)
    }
}

impl From<PairingError> for GenerationError {
    fn from(e: PairingError) -> Self {
        GenerationError::Pairing(e)
    }
}

/// Generate a complete round for the given player snapshot.
///
/// 1. Filter to active players and solve the group sizes for the mode.
/// 2. Assign byes to the players owed one.
/// 3. Rank the rest and slice them into groups.
/// 4. Per group: enumerate team partitions, pick the best, enumerate match
///    pairings of those teams, pick the best; aggregate all matches.
///
/// Total by construction: every failure along the way is converted into a
/// failed `RoundResult` carrying the error text, never a panic and never a
/// partial round. `rounds` is the tournament history, read for
/// strength-of-schedule ranking only.
pub fn generate_round(
    players: &[Player],
    round_number: u32,
    rounds: &[Round],
    mode: GroupMode,
) -> RoundResult {
    match try_generate_round(players, round_number, rounds, mode) {
        Ok(result) => result,
        Err(e) => RoundResult::failed(round_number, e.to_string()),
    }
}

fn try_generate_round(
    players: &[Player],
    round_number: u32,
    rounds: &[Round],
    mode: GroupMode,
) -> Result<RoundResult, GenerationError> {
    let active: Vec<Player> = players.iter().filter(|p| p.is_active).cloned().collect();

    let config = calculate_groups(active.len(), mode)?;
    if config.total_groups == 0 && config.active_players_per_round > 0 {
        return Err(GenerationError::NoViableGroups {
            active: config.active_players_per_round,
        });
    }

    let assignment = assign_byes(&active, config.byes, round_number);
    if assignment.remaining.len() != config.active_players_per_round {
        return Err(GenerationError::SeatingMismatch {
            expected: config.active_players_per_round,
            actual: assignment.remaining.len(),
        });
    }

    let groups = build_groups(&assignment.remaining, &config, rounds);

    let mut all_matches: Vec<GameMatch> = Vec::new();
    for group in &groups {
        let team_sets = generate_all_team_sets(group)?;
        let best_teams = find_best_team_set(&team_sets, group)
            .ok_or(PairingError::NoTeamSets(group.len()))?;

        let match_sets = generate_all_match_sets(&best_teams.teams, round_number)?;
        let best_matches = find_best_match_set(&match_sets, group)
            .ok_or(PairingError::NoMatchSets(best_teams.teams.len()))?;

        all_matches.extend(best_matches.matches);
    }

    let round = Round {
        round_number,
        matches: all_matches,
        byes: assignment.byes.clone(),
        is_completed: false,
    };

    Ok(RoundResult {
        success: true,
        round,
        byes: assignment.byes,
        groups,
        errors: Vec::new(),
    })
}

/// Generate and record the next round on a started tournament.
///
/// Fails if the current round was already generated but not completed, or if
/// the pairing engine reports errors (which are passed through verbatim).
pub fn generate_next_round(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if !tournament.is_started {
        return Err(TournamentError::InvalidState);
    }
    if tournament.current_round_ref().is_some() {
        return Err(TournamentError::InvalidState);
    }

    let players = tournament.player_snapshot();
    let result = generate_round(
        &players,
        tournament.current_round,
        &tournament.rounds,
        tournament.group_mode,
    );

    if result.success {
        tournament.rounds.push(result.round);
        Ok(())
    } else {
        Err(TournamentError::GenerationFailed(result.errors))
    }
}
