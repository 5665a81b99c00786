//! Group size solver: how many byes a round needs and how the rest split into groups.

use crate::models::{GroupMode, GroupSizeConfiguration};

/// Minimum player count to run a round in any mode.
pub const MIN_PLAYERS: usize = 8;
/// Maximum player count when all groups are size 4 (or custom counts).
pub const MAX_PLAYERS_FOURS: usize = 40;
/// Maximum player count in mixed 8/12 mode.
pub const MAX_PLAYERS_MIXED: usize = 30;

/// Validation failures for player counts and custom group configurations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SizingError {
    TooFewPlayers { current: usize },
    TooManyPlayers { max: usize, current: usize },
    /// Custom counts would seat more players than exist.
    CustomTooManyActive { active: usize, total: usize },
    /// Custom counts would leave more than 3 players on a bye.
    CustomTooManyByes { min_active: usize },
}

impl std::fmt::Display for SizingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SizingError::TooFewPlayers { current } => {
                write!(
                    f,
                    "Need at least {} players (currently have {})",
                    MIN_PLAYERS, current
                )
            }
            SizingError::TooManyPlayers { max, current } => {
                write!(f, "Maximum {} players allowed (currently have {})", max, current)
            }
            SizingError::CustomTooManyActive { active, total } => {
                write!(
                    f,
                    "Total active players ({}) cannot exceed total players ({})",
                    active, total
                )
            }
            SizingError::CustomTooManyByes { min_active } => {
                write!(
                    f,
                    "Too many byes. Total active players must be at least {}",
                    min_active
                )
            }
        }
    }
}

/// Maximum player count for the given mode.
pub fn max_players(mode: GroupMode) -> usize {
    match mode {
        GroupMode::Mixed { .. } => MAX_PLAYERS_MIXED,
        GroupMode::Fours | GroupMode::Custom { .. } => MAX_PLAYERS_FOURS,
    }
}

/// Check the player count against the bounds of the given mode.
pub fn validate_player_count(n_players: usize, mode: GroupMode) -> Result<(), SizingError> {
    if n_players < MIN_PLAYERS {
        return Err(SizingError::TooFewPlayers { current: n_players });
    }
    let max = max_players(mode);
    if n_players > max {
        return Err(SizingError::TooManyPlayers {
            max,
            current: n_players,
        });
    }
    Ok(())
}

/// Check explicit group counts against the player count.
/// Returns the number of seated (non-bye) players on success.
pub fn validate_custom_groups(
    total_players: usize,
    groups_of_4: usize,
    groups_of_8: usize,
    groups_of_12: usize,
) -> Result<usize, SizingError> {
    let active = groups_of_4 * 4 + groups_of_8 * 8 + groups_of_12 * 12;
    if active > total_players {
        return Err(SizingError::CustomTooManyActive {
            active,
            total: total_players,
        });
    }
    // At most 3 byes per round
    if active + 3 < total_players {
        return Err(SizingError::CustomTooManyByes {
            min_active: total_players - 3,
        });
    }
    Ok(active)
}

/// Solve 8a + 12b == active for non-negative group counts (a groups of 8, b of 12).
/// Returns None when no exact partition exists.
fn solve_mixed(active: usize, prefer_larger: bool) -> Option<(usize, usize)> {
    if active % 4 != 0 {
        return None;
    }
    let target = active / 4;
    let mut best: Option<(usize, usize)> = None;
    for b in 0..=target / 3 {
        let rem = target - 3 * b;
        if rem % 2 != 0 {
            continue;
        }
        let a = rem / 2;
        best = match best {
            None => Some((a, b)),
            Some((best_a, best_b)) => {
                if prefer_larger && b > best_b {
                    Some((a, b))
                } else if !prefer_larger && a > best_a {
                    Some((a, b))
                } else {
                    Some((best_a, best_b))
                }
            }
        };
    }
    best
}

/// Compute the group/bye split for a round.
///
/// - `Fours`: byes = n mod 4, everything else in groups of 4.
/// - `Mixed`: byes pad the remainder to a multiple of 4, then the seated count
///   splits into groups of 8 and 12. When no exact split exists the result has
///   zero groups; the round orchestrator treats that as a failure.
/// - `Custom`: explicit counts, validated first.
pub fn calculate_groups(
    n_players: usize,
    mode: GroupMode,
) -> Result<GroupSizeConfiguration, SizingError> {
    validate_player_count(n_players, mode)?;

    match mode {
        GroupMode::Fours => {
            let byes = n_players % 4;
            let active = n_players - byes;
            let groups_of_4 = active / 4;
            Ok(GroupSizeConfiguration {
                total_players: n_players,
                byes,
                active_players_per_round: active,
                groups_of_4,
                groups_of_8: 0,
                groups_of_12: 0,
                total_groups: groups_of_4,
            })
        }
        GroupMode::Mixed { prefer_larger } => {
            let byes = (4 - n_players % 4) % 4;
            let active = n_players - byes;
            match solve_mixed(active, prefer_larger) {
                Some((groups_of_8, groups_of_12)) => Ok(GroupSizeConfiguration {
                    total_players: n_players,
                    byes,
                    active_players_per_round: active,
                    groups_of_4: 0,
                    groups_of_8,
                    groups_of_12,
                    total_groups: groups_of_8 + groups_of_12,
                }),
                None => Ok(GroupSizeConfiguration {
                    total_players: n_players,
                    byes,
                    active_players_per_round: active,
                    groups_of_4: 0,
                    groups_of_8: 0,
                    groups_of_12: 0,
                    total_groups: 0,
                }),
            }
        }
        GroupMode::Custom {
            groups_of_4,
            groups_of_8,
            groups_of_12,
        } => {
            let active = validate_custom_groups(n_players, groups_of_4, groups_of_8, groups_of_12)?;
            Ok(GroupSizeConfiguration {
                total_players: n_players,
                byes: n_players - active,
                active_players_per_round: active,
                groups_of_4,
                groups_of_8,
                groups_of_12,
                total_groups: groups_of_4 + groups_of_8 + groups_of_12,
            })
        }
    }
}
