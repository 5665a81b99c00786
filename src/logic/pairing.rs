//! Team and match pairing: exhaustive enumeration of perfect matchings plus
//! selection by repeat-avoidance and score balance.
//!
//! Enumeration of a k-player group yields (k-1)!! team partitions (3 for 4
//! players, 105 for 8, 10395 for 12). Group sizes are capped at 12 by the size
//! solver, which keeps the search bounded; do not feed larger groups in.

use crate::models::{GameMatch, Player, PlayerId, Team};

/// Structural failures while enumerating teams or matches.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PairingError {
    /// Group size must be even to partition into 2-player teams.
    OddPlayerCount(usize),
    /// Team count must be even to pair teams into matches.
    OddTeamCount(usize),
    /// Enumeration produced no team partitions for a group.
    NoTeamSets(usize),
    /// Enumeration produced no match pairings for a team set.
    NoMatchSets(usize),
}

impl std::fmt::Display for PairingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PairingError::OddPlayerCount(n) => {
                write!(f, "Player count must be even to form teams (got {})", n)
            }
            PairingError::OddTeamCount(n) => {
                write!(f, "Team count must be even to form matches (got {})", n)
            }
            PairingError::NoTeamSets(n) => {
                write!(f, "No valid team sets for group of {} players", n)
            }
            PairingError::NoMatchSets(n) => {
                write!(f, "No valid match sets for {} teams", n)
            }
        }
    }
}

/// The chosen team partition of a group, with its selection diagnostics.
#[derive(Clone, Debug)]
pub struct TeamGenerationResult {
    pub teams: Vec<Team>,
    pub repeat_partner_count: usize,
    pub max_team_score: f64,
    pub min_team_score: f64,
    pub score_difference: f64,
}

/// The chosen match pairing of a team set, with its selection diagnostics.
#[derive(Clone, Debug)]
pub struct MatchGenerationResult {
    pub matches: Vec<GameMatch>,
    pub repeat_opponent_count: usize,
    pub total_score_difference: f64,
}

/// Enumerate every way to partition the group into 2-player teams.
///
/// Recursive perfect matching over an index mask: the first unused player is
/// paired with each other unused player in turn, recursing on the rest. No
/// intermediate list copies are made.
pub fn generate_all_team_sets(group: &[Player]) -> Result<Vec<Vec<Team>>, PairingError> {
    if group.len() % 2 != 0 {
        return Err(PairingError::OddPlayerCount(group.len()));
    }

    let mut all_sets = Vec::new();
    let mut used = vec![false; group.len()];
    let mut current = Vec::with_capacity(group.len() / 2);
    pair_players(group, &mut used, &mut current, &mut all_sets);
    Ok(all_sets)
}

fn pair_players(
    group: &[Player],
    used: &mut [bool],
    current: &mut Vec<Team>,
    all_sets: &mut Vec<Vec<Team>>,
) {
    let first = match used.iter().position(|u| !u) {
        Some(i) => i,
        None => {
            all_sets.push(current.clone());
            return;
        }
    };

    used[first] = true;
    for second in first + 1..group.len() {
        if used[second] {
            continue;
        }
        used[second] = true;
        current.push(Team::new(
            group[first].id,
            group[second].id,
            group[first].current_score + group[second].current_score,
        ));
        pair_players(group, used, current, all_sets);
        current.pop();
        used[second] = false;
    }
    used[first] = false;
}

fn find_player(players: &[Player], id: PlayerId) -> Option<&Player> {
    players.iter().find(|p| p.id == id)
}

/// Number of teams in the set whose members have partnered before.
pub fn count_repeat_partners(teams: &[Team], players: &[Player]) -> usize {
    teams
        .iter()
        .filter(|team| {
            let p1 = find_player(players, team.player_1);
            let p2 = find_player(players, team.player_2);
            match (p1, p2) {
                (Some(p1), Some(p2)) => {
                    p1.has_partnered_with(team.player_2) || p2.has_partnered_with(team.player_1)
                }
                _ => false,
            }
        })
        .count()
}

fn team_set_score_spread(teams: &[Team]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for t in teams {
        min = min.min(t.combined_score);
        max = max.max(t.combined_score);
    }
    (min, max)
}

/// Pick the team partition with the fewest repeat partnerships; among those,
/// the one with the smallest spread between strongest and weakest team.
/// First candidate wins exact ties. None when `team_sets` is empty.
pub fn find_best_team_set(
    team_sets: &[Vec<Team>],
    players: &[Player],
) -> Option<TeamGenerationResult> {
    let mut best: Option<&Vec<Team>> = None;
    let mut best_repeats = usize::MAX;
    let mut best_spread = f64::INFINITY;

    for set in team_sets {
        let repeats = count_repeat_partners(set, players);
        if repeats < best_repeats {
            let (min, max) = team_set_score_spread(set);
            best = Some(set);
            best_repeats = repeats;
            best_spread = max - min;
        } else if repeats == best_repeats {
            let (min, max) = team_set_score_spread(set);
            if max - min < best_spread {
                best = Some(set);
                best_spread = max - min;
            }
        }
    }

    best.map(|teams| {
        let (min, max) = team_set_score_spread(teams);
        TeamGenerationResult {
            teams: teams.clone(),
            repeat_partner_count: best_repeats,
            max_team_score: max,
            min_team_score: min,
            score_difference: max - min,
        }
    })
}

/// Enumerate every way to pair the teams into 2-team matches.
/// Same recursive perfect matching as team enumeration, over teams.
pub fn generate_all_match_sets(
    teams: &[Team],
    round_number: u32,
) -> Result<Vec<Vec<GameMatch>>, PairingError> {
    if teams.len() % 2 != 0 {
        return Err(PairingError::OddTeamCount(teams.len()));
    }

    let mut all_sets = Vec::new();
    let mut used = vec![false; teams.len()];
    let mut current = Vec::with_capacity(teams.len() / 2);
    pair_teams(teams, round_number, &mut used, &mut current, &mut all_sets);
    Ok(all_sets)
}

fn pair_teams(
    teams: &[Team],
    round_number: u32,
    used: &mut [bool],
    current: &mut Vec<GameMatch>,
    all_sets: &mut Vec<Vec<GameMatch>>,
) {
    let first = match used.iter().position(|u| !u) {
        Some(i) => i,
        None => {
            all_sets.push(current.clone());
            return;
        }
    };

    used[first] = true;
    for second in first + 1..teams.len() {
        if used[second] {
            continue;
        }
        used[second] = true;
        current.push(GameMatch::new(
            teams[first].clone(),
            teams[second].clone(),
            round_number,
        ));
        pair_teams(teams, round_number, used, current, all_sets);
        current.pop();
        used[second] = false;
    }
    used[first] = false;
}

/// Count cross-team player pairs that have already faced each other: for every
/// match, every (team 1 member, team 2 member) pair contributes 1 when the
/// first has the second in their opponent history.
pub fn count_repeat_opponents(matches: &[GameMatch], players: &[Player]) -> usize {
    let mut repeats = 0;
    for m in matches {
        for p1_id in m.team_1.members() {
            let Some(p1) = find_player(players, p1_id) else {
                continue;
            };
            for p2_id in m.team_2.members() {
                if p1.has_faced(p2_id) {
                    repeats += 1;
                }
            }
        }
    }
    repeats
}

fn match_set_score_difference(matches: &[GameMatch]) -> f64 {
    matches
        .iter()
        .map(|m| (m.team_1.combined_score - m.team_2.combined_score).abs())
        .sum()
}

/// Pick the match pairing with the fewest repeat opponents; among those, the
/// one with the smallest total score difference across matches. First
/// candidate wins exact ties. None when `match_sets` is empty.
pub fn find_best_match_set(
    match_sets: &[Vec<GameMatch>],
    players: &[Player],
) -> Option<MatchGenerationResult> {
    let mut best: Option<&Vec<GameMatch>> = None;
    let mut best_repeats = usize::MAX;
    let mut best_difference = f64::INFINITY;

    for set in match_sets {
        let repeats = count_repeat_opponents(set, players);
        if repeats < best_repeats {
            best = Some(set);
            best_repeats = repeats;
            best_difference = match_set_score_difference(set);
        } else if repeats == best_repeats {
            let difference = match_set_score_difference(set);
            if difference < best_difference {
                best = Some(set);
                best_difference = difference;
            }
        }
    }

    best.map(|matches| MatchGenerationResult {
        matches: matches.clone(),
        repeat_opponent_count: best_repeats,
        total_score_difference: best_difference,
    })
}
