//! Score entry and round completion: the only place player history mutates.

use crate::logic::grouping::strength_of_schedule;
use crate::models::{
    MatchId, Player, PlayerId, PlayerStats, ScoringSystem, Team, Tournament, TournamentError,
};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Record the score for one match in the current round and mark it completed.
pub fn update_match_score(
    tournament: &mut Tournament,
    match_id: MatchId,
    team_1_score: u32,
    team_2_score: u32,
) -> Result<(), TournamentError> {
    if !tournament.is_started {
        return Err(TournamentError::InvalidState);
    }
    let round = tournament
        .current_round_mut()
        .ok_or(TournamentError::InvalidState)?;
    let m = round
        .matches
        .iter_mut()
        .find(|m| m.id == match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    m.team_1_score = Some(team_1_score);
    m.team_2_score = Some(team_2_score);
    m.is_completed = true;
    Ok(())
}

/// Points for each side of a completed match.
/// Winner 3, loser 0; bonus mode additionally splits 1 point by score share.
/// A tied game score counts as a team-2 win.
fn match_points(
    system: ScoringSystem,
    bonus_enabled: bool,
    team_1_score: u32,
    team_2_score: u32,
) -> (f64, f64) {
    let team_1_won = team_1_score > team_2_score;
    let (base_1, base_2) = if team_1_won { (3.0, 0.0) } else { (0.0, 3.0) };

    if system == ScoringSystem::WinLossBonus && bonus_enabled {
        let total = (team_1_score + team_2_score) as f64;
        if total > 0.0 {
            let bonus_1 = team_1_score as f64 / total;
            let bonus_2 = team_2_score as f64 / total;
            return (base_1 + bonus_1, base_2 + bonus_2);
        }
    }
    (base_1, base_2)
}

/// Apply one side's result to both members of a team.
fn apply_team_result(
    players: &mut HashMap<PlayerId, Player>,
    team: &Team,
    opponents: &Team,
    points: f64,
    won: bool,
) {
    for id in team.members() {
        let Some(p) = players.get_mut(&id) else {
            continue;
        };
        p.current_score += points;
        p.games_played += 1;
        if won {
            p.wins += 1;
        } else {
            p.losses += 1;
        }
        p.previous_opponents.extend(opponents.members());
        if let Some(partner) = team.partner_of(id) {
            p.previous_teammates.push(partner);
        }
    }
}

/// Complete the current round: award points, append teammate/opponent/bye
/// history, mark the round completed and advance to the next round number.
///
/// Every match must have a recorded score first. Bye players get their bye
/// recorded either way, but bye points go to active players only.
pub fn complete_round(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if !tournament.is_started {
        return Err(TournamentError::InvalidState);
    }
    let round = tournament
        .current_round_ref()
        .ok_or(TournamentError::InvalidState)?;
    if round.matches.iter().any(|m| !m.is_completed) {
        return Err(TournamentError::IncompleteResults);
    }

    // Copy round data so we can mutate players without holding a borrow on rounds.
    let round_number = round.round_number;
    let matches = round.matches.clone();
    let byes = round.byes.clone();

    let system = tournament.configuration.scoring_system;
    let bonus_enabled = tournament.configuration.bonus_points_enabled;
    let bye_points = tournament.configuration.bye_points;

    for m in &matches {
        let (s1, s2) = match (m.team_1_score, m.team_2_score) {
            (Some(s1), Some(s2)) => (s1, s2),
            _ => return Err(TournamentError::IncompleteResults),
        };
        let team_1_won = s1 > s2;
        let (points_1, points_2) = match_points(system, bonus_enabled, s1, s2);
        apply_team_result(
            &mut tournament.players,
            &m.team_1,
            &m.team_2,
            points_1,
            team_1_won,
        );
        apply_team_result(
            &mut tournament.players,
            &m.team_2,
            &m.team_1,
            points_2,
            !team_1_won,
        );
    }

    for id in &byes {
        if let Some(p) = tournament.players.get_mut(id) {
            p.bye_history.push(round_number);
            if p.is_active {
                p.current_score += bye_points;
            }
        }
    }

    if let Some(round) = tournament.current_round_mut() {
        round.is_completed = true;
    }
    tournament.current_round += 1;
    Ok(())
}

/// Players ranked by score descending, then strength of schedule descending,
/// then name ascending.
pub fn leaderboard(tournament: &Tournament) -> Vec<Player> {
    let scores: HashMap<PlayerId, f64> = tournament
        .players
        .values()
        .map(|p| (p.id, p.current_score))
        .collect();

    let mut ranked: Vec<(Player, f64)> = tournament
        .players
        .values()
        .map(|p| {
            let sos = strength_of_schedule(p.id, &tournament.rounds, &scores);
            (p.clone(), sos)
        })
        .collect();
    ranked.sort_by(|(a, a_sos), (b, b_sos)| {
        b.current_score
            .partial_cmp(&a.current_score)
            .unwrap_or(Ordering::Equal)
            .then(b_sos.partial_cmp(a_sos).unwrap_or(Ordering::Equal))
            .then_with(|| a.name.cmp(&b.name))
    });
    ranked.into_iter().map(|(p, _)| p).collect()
}

/// Stats view for one player, including their current leaderboard rank.
pub fn player_stats(tournament: &Tournament, player_id: PlayerId) -> Option<PlayerStats> {
    let player = tournament.players.get(&player_id)?;

    let scores: HashMap<PlayerId, f64> = tournament
        .players
        .values()
        .map(|p| (p.id, p.current_score))
        .collect();
    let sos = strength_of_schedule(player_id, &tournament.rounds, &scores);
    let rank = leaderboard(tournament)
        .iter()
        .position(|p| p.id == player_id)
        .map(|i| i + 1)
        .unwrap_or(0);

    Some(PlayerStats {
        current_score: player.current_score,
        games_played: player.games_played,
        win_percentage: if player.games_played > 0 {
            player.wins as f64 / player.games_played as f64
        } else {
            0.0
        },
        points_per_game: if player.games_played > 0 {
            player.current_score / player.games_played as f64
        } else {
            0.0
        },
        strength_of_schedule: sos,
        rank,
    })
}
