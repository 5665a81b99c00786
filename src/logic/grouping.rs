//! Group building: rank the remaining players and slice them into groups.

use crate::models::{GroupSizeConfiguration, Player, PlayerId, Round};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Average current score of every opponent the player has faced in completed
/// matches of completed rounds. 0 when they have faced nobody yet.
///
/// Opponents are counted per encounter, so facing the same pair twice weights
/// them twice.
pub fn strength_of_schedule(
    player_id: PlayerId,
    rounds: &[Round],
    scores: &HashMap<PlayerId, f64>,
) -> f64 {
    let mut opponents: Vec<PlayerId> = Vec::new();
    for round in rounds.iter().filter(|r| r.is_completed) {
        for m in round.matches.iter().filter(|m| m.is_completed) {
            if let Some(team) = m.opponents_of(player_id) {
                opponents.extend(team.members());
            }
        }
    }
    if opponents.is_empty() {
        return 0.0;
    }
    let total: f64 = opponents
        .iter()
        .map(|id| scores.get(id).copied().unwrap_or(0.0))
        .sum();
    total / opponents.len() as f64
}

/// Compare two players for ranking: current score descending, then strength of
/// schedule descending, then name ascending as the deterministic tiebreak.
fn compare_ranked(a: &Player, b: &Player, a_sos: f64, b_sos: f64) -> Ordering {
    b.current_score
        .partial_cmp(&a.current_score)
        .unwrap_or(Ordering::Equal)
        .then(b_sos.partial_cmp(&a_sos).unwrap_or(Ordering::Equal))
        .then_with(|| a.name.cmp(&b.name))
}

/// Rank the remaining players and partition them into the groups the size
/// solver asked for: groups of 4 first, then 8, then 12, best players first.
pub fn build_groups(
    players: &[Player],
    config: &GroupSizeConfiguration,
    rounds: &[Round],
) -> Vec<Vec<Player>> {
    let scores: HashMap<PlayerId, f64> = players
        .iter()
        .map(|p| (p.id, p.current_score))
        .collect();

    let mut ranked: Vec<(Player, f64)> = players
        .iter()
        .map(|p| {
            let sos = strength_of_schedule(p.id, rounds, &scores);
            (p.clone(), sos)
        })
        .collect();
    ranked.sort_by(|(a, a_sos), (b, b_sos)| compare_ranked(a, b, *a_sos, *b_sos));
    let sorted: Vec<Player> = ranked.into_iter().map(|(p, _)| p).collect();

    let mut groups = Vec::with_capacity(config.total_groups);
    let mut index = 0;
    for (count, size) in [
        (config.groups_of_4, 4),
        (config.groups_of_8, 8),
        (config.groups_of_12, 12),
    ] {
        for _ in 0..count {
            groups.push(sorted[index..index + size].to_vec());
            index += size;
        }
    }

    groups
}
