//! Bye selection: who sits out a round, rotated fairly across the tournament.

use crate::models::{Player, PlayerId};
use rand::Rng;

/// Outcome of bye selection: who sits out and who plays.
#[derive(Clone, Debug)]
pub struct ByeAssignment {
    pub byes: Vec<PlayerId>,
    pub remaining: Vec<Player>,
}

/// Choose `bye_count` players to sit out.
///
/// 1. Filter to active players (inactive players are never given a bye).
/// 2. Stable-sort by total byes so far (ascending), then by most recent bye
///    round (players who have never sat out come first), then by a random
///    tiebreak so repeated identical states don't always pick the same player.
/// 3. The first `bye_count` players sit out; the rest play.
///
/// `_current_round` is accepted for symmetry with the rest of the round
/// pipeline but does not affect the ranking.
pub fn assign_byes(players: &[Player], bye_count: usize, _current_round: u32) -> ByeAssignment {
    let active: Vec<Player> = players.iter().filter(|p| p.is_active).cloned().collect();

    if bye_count == 0 {
        return ByeAssignment {
            byes: Vec::new(),
            remaining: active,
        };
    }

    let mut rng = rand::thread_rng();
    let mut with_tiebreak: Vec<(Player, u32)> = active
        .into_iter()
        .map(|p| (p, rng.gen::<u32>()))
        .collect();
    with_tiebreak.sort_by_key(|(p, t)| {
        let last_bye = p.last_bye_round().map_or(-1, |r| r as i64);
        (p.bye_count(), last_bye, *t)
    });
    let mut sorted: Vec<Player> = with_tiebreak.into_iter().map(|(p, _)| p).collect();

    let bye_count = bye_count.min(sorted.len());
    let remaining = sorted.split_off(bye_count);
    let byes = sorted.into_iter().map(|p| p.id).collect();

    ByeAssignment { byes, remaining }
}
