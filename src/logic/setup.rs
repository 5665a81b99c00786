//! Setup phase: validate the configuration, start the tournament, import players.

use crate::logic::group_sizing::calculate_groups;
use crate::models::{Tournament, TournamentError};
use std::io::Read;

/// Start the tournament: validate the player count against the chosen group
/// mode, snapshot the group configuration, and open round 1.
pub fn start_tournament(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.is_started {
        return Err(TournamentError::InvalidState);
    }
    let config = calculate_groups(tournament.players.len(), tournament.group_mode)
        .map_err(|e| TournamentError::InvalidConfiguration(e.to_string()))?;

    tournament.group_configuration = config;
    tournament.is_started = true;
    tournament.current_round = 1;
    Ok(())
}

/// Bulk-add players from CSV records of `name[,skill_rating]` (setup only).
/// Returns how many players were added. Duplicate or empty names fail the
/// whole import, leaving the tournament unchanged.
pub fn import_players<R: Read>(
    tournament: &mut Tournament,
    reader: R,
) -> Result<usize, TournamentError> {
    if tournament.is_started {
        return Err(TournamentError::InvalidState);
    }

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut parsed: Vec<(String, Option<u8>)> = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|e| TournamentError::CsvImport(e.to_string()))?;
        let name = match record.get(0) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => continue,
        };
        let rating = match record.get(1) {
            Some(r) if !r.is_empty() => Some(
                r.parse::<u8>()
                    .map_err(|_| TournamentError::CsvImport(format!("Invalid skill rating: {}", r)))?,
            ),
            _ => None,
        };
        parsed.push((name, rating));
    }

    // Validate against a copy so a mid-file duplicate doesn't leave a half-done import.
    let mut staged = tournament.clone();
    for (name, rating) in &parsed {
        staged.add_player(name.clone(), *rating)?;
    }
    let added = parsed.len();
    *tournament = staged;
    Ok(added)
}
