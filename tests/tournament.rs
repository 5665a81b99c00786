//! Integration tests for the tournament layer: setup, rounds, scoring, standings.

use roundnet_tournament_web::{
    complete_round, generate_next_round, import_players, leaderboard, player_stats,
    start_tournament, update_match_score, ScoringSystem, Tournament, TournamentConfig,
    TournamentError,
};

fn tournament_with_players(n: usize) -> Tournament {
    let mut t = Tournament::new("Test Open", None, TournamentConfig::default());
    for i in 0..n {
        t.add_player(format!("Player{i:02}"), None).unwrap();
    }
    t
}

fn enter_all_scores(t: &mut Tournament, team_1_score: u32, team_2_score: u32) {
    let matches: Vec<_> = t
        .current_round_ref()
        .unwrap()
        .matches
        .iter()
        .map(|m| m.id)
        .collect();
    for id in matches {
        update_match_score(t, id, team_1_score, team_2_score).unwrap();
    }
}

#[test]
fn player_names_are_unique_case_insensitive() {
    let mut t = tournament_with_players(0);
    t.add_player("Alice", None).unwrap();
    assert_eq!(
        t.add_player("alice", None),
        Err(TournamentError::DuplicatePlayerName)
    );
}

#[test]
fn players_cannot_be_added_or_removed_after_start() {
    let mut t = tournament_with_players(8);
    start_tournament(&mut t).unwrap();
    assert_eq!(
        t.add_player("Latecomer", None),
        Err(TournamentError::InvalidState)
    );
    let some_id = *t.players.keys().next().unwrap();
    assert_eq!(t.remove_player(some_id), Err(TournamentError::InvalidState));
}

#[test]
fn start_rejects_too_few_players_with_the_bound() {
    let mut t = tournament_with_players(7);
    let err = start_tournament(&mut t).unwrap_err();
    match err {
        TournamentError::InvalidConfiguration(msg) => {
            assert!(msg.contains("at least 8"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!t.is_started);
}

#[test]
fn start_snapshots_the_group_configuration() {
    let mut t = tournament_with_players(9);
    start_tournament(&mut t).unwrap();
    assert!(t.is_started);
    assert_eq!(t.current_round, 1);
    assert_eq!(t.group_configuration.byes, 1);
    assert_eq!(t.group_configuration.groups_of_4, 2);
}

#[test]
fn full_round_trip_updates_scores_and_history() {
    let mut t = tournament_with_players(8);
    start_tournament(&mut t).unwrap();
    generate_next_round(&mut t).unwrap();

    let round = t.current_round_ref().unwrap().clone();
    assert_eq!(round.matches.len(), 2);

    enter_all_scores(&mut t, 21, 15);
    complete_round(&mut t).unwrap();

    assert_eq!(t.current_round, 2);
    let completed = &t.rounds[0];
    assert!(completed.is_completed);

    for m in &round.matches {
        for id in m.team_1.members() {
            let p = &t.players[&id];
            assert_eq!(p.current_score, 3.0);
            assert_eq!((p.wins, p.losses, p.games_played), (1, 0, 1));
            assert_eq!(p.previous_teammates, vec![m.team_1.partner_of(id).unwrap()]);
            assert_eq!(p.previous_opponents, m.team_2.members().to_vec());
        }
        for id in m.team_2.members() {
            let p = &t.players[&id];
            assert_eq!(p.current_score, 0.0);
            assert_eq!((p.wins, p.losses, p.games_played), (0, 1, 1));
        }
    }
}

#[test]
fn second_round_can_be_generated_after_completion() {
    let mut t = tournament_with_players(8);
    start_tournament(&mut t).unwrap();
    generate_next_round(&mut t).unwrap();

    // Regenerating an open round is refused.
    assert_eq!(
        generate_next_round(&mut t),
        Err(TournamentError::InvalidState)
    );

    enter_all_scores(&mut t, 21, 15);
    complete_round(&mut t).unwrap();

    generate_next_round(&mut t).unwrap();
    let round_2 = t.current_round_ref().unwrap();
    assert_eq!(round_2.round_number, 2);
    assert_eq!(round_2.matches.len(), 2);
}

#[test]
fn complete_round_requires_every_score() {
    let mut t = tournament_with_players(8);
    start_tournament(&mut t).unwrap();
    generate_next_round(&mut t).unwrap();

    let first_match = t.current_round_ref().unwrap().matches[0].id;
    update_match_score(&mut t, first_match, 21, 10).unwrap();

    assert_eq!(complete_round(&mut t), Err(TournamentError::IncompleteResults));
    assert_eq!(t.current_round, 1);
}

#[test]
fn tied_game_scores_count_as_a_team_two_win() {
    let mut t = tournament_with_players(8);
    start_tournament(&mut t).unwrap();
    generate_next_round(&mut t).unwrap();

    let round = t.current_round_ref().unwrap().clone();
    enter_all_scores(&mut t, 10, 10);
    complete_round(&mut t).unwrap();

    for m in &round.matches {
        for id in m.team_2.members() {
            assert_eq!(t.players[&id].wins, 1);
        }
        for id in m.team_1.members() {
            assert_eq!(t.players[&id].losses, 1);
        }
    }
}

#[test]
fn bonus_scoring_splits_one_point_by_score_share() {
    let config = TournamentConfig {
        scoring_system: ScoringSystem::WinLossBonus,
        bonus_points_enabled: true,
        ..TournamentConfig::default()
    };
    let mut t = Tournament::new("Bonus Open", None, config);
    for i in 0..8 {
        t.add_player(format!("Player{i:02}"), None).unwrap();
    }
    start_tournament(&mut t).unwrap();
    generate_next_round(&mut t).unwrap();

    let round = t.current_round_ref().unwrap().clone();
    enter_all_scores(&mut t, 21, 15);
    complete_round(&mut t).unwrap();

    let winner_points = 3.0 + 21.0 / 36.0;
    let loser_points = 15.0 / 36.0;
    for m in &round.matches {
        for id in m.team_1.members() {
            assert!((t.players[&id].current_score - winner_points).abs() < 1e-9);
        }
        for id in m.team_2.members() {
            assert!((t.players[&id].current_score - loser_points).abs() < 1e-9);
        }
    }
}

#[test]
fn bye_players_get_history_but_points_only_while_active() {
    let mut t = tournament_with_players(9);
    start_tournament(&mut t).unwrap();
    generate_next_round(&mut t).unwrap();

    let bye_id = t.current_round_ref().unwrap().byes[0];
    enter_all_scores(&mut t, 21, 15);
    complete_round(&mut t).unwrap();

    let bye_player = &t.players[&bye_id];
    assert_eq!(bye_player.bye_history, vec![1]);
    assert_eq!(bye_player.current_score, 3.0);

    // Round 2: deactivate the sitting player before completion; the bye is
    // still recorded, but no points are awarded.
    generate_next_round(&mut t).unwrap();
    let bye_2 = t.current_round_ref().unwrap().byes[0];
    let before = t.players[&bye_2].current_score;
    t.deactivate_player(bye_2).unwrap();
    enter_all_scores(&mut t, 21, 15);
    complete_round(&mut t).unwrap();

    let p = &t.players[&bye_2];
    assert_eq!(p.bye_history.last(), Some(&2));
    assert_eq!(p.current_score, before);
}

#[test]
fn deactivation_keeps_history_and_reactivation_restores_play() {
    let mut t = tournament_with_players(9);
    start_tournament(&mut t).unwrap();
    generate_next_round(&mut t).unwrap();
    enter_all_scores(&mut t, 21, 15);
    complete_round(&mut t).unwrap();

    let id = *t.players.keys().next().unwrap();
    let history_before = t.players[&id].clone();
    t.deactivate_player(id).unwrap();

    let p = &t.players[&id];
    assert!(!p.is_active);
    assert_eq!(p.removed_in_round, Some(2));
    assert_eq!(p.previous_teammates, history_before.previous_teammates);
    assert_eq!(p.previous_opponents, history_before.previous_opponents);
    assert_eq!(p.current_score, history_before.current_score);

    t.reactivate_player(id).unwrap();
    let p = &t.players[&id];
    assert!(p.is_active);
    assert_eq!(p.removed_in_round, None);
}

#[test]
fn leaderboard_orders_by_score_then_name() {
    let mut t = tournament_with_players(0);
    let a = t.add_player("Zoe", None).unwrap();
    let b = t.add_player("Adam", None).unwrap();
    let c = t.add_player("Mia", None).unwrap();
    t.players.get_mut(&a).unwrap().current_score = 6.0;
    t.players.get_mut(&b).unwrap().current_score = 6.0;
    t.players.get_mut(&c).unwrap().current_score = 9.0;

    let board = leaderboard(&t);
    let names: Vec<&str> = board.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Mia", "Adam", "Zoe"]);
}

#[test]
fn player_stats_reflect_games_and_rank() {
    let mut t = tournament_with_players(8);
    start_tournament(&mut t).unwrap();
    generate_next_round(&mut t).unwrap();
    let winner = t.current_round_ref().unwrap().matches[0].team_1.player_1;
    enter_all_scores(&mut t, 21, 15);
    complete_round(&mut t).unwrap();

    let stats = player_stats(&t, winner).unwrap();
    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.win_percentage, 1.0);
    assert_eq!(stats.points_per_game, 3.0);
    assert!(stats.rank >= 1 && stats.rank <= 4);
}

#[test]
fn csv_import_adds_players_with_ratings() {
    let mut t = tournament_with_players(0);
    let added = import_players(&mut t, "Alice,3\nBob\nCarol,5\n".as_bytes()).unwrap();
    assert_eq!(added, 3);
    assert_eq!(t.players.len(), 3);

    let carol = t.players.values().find(|p| p.name == "Carol").unwrap();
    assert_eq!(carol.initial_skill_rating, Some(5));
    let bob = t.players.values().find(|p| p.name == "Bob").unwrap();
    assert_eq!(bob.initial_skill_rating, None);
}

#[test]
fn csv_import_with_a_duplicate_changes_nothing() {
    let mut t = tournament_with_players(0);
    t.add_player("Alice", None).unwrap();
    let err = import_players(&mut t, "Bob\nalice\n".as_bytes()).unwrap_err();
    assert_eq!(err, TournamentError::DuplicatePlayerName);
    assert_eq!(t.players.len(), 1);
}
