//! Integration tests for the group size solver and its validation.

use roundnet_tournament_web::{
    calculate_groups, validate_custom_groups, validate_player_count, GroupMode, SizingError,
};

#[test]
fn fours_mode_partitions_every_count_exactly() {
    for n in 8..=40 {
        let config = calculate_groups(n, GroupMode::Fours).unwrap();
        assert_eq!(config.byes, n % 4);
        assert_eq!(config.groups_of_4 * 4 + config.byes, n);
        assert_eq!(config.active_players_per_round + config.byes, n);
        assert_eq!(config.groups_of_8, 0);
        assert_eq!(config.groups_of_12, 0);
        assert_eq!(config.total_groups, config.groups_of_4);
    }
}

#[test]
fn mixed_mode_partitions_add_up_when_solvable() {
    for n in 8..=30 {
        let config = calculate_groups(n, GroupMode::Mixed { prefer_larger: true }).unwrap();
        assert_eq!(config.byes, (4 - n % 4) % 4);
        if config.total_groups > 0 {
            assert_eq!(
                config.groups_of_8 * 8 + config.groups_of_12 * 12,
                config.active_players_per_round
            );
            assert_eq!(config.active_players_per_round + config.byes, n);
        }
    }
}

#[test]
fn fours_mode_worked_examples() {
    let c8 = calculate_groups(8, GroupMode::Fours).unwrap();
    assert_eq!((c8.byes, c8.groups_of_4), (0, 2));

    let c9 = calculate_groups(9, GroupMode::Fours).unwrap();
    assert_eq!((c9.byes, c9.groups_of_4), (1, 2));

    let c30 = calculate_groups(30, GroupMode::Fours).unwrap();
    assert_eq!((c30.byes, c30.groups_of_4), (2, 7));
}

#[test]
fn mixed_mode_worked_examples() {
    let c8 = calculate_groups(8, GroupMode::Mixed { prefer_larger: true }).unwrap();
    assert_eq!((c8.byes, c8.groups_of_8, c8.groups_of_12), (0, 1, 0));

    let c30 = calculate_groups(30, GroupMode::Mixed { prefer_larger: true }).unwrap();
    assert_eq!((c30.byes, c30.groups_of_8, c30.groups_of_12), (2, 2, 1));
}

#[test]
fn mixed_mode_preference_picks_between_solutions() {
    // 24 players: either three groups of 8 or two groups of 12.
    let larger = calculate_groups(24, GroupMode::Mixed { prefer_larger: true }).unwrap();
    assert_eq!((larger.groups_of_8, larger.groups_of_12), (0, 2));

    let smaller = calculate_groups(24, GroupMode::Mixed { prefer_larger: false }).unwrap();
    assert_eq!((smaller.groups_of_8, smaller.groups_of_12), (3, 0));
}

#[test]
fn mixed_mode_unsolvable_count_yields_zero_groups() {
    // 9 players: 3 byes leave 6, which fits no combination of 8s and 12s.
    let config = calculate_groups(9, GroupMode::Mixed { prefer_larger: true }).unwrap();
    assert_eq!(config.byes, 3);
    assert_eq!(config.total_groups, 0);
    assert_eq!(config.active_players_per_round, 6);
}

#[test]
fn player_count_bounds_name_the_limit() {
    let too_few = validate_player_count(7, GroupMode::Fours).unwrap_err();
    assert_eq!(too_few, SizingError::TooFewPlayers { current: 7 });
    assert_eq!(
        too_few.to_string(),
        "Need at least 8 players (currently have 7)"
    );

    let too_many = validate_player_count(41, GroupMode::Fours).unwrap_err();
    assert_eq!(
        too_many.to_string(),
        "Maximum 40 players allowed (currently have 41)"
    );

    let too_many_mixed =
        validate_player_count(31, GroupMode::Mixed { prefer_larger: true }).unwrap_err();
    assert_eq!(
        too_many_mixed.to_string(),
        "Maximum 30 players allowed (currently have 31)"
    );
}

#[test]
fn custom_groups_validate_both_bounds() {
    // 5 groups of 4 seat exactly 20 of 20.
    assert_eq!(validate_custom_groups(20, 5, 0, 0).unwrap(), 20);

    // 24 seats for 20 players: rejected, message carries both numbers.
    let over = validate_custom_groups(20, 6, 0, 0).unwrap_err();
    assert_eq!(
        over.to_string(),
        "Total active players (24) cannot exceed total players (20)"
    );

    // 16 seats for 20 players leaves 4 byes: more than 3 allowed.
    let under = validate_custom_groups(20, 4, 0, 0).unwrap_err();
    assert_eq!(
        under.to_string(),
        "Too many byes. Total active players must be at least 17"
    );
}

#[test]
fn custom_mode_computes_byes_from_the_leftover() {
    let config = calculate_groups(
        19,
        GroupMode::Custom {
            groups_of_4: 4,
            groups_of_8: 0,
            groups_of_12: 0,
        },
    )
    .unwrap();
    assert_eq!(config.active_players_per_round, 16);
    assert_eq!(config.byes, 3);
    assert_eq!(config.total_groups, 4);
}

#[test]
fn custom_mode_rejects_invalid_counts() {
    let err = calculate_groups(
        20,
        GroupMode::Custom {
            groups_of_4: 6,
            groups_of_8: 0,
            groups_of_12: 0,
        },
    )
    .unwrap_err();
    assert!(matches!(err, SizingError::CustomTooManyActive { .. }));
}
