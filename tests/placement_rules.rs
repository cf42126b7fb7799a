//! Placement rule precedence and legality checks on a standard board.

use corners::rules::validate_placement;
use corners::{Game, GameConfig, Move, PlayerStatus, RuleType};

fn solo_game() -> Game {
    Game::new(GameConfig {
        board_size: 20,
        player_count: 1,
    })
    .unwrap()
}

fn mv(piece_id: u8, rotation: u8, mirrored: bool, anchor: (i32, i32)) -> Move {
    Move {
        piece_id,
        rotation,
        mirrored,
        anchor,
    }
}

/// Player 0 owns only (0, 0).
fn after_corner_monomino() -> Game {
    let mut game = solo_game();
    game.place(0, mv(1, 0, false, (0, 0))).unwrap();
    game
}

fn rule_for(game: &Game, cells: &[(i32, i32)]) -> RuleType {
    validate_placement(cells, &game.players()[0], game.board()).rule
}

#[test]
fn first_move_covering_corner_is_valid() {
    let game = solo_game();
    for cells in [
        vec![(0, 0)],
        vec![(0, 0), (1, 0), (0, 1)],
        vec![(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)],
    ] {
        assert_eq!(rule_for(&game, &cells), RuleType::None, "{cells:?}");
    }
}

#[test]
fn first_move_away_from_corner_is_rejected() {
    let game = solo_game();
    assert_eq!(rule_for(&game, &[(1, 0), (2, 0)]), RuleType::MissingCornerAnchor);
    assert_eq!(rule_for(&game, &[(19, 19)]), RuleType::MissingCornerAnchor);
}

#[test]
fn edge_contact_is_rejected_even_with_corner_contact() {
    let game = after_corner_monomino();
    assert_eq!(rule_for(&game, &[(1, 0), (1, 1)]), RuleType::EdgeContactConflict);
    assert_eq!(rule_for(&game, &[(0, 1)]), RuleType::EdgeContactConflict);
}

#[test]
fn diagonal_contact_is_valid() {
    let game = after_corner_monomino();
    assert_eq!(rule_for(&game, &[(1, 1)]), RuleType::None);
    assert_eq!(rule_for(&game, &[(1, 1), (2, 1), (3, 1)]), RuleType::None);
}

#[test]
fn starting_corner_cell_counts_for_corner_contact() {
    // the corner cell is owned after the first move, so touching it diagonally is enough
    let mut game = after_corner_monomino();
    game.place(0, mv(5, 1, false, (1, 1))).unwrap();
    assert_eq!(game.board().owner_of((1, 4)), Some(0));
}

#[test]
fn placement_without_any_own_contact_is_rejected() {
    let game = after_corner_monomino();
    assert_eq!(rule_for(&game, &[(10, 10), (11, 10)]), RuleType::NoCornerContact);
}

#[test]
fn out_of_bounds_on_every_side() {
    let game = solo_game();
    for cell in [(-1, 0), (0, -1), (20, 0), (0, 20)] {
        assert_eq!(rule_for(&game, &[(0, 0), cell]), RuleType::OutOfBounds, "{cell:?}");
    }
}

#[test]
fn out_of_bounds_precedes_overlap() {
    let game = after_corner_monomino();
    assert_eq!(rule_for(&game, &[(0, 0), (-1, 0)]), RuleType::OutOfBounds);
}

#[test]
fn out_of_bounds_precedes_missing_corner() {
    let game = solo_game();
    assert_eq!(rule_for(&game, &[(5, 5), (5, 20)]), RuleType::OutOfBounds);
}

#[test]
fn overlap_with_own_cell_precedes_edge_contact() {
    let game = after_corner_monomino();
    assert_eq!(rule_for(&game, &[(0, 0), (1, 0)]), RuleType::Overlap);
    assert_eq!(rule_for(&game, &[(0, 0)]), RuleType::Overlap);
}

#[test]
fn overlap_with_other_player_precedes_missing_corner() {
    let mut game = Game::new(GameConfig {
        board_size: 20,
        player_count: 2,
    })
    .unwrap();
    game.place(0, mv(1, 0, false, (0, 0))).unwrap();
    let result = validate_placement(&[(0, 0), (1, 0)], &game.players()[1], game.board());
    assert_eq!(result.rule, RuleType::Overlap);
    assert_eq!(result.cell, Some((0, 0)));
}

#[test]
fn edge_contact_precedes_missing_corner_contact() {
    let mut game = after_corner_monomino();
    game.place(0, mv(2, 0, false, (1, 1))).unwrap();
    // (3, 1) shares an edge with (2, 1) and no corner with any own cell
    assert_eq!(rule_for(&game, &[(3, 1)]), RuleType::EdgeContactConflict);
}

#[test]
fn failed_validation_and_placement_leave_state_untouched() {
    let mut game = after_corner_monomino();
    let board = game.board().clone();
    let players = game.players().to_vec();

    for _ in 0..5 {
        assert!(!game.preview(0, &mv(2, 0, false, (1, 0))).is_valid());
        assert!(game.place(0, mv(2, 0, false, (1, 0))).is_err());
        assert!(game.place(0, mv(2, 0, false, (30, 30))).is_err());
    }

    assert_eq!(game.board(), &board);
    assert_eq!(game.players(), players.as_slice());
    assert_eq!(game.history().len(), 1);
    assert_eq!(game.players()[0].status(), PlayerStatus::Active);
}
