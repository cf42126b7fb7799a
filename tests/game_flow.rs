//! Whole-game flows: enclosure, game over and bookkeeping invariants.

use proptest::prelude::*;

use corners::pieces::catalog_entry;
use corners::{Game, GameConfig, Move, PieceSet, PlayerStatus};

fn sorted(mut cells: Vec<(i32, i32)>) -> Vec<(i32, i32)> {
    cells.sort_unstable();
    cells
}

/// Every invariant that must hold between any two calls.
fn assert_consistent(game: &Game) {
    let mut expected_cells = 0;
    for state in game.players() {
        let available = state.available();
        let used = state.used();
        assert_eq!(available.len() + used.len(), 21);
        assert!(available.iter().all(|id| !used.contains(id)));

        for id in used.iter() {
            let piece = state.piece(id).unwrap();
            assert!(piece.is_placed());
            for cell in piece.placed_cells().unwrap() {
                assert_eq!(game.board().owner_of(cell), Some(state.id()));
            }
            expected_cells += catalog_entry(id).unwrap().size();
        }
        for id in available.iter() {
            assert!(!state.piece(id).unwrap().is_placed());
        }
    }
    assert_eq!(game.board().occupied_count(), expected_cells);
    if let Some(current) = game.current_player() {
        assert_eq!(game.players()[current].status(), PlayerStatus::Active);
    }
}

#[test]
fn enclosed_player_has_no_moves_and_game_ends() {
    let mut game = Game::new(GameConfig {
        board_size: 3,
        player_count: 2,
    })
    .unwrap();
    let mono = |anchor| Move {
        piece_id: 1,
        rotation: 0,
        mirrored: false,
        anchor,
    };

    game.place(0, mono((0, 0))).unwrap();

    // player 1 takes its corner (2, 0) and the only cell diagonal to player 0
    let wall = game
        .legal_moves(1)
        .into_iter()
        .find(|m| m.piece_id == 4 && sorted(m.cells().unwrap()) == vec![(1, 1), (2, 0), (2, 1)])
        .expect("the V tromino fits along the right edge");
    game.place(1, wall).unwrap();

    assert_eq!(game.current_player(), Some(0));
    assert!(!game.has_any_legal_move(0));
    assert!(game.has_any_legal_move(1));
    assert!(!game.conclude_if_over());

    game.pass(0).unwrap();
    game.place(1, mono((0, 2))).unwrap();

    assert!(!game.has_any_legal_move(1));
    assert!(game.conclude_if_over());
    assert!(game.is_over());
    assert_eq!(game.players()[0].status(), PlayerStatus::Skipped);
    assert_eq!(game.players()[1].status(), PlayerStatus::Finished);
    assert_consistent(&game);
}

#[test]
fn first_move_game_on_standard_board_stays_consistent() {
    let mut game = Game::new(GameConfig::default()).unwrap();

    while !game.conclude_if_over() {
        let player = game.current_player().unwrap();
        match game.first_legal_move(player) {
            Some(mv) => {
                let placement = game.place(player, mv).unwrap();
                assert_eq!(placement.cells.len(), catalog_entry(mv.piece_id).unwrap().size());
            }
            None => game.pass(player).unwrap(),
        }
        assert_consistent(&game);
    }

    assert!(game.history().len() >= 4);
    assert!(game.players().iter().all(|state| !state.is_active()));
    for state in game.players() {
        assert!(!game.has_any_legal_move(state.id()) || state.status() == PlayerStatus::Skipped);
    }
}

#[test]
fn single_cell_board_ends_after_monomino() {
    let mut game = Game::new(GameConfig {
        board_size: 1,
        player_count: 1,
    })
    .unwrap();
    let first = game.first_legal_move(0).unwrap();
    assert_eq!(first.piece_id, 1);
    game.place(0, first).unwrap();
    assert!(game.conclude_if_over());
    assert_eq!(game.remaining_cells(0), Some(88));
    assert_eq!(game.players()[0].used(), {
        let mut set = PieceSet::EMPTY;
        set.insert(1);
        set
    });
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn random_games_keep_bookkeeping_consistent(
        size in 4usize..9,
        players in 1usize..5,
        choices in prop::collection::vec(any::<prop::sample::Index>(), 60),
        attempts in prop::collection::vec((1u8..23, 0u8..8, any::<bool>(), -2i32..10, -2i32..10), 60),
    ) {
        let mut game = Game::new(GameConfig { board_size: size, player_count: players }).unwrap();

        for (choice, &(piece_id, rotation, mirrored, x, y)) in choices.iter().zip(&attempts) {
            if game.conclude_if_over() {
                break;
            }
            let player = game.current_player().unwrap();

            // an arbitrary attempt either commits in full or changes nothing
            let attempt = Move { piece_id, rotation, mirrored, anchor: (x, y) };
            let board = game.board().clone();
            let states = game.players().to_vec();
            let previewed = game.preview(player, &attempt).is_valid();
            match game.place(player, attempt) {
                Ok(placement) => {
                    prop_assert!(previewed);
                    prop_assert_eq!(game.board().occupied_count(), board.occupied_count() + placement.cells.len());
                }
                Err(_) => {
                    prop_assert!(!previewed);
                    prop_assert_eq!(game.board(), &board);
                    prop_assert_eq!(game.players(), states.as_slice());

                    let moves = game.legal_moves(player);
                    if moves.is_empty() {
                        game.pass(player).unwrap();
                    } else {
                        game.place(player, moves[choice.index(moves.len())]).unwrap();
                    }
                }
            }
            assert_consistent(&game);
        }
    }
}
