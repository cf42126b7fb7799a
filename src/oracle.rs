//! Legal-move oracle.
//!
//! Exhaustive search over a player's remaining pieces, every distinct
//! orientation of each, and every board cell as anchor, using the same
//! validator as the interactive preview path. Used to detect game over and as
//! the legality filter for move search.
//!
//! Key details:
//! - Orientations are precomputed once per catalog, deduplicated so symmetric
//!   pieces are tried fewer than 8 times
//! - Candidate cells live in a fixed-size stack buffer, so the search loop
//!   does not allocate
//! - The search only reads the board; run it against a snapshot when another
//!   thread may commit concurrently

use std::ops::ControlFlow;

use tracing::instrument;

use crate::geometry::{derive_current_shape, distinct_orientations, translate, Orientation};
use crate::grid::Board;
use crate::pieces::{catalog_entry, Coord, PieceId, CATALOG, MAX_CELLS};
use crate::player::PlayerState;
use crate::rules::validate_placement;

/// A complete placement choice: which piece, how it is turned, and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub piece_id: PieceId,
    pub rotation: u8,
    pub mirrored: bool,
    pub anchor: Coord,
}

impl Move {
    /// Absolute cells this move would occupy, or `None` for an unknown piece.
    pub fn cells(&self) -> Option<Vec<Coord>> {
        let entry = catalog_entry(self.piece_id)?;
        let shape = derive_current_shape(entry.shape, self.rotation, self.mirrored);
        Some(translate(&shape, self.anchor).collect())
    }
}

/// Distinct orientations of every catalog piece, indexed by `id - 1`.
#[derive(Debug, Clone)]
pub struct OrientationTable {
    orientations: Vec<Vec<Orientation>>,
}

impl OrientationTable {
    /// Builds the table for the standard catalog.
    pub fn standard() -> Self {
        Self {
            orientations: CATALOG
                .iter()
                .map(|entry| distinct_orientations(entry.shape))
                .collect(),
        }
    }

    /// Orientations of one piece; empty for ids outside the catalog.
    pub fn orientations(&self, piece_id: PieceId) -> &[Orientation] {
        (piece_id as usize)
            .checked_sub(1)
            .and_then(|index| self.orientations.get(index))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total orientation count across the catalog.
    pub fn len(&self) -> usize {
        self.orientations.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for OrientationTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Visits every legal move of `player` in deterministic order: piece id
/// ascending, then orientation, then anchor row-major.
fn visit_legal_moves<F>(
    table: &OrientationTable,
    player: &PlayerState,
    board: &Board,
    mut visit: F,
) -> ControlFlow<()>
where
    F: FnMut(Move) -> ControlFlow<()>,
{
    let size = board.size() as i32;
    let mut buffer = [(0, 0); MAX_CELLS];

    for piece_id in player.available().iter() {
        for orientation in table.orientations(piece_id) {
            let count = orientation.cells.len().min(MAX_CELLS);
            let cells = &orientation.cells[..count];

            for y in 0..size {
                for x in 0..size {
                    for (slot, cell) in buffer.iter_mut().zip(translate(cells, (x, y))) {
                        *slot = cell;
                    }
                    if validate_placement(&buffer[..count], player, board).is_valid() {
                        visit(Move {
                            piece_id,
                            rotation: orientation.rotation,
                            mirrored: orientation.mirrored,
                            anchor: (x, y),
                        })?;
                    }
                }
            }
        }
    }

    ControlFlow::Continue(())
}

/// Returns true as soon as any legal move is found for `player`.
#[instrument(level = "trace", skip_all, fields(player = player.id()))]
pub fn has_any_legal_move(table: &OrientationTable, player: &PlayerState, board: &Board) -> bool {
    visit_legal_moves(table, player, board, |_| ControlFlow::Break(())).is_break()
}

/// The first legal move in search order, if any.
pub fn first_legal_move(table: &OrientationTable, player: &PlayerState, board: &Board) -> Option<Move> {
    let mut found = None;
    let _ = visit_legal_moves(table, player, board, |candidate| {
        found = Some(candidate);
        ControlFlow::Break(())
    });
    found
}

/// Enumerates every legal move for `player`.
#[instrument(level = "trace", skip_all, fields(player = player.id()))]
pub fn legal_moves(table: &OrientationTable, player: &PlayerState, board: &Board) -> Vec<Move> {
    let mut moves = Vec::new();
    let _ = visit_legal_moves(table, player, board, |candidate| {
        moves.push(candidate);
        ControlFlow::Continue(())
    });
    moves
}

/// True when no active player has a legal move left.
///
/// Players that are not active are ignored, so a table where everyone has
/// passed or finished is over.
pub fn is_game_over(table: &OrientationTable, players: &[PlayerState], board: &Board) -> bool {
    players
        .iter()
        .filter(|player| player.is_active())
        .all(|player| !has_any_legal_move(table, player, board))
}
