//! Board occupancy grid.
//!
//! The board is a square grid stored as a flat row-major vector. Each cell is
//! either empty or owned by exactly one player. Ownership is only ever written
//! by [`Board::commit`] and only cleared by [`Board::reset`].

use crate::error::BoardError;
use crate::pieces::{Coord, PlayerId};

/// Standard board dimension.
pub const DEFAULT_BOARD_SIZE: usize = 20;

/// Orthogonal neighbor offsets (shared side).
pub const EDGE_OFFSETS: [Coord; 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Diagonal neighbor offsets (shared corner only).
pub const CORNER_OFFSETS: [Coord; 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// An N x N occupancy grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    /// Flat array of owners, row-major (`y * size + x`).
    cells: Vec<Option<PlayerId>>,
}

impl Board {
    /// Allocates an empty `size` x `size` board.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if size == 0 {
            return Err(BoardError::InvalidSize(size));
        }
        Ok(Self {
            size,
            cells: vec![None; size * size],
        })
    }

    /// Side length of the board.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Converts a coordinate to a flat index, or `None` when out of bounds.
    #[inline(always)]
    fn index(&self, (x, y): Coord) -> Option<usize> {
        if self.in_bounds((x, y)) {
            Some(y as usize * self.size + x as usize)
        } else {
            None
        }
    }

    /// True iff `0 <= x < size` and `0 <= y < size`.
    #[inline(always)]
    pub fn in_bounds(&self, (x, y): Coord) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size
    }

    /// Owner of a cell. Empty if out of bounds or unoccupied.
    #[inline]
    pub fn owner_of(&self, cell: Coord) -> Option<PlayerId> {
        self.index(cell).and_then(|idx| self.cells[idx])
    }

    #[inline]
    pub fn is_owned_by(&self, cell: Coord, player: PlayerId) -> bool {
        self.owner_of(cell) == Some(player)
    }

    /// Marks every cell as owned by `player`.
    ///
    /// Callers must validate the placement first: every cell in bounds and
    /// unoccupied. Violations are caught by debug assertions only; in release
    /// builds out-of-bounds cells are skipped.
    pub fn commit(&mut self, cells: &[Coord], player: PlayerId) {
        for &cell in cells {
            debug_assert!(self.in_bounds(cell), "commit of out-of-bounds cell {cell:?}");
            if let Some(idx) = self.index(cell) {
                debug_assert!(
                    self.cells[idx].is_none(),
                    "commit over occupied cell {cell:?}"
                );
                self.cells[idx] = Some(player);
            }
        }
    }

    /// Clears every cell.
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// All cells owned by `player`, in row-major order.
    pub fn cells_owned_by(&self, player: PlayerId) -> impl Iterator<Item = Coord> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, owner)| **owner == Some(player))
            .map(move |(idx, _)| ((idx % size) as i32, (idx / size) as i32))
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|owner| owner.is_some()).count()
    }

    /// Returns true if any orthogonal neighbor of `cell` belongs to `player`.
    #[inline]
    pub fn touches_edge_of(&self, (x, y): Coord, player: PlayerId) -> bool {
        EDGE_OFFSETS
            .iter()
            .any(|&(dx, dy)| self.is_owned_by((x.saturating_add(dx), y.saturating_add(dy)), player))
    }

    /// Returns true if any diagonal neighbor of `cell` belongs to `player`.
    #[inline]
    pub fn touches_corner_of(&self, (x, y): Coord, player: PlayerId) -> bool {
        CORNER_OFFSETS
            .iter()
            .any(|&(dx, dy)| self.is_owned_by((x.saturating_add(dx), y.saturating_add(dy)), player))
    }

    /// The four corner cells, clockwise from the origin.
    pub fn corners(&self) -> [Coord; 4] {
        let last = self.size as i32 - 1;
        [(0, 0), (last, 0), (last, last), (0, last)]
    }
}

/// Formats a board as text, one row per line from y = 0 downwards.
///
/// Empty cells show as '.', owned cells as the player index.
pub fn format_board(board: &Board) -> String {
    let mut output = String::with_capacity(board.size * (board.size + 1));

    for y in 0..board.size as i32 {
        for x in 0..board.size as i32 {
            let display_char = match board.owner_of((x, y)) {
                None => '.',
                Some(player) if player < 10 => char::from(b'0' + player as u8),
                // hex-style letters for large player indices
                Some(player) => char::from(b'A' + (player - 10) as u8),
            };
            output.push(display_char);
        }
        output.push('\n');
    }

    output
}
