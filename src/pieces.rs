//! Piece definitions and coordinate types.
//!
//! Each piece is defined as a set of unit cells in 2D space, normalized to
//! start at the origin. The catalog is the standard 21-piece set every player
//! receives: one monomino, one domino, two trominoes, five tetrominoes and
//! twelve pentominoes.

/// A 2D coordinate `(x, y)` on the board or inside a shape.
pub type Coord = (i32, i32);

/// Catalog identifier of a piece, in the range `1..=NUM_PIECES`.
pub type PieceId = u8;

/// Index of a player, in the range `0..MAX_PLAYERS`.
pub type PlayerId = usize;

/// Maximum number of cells in any single piece.
pub const MAX_CELLS: usize = 5;

/// Number of pieces in the catalog.
pub const NUM_PIECES: usize = 21;

/// Maximum number of players at one board.
pub const MAX_PLAYERS: usize = 4;

/// An immutable catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceCatalogEntry {
    pub id: PieceId,
    /// Conventional short name (`I1`, `V3`, `F`, ...).
    pub name: &'static str,
    /// Canonical shape, normalized so min x and min y are both zero.
    pub shape: &'static [Coord],
}

impl PieceCatalogEntry {
    /// Number of cells, which is also the piece's display size.
    #[inline]
    pub const fn size(&self) -> usize {
        self.shape.len()
    }
}

const fn entry(id: PieceId, name: &'static str, shape: &'static [Coord]) -> PieceCatalogEntry {
    assert!(!shape.is_empty(), "piece must have at least one cell");
    assert!(shape.len() <= MAX_CELLS, "piece exceeds MAX_CELLS");
    PieceCatalogEntry { id, name, shape }
}

/// The canonical piece set, ordered by id.
pub const CATALOG: [PieceCatalogEntry; NUM_PIECES] = [
    // monomino and domino
    entry(1, "I1", &[(0, 0)]),
    entry(2, "I2", &[(0, 0), (1, 0)]),
    // trominoes
    entry(3, "I3", &[(0, 0), (1, 0), (2, 0)]),
    entry(4, "V3", &[(0, 0), (1, 0), (0, 1)]),
    // tetrominoes
    entry(5, "I4", &[(0, 0), (1, 0), (2, 0), (3, 0)]),
    entry(6, "O4", &[(0, 0), (1, 0), (0, 1), (1, 1)]),
    entry(7, "T4", &[(0, 0), (1, 0), (2, 0), (1, 1)]),
    entry(8, "L4", &[(0, 0), (1, 0), (2, 0), (0, 1)]),
    entry(9, "Z4", &[(0, 0), (1, 0), (1, 1), (2, 1)]),
    // pentominoes
    entry(10, "F", &[(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)]),
    entry(11, "I5", &[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]),
    entry(12, "L5", &[(0, 0), (1, 0), (2, 0), (3, 0), (0, 1)]),
    entry(13, "N", &[(0, 0), (1, 0), (2, 0), (2, 1), (3, 1)]),
    entry(14, "P", &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]),
    entry(15, "T5", &[(0, 0), (1, 0), (2, 0), (1, 1), (1, 2)]),
    entry(16, "U", &[(0, 0), (2, 0), (0, 1), (1, 1), (2, 1)]),
    entry(17, "V5", &[(0, 0), (1, 0), (2, 0), (0, 1), (0, 2)]),
    entry(18, "W", &[(0, 0), (0, 1), (1, 1), (1, 2), (2, 2)]),
    entry(19, "X", &[(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)]),
    entry(20, "Y", &[(0, 0), (1, 0), (2, 0), (3, 0), (1, 1)]),
    entry(21, "Z5", &[(0, 0), (1, 0), (1, 1), (1, 2), (2, 2)]),
];

/// Looks up a catalog entry by id.
///
/// Returns `None` for ids outside `1..=NUM_PIECES`.
#[inline]
pub fn catalog_entry(id: PieceId) -> Option<&'static PieceCatalogEntry> {
    match id {
        0 => None,
        _ => CATALOG.get(id as usize - 1),
    }
}

/// Iterates over every catalog id in ascending order.
pub fn all_piece_ids() -> impl Iterator<Item = PieceId> {
    CATALOG.iter().map(|entry| entry.id)
}
