//! Per-player bookkeeping: piece instances, piece sets and status.

use std::fmt;

use crate::error::PieceError;
use crate::geometry::{derive_current_shape, translate, NUM_ROTATIONS};
use crate::pieces::{all_piece_ids, catalog_entry, Coord, PieceId, PlayerId, NUM_PIECES};

/// A set of catalog ids stored as a bitmask (bit `id - 1`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PieceSet(u32);

impl PieceSet {
    pub const EMPTY: Self = Self(0);
    pub const ALL: Self = Self((1 << NUM_PIECES) - 1);

    /// Bit for `id`, or zero for ids outside the catalog.
    #[inline]
    fn bit(id: PieceId) -> u32 {
        if (1..=NUM_PIECES as PieceId).contains(&id) {
            1 << (id - 1)
        } else {
            0
        }
    }

    /// True if `id` is in the set. Ids outside the catalog never are.
    #[inline]
    pub fn contains(self, id: PieceId) -> bool {
        self.0 & Self::bit(id) != 0
    }

    /// Adds `id`. Ids outside the catalog are ignored.
    #[inline]
    pub fn insert(&mut self, id: PieceId) {
        self.0 |= Self::bit(id);
    }

    /// Removes `id`. Ids outside the catalog are ignored.
    #[inline]
    pub fn remove(&mut self, id: PieceId) {
        self.0 &= !Self::bit(id);
    }

    /// Number of ids in the set.
    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// True if the set holds no ids.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Ids in ascending order.
    pub fn iter(self) -> impl Iterator<Item = PieceId> {
        all_piece_ids().filter(move |&id| self.contains(id))
    }
}

impl fmt::Debug for PieceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// One player's copy of a catalog piece.
///
/// The current shape is cached and always equals the canonical shape derived
/// through `(rotation, mirrored)`. Once placed, the instance is frozen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceInstance {
    piece_id: PieceId,
    owner: PlayerId,
    rotation: u8,
    mirrored: bool,
    shape: Vec<Coord>,
    anchor: Option<Coord>,
}

impl PieceInstance {
    /// Creates an unplaced piece in its canonical orientation.
    ///
    /// Returns `None` for ids not in the catalog.
    pub fn new(piece_id: PieceId, owner: PlayerId) -> Option<Self> {
        let entry = catalog_entry(piece_id)?;
        Some(Self {
            piece_id,
            owner,
            rotation: 0,
            mirrored: false,
            shape: derive_current_shape(entry.shape, 0, false),
            anchor: None,
        })
    }

    /// Catalog id.
    pub fn piece_id(&self) -> PieceId {
        self.piece_id
    }

    /// Player holding the piece.
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    /// Quarter turns applied after the mirror, in `0..4`.
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// True if the canonical shape is mirrored before rotating.
    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    /// Normalized cells in the current orientation.
    pub fn current_shape(&self) -> &[Coord] {
        &self.shape
    }

    /// Cell count.
    pub fn size(&self) -> usize {
        self.shape.len()
    }

    /// True once committed to the board.
    pub fn is_placed(&self) -> bool {
        self.anchor.is_some()
    }

    /// Anchor of the committed placement.
    pub fn anchor(&self) -> Option<Coord> {
        self.anchor
    }

    /// Absolute cells of the current shape at `anchor`.
    pub fn cells_at(&self, anchor: Coord) -> Vec<Coord> {
        translate(&self.shape, anchor).collect()
    }

    /// Cells the piece occupies on the board, once placed.
    pub fn placed_cells(&self) -> Option<Vec<Coord>> {
        self.anchor.map(|anchor| self.cells_at(anchor))
    }

    /// Turns the piece a quarter clockwise.
    pub fn rotate_clockwise(&mut self) -> Result<(), PieceError> {
        let rotation = (self.rotation + 1) % NUM_ROTATIONS;
        self.set_orientation(rotation, self.mirrored)
    }

    /// Flips the piece as currently shown across its vertical axis.
    ///
    /// Mirroring a shape turned `r` times equals turning its mirror image
    /// `4 - r` times, so the rotation count is adjusted along with the flag.
    pub fn mirror(&mut self) -> Result<(), PieceError> {
        let rotation = (NUM_ROTATIONS - self.rotation) % NUM_ROTATIONS;
        self.set_orientation(rotation, !self.mirrored)
    }

    /// Sets an absolute orientation. `rotation` is taken mod 4.
    pub fn set_orientation(&mut self, rotation: u8, mirrored: bool) -> Result<(), PieceError> {
        if self.is_placed() {
            return Err(PieceError::AlreadyPlaced(self.piece_id));
        }
        // catalog lookup cannot fail: the id was checked at construction
        if let Some(entry) = catalog_entry(self.piece_id) {
            self.rotation = rotation % NUM_ROTATIONS;
            self.mirrored = mirrored;
            self.shape = derive_current_shape(entry.shape, self.rotation, mirrored);
        }
        Ok(())
    }

    /// Freezes the piece at `anchor` with the given orientation.
    pub(crate) fn place(&mut self, rotation: u8, mirrored: bool, anchor: Coord) -> Result<(), PieceError> {
        self.set_orientation(rotation, mirrored)?;
        self.anchor = Some(anchor);
        Ok(())
    }
}

/// Lifecycle of a player within one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerStatus {
    Active,
    /// Passed or was forced to pass; out of the turn rotation.
    Skipped,
    /// Placed every piece, or had no legal move when the game ended.
    Finished,
}

/// Bookkeeping for one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    id: PlayerId,
    starting_corner: Coord,
    available: PieceSet,
    used: PieceSet,
    status: PlayerStatus,
    /// One instance per catalog id, indexed by `id - 1`.
    pieces: Vec<PieceInstance>,
}

impl PlayerState {
    /// Creates a player holding the full catalog.
    pub fn new(id: PlayerId, starting_corner: Coord) -> Self {
        let pieces = all_piece_ids()
            .filter_map(|piece_id| PieceInstance::new(piece_id, id))
            .collect();
        Self {
            id,
            starting_corner,
            available: PieceSet::ALL,
            used: PieceSet::EMPTY,
            status: PlayerStatus::Active,
            pieces,
        }
    }

    /// Seat index.
    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// Board corner the first piece must cover.
    pub fn starting_corner(&self) -> Coord {
        self.starting_corner
    }

    /// Current lifecycle state.
    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    /// True while the player is still in the turn rotation.
    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Pieces not yet placed.
    pub fn available(&self) -> PieceSet {
        self.available
    }

    /// Pieces already on the board.
    pub fn used(&self) -> PieceSet {
        self.used
    }

    /// True until the first piece has been committed.
    pub fn is_first_placement(&self) -> bool {
        self.used.is_empty()
    }

    /// The player's instance of a catalog piece.
    pub fn piece(&self, piece_id: PieceId) -> Option<&PieceInstance> {
        self.pieces.get((piece_id as usize).checked_sub(1)?)
    }

    /// Mutable access for pre-placement rotate and mirror.
    pub fn piece_mut(&mut self, piece_id: PieceId) -> Option<&mut PieceInstance> {
        self.pieces.get_mut((piece_id as usize).checked_sub(1)?)
    }

    /// Every instance, in catalog order.
    pub fn pieces(&self) -> &[PieceInstance] {
        &self.pieces
    }

    /// Total cells of the pieces not yet placed.
    pub fn remaining_cells(&self) -> usize {
        self.available
            .iter()
            .filter_map(catalog_entry)
            .map(|entry| entry.size())
            .sum()
    }

    /// Moves a piece from available to used.
    pub(crate) fn mark_used(&mut self, piece_id: PieceId) {
        debug_assert!(self.available.contains(piece_id), "piece {piece_id} used twice");
        self.available.remove(piece_id);
        self.used.insert(piece_id);
    }

    /// Records a committed placement. Finishes the player once every piece
    /// has been placed.
    pub(crate) fn record_placement(
        &mut self,
        piece_id: PieceId,
        rotation: u8,
        mirrored: bool,
        anchor: Coord,
    ) -> Result<(), PieceError> {
        if let Some(piece) = self.piece_mut(piece_id) {
            piece.place(rotation, mirrored, anchor)?;
        }
        self.mark_used(piece_id);
        if self.available.is_empty() {
            self.status = PlayerStatus::Finished;
        }
        Ok(())
    }

    /// `Active -> Skipped`. No effect on any other status.
    pub(crate) fn skip(&mut self) {
        if self.status == PlayerStatus::Active {
            self.status = PlayerStatus::Skipped;
        }
    }

    /// `Active -> Finished`. No effect on any other status.
    pub(crate) fn finish(&mut self) {
        if self.status == PlayerStatus::Active {
            self.status = PlayerStatus::Finished;
        }
    }
}
