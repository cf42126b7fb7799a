//! Placement rule validation.
//!
//! The validator is a pure read of the board and the mover's player state.
//! Rules are evaluated in a fixed order and the first failure wins:
//!
//! 1. every cell in bounds
//! 2. no cell already owned by anyone
//! 3. first placement covers the player's starting corner
//! 4. later placements share no edge with the player's own cells
//! 5. later placements share at least one corner with the player's own cells
//!
//! Cells of other players never restrict a placement beyond rule 2.

use std::fmt;

use crate::geometry::translate;
use crate::grid::Board;
use crate::pieces::{Coord, MAX_CELLS};
use crate::player::{PieceInstance, PlayerState};

/// Which rule decided a validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleType {
    /// No rule was violated.
    None,
    OutOfBounds,
    Overlap,
    MissingCornerAnchor,
    EdgeContactConflict,
    NoCornerContact,
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RuleType::None => "none",
            RuleType::OutOfBounds => "out-of-bounds",
            RuleType::Overlap => "overlap",
            RuleType::MissingCornerAnchor => "missing-corner-anchor",
            RuleType::EdgeContactConflict => "edge-contact-conflict",
            RuleType::NoCornerContact => "no-corner-contact",
        };
        f.write_str(name)
    }
}

/// Outcome of a placement check.
///
/// `cell` is the first offending cell when the rule is tied to one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationResult {
    pub rule: RuleType,
    pub message: &'static str,
    pub cell: Option<Coord>,
}

impl ValidationResult {
    pub const VALID: Self = Self {
        rule: RuleType::None,
        message: "placement is legal",
        cell: None,
    };

    #[inline]
    const fn reject(rule: RuleType, message: &'static str, cell: Option<Coord>) -> Self {
        Self {
            rule,
            message,
            cell,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.rule == RuleType::None
    }
}

/// Decides whether `player` may occupy `cells`.
///
/// Never mutates anything; safe to call every frame for previews and in
/// tight loops for move search. An empty cell list fails closed as
/// out-of-bounds.
pub fn validate_placement(cells: &[Coord], player: &PlayerState, board: &Board) -> ValidationResult {
    if cells.is_empty() {
        return ValidationResult::reject(RuleType::OutOfBounds, "placement has no cells", None);
    }

    if let Some(&cell) = cells.iter().find(|&&cell| !board.in_bounds(cell)) {
        return ValidationResult::reject(
            RuleType::OutOfBounds,
            "placement leaves the board",
            Some(cell),
        );
    }

    if let Some(&cell) = cells.iter().find(|&&cell| board.owner_of(cell).is_some()) {
        return ValidationResult::reject(
            RuleType::Overlap,
            "placement overlaps an occupied cell",
            Some(cell),
        );
    }

    let id = player.id();
    if player.is_first_placement() {
        if !cells.contains(&player.starting_corner()) {
            return ValidationResult::reject(
                RuleType::MissingCornerAnchor,
                "first placement must cover the starting corner",
                Some(player.starting_corner()),
            );
        }
        return ValidationResult::VALID;
    }

    // edge contact is checked over every cell before corner contact decides
    let mut corner_contact = false;
    for &cell in cells {
        if board.touches_edge_of(cell, id) {
            return ValidationResult::reject(
                RuleType::EdgeContactConflict,
                "placement shares an edge with the player's own piece",
                Some(cell),
            );
        }
        corner_contact |= board.touches_corner_of(cell, id);
    }

    if !corner_contact {
        return ValidationResult::reject(
            RuleType::NoCornerContact,
            "placement must touch a corner of the player's own piece",
            None,
        );
    }

    ValidationResult::VALID
}

/// Validates a piece instance's current shape at `anchor`.
///
/// The preview path may hold no piece at all (nothing grabbed, or a stale
/// handle); that and an already-placed piece fail closed as out-of-bounds.
pub fn validate_instance(
    piece: Option<&PieceInstance>,
    anchor: Coord,
    player: &PlayerState,
    board: &Board,
) -> ValidationResult {
    let Some(piece) = piece else {
        return ValidationResult::reject(RuleType::OutOfBounds, "no piece selected", None);
    };
    if piece.is_placed() || piece.owner() != player.id() {
        return ValidationResult::reject(
            RuleType::OutOfBounds,
            "piece cannot be placed by this player",
            None,
        );
    }

    let mut buffer = [(0, 0); MAX_CELLS];
    let shape = piece.current_shape();
    let count = shape.len().min(MAX_CELLS);
    for (slot, cell) in buffer.iter_mut().zip(translate(&shape[..count], anchor)) {
        *slot = cell;
    }
    validate_placement(&buffer[..count], player, board)
}
