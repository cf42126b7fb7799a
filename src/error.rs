//! Error types for precondition failures.
//!
//! Illegal placements are not errors: they come back from the validator as a
//! [`ValidationResult`]. The types here cover caller mistakes and the
//! bookkeeping checks of the commit path.

use thiserror::Error;

use crate::pieces::{PieceId, PlayerId};
use crate::rules::ValidationResult;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board size must be positive, got {0}")]
    InvalidSize(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("player count must be between 1 and {max}, got {got}")]
    InvalidPlayerCount { got: usize, max: usize },
    #[error("a {size}x{size} board has no separate corner for each of {players} players")]
    SharedCorners { size: usize, players: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PieceError {
    #[error("piece {0} is already placed and can no longer be transformed")]
    AlreadyPlaced(PieceId),
}

/// Reasons the commit path refused a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("the game is over")]
    GameOver,
    #[error("it is player {current}'s turn, not player {requested}'s")]
    NotYourTurn {
        requested: PlayerId,
        current: PlayerId,
    },
    #[error("player {0} does not exist")]
    UnknownPlayer(PlayerId),
    #[error("player {0} is no longer active")]
    PlayerInactive(PlayerId),
    #[error("piece {0} is not in the catalog")]
    UnknownPiece(PieceId),
    #[error("piece {0} has already been used")]
    PieceUnavailable(PieceId),
    #[error("placement rejected: {}", .0.message)]
    Rejected(ValidationResult),
    #[error(transparent)]
    Piece(#[from] PieceError),
}
