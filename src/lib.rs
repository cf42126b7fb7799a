//! Corner-contact tile placement rules.
//!
//! Provides the shape algebra, occupancy board, placement validator, player
//! bookkeeping and legal-move oracle for a four-player polyomino placement
//! game. The library does no I/O; rendering, input and strategy live in the
//! embedding application.

pub mod config;
pub mod error;
pub mod game;
pub mod geometry;
pub mod grid;
pub mod oracle;
pub mod pieces;
pub mod player;
pub mod rules;

pub use config::GameConfig;
pub use error::{BoardError, ConfigError, PieceError, PlacementError};
pub use game::{Game, Placement};
pub use grid::Board;
pub use oracle::{has_any_legal_move, is_game_over, legal_moves, Move, OrientationTable};
pub use pieces::{Coord, PieceId, PlayerId};
pub use player::{PieceInstance, PieceSet, PlayerState, PlayerStatus};
pub use rules::{validate_placement, RuleType, ValidationResult};
