//! Game configuration.

use crate::error::{BoardError, ConfigError};
use crate::grid::DEFAULT_BOARD_SIZE;
use crate::pieces::MAX_PLAYERS;

/// Parameters fixed for the lifetime of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Side length of the square board.
    pub board_size: usize,
    /// Number of seated players; each takes one board corner.
    pub player_count: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            player_count: MAX_PLAYERS,
        }
    }
}

impl GameConfig {
    /// Checks the board size and seat count.
    ///
    /// More than one player needs a board of at least 2x2, so that every
    /// seat gets its own corner.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(BoardError::InvalidSize(self.board_size).into());
        }
        if !(1..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::InvalidPlayerCount {
                got: self.player_count,
                max: MAX_PLAYERS,
            });
        }
        if self.board_size < 2 && self.player_count > 1 {
            return Err(ConfigError::SharedCorners {
                size: self.board_size,
                players: self.player_count,
            });
        }
        Ok(())
    }
}
