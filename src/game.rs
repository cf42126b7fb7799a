//! Game context: board, players and orientation table in one explicit value.
//!
//! All mutation goes through [`Game::place`] and [`Game::pass`]. Validation
//! and commit happen inside a single `&mut self` call, so a stale preview can
//! never be committed against a board that changed in between. Hosts that
//! share a `Game` across threads should wrap it in a lock and run oracle
//! queries against a cloned snapshot.

use tracing::{debug, instrument};

use crate::config::GameConfig;
use crate::error::{ConfigError, PlacementError};
use crate::geometry::NUM_ROTATIONS;
use crate::grid::Board;
use crate::oracle::{self, Move, OrientationTable};
use crate::pieces::{catalog_entry, Coord, PieceId, PlayerId};
use crate::player::{PlayerState, PlayerStatus};
use crate::rules::{validate_instance, validate_placement, RuleType, ValidationResult};

/// A committed placement, returned by [`Game::place`] and kept in the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub player: PlayerId,
    pub piece_id: PieceId,
    pub rotation: u8,
    pub mirrored: bool,
    pub anchor: Coord,
    pub cells: Vec<Coord>,
}

#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    board: Board,
    players: Vec<PlayerState>,
    orientations: OrientationTable,
    /// Player to move; `None` once nobody is active.
    current: Option<PlayerId>,
    history: Vec<Placement>,
}

impl Game {
    /// Starts a game. Players take the board corners clockwise from (0, 0).
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::new(config.board_size)?;
        let players = seat_players(&board, config.player_count);
        debug!(
            size = config.board_size,
            players = config.player_count,
            "game started"
        );
        Ok(Self {
            config,
            board,
            players,
            orientations: OrientationTable::standard(),
            current: Some(0),
            history: Vec::new(),
        })
    }

    /// Configuration the game was started with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Shared board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// All seated players, indexed by id.
    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }

    /// One player's state, or `None` for an unknown id.
    pub fn player(&self, player: PlayerId) -> Option<&PlayerState> {
        self.players.get(player)
    }

    /// Mutable player access, for turning pieces before they are placed.
    pub fn player_mut(&mut self, player: PlayerId) -> Option<&mut PlayerState> {
        self.players.get_mut(player)
    }

    /// Precomputed orientations used by the oracle queries.
    pub fn orientations(&self) -> &OrientationTable {
        &self.orientations
    }

    /// Player to move, or `None` once the game is over.
    pub fn current_player(&self) -> Option<PlayerId> {
        self.current
    }

    /// True once no player is active.
    pub fn is_over(&self) -> bool {
        self.current.is_none()
    }

    /// Committed placements, oldest first.
    pub fn history(&self) -> &[Placement] {
        &self.history
    }

    /// Cells of the player's unplaced pieces, for scoring.
    pub fn remaining_cells(&self, player: PlayerId) -> Option<usize> {
        self.player(player).map(PlayerState::remaining_cells)
    }

    /// Read-only check of a full move.
    ///
    /// Unknown players, unknown pieces and pieces already used fail closed as
    /// out-of-bounds; nothing here can panic or mutate.
    pub fn preview(&self, player: PlayerId, mv: &Move) -> ValidationResult {
        let Some(state) = self.player(player) else {
            return fail_closed("unknown player");
        };
        if !state.available().contains(mv.piece_id) {
            return fail_closed("piece is not available");
        }
        match mv.cells() {
            Some(cells) => validate_placement(&cells, state, &self.board),
            None => fail_closed("unknown piece"),
        }
    }

    /// Read-only check of a held piece in its current orientation.
    pub fn preview_piece(&self, player: PlayerId, piece_id: PieceId, anchor: Coord) -> ValidationResult {
        let Some(state) = self.player(player) else {
            return fail_closed("unknown player");
        };
        validate_instance(state.piece(piece_id), anchor, state, &self.board)
    }

    /// Validates and commits a move for the player to move, then advances the
    /// turn.
    ///
    /// On any error nothing is changed.
    #[instrument(level = "debug", skip(self), err(level = "debug"))]
    pub fn place(&mut self, player: PlayerId, mv: Move) -> Result<Placement, PlacementError> {
        self.check_turn(player)?;
        if catalog_entry(mv.piece_id).is_none() {
            return Err(PlacementError::UnknownPiece(mv.piece_id));
        }
        if !self.players[player].available().contains(mv.piece_id) {
            return Err(PlacementError::PieceUnavailable(mv.piece_id));
        }

        let cells = mv.cells().ok_or(PlacementError::UnknownPiece(mv.piece_id))?;
        let result = validate_placement(&cells, &self.players[player], &self.board);
        if !result.is_valid() {
            return Err(PlacementError::Rejected(result));
        }

        // bookkeeping first: it is the only step that can still refuse
        self.players[player].record_placement(mv.piece_id, mv.rotation, mv.mirrored, mv.anchor)?;
        self.board.commit(&cells, player);

        let placement = Placement {
            player,
            piece_id: mv.piece_id,
            rotation: mv.rotation % NUM_ROTATIONS,
            mirrored: mv.mirrored,
            anchor: mv.anchor,
            cells,
        };
        debug!(player, piece = mv.piece_id, cells = ?placement.cells, "placement committed");
        self.history.push(placement.clone());

        if self.players[player].status() == PlayerStatus::Finished {
            debug!(player, "all pieces placed");
        }
        self.advance_turn();
        Ok(placement)
    }

    /// Passes the turn. The player is skipped for the rest of the game.
    #[instrument(level = "debug", skip(self), err(level = "debug"))]
    pub fn pass(&mut self, player: PlayerId) -> Result<(), PlacementError> {
        self.check_turn(player)?;
        self.players[player].skip();
        debug!(player, "player skipped");
        self.advance_turn();
        Ok(())
    }

    pub fn has_any_legal_move(&self, player: PlayerId) -> bool {
        self.player(player)
            .is_some_and(|state| oracle::has_any_legal_move(&self.orientations, state, &self.board))
    }

    pub fn legal_moves(&self, player: PlayerId) -> Vec<Move> {
        self.player(player)
            .map(|state| oracle::legal_moves(&self.orientations, state, &self.board))
            .unwrap_or_default()
    }

    pub fn first_legal_move(&self, player: PlayerId) -> Option<Move> {
        let state = self.player(player)?;
        oracle::first_legal_move(&self.orientations, state, &self.board)
    }

    /// Ends the game if no active player can move, finishing those players.
    ///
    /// Returns true if the game is over.
    pub fn conclude_if_over(&mut self) -> bool {
        if self.current.is_none() {
            return true;
        }
        if !oracle::is_game_over(&self.orientations, &self.players, &self.board) {
            return false;
        }
        for state in &mut self.players {
            state.finish();
        }
        self.current = None;
        debug!(placements = self.history.len(), "game over");
        true
    }

    /// Clears the board and players for a new game with the same config.
    pub fn reset(&mut self) {
        self.board.reset();
        self.players = seat_players(&self.board, self.config.player_count);
        self.current = Some(0);
        self.history.clear();
        debug!("game reset");
    }

    fn check_turn(&self, player: PlayerId) -> Result<(), PlacementError> {
        let state = self
            .players
            .get(player)
            .ok_or(PlacementError::UnknownPlayer(player))?;
        let current = self.current.ok_or(PlacementError::GameOver)?;
        if !state.is_active() {
            return Err(PlacementError::PlayerInactive(player));
        }
        if player != current {
            return Err(PlacementError::NotYourTurn {
                requested: player,
                current,
            });
        }
        Ok(())
    }

    /// Moves the turn to the next active player, wrapping around and
    /// including the player who just moved.
    fn advance_turn(&mut self) {
        let count = self.players.len();
        let from = self.current.unwrap_or(0);
        self.current = (1..=count)
            .map(|step| (from + step) % count)
            .find(|&candidate| self.players[candidate].is_active());
        match self.current {
            Some(next) => debug!(next, "turn advanced"),
            None => debug!("no active players left"),
        }
    }
}

fn seat_players(board: &Board, count: usize) -> Vec<PlayerState> {
    board
        .corners()
        .into_iter()
        .take(count)
        .enumerate()
        .map(|(id, corner)| PlayerState::new(id, corner))
        .collect()
}

#[inline]
fn fail_closed(message: &'static str) -> ValidationResult {
    ValidationResult {
        rule: RuleType::OutOfBounds,
        message,
        cell: None,
    }
}
