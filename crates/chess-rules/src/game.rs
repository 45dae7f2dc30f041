//! Game engine: legality, check detection, move execution and game phase.
//!
//! The [`Game`] owns the live [`Board`], a one-slot snapshot used to test
//! moves by simulation, the legal-move table of the side to move and the set
//! of that side's attacked critical pieces.
//!
//! Legality is decided by brute force: a move is legal when the piece rule
//! allows it and, after playing it on the board, the mover has no critical
//! piece under attack. Every speculative move goes through a [`Probe`],
//! which restores the board when dropped, so a probe can never outlive the
//! snapshot it depends on.

use crate::config::{ConfigError, EngineConfig};
use crate::rules::{standard, MoveRule};
use crate::{Bitboard, MoveTable, Registry};
use chess_core::{Board, Color, Move, Piece, PieceId, Square};
use std::ops::Deref;
use std::sync::Arc;
use thiserror::Error;

/// Error type for game operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A promotion choice was made while no promotion was pending.
    #[error("no promotion is pending")]
    NotAwaitingPromotion,
    /// A promotion choice named a square other than the pending one.
    #[error("promotion is pending on {expected}, not {got}")]
    WrongPromotionSquare { expected: Square, got: Square },
    /// The identity is unregistered, critical, or the promoting kind itself.
    #[error("identity {0} is not a valid promotion choice")]
    InvalidPromotion(PieceId),
    /// The starting layout holds an identity with no registered kind.
    #[error("layout holds unregistered identity {id} on {square}")]
    UnregisteredPiece { id: PieceId, square: Square },
    /// No accepted move is available to take back.
    #[error("there is no move to take back")]
    NothingToTakeBack,
}

/// Phase of the game after the last completed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    InProgress,
    Checkmate,
    Stalemate,
    /// A piece reached a promotion square and waits for a replacement.
    AwaitingPromotion,
}

impl GamePhase {
    /// Returns true for checkmate and stalemate.
    pub fn is_over(self) -> bool {
        matches!(self, GamePhase::Checkmate | GamePhase::Stalemate)
    }
}

/// Result of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move is not legal now; nothing changed.
    Rejected,
    /// The move was played and the opponent is to move.
    Played,
    /// The move was played and a promotion choice is now required.
    PromotionPending,
}

impl MoveOutcome {
    pub fn is_accepted(self) -> bool {
        self != MoveOutcome::Rejected
    }

    pub fn promotes(self) -> bool {
        self == MoveOutcome::PromotionPending
    }
}

/// Read-only snapshot of everything a presentation layer needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    pub phase: GamePhase,
    pub side_to_move: Color,
    /// Critical pieces of the side to move that are under attack.
    pub attacked_criticals: Bitboard,
    pub legal_moves: MoveTable,
}

impl GameState {
    /// The side that delivered checkmate, if any.
    pub fn winner(&self) -> Option<Color> {
        (self.phase == GamePhase::Checkmate).then(|| self.side_to_move.opposite())
    }
}

/// A single game driven by move requests and promotion choices.
#[derive(Debug, Clone)]
pub struct Game {
    registry: Arc<Registry>,
    initial: Board,
    first_to_move: Color,
    board: Board,
    side_to_move: Color,
    /// Board before the move currently being probed.
    snapshot: Option<Board>,
    /// Board before the last accepted move.
    previous: Option<Board>,
    legal_moves: MoveTable,
    attacked_criticals: Bitboard,
    phase: GamePhase,
    pending_promotion: Option<Square>,
}

impl Default for Game {
    fn default() -> Self {
        Self::standard()
    }
}

impl Game {
    /// Creates a standard chess game.
    pub fn standard() -> Self {
        Self::build(
            Arc::new(standard::registry()),
            standard::initial_board(),
            standard::FIRST_TO_MOVE,
        )
    }

    /// Creates a game from a registry and starting layout.
    ///
    /// Every piece in the layout must have a registered identity. The
    /// starting position is classified immediately, so a layout that is
    /// already mate or stalemate starts in that phase.
    pub fn new(registry: Arc<Registry>, layout: Board, first_to_move: Color) -> Result<Self, GameError> {
        if let Some((square, piece)) = layout.pieces().find(|(_, p)| !registry.contains(p.id)) {
            return Err(GameError::UnregisteredPiece { id: piece.id, square });
        }
        Ok(Self::build(registry, layout, first_to_move))
    }

    /// Creates a game from an engine configuration.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        let (registry, layout) = config.build()?;
        Ok(Self::new(Arc::new(registry), layout, config.first_to_move)?)
    }

    fn build(registry: Arc<Registry>, layout: Board, first_to_move: Color) -> Self {
        let mut game = Game {
            registry,
            initial: layout,
            first_to_move,
            board: layout,
            side_to_move: first_to_move,
            snapshot: None,
            previous: None,
            legal_moves: MoveTable::EMPTY,
            attacked_criticals: Bitboard::EMPTY,
            phase: GamePhase::InProgress,
            pending_promotion: None,
        };
        game.finalize();
        game
    }

    /// Returns the piece registry.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Returns the live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Returns the game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Returns the legal moves of the side to move.
    pub fn legal_moves(&self) -> &MoveTable {
        &self.legal_moves
    }

    /// Returns the attacked critical pieces of the side to move.
    pub fn attacked_criticals(&self) -> Bitboard {
        self.attacked_criticals
    }

    /// Returns the square awaiting a promotion choice.
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    /// Returns a snapshot of the game state.
    pub fn state(&self) -> GameState {
        GameState {
            phase: self.phase,
            side_to_move: self.side_to_move,
            attacked_criticals: self.attacked_criticals,
            legal_moves: self.legal_moves,
        }
    }

    /// Returns true if the piece on `square` is attacked by any opposing piece.
    ///
    /// Empty squares are never attacked.
    pub fn is_attacked(&self, square: Square) -> bool {
        let target = self.board.get(square);
        if target.is_empty() {
            return false;
        }
        self.board.pieces().any(|(from, attacker)| {
            attacker.color != target.color
                && self
                    .registry
                    .rule(attacker.id)
                    .is_pseudolegal(from, square, &self.board)
        })
    }

    /// Returns true if any critical piece of `color` is attacked.
    pub fn in_check(&self, color: Color) -> bool {
        self.board
            .pieces()
            .any(|(sq, p)| self.is_critical_of(p, color) && self.is_attacked(sq))
    }

    /// Returns the squares of the attacked critical pieces of `color`.
    pub fn attacked_criticals_of(&self, color: Color) -> Bitboard {
        self.board
            .pieces()
            .filter(|&(sq, p)| self.is_critical_of(p, color) && self.is_attacked(sq))
            .map(|(sq, _)| sq)
            .collect()
    }

    fn is_critical_of(&self, piece: Piece, color: Color) -> bool {
        piece.color == color && self.registry.is_critical(piece.id)
    }

    /// Plays `from -> to` speculatively. The move is taken back when the
    /// returned probe is dropped.
    ///
    /// The move is not checked for legality; it should be pseudolegal.
    ///
    /// # Panics
    ///
    /// Panics if either square is off the board.
    pub fn probe(&mut self, from: Square, to: Square) -> Probe<'_> {
        let promotes = self.make_move(from, to);
        Probe {
            game: self,
            promotes,
        }
    }

    /// Computes every legal move of `color` on the current board.
    ///
    /// Each pseudolegal move is probed and kept only if it leaves no critical
    /// piece of `color` attacked. The board is unchanged afterwards.
    pub fn compute_legal_moves(&mut self, color: Color) -> MoveTable {
        let mut table = MoveTable::EMPTY;
        let board = self.board;

        for (from, piece) in board.pieces().filter(|(_, p)| p.color == color) {
            for to in Square::all() {
                if !self.registry.rule(piece.id).is_pseudolegal(from, to, &board) {
                    continue;
                }
                let probe = self.probe(from, to);
                if !probe.in_check(color) {
                    table.insert(from, to);
                }
            }
        }

        table
    }

    /// Requests the move `from -> to` for the side to move.
    ///
    /// Illegal requests, and any request while the game is over or waiting
    /// for a promotion choice, are rejected without touching the board.
    pub fn attempt_move(&mut self, from: Square, to: Square) -> MoveOutcome {
        if self.phase != GamePhase::InProgress || !self.legal_moves.contains(from, to) {
            tracing::debug!(%from, %to, phase = ?self.phase, "move rejected");
            return MoveOutcome::Rejected;
        }

        let promotes = self.make_move(from, to);
        self.previous = self.snapshot.take();
        tracing::debug!(%from, %to, promotes, "move played");

        if promotes {
            self.phase = GamePhase::AwaitingPromotion;
            self.pending_promotion = Some(to);
            self.legal_moves = MoveTable::EMPTY;
            self.attacked_criticals = Bitboard::EMPTY;
            return MoveOutcome::PromotionPending;
        }

        self.finalize();
        MoveOutcome::Played
    }

    /// Same as [`Game::attempt_move`] for a [`Move`].
    pub fn attempt(&mut self, m: Move) -> MoveOutcome {
        self.attempt_move(m.from, m.to)
    }

    /// Identities the pending promotion may choose from.
    ///
    /// Empty unless a promotion is pending.
    pub fn promotion_choices(&self) -> Vec<PieceId> {
        match self.pending_promotion {
            Some(square) => self.registry.promotion_choices(self.board.get(square).id),
            None => Vec::new(),
        }
    }

    /// Replaces the promoting piece on `square` with identity `id`, keeping
    /// its team, then hands the turn over.
    pub fn choose_promotion(&mut self, square: Square, id: PieceId) -> Result<(), GameError> {
        let pending = match (self.phase, self.pending_promotion) {
            (GamePhase::AwaitingPromotion, Some(pending)) => pending,
            _ => return Err(GameError::NotAwaitingPromotion),
        };
        if square != pending {
            return Err(GameError::WrongPromotionSquare {
                expected: pending,
                got: square,
            });
        }
        if !self.promotion_choices().contains(&id) {
            return Err(GameError::InvalidPromotion(id));
        }

        let promoted = self.board.get(square).with_identity(id);
        self.board.set(square, promoted);
        self.pending_promotion = None;
        tracing::debug!(%square, %id, "promotion chosen");

        self.finalize();
        Ok(())
    }

    /// Restores the board as it was before the last accepted move.
    ///
    /// Only one move can be taken back; a move waiting for its promotion
    /// choice is taken back as a whole.
    pub fn take_back(&mut self) -> Result<(), GameError> {
        let previous = self.previous.take().ok_or(GameError::NothingToTakeBack)?;
        self.board = previous;
        self.side_to_move = self.side_to_move.opposite();
        self.pending_promotion = None;
        tracing::debug!(side_to_move = %self.side_to_move, "move taken back");

        self.finalize();
        Ok(())
    }

    /// Resets the game to its starting layout.
    pub fn restart(&mut self) {
        self.board = self.initial;
        self.side_to_move = self.first_to_move;
        self.snapshot = None;
        self.previous = None;
        self.pending_promotion = None;
        tracing::info!(first_to_move = %self.first_to_move, "game restarted");

        self.finalize();
    }

    /// Recomputes legal moves and attacked criticals for the side to move
    /// and classifies the phase.
    fn finalize(&mut self) {
        let color = self.side_to_move;
        self.legal_moves = self.compute_legal_moves(color);
        self.attacked_criticals = self.attacked_criticals_of(color);

        self.phase = if !self.legal_moves.is_empty() {
            GamePhase::InProgress
        } else if self.attacked_criticals.is_empty() {
            GamePhase::Stalemate
        } else {
            GamePhase::Checkmate
        };

        tracing::trace!(
            side_to_move = %color,
            legal_moves = self.legal_moves.count(),
            checks = self.attacked_criticals.count(),
            "position classified"
        );
        if self.phase.is_over() {
            tracing::info!(phase = ?self.phase, side_to_move = %color, "game over");
        }
    }

    /// Plays a move on the board, keeping the previous board in the snapshot
    /// slot. Returns true if the move promotes.
    fn make_move(&mut self, from: Square, to: Square) -> bool {
        assert!(
            self.snapshot.is_none(),
            "make_move called while an earlier move is still unresolved"
        );
        self.snapshot = Some(self.board);

        self.board &= !Piece::SPECIAL_TRANSIENT;
        let mover = self.board.get(from);
        let promotes = self
            .registry
            .rule(mover.id)
            .apply(from, to, &mut self.board);

        self.side_to_move = self.side_to_move.opposite();
        promotes
    }

    /// Restores the board saved by the matching [`Game::make_move`].
    fn undo_move(&mut self) {
        match self.snapshot.take() {
            Some(board) => {
                self.board = board;
                self.side_to_move = self.side_to_move.opposite();
            }
            None => panic!("undo_move called without a matching make_move"),
        }
    }
}

/// A speculative move in progress.
///
/// While a probe lives the game can only be read, and dropping it undoes the
/// move, so every make is paired with exactly one undo.
pub struct Probe<'g> {
    game: &'g mut Game,
    promotes: bool,
}

impl Probe<'_> {
    /// Returns true if the probed move would require a promotion choice.
    pub fn promotes(&self) -> bool {
        self.promotes
    }

    /// Takes the move back. Equivalent to dropping the probe.
    pub fn undo(self) {}
}

impl Deref for Probe<'_> {
    type Target = Game;

    fn deref(&self) -> &Game {
        self.game
    }
}

impl Drop for Probe<'_> {
    fn drop(&mut self) {
        self.game.undo_move();
    }
}
