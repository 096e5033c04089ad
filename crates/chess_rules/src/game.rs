//! Game session: turn order, move transactions and promotion

use serde::Serialize;
use tracing::{debug, error, info};

use crate::board::{Board, Cell};
use crate::check::{checkmate, find_king, in_check};
use crate::config::RulesConfig;
use crate::error::RulesError;
use crate::player::Player;
use crate::types::*;
use crate::validator::{attempt_move, legal_destinations};

/// Where the session is in its select / move / promote cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum GameState {
    AwaitingFirstSelection,
    AwaitingSecondSelection { start: Square },
    /// A pawn reached its last row; nothing else may happen until it is promoted.
    AwaitingPromotion { square: Square },
    GameOver { winner: Side },
}

/// Result of a move that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Committed; `check` names the side now in check, if any.
    Moved { check: Option<Side> },
    /// Committed, waiting for [`Game::promote`].
    PromotionPending { square: Square },
    /// Committed and the opponent has no answer.
    Checkmate { winner: Side },
    /// The move exposed the mover's own king. It was taken back and the turn kept.
    SelfCheck,
}

/// What a single cell selection did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// First selection stored; `destinations` are the squares the piece may move to.
    Selected { start: Square, destinations: Vec<Square> },
    /// The same cell was selected twice.
    Cleared,
    /// Second selection formed a move.
    Moved(MoveOutcome),
    Rejected(RulesError),
}

/// Everything needed to take the last committed move back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub start: Square,
    pub end: Square,
    /// The mover as it stood on `start`, before `has_moved` or promotion changed it.
    pub moved: Piece,
    pub captured: Option<Piece>,
    /// Points credited to the mover for the capture.
    pub points: u32,
    prev_in_check: Option<Side>,
}

/// Read-only view handed to presentation code.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub board: Board,
    pub players: [Player; 2],
    pub side_to_move: Side,
    pub in_check: Option<Side>,
    pub state: GameState,
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    players: [Player; 2],
    config: RulesConfig,
    state: GameState,
    in_check: Option<Side>,
    last_move: Option<MoveRecord>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_config(RulesConfig::default())
    }

    pub fn with_config(config: RulesConfig) -> Self {
        Self {
            board: Board::standard(),
            players: [Player::new(Side::White, true), Player::new(Side::Black, false)],
            config,
            state: GameState::AwaitingFirstSelection,
            in_check: None,
            last_move: None,
        }
    }

    /// Starts a session from an arbitrary position. Both kings must be present
    /// and the side that just moved may not be left in check.
    pub fn from_board(
        board: Board,
        side_to_move: Side,
        config: RulesConfig,
    ) -> Result<Self, RulesError> {
        find_king(&board, Side::White)?;
        find_king(&board, Side::Black)?;
        let idle = side_to_move.other();
        if in_check(&board, find_king(&board, idle)?).is_some() {
            return Err(RulesError::IllegalPosition(idle));
        }

        let mut game = Self {
            board,
            players: [
                Player::new(Side::White, side_to_move == Side::White),
                Player::new(Side::Black, side_to_move == Side::Black),
            ],
            config,
            state: GameState::AwaitingFirstSelection,
            in_check: None,
            last_move: None,
        };
        game.evaluate_threat(side_to_move.other());
        Ok(game)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, row: i32, col: i32) -> Result<Cell, RulesError> {
        self.board.get_cell(row, col)
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.idx()]
    }

    pub fn side_to_move(&self) -> Side {
        if self.players[Side::White.idx()].is_turn_active {
            Side::White
        } else {
            Side::Black
        }
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.last_move.as_ref()
    }

    pub fn winner(&self) -> Option<Side> {
        match self.state {
            GameState::GameOver { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn is_checkmate(&self) -> bool {
        matches!(self.state, GameState::GameOver { .. })
    }

    /// Side whose king is attacked on the current board, White checked first.
    pub fn side_in_check(&self) -> Option<Side> {
        [Side::White, Side::Black]
            .into_iter()
            .find(|&side| match find_king(&self.board, side) {
                Ok(king_sq) => in_check(&self.board, king_sq).is_some(),
                Err(e) => {
                    error!(error = %e, "king lookup failed");
                    false
                }
            })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            players: self.players,
            side_to_move: self.side_to_move(),
            in_check: self.in_check,
            state: self.state,
        }
    }

    /// Feeds one cell selection from the input layer. Two selections on
    /// different cells form a move; the same cell twice clears the selection.
    pub fn select(&mut self, square: Square) -> SelectionEvent {
        match self.state {
            GameState::GameOver { winner } => SelectionEvent::Rejected(RulesError::GameOver(winner)),
            GameState::AwaitingPromotion { square: pending } => {
                SelectionEvent::Rejected(RulesError::PromotionPending(pending))
            }
            GameState::AwaitingFirstSelection => {
                let side = self.side_to_move();
                match self.board.piece_at(square) {
                    None => SelectionEvent::Rejected(RulesError::EmptyStart(square)),
                    Some(pc) if pc.side != side => {
                        SelectionEvent::Rejected(RulesError::NotYourTurn(side))
                    }
                    Some(_) => {
                        debug!(%square, "start selected");
                        self.state = GameState::AwaitingSecondSelection { start: square };
                        SelectionEvent::Selected {
                            start: square,
                            destinations: legal_destinations(&self.board, square),
                        }
                    }
                }
            }
            GameState::AwaitingSecondSelection { start } => {
                self.state = GameState::AwaitingFirstSelection;
                if start == square {
                    debug!(%square, "selection cleared");
                    return SelectionEvent::Cleared;
                }
                match self.play(start, square) {
                    Ok(outcome) => SelectionEvent::Moved(outcome),
                    Err(e) => SelectionEvent::Rejected(e),
                }
            }
        }
    }

    /// Boolean form of [`play`](Self::play): true when the move was committed.
    pub fn attempt_move(&mut self, start: Square, end: Square) -> bool {
        matches!(self.play(start, end), Ok(outcome) if outcome != MoveOutcome::SelfCheck)
    }

    /// Runs one move transaction: validate, apply, check the mover's own king,
    /// then commit (flip the turn, judge the opponent) or take it back.
    pub fn play(&mut self, start: Square, end: Square) -> Result<MoveOutcome, RulesError> {
        match self.state {
            GameState::GameOver { winner } => return Err(RulesError::GameOver(winner)),
            GameState::AwaitingPromotion { square } => {
                return Err(RulesError::PromotionPending(square));
            }
            _ => self.state = GameState::AwaitingFirstSelection,
        }

        let side = self.side_to_move();
        let piece = self.board.piece_at(start).ok_or(RulesError::EmptyStart(start))?;
        if piece.side != side {
            return Err(RulesError::NotYourTurn(side));
        }
        if !attempt_move(&self.board, start, end)
            || self.board.piece_at(end).is_some_and(|pc| pc.kind == PieceKind::King)
        {
            debug!(%start, %end, "illegal move");
            return Err(RulesError::IllegalMove { start, end });
        }

        let record = self.apply(start, end)?;

        let exposed = match find_king(&self.board, side) {
            Ok(king_sq) => in_check(&self.board, king_sq).is_some(),
            Err(e) => {
                error!(error = %e, "mover has no king");
                self.undo(&record);
                return Err(e);
            }
        };
        if exposed {
            debug!(%start, %end, %side, "move exposes own king, reverting");
            self.undo(&record);
            return Ok(MoveOutcome::SelfCheck);
        }

        self.last_move = Some(record);
        self.flip_turn();

        if piece.kind == PieceKind::Pawn && end.row == side.promotion_row() {
            info!(square = %end, %side, "pawn awaiting promotion");
            self.state = GameState::AwaitingPromotion { square: end };
            return Ok(MoveOutcome::PromotionPending { square: end });
        }

        Ok(self.evaluate_threat(side))
    }

    /// Replaces the pawn waiting on `square` with `choice`, keeping its side.
    pub fn promote(
        &mut self,
        square: Square,
        choice: PromotionChoice,
    ) -> Result<MoveOutcome, RulesError> {
        if self.state != (GameState::AwaitingPromotion { square }) {
            return Err(RulesError::NoPromotionPending);
        }
        let pawn = self
            .board
            .piece_at(square)
            .ok_or(RulesError::NoPromotionPending)?;

        self.board.place(
            square,
            Piece {
                side: pawn.side,
                kind: choice.kind(),
                has_moved: true,
            },
        );
        info!(%square, side = %pawn.side, kind = ?choice, "pawn promoted");
        self.state = GameState::AwaitingFirstSelection;
        Ok(self.evaluate_threat(pawn.side))
    }

    /// Promotes the pending pawn to the configured default kind.
    pub fn promote_default(&mut self) -> Result<MoveOutcome, RulesError> {
        match self.state {
            GameState::AwaitingPromotion { square } => {
                self.promote(square, self.config.default_promotion)
            }
            _ => Err(RulesError::NoPromotionPending),
        }
    }

    /// Takes back the last committed move: occupancy, pawn state, promotion,
    /// scores, turn and check status all return to their pre-move values.
    pub fn revert_last_move(&mut self) -> Result<(), RulesError> {
        let record = self.last_move.take().ok_or(RulesError::NothingToRevert)?;
        self.undo(&record);
        self.flip_turn();
        self.in_check = record.prev_in_check;
        self.state = GameState::AwaitingFirstSelection;
        debug!(start = %record.start, end = %record.end, "move reverted");
        Ok(())
    }

    fn apply(&mut self, start: Square, end: Square) -> Result<MoveRecord, RulesError> {
        let mut mover = self.board.take(start).ok_or(RulesError::EmptyStart(start))?;
        let captured = self.board.take(end);
        let moved = mover;
        if mover.kind == PieceKind::Pawn {
            mover.has_moved = true;
        }
        self.board.place(end, mover);

        let points = match captured {
            Some(victim) => {
                self.players[mover.side.idx()].record_capture(victim.kind, &self.config.piece_values)
            }
            None => 0,
        };

        Ok(MoveRecord {
            start,
            end,
            moved,
            captured,
            points,
            prev_in_check: self.in_check,
        })
    }

    fn undo(&mut self, record: &MoveRecord) {
        self.board.set(record.end, record.captured);
        self.board.place(record.start, record.moved);
        self.players[record.moved.side.idx()].revoke_capture(record.points);
    }

    fn flip_turn(&mut self) {
        for p in &mut self.players {
            p.is_turn_active = !p.is_turn_active;
        }
    }

    /// After `mover` committed a move: is the opponent in check, or mated.
    fn evaluate_threat(&mut self, mover: Side) -> MoveOutcome {
        let defender = mover.other();
        let attacked = match find_king(&self.board, defender) {
            Ok(king_sq) => in_check(&self.board, king_sq).is_some(),
            Err(e) => {
                error!(error = %e, "defender has no king");
                false
            }
        };
        if !attacked {
            self.in_check = None;
            return MoveOutcome::Moved { check: None };
        }

        self.in_check = Some(defender);
        match checkmate(&self.board, defender) {
            Ok(true) => {
                info!(winner = %mover, "checkmate");
                self.state = GameState::GameOver { winner: mover };
                MoveOutcome::Checkmate { winner: mover }
            }
            Ok(false) => {
                info!(side = %defender, "check");
                MoveOutcome::Moved {
                    check: Some(defender),
                }
            }
            Err(e) => {
                error!(error = %e, "checkmate analysis failed");
                MoveOutcome::Moved {
                    check: Some(defender),
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
