//! Error types for the rules engine

use thiserror::Error;

use crate::types::{Side, Square};

/// Every rejection the engine can report.
///
/// None of these are fatal to a session: the board is left exactly as it was
/// before the failing call. `MissingKing` is the exception in spirit; it means
/// the position was built without a king, which normal play cannot reach.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error("no piece on start square {0}")]
    EmptyStart(Square),

    #[error("it is {0}'s turn")]
    NotYourTurn(Side),

    #[error("illegal move {start} -> {end}")]
    IllegalMove { start: Square, end: Square },

    #[error("no {0} king on the board")]
    MissingKing(Side),

    #[error("pawn on {0} is waiting for a promotion choice")]
    PromotionPending(Square),

    #[error("no promotion is pending")]
    NoPromotionPending,

    #[error("game is over, {0} won")]
    GameOver(Side),

    #[error("no move to revert")]
    NothingToRevert,

    #[error("square ({row},{col}) is off the board")]
    OutOfBounds { row: i32, col: i32 },

    #[error("{0} is in check but it is not their move")]
    IllegalPosition(Side),

    #[error("invalid piece placement: {0}")]
    InvalidPlacement(String),
}

/// Errors raised while loading a [`RulesConfig`](crate::RulesConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("piece value for {kind} is {value}, expected at most {max}")]
    PieceValue { kind: String, value: u32, max: u32 },
}
