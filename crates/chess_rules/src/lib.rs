//! Rules engine for standard chess
//!
//! Decides whether a proposed move is legal (piece geometry, obstruction and
//! king safety) and whether a side is in check or checkmate. A [`Game`] owns
//! the board and both players and runs each move as a transaction: validate,
//! apply, check the mover's own king, then commit or take it back.
//!
//! Rendering, input handling and prompts belong to the caller, which feeds
//! cell selections and promotion choices in and reacts to the outcomes.

pub mod board;
pub mod check;
pub mod config;
pub mod error;
pub mod game;
pub mod pieces;
pub mod player;
pub mod types;
pub mod validator;

pub use board::*;
pub use check::*;
pub use config::*;
pub use error::*;
pub use game::*;
pub use pieces::*;
pub use player::*;
pub use types::*;
pub use validator::*;
