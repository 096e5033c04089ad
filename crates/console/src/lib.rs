//! Console front end for the chess rules engine
//!
//! A stdin/stdout line protocol for interactive play and a seeded random
//! self-play driver.

pub mod selfplay;
pub mod session;

pub use selfplay::{Finish, GameSummary, SelfPlayConfig, play_game, run_selfplay};
pub use session::{Reply, Session};
