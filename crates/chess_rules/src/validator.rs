use crate::board::Board;
use crate::pieces::{is_valid_move, is_valid_path};
use crate::types::Square;

/// Structural legality of `start -> end`: a piece stands on `start`, its
/// geometry allows the move and nothing blocks it. For kings this already
/// includes "does not step into check"; every other piece's effect on its own
/// king is judged after the move is applied, see [`Game::play`](crate::Game::play).
///
/// Never changes the board.
pub fn attempt_move(board: &Board, start: Square, end: Square) -> bool {
    board.is_occupied(start) && is_valid_move(board, start, end) && is_valid_path(board, start, end)
}

/// Every square the piece on `start` may move to.
pub fn legal_destinations(board: &Board, start: Square) -> Vec<Square> {
    if !board.is_occupied(start) {
        return Vec::new();
    }
    Square::all()
        .filter(|&end| attempt_move(board, start, end))
        .collect()
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod validator_tests;
