//! Check and checkmate analysis.
//!
//! Attacks are found by asking every opposing piece whether it could move onto
//! the king's square, using the same predicates the move validator uses. Two
//! kinds need special handling:
//! - pawns only attack diagonally, so their straight advance never counts;
//! - a king attacks every adjacent square, whether or not stepping there would
//!   be safe for it.
//!
//! A piece pinned to its own king cannot save it by interposing or capturing;
//! every answer to a check is tried on a scratch board before it counts.

use tracing::debug;

use crate::board::Board;
use crate::error::RulesError;
use crate::pieces::{is_valid_move, is_valid_path, squares_between};
use crate::types::*;

pub fn find_king(board: &Board, side: Side) -> Result<Square, RulesError> {
    board
        .pieces()
        .find(|(_, pc)| pc.side == side && pc.kind == PieceKind::King)
        .map(|(sq, _)| sq)
        .ok_or(RulesError::MissingKing(side))
}

/// Returns the first square (row-major) holding a piece that attacks the
/// king on `king_sq`, or `None` when the king is safe or `king_sq` is empty.
pub fn in_check(board: &Board, king_sq: Square) -> Option<Square> {
    let king = board.piece_at(king_sq)?;
    board
        .pieces()
        .filter(|(_, pc)| pc.side != king.side)
        .find(|&(from, pc)| attacks(board, from, pc, king_sq))
        .map(|(from, _)| from)
}

fn attacks(board: &Board, from: Square, attacker: Piece, target: Square) -> bool {
    match attacker.kind {
        PieceKind::Pawn => is_valid_move(board, from, target) && from.col != target.col,
        PieceKind::King => is_valid_move(board, from, target),
        _ => is_valid_move(board, from, target) && is_valid_path(board, from, target),
    }
}

/// Squares a defender can use to answer a check from `attacker`: the attacker's
/// own square plus, for line attacks, every square up to (not including) the king.
pub fn attack_line(attacker: Square, king_sq: Square) -> Vec<Square> {
    let mut line = vec![attacker];
    line.extend(squares_between(attacker, king_sq));
    line
}

/// Whether `side` is checkmated. Returns `Ok(false)` when the king is not in check.
pub fn checkmate(board: &Board, side: Side) -> Result<bool, RulesError> {
    let king_sq = find_king(board, side)?;
    let Some(attacker) = in_check(board, king_sq) else {
        return Ok(false);
    };

    // The king steps out of check.
    if let Some(escape) =
        Square::all().find(|&to| is_valid_move(board, king_sq, to) && is_valid_path(board, king_sq, to))
    {
        debug!(%side, %escape, "king can escape");
        return Ok(false);
    }

    // Another piece captures the attacker or interposes.
    let line = attack_line(attacker, king_sq);
    for (from, _) in board
        .pieces()
        .filter(|(_, pc)| pc.side == side && pc.kind != PieceKind::King)
    {
        for &to in &line {
            if is_valid_move(board, from, to)
                && is_valid_path(board, from, to)
                && resolves_check(board, from, to, king_sq)
            {
                debug!(%side, %from, %to, "check can be answered");
                return Ok(false);
            }
        }
    }

    Ok(true)
}

/// Plays `from -> to` on a scratch board and asks whether the king is then safe.
/// Filters out interpositions by pinned pieces and single answers to a double check.
fn resolves_check(board: &Board, from: Square, to: Square, king_sq: Square) -> bool {
    let mut scratch = board.clone();
    let Some(piece) = scratch.take(from) else {
        return false;
    };
    scratch.place(to, piece);
    in_check(&scratch, king_sq).is_none()
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod check_tests;
