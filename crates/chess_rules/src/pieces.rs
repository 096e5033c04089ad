//! Per-kind movement rules.
//!
//! Two predicates make up the piece model:
//! - [`is_valid_move`]: does the geometry of `start -> end` fit the piece,
//!   ignoring anything standing in between and ignoring king safety.
//! - [`is_valid_path`]: is the line between the two squares clear. For the
//!   king this is a look-ahead instead: would the king be attacked on `end`.
//!
//! Both dispatch on [`PieceKind`] with a single `match`.

use crate::board::Board;
use crate::check::in_check;
use crate::types::*;

/// True when both squares hold pieces of the same side.
pub fn is_alliance_overlap(board: &Board, start: Square, end: Square) -> bool {
    match (board.piece_at(start), board.piece_at(end)) {
        (Some(a), Some(b)) => a.side == b.side,
        _ => false,
    }
}

pub fn is_valid_move(board: &Board, start: Square, end: Square) -> bool {
    let Some(piece) = board.piece_at(start) else {
        return false;
    };
    if start == end || is_alliance_overlap(board, start, end) {
        return false;
    }

    let (dr, dc) = start.delta(end);
    let (ar, ac) = (dr.unsigned_abs(), dc.unsigned_abs());

    match piece.kind {
        PieceKind::Rook => is_straight(ar, ac),
        PieceKind::Bishop => is_diagonal(ar, ac),
        PieceKind::Queen => is_straight(ar, ac) || is_diagonal(ar, ac),
        PieceKind::Knight => (ar, ac) == (2, 1) || (ar, ac) == (1, 2),
        PieceKind::King => ar <= 1 && ac <= 1,
        PieceKind::Pawn => pawn_geometry(board, piece, end, dr, ac),
    }
}

pub fn is_valid_path(board: &Board, start: Square, end: Square) -> bool {
    let Some(piece) = board.piece_at(start) else {
        return false;
    };

    match piece.kind {
        PieceKind::Rook | PieceKind::Bishop | PieceKind::Queen => is_line_clear(board, start, end),
        PieceKind::Knight => true,
        PieceKind::King => king_lands_safely(board, start, end),
        PieceKind::Pawn => pawn_path(board, piece, start, end),
    }
}

fn is_straight(ar: u8, ac: u8) -> bool {
    (ar == 0) != (ac == 0)
}

fn is_diagonal(ar: u8, ac: u8) -> bool {
    ar == ac && ar != 0
}

fn pawn_geometry(board: &Board, pawn: Piece, end: Square, dr: i8, ac: u8) -> bool {
    let steps = dr * pawn.side.forward();
    match ac {
        0 => steps == 1 || (steps == 2 && !pawn.has_moved),
        1 => steps == 1 && board.piece_at(end).is_some_and(|pc| pc.side != pawn.side),
        _ => false,
    }
}

fn pawn_path(board: &Board, pawn: Piece, start: Square, end: Square) -> bool {
    let (dr, dc) = start.delta(end);
    if dc != 0 {
        // Diagonal: only a capture may land there.
        return board.piece_at(end).is_some_and(|pc| pc.side != pawn.side);
    }
    if board.is_occupied(end) {
        return false;
    }
    if dr.abs() == 2 {
        return start
            .offset(pawn.side.forward(), 0)
            .is_some_and(|mid| !board.is_occupied(mid));
    }
    true
}

/// Squares strictly between `start` and `end` along a rank, file or diagonal.
/// Empty when the two squares are not on a common line or are adjacent.
pub fn squares_between(start: Square, end: Square) -> Vec<Square> {
    let (dr, dc) = start.delta(end);
    let (ar, ac) = (dr.unsigned_abs(), dc.unsigned_abs());
    if !(is_straight(ar, ac) || is_diagonal(ar, ac)) {
        return Vec::new();
    }
    let (sr, sc) = (dr.signum(), dc.signum());
    (1..ar.max(ac) as i8)
        .filter_map(|i| start.offset(i * sr, i * sc))
        .collect()
}

fn is_line_clear(board: &Board, start: Square, end: Square) -> bool {
    squares_between(start, end)
        .into_iter()
        .all(|sq| !board.is_occupied(sq))
}

/// Lifts the king off `start`, sets it on `end` and asks whether it is attacked there.
/// Works on a scratch copy, so the caller's board is never touched.
fn king_lands_safely(board: &Board, start: Square, end: Square) -> bool {
    let mut scratch = board.clone();
    let Some(king) = scratch.take(start) else {
        return false;
    };
    scratch.place(end, king);
    in_check(&scratch, end).is_none()
}

#[cfg(test)]
#[path = "pieces_tests.rs"]
mod pieces_tests;
