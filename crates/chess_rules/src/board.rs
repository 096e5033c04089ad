use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RulesError;
use crate::types::*;

/// Read-only view of one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Cell {
    pub square: Square,
    pub piece: Option<Piece>,
}

impl Cell {
    pub fn is_occupied(&self) -> bool {
        self.piece.is_some()
    }
}

/// The 8x8 grid. Pure storage: legality lives in `pieces`, `validator` and `check`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    pub fn empty() -> Self {
        Board {
            cells: [[None; 8]; 8],
        }
    }

    /// Standard initial setup: Black on rows 0-1, White on rows 6-7.
    pub fn standard() -> Self {
        let mut b = Board::empty();

        for col in 0..8 {
            b.place(Square::new(1, col), Piece::new(Side::Black, PieceKind::Pawn));
            b.place(Square::new(6, col), Piece::new(Side::White, PieceKind::Pawn));
        }
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (col, &kind) in back.iter().enumerate() {
            b.place(Square::new(0, col as u8), Piece::new(Side::Black, kind));
            b.place(Square::new(7, col as u8), Piece::new(Side::White, kind));
        }
        b
    }

    /// Builds a board from the piece-placement field of a FEN string
    /// (`rnbqkbnr/pppppppp/8/...`). The first rank listed lands on row 0.
    /// Pawns standing anywhere but their home row count as having moved.
    pub fn from_placement(placement: &str) -> Result<Self, RulesError> {
        let field = placement.split_whitespace().next().unwrap_or("");
        let rows: Vec<&str> = field.split('/').collect();
        if rows.len() != 8 {
            return Err(RulesError::InvalidPlacement(format!(
                "expected 8 rows, found {}",
                rows.len()
            )));
        }

        let mut b = Board::empty();
        for (row, text) in rows.iter().enumerate() {
            let mut col: u8 = 0;
            for ch in text.chars() {
                if let Some(d) = ch.to_digit(10) {
                    col = (1..=8)
                        .contains(&d)
                        .then(|| col + d as u8)
                        .filter(|&c| c <= 8)
                        .ok_or_else(|| {
                            RulesError::InvalidPlacement(format!("bad run '{ch}' in row {row}"))
                        })?;
                } else {
                    let kind = PieceKind::from_letter(ch).ok_or_else(|| {
                        RulesError::InvalidPlacement(format!("unknown piece '{ch}'"))
                    })?;
                    let side = if ch.is_ascii_uppercase() {
                        Side::White
                    } else {
                        Side::Black
                    };
                    if col >= 8 {
                        return Err(RulesError::InvalidPlacement(format!(
                            "row {row} has more than 8 cells"
                        )));
                    }
                    let sq = Square::new(row as u8, col);
                    let mut piece = Piece::new(side, kind);
                    piece.has_moved = kind == PieceKind::Pawn && sq.row != side.pawn_row();
                    b.place(sq, piece);
                    col += 1;
                }
            }
            if col != 8 {
                return Err(RulesError::InvalidPlacement(format!(
                    "row {row} has {col} cells"
                )));
            }
        }
        Ok(b)
    }

    pub fn cell(&self, sq: Square) -> Cell {
        Cell {
            square: sq,
            piece: self.piece_at(sq),
        }
    }

    /// Bounds-checked lookup for coordinates coming from outside the engine.
    pub fn get_cell(&self, row: i32, col: i32) -> Result<Cell, RulesError> {
        let sq = i8::try_from(row)
            .ok()
            .zip(i8::try_from(col).ok())
            .and_then(|(r, c)| Square::try_new(r, c))
            .ok_or(RulesError::OutOfBounds { row, col })?;
        Ok(self.cell(sq))
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.row as usize][sq.col as usize]
    }

    pub fn is_occupied(&self, sq: Square) -> bool {
        self.piece_at(sq).is_some()
    }

    /// Puts `piece` on `sq`, overwriting whatever was there.
    pub fn place(&mut self, sq: Square, piece: Piece) {
        self.cells[sq.row as usize][sq.col as usize] = Some(piece);
    }

    /// Removes and returns the occupant of `sq`.
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.cells[sq.row as usize][sq.col as usize].take()
    }

    /// Restores `sq` to an optional previous occupant.
    pub fn set(&mut self, sq: Square, piece: Option<Piece>) {
        self.cells[sq.row as usize][sq.col as usize] = piece;
    }

    /// Occupied cells in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|pc| (sq, pc)))
    }

    pub fn count(&self, side: Side, kind: PieceKind) -> usize {
        self.pieces()
            .filter(|(_, pc)| pc.side == side && pc.kind == kind)
            .count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{row} ")?;
            for col in 0..8u8 {
                let c = self
                    .piece_at(Square::new(row, col))
                    .map(Piece::to_char)
                    .unwrap_or('.');
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "  01234567")
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
