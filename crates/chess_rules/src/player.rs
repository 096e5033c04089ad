use serde::{Deserialize, Serialize};

use crate::config::PieceValues;
use crate::types::{PieceKind, Side};

/// One side of a game: whose turn it is and how much material they have taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub side: Side,
    pub is_turn_active: bool,
    pub score: u32,
}

impl Player {
    pub fn new(side: Side, is_turn_active: bool) -> Self {
        Self {
            side,
            is_turn_active,
            score: 0,
        }
    }

    /// Credits a capture and returns the points added.
    pub fn record_capture(&mut self, kind: PieceKind, values: &PieceValues) -> u32 {
        let points = values.value(kind);
        self.score += points;
        points
    }

    /// Takes back points credited by [`record_capture`](Self::record_capture).
    pub fn revoke_capture(&mut self, points: u32) {
        self.score = self.score.saturating_sub(points);
    }
}
