//! Engine configuration
//!
//! Loaded from TOML, every field optional:
//!
//! ```toml
//! default_promotion = "queen"
//!
//! [piece_values]
//! pawn = 1
//! knight = 3
//! bishop = 3
//! rook = 5
//! queen = 8
//! king = 0
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::types::{PieceKind, PromotionChoice};

/// Largest capture value accepted for a single piece.
pub const MAX_PIECE_VALUE: u32 = 100;

/// Points credited to a player for capturing each kind of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieceValues {
    pub pawn: u32,
    pub knight: u32,
    pub bishop: u32,
    pub rook: u32,
    pub queen: u32,
    pub king: u32,
}

impl Default for PieceValues {
    fn default() -> Self {
        Self {
            pawn: 1,
            knight: 3,
            bishop: 3,
            rook: 5,
            queen: 8,
            king: 0,
        }
    }
}

impl PieceValues {
    pub fn value(&self, kind: PieceKind) -> u32 {
        match kind {
            PieceKind::Pawn => self.pawn,
            PieceKind::Knight => self.knight,
            PieceKind::Bishop => self.bishop,
            PieceKind::Rook => self.rook,
            PieceKind::Queen => self.queen,
            PieceKind::King => self.king,
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Kind a pawn becomes when the caller does not choose one
    pub default_promotion: PromotionChoice,
    /// Capture scoring
    pub piece_values: PieceValues,
}

impl RulesConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: RulesConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in PieceKind::ALL {
            let value = self.piece_values.value(kind);
            if value > MAX_PIECE_VALUE {
                return Err(ConfigError::PieceValue {
                    kind: format!("{kind:?}").to_lowercase(),
                    value,
                    max: MAX_PIECE_VALUE,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
