//! Random self-play: both sides pick uniformly among their candidate moves

use std::fmt;

use chess_rules::{Game, MoveOutcome, RulesConfig, Side, Square, legal_destinations};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, warn};

/// Configuration for a self-play run
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Seed for the first game; game `n` uses `seed + n`
    pub seed: u64,
    /// Plies per game before giving up without a result
    pub max_plies: u32,
    pub rules: RulesConfig,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            num_games: 1,
            seed: 0,
            max_plies: 200,
            rules: RulesConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finish {
    Checkmate { winner: Side },
    /// Side to move had no legal move and was not in check.
    Stalemate { side: Side },
    PlyLimit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub seed: u64,
    pub plies: u32,
    pub finish: Finish,
    pub white_score: u32,
    pub black_score: u32,
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.finish {
            Finish::Checkmate { winner } => write!(f, "{winner} mates")?,
            Finish::Stalemate { side } => write!(f, "stalemate, {side} to move")?,
            Finish::PlyLimit => write!(f, "no result")?,
        }
        write!(
            f,
            " after {} plies (seed {}, score {}-{})",
            self.plies, self.seed, self.white_score, self.black_score
        )
    }
}

pub fn run_selfplay(config: &SelfPlayConfig) -> Vec<GameSummary> {
    (0..config.num_games)
        .map(|n| {
            let seed = config.seed.wrapping_add(n as u64);
            let summary = play_game(seed, config.max_plies, config.rules.clone());
            info!(game = n + 1, %summary, "game finished");
            summary
        })
        .collect()
}

/// Plays one game with a seeded generator. Pawns reaching the last row take
/// the configured default promotion.
pub fn play_game(seed: u64, max_plies: u32, rules: RulesConfig) -> GameSummary {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::with_config(rules);
    let mut plies = 0;

    let finish = loop {
        if let Some(winner) = game.winner() {
            break Finish::Checkmate { winner };
        }
        if plies >= max_plies {
            break Finish::PlyLimit;
        }

        let side = game.side_to_move();
        let mut candidates = candidate_moves(&game);
        candidates.shuffle(&mut rng);

        let committed = candidates.into_iter().find_map(|(start, end)| {
            match game.play(start, end) {
                Ok(MoveOutcome::SelfCheck) | Err(_) => None,
                Ok(outcome) => Some(outcome),
            }
        });

        match committed {
            None => break Finish::Stalemate { side },
            Some(MoveOutcome::PromotionPending { square }) => {
                debug!(%square, "promoting with default choice");
                if let Err(e) = game.promote_default() {
                    warn!(error = %e, "promotion failed, abandoning game");
                    break Finish::PlyLimit;
                }
            }
            Some(_) => {}
        }
        plies += 1;
    };

    GameSummary {
        seed,
        plies,
        finish,
        white_score: game.player(Side::White).score,
        black_score: game.player(Side::Black).score,
    }
}

fn candidate_moves(game: &Game) -> Vec<(Square, Square)> {
    let side = game.side_to_move();
    game.board()
        .pieces()
        .filter(|(_, pc)| pc.side == side)
        .flat_map(|(from, _)| {
            legal_destinations(game.board(), from)
                .into_iter()
                .map(move |to| (from, to))
        })
        .collect()
}

#[cfg(test)]
#[path = "selfplay_tests.rs"]
mod selfplay_tests;
