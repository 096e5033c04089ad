//! Line protocol over a [`Game`]
//!
//! One command per input line, one reply line per command (the board
//! diagram is the only multi-line reply). Protocol problems are answered
//! on the wire; only I/O failures end the loop with an error.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chess_rules::{
    Game, GameState, MoveOutcome, PromotionChoice, RulesError, SelectionEvent, Side, Square,
    legal_destinations,
};
use tracing::{debug, warn};

/// What the loop should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Lines(Vec<String>),
    Quit,
}

impl Reply {
    fn line(text: impl Into<String>) -> Self {
        Reply::Lines(vec![text.into()])
    }
}

pub struct Session {
    game: Game,
}

impl Session {
    pub fn new(game: Game) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read command")?;
            match self.handle(&line) {
                Reply::Quit => break,
                Reply::Lines(lines) => {
                    for l in lines {
                        writeln!(out, "{l}").context("failed to write reply")?;
                    }
                    out.flush().context("failed to flush reply")?;
                }
            }
        }
        Ok(())
    }

    pub fn handle(&mut self, line: &str) -> Reply {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&cmd, args)) = parts.split_first() else {
            return Reply::Lines(Vec::new());
        };
        debug!(cmd, ?args, "command");

        match cmd {
            "select" => match self.square_arg(args) {
                Ok(sq) => Reply::line(selection_reply(self.game.select(sq))),
                Err(e) => Reply::line(e),
            },
            "move" => {
                let squares = if args.len() == 4 {
                    self.square_arg(&args[..2])
                        .and_then(|start| Ok((start, self.square_arg(&args[2..])?)))
                } else {
                    Err("error expected <r1> <c1> <r2> <c2>".to_string())
                };
                match squares {
                    Ok((start, end)) => Reply::line(play_reply(self.game.play(start, end))),
                    Err(e) => Reply::line(e),
                }
            }
            "promote" => {
                let result = match args.first().and_then(|a| a.chars().next()) {
                    Some(c) => match self.game.state() {
                        GameState::AwaitingPromotion { square } => {
                            self.game.promote(square, PromotionChoice::from_letter(c))
                        }
                        _ => Err(RulesError::NoPromotionPending),
                    },
                    None => self.game.promote_default(),
                };
                Reply::line(play_reply(result))
            }
            "undo" => match self.game.revert_last_move() {
                Ok(()) => Reply::line("ok"),
                Err(e) => Reply::line(format!("illegal {e}")),
            },
            "moves" => match self.square_arg(args) {
                Ok(sq) => {
                    let dests = legal_destinations(self.game.board(), sq);
                    Reply::line(format!("moves {sq}{}", join_squares(&dests)))
                }
                Err(e) => Reply::line(e),
            },
            "board" => Reply::Lines(self.game.board().to_string().lines().map(String::from).collect()),
            "board-json" => match serde_json::to_string(&self.game.snapshot()) {
                Ok(json) => Reply::line(json),
                Err(e) => {
                    warn!(error = %e, "snapshot serialization failed");
                    Reply::line(format!("error {e}"))
                }
            },
            "status" => Reply::line(self.status()),
            "quit" => Reply::Quit,
            other => Reply::line(format!("error unknown command '{other}'")),
        }
    }

    fn square_arg(&self, args: &[&str]) -> Result<Square, String> {
        let [row, col] = args else {
            return Err("error expected <row> <col>".to_string());
        };
        let row: i32 = row.parse().map_err(|_| format!("error bad row '{row}'"))?;
        let col: i32 = col.parse().map_err(|_| format!("error bad col '{col}'"))?;
        self.game
            .cell(row, col)
            .map(|cell| cell.square)
            .map_err(|e| format!("illegal {e}"))
    }

    fn status(&self) -> String {
        let white = self.game.player(Side::White).score;
        let black = self.game.player(Side::Black).score;
        let check = match self.game.side_in_check() {
            Some(side) => side.to_string(),
            None => "none".to_string(),
        };
        let state = match self.game.state() {
            GameState::AwaitingFirstSelection => "ready".to_string(),
            GameState::AwaitingSecondSelection { start } => format!("selected {start}"),
            GameState::AwaitingPromotion { square } => format!("promote {square}"),
            GameState::GameOver { winner } => format!("over {winner}"),
        };
        format!(
            "turn {} score {white} {black} check {check} state {state}",
            self.game.side_to_move()
        )
    }
}

fn join_squares(squares: &[Square]) -> String {
    squares.iter().map(|sq| format!(" {sq}")).collect()
}

fn outcome_reply(outcome: MoveOutcome) -> String {
    match outcome {
        MoveOutcome::Moved { check: None } => "ok".to_string(),
        MoveOutcome::Moved { check: Some(side) } => format!("check {side}"),
        MoveOutcome::PromotionPending { .. } => "promote?".to_string(),
        MoveOutcome::Checkmate { winner } => format!("checkmate {winner}"),
        MoveOutcome::SelfCheck => "illegal move exposes own king".to_string(),
    }
}

fn play_reply(result: Result<MoveOutcome, RulesError>) -> String {
    match result {
        Ok(outcome) => outcome_reply(outcome),
        Err(e) => format!("illegal {e}"),
    }
}

fn selection_reply(event: SelectionEvent) -> String {
    match event {
        SelectionEvent::Selected { start, destinations } => {
            format!("selected {start}{}", join_squares(&destinations))
        }
        SelectionEvent::Cleared => "cleared".to_string(),
        SelectionEvent::Moved(outcome) => outcome_reply(outcome),
        SelectionEvent::Rejected(e) => format!("illegal {e}"),
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
