//! The interactive command loop.

use crate::command::{Command, HELP};
use crate::config::DisplayConfig;
use crate::render::{render_board, render_status};
use chess_rules::{GameError, GameState, MoveOutcome};
use std::io::{BufRead, Write};
use tracing::{debug, warn};

/// Whether the loop keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A game plus the display settings used to show it.
pub struct Session {
    game: GameState,
    display: DisplayConfig,
}

impl Session {
    pub fn new(game: GameState, display: DisplayConfig) -> Self {
        Session { game, display }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Plays a move token given on the command line.
    pub fn play(&mut self, token: &str) -> Result<MoveOutcome, GameError> {
        match Command::parse_move(token) {
            Command::Move { from, to } => self.game.make_move(from, to),
            _ => self.game.make_move_san(token),
        }
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> anyhow::Result<()> {
        write!(out, "{}", render_board(self.game.board(), &self.display))?;
        writeln!(out, "{}", render_status(&self.game))?;

        for line in input.lines() {
            let line = line?;
            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(err) => {
                    writeln!(out, "error: {}", err)?;
                    continue;
                }
            };
            debug!(?command, "command");
            if self.execute(command, &mut out)? == Flow::Quit {
                break;
            }
        }

        out.flush()?;
        Ok(())
    }

    /// Runs a single command, writing its output.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> anyhow::Result<Flow> {
        match command {
            Command::Move { from, to } => {
                let result = self.game.make_move(from, to);
                self.report_move(result, out)?;
            }
            Command::San(san) => {
                let result = self.game.make_move_san(&san);
                self.report_move(result, out)?;
            }
            Command::Undo => match self.game.undo_move() {
                Ok(mov) => {
                    writeln!(out, "took back {}", mov)?;
                    self.show(out)?;
                }
                Err(err) => writeln!(out, "error: {}", err)?,
            },
            Command::Reset => {
                self.game.reset();
                self.show(out)?;
            }
            Command::Moves(pos) => {
                let targets: Vec<String> = self
                    .game
                    .legal_moves(pos)
                    .iter()
                    .map(|to| to.to_string())
                    .collect();
                if targets.is_empty() {
                    writeln!(out, "no legal moves from {}", pos)?;
                } else {
                    writeln!(out, "{}: {}", pos, targets.join(" "))?;
                }
            }
            Command::History { json: true } => {
                let moves: Vec<_> = self.game.moves().collect();
                writeln!(out, "{}", serde_json::to_string_pretty(&moves)?)?;
            }
            Command::History { json: false } => {
                for (ply, mov) in self.game.moves().enumerate() {
                    if ply % 2 == 0 {
                        write!(out, "{}. {}", ply / 2 + 1, mov)?;
                    } else {
                        writeln!(out, " {}", mov)?;
                    }
                }
                if self.game.move_count() % 2 == 1 {
                    writeln!(out)?;
                }
            }
            Command::Fen => writeln!(out, "{}", self.game.to_fen())?,
            Command::Load(fen) => match GameState::from_fen(&fen) {
                Ok(game) => {
                    self.game = game;
                    self.show(out)?;
                }
                Err(err) => writeln!(out, "error: {}", err)?,
            },
            Command::Board => self.show(out)?,
            Command::Status => writeln!(out, "{}", render_status(&self.game))?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(text) if text.is_empty() => {}
            Command::Unknown(text) => writeln!(out, "unknown command: {} (try 'help')", text)?,
        }
        Ok(Flow::Continue)
    }

    fn report_move<W: Write>(
        &self,
        result: Result<MoveOutcome, GameError>,
        out: &mut W,
    ) -> anyhow::Result<()> {
        match result {
            Ok(outcome) => {
                match outcome.captured {
                    Some(piece) => writeln!(out, "{} (takes {})", outcome.mov, piece)?,
                    None => writeln!(out, "{}", outcome.mov)?,
                }
                self.show(out)?;
            }
            Err(err) => {
                warn!(%err, "move not played");
                writeln!(out, "error: {}", err)?;
            }
        }
        Ok(())
    }

    fn show<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        write!(out, "{}", render_board(self.game.board(), &self.display))?;
        writeln!(out, "{}", render_status(&self.game))?;
        Ok(())
    }
}
