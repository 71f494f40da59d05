//! Parsing of interactive commands.

use chess_core::{Position, PositionError};
use thiserror::Error;

/// Errors raised for malformed command lines.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error(transparent)]
    InvalidSquare(#[from] PositionError),
}

/// A line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move by squares, e.g. "e2e4".
    Move { from: Position, to: Position },
    /// Move in algebraic notation, e.g. "Nf3".
    San(String),
    Undo,
    Reset,
    /// List the legal destinations of the piece on a square.
    Moves(Position),
    /// Print the move history, optionally as JSON.
    History { json: bool },
    /// Print the current position as FEN.
    Fen,
    /// Replace the game with the position from a FEN record.
    Load(String),
    Board,
    Status,
    Help,
    Quit,
    /// Unknown command (echoed back to the user).
    Unknown(String),
}

impl Command {
    /// Parses a command line.
    ///
    /// A single word that is not a keyword is taken as a move.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "" => Ok(Command::Unknown(String::new())),
            "move" | "m" => {
                let token = parts.next().ok_or(CommandError::MissingArgument("move"))?;
                Ok(Self::parse_move(token))
            }
            "undo" | "u" => Ok(Command::Undo),
            "reset" | "new" => Ok(Command::Reset),
            "moves" => {
                let square = parts.next().ok_or(CommandError::MissingArgument("moves"))?;
                Ok(Command::Moves(Position::from_algebraic(square)?))
            }
            "history" => Ok(Command::History {
                json: parts.next() == Some("--json"),
            }),
            "fen" => Ok(Command::Fen),
            "load" => {
                let fen = parts.collect::<Vec<_>>().join(" ");
                if fen.is_empty() {
                    return Err(CommandError::MissingArgument("load"));
                }
                Ok(Command::Load(fen))
            }
            "board" | "b" => Ok(Command::Board),
            "status" => Ok(Command::Status),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            token if parts.next().is_none() => Ok(Self::parse_move(token)),
            _ => Ok(Command::Unknown(input.to_string())),
        }
    }

    /// Parses a move token: coordinates ("e2e4", "e2-e4") or SAN.
    pub fn parse_move(token: &str) -> Self {
        let coords: String = token.chars().filter(|&c| c != '-').collect();
        let lowercase = coords
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit());

        if lowercase && coords.len() == 4 {
            if let (Ok(from), Ok(to)) = (
                Position::from_algebraic(&coords[..2]),
                Position::from_algebraic(&coords[2..]),
            ) {
                return Command::Move { from, to };
            }
        }
        Command::San(token.to_string())
    }
}

/// Text printed by the `help` command.
pub const HELP: &str = "\
commands:
  e2e4 | Nf3 | O-O     play a move (coordinates or algebraic notation)
  move <move>          same as above
  moves <square>       list legal destinations of a piece
  undo                 take back the last move
  reset                start a new game
  history [--json]     list the moves played
  fen                  print the position as FEN
  load <fen>           start from a FEN position
  board                redraw the board
  status               show whose turn it is and the game status
  quit                 leave";
