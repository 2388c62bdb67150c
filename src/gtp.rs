//! Go Text Protocol (GTP) front-end.
//!
//! A line-oriented command loop so the engine can sit behind a GTP-speaking
//! interface such as Sabaki or GoGui. Responses follow GTP version 2:
//! `=` or `?`, an optional echoed command id, then the payload and a blank
//! line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version`
//! - `list_commands`, `known_command <cmd>`
//! - `quit`
//! - `boardsize <size>` - Start a fresh board of the given size
//! - `clear_board` - Reset the board to empty
//! - `play <color> <vertex|pass>` - Play a move
//! - `genmove <color>` - Let the AI choose and play a move
//! - `undo` - Take back the last placement
//! - `showboard` - Render the board
//! - `level <easy|medium|hard>` - Switch difficulty
//! - `captures <color>` - Stones captured by a colour

use std::io::{self, BufRead, Write};

use log::{debug, info};

use crate::board::{Color, format_vertex, parse_vertex};
use crate::constants::MAX_SIZE;
use crate::position::BoardState;
use crate::profile::Difficulty;
use crate::remote::AiService;

/// The list of known GTP commands.
const KNOWN_COMMANDS: &[&str] = &[
    "boardsize",
    "captures",
    "clear_board",
    "genmove",
    "known_command",
    "level",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "undo",
    "version",
];

/// GTP engine state.
pub struct GtpEngine {
    board: BoardState,
    ai: AiService,
}

impl GtpEngine {
    pub fn new(size: usize, ai: AiService) -> Self {
        Self {
            board: BoardState::new(size),
            ai,
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Run the command loop on stdin/stdout until `quit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        self.serve(stdin.lock(), io::stdout())
    }

    /// Run the command loop over arbitrary streams.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);
            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            debug!("gtp {command} {args:?} -> {success}");

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            write!(output, "{prefix}{id_str} {message}\n\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a GTP command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, env!("CARGO_PKG_NAME").to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "2".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(name) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "boardsize" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<usize>() {
                    Ok(size) if (1..=MAX_SIZE).contains(&size) => {
                        self.board = BoardState::new(size);
                        (true, String::new())
                    }
                    Ok(_) => (false, "unacceptable size".to_string()),
                    Err(_) => (false, "invalid size".to_string()),
                }
            }

            "clear_board" => {
                self.board.reset();
                (true, String::new())
            }

            "play" => {
                let [color, vertex, ..] = args else {
                    return (false, "missing arguments".to_string());
                };
                let color: Color = match color.parse() {
                    Ok(c) => c,
                    Err(e) => return (false, e.to_string()),
                };
                let vertex = match parse_vertex(vertex, self.board.size()) {
                    Ok(v) => v,
                    Err(e) => return (false, e.to_string()),
                };

                let mut next = self.board.clone();
                give_turn(&mut next, color);
                match vertex {
                    None => next.pass(),
                    Some(pt) => {
                        if let Err(e) = next.place_stone(pt) {
                            return (false, e.to_string());
                        }
                    }
                }
                self.board = next;
                (true, String::new())
            }

            "genmove" => {
                let Some(color) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let color: Color = match color.parse() {
                    Ok(c) => c,
                    Err(e) => return (false, e.to_string()),
                };
                give_turn(&mut self.board, color);

                let Some(mv) = self.ai.propose(&self.board) else {
                    self.board.pass();
                    return (true, "pass".to_string());
                };
                match self.board.place_stone(mv.point) {
                    Ok(_) => {
                        info!("genmove {color}: {:?} ({})", mv.point, mv.rationale);
                        (true, format_vertex(mv.point, self.board.size()))
                    }
                    Err(e) => (false, format!("engine error: {e}")),
                }
            }

            "undo" => {
                if self.board.undo() {
                    (true, String::new())
                } else {
                    (false, "cannot undo".to_string())
                }
            }

            "showboard" => (true, format!("\n{}", self.board)),

            "level" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match arg.parse::<Difficulty>() {
                    Ok(level) => {
                        self.ai.selector_mut().set_profile(level.profile());
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            "captures" => {
                let Some(color) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match color.parse::<Color>() {
                    Ok(c) => (true, self.board.captures().get(c).to_string()),
                    Err(e) => (false, e.to_string()),
                }
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

/// A move out of turn implies the other side passed, which also lifts ko.
fn give_turn(board: &mut BoardState, color: Color) {
    if board.to_move() != color {
        board.pass();
    }
}
