//! goban-ai: a Go board with a heuristic opponent.
//!
//! ## Usage
//!
//! - `goban-ai` - Run an AI-vs-AI demo
//! - `goban-ai gtp` - Start a GTP server for GUI integration
//! - `goban-ai play` - Play against the AI in the terminal

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use log::info;

use goban_ai::board::{Color, format_vertex, parse_vertex};
use goban_ai::constants::{DEFAULT_SIZE, MAX_SIZE};
use goban_ai::game::{AiTurn, Game, GameError};
use goban_ai::gtp::GtpEngine;
use goban_ai::position::BoardState;
use goban_ai::profile::Difficulty;
use goban_ai::remote::AiService;
use goban_ai::selector::MoveSelector;

/// goban-ai: Go with a heuristic opponent
#[derive(Parser)]
#[command(name = "goban-ai")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    opts: EngineOpts,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct EngineOpts {
    /// Board size
    #[arg(long, global = true, default_value_t = DEFAULT_SIZE)]
    size: usize,

    /// AI difficulty: easy, medium or hard
    #[arg(long, global = true, default_value = "medium")]
    level: Difficulty,

    /// Seed for reproducible AI decisions
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Skip the artificial thinking time
    #[arg(long, global = true)]
    no_delay: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the GTP (Go Text Protocol) server for use with GUI applications
    Gtp,
    /// Play against the AI on the terminal
    Play {
        /// Colour the human plays
        #[arg(long, default_value = "black")]
        human: Color,
    },
    /// Let the AI play both sides
    Demo {
        /// Number of placements before the demo stops
        #[arg(long, default_value_t = 40)]
        moves: usize,
    },
}

impl EngineOpts {
    fn ai(&self) -> AiService {
        let profile = self.level.profile();
        let selector = match self.seed {
            Some(seed) => MoveSelector::with_seed(profile, seed),
            None => MoveSelector::new(profile),
        };
        let ai = AiService::new(selector);
        if self.no_delay { ai.without_delay() } else { ai }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let size = cli.opts.size;
    if !(1..=MAX_SIZE).contains(&size) {
        bail!("board size must be between 1 and {MAX_SIZE}, got {size}");
    }
    info!("board {size}x{size}, level {}", cli.opts.level);

    match cli.command {
        Some(Commands::Gtp) => {
            let mut engine = GtpEngine::new(size, cli.opts.ai());
            engine.run().context("GTP session failed")?;
        }
        Some(Commands::Play { human }) => run_play(Game::new(size, cli.opts.ai(), human))?,
        Some(Commands::Demo { moves }) => run_demo(size, cli.opts.ai(), moves),
        None => run_demo(size, cli.opts.ai(), 40),
    }
    Ok(())
}

fn run_demo(size: usize, mut ai: AiService, moves: usize) {
    println!("goban-ai demo: {size}x{size}, {} level\n", ai.selector().profile().name());

    let mut board = BoardState::new(size);
    while board.moves_played() < moves {
        let color = board.to_move();
        let Some(mv) = ai.propose(&board) else {
            println!("{color} has no legal move");
            break;
        };
        match board.place_stone(mv.point) {
            Ok(p) => println!(
                "{:>3}. {color} {} ({}, score {:.1}){}",
                board.moves_played(),
                format_vertex(mv.point, size),
                mv.rationale,
                mv.score,
                if p.captured.is_empty() {
                    String::new()
                } else {
                    format!(", captures {}", p.captured.len())
                }
            ),
            Err(e) => {
                println!("{color}: {e}");
                break;
            }
        }
    }
    println!("\n{board}");
}

fn run_play(mut game: Game) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let size = game.board().size();

    println!("You are {}. Enter a vertex (e.g. D4), pass, undo, hint, or quit.", game.human());
    println!("{}", game.board());

    let mut lines = stdin.lock().lines();
    while !game.is_over() {
        if !game.is_human_turn() {
            match game.play_ai()? {
                AiTurn::Played { mv, placement } => {
                    println!(
                        "AI plays {} ({}), captures {}",
                        format_vertex(mv.point, size),
                        mv.rationale,
                        placement.captured.len()
                    );
                    println!("{}", game.board());
                }
                AiTurn::NoLegalMove => println!("AI has no legal move. Game over."),
            }
            continue;
        }

        print!("> ");
        stdout.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();

        match input.to_ascii_lowercase().as_str() {
            "" => continue,
            "quit" | "exit" => break,
            "pass" => game.pass()?,
            "undo" => {
                let n = game.undo_turn();
                println!("Took back {n} move(s).\n{}", game.board());
            }
            "hint" => {
                let hints = game.board().suggestions();
                if hints.is_empty() {
                    println!("No obvious captures or rescues.");
                }
                for h in hints {
                    println!("  {} ({:?})", format_vertex(h.point, size), h.kind);
                }
            }
            _ => match parse_vertex(input, size) {
                Ok(Some(pt)) => match game.play_human(pt) {
                    Ok(_) => println!("{}", game.board()),
                    Err(GameError::Move(e)) => println!("{e}"),
                    Err(e) => return Err(e.into()),
                },
                Ok(None) => game.pass()?,
                Err(e) => println!("{e}"),
            },
        }
    }
    Ok(())
}
