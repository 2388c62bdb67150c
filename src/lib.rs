//! goban-ai: a Go rules engine with a heuristic, difficulty-tiered opponent.
//!
//! The board enforces placement, capture, suicide and simple ko, and keeps
//! full snapshots for undo. The opponent scores every candidate point with a
//! weighted sum of small positional heuristics and picks among the best,
//! occasionally exploring a lesser move depending on difficulty.
//!
//! ## Modules
//!
//! - [`constants`] - Board limits, filter bounds and heuristic coefficients
//! - [`board`] - Colours, points, the grid, text coordinates
//! - [`group`] - Connected groups and their liberties
//! - [`rules`] - Legality, captures and ko
//! - [`history`] - Snapshot stack for undo
//! - [`position`] - The live board state
//! - [`eval`] - Heuristic evaluators
//! - [`profile`] - Difficulty profiles
//! - [`selector`] - The move selector
//! - [`remote`] - Optional remote move service with local fallback
//! - [`problem`] - Guided problem sessions
//! - [`game`] - Human versus AI driver
//! - [`gtp`] - Go Text Protocol front-end
//!
//! ## Example
//!
//! ```
//! use goban_ai::position::BoardState;
//! use goban_ai::profile::Difficulty;
//! use goban_ai::selector::{Decision, MoveSelector};
//!
//! let mut board = BoardState::new(9);
//! board.place_stone((4, 4)).unwrap();
//!
//! let mut ai = MoveSelector::with_seed(Difficulty::Medium.profile(), 7);
//! if let Decision::Move(c) = ai.choose(&board) {
//!     board.place_stone(c.point).unwrap();
//!     println!("AI played {:?} ({})", c.point, c.rationale());
//! }
//! ```

pub mod board;
pub mod constants;
pub mod eval;
pub mod game;
pub mod group;
pub mod gtp;
pub mod history;
pub mod position;
pub mod problem;
pub mod profile;
pub mod remote;
pub mod rules;
pub mod selector;
