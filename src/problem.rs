//! Guided problems: a fixed starting layout with a known first move.
//!
//! The problem seed is read-only. A [`ProblemSession`] plays attempts on its
//! own board, keeps the assigned colour on move after every legal placement,
//! and compares the attempt with the recorded first move.

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Color, CoordError, Grid, Point};
use crate::constants::HINT_AFTER_ATTEMPTS;
use crate::position::BoardState;
use crate::rules::MoveError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemError {
    #[error("layout must be a square of size {0}")]
    BadLayout(usize),
    #[error(transparent)]
    BadCell(#[from] CoordError),
    #[error("problem has no solution")]
    NoSolution,
    #[error("solution {0:?} is off the board")]
    SolutionOffBoard(Point),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionStep {
    pub row: usize,
    pub col: usize,
}

/// Seed payload for one problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    #[serde(default)]
    pub name: String,
    pub size: usize,
    pub initial_board: Vec<Vec<u8>>,
    pub current_player: Color,
    pub solution: Vec<SolutionStep>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub difficulty: String,
}

impl Problem {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let problem: Problem = serde_json::from_str(json)?;
        problem.validate()?;
        Ok(problem)
    }

    pub fn validate(&self) -> Result<(), ProblemError> {
        self.grid()?;
        let answer = self.answer()?;
        if answer.0 >= self.size || answer.1 >= self.size {
            return Err(ProblemError::SolutionOffBoard(answer));
        }
        Ok(())
    }

    /// The first move of the recorded solution.
    pub fn answer(&self) -> Result<Point, ProblemError> {
        self.solution
            .first()
            .map(|s| (s.row, s.col))
            .ok_or(ProblemError::NoSolution)
    }

    fn grid(&self) -> Result<Grid, ProblemError> {
        match Grid::from_code_rows(&self.initial_board)? {
            Some(g) if g.size() == self.size => Ok(g),
            _ => Err(ProblemError::BadLayout(self.size)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    Solved { explanation: String },
    Wrong { attempts: u32 },
    Illegal(MoveError),
    AlreadySolved,
}

#[derive(Debug, Clone)]
pub struct ProblemSession {
    problem: Problem,
    answer: Point,
    start: BoardState,
    board: BoardState,
    attempts: u32,
    solved: bool,
}

impl ProblemSession {
    pub fn new(problem: Problem) -> Result<Self, ProblemError> {
        problem.validate()?;
        let board = BoardState::from_grid(problem.grid()?, problem.current_player);
        let answer = problem.answer()?;
        Ok(Self {
            problem,
            answer,
            start: board.clone(),
            board,
            attempts: 0,
            solved: false,
        })
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Play `pt` for the assigned colour and grade it.
    ///
    /// A legal wrong move stays on the board until [`reset`](Self::reset).
    pub fn attempt(&mut self, pt: Point) -> Attempt {
        if self.solved {
            return Attempt::AlreadySolved;
        }
        if let Err(e) = self.board.place_stone(pt) {
            return Attempt::Illegal(e);
        }
        self.board.set_to_move(self.problem.current_player);

        if pt == self.answer {
            self.solved = true;
            debug!("problem {:?} solved", self.problem.name);
            Attempt::Solved {
                explanation: self.problem.explanation.clone(),
            }
        } else {
            self.attempts += 1;
            Attempt::Wrong {
                attempts: self.attempts,
            }
        }
    }

    /// The solution point, once enough attempts have failed.
    pub fn hint(&self) -> Option<Point> {
        (self.attempts > HINT_AFTER_ATTEMPTS).then_some(self.answer)
    }

    /// Restore the seed layout and clear progress.
    pub fn reset(&mut self) {
        self.board = self.start.clone();
        self.attempts = 0;
        self.solved = false;
    }
}
