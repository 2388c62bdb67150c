//! Human versus AI game driver.

use log::info;
use thiserror::Error;

use crate::board::{Color, Point};
use crate::position::{BoardState, Placement};
use crate::remote::{AiMove, AiService};
use crate::rules::MoveError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error(transparent)]
    Move(#[from] MoveError),
    #[error("it is not the human player's turn")]
    NotYourTurn,
    #[error("the game is over")]
    GameOver,
}

/// Outcome of asking the AI to move.
#[derive(Debug, Clone, PartialEq)]
pub enum AiTurn {
    Played { mv: AiMove, placement: Placement },
    NoLegalMove,
}

pub struct Game {
    board: BoardState,
    ai: AiService,
    human: Color,
    over: bool,
}

impl Game {
    pub fn new(size: usize, ai: AiService, human: Color) -> Self {
        Self {
            board: BoardState::new(size),
            ai,
            human,
            over: false,
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn ai(&self) -> &AiService {
        &self.ai
    }

    pub fn ai_mut(&mut self) -> &mut AiService {
        &mut self.ai
    }

    pub fn human(&self) -> Color {
        self.human
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn is_human_turn(&self) -> bool {
        self.board.to_move() == self.human
    }

    pub fn play_human(&mut self, pt: Point) -> Result<Placement, GameError> {
        if self.over {
            return Err(GameError::GameOver);
        }
        if !self.is_human_turn() {
            return Err(GameError::NotYourTurn);
        }
        Ok(self.board.place_stone(pt)?)
    }

    /// Let the AI choose and commit a move for the side to move.
    ///
    /// When no legal placement exists the game ends.
    pub fn play_ai(&mut self) -> Result<AiTurn, GameError> {
        if self.over {
            return Err(GameError::GameOver);
        }
        let Some(mv) = self.ai.propose(&self.board) else {
            info!("{} has no legal move, game over", self.board.to_move());
            self.over = true;
            return Ok(AiTurn::NoLegalMove);
        };
        let placement = self.board.place_stone(mv.point)?;
        Ok(AiTurn::Played { mv, placement })
    }

    pub fn pass(&mut self) -> Result<(), GameError> {
        if self.over {
            return Err(GameError::GameOver);
        }
        self.board.pass();
        Ok(())
    }

    /// Take back the last AI reply together with the human move before it.
    ///
    /// With a single placement on record only that one is undone. Returns the
    /// number of placements removed.
    pub fn undo_turn(&mut self) -> usize {
        let steps = if self.board.moves_played() >= 2 { 2 } else { 1 };
        let undone = (0..steps).take_while(|_| self.board.undo()).count();
        if undone > 0 {
            self.over = false;
        }
        undone
    }

    pub fn restart(&mut self) {
        self.board.reset();
        self.over = false;
    }
}
