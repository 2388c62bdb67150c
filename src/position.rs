//! Go position representation and move execution.
//!
//! This module provides the live game state:
//! - Board grid, side to move, capture counters, and ko point
//! - Stone placement through the shared legality rules
//! - Snapshot undo and passing
//! - Read-only views and simple hints for a presentation layer

use std::fmt;

use log::debug;
use serde::Serialize;

use crate::board::{Captures, Color, Grid, Point};
use crate::constants::SUGGESTION_LIMIT;
use crate::group::{Group, adjacent_groups, group_at};
use crate::history::{HistoryStack, Snapshot};
use crate::rules::{self, MoveError};

/// A successful placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub point: Point,
    pub color: Color,
    pub captured: Vec<Point>,
}

/// Move result as reported to a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveReport {
    pub legal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub captured_points: Option<Vec<Point>>,
}

impl From<&Result<Placement, MoveError>> for MoveReport {
    fn from(result: &Result<Placement, MoveError>) -> Self {
        match result {
            Ok(p) => MoveReport {
                legal: true,
                reason: None,
                captured_points: Some(p.captured.clone()),
            },
            Err(e) => MoveReport {
                legal: false,
                reason: Some(e.code()),
                captured_points: None,
            },
        }
    }
}

/// Read-only copy of the visible state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub size: usize,
    pub board: Vec<Vec<Option<Color>>>,
    pub current_player: Color,
    pub captured: Captures,
    pub ko_point: Option<Point>,
}

/// Why a point is worth a look for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintKind {
    Capture,
    Rescue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suggestion {
    pub point: Point,
    pub kind: HintKind,
    pub priority: u8,
}

/// A Go position with its undo history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardState {
    grid: Grid,
    to_move: Color,
    captures: Captures,
    ko: Option<Point>,
    history: HistoryStack,
}

impl BoardState {
    /// An empty `size`×`size` board with Black to move.
    pub fn new(size: usize) -> Self {
        Self::from_grid(Grid::new(size), Color::Black)
    }

    /// Start from an arbitrary layout, e.g. a problem seed.
    pub fn from_grid(grid: Grid, to_move: Color) -> Self {
        Self {
            grid,
            to_move,
            captures: Captures::default(),
            ko: None,
            history: HistoryStack::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn get(&self, pt: Point) -> Option<Color> {
        self.grid.get(pt)
    }

    pub fn to_move(&self) -> Color {
        self.to_move
    }

    pub fn captures(&self) -> Captures {
        self.captures
    }

    pub fn ko_point(&self) -> Option<Point> {
        self.ko
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    /// Number of placements that can still be undone.
    pub fn moves_played(&self) -> usize {
        self.history.len()
    }

    pub fn empty_points(&self) -> Vec<Point> {
        self.grid.empty_points()
    }

    /// Copy of the position without its history, for trial placements.
    pub fn detached(&self) -> BoardState {
        Self {
            grid: self.grid.clone(),
            to_move: self.to_move,
            captures: self.captures,
            ko: self.ko,
            history: HistoryStack::new(),
        }
    }

    pub fn view(&self) -> BoardView {
        BoardView {
            size: self.size(),
            board: self.grid.rows(),
            current_player: self.to_move,
            captured: self.captures,
            ko_point: self.ko,
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid.clone(),
            to_move: self.to_move,
            captures: self.captures,
            ko: self.ko,
        }
    }

    /// Check whether the side to move may play at `pt`, without playing.
    pub fn check_legal(&self, pt: Point) -> Result<(), MoveError> {
        rules::check_legal(&self.grid, self.ko, pt, self.to_move)
    }

    pub fn is_legal(&self, pt: Point) -> bool {
        self.check_legal(pt).is_ok()
    }

    /// Place a stone for the side to move.
    ///
    /// On success the pre-move state is pushed to history, dead opponent
    /// groups are removed and credited to the mover, the ko point is
    /// recomputed, and the turn passes. On failure nothing changes.
    pub fn place_stone(&mut self, pt: Point) -> Result<Placement, MoveError> {
        let color = self.to_move;
        self.check_legal(pt)?;

        self.history.push(self.snapshot());
        self.grid.set(pt, Some(color));
        let captured = rules::resolve_captures(&mut self.grid, pt, color);
        self.captures.add(color, captured.len());
        self.ko = rules::ko_after(&self.grid, pt, &captured);
        self.to_move = color.opponent();

        debug!(
            "{} plays {:?}, captures {}, ko {:?}",
            color,
            pt,
            captured.len(),
            self.ko
        );
        Ok(Placement {
            point: pt,
            color,
            captured,
        })
    }

    /// Restore the state from before the last placement.
    ///
    /// Returns `false` (and does nothing) if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(prev) = self.history.pop() else {
            return false;
        };
        self.grid = prev.grid;
        self.to_move = prev.to_move;
        self.captures = prev.captures;
        self.ko = prev.ko;
        debug!("undo, {} moves left in history", self.history.len());
        true
    }

    /// Hand the turn to the opponent.
    ///
    /// The ko point is cleared. Passes are not recorded in history, so an
    /// undo after a pass rewinds the last placement.
    pub fn pass(&mut self) {
        debug!("{} passes", self.to_move);
        self.to_move = self.to_move.opponent();
        self.ko = None;
    }

    /// Force the side to move without touching the board.
    pub fn set_to_move(&mut self, color: Color) {
        self.to_move = color;
    }

    /// Clear the board, counters, ko, and history. Black moves first.
    pub fn reset(&mut self) {
        *self = Self::new(self.size());
    }

    /// Group details for an occupied point.
    pub fn group_info(&self, pt: Point) -> Option<Group> {
        group_at(&self.grid, pt)
    }

    /// Up to three quick hints for the side to move: captures first, then
    /// points that extend a friendly group currently in atari.
    pub fn suggestions(&self) -> Vec<Suggestion> {
        let color = self.to_move;
        let mut hints = Vec::new();
        for pt in self.grid.empty_points() {
            if !self.is_legal(pt) {
                continue;
            }
            let trial = self.grid.with_stone(pt, color);
            if !rules::captured_by(&trial, pt, color).is_empty() {
                hints.push(Suggestion {
                    point: pt,
                    kind: HintKind::Capture,
                    priority: 3,
                });
            } else if adjacent_groups(&self.grid, pt, color)
                .iter()
                .any(Group::in_atari)
            {
                hints.push(Suggestion {
                    point: pt,
                    kind: HintKind::Rescue,
                    priority: 2,
                });
            }
        }
        hints.sort_by(|a, b| b.priority.cmp(&a.priority));
        hints.truncate(SUGGESTION_LIMIT);
        hints
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)?;
        writeln!(
            f,
            "{} to move, captures: black {} white {}",
            self.to_move, self.captures.black, self.captures.white
        )
    }
}
