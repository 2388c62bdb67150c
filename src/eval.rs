//! Move heuristics for the AI.
//!
//! Each heuristic is a pure function `fn(&Grid, Point, Color) -> i32` that
//! scores placing `color` at an empty point. Functions that need the
//! resulting position build it with [`Grid::with_stone`], so the caller's
//! grid is never written. Trial stones are placed without removing captured
//! groups: the scores describe the shape at the moment of contact.
//!
//! [`Heuristic`] is the registry: every identifier maps to exactly one
//! scoring function, and unknown identifiers fail to parse.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Color, Grid, Point};
use crate::constants::*;
use crate::group::{adjacent_groups, group_at};
use crate::profile::ProfileError;

/// Signature shared by all heuristics.
pub type Evaluator = fn(&Grid, Point, Color) -> i32;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Heuristic {
    Survival,
    Capture,
    Defense,
    Connect,
    Cut,
    AttackWeakGroups,
    Territory,
    KeyPoints,
    Liberties,
}

impl Heuristic {
    pub const ALL: [Heuristic; 9] = [
        Heuristic::Survival,
        Heuristic::Capture,
        Heuristic::Defense,
        Heuristic::Connect,
        Heuristic::Cut,
        Heuristic::AttackWeakGroups,
        Heuristic::Territory,
        Heuristic::KeyPoints,
        Heuristic::Liberties,
    ];

    /// Identifier used in profiles and on the wire.
    pub fn id(self) -> &'static str {
        match self {
            Heuristic::Survival => "survival",
            Heuristic::Capture => "capture",
            Heuristic::Defense => "defense",
            Heuristic::Connect => "connect",
            Heuristic::Cut => "cut",
            Heuristic::AttackWeakGroups => "attackWeakGroups",
            Heuristic::Territory => "territory",
            Heuristic::KeyPoints => "keyPoints",
            Heuristic::Liberties => "liberties",
        }
    }

    /// Short word used in move rationales.
    pub fn tag(self) -> &'static str {
        match self {
            Heuristic::Survival => "save",
            Heuristic::Capture => "capture",
            Heuristic::Defense => "defend",
            Heuristic::Connect => "connect",
            Heuristic::Cut => "cut",
            Heuristic::AttackWeakGroups => "attack",
            Heuristic::Territory => "territory",
            Heuristic::KeyPoints => "key point",
            Heuristic::Liberties => "liberties",
        }
    }

    /// Whether a positive score from this heuristic is worth naming in a
    /// move rationale. Key points and liberties reward almost every move.
    pub fn explains(self) -> bool {
        !matches!(self, Heuristic::KeyPoints | Heuristic::Liberties)
    }

    pub fn evaluator(self) -> Evaluator {
        match self {
            Heuristic::Survival => survival,
            Heuristic::Capture => capture,
            Heuristic::Defense => defense,
            Heuristic::Connect => connect,
            Heuristic::Cut => cut,
            Heuristic::AttackWeakGroups => attack_weak_groups,
            Heuristic::Territory => territory,
            Heuristic::KeyPoints => key_points,
            Heuristic::Liberties => liberties,
        }
    }

    #[inline]
    pub fn evaluate(self, grid: &Grid, pt: Point, color: Color) -> i32 {
        (self.evaluator())(grid, pt, color)
    }
}

impl FromStr for Heuristic {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Heuristic::ALL
            .into_iter()
            .find(|h| h.id() == s)
            .ok_or_else(|| ProfileError::UnknownHeuristic(s.to_string()))
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Rescue friendly groups that are short of liberties.
pub fn survival(grid: &Grid, pt: Point, color: Color) -> i32 {
    let trial = grid.with_stone(pt, color);
    adjacent_groups(&trial, pt, color)
        .iter()
        .filter(|g| g.liberties <= SURVIVAL_MAX_LIBS)
        .map(|g| (SURVIVAL_MAX_LIBS + 1 - g.liberties) as i32 * g.size() as i32 * SURVIVAL_FACTOR)
        .sum()
}

/// Take opponent groups left without liberties.
pub fn capture(grid: &Grid, pt: Point, color: Color) -> i32 {
    let trial = grid.with_stone(pt, color);
    adjacent_groups(&trial, pt, color.opponent())
        .iter()
        .filter(|g| g.liberties == 0)
        .map(|g| g.size() as i32 * CAPTURE_FACTOR)
        .sum()
}

/// Shore up friendly groups that remain in danger after the move.
pub fn defense(grid: &Grid, pt: Point, color: Color) -> i32 {
    let trial = grid.with_stone(pt, color);
    adjacent_groups(&trial, pt, color)
        .iter()
        .filter(|g| g.liberties <= DEFENSE_MAX_LIBS)
        .map(|g| (DEFENSE_MAX_LIBS + 1 - g.liberties) as i32 * g.size() as i32 * DEFENSE_FACTOR)
        .sum()
}

/// Join two or more separate friendly groups.
///
/// Counted on the grid before the move, since the new stone merges them.
pub fn connect(grid: &Grid, pt: Point, color: Color) -> i32 {
    let touched = adjacent_groups(grid, pt, color).len();
    if touched >= 2 { touched as i32 * CONNECT_FACTOR } else { 0 }
}

/// Separate two or more opponent groups.
pub fn cut(grid: &Grid, pt: Point, color: Color) -> i32 {
    let touched = adjacent_groups(grid, pt, color.opponent()).len();
    if touched >= 2 { touched as i32 * CUT_FACTOR } else { 0 }
}

/// Pressure opponent groups with few liberties.
pub fn attack_weak_groups(grid: &Grid, pt: Point, color: Color) -> i32 {
    let trial = grid.with_stone(pt, color);
    adjacent_groups(&trial, pt, color.opponent())
        .iter()
        .filter(|g| g.liberties <= ATTACK_MAX_LIBS)
        .map(|g| (ATTACK_MAX_LIBS + 1 - g.liberties) as i32 * g.size() as i32 * ATTACK_FACTOR)
        .sum()
}

/// Local influence from the surrounding 3x3 square.
pub fn territory(grid: &Grid, pt: Point, color: Color) -> i32 {
    grid.neighbors8(pt)
        .filter_map(|n| grid.get(n))
        .map(|c| if c == color { TERRITORY_FRIEND } else { -TERRITORY_ENEMY })
        .sum()
}

/// Star points, the corner band, and a first-line penalty.
pub fn key_points(grid: &Grid, pt: Point, _color: Color) -> i32 {
    let size = grid.size();
    let mut score = 0;
    if star_points(size).contains(&pt) {
        score += STAR_POINT_BONUS;
    }
    let (lo, hi) = CORNER_BAND;
    if (lo..=hi).contains(&corner_distance(size, pt)) {
        score += CORNER_BAND_BONUS;
    }
    if grid.line(pt) == 0 {
        score -= FIRST_LINE_PENALTY;
    }
    score
}

/// Breathing room of the group the stone joins.
pub fn liberties(grid: &Grid, pt: Point, color: Color) -> i32 {
    let trial = grid.with_stone(pt, color);
    group_at(&trial, pt).map_or(0, |g| g.liberties as i32 * LIBERTY_FACTOR)
}

/// The canonical star points for 9x9, 13x13, and 19x19. Other sizes have none.
pub fn star_points(size: usize) -> Vec<Point> {
    let lines: &[usize] = match size {
        19 => &[3, 9, 15],
        13 => &[3, 6, 9],
        9 => return vec![(4, 4), (2, 2), (2, 6), (6, 2), (6, 6)],
        _ => &[],
    };
    lines
        .iter()
        .flat_map(|&r| lines.iter().map(move |&c| (r, c)))
        .collect()
}

/// Chebyshev distance from a point to the nearest corner.
pub fn corner_distance(size: usize, (row, col): Point) -> usize {
    let last = size - 1;
    row.min(last - row).max(col.min(last - col))
}
