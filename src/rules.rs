//! Placement legality and capture resolution.
//!
//! These are free functions over a [`Grid`] so the same rules back live
//! play, the AI's candidate filter, and the hint helper:
//! - [`check_legal`] decides whether a stone may be placed
//! - [`resolve_captures`] removes the opponent groups a placement kills
//! - [`ko_after`] derives the ko point left behind by a placement

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::board::{Color, Grid, Point};
use crate::group::{adjacent_groups, group_at};

/// Why a placement was refused. The board is unchanged in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum MoveError {
    /// Point lies outside the grid
    #[error("illegal move: point is off the board")]
    OutOfBounds,
    /// Point already holds a stone
    #[error("illegal move: point not empty")]
    Occupied,
    /// Placement captures nothing and leaves its own group without liberties
    #[error("illegal move: suicide")]
    SuicideMove,
    /// Placement immediately retakes a ko
    #[error("illegal move: retakes ko")]
    KoViolation,
}

impl MoveError {
    /// Stable reason code for the presentation layer.
    pub fn code(self) -> &'static str {
        match self {
            MoveError::OutOfBounds => "out_of_bounds",
            MoveError::Occupied => "occupied",
            MoveError::SuicideMove => "suicide",
            MoveError::KoViolation => "ko",
        }
    }
}

/// Serialized as its reason code.
impl Serialize for MoveError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Decide whether `color` may play at `pt`.
///
/// The stone is placed on a scratch copy of the grid; a placement that leaves
/// an adjacent opponent group without liberties is always accepted, otherwise
/// the mover's own group must keep at least one liberty.
pub fn check_legal(grid: &Grid, ko: Option<Point>, pt: Point, color: Color) -> Result<(), MoveError> {
    if !grid.in_bounds(pt) {
        return Err(MoveError::OutOfBounds);
    }
    if grid.get(pt).is_some() {
        return Err(MoveError::Occupied);
    }
    if ko == Some(pt) {
        return Err(MoveError::KoViolation);
    }

    let trial = grid.with_stone(pt, color);
    if !captured_by(&trial, pt, color).is_empty() {
        return Ok(());
    }
    match group_at(&trial, pt) {
        Some(own) if own.liberties > 0 => Ok(()),
        _ => Err(MoveError::SuicideMove),
    }
}

/// Stones of every opponent group adjacent to `pt` that has no liberties.
///
/// `grid` must already hold the mover's stone at `pt`.
pub fn captured_by(grid: &Grid, pt: Point, color: Color) -> Vec<Point> {
    adjacent_groups(grid, pt, color.opponent())
        .into_iter()
        .filter(|g| g.liberties == 0)
        .flat_map(|g| g.stones)
        .collect()
}

/// Remove the opponent groups killed by the stone at `pt`.
///
/// Returns the removed points.
pub fn resolve_captures(grid: &mut Grid, pt: Point, color: Color) -> Vec<Point> {
    let dead = captured_by(grid, pt, color);
    for &p in &dead {
        grid.set(p, None);
    }
    dead
}

/// The ko point after a placement at `pt` removed `captured`.
///
/// Set only when exactly one stone was taken by a lone stone that is left
/// with exactly one liberty.
pub fn ko_after(grid: &Grid, pt: Point, captured: &[Point]) -> Option<Point> {
    let [single] = captured else {
        return None;
    };
    let own = group_at(grid, pt)?;
    (own.size() == 1 && own.liberties == 1).then_some(*single)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(size: usize, black: &[Point], white: &[Point]) -> Grid {
        let mut g = Grid::new(size);
        for &p in black {
            g.set(p, Some(Color::Black));
        }
        for &p in white {
            g.set(p, Some(Color::White));
        }
        g
    }

    #[test]
    fn test_bounds_and_occupied() {
        let g = grid_with(9, &[(4, 4)], &[]);
        assert_eq!(check_legal(&g, None, (9, 0), Color::White), Err(MoveError::OutOfBounds));
        assert_eq!(check_legal(&g, None, (4, 4), Color::White), Err(MoveError::Occupied));
        assert_eq!(check_legal(&g, None, (4, 5), Color::White), Ok(()));
    }

    #[test]
    fn test_ko_point_refused() {
        let g = Grid::new(9);
        assert_eq!(check_legal(&g, Some((3, 3)), (3, 3), Color::Black), Err(MoveError::KoViolation));
        assert_eq!(check_legal(&g, Some((3, 3)), (3, 4), Color::Black), Ok(()));
    }

    #[test]
    fn test_suicide_in_corner() {
        let g = grid_with(9, &[(0, 1), (1, 0)], &[]);
        assert_eq!(check_legal(&g, None, (0, 0), Color::White), Err(MoveError::SuicideMove));
        // Filling one's own eye is not suicide while the group has liberties
        assert_eq!(check_legal(&g, None, (0, 0), Color::Black), Ok(()));
    }

    #[test]
    fn test_capture_beats_suicide() {
        // White at (0,0) in atari; black (0,1) is also short of liberties.
        // Black playing (1,0) has no liberty of its own but captures.
        let g = grid_with(3, &[(0, 1)], &[(0, 0), (0, 2), (1, 1), (2, 0)]);
        assert_eq!(check_legal(&g, None, (1, 0), Color::Black), Ok(()));
    }

    #[test]
    fn test_single_point_board_is_suicide() {
        let g = Grid::new(1);
        assert_eq!(check_legal(&g, None, (0, 0), Color::Black), Err(MoveError::SuicideMove));
    }

    #[test]
    fn test_resolve_captures_removes_group() {
        let mut g = grid_with(5, &[(0, 2), (1, 0), (1, 1)], &[(0, 0), (0, 1)]);
        let captured = resolve_captures(&mut g, (1, 1), Color::Black);
        assert_eq!(captured.len(), 2);
        assert!(captured.contains(&(0, 0)) && captured.contains(&(0, 1)));
        assert_eq!(g.get((0, 0)), None);
        assert_eq!(g.get((0, 1)), None);
        assert_eq!(g.stone_count(), 3);
    }

    #[test]
    fn test_ko_after_requires_lone_stone_in_atari() {
        // Classic ko shape: black takes at (1,2) leaving itself in atari
        let mut g = grid_with(
            5,
            &[(0, 1), (2, 1), (1, 0), (1, 2)],
            &[(0, 2), (2, 2), (1, 3), (1, 1)],
        );
        let captured = resolve_captures(&mut g, (1, 2), Color::Black);
        assert_eq!(captured, vec![(1, 1)]);
        assert_eq!(ko_after(&g, (1, 2), &captured), Some((1, 1)));

        // A capturing stone with several liberties sets no ko
        assert_eq!(ko_after(&g, (1, 0), &captured), None);
        assert_eq!(ko_after(&g, (1, 2), &[]), None);
        assert_eq!(ko_after(&g, (1, 2), &[(1, 1), (3, 3)]), None);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(MoveError::OutOfBounds.code(), "out_of_bounds");
        assert_eq!(MoveError::KoViolation.to_string(), "illegal move: retakes ko");
        for e in [
            MoveError::OutOfBounds,
            MoveError::Occupied,
            MoveError::SuicideMove,
            MoveError::KoViolation,
        ] {
            assert_eq!(serde_json::to_value(e).unwrap(), e.code());
        }
        assert_eq!(serde_json::to_string(&MoveError::SuicideMove).unwrap(), "\"suicide\"");
    }
}
