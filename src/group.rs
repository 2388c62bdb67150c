//! Connected groups and their liberties.
//!
//! Groups are derived on demand from a [`Grid`] and never cached, so every
//! query sees the board as it is now. Traversal is an explicit-stack flood
//! fill with a visited set, which keeps memory bounded on large boards.

use crate::board::{Color, Grid, Point};

/// A maximal set of 4-connected stones of one colour.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub color: Color,
    pub stones: Vec<Point>,
    pub liberties: usize,
}

impl Group {
    pub fn size(&self) -> usize {
        self.stones.len()
    }

    pub fn contains(&self, pt: Point) -> bool {
        self.stones.contains(&pt)
    }

    pub fn in_atari(&self) -> bool {
        self.liberties == 1
    }
}

/// Collect all stones connected to `start` that share its colour.
///
/// Returns an empty vector if `start` is empty or off the board.
pub fn compute_group(grid: &Grid, start: Point) -> Vec<Point> {
    let Some(color) = grid.get(start) else {
        return Vec::new();
    };
    let size = grid.size();
    let mut stack = vec![start];
    let mut visited = vec![false; size * size];
    let mut out = Vec::new();

    while let Some(pt) = stack.pop() {
        let i = pt.0 * size + pt.1;
        if visited[i] {
            continue;
        }
        visited[i] = true;
        out.push(pt);
        for n in grid.neighbors(pt) {
            if !visited[n.0 * size + n.1] && grid.get(n) == Some(color) {
                stack.push(n);
            }
        }
    }
    out
}

/// Count the distinct empty points adjacent to any member of `stones`.
pub fn count_liberties(grid: &Grid, stones: &[Point]) -> usize {
    let size = grid.size();
    let mut seen = vec![false; size * size];
    let mut libs = 0;
    for &pt in stones {
        for n in grid.neighbors(pt) {
            let i = n.0 * size + n.1;
            if grid.get(n).is_none() && !seen[i] {
                seen[i] = true;
                libs += 1;
            }
        }
    }
    libs
}

/// The group containing `pt`, or `None` for an empty or off-board point.
pub fn group_at(grid: &Grid, pt: Point) -> Option<Group> {
    let color = grid.get(pt)?;
    let stones = compute_group(grid, pt);
    let liberties = count_liberties(grid, &stones);
    Some(Group {
        color,
        stones,
        liberties,
    })
}

/// The distinct groups of `color` orthogonally adjacent to `pt`.
pub fn adjacent_groups(grid: &Grid, pt: Point, color: Color) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    for n in grid.neighbors(pt) {
        if grid.get(n) != Some(color) || groups.iter().any(|g| g.contains(n)) {
            continue;
        }
        if let Some(g) = group_at(grid, n) {
            groups.push(g);
        }
    }
    groups
}
