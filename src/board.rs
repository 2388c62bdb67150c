//! Stone colours, points, and the square grid they live on.
//!
//! The grid is a plain row-major `Vec<Option<Color>>` with runtime size.
//! Points are `(row, col)` pairs, row 0 at the top. Text coordinates follow
//! the usual Go convention: letters A-Z skipping `I` for columns and row
//! numbers counted from the bottom edge.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DELTA4, DELTA8, MAX_SIZE};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Color {
    Black,
    White,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Colour code used on the wire: 1 = black, 2 = white (0 is empty).
    pub fn code(self) -> u8 {
        match self {
            Color::Black => 1,
            Color::White => 2,
        }
    }

    /// Decode a cell code; 0 is an empty cell.
    pub fn from_code(code: u8) -> Result<Option<Color>, CoordError> {
        match code {
            0 => Ok(None),
            1 => Ok(Some(Color::Black)),
            2 => Ok(Some(Color::White)),
            other => Err(CoordError::BadColorCode(other)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
        }
    }
}

impl From<Color> for u8 {
    fn from(c: Color) -> u8 {
        c.code()
    }
}

impl TryFrom<u8> for Color {
    type Error = CoordError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Color::from_code(code)?.ok_or(CoordError::BadColorCode(code))
    }
}

impl std::str::FromStr for Color {
    type Err = CoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "black" => Ok(Color::Black),
            "w" | "white" => Ok(Color::White),
            _ => Err(CoordError::BadColor(s.to_string())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A board coordinate as (row, col), both 0-indexed from the top-left.
pub type Point = (usize, usize);

/// Errors from parsing text coordinates and colour codes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordError {
    #[error("invalid vertex: {0}")]
    BadVertex(String),
    #[error("vertex {0} is off a {1}x{1} board")]
    OffBoard(String, usize),
    #[error("invalid color: {0}")]
    BadColor(String),
    #[error("invalid color code: {0}")]
    BadColorCode(u8),
}

/// Stones captured by each colour.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Captures {
    pub black: u32,
    pub white: u32,
}

impl Captures {
    pub fn get(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    pub fn add(&mut self, color: Color, stones: usize) {
        let stones = stones as u32;
        match color {
            Color::Black => self.black += stones,
            Color::White => self.white += stones,
        }
    }
}

/// An N×N grid of optional stones.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Color>>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "board size must be at least 1");
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Build a grid from rows of cells. Returns `None` unless the rows form a
    /// non-empty square.
    pub fn from_rows(rows: &[Vec<Option<Color>>]) -> Option<Self> {
        let size = rows.len();
        if size == 0 || rows.iter().any(|r| r.len() != size) {
            return None;
        }
        Some(Self {
            size,
            cells: rows.iter().flatten().copied().collect(),
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, (row, col): Point) -> usize {
        row * self.size + col
    }

    pub fn in_bounds(&self, (row, col): Point) -> bool {
        row < self.size && col < self.size
    }

    /// Stone at `pt`; off-board points read as empty.
    pub fn get(&self, pt: Point) -> Option<Color> {
        if !self.in_bounds(pt) {
            return None;
        }
        self.cells[self.idx(pt)]
    }

    pub fn is_empty_at(&self, pt: Point) -> bool {
        self.in_bounds(pt) && self.get(pt).is_none()
    }

    /// Write a cell. Off-board writes are ignored.
    pub fn set(&mut self, pt: Point, stone: Option<Color>) {
        if self.in_bounds(pt) {
            let i = self.idx(pt);
            self.cells[i] = stone;
        }
    }

    /// Copy of this grid with one extra stone, leaving `self` untouched.
    pub fn with_stone(&self, pt: Point, color: Color) -> Grid {
        let mut next = self.clone();
        next.set(pt, Some(color));
        next
    }

    fn offset(&self, (row, col): Point, (dr, dc): (isize, isize)) -> Option<Point> {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        self.in_bounds((r, c)).then_some((r, c))
    }

    /// The on-board orthogonal neighbours of a point.
    pub fn neighbors(&self, pt: Point) -> impl Iterator<Item = Point> + '_ {
        DELTA4.iter().filter_map(move |&d| self.offset(pt, d))
    }

    /// The on-board points of the surrounding 3x3 square, centre excluded.
    pub fn neighbors8(&self, pt: Point) -> impl Iterator<Item = Point> + '_ {
        DELTA8.iter().filter_map(move |&d| self.offset(pt, d))
    }

    /// All points in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        let s = self.size;
        (0..s).flat_map(move |r| (0..s).map(move |c| (r, c)))
    }

    pub fn empty_points(&self) -> Vec<Point> {
        self.points().filter(|&p| self.get(p).is_none()).collect()
    }

    pub fn stone_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// 0-indexed line of a point: its distance to the nearest edge.
    pub fn line(&self, (row, col): Point) -> usize {
        let last = self.size - 1;
        row.min(col).min(last - row).min(last - col)
    }

    pub fn rows(&self) -> Vec<Vec<Option<Color>>> {
        self.cells.chunks(self.size).map(|r| r.to_vec()).collect()
    }

    /// Rows of colour codes (0 empty, 1 black, 2 white).
    pub fn code_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.size)
            .map(|r| r.iter().map(|c| c.map_or(0, Color::code)).collect())
            .collect()
    }

    /// Decode rows of colour codes into a grid.
    pub fn from_code_rows(rows: &[Vec<u8>]) -> Result<Option<Grid>, CoordError> {
        let decoded = rows
            .iter()
            .map(|r| r.iter().map(|&c| Color::from_code(c)).collect())
            .collect::<Result<Vec<Vec<_>>, _>>()?;
        Ok(Grid::from_rows(&decoded))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letters: String = (0..self.size).map(|c| format!("{} ", column_letter(c))).collect();
        writeln!(f, "   {}", letters.trim_end())?;
        for row in 0..self.size {
            write!(f, "{:>2} ", self.size - row)?;
            for col in 0..self.size {
                let ch = match self.get((row, col)) {
                    Some(Color::Black) => 'X',
                    Some(Color::White) => 'O',
                    None => '.',
                };
                if col + 1 < self.size {
                    write!(f, "{ch} ")?;
                } else {
                    write!(f, "{ch}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Column letters, skipping 'I' to avoid confusion with 'J'.
const COLUMN_LETTERS: &[u8] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// Letter for a column; columns past `Z` render as `?`.
fn column_letter(col: usize) -> char {
    COLUMN_LETTERS.get(col).map_or('?', |&c| c as char)
}

/// Parse a vertex such as `D4` or `pass` on a board of the given size.
///
/// Returns `Ok(None)` for a pass.
pub fn parse_vertex(s: &str, size: usize) -> Result<Option<Point>, CoordError> {
    if s.eq_ignore_ascii_case("pass") {
        return Ok(None);
    }
    let bad = || CoordError::BadVertex(s.to_string());

    let mut chars = s.chars();
    let letter = chars.next().ok_or_else(bad)?.to_ascii_uppercase();
    if !letter.is_ascii_uppercase() || letter == 'I' {
        return Err(bad());
    }
    let mut col = (letter as u8 - b'A') as usize;
    if letter > 'I' {
        col -= 1;
    }
    let number: usize = chars.as_str().parse().map_err(|_| bad())?;

    if number == 0 || number > size || col >= size || size > MAX_SIZE {
        return Err(CoordError::OffBoard(s.to_string(), size));
    }
    Ok(Some((size - number, col)))
}

/// Convert a point to a vertex string, e.g. `(8, 3)` on 9x9 is `D1`.
pub fn format_vertex((row, col): Point, size: usize) -> String {
    format!("{}{}", column_letter(col), size - row)
}
