//! The occupancy grid searched by A*.
//!
//! A [`Grid`] is a rectangular matrix of [`CellState`] values. Its shape is
//! validated once at construction, so every later query only has to check
//! coordinates.

use std::fmt;
use std::str::FromStr;

use gridpath_core::{Point, Range};
use gridpath_paths::{AstarPather, Pather, WeightedPather, manhattan};

use crate::error::GridError;

/// Whether a cell can be stepped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Walkable,
    Blocked,
}

impl CellState {
    /// Whether the cell can be stepped on.
    #[inline]
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Walkable)
    }

    /// Text form used by [`Grid`]'s `Display` and `FromStr`.
    pub const fn to_char(self) -> char {
        match self {
            Self::Walkable => '.',
            Self::Blocked => '#',
        }
    }

    /// Inverse of [`to_char`](Self::to_char).
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Walkable),
            '#' => Some(Self::Blocked),
            _ => None,
        }
    }

    /// Integer form: `0` free, `1` obstacle.
    pub const fn from_bit(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Walkable),
            1 => Some(Self::Blocked),
            _ => None,
        }
    }
}

/// A rectangular occupancy grid with `width` columns and `height` rows.
///
/// Both dimensions are at least 1. Searches borrow the grid immutably, so it
/// cannot change while a search runs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<String>", into = "Vec<String>")
)]
pub struct Grid {
    cells: Vec<CellState>,
    width: i32,
    height: i32,
}

impl Grid {
    /// Create a `width × height` grid with every cell walkable.
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::MalformedGrid(format!(
                "dimensions must be positive, got {width}x{height}"
            )));
        }
        Ok(Self {
            cells: vec![CellState::Walkable; (width as usize) * (height as usize)],
            width,
            height,
        })
    }

    /// Build a grid from rows of cell states. All rows must have the same,
    /// non-zero length.
    pub fn from_cells<R: AsRef<[CellState]>>(rows: &[R]) -> Result<Self, GridError> {
        let Some(first) = rows.first() else {
            return Err(GridError::MalformedGrid("no rows".to_string()));
        };
        let width = first.as_ref().len();
        if width == 0 {
            return Err(GridError::MalformedGrid("empty rows".to_string()));
        }
        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(GridError::MalformedGrid(format!(
                    "row {y} has {} cells, expected {width}",
                    row.len()
                )));
            }
            cells.extend_from_slice(row);
        }
        Ok(Self {
            cells,
            width: width as i32,
            height: rows.len() as i32,
        })
    }

    /// Build a grid from rows of integers, `0` free and `1` obstacle.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridError> {
        let rows = rows
            .iter()
            .enumerate()
            .map(|(y, row)| {
                row.as_ref()
                    .iter()
                    .enumerate()
                    .map(|(x, &v)| {
                        CellState::from_bit(v).ok_or_else(|| {
                            GridError::MalformedGrid(format!("invalid cell value {v} at ({x}, {y})"))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_cells(&rows)
    }

    /// The bounding range `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::sized(self.width, self.height)
    }

    /// Returns the size as a Point (width = x, height = y).
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether the grid contains the given point.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    #[inline]
    fn index(&self, p: Point) -> usize {
        p.y as usize * self.width as usize + p.x as usize
    }

    /// Fail with [`GridError::OutOfBounds`] unless `p` is inside the grid.
    pub fn check(&self, p: Point) -> Result<(), GridError> {
        if self.contains(p) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                point: p,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Get the cell at a point, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<CellState> {
        self.contains(p).then(|| self.cells[self.index(p)])
    }

    /// Set the cell at a point.
    pub fn set(&mut self, p: Point, state: CellState) -> Result<(), GridError> {
        self.check(p)?;
        let idx = self.index(p);
        self.cells[idx] = state;
        Ok(())
    }

    /// Whether the cell at `p` can be stepped on.
    pub fn is_walkable(&self, p: Point) -> Result<bool, GridError> {
        self.check(p)?;
        Ok(self.cells[self.index(p)].is_walkable())
    }

    /// The walkable cells adjacent to `p` along the axes, in the order
    /// `+x`, `-x`, `+y`, `-y`. `p` itself must be inside the grid.
    pub fn neighbors4(&self, p: Point) -> Result<Vec<Point>, GridError> {
        self.check(p)?;
        let mut buf = Vec::with_capacity(4);
        self.neighbors(p, &mut buf);
        Ok(buf)
    }

    /// Number of blocked cells.
    pub fn count_blocked(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_walkable()).count()
    }

    /// Iterate over `(Point, CellState)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, CellState)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellState]> + '_ {
        self.cells.chunks(self.width as usize)
    }
}

impl Pather for Grid {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for n in p.neighbors_4() {
            if self.at(n) == Some(CellState::Walkable) {
                buf.push(n);
            }
        }
    }

    fn passable(&self, p: Point) -> bool {
        self.at(p) == Some(CellState::Walkable)
    }
}

impl WeightedPather for Grid {
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

impl AstarPather for Grid {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}

impl fmt::Display for Grid {
    /// One line per row, `.` walkable and `#` blocked.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            for c in row {
                write!(f, "{}", c.to_char())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = GridError;

    /// Parse the [`Display`](fmt::Display) form. Surrounding blank lines
    /// are ignored; every line must have the same width.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .trim_matches(|c: char| c == '\n' || c == '\r')
            .lines()
            .enumerate()
            .map(|(y, line)| {
                line.chars()
                    .enumerate()
                    .map(|(x, ch)| {
                        CellState::from_char(ch).ok_or_else(|| {
                            GridError::MalformedGrid(format!(
                                "invalid character {ch:?} at ({x}, {y})"
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_cells(&rows)
    }
}

impl TryFrom<Vec<String>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<String>) -> Result<Self, Self::Error> {
        rows.join("\n").parse()
    }
}

impl From<Grid> for Vec<String> {
    fn from(grid: Grid) -> Self {
        grid.rows()
            .map(|row| row.iter().map(|c| c.to_char()).collect())
            .collect()
    }
}
