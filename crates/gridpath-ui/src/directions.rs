//! Path-to-arrow rendering.

use std::fmt;

use gridpath_core::Point;

/// One axis-aligned move between adjacent cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The move for a unit delta; `None` for anything else.
    pub const fn from_delta(d: Point) -> Option<Self> {
        match (d.x, d.y) {
            (0, -1) => Some(Self::Up),
            (0, 1) => Some(Self::Down),
            (-1, 0) => Some(Self::Left),
            (1, 0) => Some(Self::Right),
            _ => None,
        }
    }

    /// The move from `from` to the adjacent cell `to`; `None` when the two
    /// cells are not axis-aligned neighbours.
    pub fn between(from: Point, to: Point) -> Option<Self> {
        let dx = to.x.checked_sub(from.x)?;
        let dy = to.y.checked_sub(from.y)?;
        Self::from_delta(Point::new(dx, dy))
    }

    /// The unit delta of this move. Rows grow downwards.
    pub const fn delta(self) -> Point {
        match self {
            Self::Up => Point::new(0, -1),
            Self::Down => Point::new(0, 1),
            Self::Left => Point::new(-1, 0),
            Self::Right => Point::new(1, 0),
        }
    }

    /// Arrow glyph.
    pub const fn glyph(self) -> char {
        match self {
            Self::Up => '⇧',
            Self::Down => '⇩',
            Self::Left => '⇦',
            Self::Right => '⇨',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// Errors raised while rendering a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Two consecutive cells that are not axis-aligned neighbours.
    #[error("step {index} from {from} to {to} is not a single axis-aligned move")]
    IllegalStep { index: usize, from: Point, to: Point },
}

/// The moves that walk `path` from its first cell to its last.
///
/// A path of zero or one cells has no moves.
pub fn path_directions(path: &[Point]) -> Result<Vec<Direction>, RenderError> {
    path.windows(2)
        .enumerate()
        .map(|(index, w)| {
            Direction::between(w[0], w[1]).ok_or(RenderError::IllegalStep {
                index,
                from: w[0],
                to: w[1],
            })
        })
        .collect()
}

/// The moves of `path` as arrow glyphs separated by spaces.
pub fn render_directions(path: &[Point]) -> Result<String, RenderError> {
    let dirs = path_directions(path)?;
    let mut out = String::with_capacity(dirs.len() * 4);
    for (i, d) in dirs.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(d.glyph());
    }
    Ok(out)
}
