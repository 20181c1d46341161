//! Grid-to-text rendering.

use std::collections::HashSet;

use gridpath_core::Point;
use gridpath_map::{CellState, Grid};

/// Glyphs used by [`render_grid_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GridStyle {
    pub start: char,
    pub goal: char,
    pub blocked: char,
    pub path: char,
    pub free: char,
    /// Placed between cells of a row.
    pub separator: Option<char>,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            start: 'S',
            goal: 'G',
            blocked: '█',
            path: 'P',
            free: '.',
            separator: Some(' '),
        }
    }
}

impl GridStyle {
    /// Glyph for one cell. Start and goal win over everything, then blocked
    /// cells, then path membership.
    fn glyph(&self, p: Point, cell: CellState, start: Point, goal: Point, on_path: bool) -> char {
        if p == start {
            self.start
        } else if p == goal {
            self.goal
        } else if !cell.is_walkable() {
            self.blocked
        } else if on_path {
            self.path
        } else {
            self.free
        }
    }
}

/// Render `grid` with the default [`GridStyle`].
pub fn render_grid(grid: &Grid, start: Point, goal: Point, path: Option<&[Point]>) -> String {
    render_grid_with(&GridStyle::default(), grid, start, goal, path)
}

/// Render `grid` row by row, one glyph per cell, rows separated by `\n`
/// with no trailing newline. Cells of `path` other than start and goal are
/// marked with [`GridStyle::path`]; path cells outside the grid are ignored.
pub fn render_grid_with(
    style: &GridStyle,
    grid: &Grid,
    start: Point,
    goal: Point,
    path: Option<&[Point]>,
) -> String {
    let on_path: HashSet<Point> = path.unwrap_or_default().iter().copied().collect();
    let mut out = String::with_capacity((grid.width() as usize * 2) * grid.height() as usize);

    for (p, cell) in grid.iter() {
        if p.x == 0 {
            if p.y > 0 {
                out.push('\n');
            }
        } else if let Some(sep) = style.separator {
            out.push(sep);
        }
        out.push(style.glyph(p, cell, start, goal, on_path.contains(&p)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marks_endpoints_walls_and_free_cells() {
        let grid: Grid = "..#\n...".parse().unwrap();
        let text = render_grid(&grid, Point::new(0, 0), Point::new(2, 1), None);
        assert_eq!(text, "S . █\n. . G");
    }

    #[test]
    fn overlays_path_between_endpoints() {
        let grid: Grid = "...\n.#.\n...".parse().unwrap();
        let path = [
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(2, 0),
            Point::new(2, 1),
            Point::new(2, 2),
        ];
        let text = render_grid(&grid, Point::new(0, 0), Point::new(2, 2), Some(&path));
        assert_eq!(text, "S P P\n. █ P\n. . G");
    }

    #[test]
    fn empty_path_is_same_as_none() {
        let grid: Grid = ".#\n..".parse().unwrap();
        let start = Point::new(0, 0);
        let goal = Point::new(1, 1);
        assert_eq!(
            render_grid(&grid, start, goal, Some(&[])),
            render_grid(&grid, start, goal, None)
        );
    }

    #[test]
    fn start_wins_over_wall() {
        let grid: Grid = "#.".parse().unwrap();
        let text = render_grid(&grid, Point::new(0, 0), Point::new(0, 0), None);
        assert_eq!(text, "S .");
    }

    #[test]
    fn custom_style() {
        let style = GridStyle {
            blocked: '#',
            path: '*',
            separator: None,
            ..GridStyle::default()
        };
        let grid: Grid = "..\n#.".parse().unwrap();
        let path = [Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)];
        let text = render_grid_with(&style, &grid, path[0], path[2], Some(&path));
        assert_eq!(text, "S*\n#G");
    }
}
