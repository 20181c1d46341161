//! Entry points that run A* over a [`Grid`].

use gridpath_core::Point;
use gridpath_paths::{PathRange, SearchConfig, SearchOutcome};

use crate::error::GridError;
use crate::grid::Grid;

/// Shortest walkable path from `start` to `goal`, both inclusive.
///
/// `Ok` with an empty vector means no path exists; `start == goal` on a
/// walkable cell gives `[start]`. Fails only with
/// [`GridError::OutOfBounds`] for a coordinate outside the grid.
pub fn find_path(grid: &Grid, start: Point, goal: Point) -> Result<Vec<Point>, GridError> {
    search(grid, start, goal, &SearchConfig::default()).map(SearchOutcome::into_path)
}

/// Like [`find_path`], but bounded by `config` and reporting why a search
/// came back empty.
pub fn search(
    grid: &Grid,
    start: Point,
    goal: Point,
    config: &SearchConfig,
) -> Result<SearchOutcome, GridError> {
    let mut pr = PathRange::new(grid.bounds());
    search_with(&mut pr, grid, start, goal, config)
}

/// Like [`search`], reusing the working set in `pr`.
///
/// `pr` is resized to the grid if needed; afterwards it can be inspected
/// with [`PathRange::closed_set`] and friends.
pub fn search_with(
    pr: &mut PathRange,
    grid: &Grid,
    start: Point,
    goal: Point,
    config: &SearchConfig,
) -> Result<SearchOutcome, GridError> {
    grid.check(start)?;
    grid.check(goal)?;
    if pr.range() != grid.bounds() {
        pr.set_range(grid.bounds());
    }
    Ok(pr.astar_search(grid, start, goal, config)?)
}
