//! Text presentation for *gridpath* results.
//!
//! Pure functions from a grid and a path to strings; nothing here prints.

pub mod directions;
pub mod text;

pub use directions::{Direction, RenderError, path_directions, render_directions};
pub use text::{GridStyle, render_grid, render_grid_with};
