//! Occupancy grids and the `find_path` entry point.
//!
//! - [`Grid`]: a validated rectangle of walkable/blocked cells
//! - [`mapgen`]: seeded random obstacle maps
//! - [`find_path`] / [`search`]: A* from the `gridpath-paths` crate, run
//!   over a [`Grid`] with unit step cost and the Manhattan heuristic

pub mod error;
pub mod grid;
pub mod mapgen;
pub mod search;

pub use error::GridError;
pub use grid::{CellState, Grid};
pub use mapgen::{GenConfig, Generated, MapGen, generate};
pub use search::{find_path, search, search_with};

pub use gridpath_paths::{SearchConfig, SearchOutcome};
