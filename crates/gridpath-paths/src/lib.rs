//! Shortest-path search on 4-connected grids.
//!
//! This crate provides:
//!
//! - **A\*** shortest-path search ([`PathRange::astar_path`],
//!   [`PathRange::astar_search`]) with path reconstruction
//!   ([`PathRange::reconstruct`]) and closed-set inspection
//!   ([`PathRange::closed_set`])
//! - **BFS** unweighted distance maps ([`PathRange::bfs_map`])
//! - **Reachable component** flood fill ([`PathRange::cc_map`])
//!
//! All algorithms operate through [`PathRange`], which owns and reuses its
//! working set so that repeated queries incur no allocations after warm-up.
//! The grid itself is only read, through the traits below.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS, flood fill |
//! | [`WeightedPather`] : [`Pather`] | (edge costs) |
//! | [`AstarPather`] : [`WeightedPather`] | A* |

mod astar;
mod bfs;
mod cc;
mod distance;
mod pathrange;
mod reconstruct;
#[cfg(test)]
mod testmap;
mod traits;

pub use distance::manhattan;
pub use pathrange::{
    PathError, PathNode, PathRange, SearchConfig, SearchNode, SearchOutcome, SearchStats,
    UNREACHABLE,
};
pub use traits::{AstarPather, Pather, WeightedPather};
