//! Random obstacle maps.
//!
//! Every cell is blocked independently with a fixed probability, then the
//! start and goal cells are cleared. The random source is always passed
//! in, so a seed reproduces a map exactly.

use gridpath_core::Point;
use rand::rngs::StdRng;
use rand::{Rng, RngExt, SeedableRng};

use crate::error::GridError;
use crate::grid::{CellState, Grid};

/// Parameters for [`generate`] and [`MapGen::generate`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GenConfig {
    /// Number of columns, > 0.
    pub width: i32,
    /// Number of rows, > 0.
    pub height: i32,
    /// Chance in `[0, 1]` that any one cell is blocked.
    pub obstacle_probability: f64,
    /// Start cell; random when `None`.
    pub start: Option<Point>,
    /// Goal cell; random when `None`.
    pub goal: Option<Point>,
    /// Seed for [`generate`]. Ignored by [`MapGen`], which owns its RNG.
    pub seed: Option<u64>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 10,
            obstacle_probability: 0.2,
            start: None,
            goal: None,
            seed: None,
        }
    }
}

impl GenConfig {
    /// Check dimensions, probability, and any explicit endpoints.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(GridError::MalformedGrid(format!(
                "dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(0.0..=1.0).contains(&self.obstacle_probability) {
            return Err(GridError::InvalidProbability(self.obstacle_probability));
        }
        for p in [self.start, self.goal].into_iter().flatten() {
            if p.x < 0 || p.x >= self.width || p.y < 0 || p.y >= self.height {
                return Err(GridError::OutOfBounds {
                    point: p,
                    width: self.width,
                    height: self.height,
                });
            }
        }
        Ok(())
    }
}

/// A generated map and the endpoints chosen for it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Generated {
    pub grid: Grid,
    pub start: Point,
    pub goal: Point,
}

/// Random map generator owning its random source.
pub struct MapGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MapGen<R> {
    /// Create a new MapGen drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a map.
    ///
    /// Cells are drawn in row-major order; a cell is blocked when a uniform
    /// draw in `[0, 1)` falls below the obstacle probability, so `0.0`
    /// blocks nothing and `1.0` blocks everything. Missing endpoints are
    /// then drawn, start first. Start and goal are always walkable.
    pub fn generate(&mut self, config: &GenConfig) -> Result<Generated, GridError> {
        config.validate()?;
        let mut grid = Grid::new(config.width, config.height)?;

        for p in grid.bounds() {
            if self.rng.random::<f64>() < config.obstacle_probability {
                grid.set(p, CellState::Blocked)?;
            }
        }

        let start = match config.start {
            Some(p) => p,
            None => self.random_point(config.width, config.height),
        };
        let goal = match config.goal {
            Some(p) => p,
            None => self.random_point(config.width, config.height),
        };
        grid.set(start, CellState::Walkable)?;
        grid.set(goal, CellState::Walkable)?;

        log::debug!(
            "generated {}x{} map, {} blocked, start {start}, goal {goal}",
            config.width,
            config.height,
            grid.count_blocked()
        );

        Ok(Generated { grid, start, goal })
    }

    fn random_point(&mut self, width: i32, height: i32) -> Point {
        Point::new(
            self.rng.random_range(0..width),
            self.rng.random_range(0..height),
        )
    }
}

/// Generate a map from `config`, seeding from `config.seed` when given and
/// from the thread RNG otherwise.
pub fn generate(config: &GenConfig) -> Result<Generated, GridError> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    MapGen::new(rng).generate(config)
}
