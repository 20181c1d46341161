use gridpath_core::Point;

/// Minimal pathfinding interface: neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    ///
    /// The order of appended neighbors decides which of several equal-cost
    /// paths a search returns, so it must be fixed.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);

    /// Whether `p` may appear on a path at all. Searches starting or ending
    /// on a non-passable cell find nothing.
    fn passable(&self, _p: Point) -> bool {
        true
    }
}

/// Pather with weighted (positive-cost) edges.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> i32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Point, to: Point) -> i32;
}
