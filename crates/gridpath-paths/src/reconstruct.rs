//! Reading results back out of the last A* search.

use gridpath_core::Point;

use crate::PathRange;
use crate::pathrange::{NO_PARENT, NodeState, SearchNode};

impl PathRange {
    /// Walk parent links from `to` back to the start of the last search.
    ///
    /// Returns the cells from start to `to`, both inclusive. `to` must be the
    /// goal the last search reached or a cell it closed; for anything else
    /// (goal never reached, untouched cell, out of range) the result is
    /// empty. Does not modify the arena: calling it twice gives the same
    /// vector.
    pub fn reconstruct(&self, to: Point) -> Vec<Point> {
        let Some(gi) = self.live_idx(to) else {
            return Vec::new();
        };
        if self.reached != Some(gi) && self.nodes[gi].state != NodeState::Closed {
            return Vec::new();
        }

        let mut path = Vec::new();
        let mut ci = gi;
        while ci != NO_PARENT {
            path.push(self.point(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        path
    }

    /// The goal of the last search, if it was reached.
    pub fn reached(&self) -> Option<Point> {
        self.reached.map(|i| self.point(i))
    }

    /// Whether the last search finalized the cost of `p`.
    pub fn is_closed(&self, p: Point) -> bool {
        self.live_idx(p)
            .is_some_and(|i| self.nodes[i].state == NodeState::Closed)
    }

    /// Every cell the last search closed, in row-major order.
    pub fn closed_set(&self) -> Vec<Point> {
        (0..self.rng.len())
            .filter(|&i| {
                let n = &self.nodes[i];
                self.generation != 0
                    && n.generation == self.generation
                    && n.state == NodeState::Closed
            })
            .map(|i| self.point(i))
            .collect()
    }

    /// Bookkeeping for `p` from the last search, if it was discovered.
    pub fn node(&self, p: Point) -> Option<SearchNode> {
        let i = self.live_idx(p)?;
        let n = &self.nodes[i];
        Some(SearchNode {
            pos: p,
            g: n.g,
            h: n.h,
            f: n.f,
            parent: (n.parent != NO_PARENT).then(|| self.point(n.parent)),
            closed: n.state == NodeState::Closed,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::testmap::TestMap;

    const ENCLOSED: &str = "
        ..#....
        ..#.##.
        ###.#G#
        ....###";

    #[test]
    fn reconstruct_is_idempotent() {
        let map = TestMap::open(6, 4);
        let mut pr = PathRange::new(map.range());
        let to = Point::new(5, 3);
        let path = pr.astar_path(&map, Point::new(0, 0), to).unwrap();
        assert_eq!(pr.reached(), Some(to));
        assert_eq!(pr.reconstruct(to), path);
        assert_eq!(pr.reconstruct(to), pr.reconstruct(to));
    }

    #[test]
    fn reconstruct_unreached_goal_is_empty() {
        let map = TestMap::parse(ENCLOSED);
        let mut pr = PathRange::new(map.range());
        let goal = Point::new(5, 2);
        assert!(pr.astar_path(&map, Point::new(0, 0), goal).unwrap().is_empty());
        assert_eq!(pr.reached(), None);
        assert!(pr.reconstruct(goal).is_empty());
        assert!(pr.reconstruct(Point::new(40, 40)).is_empty());
    }

    #[test]
    fn reconstruct_before_any_search_is_empty() {
        let pr = PathRange::new(TestMap::open(3, 3).range());
        assert!(pr.reconstruct(Point::new(1, 1)).is_empty());
        assert!(pr.closed_set().is_empty());
        assert_eq!(pr.node(Point::new(0, 0)), None);
    }

    #[test]
    fn closed_set_is_reachable_component_when_unreachable() {
        let map = TestMap::parse(ENCLOSED);
        let mut pr = PathRange::new(map.range());
        let start = Point::new(0, 0);
        assert!(pr.astar_path(&map, start, Point::new(5, 2)).unwrap().is_empty());

        let closed: HashSet<Point> = pr.closed_set().into_iter().collect();
        let expected: HashSet<Point> = [(0, 0), (1, 0), (0, 1), (1, 1)]
            .into_iter()
            .map(Point::from)
            .collect();
        assert_eq!(closed, expected);
        assert!(pr.is_closed(start));
        assert!(!pr.is_closed(Point::new(3, 0)));
    }

    #[test]
    fn closed_cells_reconstruct_to_start() {
        let map = TestMap::open(4, 4);
        let mut pr = PathRange::new(map.range());
        let start = Point::new(0, 0);
        pr.astar_path(&map, start, Point::new(3, 3)).unwrap();
        for p in pr.closed_set() {
            let path = pr.reconstruct(p);
            assert_eq!(path[0], start);
            assert_eq!(*path.last().unwrap(), p);
            let node = pr.node(p).unwrap();
            assert!(node.closed);
            assert_eq!(node.g as usize, path.len() - 1);
            assert_eq!(node.f, node.g + node.h);
        }
    }

    #[test]
    fn start_node_has_no_parent() {
        let map = TestMap::open(3, 1);
        let mut pr = PathRange::new(map.range());
        pr.astar_path(&map, Point::new(0, 0), Point::new(2, 0))
            .unwrap();
        let start = pr.node(Point::new(0, 0)).unwrap();
        assert_eq!(start.parent, None);
        assert_eq!(start.g, 0);
        assert_eq!(start.h, 2);
        let goal = pr.node(Point::new(2, 0)).unwrap();
        assert_eq!(goal.parent, Some(Point::new(1, 0)));
        assert!(!goal.closed);
    }
}
