//! Tiny text-map pather shared by the unit tests.

use gridpath_core::{Point, Range};

use crate::distance::manhattan;
use crate::traits::{AstarPather, Pather, WeightedPather};

/// `#` is a wall, anything else is floor.
pub(crate) struct TestMap {
    rows: Vec<Vec<bool>>,
}

impl TestMap {
    pub(crate) fn parse(s: &str) -> Self {
        let rows = s
            .lines()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .map(|l| l.chars().map(|c| c != '#').collect())
            .collect();
        Self { rows }
    }

    pub(crate) fn open(width: usize, height: usize) -> Self {
        Self {
            rows: vec![vec![true; width]; height],
        }
    }

    pub(crate) fn range(&self) -> Range {
        Range::sized(self.rows[0].len() as i32, self.rows.len() as i32)
    }

    fn free(&self, p: Point) -> bool {
        self.range().contains(p) && self.rows[p.y as usize][p.x as usize]
    }
}

impl Pather for TestMap {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(p.neighbors_4().into_iter().filter(|&n| self.free(n)));
    }

    fn passable(&self, p: Point) -> bool {
        self.free(p)
    }
}

impl WeightedPather for TestMap {
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

impl AstarPather for TestMap {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}
