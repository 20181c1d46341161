//! Reachable-component flood fill.

use gridpath_core::Point;

use crate::PathRange;
use crate::traits::Pather;

impl PathRange {
    /// Flood-fill from `p` and return every cell connected to it, `p`
    /// included, in discovery order.
    ///
    /// Returns an empty vector when `p` is outside the range or not
    /// passable.
    pub fn cc_map<P: Pather>(&mut self, pather: &P, p: Point) -> Vec<Point> {
        self.cc_seen.fill(false);

        let mut result = Vec::new();
        let Some(si) = self.idx(p) else {
            return result;
        };
        if !pather.passable(p) {
            return result;
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut stack = vec![si];
        self.cc_seen[si] = true;
        result.push(p);

        while let Some(ci) = stack.pop() {
            let cp = self.point(ci);
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                if let Some(ni) = self.idx(np) {
                    if !self.cc_seen[ni] {
                        self.cc_seen[ni] = true;
                        stack.push(ni);
                        result.push(np);
                    }
                }
            }
        }

        self.nbuf = nbuf;
        result
    }
}
