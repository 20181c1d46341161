use std::collections::BinaryHeap;

use gridpath_core::Point;

use crate::PathRange;
use crate::pathrange::{
    NO_PARENT, NodeRef, NodeState, PathError, SearchConfig, SearchOutcome, SearchStats,
};
use crate::traits::AstarPather;

impl PathRange {
    /// Compute the shortest path from `from` to `to` using A*.
    ///
    /// Returns the full path (including both endpoints), or an empty vector
    /// if no path exists. `from == to` on a passable cell gives `[from]`.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Result<Vec<Point>, PathError> {
        self.astar_search(pather, from, to, &SearchConfig::default())
            .map(SearchOutcome::into_path)
    }

    /// Run A* from `from` to `to` under `config`.
    ///
    /// The frontier pops the lowest `f = g + h`, ties going to the entry
    /// inserted first. A relaxed node is pushed again rather than re-keyed;
    /// popped entries whose cell is closed or whose `f` no longer matches
    /// the node are skipped.
    ///
    /// After the call, [`reconstruct`](Self::reconstruct),
    /// [`closed_set`](Self::closed_set) and [`stats`](Self::stats) describe
    /// this search until the next one starts.
    pub fn astar_search<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
        config: &SearchConfig,
    ) -> Result<SearchOutcome, PathError> {
        let start_idx = self.checked_idx(from)?;
        let goal_idx = self.checked_idx(to)?;

        self.bump_generation();
        self.reached = None;
        self.stats = SearchStats::default();
        let cur_gen = self.generation;

        if !pather.passable(from) || !pather.passable(to) {
            log::debug!("astar {from} -> {to}: endpoint not passable");
            return Ok(SearchOutcome::Unreachable);
        }

        {
            let h = pather.estimate(from, to);
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.h = h;
            node.f = h;
            node.parent = NO_PARENT;
            node.generation = cur_gen;
            node.state = NodeState::Open;
        }

        let mut seq: u64 = 0;
        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            idx: start_idx,
            f: self.nodes[start_idx].f,
            seq,
        });
        self.stats.pushed = 1;

        let mut nbuf = std::mem::take(&mut self.nbuf);

        let outcome = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search SearchOutcome::Unreachable;
            };

            let ci = current.idx;
            let node = &self.nodes[ci];
            if node.generation != cur_gen || node.state == NodeState::Closed || node.f != current.f
            {
                self.stats.stale += 1;
                continue;
            }

            if ci == goal_idx {
                self.reached = Some(goal_idx);
                break 'search SearchOutcome::Found(self.reconstruct(to));
            }

            if let Some(max) = config.max_expansions {
                if self.stats.expanded >= max {
                    break 'search SearchOutcome::BudgetExhausted {
                        expanded: self.stats.expanded,
                    };
                }
            }

            self.nodes[ci].state = NodeState::Closed;
            self.stats.expanded += 1;
            let current_g = self.nodes[ci].g;
            let current_point = self.point(ci);
            log::trace!("astar: close {current_point} g={current_g}");

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if !pather.passable(np) {
                    continue;
                }
                let tentative_g = current_g + pather.cost(current_point, np);

                let n = &mut self.nodes[ni];
                if n.generation == cur_gen {
                    if n.state == NodeState::Closed || tentative_g >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                    n.h = pather.estimate(np, to);
                }

                n.g = tentative_g;
                n.f = tentative_g + n.h;
                n.parent = ci;
                n.state = NodeState::Open;

                seq += 1;
                open.push(NodeRef {
                    idx: ni,
                    f: n.f,
                    seq,
                });
                self.stats.pushed += 1;
            }
        };

        self.nbuf = nbuf;

        let SearchStats {
            expanded,
            pushed,
            stale,
        } = self.stats;
        match &outcome {
            SearchOutcome::Found(path) => log::debug!(
                "astar {from} -> {to}: {} cells, expanded={expanded} pushed={pushed} stale={stale}",
                path.len()
            ),
            SearchOutcome::Unreachable => log::debug!(
                "astar {from} -> {to}: unreachable, expanded={expanded} pushed={pushed} stale={stale}"
            ),
            SearchOutcome::BudgetExhausted { .. } => {
                log::warn!("astar {from} -> {to}: budget of {expanded} expansions exhausted")
            }
        }

        Ok(outcome)
    }
}
