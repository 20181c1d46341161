use gridpath_core::{Point, Range};

/// A position with an associated cost, returned from BFS map queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Point,
    pub cost: i32,
}

/// Snapshot of one cell's A* bookkeeping after a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchNode {
    pub pos: Point,
    /// Best known cost from the start.
    pub g: i32,
    /// Heuristic estimate to the goal.
    pub h: i32,
    /// `g + h`.
    pub f: i32,
    /// Predecessor on the best known path; `None` for the start.
    pub parent: Option<Point>,
    /// Whether the cell's cost was finalized.
    pub closed: bool,
}

/// Tunables for a single A* search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Give up after closing this many cells. `None` searches until the
    /// frontier is exhausted.
    pub max_expansions: Option<usize>,
}

impl SearchConfig {
    /// A config bounded to `max` expansions.
    pub fn with_max_expansions(max: usize) -> Self {
        Self {
            max_expansions: Some(max),
        }
    }
}

/// How an A* search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome {
    /// A path from start to goal, both inclusive.
    Found(Vec<Point>),
    /// The frontier ran dry: no path exists.
    Unreachable,
    /// The expansion budget ran out before the goal was reached. Says
    /// nothing about whether a path exists.
    BudgetExhausted { expanded: usize },
}

impl SearchOutcome {
    /// The found path, or an empty vector for every other outcome.
    pub fn into_path(self) -> Vec<Point> {
        match self {
            Self::Found(path) => path,
            Self::Unreachable | Self::BudgetExhausted { .. } => Vec::new(),
        }
    }

    /// Whether a path was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Counters for the last A* search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Cells closed.
    pub expanded: usize,
    /// Frontier insertions, re-insertions after relaxation included.
    pub pushed: usize,
    /// Popped entries discarded as out of date.
    pub stale: usize,
}

/// Errors raised by [`PathRange`] queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// An endpoint lies outside the search range.
    #[error("point {point} is outside the search range {range}")]
    OutOfRange { point: Point, range: Range },
}

// ---------------------------------------------------------------------------
// Internal node for A* priority-queue searches
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeState {
    Open,
    Closed,
}

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) h: i32,
    pub(crate) f: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) state: NodeState,
}

/// Parent index of the start node.
pub(crate) const NO_PARENT: usize = usize::MAX;

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            h: 0,
            f: 0,
            parent: NO_PARENT,
            generation: 0,
            state: NodeState::Open,
        }
    }
}

/// Frontier entry, ordered by `f` then by insertion sequence for use in
/// `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i32,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed so BinaryHeap (max-heap) pops smallest f first, and the
        // earliest insertion among equal f.
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Sentinel value meaning "unreachable" in BFS maps.
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// PathRange
// ---------------------------------------------------------------------------

/// Central coordinator for pathfinding on a grid rectangle.
///
/// `PathRange` owns the working set of every search: the node arena, the
/// BFS map and the flood-fill marks. Nodes from earlier searches are
/// invalidated by bumping a generation counter, so repeated queries do not
/// reallocate. One `PathRange` serves one caller at a time; run parallel
/// searches with one `PathRange` each.
pub struct PathRange {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    // A* arena
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) reached: Option<usize>,
    pub(crate) stats: SearchStats,
    // BFS caches
    pub(crate) bfs_map: Vec<i32>,
    pub(crate) bfs_results: Vec<PathNode>,
    // flood-fill marks
    pub(crate) cc_seen: Vec<bool>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl PathRange {
    /// Create a new `PathRange` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        let len = rng.len();
        Self {
            rng,
            width: rng.width().max(0) as usize,
            nodes: vec![Node::default(); len],
            generation: 0,
            reached: None,
            stats: SearchStats::default(),
            bfs_map: vec![UNREACHABLE; len],
            bfs_results: Vec::new(),
            cc_seen: vec![false; len],
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Replace the underlying range.
    ///
    /// If the new size fits within existing capacity, the node arena is kept
    /// and only invalidated. Otherwise caches are reallocated.
    pub fn set_range(&mut self, rng: Range) {
        let new_len = rng.len();
        self.rng = rng;
        self.width = rng.width().max(0) as usize;
        self.reached = None;
        self.stats = SearchStats::default();
        self.bfs_results.clear();

        if new_len <= self.nodes.len() {
            self.bump_generation();
            return;
        }

        self.nodes.clear();
        self.nodes.resize(new_len, Node::default());
        self.generation = 0;
        self.bfs_map.clear();
        self.bfs_map.resize(new_len, UNREACHABLE);
        self.cc_seen.clear();
        self.cc_seen.resize(new_len, false);
    }

    /// The grid rectangle being used.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Counters for the last A* search.
    #[inline]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Invalidate every node of the previous search.
    pub(crate) fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: nodes stamped long ago would look current again.
            for n in self.nodes.iter_mut() {
                n.generation = 0;
            }
            self.generation = 1;
        }
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Like [`idx`](Self::idx), but reports the point on failure.
    #[inline]
    pub(crate) fn checked_idx(&self, p: Point) -> Result<usize, PathError> {
        self.idx(p).ok_or(PathError::OutOfRange {
            point: p,
            range: self.rng,
        })
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }

    /// Index of `p` if the last search touched it.
    #[inline]
    pub(crate) fn live_idx(&self, p: Point) -> Option<usize> {
        let i = self.idx(p)?;
        (self.generation != 0 && self.nodes[i].generation == self.generation).then_some(i)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PathRange {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rng.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PathRange {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let range = Range::deserialize(deserializer)?;
        Ok(PathRange::new(range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn idx_and_point_are_inverse() {
        let pr = PathRange::new(Range::new(2, 3, 7, 6));
        for p in pr.range().iter() {
            let i = pr.idx(p).unwrap();
            assert_eq!(pr.point(i), p);
        }
        assert_eq!(pr.idx(Point::new(0, 0)), None);
        assert_eq!(
            pr.checked_idx(Point::new(7, 3)),
            Err(PathError::OutOfRange {
                point: Point::new(7, 3),
                range: Range::new(2, 3, 7, 6),
            })
        );
    }

    #[test]
    fn frontier_pops_lowest_f_then_fifo() {
        let mut heap = BinaryHeap::new();
        heap.push(NodeRef { idx: 0, f: 5, seq: 0 });
        heap.push(NodeRef { idx: 1, f: 3, seq: 1 });
        heap.push(NodeRef { idx: 2, f: 3, seq: 2 });
        heap.push(NodeRef { idx: 3, f: 4, seq: 3 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|r| r.idx)).collect();
        assert_eq!(order, vec![1, 2, 3, 0]);
    }

    #[test]
    fn set_range_smaller_preserves_capacity() {
        let mut pr = PathRange::new(Range::sized(20, 20));
        let old_cap = pr.nodes.len();

        let small = Range::sized(5, 5);
        pr.set_range(small);
        assert_eq!(pr.range(), small);
        assert_eq!(pr.nodes.len(), old_cap);
        assert_eq!(pr.width, 5);
        assert!(pr.generation > 0);
    }

    #[test]
    fn set_range_larger_reallocates() {
        let mut pr = PathRange::new(Range::sized(5, 5));
        pr.set_range(Range::sized(20, 20));
        assert_eq!(pr.nodes.len(), 400);
        assert_eq!(pr.bfs_map.len(), 400);
        assert_eq!(pr.cc_seen.len(), 400);
    }

    #[test]
    fn generation_wrap_clears_stamps() {
        let mut pr = PathRange::new(Range::sized(2, 2));
        pr.nodes[1].generation = 1;
        pr.generation = u32::MAX;
        pr.bump_generation();
        assert_eq!(pr.generation, 1);
        assert!(pr.nodes.iter().all(|n| n.generation == 0));
    }

    #[test]
    fn outcome_into_path() {
        let p = vec![Point::new(0, 0)];
        assert_eq!(SearchOutcome::Found(p.clone()).into_path(), p);
        assert!(SearchOutcome::Unreachable.into_path().is_empty());
        assert!(
            SearchOutcome::BudgetExhausted { expanded: 3 }
                .into_path()
                .is_empty()
        );
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn pathrange_round_trip() {
        let rng = Range::new(1, 2, 10, 20);
        let pr = PathRange::new(rng);
        let json = serde_json::to_string(&pr).unwrap();
        let back: PathRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back.range(), rng);
        assert_eq!(back.generation, 0);
        assert_eq!(back.nodes.len(), rng.len());
    }

    #[test]
    fn config_round_trip() {
        let cfg = SearchConfig::with_max_expansions(64);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
