//! Step-by-step Dijkstra shortest-path search over a [`Board`].

use std::collections::BinaryHeap;

use pathviz_core::{Point, Range};

use crate::board::Board;

/// Sentinel distance for cells not reached by the current run.
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// Internal node storage
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct Node {
    dist: i32,
    parent: usize,
    generation: u32,
    open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            dist: UNREACHABLE,
            parent: usize::MAX,
            generation: 0,
            open: false,
        }
    }
}

/// Reference into the node array, ordered by `dist` for use in `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq)]
struct NodeRef {
    idx: usize,
    dist: i32,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest dist first.
        other.dist.cmp(&self.dist)
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Public result types
// ---------------------------------------------------------------------------

/// One expansion of the search: the cell that was just finalized and its
/// distance from the start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub pos: Point,
    pub dist: i32,
}

/// Result of a completed search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The end marker was reached; the path is reconstructible.
    Found,
    /// The frontier emptied without reaching the end marker.
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Idle,
    Running,
    Done(Outcome),
}

// ---------------------------------------------------------------------------
// DijkstraSearch
// ---------------------------------------------------------------------------

/// Single-source shortest-path search from a board's start marker to its end
/// marker. Wall cells are impassable, every move costs 1.
///
/// The engine owns flat per-cell node arrays, invalidated lazily via a
/// generation counter, so repeated runs allocate nothing after warm-up. A
/// run is driven either to completion with [`run`](Self::run), or one
/// expansion at a time with [`begin`](Self::begin) + [`step`](Self::step)
/// (or the [`steps`](Self::steps) iterator) for animated display.
pub struct DijkstraSearch {
    rng: Range,
    width: usize,
    nodes: Vec<Node>,
    generation: u32,
    open: BinaryHeap<NodeRef>,
    path_mask: Vec<bool>,
    path: Vec<Point>,
    current: Option<Point>,
    status: Status,
    nbuf: Vec<Point>,
}

impl DijkstraSearch {
    /// Create an engine for the given board rectangle.
    pub fn new(rng: Range) -> Self {
        let len = rng.len();
        Self {
            rng,
            width: rng.width().max(0) as usize,
            nodes: vec![Node::default(); len],
            generation: 0,
            open: BinaryHeap::new(),
            path_mask: vec![false; len],
            path: Vec::new(),
            current: None,
            status: Status::Idle,
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Start a new run: clear all search-transient state and seed the
    /// frontier with the board's start marker at distance 0.
    ///
    /// Returns `false` (and changes nothing) if a run is already in
    /// progress.
    pub fn begin(&mut self, board: &Board) -> bool {
        if self.status == Status::Running {
            return false;
        }

        self.generation = self.generation.wrapping_add(1);
        self.open.clear();
        self.path_mask.fill(false);
        self.path.clear();
        self.current = None;

        if let Some(si) = self.idx(board.start()) {
            let n = &mut self.nodes[si];
            n.dist = 0;
            n.parent = usize::MAX;
            n.generation = self.generation;
            n.open = true;
            self.open.push(NodeRef { idx: si, dist: 0 });
        }

        self.status = Status::Running;
        true
    }

    /// Advance the active run by one expansion.
    ///
    /// Pops the minimum-distance frontier cell. If it is the end marker the
    /// run finishes with [`Outcome::Found`] and the path is reconstructed;
    /// otherwise the cell is closed, its open neighbours relaxed, and the
    /// expansion is returned as a [`Step`]. Returns `None` once the run has
    /// finished — with [`Outcome::NotFound`] if the frontier emptied first.
    pub fn step(&mut self, board: &Board) -> Option<Step> {
        if self.status != Status::Running {
            return None;
        }

        loop {
            let Some(current) = self.open.pop() else {
                self.finish(Outcome::NotFound, board);
                return None;
            };
            let ci = current.idx;

            // Stale entries from superseded relaxations; the closed check
            // is the correctness guard, not queue deduplication.
            let n = &self.nodes[ci];
            if n.generation != self.generation || !n.open {
                continue;
            }

            let cp = self.point(ci);
            if cp == board.end() {
                self.finish(Outcome::Found, board);
                return None;
            }

            self.nodes[ci].open = false;
            let dist = self.nodes[ci].dist;
            self.current = Some(cp);

            let mut nbuf = std::mem::take(&mut self.nbuf);
            nbuf.clear();
            board.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                if board.is_wall(np) {
                    continue;
                }
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative = dist + 1;

                let n = &mut self.nodes[ni];
                if n.generation == self.generation {
                    if !n.open {
                        // closed: distance is final
                        continue;
                    }
                    if tentative >= n.dist {
                        continue;
                    }
                } else {
                    n.generation = self.generation;
                    n.dist = UNREACHABLE;
                }

                n.dist = tentative;
                n.parent = ci;
                n.open = true;
                self.open.push(NodeRef {
                    idx: ni,
                    dist: tentative,
                });
            }

            self.nbuf = nbuf;
            return Some(Step { pos: cp, dist });
        }
    }

    /// Iterate the remaining expansions of the active run. The iterator is
    /// lazy, finite, and yields nothing if no run is in progress.
    pub fn steps<'a>(&'a mut self, board: &'a Board) -> Steps<'a> {
        Steps {
            search: self,
            board,
        }
    }

    /// Run a full search to completion.
    ///
    /// Returns `None` (a no-op) if a run is already in progress; otherwise
    /// the outcome.
    pub fn run(&mut self, board: &Board) -> Option<Outcome> {
        if !self.begin(board) {
            return None;
        }
        for _ in self.steps(board) {}
        self.outcome()
    }

    /// Clear all search-transient state without starting a run. Aborts any
    /// run in progress.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.open.clear();
        self.path_mask.fill(false);
        self.path.clear();
        self.current = None;
        self.status = Status::Idle;
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Whether a run is in progress.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }

    /// The outcome of the last run, if it finished.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            Status::Done(o) => Some(o),
            _ => None,
        }
    }

    /// Tentative or final distance of `p` in the current run.
    pub fn distance_at(&self, p: Point) -> i32 {
        match self.idx(p) {
            Some(i) if self.nodes[i].generation == self.generation => self.nodes[i].dist,
            _ => UNREACHABLE,
        }
    }

    /// Whether `p` has been expanded (closed) in the current run.
    pub fn visited(&self, p: Point) -> bool {
        self.idx(p).is_some_and(|i| {
            let n = &self.nodes[i];
            n.generation == self.generation && !n.open && n.dist != UNREACHABLE
        })
    }

    /// Whether `p` is on the frontier: discovered but not yet finalized.
    pub fn frontier(&self, p: Point) -> bool {
        self.idx(p)
            .is_some_and(|i| self.nodes[i].generation == self.generation && self.nodes[i].open)
    }

    /// Whether `p` lies on the reconstructed path. The end marker is
    /// included, the start marker is not.
    pub fn on_path(&self, p: Point) -> bool {
        self.idx(p).is_some_and(|i| self.path_mask[i])
    }

    /// The most recently expanded cell, while a run is active.
    #[inline]
    pub fn current(&self) -> Option<Point> {
        self.current
    }

    /// The reconstructed path from start to end (inclusive), empty unless
    /// the last run found one.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn finish(&mut self, outcome: Outcome, board: &Board) {
        self.current = None;
        self.open.clear();
        if outcome == Outcome::Found {
            self.reconstruct(board);
        }
        self.status = Status::Done(outcome);
    }

    /// Walk predecessor links from the end marker back to the start,
    /// marking the path mask. The start cell itself is left unmarked. A
    /// broken chain just stops the walk.
    fn reconstruct(&mut self, board: &Board) {
        self.path.clear();
        let si = self.idx(board.start());
        let Some(mut ci) = self.idx(board.end()) else {
            return;
        };
        loop {
            self.path.push(self.point(ci));
            if Some(ci) == si {
                break;
            }
            self.path_mask[ci] = true;
            let parent = self.nodes[ci].parent;
            if parent == usize::MAX {
                break;
            }
            ci = parent;
        }
        self.path.reverse();
    }

    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    #[inline]
    fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// Lazy iterator over the remaining expansions of an active run.
pub struct Steps<'a> {
    search: &'a mut DijkstraSearch,
    board: &'a Board,
}

impl Iterator for Steps<'_> {
    type Item = Step;

    #[inline]
    fn next(&mut self) -> Option<Step> {
        self.search.step(self.board)
    }
}
