//! Shortest-path search on an editable wall grid.
//!
//! This crate holds the model and algorithm behind the pathviz visualizer:
//!
//! - [`Board`] — a fixed-size grid of open/wall cells with a start and an
//!   end marker, edited interactively (toggle walls, relocate markers).
//! - [`DijkstraSearch`] — single-source shortest-path search from the start
//!   to the end marker over unit-cost cardinal moves, exposed both as a
//!   one-shot [`run`](DijkstraSearch::run) and as a lazy per-expansion
//!   [`Steps`] iterator so a front-end can animate the frontier.
//!
//! The engine owns reusable node arrays, so repeated runs on the same board
//! size incur no allocations after warm-up.

mod board;
mod distance;
mod search;

pub use board::Board;
pub use distance::manhattan;
pub use search::{DijkstraSearch, Outcome, Step, Steps, UNREACHABLE};
