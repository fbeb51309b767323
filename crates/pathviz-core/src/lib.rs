//! **pathviz-core** — foundation types for the pathviz grid visualizer.
//!
//! This crate provides everything the front-end crates build on: geometry
//! primitives, styled character cells, a shared-buffer display grid with
//! frame diffing, input events, and the Elm-architecture application loop.

pub mod app;
pub mod cell;
pub mod geom;
pub mod grid;
pub mod messages;
pub mod style;

pub use app::{App, AppConfig, Context, Driver, Effect, Model, cmd};
pub use cell::Cell;
pub use geom::{Point, Range};
pub use grid::{Frame, FrameCell, Grid, compute_frame};
pub use messages::*;
pub use style::{AttrMask, Color, Style};
