//! The [`Grid`] type — a 2D grid of display [`Cell`]s with slice semantics.
//!
//! A `Grid` is a *view* into a shared backing buffer: cloning or
//! [`slice`](Grid::slice)-ing yields another view of the **same** storage, so
//! widgets can draw into sub-areas without copies.

use std::cell::RefCell;
use std::rc::Rc;

use crate::cell::Cell;
use crate::geom::{Point, Range};

#[derive(Debug, Clone)]
struct GridBuffer {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl GridBuffer {
    fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![Cell::default(); width * height],
            width,
            height,
        }
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            Some((y as usize) * self.width + (x as usize))
        } else {
            None
        }
    }
}

/// A 2D grid of [`Cell`]s backed by shared storage.
#[derive(Debug, Clone)]
pub struct Grid {
    buffer: Rc<RefCell<GridBuffer>>,
    bounds: Range,
}

impl Grid {
    /// Create a new grid of the given dimensions, filled with default cells.
    pub fn new(width: i32, height: i32) -> Self {
        let w = width.max(0) as usize;
        let h = height.max(0) as usize;
        Self {
            buffer: Rc::new(RefCell::new(GridBuffer::new(w, h))),
            bounds: Range::new(0, 0, width.max(0), height.max(0)),
        }
    }

    /// The bounding range of this grid / sub-grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Size of the grid as a `Point`.
    #[inline]
    pub fn size(&self) -> Point {
        self.bounds.size()
    }

    /// Whether `p` is inside this grid's bounds.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Get a sub-grid view sharing the same backing buffer, bounded by the
    /// intersection of `r` and the current bounds.
    pub fn slice(&self, r: Range) -> Grid {
        Grid {
            buffer: Rc::clone(&self.buffer),
            bounds: self.bounds.intersect(r),
        }
    }

    /// Read the cell at `p`. Returns `Cell::default()` if `p` is outside
    /// bounds.
    pub fn at(&self, p: Point) -> Cell {
        if !self.bounds.contains(p) {
            return Cell::default();
        }
        let buf = self.buffer.borrow();
        buf.index(p.x, p.y)
            .map(|i| buf.cells[i])
            .unwrap_or_default()
    }

    /// Set the cell at `p`. No-op if `p` is outside bounds.
    pub fn set(&self, p: Point, cell: Cell) {
        if !self.bounds.contains(p) {
            return;
        }
        let mut buf = self.buffer.borrow_mut();
        if let Some(i) = buf.index(p.x, p.y) {
            buf.cells[i] = cell;
        }
    }

    /// Fill every cell in the grid with `cell`.
    pub fn fill(&self, cell: Cell) {
        let mut buf = self.buffer.borrow_mut();
        for p in self.bounds.iter() {
            if let Some(i) = buf.index(p.x, p.y) {
                buf.cells[i] = cell;
            }
        }
    }

    /// Copy cells from `src` into `self`, aligning `src.bounds.min` with
    /// `self.bounds.min`. Returns the size actually copied.
    pub fn copy_from(&self, src: &Grid) -> Point {
        let sw = src.bounds.width().min(self.bounds.width());
        let sh = src.bounds.height().min(self.bounds.height());
        let src_buf = src.buffer.borrow();
        let mut dst_buf = self.buffer.borrow_mut();
        for dy in 0..sh {
            for dx in 0..sw {
                let sp = Point::new(src.bounds.min.x + dx, src.bounds.min.y + dy);
                let dp = Point::new(self.bounds.min.x + dx, self.bounds.min.y + dy);
                if let (Some(si), Some(di)) = (src_buf.index(sp.x, sp.y), dst_buf.index(dp.x, dp.y))
                {
                    dst_buf.cells[di] = src_buf.cells[si];
                }
            }
        }
        Point::new(sw, sh)
    }

    /// Row-major iterator over `(Point, Cell)` pairs.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            grid: self,
            inner: self.bounds.iter(),
        }
    }
}

/// Iterator over `(Point, Cell)` pairs in a [`Grid`].
pub struct GridIter<'a> {
    grid: &'a Grid,
    inner: crate::geom::RangeIter,
}

impl Iterator for GridIter<'_> {
    type Item = (Point, Cell);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let p = self.inner.next()?;
        Some((p, self.grid.at(p)))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

// ---------------------------------------------------------------------------
// Frame / FrameCell / compute_frame
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameCell {
    pub cell: Cell,
    pub pos: Point,
}

/// A set of cell changes (a diff frame).
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub cells: Vec<FrameCell>,
    pub width: i32,
    pub height: i32,
}

/// Compute the difference between two same-sized grids.
///
/// Returns a [`Frame`] containing only the cells that differ.
pub fn compute_frame(prev: &Grid, curr: &Grid) -> Frame {
    let bounds = curr.bounds();
    let mut cells = Vec::new();
    for p in bounds.iter() {
        if prev.at(p) != curr.at(p) {
            cells.push(FrameCell {
                cell: curr.at(p),
                pos: p,
            });
        }
    }
    Frame {
        cells,
        width: bounds.width(),
        height: bounds.height(),
    }
}
