//! The cell grid.

use crate::{bbox::BoundingBox, cells::Coord, error::Error};
use tracing::debug;

/// The largest allowed width or height of a grid.
pub const MAX_GRID_SIZE: i32 = 1 << 15;

/// A finite window of the infinite plane.
///
/// It holds two byte planes of the same extent: the simulation state of
/// every cell, and its display history mark. The marks are only written by
/// the history table and never read by the simulation.
///
/// Cells are stored row by row, row 0 at the bottom. Grid coordinates
/// `(gx, gy)` relate to public coordinates `(x, y)` by
/// `(gx, gy) = (x + origin.0, y + origin.1)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
    origin: Coord,
    states: Vec<u8>,
    marks: Vec<u8>,
}

impl Grid {
    /// A new empty grid, with the public origin at its centre.
    pub fn new(width: i32, height: i32) -> Self {
        debug_assert!(0 < width && width <= MAX_GRID_SIZE);
        debug_assert!(0 < height && height <= MAX_GRID_SIZE);
        let size = width as usize * height as usize;
        Grid {
            width,
            height,
            origin: (width / 2, height / 2),
            states: vec![0; size],
            marks: vec![0; size],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Grid coordinates of the public origin.
    pub fn origin(&self) -> Coord {
        self.origin
    }

    /// Converts public coordinates to grid coordinates.
    #[inline]
    pub fn to_grid(&self, (x, y): Coord) -> Coord {
        (x + self.origin.0, y + self.origin.1)
    }

    /// Converts grid coordinates to public coordinates.
    #[inline]
    pub fn to_public(&self, (gx, gy): Coord) -> Coord {
        (gx - self.origin.0, gy - self.origin.1)
    }

    /// Converts a box in grid coordinates to public coordinates.
    pub fn box_to_public(&self, bbox: BoundingBox) -> BoundingBox {
        bbox.translate(-self.origin.0, -self.origin.1)
    }

    /// Converts a box in public coordinates to grid coordinates.
    pub fn box_to_grid(&self, bbox: BoundingBox) -> BoundingBox {
        bbox.translate(self.origin.0, self.origin.1)
    }

    /// The whole grid, in grid coordinates.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::with_size(0, 0, self.width, self.height)
    }

    /// The grid without a margin of `r` cells, in grid coordinates.
    pub fn interior(&self, r: i32) -> Option<BoundingBox> {
        (self.width > 2 * r && self.height > 2 * r)
            .then(|| BoundingBox::with_size(r, r, self.width - 2 * r, self.height - 2 * r))
    }

    /// Whether the grid coordinates lie in the grid.
    #[inline]
    pub fn contains(&self, (gx, gy): Coord) -> bool {
        0 <= gx && gx < self.width && 0 <= gy && gy < self.height
    }

    #[inline]
    pub(crate) fn index(&self, gx: i32, gy: i32) -> usize {
        debug_assert!(self.contains((gx, gy)));
        gy as usize * self.width as usize + gx as usize
    }

    /// State of the cell at grid coordinates.
    #[inline]
    pub fn state(&self, gx: i32, gy: i32) -> u8 {
        self.states[self.index(gx, gy)]
    }

    #[inline]
    pub fn set_state(&mut self, gx: i32, gy: i32, state: u8) {
        let index = self.index(gx, gy);
        self.states[index] = state;
    }

    /// History mark of the cell at grid coordinates.
    #[inline]
    pub fn mark(&self, gx: i32, gy: i32) -> u8 {
        self.marks[self.index(gx, gy)]
    }

    #[inline]
    pub fn set_mark(&mut self, gx: i32, gy: i32, mark: u8) {
        let index = self.index(gx, gy);
        self.marks[index] = mark;
    }

    /// States of the cells `x_min..=x_max` of row `gy`.
    #[inline]
    pub fn states_row(&self, x_min: i32, x_max: i32, gy: i32) -> &[u8] {
        let start = self.index(x_min, gy);
        &self.states[start..=start + (x_max - x_min) as usize]
    }

    /// States and marks of the cells `x_min..=x_max` of row `gy`, mutably.
    #[inline]
    pub(crate) fn row_mut(&mut self, x_min: i32, x_max: i32, gy: i32) -> (&mut [u8], &mut [u8]) {
        let start = self.index(x_min, gy);
        let end = start + (x_max - x_min) as usize;
        (&mut self.states[start..=end], &mut self.marks[start..=end])
    }

    /// Copies the states of the cells `x_min..=x_max` from row `from` to row `to`.
    pub(crate) fn copy_states(&mut self, x_min: i32, x_max: i32, from: i32, to: i32) {
        let src = self.index(x_min, from);
        let dst = self.index(x_min, to);
        let len = (x_max - x_min + 1) as usize;
        self.states.copy_within(src..src + len, dst);
    }

    /// Kills every cell and erases all marks.
    pub fn clear(&mut self) {
        self.states.fill(0);
        self.marks.fill(0);
    }

    /// Kills the cells of a box in grid coordinates, and erases their marks.
    pub(crate) fn clear_box(&mut self, bbox: BoundingBox) {
        if let Some(bbox) = bbox.intersect(self.bounds()) {
            for gy in bbox.min_y..=bbox.max_y {
                let (states, marks) = self.row_mut(bbox.min_x, bbox.max_x, gy);
                states.fill(0);
                marks.fill(0);
            }
        }
    }

    /// Resizes the grid, keeping its content centred.
    ///
    /// Cells that no longer fit are dropped. The origin moves with the
    /// content, so public coordinates of the kept cells do not change.
    pub fn resize(&mut self, width: i32, height: i32) {
        debug_assert!(0 < width && width <= MAX_GRID_SIZE);
        debug_assert!(0 < height && height <= MAX_GRID_SIZE);
        let dx = (width - self.width) / 2;
        let dy = (height - self.height) / 2;
        let size = width as usize * height as usize;
        let mut states = vec![0; size];
        let mut marks = vec![0; size];

        let new_bounds = BoundingBox::with_size(0, 0, width, height);
        if let Some(kept) = self.bounds().translate(dx, dy).intersect(new_bounds) {
            let len = kept.width() as usize;
            for gy in kept.min_y..=kept.max_y {
                let src = self.index(kept.min_x - dx, gy - dy);
                let dst = gy as usize * width as usize + kept.min_x as usize;
                states[dst..dst + len].copy_from_slice(&self.states[src..src + len]);
                marks[dst..dst + len].copy_from_slice(&self.marks[src..src + len]);
            }
        }

        debug!(
            old_width = self.width,
            old_height = self.height,
            width,
            height,
            "Grid resized"
        );

        self.width = width;
        self.height = height;
        self.origin = (self.origin.0 + dx, self.origin.1 + dy);
        self.states = states;
        self.marks = marks;
    }

    /// Grows the grid until it contains the given box in public coordinates.
    ///
    /// Each dimension that does not fit is doubled, up to `max_size`, which
    /// is itself capped at [`MAX_GRID_SIZE`].
    pub fn grow_to_fit(&mut self, bbox: BoundingBox, max_size: i32) -> Result<(), Error> {
        let max_size = max_size.min(MAX_GRID_SIZE);
        loop {
            let target = self.box_to_grid(bbox);
            let fits_x = target.min_x >= 0 && target.max_x < self.width;
            let fits_y = target.min_y >= 0 && target.max_y < self.height;
            if fits_x && fits_y {
                return Ok(());
            }
            let width = if fits_x {
                self.width
            } else {
                (self.width * 2).min(max_size)
            };
            let height = if fits_y {
                self.height
            } else {
                (self.height * 2).min(max_size)
            };
            if width <= self.width && height <= self.height {
                return Err(Error::GridTooLargeError(max_size as u32));
            }
            self.resize(width.max(self.width), height.max(self.height));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_keeps_coordinates() {
        let mut grid = Grid::new(8, 6);
        let (gx, gy) = grid.to_grid((2, -3));
        grid.set_state(gx, gy, 1);
        grid.set_mark(gx, gy, 5);
        grid.resize(20, 13);
        assert_eq!(grid.width(), 20);
        assert_eq!(grid.height(), 13);
        let (gx, gy) = grid.to_grid((2, -3));
        assert_eq!(grid.state(gx, gy), 1);
        assert_eq!(grid.mark(gx, gy), 5);
        assert_eq!(grid.states.iter().filter(|&&s| s != 0).count(), 1);
    }

    #[test]
    fn grow() -> Result<(), Error> {
        let mut grid = Grid::new(16, 16);
        grid.grow_to_fit(BoundingBox::with_size(-20, 0, 5, 5), 1024)?;
        assert_eq!(grid.width(), 64);
        assert_eq!(grid.height(), 16);
        assert!(grid.contains(grid.to_grid((-20, 4))));
        assert_eq!(
            grid.grow_to_fit(BoundingBox::with_size(0, 0, 40000, 1), i32::MAX),
            Err(Error::GridTooLargeError(MAX_GRID_SIZE as u32))
        );
        assert_eq!(
            grid.grow_to_fit(BoundingBox::with_size(0, 0, 2000, 1), 1024),
            Err(Error::GridTooLargeError(1024))
        );
        Ok(())
    }

    #[test]
    fn rows() {
        let mut grid = Grid::new(5, 3);
        grid.set_state(1, 2, 3);
        grid.set_state(3, 2, 1);
        assert_eq!(grid.states_row(0, 4, 2), &[0, 3, 0, 1, 0]);
        grid.clear_box(BoundingBox::with_size(2, 1, 10, 10));
        assert_eq!(grid.states_row(0, 4, 2), &[0, 3, 0, 0, 0]);
        grid.clear();
        assert_eq!(grid.states_row(0, 4, 2), &[0; 5]);
    }
}
