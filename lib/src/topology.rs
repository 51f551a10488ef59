//! Bounded grids.
//!
//! A bounded grid restricts the universe to a rectangle. On a plane the
//! cells outside the rectangle are always dead. On a torus the opposite
//! edges are glued together.
//!
//! Both are handled by preparing the ring of `r` cells around the
//! rectangle before counting: it is cleared for a plane, and filled with
//! wrapped copies of the content for a torus.

use crate::{bbox::BoundingBox, error::Error, grid::Grid};
use educe::Educe;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The topology of a bounded grid.
#[derive(Clone, Copy, Debug, Educe, PartialEq, Eq, Hash)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Topology {
    /// Cells outside the rectangle are dead.
    #[educe(Default)]
    Plane,
    /// Opposite edges are glued together.
    Torus,
}

/// A bounded grid, in public coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundedGrid {
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: Topology,
    pub left: i32,
    pub bottom: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundedGrid {
    pub fn new(kind: Topology, left: i32, bottom: i32, width: i32, height: i32) -> Self {
        BoundedGrid {
            kind,
            left,
            bottom,
            width,
            height,
        }
    }

    /// A bounded grid of the given size, centred on the origin.
    pub fn centred(kind: Topology, width: i32, height: i32) -> Self {
        BoundedGrid::new(kind, -width / 2, -height / 2, width, height)
    }

    /// Checks that the size is positive.
    pub fn validate(&self) -> Result<(), Error> {
        if self.width > 0 && self.height > 0 {
            Ok(())
        } else {
            Err(Error::NonPositiveError)
        }
    }

    /// The rectangle, in public coordinates.
    pub fn rect(&self) -> BoundingBox {
        BoundingBox::with_size(self.left, self.bottom, self.width, self.height)
    }

    /// Whether opposite edges are glued together.
    pub fn is_torus(&self) -> bool {
        self.kind == Topology::Torus
    }

    /// Prepares the ring of `r` cells around the rectangle before counting.
    ///
    /// `rect` is the rectangle in grid coordinates; the ring must lie in the grid.
    pub(crate) fn prepare(&self, grid: &mut Grid, rect: BoundingBox, r: i32) {
        debug_assert_eq!(
            rect.expand(r).intersect(grid.bounds()),
            Some(rect.expand(r))
        );
        match self.kind {
            Topology::Plane => {
                for part in ring(rect, r) {
                    grid.clear_box(part);
                }
            }
            Topology::Torus => wrap(grid, rect, r),
        }
    }

    /// Cleans up the ring after the generation.
    pub(crate) fn finish(&self, grid: &mut Grid, rect: BoundingBox, r: i32) {
        if self.is_torus() {
            for part in ring(rect, r) {
                grid.clear_box(part);
            }
        }
    }
}

/// The four parts of the ring of `r` cells around `rect`.
fn ring(rect: BoundingBox, r: i32) -> [BoundingBox; 4] {
    let outer = rect.expand(r);
    [
        BoundingBox {
            max_y: rect.min_y - 1,
            ..outer
        },
        BoundingBox {
            min_y: rect.max_y + 1,
            ..outer
        },
        BoundingBox {
            min_x: outer.min_x,
            max_x: rect.min_x - 1,
            ..rect
        },
        BoundingBox {
            min_x: rect.max_x + 1,
            max_x: outer.max_x,
            ..rect
        },
    ]
}

/// Fills the ring with the wrapped content of `rect`.
///
/// Works for any size of `rect`, even when it is smaller than `r`.
fn wrap(grid: &mut Grid, rect: BoundingBox, r: i32) {
    let (w, h) = (rect.width(), rect.height());
    let wrap_x = |gx: i32| rect.min_x + (gx - rect.min_x).rem_euclid(w);
    let wrap_y = |gy: i32| rect.min_y + (gy - rect.min_y).rem_euclid(h);

    // Left and right parts first, then whole rows above and below.
    for gy in rect.min_y..=rect.max_y {
        for d in 1..=r {
            for gx in [rect.min_x - d, rect.max_x + d] {
                let state = grid.state(wrap_x(gx), gy);
                grid.set_state(gx, gy, state);
            }
        }
    }
    let outer = rect.expand(r);
    for d in 1..=r {
        for gy in [rect.min_y - d, rect.max_y + d] {
            grid.copy_states(outer.min_x, outer.max_x, wrap_y(gy), gy);
        }
    }
}
