//! Bounding boxes.

use crate::cells::Coord;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle of cells. All bounds are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl BoundingBox {
    /// The box from the bottom-left corner `(left, bottom)` with the given size.
    ///
    /// `width` and `height` must be positive.
    pub fn with_size(left: i32, bottom: i32, width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0);
        BoundingBox {
            min_x: left,
            max_x: left + width - 1,
            min_y: bottom,
            max_y: bottom + height - 1,
        }
    }

    /// The box containing a single cell.
    pub fn cell((x, y): Coord) -> Self {
        BoundingBox {
            min_x: x,
            max_x: x,
            min_y: y,
            max_y: y,
        }
    }

    pub fn width(&self) -> i32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y + 1
    }

    pub fn contains(&self, (x, y): Coord) -> bool {
        self.min_x <= x && x <= self.max_x && self.min_y <= y && y <= self.max_y
    }

    /// Grows the box by `r` cells in all four directions.
    pub fn expand(self, r: i32) -> Self {
        BoundingBox {
            min_x: self.min_x - r,
            max_x: self.max_x + r,
            min_y: self.min_y - r,
            max_y: self.max_y + r,
        }
    }

    /// Moves the box by `(dx, dy)`.
    pub fn translate(self, dx: i32, dy: i32) -> Self {
        BoundingBox {
            min_x: self.min_x + dx,
            max_x: self.max_x + dx,
            min_y: self.min_y + dy,
            max_y: self.max_y + dy,
        }
    }

    /// The smallest box containing both.
    pub fn union(self, other: Self) -> Self {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// The overlap of both boxes, if any.
    pub fn intersect(self, other: Self) -> Option<Self> {
        let bbox = BoundingBox {
            min_x: self.min_x.max(other.min_x),
            max_x: self.max_x.min(other.max_x),
            min_y: self.min_y.max(other.min_y),
            max_y: self.max_y.min(other.max_y),
        };
        (bbox.min_x <= bbox.max_x && bbox.min_y <= bbox.max_y).then(|| bbox)
    }
}

/// Union of two optional boxes.
pub(crate) fn union(a: Option<BoundingBox>, b: Option<BoundingBox>) -> Option<BoundingBox> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.union(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

/// Keeps the running extent of the cells seen during a pass.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BoxTracker {
    min_x: i32,
    max_x: i32,
    min_y: i32,
    max_y: i32,
}

impl BoxTracker {
    pub(crate) fn new() -> Self {
        BoxTracker {
            min_x: i32::MAX,
            max_x: i32::MIN,
            min_y: i32::MAX,
            max_y: i32::MIN,
        }
    }

    #[inline]
    pub(crate) fn include(&mut self, x: i32, y: i32) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    pub(crate) fn finish(self) -> Option<BoundingBox> {
        (self.min_x <= self.max_x).then(|| BoundingBox {
            min_x: self.min_x,
            max_x: self.max_x,
            min_y: self.min_y,
            max_y: self.max_y,
        })
    }
}
