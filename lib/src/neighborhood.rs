//! Neighborhoods of arbitrary range.
//!
//! Every supported neighborhood is symmetric and convex along rows, so it
//! is fully described by its half-width at each vertical offset.

use crate::error::Error;
use educe::Educe;
use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The shape of a neighborhood.
#[derive(Clone, Copy, Debug, Educe, PartialEq, Eq, Hash)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Shape {
    /// `M`.
    ///
    /// Moore neighborhood: all cells within Chebyshev distance `r`.
    #[educe(Default)]
    #[cfg_attr(feature = "serde", serde(rename = "M"))]
    Square,
    /// `N`.
    ///
    /// von Neumann neighborhood: all cells within Manhattan distance `r`.
    #[cfg_attr(feature = "serde", serde(rename = "N"))]
    Diamond,
    /// `C`.
    ///
    /// Circular neighborhood: cells `(x, y)` with `x² + y² ≤ r² + r`.
    #[cfg_attr(feature = "serde", serde(rename = "C"))]
    Circle,
    /// `2`.
    ///
    /// Euclidean neighborhood: cells `(x, y)` with `x² + y² ≤ r²`.
    #[cfg_attr(feature = "serde", serde(rename = "2"))]
    L2,
}

impl FromStr for Shape {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Shape::Square),
            "N" => Ok(Shape::Diamond),
            "C" => Ok(Shape::Circle),
            "2" => Ok(Shape::L2),
            _ => Err(String::from("invalid Shape")),
        }
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Shape::Square => "M",
            Shape::Diamond => "N",
            Shape::Circle => "C",
            Shape::L2 => "2",
        };
        write!(f, "{}", s)
    }
}

/// A neighborhood descriptor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Neighborhood {
    shape: Shape,
    radius: u32,
    /// Half-width of the neighborhood at vertical offset `k`, for `k` in `0..=radius`.
    ///
    /// Offset `-k` has the same half-width as `k`.
    widths: Vec<u32>,
    /// Number of cells in the neighborhood, the centre included.
    size: u32,
}

impl Neighborhood {
    /// Builds the descriptor of the given shape and range.
    pub fn new(shape: Shape, radius: u32) -> Result<Self, Error> {
        if radius == 0 {
            return Err(Error::ZeroRangeError);
        }
        Ok(Neighborhood::build(shape, radius))
    }

    /// Builds the descriptor of a range known to be positive.
    pub(crate) fn build(shape: Shape, radius: u32) -> Self {
        debug_assert!(radius > 0);
        let r = radius as u64;
        let widths: Vec<u32> = (0..=r)
            .map(|k| match shape {
                Shape::Square => r,
                Shape::Diamond => r - k,
                Shape::Circle => isqrt(r * r + r - k * k),
                Shape::L2 => isqrt(r * r - k * k),
            })
            .map(|w| w as u32)
            .collect();
        let size = widths[0] * 2 + 1 + widths[1..].iter().map(|w| (w * 2 + 1) * 2).sum::<u32>();
        Neighborhood {
            shape,
            radius,
            widths,
            size,
        }
    }

    /// The shape.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// The range.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Half-width at vertical offset `k`.
    #[inline]
    pub fn width(&self, k: i32) -> u32 {
        self.widths[k.unsigned_abs() as usize]
    }

    /// Half-widths for the offsets `0..=radius`.
    pub fn widths(&self) -> &[u32] {
        &self.widths
    }

    /// Number of cells in the neighborhood, the centre included.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Whether the offset `(dx, dy)` lies in the neighborhood.
    pub fn contains(&self, dx: i32, dy: i32) -> bool {
        dy.unsigned_abs() <= self.radius && dx.unsigned_abs() <= self.width(dy)
    }
}

/// Integer square root, rounded down.
fn isqrt(n: u64) -> u64 {
    let mut x = (n as f64).sqrt() as u64;
    while x * x > n {
        x -= 1;
    }
    while (x + 1) * (x + 1) <= n {
        x += 1;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brute_size(nbhd: &Neighborhood) -> u32 {
        let r = nbhd.radius() as i32;
        let mut size = 0;
        for dy in -r..=r {
            for dx in -r..=r {
                if nbhd.contains(dx, dy) {
                    size += 1;
                }
            }
        }
        size
    }

    #[test]
    fn widths() -> Result<(), Error> {
        for r in 1..=20 {
            for shape in [Shape::Square, Shape::Diamond, Shape::Circle, Shape::L2] {
                let nbhd = Neighborhood::new(shape, r)?;
                assert_eq!(nbhd.width(0), r);
                assert_eq!(nbhd.widths().len(), r as usize + 1);
                assert_eq!(nbhd.size(), brute_size(&nbhd));
                for k in 1..=r as i32 {
                    assert_eq!(nbhd.width(k), nbhd.width(-k));
                    assert!(nbhd.width(k) <= nbhd.width(k - 1));
                }
            }
        }
        Ok(())
    }

    #[test]
    fn sizes() -> Result<(), Error> {
        assert_eq!(Neighborhood::new(Shape::Square, 1)?.size(), 9);
        assert_eq!(Neighborhood::new(Shape::Square, 5)?.size(), 121);
        assert_eq!(Neighborhood::new(Shape::Diamond, 1)?.size(), 5);
        assert_eq!(Neighborhood::new(Shape::Diamond, 2)?.size(), 13);
        assert_eq!(Neighborhood::new(Shape::Circle, 1)?.size(), 9);
        assert_eq!(Neighborhood::new(Shape::L2, 1)?.size(), 5);
        Ok(())
    }

    #[test]
    fn circle() -> Result<(), Error> {
        let nbhd = Neighborhood::new(Shape::Circle, 3)?;
        // 3² + 3 = 12
        assert_eq!(nbhd.widths(), &[3, 3, 2, 1]);
        let nbhd = Neighborhood::new(Shape::L2, 3)?;
        assert_eq!(nbhd.widths(), &[3, 2, 2, 0]);
        Ok(())
    }

    #[test]
    fn zero_range() {
        assert_eq!(
            Neighborhood::new(Shape::Square, 0),
            Err(Error::ZeroRangeError)
        );
    }

    #[test]
    fn shape_str() {
        for shape in [Shape::Square, Shape::Diamond, Shape::Circle, Shape::L2] {
            assert_eq!(shape.to_string().parse::<Shape>(), Ok(shape));
        }
        assert!("X".parse::<Shape>().is_err());
    }
}
