//! Counting living neighbors.
//!
//! All algorithms first copy the region to be counted, expanded by the
//! range, into a padded buffer of `0`s and `1`s, then compute the
//! number of living cells in the neighborhood of every cell of the region.
//! Counts include the cell itself.
//!
//! - [`Algorithm::SummedArea`] works for Moore neighborhoods, in O(1) per cell.
//! - [`Algorithm::Diamond`] works for von Neumann neighborhoods, in O(1)
//!   per cell. It is only chosen above [`DIAMOND_THRESHOLD`].
//! - [`Algorithm::SlidingWindow`] works for all neighborhoods, in O(r) per cell.
//! - [`Algorithm::Direct`] works for all neighborhoods, in O(r²) per cell.

mod diamond;
mod direct;
mod summed;
mod window;

use crate::{
    bbox::BoundingBox,
    grid::Grid,
    neighborhood::{Neighborhood, Shape},
};
use educe::Educe;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Von Neumann neighborhoods of larger ranges are counted with
/// [`Algorithm::Diamond`] instead of [`Algorithm::SlidingWindow`].
pub const DIAMOND_THRESHOLD: u32 = 6;

/// Algorithms to count living neighbors.
#[derive(Clone, Copy, Debug, Educe, PartialEq, Eq, Hash)]
#[educe(Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Algorithm {
    /// Chooses an algorithm from the neighborhood.
    #[educe(Default)]
    Auto,
    /// Summed-area table. Moore neighborhoods only.
    SummedArea,
    /// Summed-area table in diagonal coordinates. Von Neumann neighborhoods only.
    Diamond,
    /// Sliding window along each row.
    SlidingWindow,
    /// Counts every cell of every neighborhood.
    Direct,
}

impl Algorithm {
    /// The algorithm actually used for the neighborhood.
    ///
    /// Falls back to the automatic choice when the requested algorithm
    /// does not support the shape of the neighborhood.
    pub fn resolve(self, nbhd: &Neighborhood) -> Self {
        match (self, nbhd.shape()) {
            (Algorithm::SummedArea, Shape::Square)
            | (Algorithm::Diamond, Shape::Diamond)
            | (Algorithm::SlidingWindow, _)
            | (Algorithm::Direct, _) => self,
            (_, Shape::Square) => Algorithm::SummedArea,
            (_, Shape::Diamond) if nbhd.radius() > DIAMOND_THRESHOLD => Algorithm::Diamond,
            _ => Algorithm::SlidingWindow,
        }
    }
}

/// The padded input of the counting algorithms.
///
/// A `width × height` row-major buffer of `0`s and `1`s; the region to be
/// counted is the buffer without a margin of `radius` cells.
struct Padded<'a> {
    cells: &'a [u8],
    width: usize,
    height: usize,
    radius: usize,
}

impl<'a> Padded<'a> {
    fn row(&self, j: usize) -> &'a [u8] {
        &self.cells[j * self.width..(j + 1) * self.width]
    }

    /// Width of the counted region.
    fn inner_width(&self) -> usize {
        self.width - 2 * self.radius
    }

    /// Height of the counted region.
    fn inner_height(&self) -> usize {
        self.height - 2 * self.radius
    }
}

/// Neighbor counts of a rectangular region of the grid.
///
/// The buffers are kept between generations and only reallocated when a
/// larger region is counted.
#[derive(Clone, Debug, Default)]
pub struct CountGrid {
    region: Option<BoundingBox>,
    width: usize,
    padded: Vec<u8>,
    table: Vec<u32>,
    spans: Vec<usize>,
    counts: Vec<u32>,
}

impl CountGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the cells in state `alive` in the neighborhood of every cell
    /// of `region`.
    ///
    /// `region` is in grid coordinates. It must stay at least `radius` cells
    /// away from the edges of the grid.
    pub fn fill(
        &mut self,
        grid: &Grid,
        alive: u8,
        nbhd: &Neighborhood,
        algorithm: Algorithm,
        region: BoundingBox,
    ) {
        let r = nbhd.radius() as i32;
        let outer = region.expand(r);
        debug_assert_eq!(
            outer.intersect(grid.bounds()),
            Some(outer),
            "counted region too close to the edge of the grid"
        );

        self.padded.clear();
        for gy in outer.min_y..=outer.max_y {
            self.padded.extend(
                grid.states_row(outer.min_x, outer.max_x, gy)
                    .iter()
                    .map(|&state| u8::from(state == alive)),
            );
        }

        let width = region.width() as usize;
        self.counts.clear();
        self.counts.resize(width * region.height() as usize, 0);

        let input = Padded {
            cells: &self.padded,
            width: outer.width() as usize,
            height: outer.height() as usize,
            radius: r as usize,
        };
        match algorithm.resolve(nbhd) {
            Algorithm::SummedArea => summed::count(&input, &mut self.table, &mut self.counts),
            Algorithm::Diamond => diamond::count(
                &input,
                diamond::tile_size(r as usize),
                &mut self.table,
                &mut self.counts,
            ),
            Algorithm::SlidingWindow => {
                window::count(&input, nbhd, &mut self.spans, &mut self.counts)
            }
            Algorithm::Direct | Algorithm::Auto => direct::count(&input, nbhd, &mut self.counts),
        }

        self.region = Some(region);
        self.width = width;
    }

    /// The region counted by the last [`fill`](Self::fill).
    pub fn region(&self) -> Option<BoundingBox> {
        self.region
    }

    /// The count of a cell of the region, in grid coordinates.
    pub fn get(&self, gx: i32, gy: i32) -> u32 {
        self.row(gy)[(gx - self.origin().0) as usize]
    }

    /// The counts of a row of the region, in grid coordinates.
    #[inline]
    pub fn row(&self, gy: i32) -> &[u32] {
        let j = (gy - self.origin().1) as usize;
        &self.counts[j * self.width..(j + 1) * self.width]
    }

    fn origin(&self) -> (i32, i32) {
        self.region
            .map_or((0, 0), |region| (region.min_x, region.min_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    const SHAPES: [Shape; 4] = [Shape::Square, Shape::Diamond, Shape::Circle, Shape::L2];

    /// A grid with random states `0..=2`, where `2` is alive.
    fn random_grid(rng: &mut StdRng, width: i32, height: i32) -> Grid {
        let mut grid = Grid::new(width, height);
        for gy in 0..height {
            for gx in 0..width {
                let state = match rng.gen_range(0..10) {
                    0..=3 => 2,
                    4 => 1,
                    _ => 0,
                };
                grid.set_state(gx, gy, state);
            }
        }
        grid
    }

    /// Counts by looking at every offset of the bounding square.
    fn brute_force(grid: &Grid, nbhd: &Neighborhood, gx: i32, gy: i32) -> u32 {
        let r = nbhd.radius() as i32;
        let mut count = 0;
        for dy in -r..=r {
            for dx in -r..=r {
                if nbhd.contains(dx, dy) && grid.state(gx + dx, gy + dy) == 2 {
                    count += 1;
                }
            }
        }
        count
    }

    fn check(grid: &Grid, nbhd: &Neighborhood, algorithm: Algorithm, region: BoundingBox) {
        let mut counts = CountGrid::new();
        counts.fill(grid, 2, nbhd, algorithm, region);
        for gy in region.min_y..=region.max_y {
            for gx in region.min_x..=region.max_x {
                assert_eq!(
                    counts.get(gx, gy),
                    brute_force(grid, nbhd, gx, gy),
                    "{:?} {:?} r = {} at {:?}",
                    algorithm,
                    nbhd.shape(),
                    nbhd.radius(),
                    (gx, gy)
                );
            }
        }
    }

    #[test]
    fn all_algorithms_match_brute_force() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for r in 1..=20 {
            let width = 2 * r + 23 + rng.gen_range(0..5);
            let height = 2 * r + 17 + rng.gen_range(0..5);
            let grid = random_grid(&mut rng, width, height);
            let left = r + rng.gen_range(0..=width - 2 * r - 23);
            let bottom = r + rng.gen_range(0..=height - 2 * r - 17);
            let region = BoundingBox::with_size(left, bottom, 23, 17);
            for shape in SHAPES {
                let nbhd = Neighborhood::new(shape, r as u32).unwrap();
                for algorithm in [
                    Algorithm::Auto,
                    Algorithm::SummedArea,
                    Algorithm::Diamond,
                    Algorithm::SlidingWindow,
                    Algorithm::Direct,
                ] {
                    check(&grid, &nbhd, algorithm, region);
                }
            }
        }
    }

    #[test]
    fn diamond_tiles() {
        let mut rng = StdRng::seed_from_u64(42);
        for r in [1, 3, 7, 12] {
            let nbhd = Neighborhood::new(Shape::Diamond, r).unwrap();
            let r = r as usize;
            let (cw, ch) = (31, 19);
            let (pw, ph) = (cw + 2 * r, ch + 2 * r);
            let cells: Vec<u8> = (0..pw * ph).map(|_| rng.gen_range(0..2)).collect();
            let input = Padded {
                cells: &cells,
                width: pw,
                height: ph,
                radius: r,
            };
            let mut expected = vec![0; cw * ch];
            direct::count(&input, &nbhd, &mut expected);
            for tile in [1, 4, 5, 16, 64] {
                let mut table = Vec::new();
                let mut counts = vec![0; cw * ch];
                diamond::count(&input, tile, &mut table, &mut counts);
                assert_eq!(counts, expected, "r = {}, tile = {}", r, tile);
            }
        }
    }

    #[test]
    fn single_cell_region() {
        let mut grid = Grid::new(9, 9);
        for (gx, gy) in [(4, 4), (2, 4), (4, 7), (1, 1)] {
            grid.set_state(gx, gy, 2);
        }
        let region = BoundingBox::cell((4, 4));
        for shape in SHAPES {
            let nbhd = Neighborhood::new(shape, 3).unwrap();
            check(&grid, &nbhd, Algorithm::Auto, region);
        }
        let nbhd = Neighborhood::new(Shape::Square, 3).unwrap();
        let mut counts = CountGrid::new();
        counts.fill(&grid, 2, &nbhd, Algorithm::Auto, region);
        assert_eq!(counts.get(4, 4), 4);
        assert_eq!(counts.region(), Some(region));
    }

    #[test]
    fn buffers_are_reused() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = random_grid(&mut rng, 40, 30);
        let circle = Neighborhood::new(Shape::Circle, 4).unwrap();
        let square = Neighborhood::new(Shape::Square, 4).unwrap();
        let region = BoundingBox::with_size(5, 5, 28, 18);
        let mut counts = CountGrid::new();
        counts.fill(&grid, 2, &circle, Algorithm::SlidingWindow, region);
        counts.fill(&grid, 2, &square, Algorithm::SummedArea, region);
        let buffers = (
            counts.padded.as_ptr(),
            counts.table.as_ptr(),
            counts.spans.as_ptr(),
            counts.counts.as_ptr(),
        );
        for _ in 0..3 {
            counts.fill(&grid, 2, &circle, Algorithm::SlidingWindow, region);
            counts.fill(&grid, 2, &square, Algorithm::SummedArea, region.expand(-2));
        }
        assert_eq!(
            buffers,
            (
                counts.padded.as_ptr(),
                counts.table.as_ptr(),
                counts.spans.as_ptr(),
                counts.counts.as_ptr(),
            )
        );
    }

    #[test]
    fn resolve() {
        let square = Neighborhood::new(Shape::Square, 2).unwrap();
        let small_diamond = Neighborhood::new(Shape::Diamond, DIAMOND_THRESHOLD).unwrap();
        let diamond = Neighborhood::new(Shape::Diamond, DIAMOND_THRESHOLD + 1).unwrap();
        let circle = Neighborhood::new(Shape::Circle, 10).unwrap();
        assert_eq!(Algorithm::Auto.resolve(&square), Algorithm::SummedArea);
        assert_eq!(Algorithm::Auto.resolve(&small_diamond), Algorithm::SlidingWindow);
        assert_eq!(Algorithm::Auto.resolve(&diamond), Algorithm::Diamond);
        assert_eq!(Algorithm::Auto.resolve(&circle), Algorithm::SlidingWindow);
        assert_eq!(Algorithm::Diamond.resolve(&circle), Algorithm::SlidingWindow);
        assert_eq!(Algorithm::SummedArea.resolve(&diamond), Algorithm::Diamond);
        assert_eq!(Algorithm::Direct.resolve(&square), Algorithm::Direct);
    }
}
