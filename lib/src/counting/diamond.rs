//! Summed-area table in diagonal coordinates, for von Neumann neighborhoods.
//!
//! A cell `(i, j)` of a tile is moved to `(u, v) = (i + j, i - j + h - 1)`,
//! where `h` is the height of the tile. The diamond of radius `r` around
//! `(i, j)` then becomes the square `[u - r, u + r] × [v - r, v + r]`,
//! minus the cells with `u + v` of the wrong parity, which are never
//! occupied. So one summed-area lookup counts a whole diamond.
//!
//! The rotated table has `(w + h)²` entries for a `w × h` tile, so the
//! region is processed in square tiles.

use super::Padded;

/// Side of the tiles, in counted cells.
pub(super) fn tile_size(radius: usize) -> usize {
    (4 * radius).max(128)
}

pub(super) fn count(input: &Padded, tile: usize, table: &mut Vec<u32>, counts: &mut [u32]) {
    let width = input.inner_width();
    let height = input.inner_height();
    for y0 in (0..height).step_by(tile) {
        for x0 in (0..width).step_by(tile) {
            let tile_width = tile.min(width - x0);
            let tile_height = tile.min(height - y0);
            count_tile(input, (x0, y0), (tile_width, tile_height), table, counts);
        }
    }
}

/// Counts the cells `x0..x0 + tile_width` of rows `y0..y0 + tile_height`
/// of the counted region.
fn count_tile(
    input: &Padded,
    (x0, y0): (usize, usize),
    (tile_width, tile_height): (usize, usize),
    table: &mut Vec<u32>,
    counts: &mut [u32],
) {
    let r = input.radius;
    // The padded tile.
    let w = tile_width + 2 * r;
    let h = tile_height + 2 * r;
    let n = w + h - 1;
    let stride = n + 1;
    table.clear();
    table.resize(stride * stride, 0);

    for j in 0..h {
        let row = &input.row(y0 + j)[x0..x0 + w];
        for (i, &cell) in row.iter().enumerate() {
            if cell != 0 {
                let (u, v) = (i + j, i + h - 1 - j);
                table[(u + 1) * stride + v + 1] = 1;
            }
        }
    }

    for u in 1..=n {
        let mut row_sum = 0;
        for v in 1..=n {
            row_sum += table[u * stride + v];
            table[u * stride + v] = table[(u - 1) * stride + v] + row_sum;
        }
    }

    let inner_width = input.inner_width();
    for cy in 0..tile_height {
        let out = &mut counts[(y0 + cy) * inner_width + x0..][..tile_width];
        for (cx, count) in out.iter_mut().enumerate() {
            let (i, j) = (cx + r, cy + r);
            let (u, v) = (i + j, i + h - 1 - j);
            let low = (u - r) * stride;
            let high = (u + r + 1) * stride;
            *count = table[high + v + r + 1] + table[low + v - r]
                - table[low + v + r + 1]
                - table[high + v - r];
        }
    }
}
