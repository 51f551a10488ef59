//! Sliding window along each row.
//!
//! Moving one cell to the right, each row of the neighborhood gains one
//! cell on the right and loses one on the left.

use super::Padded;
use crate::neighborhood::Neighborhood;

/// `spans` is a scratch buffer kept between calls.
pub(super) fn count(
    input: &Padded,
    nbhd: &Neighborhood,
    spans: &mut Vec<usize>,
    counts: &mut [u32],
) {
    let r = input.radius;
    // Half-width of the k-th row of the neighborhood, from the bottom.
    spans.clear();
    spans.extend((-(r as i32)..=r as i32).map(|dy| nbhd.width(dy) as usize));
    let width = input.inner_width();

    for (cy, out) in counts.chunks_exact_mut(width).enumerate() {
        let mut sum: u32 = spans
            .iter()
            .enumerate()
            .map(|(k, &w)| {
                input.row(cy + k)[r - w..=r + w]
                    .iter()
                    .map(|&c| u32::from(c))
                    .sum::<u32>()
            })
            .sum();
        out[0] = sum;

        for (cx, count) in out.iter_mut().enumerate().skip(1) {
            let i = cx + r;
            for (k, &w) in spans.iter().enumerate() {
                let row = input.row(cy + k);
                sum += u32::from(row[i + w]);
                sum -= u32::from(row[i - w - 1]);
            }
            *count = sum;
        }
    }
}
