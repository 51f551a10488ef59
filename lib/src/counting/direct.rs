//! Counts every cell of every neighborhood.

use super::Padded;
use crate::neighborhood::Neighborhood;

pub(super) fn count(input: &Padded, nbhd: &Neighborhood, counts: &mut [u32]) {
    let r = input.radius;
    let width = input.inner_width();
    for (cy, out) in counts.chunks_exact_mut(width).enumerate() {
        for (cx, count) in out.iter_mut().enumerate() {
            let i = cx + r;
            *count = (0..=2 * r)
                .map(|k| {
                    let w = nbhd.width(k as i32 - r as i32) as usize;
                    input.row(cy + k)[i - w..=i + w]
                        .iter()
                        .filter(|&&c| c != 0)
                        .count() as u32
                })
                .sum();
        }
    }
}
