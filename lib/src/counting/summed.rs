//! Summed-area table, for Moore neighborhoods.

use super::Padded;

pub(super) fn count(input: &Padded, table: &mut Vec<u32>, counts: &mut [u32]) {
    let table_width = input.width + 1;
    table.clear();
    table.resize(table_width * (input.height + 1), 0);

    // table[(j + 1) * table_width + i + 1] is the number of living cells
    // in the rectangle from (0, 0) to (i, j).
    for j in 0..input.height {
        let mut row_sum = 0;
        for (i, &cell) in input.row(j).iter().enumerate() {
            row_sum += u32::from(cell);
            table[(j + 1) * table_width + i + 1] = table[j * table_width + i + 1] + row_sum;
        }
    }

    let side = 2 * input.radius + 1;
    let width = input.inner_width();
    for (cy, row) in counts.chunks_exact_mut(width).enumerate() {
        let low = cy * table_width;
        let high = (cy + side) * table_width;
        for (cx, count) in row.iter_mut().enumerate() {
            *count = table[high + cx + side] + table[low + cx]
                - table[low + cx + side]
                - table[high + cx];
        }
    }
}
