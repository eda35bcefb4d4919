/// Codeword placement using the zigzag column-pair traversal
use super::function_mask::FunctionPatterns;
use crate::models::BitMatrix;

/// Data module coordinates (x, y) in placement order.
///
/// Column pairs are walked right to left starting at the bottom-right corner,
/// alternating upward and downward, stepping over the vertical timing column.
pub fn data_module_order(func: &FunctionPatterns) -> Vec<(usize, usize)> {
    let dimension = func.size();
    let mut order = Vec::with_capacity(func.data_modules_count());

    let mut upward = true;
    let mut col = dimension as isize - 1;

    while col > 0 {
        if col == 6 {
            col -= 1;
            continue;
        }

        let mut push_cell = |row: usize, c: usize| {
            if !func.is_function(c, row) {
                order.push((c, row));
            }
        };

        let c = col as usize;
        if upward {
            for row in (0..dimension).rev() {
                push_cell(row, c);
                push_cell(row, c - 1);
            }
        } else {
            for row in 0..dimension {
                push_cell(row, c);
                push_cell(row, c - 1);
            }
        }

        upward = !upward;
        col -= 2;
    }

    order
}

/// Place codeword bits (most significant bit first) into the data modules.
///
/// Modules past the end of the bit stream (remainder bits) are left light.
/// Function modules are never written.
pub fn place_data_bits(modules: &mut BitMatrix, func: &FunctionPatterns, codewords: &[u8]) {
    let total_bits = codewords.len() * 8;
    for (i, (x, y)) in data_module_order(func).into_iter().enumerate() {
        let bit = i < total_bits && (codewords[i / 8] >> (7 - i % 8)) & 1 == 1;
        modules.set(x, y, bit);
    }
}

/// Read codewords back out of the data modules, dropping remainder bits
pub fn read_data_bits(modules: &BitMatrix, func: &FunctionPatterns) -> Vec<u8> {
    let order = data_module_order(func);
    order
        .chunks_exact(8)
        .map(|chunk| {
            chunk
                .iter()
                .fold(0u8, |acc, &(x, y)| (acc << 1) | modules.get(x, y) as u8)
        })
        .collect()
}
