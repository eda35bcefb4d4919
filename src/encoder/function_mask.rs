use super::format::format_bit_positions;
use super::tables::alignment_pattern_positions;
use crate::models::{BitMatrix, Version};

/// Function patterns for a specific QR version.
///
/// `modules` holds the drawn patterns (format areas light until the mask is
/// chosen); `reserved` marks every function module. Everything outside
/// `reserved` is a data module.
#[derive(Debug, Clone)]
pub struct FunctionPatterns {
    modules: BitMatrix,
    reserved: BitMatrix,
}

impl FunctionPatterns {
    pub fn new(version: Version) -> Self {
        let size = version.size();
        let mut patterns = Self {
            modules: BitMatrix::square(size),
            reserved: BitMatrix::square(size),
        };

        // Finder patterns with separators, centred 3 modules in from each corner
        patterns.draw_finder(3, 3);
        patterns.draw_finder(size - 4, 3);
        patterns.draw_finder(3, size - 4);

        for &cy in alignment_pattern_positions(version) {
            for &cx in alignment_pattern_positions(version) {
                if !patterns.overlaps_reserved(cx, cy) {
                    patterns.draw_alignment(cx, cy);
                }
            }
        }

        // Timing patterns (row 6 and column 6)
        for i in 0..size {
            if !patterns.reserved.get(i, 6) {
                patterns.set_function(i, 6, i % 2 == 0);
            }
            if !patterns.reserved.get(6, i) {
                patterns.set_function(6, i, i % 2 == 0);
            }
        }

        // Format info areas, both copies
        for copy in format_bit_positions(size) {
            for (x, y) in copy {
                patterns.set_function(x, y, false);
            }
        }

        // Dark module
        patterns.set_function(8, size - 8, true);

        patterns
    }

    pub fn size(&self) -> usize {
        self.modules.width()
    }

    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.reserved.get(x, y)
    }

    /// Drawn function patterns
    pub fn modules(&self) -> &BitMatrix {
        &self.modules
    }

    /// Reservation mask (true = function module)
    pub fn reserved(&self) -> &BitMatrix {
        &self.reserved
    }

    pub fn data_modules_count(&self) -> usize {
        let size = self.size();
        size * size - self.reserved.count_ones()
    }

    fn set_function(&mut self, x: usize, y: usize, dark: bool) {
        self.modules.set(x, y, dark);
        self.reserved.set(x, y, true);
    }

    fn draw_finder(&mut self, cx: usize, cy: usize) {
        let size = self.size() as isize;
        for dy in -4isize..=4 {
            for dx in -4isize..=4 {
                let x = cx as isize + dx;
                let y = cy as isize + dy;
                if !(0..size).contains(&x) || !(0..size).contains(&y) {
                    continue;
                }
                // Ring 2 is the light band, ring 4 the separator
                let ring = dx.abs().max(dy.abs());
                self.set_function(x as usize, y as usize, ring != 2 && ring != 4);
            }
        }
    }

    fn overlaps_reserved(&self, cx: usize, cy: usize) -> bool {
        (cy - 2..=cy + 2).any(|y| (cx - 2..=cx + 2).any(|x| self.reserved.get(x, y)))
    }

    fn draw_alignment(&mut self, cx: usize, cy: usize) {
        for dy in -2isize..=2 {
            for dx in -2isize..=2 {
                let ring = dx.abs().max(dy.abs());
                let x = (cx as isize + dx) as usize;
                let y = (cy as isize + dy) as usize;
                self.set_function(x, y, ring != 1);
            }
        }
    }
}
