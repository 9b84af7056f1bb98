//! Module placement: function patterns, data layout, masking, and the
//! format / version information fields.

use super::Module;
use super::tables::{EcLevel, Version};

#[derive(Clone, Copy, Debug)]
struct Cell {
    dark: bool,
    module: Option<Module>,
}

impl Cell {
    const FREE: Cell = Cell {
        dark: false,
        module: None,
    };
}

/// A symbol under construction. Coordinates are (x, y) with the origin
/// at the top-left module, x growing rightwards and y downwards.
#[derive(Clone)]
pub(crate) struct MatrixBuilder {
    side: usize,
    cells: Vec<Cell>,
}

impl MatrixBuilder {
    /// Creates a matrix with every function pattern placed and the
    /// format / version areas reserved. Only data cells remain free.
    pub(crate) fn new(version: Version) -> Self {
        let side = version.side();
        let mut builder = Self {
            side,
            cells: vec![Cell::FREE; side * side],
        };

        builder.place_finders();
        builder.place_timing();
        builder.place_alignment(version);
        builder.place_dark_module(version);
        builder.reserve_format_area();
        if version.has_version_info() {
            builder.place_version_info(version);
        }

        builder
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.side && y < self.side);
        y * self.side + x
    }

    fn set(&mut self, x: usize, y: usize, dark: bool, module: Module) {
        let index = self.index(x, y);
        self.cells[index] = Cell {
            dark,
            module: Some(module),
        };
    }

    fn is_free(&self, x: usize, y: usize) -> bool {
        self.cells[self.index(x, y)].module.is_none()
    }

    fn is_dark(&self, x: usize, y: usize) -> bool {
        self.cells[self.index(x, y)].dark
    }

    fn place_finders(&mut self) {
        let side = self.side;
        for (left, top) in [(0, 0), (side - 7, 0), (0, side - 7)] {
            for dy in 0..7 {
                for dx in 0..7 {
                    let ring = dx == 0 || dx == 6 || dy == 0 || dy == 6;
                    let ball = (2..=4).contains(&dx) && (2..=4).contains(&dy);
                    self.set(left + dx, top + dy, ring || ball, Module::Finder);
                }
            }
        }

        // One-module light separators along the inner edges.
        for i in 0..8 {
            self.set(7, i, false, Module::Separator);
            self.set(i, 7, false, Module::Separator);
            self.set(side - 8, i, false, Module::Separator);
            self.set(side - 8 + i, 7, false, Module::Separator);
            self.set(7, side - 8 + i, false, Module::Separator);
            self.set(i, side - 8, false, Module::Separator);
        }
    }

    fn place_timing(&mut self) {
        for i in 8..self.side - 8 {
            let dark = i % 2 == 0;
            if self.is_free(i, 6) {
                self.set(i, 6, dark, Module::Timing);
            }
            if self.is_free(6, i) {
                self.set(6, i, dark, Module::Timing);
            }
        }
    }

    fn place_alignment(&mut self, version: Version) {
        let centers = version.alignment_centers();
        let side = self.side;

        for &cy in centers {
            for &cx in centers {
                // Patterns whose 5×5 area would reach into a finder
                // corner are omitted.
                let near_top = cy <= 8;
                let near_left = cx <= 8;
                let near_right = cx >= side - 9;
                let near_bottom = cy >= side - 9;
                if (near_top && near_left) || (near_top && near_right) || (near_bottom && near_left)
                {
                    continue;
                }

                for dy in 0..5 {
                    for dx in 0..5 {
                        let ring = dx == 0 || dx == 4 || dy == 0 || dy == 4;
                        let center = dx == 2 && dy == 2;
                        self.set(cx - 2 + dx, cy - 2 + dy, ring || center, Module::Alignment);
                    }
                }
            }
        }
    }

    fn place_dark_module(&mut self, version: Version) {
        let y = 4 * usize::from(version.number()) + 9;
        self.set(8, y, true, Module::Dark);
    }

    /// Reserves the format cells as light so data placement skips them;
    /// [`write_format`](Self::write_format) fills them per mask.
    fn reserve_format_area(&mut self) {
        for (x, y) in format_positions(self.side) {
            if self.is_free(x, y) {
                self.set(x, y, false, Module::Format);
            }
        }
    }

    fn place_version_info(&mut self, version: Version) {
        let info = version_info_bits(version);
        let side = self.side;

        for bit in 0..18 {
            let dark = (info >> bit) & 1 == 1;
            let a = bit / 3;
            let b = side - 11 + bit % 3;
            self.set(a, b, dark, Module::VersionInfo);
            self.set(b, a, dark, Module::VersionInfo);
        }
    }

    /// Zigzag data placement: column pairs right to left, alternating
    /// direction, skipping the vertical timing column. Bits are taken
    /// most significant first; leftover cells stay light.
    pub(crate) fn place_data(&mut self, codewords: &[u8]) {
        let side = self.side;
        let mut bit = 0usize;
        let total_bits = codewords.len() * 8;

        let mut x = side as isize - 1;
        let mut upward = true;

        while x > 0 {
            if x == 6 {
                x -= 1;
            }

            for step in 0..side {
                let y = if upward { side - 1 - step } else { step };

                for dx in 0..2 {
                    let cx = (x - dx) as usize;
                    if !self.is_free(cx, y) {
                        continue;
                    }

                    let dark = if bit < total_bits {
                        (codewords[bit / 8] >> (7 - bit % 8)) & 1 == 1
                    } else {
                        false
                    };
                    bit += 1;

                    self.set(cx, y, dark, Module::Data);
                }
            }

            x -= 2;
            upward = !upward;
        }

        debug_assert!(bit >= total_bits, "symbol too small for the codewords");
    }

    /// XORs the mask pattern over every data module.
    pub(crate) fn apply_mask(&mut self, mask: u8) {
        for y in 0..self.side {
            for x in 0..self.side {
                let index = self.index(x, y);
                if self.cells[index].module == Some(Module::Data) && mask_bit(mask, x, y) {
                    self.cells[index].dark = !self.cells[index].dark;
                }
            }
        }
    }

    /// Writes both copies of the 15-bit format information.
    pub(crate) fn write_format(&mut self, level: EcLevel, mask: u8) {
        let info = format_info_bits(level, mask);

        for (bit, (x, y)) in format_positions(self.side).into_iter().enumerate() {
            let dark = (info >> bit) & 1 == 1;
            let index = self.index(x, y);
            // The dark module shares a coordinate list slot on some
            // diagrams; never overwrite it.
            if self.cells[index].module != Some(Module::Dark) {
                self.cells[index] = Cell {
                    dark,
                    module: Some(Module::Format),
                };
            }
        }
    }

    /// Total penalty score over the four standard evaluation rules.
    pub(crate) fn penalty(&self) -> u32 {
        self.penalty_runs() + self.penalty_blocks() + self.penalty_patterns() + self.penalty_balance()
    }

    fn penalty_runs(&self) -> u32 {
        let mut score = 0;

        for major in 0..self.side {
            let mut row_run = 1u32;
            let mut col_run = 1u32;

            for minor in 1..self.side {
                row_run = if self.is_dark(minor, major) == self.is_dark(minor - 1, major) {
                    row_run + 1
                } else {
                    score += run_penalty(row_run);
                    1
                };

                col_run = if self.is_dark(major, minor) == self.is_dark(major, minor - 1) {
                    col_run + 1
                } else {
                    score += run_penalty(col_run);
                    1
                };
            }

            score += run_penalty(row_run) + run_penalty(col_run);
        }

        score
    }

    fn penalty_blocks(&self) -> u32 {
        let mut score = 0;

        for y in 0..self.side - 1 {
            for x in 0..self.side - 1 {
                let dark = self.is_dark(x, y);
                if self.is_dark(x + 1, y) == dark
                    && self.is_dark(x, y + 1) == dark
                    && self.is_dark(x + 1, y + 1) == dark
                {
                    score += 3;
                }
            }
        }

        score
    }

    fn penalty_patterns(&self) -> u32 {
        const PATTERN: [bool; 11] = [
            true, false, true, true, true, false, true, false, false, false, false,
        ];

        let mut score = 0;

        for major in 0..self.side {
            for start in 0..=self.side - PATTERN.len() {
                let mut row_forward = true;
                let mut row_backward = true;
                let mut col_forward = true;
                let mut col_backward = true;

                for (offset, &expected) in PATTERN.iter().enumerate() {
                    let row = self.is_dark(start + offset, major);
                    let col = self.is_dark(major, start + offset);
                    row_forward &= row == expected;
                    row_backward &= row == PATTERN[PATTERN.len() - 1 - offset];
                    col_forward &= col == expected;
                    col_backward &= col == PATTERN[PATTERN.len() - 1 - offset];
                }

                score += 40
                    * (u32::from(row_forward)
                        + u32::from(row_backward)
                        + u32::from(col_forward)
                        + u32::from(col_backward));
            }
        }

        score
    }

    fn penalty_balance(&self) -> u32 {
        let total = (self.side * self.side) as u32;
        let dark = self
            .cells
            .iter()
            .filter(|cell| cell.dark)
            .count() as u32;

        let percent = dark * 100 / total;
        percent.abs_diff(50) / 5 * 10
    }

    /// Finalizes into (darkness, module) pairs; cells never written by
    /// data placement (remainder bits) become light data modules.
    pub(crate) fn finish(self) -> (usize, Vec<(bool, Module)>) {
        let cells = self
            .cells
            .into_iter()
            .map(|cell| (cell.dark, cell.module.unwrap_or(Module::Data)))
            .collect();
        (self.side, cells)
    }
}

fn run_penalty(run: u32) -> u32 {
    if run >= 5 { 3 + (run - 5) } else { 0 }
}

/// The (x, y) positions of format bits 0..15 around the top-left finder,
/// followed by the second copy split between the bottom-left and
/// top-right finders.
fn format_positions(side: usize) -> [(usize, usize); 30] {
    [
        // First copy, bits 0..15.
        (0, 8),
        (1, 8),
        (2, 8),
        (3, 8),
        (4, 8),
        (5, 8),
        (7, 8),
        (8, 8),
        (8, 7),
        (8, 5),
        (8, 4),
        (8, 3),
        (8, 2),
        (8, 1),
        (8, 0),
        // Second copy, bits 0..15.
        (8, side - 1),
        (8, side - 2),
        (8, side - 3),
        (8, side - 4),
        (8, side - 5),
        (8, side - 6),
        (8, side - 7),
        (side - 8, 8),
        (side - 7, 8),
        (side - 6, 8),
        (side - 5, 8),
        (side - 4, 8),
        (side - 3, 8),
        (side - 2, 8),
        (side - 1, 8),
    ]
}

/// Whether the mask flips the module at (x, y).
pub(crate) fn mask_bit(mask: u8, x: usize, y: usize) -> bool {
    match mask {
        0 => (x + y) % 2 == 0,
        1 => y % 2 == 0,
        2 => x % 3 == 0,
        3 => (x + y) % 3 == 0,
        4 => (y / 2 + x / 3) % 2 == 0,
        5 => (x * y) % 2 + (x * y) % 3 == 0,
        6 => ((x * y) % 2 + (x * y) % 3) % 2 == 0,
        7 => ((x + y) % 2 + (x * y) % 3) % 2 == 0,
        _ => unreachable!("mask patterns are 0..8"),
    }
}

/// Remainder of `value` divided by the BCH generator `poly` of the given
/// bit width.
fn bch_remainder(mut value: u32, poly: u32, poly_bits: u32) -> u32 {
    while value.leading_zeros() < 33 - poly_bits {
        value ^= poly << (32 - value.leading_zeros() - poly_bits);
    }
    value
}

/// 15-bit format information: 5 data bits BCH-protected, then XORed
/// with the fixed mask so the field is never all-zero.
pub(crate) fn format_info_bits(level: EcLevel, mask: u8) -> u32 {
    let data = (level.indicator() << 3) | u32::from(mask);
    let shifted = data << 10;
    (shifted | bch_remainder(shifted, 0x537, 11)) ^ 0x5412
}

/// 18-bit version information for versions 7 and up.
pub(crate) fn version_info_bits(version: Version) -> u32 {
    let shifted = u32::from(version.number()) << 12;
    shifted | bch_remainder(shifted, 0x1F25, 13)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::tables::all_versions;

    fn v(number: u8) -> Version {
        Version::new(number).unwrap()
    }

    #[test]
    fn format_info_matches_the_reference_vector() {
        // Level M, mask 5, the worked example from the symbol specification.
        assert_eq!(format_info_bits(EcLevel::Medium, 5), 0b100000011001110);
    }

    #[test]
    fn format_info_is_never_all_zero_or_all_one() {
        for level in [
            EcLevel::Low,
            EcLevel::Medium,
            EcLevel::Quartile,
            EcLevel::High,
        ] {
            for mask in 0..8 {
                let info = format_info_bits(level, mask);
                assert_ne!(info, 0);
                assert_ne!(info, 0x7FFF);
            }
        }
    }

    #[test]
    fn format_info_is_unique_per_level_and_mask() {
        let mut seen = std::collections::HashSet::new();
        for level in [
            EcLevel::Low,
            EcLevel::Medium,
            EcLevel::Quartile,
            EcLevel::High,
        ] {
            for mask in 0..8 {
                assert!(seen.insert(format_info_bits(level, mask)));
            }
        }
        assert_eq!(seen.len(), 32);
    }

    #[test]
    fn version_info_matches_the_reference_vector() {
        assert_eq!(version_info_bits(v(7)), 0x07C94);
    }

    #[test]
    fn version_info_bch_remainder_checks_out() {
        for version in all_versions().filter(|v| v.has_version_info()) {
            let info = version_info_bits(version);
            assert_eq!(info >> 12, u32::from(version.number()));
            assert_eq!(bch_remainder(info, 0x1F25, 13), 0);
        }
    }

    #[test]
    fn free_cell_count_is_consistent_with_the_codeword_tables() {
        for version in all_versions() {
            let builder = MatrixBuilder::new(version);
            let free = builder.cells.iter().filter(|c| c.module.is_none()).count();

            let codeword_bits = version.total_codewords() * 8;
            let remainder = free - codeword_bits;

            assert!(
                remainder < 8,
                "version {}: {free} free cells vs {codeword_bits} codeword bits",
                version.number()
            );
        }
    }

    #[test]
    fn timing_patterns_alternate() {
        let builder = MatrixBuilder::new(v(2));
        for i in 8..builder.side - 8 {
            assert_eq!(builder.is_dark(i, 6), i % 2 == 0);
            assert_eq!(builder.is_dark(6, i), i % 2 == 0);
        }
    }

    #[test]
    fn version_two_has_a_single_alignment_pattern() {
        // Centers {6, 18}: three of the four combinations overlap
        // finder corners and must be omitted.
        let builder = MatrixBuilder::new(v(2));
        let alignment_cells = builder
            .cells
            .iter()
            .filter(|c| c.module == Some(Module::Alignment))
            .count();

        assert_eq!(alignment_cells, 25);
        assert_eq!(
            builder.cells[builder.index(18, 18)].module,
            Some(Module::Alignment)
        );
    }

    #[test]
    fn alignment_pattern_avoids_finders() {
        // Version 7 has centers {6, 22, 38}; (6,6), (38,6) and (6,38)
        // collide with finders and must not be drawn, leaving six.
        let builder = MatrixBuilder::new(v(7));
        assert_eq!(
            builder.cells[builder.index(0, 0)].module,
            Some(Module::Finder)
        );
        assert_eq!(
            builder.cells[builder.index(22, 22)].module,
            Some(Module::Alignment)
        );
        assert_eq!(
            builder.cells[builder.index(38, 38)].module,
            Some(Module::Alignment)
        );
        // The corner under the top-right finder keeps its finder role.
        assert_ne!(
            builder.cells[builder.index(38, 6)].module,
            Some(Module::Alignment)
        );
    }

    #[test]
    fn masks_cover_distinct_patterns() {
        let mut signatures = std::collections::HashSet::new();
        for mask in 0..8u8 {
            let signature: Vec<bool> = (0..6)
                .flat_map(|y| (0..6).map(move |x| mask_bit(mask, x, y)))
                .collect();
            assert!(signatures.insert(signature), "mask {mask} duplicates another");
        }
    }

    #[test]
    fn mask_zero_is_a_checkerboard() {
        assert!(mask_bit(0, 0, 0));
        assert!(!mask_bit(0, 1, 0));
        assert!(!mask_bit(0, 0, 1));
        assert!(mask_bit(0, 1, 1));
    }

    #[test]
    fn run_penalty_follows_the_standard_weights() {
        assert_eq!(run_penalty(4), 0);
        assert_eq!(run_penalty(5), 3);
        assert_eq!(run_penalty(7), 5);
    }
}
