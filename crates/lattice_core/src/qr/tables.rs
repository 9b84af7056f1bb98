//! Symbol capacity and error-correction block tables for versions 1–10.

use super::QrError;

/// Highest symbol version this crate encodes.
pub const MAX_VERSION: u8 = 10;

/// A validated symbol version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version(u8);

impl Version {
    pub fn new(number: u8) -> Result<Version, QrError> {
        if (1..=MAX_VERSION).contains(&number) {
            Ok(Version(number))
        } else {
            Err(QrError::InvalidVersion(number))
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Side length of the symbol in modules.
    pub fn side(self) -> usize {
        17 + 4 * usize::from(self.0)
    }

    /// Alignment pattern center coordinates along each axis.
    pub fn alignment_centers(self) -> &'static [usize] {
        const CENTERS: [&[usize]; MAX_VERSION as usize] = [
            &[],
            &[6, 18],
            &[6, 22],
            &[6, 26],
            &[6, 30],
            &[6, 34],
            &[6, 22, 38],
            &[6, 24, 42],
            &[6, 26, 46],
            &[6, 28, 50],
        ];
        CENTERS[usize::from(self.0) - 1]
    }

    /// Total data + error-correction codewords in the symbol.
    pub fn total_codewords(self) -> usize {
        const TOTALS: [usize; MAX_VERSION as usize] =
            [26, 44, 70, 100, 134, 172, 196, 242, 292, 346];
        TOTALS[usize::from(self.0) - 1]
    }

    /// Whether the symbol carries the 18-bit version information blocks.
    pub fn has_version_info(self) -> bool {
        self.0 >= 7
    }
}

/// Error-correction levels, in increasing recovery capacity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EcLevel {
    Low,
    #[default]
    Medium,
    Quartile,
    High,
}

impl EcLevel {
    /// Two-bit indicator used in the format information.
    pub fn indicator(self) -> u32 {
        match self {
            EcLevel::Low => 0b01,
            EcLevel::Medium => 0b00,
            EcLevel::Quartile => 0b11,
            EcLevel::High => 0b10,
        }
    }
}

/// Block structure for one version × level: the number of
/// error-correction codewords per block, and up to two groups of
/// (block count, data codewords per block).
#[derive(Clone, Copy, Debug)]
pub struct EcBlocks {
    pub ec_per_block: usize,
    pub groups: [(usize, usize); 2],
}

impl EcBlocks {
    pub fn data_codewords(&self) -> usize {
        self.groups.iter().map(|(count, len)| count * len).sum()
    }

    pub fn block_count(&self) -> usize {
        self.groups.iter().map(|(count, _)| count).sum()
    }

    /// Data block lengths in transmission order.
    pub fn block_lengths(&self) -> impl Iterator<Item = usize> {
        self.groups
            .into_iter()
            .flat_map(|(count, len)| std::iter::repeat_n(len, count))
    }
}

const fn blocks(ec_per_block: usize, g1: (usize, usize), g2: (usize, usize)) -> EcBlocks {
    EcBlocks {
        ec_per_block,
        groups: [g1, g2],
    }
}

/// Rows are versions 1–10; columns are L, M, Q, H.
const EC_BLOCKS: [[EcBlocks; 4]; MAX_VERSION as usize] = [
    [
        blocks(7, (1, 19), (0, 0)),
        blocks(10, (1, 16), (0, 0)),
        blocks(13, (1, 13), (0, 0)),
        blocks(17, (1, 9), (0, 0)),
    ],
    [
        blocks(10, (1, 34), (0, 0)),
        blocks(16, (1, 28), (0, 0)),
        blocks(22, (1, 22), (0, 0)),
        blocks(28, (1, 16), (0, 0)),
    ],
    [
        blocks(15, (1, 55), (0, 0)),
        blocks(26, (1, 44), (0, 0)),
        blocks(18, (2, 17), (0, 0)),
        blocks(22, (2, 13), (0, 0)),
    ],
    [
        blocks(20, (1, 80), (0, 0)),
        blocks(18, (2, 32), (0, 0)),
        blocks(26, (2, 24), (0, 0)),
        blocks(16, (4, 9), (0, 0)),
    ],
    [
        blocks(26, (1, 108), (0, 0)),
        blocks(24, (2, 43), (0, 0)),
        blocks(18, (2, 15), (2, 16)),
        blocks(22, (2, 11), (2, 12)),
    ],
    [
        blocks(18, (2, 68), (0, 0)),
        blocks(16, (4, 27), (0, 0)),
        blocks(24, (4, 19), (0, 0)),
        blocks(28, (4, 15), (0, 0)),
    ],
    [
        blocks(20, (2, 78), (0, 0)),
        blocks(18, (4, 31), (0, 0)),
        blocks(18, (2, 14), (4, 15)),
        blocks(26, (4, 13), (1, 14)),
    ],
    [
        blocks(24, (2, 97), (0, 0)),
        blocks(22, (2, 38), (2, 39)),
        blocks(22, (4, 18), (2, 19)),
        blocks(26, (4, 14), (2, 15)),
    ],
    [
        blocks(30, (2, 116), (0, 0)),
        blocks(22, (3, 36), (2, 37)),
        blocks(20, (4, 16), (4, 17)),
        blocks(24, (4, 12), (4, 13)),
    ],
    [
        blocks(18, (2, 68), (2, 69)),
        blocks(26, (4, 43), (1, 44)),
        blocks(24, (6, 19), (2, 20)),
        blocks(28, (6, 15), (2, 16)),
    ],
];

pub fn ec_blocks(version: Version, level: EcLevel) -> &'static EcBlocks {
    let column = match level {
        EcLevel::Low => 0,
        EcLevel::Medium => 1,
        EcLevel::Quartile => 2,
        EcLevel::High => 3,
    };
    &EC_BLOCKS[usize::from(version.number()) - 1][column]
}

/// Data capacity in bits for a version × level.
pub fn data_bits(version: Version, level: EcLevel) -> usize {
    ec_blocks(version, level).data_codewords() * 8
}

pub fn all_versions() -> impl Iterator<Item = Version> {
    (1..=MAX_VERSION).map(Version)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVELS: [EcLevel; 4] = [
        EcLevel::Low,
        EcLevel::Medium,
        EcLevel::Quartile,
        EcLevel::High,
    ];

    #[test]
    fn version_bounds_are_enforced() {
        assert!(Version::new(0).is_err());
        assert!(Version::new(MAX_VERSION + 1).is_err());
        assert_eq!(Version::new(4).unwrap().side(), 33);
    }

    #[test]
    fn block_tables_sum_to_the_symbol_capacity() {
        for version in all_versions() {
            for level in LEVELS {
                let blocks = ec_blocks(version, level);
                let total =
                    blocks.data_codewords() + blocks.block_count() * blocks.ec_per_block;

                assert_eq!(
                    total,
                    version.total_codewords(),
                    "version {} level {:?}",
                    version.number(),
                    level
                );
            }
        }
    }

    #[test]
    fn block_lengths_are_monotonic() {
        // Shorter blocks always come first; interleaving depends on it.
        for version in all_versions() {
            for level in LEVELS {
                let lengths: Vec<_> = ec_blocks(version, level).block_lengths().collect();
                assert!(lengths.windows(2).all(|w| w[0] <= w[1]));
                assert!(!lengths.is_empty());
            }
        }
    }

    #[test]
    fn higher_levels_never_gain_data_capacity() {
        for version in all_versions() {
            let capacities: Vec<_> = LEVELS
                .iter()
                .map(|&level| data_bits(version, level))
                .collect();
            assert!(capacities.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn alignment_centers_match_the_symbol_grid() {
        for version in all_versions() {
            let centers = version.alignment_centers();
            if version.number() == 1 {
                assert!(centers.is_empty());
                continue;
            }

            assert_eq!(centers.first(), Some(&6));
            assert_eq!(*centers.last().unwrap(), version.side() - 7);
        }
    }
}
