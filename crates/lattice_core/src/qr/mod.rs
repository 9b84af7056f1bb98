//! QR symbol encoding and the styleable module geometry derived from it.
//!
//! [`QrMatrix::encode`] runs the full pipeline: mode analysis, version
//! selection, Reed–Solomon error correction, interleaving, placement,
//! and mask evaluation. The result keeps per-module classification so
//! renderers can style finder "eyes" independently of data modules.

mod bits;
mod gf;
mod matrix;
mod rs;
mod style;
mod tables;

pub use style::{
    EyePaths, EyeShape, ModuleGrid, ModuleShape, QUIET_ZONE, data_module_path, eye_paths,
};
pub use tables::{EcLevel, MAX_VERSION, Version};

use bits::{BitBuffer, Mode};
use matrix::MatrixBuilder;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QrError {
    #[error("{length} bytes do not fit in any version up to {MAX_VERSION} at this level")]
    DataTooLong { length: usize },
    #[error("version {0} is outside the supported range 1..={MAX_VERSION}")]
    InvalidVersion(u8),
}

/// The role a module plays in the symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Module {
    Finder,
    Separator,
    Timing,
    Alignment,
    Format,
    VersionInfo,
    /// The always-dark module next to the bottom-left finder.
    Dark,
    Data,
}

/// Which of the three finder patterns a module belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EyePosition {
    TopLeft,
    TopRight,
    BottomLeft,
}

impl EyePosition {
    pub const ALL: [EyePosition; 3] = [
        EyePosition::TopLeft,
        EyePosition::TopRight,
        EyePosition::BottomLeft,
    ];

    /// Top-left module coordinate of this eye's 7×7 area.
    fn origin(self, side: usize) -> (usize, usize) {
        match self {
            EyePosition::TopLeft => (0, 0),
            EyePosition::TopRight => (side - 7, 0),
            EyePosition::BottomLeft => (0, side - 7),
        }
    }
}

/// The concentric part of a finder pattern a dark module belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EyePart {
    /// The outer 7×7 ring.
    Frame,
    /// The solid 3×3 center.
    Ball,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Eye {
    pub position: EyePosition,
    pub part: EyePart,
}

/// A fully encoded QR symbol.
#[derive(Clone)]
pub struct QrMatrix {
    version: Version,
    ec_level: EcLevel,
    mask: u8,
    side: usize,
    cells: Vec<(bool, Module)>,
}

impl QrMatrix {
    /// Encodes `data` at the smallest version that fits.
    pub fn encode(data: &[u8], ec_level: EcLevel) -> Result<QrMatrix, QrError> {
        let mode = Mode::analyze(data);

        let version = tables::all_versions()
            .find(|&version| {
                mode.segment_bits(data.len(), version) <= tables::data_bits(version, ec_level)
            })
            .ok_or(QrError::DataTooLong { length: data.len() })?;

        Self::encode_at(data, ec_level, version, mode)
    }

    /// Encodes `data` at a pinned version.
    pub fn encode_with_version(
        data: &[u8],
        ec_level: EcLevel,
        version: Version,
    ) -> Result<QrMatrix, QrError> {
        let mode = Mode::analyze(data);

        if mode.segment_bits(data.len(), version) > tables::data_bits(version, ec_level) {
            return Err(QrError::DataTooLong { length: data.len() });
        }

        Self::encode_at(data, ec_level, version, mode)
    }

    fn encode_at(
        data: &[u8],
        ec_level: EcLevel,
        version: Version,
        mode: Mode,
    ) -> Result<QrMatrix, QrError> {
        let mut buffer = BitBuffer::new();
        bits::write_segment(&mut buffer, data, mode, version);
        bits::write_padding(&mut buffer, tables::data_bits(version, ec_level));
        let codewords = interleave(&buffer.into_bytes(), version, ec_level);

        let mut base = MatrixBuilder::new(version);
        base.place_data(&codewords);

        let (mask, masked) = (0..8u8)
            .map(|mask| {
                let mut candidate = base.clone();
                candidate.apply_mask(mask);
                candidate.write_format(ec_level, mask);
                (candidate.penalty(), mask, candidate)
            })
            .min_by_key(|(penalty, mask, _)| (*penalty, *mask))
            .map(|(_, mask, candidate)| (mask, candidate))
            .expect("eight masks are always evaluated");

        let (side, cells) = masked.finish();

        Ok(QrMatrix {
            version,
            ec_level,
            mask,
            side,
            cells,
        })
    }

    pub fn version(&self) -> Version {
        self.version
    }

    pub fn ec_level(&self) -> EcLevel {
        self.ec_level
    }

    /// The mask pattern that won the penalty evaluation.
    pub fn mask(&self) -> u8 {
        self.mask
    }

    /// Side length in modules.
    pub fn side(&self) -> usize {
        self.side
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.side + x].0
    }

    pub fn module(&self, x: usize, y: usize) -> Module {
        self.cells[y * self.side + x].1
    }

    /// Classifies a module as part of one of the three finder eyes.
    ///
    /// Only the dark parts are classified: the outer ring is the frame,
    /// the 3×3 center the ball. Light modules inside the eye area and
    /// everything else return `None`.
    pub fn eye_at(&self, x: usize, y: usize) -> Option<Eye> {
        if self.module(x, y) != Module::Finder {
            return None;
        }

        for position in EyePosition::ALL {
            let (left, top) = position.origin(self.side);
            if !(left..left + 7).contains(&x) || !(top..top + 7).contains(&y) {
                continue;
            }

            let (dx, dy) = (x - left, y - top);
            let part = if (2..=4).contains(&dx) && (2..=4).contains(&dy) {
                EyePart::Ball
            } else if dx == 0 || dx == 6 || dy == 0 || dy == 6 {
                EyePart::Frame
            } else {
                return None;
            };

            return Some(Eye { position, part });
        }

        None
    }
}

/// Splits the data codewords into RS blocks, computes parity for each,
/// and interleaves both sequences column-wise per the symbol layout.
fn interleave(data: &[u8], version: Version, ec_level: EcLevel) -> Vec<u8> {
    let config = tables::ec_blocks(version, ec_level);
    debug_assert_eq!(data.len(), config.data_codewords());

    let mut blocks = Vec::with_capacity(config.block_count());
    let mut offset = 0;
    for length in config.block_lengths() {
        blocks.push(&data[offset..offset + length]);
        offset += length;
    }

    let parities: Vec<Vec<u8>> = blocks
        .iter()
        .map(|block| rs::ec_codewords(block, config.ec_per_block))
        .collect();

    let mut out = Vec::with_capacity(version.total_codewords());

    let longest = blocks.last().map_or(0, |block| block.len());
    for column in 0..longest {
        for block in &blocks {
            if let Some(&byte) = block.get(column) {
                out.push(byte);
            }
        }
    }

    for column in 0..config.ec_per_block {
        for parity in &parities {
            out.push(parity[column]);
        }
    }

    out
}
