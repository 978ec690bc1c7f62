//! Parameters of the LGBPHS extractor.
//!
//! Everything is validated when the extractor is built; only failures that
//! depend on the image (its size versus the block size) surface later.
use crate::error::{LgbphsError, Result};
use crate::gabor::GaborOptions;
use crate::lbp::{BlockGeometry, LbpOptions};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the histogram sequence is split into rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// One row per block: `(n_blocks, n_bins · jet_length)`.
    Blocks,
    /// One row per wavelet pass: `(jet_length, n_bins · n_blocks)`.
    Wavelets,
    /// One row per (pass, block): `(jet_length · n_blocks, n_bins)`.
    Both,
}

impl SplitMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitMode::Blocks => "blocks",
            SplitMode::Wavelets => "wavelets",
            SplitMode::Both => "both",
        }
    }

    /// Parse an optional split name; `"none"` and the empty string mean no split.
    pub fn parse_optional(s: &str) -> Result<Option<Self>> {
        match s {
            "" | "none" => Ok(None),
            other => other.parse().map(Some),
        }
    }
}

impl FromStr for SplitMode {
    type Err = LgbphsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "blocks" => Ok(SplitMode::Blocks),
            "wavelets" => Ok(SplitMode::Wavelets),
            "both" => Ok(SplitMode::Both),
            other => Err(LgbphsError::config(format!(
                "split must be one of 'blocks', 'wavelets', 'both' or none (got '{other}')"
            ))),
        }
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extractor configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LgbphsParams {
    /// Block `(height, width)` in pixels.
    pub block_size: (usize, usize),
    /// Overlap `(height, width)` between neighbouring blocks.
    pub block_overlap: (usize, usize),
    pub gabor: GaborOptions,
    /// Add LBP histograms of the Gabor phases after the magnitude histograms.
    pub use_phases: bool,
    pub lbp: LbpOptions,
    /// Return non-zero entries only. Incompatible with `split`.
    pub sparse: bool,
    pub split: Option<SplitMode>,
}

impl Default for LgbphsParams {
    fn default() -> Self {
        Self {
            block_size: (10, 10),
            block_overlap: (0, 0),
            gabor: GaborOptions::default(),
            use_phases: false,
            lbp: LbpOptions::default(),
            sparse: false,
            split: None,
        }
    }
}

impl LgbphsParams {
    /// Square blocks of `size` pixels without overlap.
    pub fn with_square_blocks(size: usize) -> Self {
        Self {
            block_size: (size, size),
            ..Default::default()
        }
    }

    pub fn wavelet_count(&self) -> usize {
        self.gabor.wavelet_count()
    }

    /// Histogram passes per block: one per wavelet, doubled with phases.
    pub fn jet_length(&self) -> usize {
        self.wavelet_count() * if self.use_phases { 2 } else { 1 }
    }

    pub fn block_geometry(&self) -> Result<BlockGeometry> {
        BlockGeometry::new(self.block_size, self.block_overlap)
    }

    pub fn validate(&self) -> Result<()> {
        self.block_geometry()?;
        self.gabor.validate()?;
        self.lbp.validate()?;
        if let (true, Some(split)) = (self.sparse, self.split) {
            return Err(LgbphsError::config(format!(
                "sparse histograms cannot be split (split = '{split}')"
            )));
        }
        Ok(())
    }
}
