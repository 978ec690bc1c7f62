//! Placement of block histograms in the output array.
//!
//! A wavelet pass `j` (magnitude passes first, then phase passes at
//! `j + wavelet_count`) contributes one histogram per block `b`. With
//! row-major storage every split mode reduces to a start offset:
//!
//! | split    | shape                             | start of `(j, b)`                 |
//! |----------|-----------------------------------|-----------------------------------|
//! | none     | `n_blocks · n_bins · jet`         | `j·n_bins·n_blocks + b·n_bins`    |
//! | blocks   | `(n_blocks, n_bins · jet)`        | `b·n_bins·jet + j·n_bins`         |
//! | wavelets | `(jet, n_bins · n_blocks)`        | `j·n_bins·n_blocks + b·n_bins`    |
//! | both     | `(jet · n_blocks, n_bins)`        | `(j·n_blocks + b)·n_bins`         |
use super::options::SplitMode;
use crate::error::{LgbphsError, Result};
use crate::lbp::BlockHistograms;
use crate::types::FeatureShape;
use std::ops::Range;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeatureLayout {
    split: Option<SplitMode>,
    jet_length: usize,
    n_blocks: usize,
    n_bins: usize,
}

impl FeatureLayout {
    pub fn new(split: Option<SplitMode>, jet_length: usize, n_blocks: usize, n_bins: usize) -> Self {
        Self {
            split,
            jet_length,
            n_blocks,
            n_bins,
        }
    }

    pub fn split(&self) -> Option<SplitMode> {
        self.split
    }

    pub fn jet_length(&self) -> usize {
        self.jet_length
    }

    pub fn n_blocks(&self) -> usize {
        self.n_blocks
    }

    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    pub fn shape(&self) -> FeatureShape {
        let (jet, blocks, bins) = (self.jet_length, self.n_blocks, self.n_bins);
        match self.split {
            None => FeatureShape::Vector(blocks * bins * jet),
            Some(SplitMode::Blocks) => FeatureShape::Matrix {
                rows: blocks,
                cols: bins * jet,
            },
            Some(SplitMode::Wavelets) => FeatureShape::Matrix {
                rows: jet,
                cols: bins * blocks,
            },
            Some(SplitMode::Both) => FeatureShape::Matrix {
                rows: jet * blocks,
                cols: bins,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.jet_length * self.n_blocks * self.n_bins
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Zeroed buffer of `len()` values.
    pub fn allocate(&self) -> Vec<f64> {
        vec![0.0; self.len()]
    }

    /// Flat range holding the histogram of block `block` in pass `pass`.
    pub fn slot(&self, pass: usize, block: usize) -> Range<usize> {
        let (jet, blocks, bins) = (self.jet_length, self.n_blocks, self.n_bins);
        let start = match self.split {
            None | Some(SplitMode::Wavelets) => pass * bins * blocks + block * bins,
            Some(SplitMode::Blocks) => block * bins * jet + pass * bins,
            Some(SplitMode::Both) => (pass * blocks + block) * bins,
        };
        start..start + bins
    }

    /// Copy the histograms of one pass into `data`.
    pub fn fill(&self, data: &mut [f64], pass: usize, histograms: &BlockHistograms) -> Result<()> {
        if histograms.n_blocks() != self.n_blocks || histograms.n_bins() != self.n_bins {
            return Err(LgbphsError::InternalConsistency(format!(
                "pass {pass} produced {} blocks x {} bins, expected {} x {}",
                histograms.n_blocks(),
                histograms.n_bins(),
                self.n_blocks,
                self.n_bins
            )));
        }
        if pass >= self.jet_length {
            return Err(LgbphsError::InternalConsistency(format!(
                "pass {pass} is outside the jet of length {}",
                self.jet_length
            )));
        }
        if data.len() != self.len() {
            return Err(LgbphsError::InternalConsistency(format!(
                "output buffer holds {} values, layout needs {}",
                data.len(),
                self.len()
            )));
        }
        for (b, hist) in histograms.iter().enumerate() {
            data[self.slot(pass, b)].copy_from_slice(hist);
        }
        Ok(())
    }
}
