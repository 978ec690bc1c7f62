//! Local Gabor binary pattern histogram sequences.
//!
//! Pipeline for one image:
//! 1. Gabor transform with every wavelet of the bank (buffers cached per
//!    image shape in the extractor's workspace).
//! 2. For wavelet `j`: LBP histogram sequence of the magnitude plane, written
//!    as pass `j`; with phases enabled, the phase plane follows as pass
//!    `j + wavelet_count`.
//! 3. Histograms land in one output array laid out by the split mode.
//! 4. Optional sparsification of the flat array.
//!
//! An extractor keeps mutable buffers and must not be shared between threads
//! while extracting; use one instance per worker.
pub mod layout;
pub mod options;
pub mod sparse;

pub use layout::FeatureLayout;
pub use options::{LgbphsParams, SplitMode};
pub use sparse::sparsify;

use crate::error::{LgbphsError, Result};
use crate::gabor::{GaborBank, GaborWorkspace};
use crate::image::ImageF64;
use crate::lbp::{lbphs, BlockGeometry, LbpOperator};
use crate::types::{DenseFeatures, Features};
use log::debug;
use std::time::Instant;

pub struct LgbphsExtractor {
    params: LgbphsParams,
    bank: GaborBank,
    lbp: LbpOperator,
    geometry: BlockGeometry,
    workspace: GaborWorkspace,
}

impl LgbphsExtractor {
    pub fn new(params: LgbphsParams) -> Result<Self> {
        params.validate()?;
        let bank = GaborBank::new(params.gabor)?;
        let lbp = LbpOperator::new(params.lbp)?;
        let geometry = params.block_geometry()?;
        debug!(
            "LgbphsExtractor::new wavelets={} jet_length={} bins={} block={:?} overlap={:?} split={:?} sparse={}",
            bank.wavelet_count(),
            params.jet_length(),
            lbp.max_label(),
            params.block_size,
            params.block_overlap,
            params.split,
            params.sparse
        );
        Ok(Self {
            params,
            bank,
            lbp,
            geometry,
            workspace: GaborWorkspace::new(),
        })
    }

    pub fn params(&self) -> &LgbphsParams {
        &self.params
    }

    pub fn wavelet_count(&self) -> usize {
        self.bank.wavelet_count()
    }

    pub fn jet_length(&self) -> usize {
        self.params.jet_length()
    }

    /// Histogram length, fixed by the LBP alphabet.
    pub fn n_bins(&self) -> usize {
        self.lbp.max_label()
    }

    pub fn bank(&self) -> &GaborBank {
        &self.bank
    }

    pub fn workspace(&self) -> &GaborWorkspace {
        &self.workspace
    }

    /// Drop the cached transform buffers.
    pub fn invalidate_cache(&mut self) {
        self.workspace.invalidate();
    }

    /// Output layout for an image of `(height, width)`.
    pub fn layout_for(&self, shape: (usize, usize)) -> Result<FeatureLayout> {
        Ok(FeatureLayout::new(
            self.params.split,
            self.jet_length(),
            self.geometry.block_count(shape)?,
            self.n_bins(),
        ))
    }

    /// Compute the LGBPHS features of `image`.
    pub fn extract(&mut self, image: &ImageF64) -> Result<Features> {
        image.validate()?;
        let shape = image.shape();
        // size check before paying for the transform
        self.geometry.grid(shape)?;

        let start = Instant::now();
        let wavelets = self.bank.wavelet_count();
        let jet_length = self.params.jet_length();
        let responses = self.bank.transform_validated(image, &mut self.workspace)?;
        let transform_ms = start.elapsed().as_secs_f64() * 1000.0;

        let mut assembled: Option<(FeatureLayout, Vec<f64>)> = None;
        for j in 0..wavelets {
            let magnitude = lbphs(&responses.magnitude(j), &self.lbp, &self.geometry)?;
            let (layout, data) = assembled.get_or_insert_with(|| {
                let layout = FeatureLayout::new(
                    self.params.split,
                    jet_length,
                    magnitude.n_blocks(),
                    magnitude.n_bins(),
                );
                (layout, layout.allocate())
            });
            layout.fill(data, j, &magnitude)?;

            if self.params.use_phases {
                let phase = lbphs(&responses.phase(j), &self.lbp, &self.geometry)?;
                layout.fill(data, j + wavelets, &phase)?;
            }
        }

        let (layout, data) = assembled.ok_or_else(|| {
            LgbphsError::InternalConsistency("Gabor bank produced no wavelets".to_string())
        })?;
        let dense = DenseFeatures::new(layout.shape(), data).ok_or_else(|| {
            LgbphsError::InternalConsistency(format!(
                "assembled buffer does not match shape {:?}",
                layout.shape()
            ))
        })?;
        debug!(
            "LgbphsExtractor::extract {}x{}: {} passes x {} blocks x {} bins, transform {:.3} ms, total {:.3} ms",
            shape.1,
            shape.0,
            layout.jet_length(),
            layout.n_blocks(),
            layout.n_bins(),
            transform_ms,
            start.elapsed().as_secs_f64() * 1000.0
        );
        self.sparsify(Features::Dense(dense))
    }

    /// Apply the configured sparsification; a no-op unless `sparse` is set.
    pub fn sparsify(&self, features: Features) -> Result<Features> {
        if self.params.sparse {
            sparsify(features)
        } else {
            Ok(features)
        }
    }
}

impl std::fmt::Debug for LgbphsExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LgbphsExtractor")
            .field("params", &self.params)
            .field("cached_shape", &self.workspace.shape())
            .finish()
    }
}
