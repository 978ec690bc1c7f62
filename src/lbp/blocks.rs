//! Block tiling and per-block label histograms.
//!
//! Blocks of `size` pixels advance by `size - overlap` in each direction,
//! starting at the top-left corner, left-to-right then top-to-bottom. Pixels
//! beyond the last full block are not covered. The block count per axis is
//! `(extent - overlap) / (size - overlap)`.
use super::operator::LbpOperator;
use crate::error::{LgbphsError, Result};
use crate::image::ImageF64;

/// Block size and overlap, both `(height, width)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockGeometry {
    size: (usize, usize),
    overlap: (usize, usize),
}

/// Pixel rectangle of one block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockRect {
    pub y: usize,
    pub x: usize,
    pub h: usize,
    pub w: usize,
}

impl BlockGeometry {
    pub fn new(size: (usize, usize), overlap: (usize, usize)) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(LgbphsError::config(format!(
                "block size must be positive (got {size:?})"
            )));
        }
        if size.0 < overlap.0 || size.1 < overlap.1 {
            return Err(LgbphsError::config(format!(
                "block overlap {overlap:?} is bigger than the block size {size:?}"
            )));
        }
        if size.0 == overlap.0 || size.1 == overlap.1 {
            return Err(LgbphsError::config(format!(
                "block overlap {overlap:?} equals the block size {size:?}; blocks would never advance"
            )));
        }
        Ok(Self { size, overlap })
    }

    pub fn size(&self) -> (usize, usize) {
        self.size
    }

    pub fn overlap(&self) -> (usize, usize) {
        self.overlap
    }

    pub fn step(&self) -> (usize, usize) {
        (self.size.0 - self.overlap.0, self.size.1 - self.overlap.1)
    }

    /// Blocks per column and per row for an image of `(height, width)`.
    pub fn grid(&self, (height, width): (usize, usize)) -> Result<(usize, usize)> {
        if height < self.size.0 || width < self.size.1 {
            return Err(LgbphsError::input(format!(
                "image of {width}x{height} is smaller than the {}x{} block size",
                self.size.1, self.size.0
            )));
        }
        let (sy, sx) = self.step();
        Ok((
            (height - self.overlap.0) / sy,
            (width - self.overlap.1) / sx,
        ))
    }

    pub fn block_count(&self, shape: (usize, usize)) -> Result<usize> {
        let (rows, cols) = self.grid(shape)?;
        Ok(rows * cols)
    }

    /// All block rectangles in output order.
    pub fn blocks(&self, shape: (usize, usize)) -> Result<Vec<BlockRect>> {
        let (rows, cols) = self.grid(shape)?;
        let (sy, sx) = self.step();
        let mut out = Vec::with_capacity(rows * cols);
        for by in 0..rows {
            for bx in 0..cols {
                out.push(BlockRect {
                    y: by * sy,
                    x: bx * sx,
                    h: self.size.0,
                    w: self.size.1,
                });
            }
        }
        Ok(out)
    }
}

/// Histogram sequence of one plane: `n_blocks` histograms of `n_bins` counts.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockHistograms {
    n_blocks: usize,
    n_bins: usize,
    counts: Vec<f64>,
}

impl BlockHistograms {
    /// Wrap precomputed counts laid out block after block.
    pub fn from_counts(n_bins: usize, counts: Vec<f64>) -> Option<Self> {
        if n_bins == 0 || counts.len() % n_bins != 0 {
            return None;
        }
        Some(Self {
            n_blocks: counts.len() / n_bins,
            n_bins,
            counts,
        })
    }

    pub fn n_blocks(&self) -> usize {
        self.n_blocks
    }

    pub fn n_bins(&self) -> usize {
        self.n_bins
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.counts.chunks_exact(self.n_bins)
    }
}

/// Local binary pattern histogram sequence of `image`.
///
/// The operator runs over the whole image (wrapping at the borders), then the
/// label image is cut into blocks and each block is histogrammed. Bins hold
/// raw counts, so every histogram sums to the block's pixel count.
pub fn lbphs(
    image: &ImageF64,
    operator: &LbpOperator,
    geometry: &BlockGeometry,
) -> Result<BlockHistograms> {
    let rects = geometry.blocks(image.shape())?;
    let labels = operator.apply(image);
    let n_bins = operator.max_label();
    let mut counts = vec![0.0; rects.len() * n_bins];
    for (hist, rect) in counts.chunks_exact_mut(n_bins).zip(&rects) {
        for y in rect.y..rect.y + rect.h {
            let row = &labels[y * image.w + rect.x..y * image.w + rect.x + rect.w];
            for &label in row {
                hist[label as usize] += 1.0;
            }
        }
    }
    Ok(BlockHistograms {
        n_blocks: rects.len(),
        n_bins,
        counts,
    })
}
