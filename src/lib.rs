#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod error;
pub mod extractor;
pub mod image;
pub mod types;

// Building blocks of the extractor, usable on their own.
pub mod gabor;
pub mod lbp;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::{LgbphsError, Result};
pub use crate::extractor::{sparsify, FeatureLayout, LgbphsExtractor, LgbphsParams, SplitMode};
pub use crate::types::{DenseFeatures, FeatureShape, Features, SparseFeatures};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use lgbphs::prelude::*;
///
/// # fn main() -> lgbphs::Result<()> {
/// let image = ImageF64::from_fn(64, 64, |x, y| ((x * y) % 255) as f64);
/// let mut extractor = LgbphsExtractor::new(LgbphsParams::with_square_blocks(8))?;
/// let features = extractor.extract(&image)?;
/// if let Features::Dense(dense) = features {
///     println!("{} values, shape {:?}", dense.len(), dense.shape());
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageF64;
    pub use crate::{Features, LgbphsExtractor, LgbphsParams, SplitMode};
}
