//! Sparse representation of unsplit histogram sequences.
//!
//! Only exact zeros are dropped; small non-zero values are kept as they are.
use crate::error::{LgbphsError, Result};
use crate::types::{FeatureShape, Features, SparseFeatures};

/// Convert dense 1-D features to their non-zero entries.
///
/// Sparse input is returned unchanged, so applying this twice is the same as
/// applying it once. Split (2-D) features have no flat index and are rejected.
pub fn sparsify(features: Features) -> Result<Features> {
    match features {
        Features::Sparse(_) => Ok(features),
        Features::Dense(dense) => match dense.shape() {
            FeatureShape::Vector(_) => Ok(Features::Sparse(SparseFeatures::from_dense(
                dense.as_slice(),
            ))),
            FeatureShape::Matrix { rows, cols } => Err(LgbphsError::config(format!(
                "cannot sparsify split histograms of shape ({rows}, {cols})"
            ))),
        },
    }
}
