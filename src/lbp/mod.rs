//! Local binary patterns and block histogram sequences.
pub mod blocks;
pub mod operator;
pub mod options;

pub use blocks::{lbphs, BlockGeometry, BlockHistograms, BlockRect};
pub use operator::LbpOperator;
pub use options::LbpOptions;
