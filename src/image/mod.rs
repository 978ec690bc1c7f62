//! Image buffers consumed by the feature extractor.
//!
//! The extractor works on double-precision gray values (`ImageF64`). Decoded
//! 8-bit images are converted without rescaling, so pixel values stay in
//! `[0, 255]`.
pub mod f64;
pub mod io;
pub mod traits;

pub use self::f64::ImageF64;
pub use self::traits::{ImageView, ImageViewMut, Rows};
