//! Owned single-channel f64 image in row-major layout (stride == width).
//!
//! This is the input type of the extractor and the storage type of the
//! magnitude and phase planes derived from the Gabor responses.
use crate::error::{LgbphsError, Result};
use crate::image::traits::{ImageView, ImageViewMut};

#[derive(Clone, Debug, PartialEq)]
pub struct ImageF64 {
    /// Image width in pixels
    pub w: usize,
    /// Image height in pixels
    pub h: usize,
    /// Number of f64 elements between consecutive rows (equals `w`)
    pub stride: usize,
    /// Backing storage in row-major order
    pub data: Vec<f64>,
}

impl ImageF64 {
    /// Construct a zero-initialized buffer of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            stride: w,
            data: vec![0.0; w * h],
        }
    }

    /// Wrap an existing row-major buffer, checking that it holds `w × h` values.
    pub fn from_vec(w: usize, h: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != w * h {
            return Err(LgbphsError::input(format!(
                "buffer of {} values does not describe a {w}x{h} image",
                data.len()
            )));
        }
        Ok(Self {
            w,
            h,
            stride: w,
            data,
        })
    }

    pub fn from_fn<F>(w: usize, h: usize, f: F) -> Self
    where
        F: Fn(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                data.push(f(x, y));
            }
        }
        Self {
            w,
            h,
            stride: w,
            data,
        }
    }

    /// `(height, width)`, the order used for block geometry.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.h, self.w)
    }

    #[inline]
    /// Convert (x, y) to a linear index into `data`.
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.stride + x
    }
    #[inline]
    /// Get the pixel value at (x, y).
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[self.idx(x, y)]
    }
    #[inline]
    /// Set the pixel value at (x, y).
    pub fn set(&mut self, x: usize, y: usize, v: f64) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }

    /// Check that the buffer can be processed: non-empty, consistent with its
    /// declared geometry, and free of NaN/infinite samples.
    pub fn validate(&self) -> Result<()> {
        if self.w == 0 || self.h == 0 {
            return Err(LgbphsError::input(format!(
                "image is empty ({}x{})",
                self.w, self.h
            )));
        }
        if self.stride < self.w {
            return Err(LgbphsError::input(format!(
                "stride {} is smaller than width {}",
                self.stride, self.w
            )));
        }
        let needed = self.stride * (self.h - 1) + self.w;
        if self.data.len() < needed {
            return Err(LgbphsError::input(format!(
                "buffer of {} values is too short for a {}x{} image with stride {}",
                self.data.len(),
                self.w,
                self.h,
                self.stride
            )));
        }
        for y in 0..self.h {
            if let Some(x) = self.row(y).iter().position(|v| !v.is_finite()) {
                return Err(LgbphsError::input(format!(
                    "non-finite pixel value at ({x}, {y})"
                )));
            }
        }
        Ok(())
    }
}

impl ImageView for ImageF64 {
    type Pixel = f64;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[f64] {
        let start = y * self.stride;
        &self.data[start..start + self.w]
    }
}

impl ImageViewMut for ImageF64 {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [f64] {
        let start = y * self.stride;
        let end = start + self.w;
        &mut self.data[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_rejects_wrong_length() {
        let err = ImageF64::from_vec(3, 2, vec![0.0; 5]).unwrap_err();
        assert!(matches!(err, LgbphsError::InvalidInput(_)));
        assert!(ImageF64::from_vec(3, 2, vec![0.0; 6]).is_ok());
    }

    #[test]
    fn validate_flags_empty_and_non_finite() {
        assert!(ImageF64::new(0, 4).validate().is_err());
        let mut img = ImageF64::new(4, 4);
        assert!(img.validate().is_ok());
        img.set(2, 3, f64::NAN);
        let err = img.validate().unwrap_err();
        assert_eq!(
            err,
            LgbphsError::InvalidInput("non-finite pixel value at (2, 3)".to_string())
        );
    }

    #[test]
    fn validate_checks_stride_against_buffer() {
        let img = ImageF64 {
            w: 4,
            h: 3,
            stride: 6,
            data: vec![0.0; 15],
        };
        assert!(img.validate().is_err());
        let img = ImageF64 {
            w: 4,
            h: 3,
            stride: 6,
            data: vec![0.0; 16],
        };
        assert!(img.validate().is_ok());
        assert_eq!(img.row(2).len(), 4);
    }
}
