//! Gabor wavelet transform.
//!
//! A [`GaborBank`] describes `scales × directions` complex wavelets. The
//! transform multiplies the image spectrum with each frequency-domain
//! wavelet and returns to the spatial domain, giving one complex response
//! plane per wavelet with the size of the input image.
//!
//! Buffers live in a caller-owned [`GaborWorkspace`] so repeated transforms
//! of same-sized images do not allocate.
mod fft;
pub mod options;
pub mod wavelet;
pub mod workspace;

pub use options::GaborOptions;
pub use wavelet::Wavelet;
pub use workspace::GaborWorkspace;

use crate::error::{LgbphsError, Result};
use crate::image::{ImageF64, ImageView, ImageViewMut};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Family of Gabor wavelets.
#[derive(Clone, Debug)]
pub struct GaborBank {
    options: GaborOptions,
    frequencies: Vec<[f64; 2]>,
}

impl GaborBank {
    pub fn new(options: GaborOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            frequencies: options.kernel_frequencies(),
            options,
        })
    }

    pub fn options(&self) -> &GaborOptions {
        &self.options
    }

    pub fn wavelet_count(&self) -> usize {
        self.frequencies.len()
    }

    /// Kernel frequency `(kx, ky)` of every wavelet, scale-major.
    pub fn kernel_frequencies(&self) -> &[[f64; 2]] {
        &self.frequencies
    }

    /// Transform `image` with every wavelet of the bank.
    pub fn transform<'w>(
        &self,
        image: &ImageF64,
        workspace: &'w mut GaborWorkspace,
    ) -> Result<&'w GaborResponses> {
        image.validate()?;
        self.transform_validated(image, workspace)
    }

    /// [`transform`](Self::transform) for an image that already passed
    /// [`ImageF64::validate`].
    pub(crate) fn transform_validated<'w>(
        &self,
        image: &ImageF64,
        workspace: &'w mut GaborWorkspace,
    ) -> Result<&'w GaborResponses> {
        let (h, w) = image.shape();
        let cache = workspace.ensure(&self.options, &self.frequencies, (h, w));

        for (y, row) in image.rows().enumerate() {
            let dst = &mut cache.spectrum[y * w..(y + 1) * w];
            for (d, &v) in dst.iter_mut().zip(row) {
                *d = Complex64::new(v, 0.0);
            }
        }
        cache.fft.forward(&mut cache.spectrum);

        for (j, wavelet) in cache.wavelets.iter().enumerate() {
            let plane = cache.responses.plane_mut(j);
            wavelet.apply(&cache.spectrum, plane);
            cache.fft.inverse(plane);
        }

        if cache.responses.wavelet_count() != self.wavelet_count() {
            return Err(LgbphsError::InternalConsistency(format!(
                "transform produced {} planes for a bank of {} wavelets",
                cache.responses.wavelet_count(),
                self.wavelet_count()
            )));
        }
        Ok(&cache.responses)
    }
}

/// Complex response volume indexed by (wavelet, row, column).
#[derive(Clone, Debug)]
pub struct GaborResponses {
    count: usize,
    h: usize,
    w: usize,
    data: Vec<Complex64>,
}

impl GaborResponses {
    pub fn new(count: usize, h: usize, w: usize) -> Self {
        Self {
            count,
            h,
            w,
            data: vec![Complex64::new(0.0, 0.0); count * h * w],
        }
    }

    pub fn wavelet_count(&self) -> usize {
        self.count
    }

    /// `(height, width)` of every plane.
    pub fn shape(&self) -> (usize, usize) {
        (self.h, self.w)
    }

    /// Row-major complex responses of wavelet `j`.
    pub fn plane(&self, j: usize) -> &[Complex64] {
        let n = self.h * self.w;
        &self.data[j * n..(j + 1) * n]
    }

    pub(crate) fn plane_mut(&mut self, j: usize) -> &mut [Complex64] {
        let n = self.h * self.w;
        &mut self.data[j * n..(j + 1) * n]
    }

    /// Absolute values `|z|` of wavelet `j`.
    pub fn magnitude(&self, j: usize) -> ImageF64 {
        self.map_plane(j, |z| z.norm())
    }

    /// Phases `atan2(Im, Re)` of wavelet `j`, in `(-π, π]`.
    pub fn phase(&self, j: usize) -> ImageF64 {
        self.map_plane(j, |z| {
            let p = z.im.atan2(z.re);
            if p <= -PI {
                PI
            } else {
                p
            }
        })
    }

    fn map_plane(&self, j: usize, f: impl Fn(&Complex64) -> f64) -> ImageF64 {
        let mut out = ImageF64::new(self.w, self.h);
        for (y, src) in self.plane(j).chunks_exact(self.w.max(1)).enumerate() {
            for (d, z) in out.row_mut(y).iter_mut().zip(src) {
                *d = f(z);
            }
        }
        out
    }
}
