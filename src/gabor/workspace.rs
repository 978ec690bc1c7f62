//! Shape-keyed cache for the Gabor transform.
//!
//! Holds the FFT plans, the sampled wavelets and the complex response volume
//! for one image resolution. Everything is built on the first transform and
//! reused while the image shape (and bank) stays the same; a new shape drops
//! the cache and allocates again.
use super::fft::Fft2;
use super::options::GaborOptions;
use super::wavelet::Wavelet;
use super::GaborResponses;
use log::debug;
use num_complex::Complex64;
use std::time::Instant;

/// Reusable buffers for [`GaborBank::transform`](super::GaborBank::transform).
///
/// Not meant to be shared: a workspace serves one transform at a time.
#[derive(Default)]
pub struct GaborWorkspace {
    cache: Option<ShapeCache>,
    allocations: usize,
}

pub(crate) struct ShapeCache {
    shape: (usize, usize),
    options: GaborOptions,
    pub(crate) fft: Fft2,
    pub(crate) wavelets: Vec<Wavelet>,
    pub(crate) spectrum: Vec<Complex64>,
    pub(crate) responses: GaborResponses,
}

impl GaborWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(height, width)` of the cached buffers, if any.
    pub fn shape(&self) -> Option<(usize, usize)> {
        self.cache.as_ref().map(|c| c.shape)
    }

    /// Number of times buffers were (re)allocated over the workspace lifetime.
    pub fn allocations(&self) -> usize {
        self.allocations
    }

    /// Responses of the most recent transform.
    pub fn responses(&self) -> Option<&GaborResponses> {
        self.cache.as_ref().map(|c| &c.responses)
    }

    /// Drop all cached buffers; the next transform allocates again.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Return buffers sized for `shape` and `options`, reallocating when either changed.
    pub(crate) fn ensure(
        &mut self,
        options: &GaborOptions,
        frequencies: &[[f64; 2]],
        shape: (usize, usize),
    ) -> &mut ShapeCache {
        let stale = matches!(
            &self.cache,
            Some(c) if c.shape != shape || c.options != *options
        );
        if stale {
            self.cache = None;
        }
        let allocations = &mut self.allocations;
        self.cache.get_or_insert_with(|| {
            let start = Instant::now();
            let (h, w) = shape;
            let wavelets: Vec<Wavelet> = frequencies
                .iter()
                .map(|&k| {
                    Wavelet::new(k, shape, options.sigma, options.power_of_k, options.dc_free)
                })
                .collect();
            *allocations += 1;
            debug!(
                "GaborWorkspace: allocated {} wavelets for {}x{} in {:.3} ms",
                wavelets.len(),
                w,
                h,
                start.elapsed().as_secs_f64() * 1000.0
            );
            ShapeCache {
                shape,
                options: *options,
                fft: Fft2::new(h, w),
                spectrum: vec![Complex64::new(0.0, 0.0); h * w],
                responses: GaborResponses::new(wavelets.len(), h, w),
                wavelets,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_change_rebuilds_cache() {
        let options = GaborOptions {
            directions: 2,
            scales: 1,
            ..Default::default()
        };
        let mut ws = GaborWorkspace::new();
        let freqs = options.kernel_frequencies();
        assert_eq!(ws.ensure(&options, &freqs, (8, 6)).wavelets.len(), 2);
        ws.ensure(&options, &freqs, (8, 6));
        assert_eq!(ws.allocations(), 1);

        let wider = GaborOptions {
            directions: 3,
            ..options
        };
        let freqs = wider.kernel_frequencies();
        let cache = ws.ensure(&wider, &freqs, (8, 6));
        assert_eq!(cache.wavelets.len(), 3);
        assert_eq!(cache.responses.wavelet_count(), 3);
        assert_eq!(ws.allocations(), 2);
        assert_eq!(ws.shape(), Some((8, 6)));
    }
}
