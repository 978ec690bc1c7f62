//! Gabor wavelets sampled in the frequency domain.
//!
//! For kernel frequency `k` and angular frequency `ω` on the FFT grid,
//!
//! `ψ(ω) = |k|^p · ( exp(-σ²|ω-k|² / 2|k|²) − exp(-σ²(|ω|²+|k|²) / 2|k|²) )`
//!
//! where the second term is present only for DC-free wavelets. The kernel is
//! real and concentrated around `k`, so only taps above `WAVELET_EPSILON`
//! are stored.
use num_complex::Complex64;
use std::f64::consts::PI;

/// Frequency taps below this magnitude are dropped.
pub const WAVELET_EPSILON: f64 = 1e-10;

/// Angular frequency of FFT bin `i` out of `n`, wrapped to `(-π, π]`.
#[inline]
pub(crate) fn angular_frequency(i: usize, n: usize) -> f64 {
    let f = if i <= n / 2 {
        i as f64
    } else {
        i as f64 - n as f64
    };
    f * 2.0 * PI / n as f64
}

/// One frequency-domain wavelet for a fixed image resolution.
#[derive(Clone, Debug)]
pub struct Wavelet {
    h: usize,
    w: usize,
    /// `(row-major spectrum index, value)` for every retained tap.
    taps: Vec<(usize, f64)>,
}

impl Wavelet {
    pub fn new(
        kernel_frequency: [f64; 2],
        (h, w): (usize, usize),
        sigma: f64,
        power_of_k: f64,
        dc_free: bool,
    ) -> Self {
        let [kx, ky] = kernel_frequency;
        let k_square = kx * kx + ky * ky;
        let sigma_square = sigma * sigma;
        let factor = k_square.powf(power_of_k / 2.0);
        let denom = 2.0 * k_square;

        let mut taps = Vec::new();
        for y in 0..h {
            let oy = angular_frequency(y, h);
            for x in 0..w {
                let ox = angular_frequency(x, w);
                let diff = (ox - kx) * (ox - kx) + (oy - ky) * (oy - ky);
                let mut value = (-sigma_square * diff / denom).exp();
                if dc_free {
                    let omega_square = ox * ox + oy * oy;
                    value -= (-sigma_square * (omega_square + k_square) / denom).exp();
                }
                value *= factor;
                if value.abs() > WAVELET_EPSILON {
                    taps.push((y * w + x, value));
                }
            }
        }
        Self { h, w, taps }
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.h, self.w)
    }

    /// Write `spectrum · ψ` into `out`; bins outside the support are zeroed.
    pub fn apply(&self, spectrum: &[Complex64], out: &mut [Complex64]) {
        debug_assert_eq!(spectrum.len(), self.h * self.w);
        debug_assert_eq!(out.len(), spectrum.len());
        out.fill(Complex64::new(0.0, 0.0));
        for &(i, v) in &self.taps {
            out[i] = spectrum[i] * v;
        }
    }
}
