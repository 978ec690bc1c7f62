use crate::error::{LgbphsError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, PI};

/// Parameters of the Gabor wavelet family.
///
/// Kernel frequencies are `max_frequency · frequency_step^s` for each scale
/// `s`, at `directions` orientations evenly spaced over `[0, π)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaborOptions {
    pub directions: usize,
    pub scales: usize,
    /// Width of the Gaussian envelope, relative to the kernel frequency.
    pub sigma: f64,
    /// Absolute frequency of the finest scale (radians per pixel).
    pub max_frequency: f64,
    /// Factor between two consecutive scales (< 1 goes coarser).
    pub frequency_step: f64,
    /// Wavelets are multiplied by `|k|^power_of_k`.
    pub power_of_k: f64,
    /// Subtract the DC component so that flat regions give zero response.
    pub dc_free: bool,
}

impl Default for GaborOptions {
    fn default() -> Self {
        Self {
            directions: 8,
            scales: 5,
            sigma: 2.0 * PI,
            max_frequency: FRAC_PI_2,
            frequency_step: FRAC_1_SQRT_2,
            power_of_k: 0.0,
            dc_free: true,
        }
    }
}

impl GaborOptions {
    pub fn wavelet_count(&self) -> usize {
        self.scales * self.directions
    }

    pub fn validate(&self) -> Result<()> {
        if self.directions == 0 || self.scales == 0 {
            return Err(LgbphsError::config(format!(
                "Gabor bank needs at least one scale and one direction (got {} scales, {} directions)",
                self.scales, self.directions
            )));
        }
        for (name, value) in [
            ("sigma", self.sigma),
            ("max_frequency", self.max_frequency),
            ("frequency_step", self.frequency_step),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(LgbphsError::config(format!(
                    "Gabor {name} must be finite and positive (got {value})"
                )));
            }
        }
        if !self.power_of_k.is_finite() {
            return Err(LgbphsError::config("Gabor power_of_k must be finite"));
        }
        Ok(())
    }

    /// Kernel frequency vectors `(kx, ky)`, scale-major: index `s * directions + d`.
    pub fn kernel_frequencies(&self) -> Vec<[f64; 2]> {
        let mut out = Vec::with_capacity(self.wavelet_count());
        let mut k_abs = self.max_frequency;
        for _ in 0..self.scales {
            for d in 0..self.directions {
                let angle = d as f64 * PI / self.directions as f64;
                out.push([k_abs * angle.cos(), k_abs * angle.sin()]);
            }
            k_abs *= self.frequency_step;
        }
        out
    }
}
