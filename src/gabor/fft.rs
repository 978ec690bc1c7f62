//! Separable 2-D FFT on row-major complex buffers.
//!
//! Rows are transformed in place, columns through a transposed scratch
//! buffer. The inverse is normalised by `1 / (h · w)`.
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

pub(crate) struct Fft2 {
    h: usize,
    w: usize,
    row_forward: Arc<dyn Fft<f64>>,
    col_forward: Arc<dyn Fft<f64>>,
    row_inverse: Arc<dyn Fft<f64>>,
    col_inverse: Arc<dyn Fft<f64>>,
    scratch: Vec<Complex64>,
}

impl Fft2 {
    pub(crate) fn new(h: usize, w: usize) -> Self {
        let mut planner = FftPlanner::<f64>::new();
        Self {
            h,
            w,
            row_forward: planner.plan_fft_forward(w),
            col_forward: planner.plan_fft_forward(h),
            row_inverse: planner.plan_fft_inverse(w),
            col_inverse: planner.plan_fft_inverse(h),
            scratch: vec![Complex64::new(0.0, 0.0); h * w],
        }
    }

    pub(crate) fn forward(&mut self, data: &mut [Complex64]) {
        run_2d(
            data,
            &mut self.scratch,
            self.row_forward.as_ref(),
            self.col_forward.as_ref(),
            self.h,
            self.w,
        );
    }

    pub(crate) fn inverse(&mut self, data: &mut [Complex64]) {
        run_2d(
            data,
            &mut self.scratch,
            self.row_inverse.as_ref(),
            self.col_inverse.as_ref(),
            self.h,
            self.w,
        );
        let norm = 1.0 / (self.h * self.w) as f64;
        for v in data.iter_mut() {
            *v *= norm;
        }
    }
}

fn run_2d(
    data: &mut [Complex64],
    scratch: &mut [Complex64],
    row_fft: &dyn Fft<f64>,
    col_fft: &dyn Fft<f64>,
    h: usize,
    w: usize,
) {
    debug_assert_eq!(data.len(), h * w);
    // buffer length is a multiple of the plan length: one FFT per row
    row_fft.process(data);
    for y in 0..h {
        for x in 0..w {
            scratch[x * h + y] = data[y * w + x];
        }
    }
    col_fft.process(scratch);
    for x in 0..w {
        for y in 0..h {
            data[y * w + x] = scratch[x * h + y];
        }
    }
}
