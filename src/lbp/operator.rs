//! Local binary pattern operator.
//!
//! Each pixel is compared with `P` neighbours at distance `R`; bit `p`
//! (most significant first) is set when neighbour `p` is greater than or
//! equal to the reference value. Neighbour coordinates wrap around the image
//! borders, so the code image has the size of the input.
//!
//! Codes are mapped to `u32` labels through a lookup table that implements the
//! uniform and rotation-invariant alphabets:
//!
//! | uniform | rotation invariant | labels            |
//! |---------|--------------------|-------------------|
//! | no      | no                 | `2^P`             |
//! | yes     | no                 | `P(P-1) + 3`      |
//! | yes     | yes                | `P + 2`           |
//! | no      | yes                | rotation classes  |
//!
//! Label 0 collects the non-uniform patterns in the uniform alphabets. The
//! optional average bit doubles the label count.
use super::options::LbpOptions;
use crate::error::Result;
use crate::image::ImageF64;
use std::f64::consts::PI;

/// Offsets closer than this to an integer are snapped onto it.
const SNAP_EPSILON: f64 = 1e-6;

#[derive(Clone, Debug)]
pub struct LbpOperator {
    options: LbpOptions,
    /// `(dy, dx)` per neighbour.
    offsets: Vec<(f64, f64)>,
    lut: Vec<u32>,
    base_labels: usize,
}

impl LbpOperator {
    pub fn new(options: LbpOptions) -> Result<Self> {
        options.validate()?;
        let p = options.neighbor_count;
        let offsets = neighbor_offsets(&options);
        let (lut, base_labels) = match (options.uniform, options.rotation_invariant) {
            (true, false) => lut_uniform(p),
            (true, true) => lut_uniform_rotation_invariant(p),
            (false, true) => lut_rotation_invariant(p),
            (false, false) => ((0..1u32 << p).collect(), 1 << p),
        };
        Ok(Self {
            options,
            offsets,
            lut,
            base_labels,
        })
    }

    /// Size of the label alphabet, i.e. the histogram bin count.
    pub fn max_label(&self) -> usize {
        if self.options.uses_average_bit() {
            self.base_labels * 2
        } else {
            self.base_labels
        }
    }

    /// Neighbour offsets `(dy, dx)`.
    pub fn offsets(&self) -> &[(f64, f64)] {
        &self.offsets
    }

    /// Label of the pixel at `(x, y)`.
    pub fn label_at(&self, image: &ImageF64, x: usize, y: usize) -> u32 {
        let center = image.get(x, y);
        let p = self.offsets.len();
        let mut samples = [0.0f64; super::options::MAX_NEIGHBORS];
        for (s, &(dy, dx)) in samples.iter_mut().zip(&self.offsets) {
            *s = sample_wrapped(image, y as f64 + dy, x as f64 + dx);
        }
        let samples = &samples[..p];

        let reference = if self.options.compare_to_average {
            (samples.iter().sum::<f64>() + center) / (p + 1) as f64
        } else {
            center
        };
        let code = samples
            .iter()
            .fold(0usize, |code, &s| (code << 1) | usize::from(s >= reference));
        let label = self.lut[code];
        if self.options.uses_average_bit() {
            label * 2 + u32::from(center >= reference)
        } else {
            label
        }
    }

    /// Label image of the same size as `image`.
    pub fn apply(&self, image: &ImageF64) -> Vec<u32> {
        let mut out = Vec::with_capacity(image.w * image.h);
        for y in 0..image.h {
            for x in 0..image.w {
                out.push(self.label_at(image, x, y));
            }
        }
        out
    }
}

fn snap(v: f64) -> f64 {
    let r = v.round();
    if (v - r).abs() < SNAP_EPSILON {
        r
    } else {
        v
    }
}

fn neighbor_offsets(options: &LbpOptions) -> Vec<(f64, f64)> {
    let p = options.neighbor_count;
    (0..p)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / p as f64;
            let (sin, cos) = angle.sin_cos();
            if options.circular {
                (snap(-options.radius * sin), snap(options.radius * cos))
            } else {
                let r = options.radius.round();
                (-sin.round() * r, cos.round() * r)
            }
        })
        .collect()
}

#[inline]
fn wrap(i: i64, n: usize) -> usize {
    i.rem_euclid(n as i64) as usize
}

/// Bilinear sample at a fractional position, wrapping around the borders.
fn sample_wrapped(image: &ImageF64, y: f64, x: f64) -> f64 {
    let y0 = y.floor();
    let x0 = x.floor();
    let fy = y - y0;
    let fx = x - x0;
    let (y0, x0) = (y0 as i64, x0 as i64);
    let (w, h) = (image.w, image.h);
    let (ya, xa) = (wrap(y0, h), wrap(x0, w));
    if fy == 0.0 && fx == 0.0 {
        return image.get(xa, ya);
    }
    let (yb, xb) = (wrap(y0 + 1, h), wrap(x0 + 1, w));
    let lerp = |a: f64, b: f64, t: f64| a + (b - a) * t;
    let top = lerp(image.get(xa, ya), image.get(xb, ya), fx);
    let bottom = lerp(image.get(xa, yb), image.get(xb, yb), fx);
    lerp(top, bottom, fy)
}

#[inline]
fn rotate_right(code: usize, p: usize) -> usize {
    let mask = (1usize << p) - 1;
    ((code >> 1) | (code << (p - 1))) & mask
}

fn is_uniform(code: usize, p: usize) -> bool {
    (code ^ rotate_right(code, p)).count_ones() <= 2
}

fn min_rotation(code: usize, p: usize) -> usize {
    let mut best = code;
    let mut c = code;
    for _ in 1..p {
        c = rotate_right(c, p);
        best = best.min(c);
    }
    best
}

/// Non-uniform → 0, all-zero → 1, runs of `m` ones at each rotation, all-one last.
fn lut_uniform(p: usize) -> (Vec<u32>, usize) {
    let mut lut = vec![0u32; 1 << p];
    let mut next = 1u32;
    lut[0] = next;
    next += 1;
    for m in 1..p {
        let run = (1usize << m) - 1;
        let mut code = run;
        for _ in 0..p {
            lut[code] = next;
            next += 1;
            code = rotate_right(code, p);
        }
    }
    lut[(1 << p) - 1] = next;
    next += 1;
    (lut, next as usize)
}

/// Non-uniform → 0, uniform → number of ones + 1.
fn lut_uniform_rotation_invariant(p: usize) -> (Vec<u32>, usize) {
    let lut = (0..1usize << p)
        .map(|code| {
            if is_uniform(code, p) {
                code.count_ones() + 1
            } else {
                0
            }
        })
        .collect();
    (lut, p + 2)
}

/// One label per rotation class, ordered by the class's smallest code.
fn lut_rotation_invariant(p: usize) -> (Vec<u32>, usize) {
    let n = 1usize << p;
    let mut class_label = vec![u32::MAX; n];
    let mut lut = vec![0u32; n];
    let mut next = 0u32;
    for code in 0..n {
        let canonical = min_rotation(code, p);
        if class_label[canonical] == u32::MAX {
            class_label[canonical] = next;
            next += 1;
        }
        lut[code] = class_label[canonical];
    }
    (lut, next as usize)
}
