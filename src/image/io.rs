//! I/O helpers for grayscale images and JSON.
//!
//! - `load_image_f64`: read a PNG/JPEG/etc. as gray values in `[0, 255]`.
//! - `gray_to_f64`: convert a decoded 8-bit gray image without rescaling.
//! - `save_normalized_png`: min/max-stretch an `ImageF64` into an 8-bit PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{ImageF64, ImageView};
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk as f64 gray values in `[0, 255]`.
pub fn load_image_f64(path: &Path) -> Result<ImageF64, String> {
    let gray = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    Ok(gray_to_f64(&gray))
}

/// Copy 8-bit gray levels into an `ImageF64`.
pub fn gray_to_f64(gray: &GrayImage) -> ImageF64 {
    let w = gray.width() as usize;
    let h = gray.height() as usize;
    ImageF64 {
        w,
        h,
        stride: w,
        data: gray.pixels().map(|p| f64::from(p[0])).collect(),
    }
}

/// Save a float plane to a grayscale PNG, stretching `[min, max]` to `[0, 255]`.
///
/// Constant planes are written black.
pub fn save_normalized_png(image: &ImageF64, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let (lo, hi) = image
        .rows()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = hi - lo;
    let scale = if range > 0.0 { 255.0 / range } else { 0.0 };
    let mut out = GrayImage::new(image.w as u32, image.h as u32);
    for (y, row) in image.rows().enumerate() {
        for (x, &px) in row.iter().enumerate() {
            let v = ((px - lo) * scale).round().clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
