use lgbphs::image::ImageF64;

/// Generates a simple high-contrast checkerboard image.
pub fn checkerboard(width: usize, height: usize, cell: usize) -> ImageF64 {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");
    ImageF64::from_fn(width, height, |x, y| {
        if ((x / cell) + (y / cell)) & 1 == 0 {
            32.0
        } else {
            220.0
        }
    })
}

/// Smooth blob with superimposed oriented texture, loosely face-sized.
pub fn textured_blob(width: usize, height: usize) -> ImageF64 {
    let (cx, cy) = (width as f64 / 2.0, height as f64 / 2.0);
    let spread = (width * height) as f64 / 8.0;
    ImageF64::from_fn(width, height, |x, y| {
        let (dx, dy) = (x as f64 - cx, y as f64 - cy);
        let envelope = (-(dx * dx + dy * dy) / spread).exp();
        let texture = (0.9 * x as f64 + 0.4 * y as f64).sin() + 0.5 * (0.3 * y as f64).cos();
        let noise = ((x * 7919 + y * 104_729) % 13) as f64;
        (96.0 + 80.0 * envelope * texture + noise).round()
    })
}
