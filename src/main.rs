use lgbphs::image::ImageF64;
use lgbphs::{Features, LgbphsExtractor, LgbphsParams};

fn main() {
    // Demo stub: runs the default extractor on a synthetic 80x64 face-sized image
    let (w, h) = (64usize, 80usize);
    let image = ImageF64::from_fn(w, h, |x, y| {
        let (cx, cy) = (x as f64 - 32.0, y as f64 - 40.0);
        128.0 + 100.0 * (-(cx * cx + cy * cy) / 800.0).exp() * (x as f64 * 0.7).cos()
    });

    let mut extractor = match LgbphsExtractor::new(LgbphsParams::default()) {
        Ok(ex) => ex,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    match extractor.extract(&image) {
        Ok(Features::Dense(dense)) => {
            let nnz = dense.as_slice().iter().filter(|&&v| v != 0.0).count();
            println!("dense shape={:?} non_zero={}", dense.shape().dims(), nnz);
        }
        Ok(Features::Sparse(sparse)) => {
            println!("sparse len={} non_zero={}", sparse.dense_len(), sparse.nnz());
        }
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
