use lgbphs::config::extract::{self, ExtractToolConfig};
use lgbphs::image::io::{load_image_f64, save_normalized_png, write_json_file};
use lgbphs::image::ImageF64;
use lgbphs::{Features, LgbphsExtractor};
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = extract::load_config(Path::new(&config_path))?;

    let image = load_image_f64(&config.input)?;
    let mut extractor = LgbphsExtractor::new(config.params.clone()).map_err(|e| e.to_string())?;
    let layout = extractor
        .layout_for(image.shape())
        .map_err(|e| format!("{}: {e}", config.input.display()))?;
    let features = extractor
        .extract(&image)
        .map_err(|e| format!("{}: {e}", config.input.display()))?;

    let summary = ExtractionSummary {
        image: config.input.display().to_string(),
        width: image.w,
        height: image.h,
        wavelet_count: extractor.wavelet_count(),
        jet_length: layout.jet_length(),
        n_blocks: layout.n_blocks(),
        n_bins: layout.n_bins(),
        features: &features,
    };
    write_json_file(&config.output.features_json, &summary)?;

    match &features {
        Features::Dense(dense) => println!(
            "Saved dense features {:?} to {}",
            dense.shape().dims(),
            config.output.features_json.display()
        ),
        Features::Sparse(sparse) => println!(
            "Saved {} of {} non-zero features to {}",
            sparse.nnz(),
            sparse.dense_len(),
            config.output.features_json.display()
        ),
    }

    if config.output.debug_dir.is_some() {
        save_debug_planes(&config, &extractor)?;
    }
    Ok(())
}

/// Dump the response planes cached by the last extraction.
fn save_debug_planes(config: &ExtractToolConfig, extractor: &LgbphsExtractor) -> Result<(), String> {
    let Some(dir) = &config.output.debug_dir else {
        return Ok(());
    };
    let responses = extractor
        .workspace()
        .responses()
        .ok_or("No Gabor responses cached")?;
    let save = |plane: ImageF64, name: String| save_normalized_png(&plane, &dir.join(name));
    for j in 0..responses.wavelet_count() {
        save(responses.magnitude(j), format!("magnitude_{j:02}.png"))?;
        if config.params.use_phases {
            save(responses.phase(j), format!("phase_{j:02}.png"))?;
        }
    }
    println!("Debug planes written to {}", dir.display());
    Ok(())
}

fn usage() -> String {
    "Usage: lgbphs_extract <config.json>".to_string()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtractionSummary<'a> {
    image: String,
    width: usize,
    height: usize,
    wavelet_count: usize,
    jet_length: usize,
    n_blocks: usize,
    n_bins: usize,
    features: &'a Features,
}
