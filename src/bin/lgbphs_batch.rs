//! Extracts features for many images in parallel.
//!
//! Each rayon worker owns its own extractor, so the transform cache is never
//! shared between threads.
use lgbphs::config::batch::{self, BatchToolConfig};
use lgbphs::image::io::{load_image_f64, write_json_file};
use lgbphs::{Features, LgbphsExtractor};
use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = batch::load_config(Path::new(&config_path))?;

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(threads) = config.threads {
        builder = builder.num_threads(threads);
    }
    let pool = builder
        .build()
        .map_err(|e| format!("Failed to start worker pool: {e}"))?;

    let start = Instant::now();
    let results: Vec<(PathBuf, Result<PathBuf, String>)> =
        pool.install(|| process_all(&config));

    let mut failed = 0usize;
    for (input, result) in &results {
        match result {
            Ok(out) => println!("{} -> {}", input.display(), out.display()),
            Err(err) => {
                failed += 1;
                eprintln!("{}: {err}", input.display());
            }
        }
    }
    println!(
        "Processed {} images ({} failed) in {:.1} ms",
        results.len(),
        failed,
        start.elapsed().as_secs_f64() * 1000.0
    );
    if failed > 0 {
        return Err(format!("{failed} of {} images failed", results.len()));
    }
    Ok(())
}

fn process_all(config: &BatchToolConfig) -> Vec<(PathBuf, Result<PathBuf, String>)> {
    config
        .inputs
        .par_iter()
        .map_init(
            || LgbphsExtractor::new(config.params.clone()),
            |extractor, input| {
                let result = match extractor {
                    Ok(extractor) => process_one(extractor, input, &config.output_dir),
                    Err(err) => Err(err.to_string()),
                };
                (input.clone(), result)
            },
        )
        .collect()
}

fn process_one(
    extractor: &mut LgbphsExtractor,
    input: &Path,
    output_dir: &Path,
) -> Result<PathBuf, String> {
    let image = load_image_f64(input)?;
    let features = extractor.extract(&image).map_err(|e| e.to_string())?;
    let stem = input
        .file_stem()
        .ok_or_else(|| format!("{} has no file name", input.display()))?;
    let out = output_dir.join(format!("{}.json", stem.to_string_lossy()));
    write_json_file(
        &out,
        &BatchEntry {
            image: input.display().to_string(),
            width: image.w,
            height: image.h,
            features: &features,
        },
    )?;
    Ok(out)
}

fn usage() -> String {
    "Usage: lgbphs_batch <config.json>".to_string()
}

#[derive(Serialize)]
struct BatchEntry<'a> {
    image: String,
    width: usize,
    height: usize,
    features: &'a Features,
}
