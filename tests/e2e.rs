mod common;

use common::synthetic_image::{checkerboard, textured_blob};
use lgbphs::gabor::GaborOptions;
use lgbphs::lbp::LbpOptions;
use lgbphs::{FeatureShape, Features, LgbphsExtractor, LgbphsParams, SplitMode};

/// 8x8 blocks, one wavelet, uniform rotation-invariant LBP8 (10 labels).
fn scenario_params(split: Option<SplitMode>) -> LgbphsParams {
    LgbphsParams {
        block_size: (8, 8),
        block_overlap: (0, 0),
        gabor: GaborOptions {
            scales: 1,
            directions: 1,
            ..Default::default()
        },
        use_phases: false,
        lbp: LbpOptions {
            neighbor_count: 8,
            uniform: true,
            rotation_invariant: true,
            ..Default::default()
        },
        split,
        ..Default::default()
    }
}

#[test]
fn flat_sequence_of_64_blocks_with_10_bins() {
    let _ = env_logger::builder().is_test(true).try_init();
    let image = textured_blob(64, 64);
    let mut extractor = LgbphsExtractor::new(scenario_params(None)).unwrap();
    assert_eq!(extractor.n_bins(), 10);

    let features = extractor.extract(&image).unwrap();
    let dense = features.as_dense().expect("dense output without sparse flag");
    assert_eq!(dense.shape(), FeatureShape::Vector(640));
    for hist in dense.as_slice().chunks_exact(10) {
        assert!(hist.iter().all(|&c| c >= 0.0));
        assert_eq!(hist.iter().sum::<f64>(), 64.0);
    }
}

#[test]
fn both_split_gives_one_row_per_block() {
    let image = textured_blob(64, 64);
    let mut extractor = LgbphsExtractor::new(scenario_params(Some(SplitMode::Both))).unwrap();
    let features = extractor.extract(&image).unwrap();
    let dense = features.as_dense().unwrap();
    assert_eq!(dense.shape(), FeatureShape::Matrix { rows: 64, cols: 10 });
    for r in 0..dense.rows() {
        let row = dense.row(r).unwrap();
        assert!(row.iter().all(|&c| c >= 0.0));
        assert_eq!(row.iter().sum::<f64>(), 64.0);
    }

    let mut flat = LgbphsExtractor::new(scenario_params(None)).unwrap();
    let flat = flat.extract(&image).unwrap();
    assert_eq!(flat.as_dense().unwrap().as_slice(), dense.as_slice());
}

#[test]
fn blocks_split_rows_hold_every_pass() {
    let image = checkerboard(64, 64, 8);
    let mut params = scenario_params(Some(SplitMode::Blocks));
    params.block_size = (16, 16);
    params.gabor.directions = 2;
    params.use_phases = true;
    let mut extractor = LgbphsExtractor::new(params).unwrap();
    assert_eq!(extractor.jet_length(), 4);
    let features = extractor.extract(&image).unwrap();
    let dense = features.as_dense().unwrap();
    assert_eq!(dense.shape(), FeatureShape::Matrix { rows: 16, cols: 40 });
    for r in 0..dense.rows() {
        for pass in dense.row(r).unwrap().chunks_exact(10) {
            assert_eq!(pass.iter().sum::<f64>(), 256.0, "block {r}");
        }
    }
}

#[test]
fn default_configuration_runs_on_face_sized_image() {
    let image = textured_blob(80, 64);
    let mut extractor = LgbphsExtractor::new(LgbphsParams::default()).unwrap();
    let features = extractor.extract(&image).unwrap();
    let Features::Dense(dense) = features else {
        panic!("expected dense features");
    };
    // 10x10 blocks on 80 wide x 64 high: 6 rows x 8 columns
    assert_eq!(dense.len(), 48 * 59 * 40);
}
