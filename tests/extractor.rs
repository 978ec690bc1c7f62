mod common;

use common::synthetic_image::textured_blob;
use lgbphs::gabor::{GaborBank, GaborOptions, GaborWorkspace};
use lgbphs::image::ImageF64;
use lgbphs::lbp::{lbphs, BlockGeometry, LbpOperator, LbpOptions};
use lgbphs::{
    sparsify, FeatureShape, Features, LgbphsError, LgbphsExtractor, LgbphsParams, SplitMode,
};

fn small_params() -> LgbphsParams {
    LgbphsParams {
        block_size: (8, 8),
        block_overlap: (4, 4),
        gabor: GaborOptions {
            scales: 2,
            directions: 2,
            ..Default::default()
        },
        lbp: LbpOptions {
            radius: 1.0,
            ..Default::default()
        },
        ..Default::default()
    }
}

fn extract(params: LgbphsParams, image: &ImageF64) -> Features {
    LgbphsExtractor::new(params).unwrap().extract(image).unwrap()
}

#[test]
fn repeated_extraction_is_bit_identical() {
    let image = textured_blob(32, 24);
    let mut extractor = LgbphsExtractor::new(small_params()).unwrap();
    let a = extractor.extract(&image).unwrap();
    let b = extractor.extract(&image).unwrap();
    let c = extract(small_params(), &image);
    assert_eq!(a, b);
    assert_eq!(a, c);
}

#[test]
fn output_shapes_follow_split_mode() {
    let image = textured_blob(32, 24);
    // overlap 4, step 4: (24-4)/4 = 5 rows, (32-4)/4 = 7 columns
    let n_blocks = 35;
    let n_bins = 59;
    for use_phases in [false, true] {
        let jet = 4 * if use_phases { 2 } else { 1 };
        let expected = [
            (None, FeatureShape::Vector(n_blocks * n_bins * jet)),
            (
                Some(SplitMode::Blocks),
                FeatureShape::Matrix {
                    rows: n_blocks,
                    cols: n_bins * jet,
                },
            ),
            (
                Some(SplitMode::Wavelets),
                FeatureShape::Matrix {
                    rows: jet,
                    cols: n_bins * n_blocks,
                },
            ),
            (
                Some(SplitMode::Both),
                FeatureShape::Matrix {
                    rows: jet * n_blocks,
                    cols: n_bins,
                },
            ),
        ];
        for (split, shape) in expected {
            let params = LgbphsParams {
                use_phases,
                split,
                ..small_params()
            };
            let extractor = LgbphsExtractor::new(params.clone()).unwrap();
            assert_eq!(extractor.jet_length(), jet);
            let features = extract(params, &image);
            assert_eq!(features.as_dense().unwrap().shape(), shape, "{split:?}");
        }
    }
}

#[test]
fn split_layouts_hold_the_same_histograms() {
    let image = textured_blob(32, 24);
    let base = LgbphsParams {
        use_phases: true,
        ..small_params()
    };
    let flat = extract(base.clone(), &image);
    let flat = flat.as_dense().unwrap().as_slice().to_vec();
    let (n_bins, n_blocks, jet) = (59, 35, 8);
    let hist = |j: usize, b: usize| {
        let start = j * n_bins * n_blocks + b * n_bins;
        &flat[start..start + n_bins]
    };

    let blocks = extract(
        LgbphsParams {
            split: Some(SplitMode::Blocks),
            ..base.clone()
        },
        &image,
    );
    let blocks = blocks.as_dense().unwrap();
    let wavelets = extract(
        LgbphsParams {
            split: Some(SplitMode::Wavelets),
            ..base.clone()
        },
        &image,
    );
    let wavelets = wavelets.as_dense().unwrap();

    for j in 0..jet {
        for b in 0..n_blocks {
            let row_b = blocks.row(b).unwrap();
            assert_eq!(&row_b[j * n_bins..(j + 1) * n_bins], hist(j, b));
            let row_j = wavelets.row(j).unwrap();
            assert_eq!(&row_j[b * n_bins..(b + 1) * n_bins], hist(j, b));
        }
    }
}

#[test]
fn phase_passes_follow_magnitude_passes() {
    let image = textured_blob(32, 24);
    let params = small_params();
    let magnitude_only = extract(params.clone(), &image);
    let magnitude_only = magnitude_only.as_dense().unwrap().as_slice().to_vec();
    let with_phases = extract(
        LgbphsParams {
            use_phases: true,
            ..params.clone()
        },
        &image,
    );
    let with_phases = with_phases.as_dense().unwrap().as_slice().to_vec();
    assert_eq!(with_phases.len(), 2 * magnitude_only.len());

    let half = magnitude_only.len();
    assert_eq!(&with_phases[..half], magnitude_only.as_slice());

    // second half comes from LBP histograms of the phase planes
    let bank = GaborBank::new(params.gabor).unwrap();
    let mut workspace = GaborWorkspace::new();
    let responses = bank.transform(&image, &mut workspace).unwrap();
    let operator = LbpOperator::new(params.lbp).unwrap();
    let geometry = BlockGeometry::new(params.block_size, params.block_overlap).unwrap();
    let mut expected = Vec::with_capacity(half);
    for j in 0..bank.wavelet_count() {
        let phase = lbphs(&responses.phase(j), &operator, &geometry).unwrap();
        for h in phase.iter() {
            expected.extend_from_slice(h);
        }
    }
    assert_eq!(&with_phases[half..], expected.as_slice());
    assert_ne!(&with_phases[half..], magnitude_only.as_slice());
}

#[test]
fn sparse_output_matches_dense_non_zeros() {
    let image = textured_blob(32, 24);
    let dense = extract(small_params(), &image);
    let sparse = extract(
        LgbphsParams {
            sparse: true,
            ..small_params()
        },
        &image,
    );
    let s = sparse.as_sparse().expect("sparse output");
    let d = dense.as_dense().unwrap();
    assert_eq!(s.dense_len(), d.len());
    assert!(s.indices().windows(2).all(|w| w[0] < w[1]));
    assert!(s.values().iter().all(|&v| v != 0.0));
    assert_eq!(&s.to_dense(), d);
    // histogram counts are sparse in practice
    assert!(s.nnz() < d.len());

    assert_eq!(sparsify(sparse.clone()).unwrap(), sparse);
    assert_eq!(sparsify(dense).unwrap(), sparse);
}

#[test]
fn single_pixel_and_whole_image_blocks() {
    let image = textured_blob(6, 5);
    let params = LgbphsParams {
        block_size: (1, 1),
        gabor: GaborOptions {
            scales: 1,
            directions: 1,
            ..Default::default()
        },
        lbp: LbpOptions {
            radius: 1.0,
            ..Default::default()
        },
        ..Default::default()
    };
    let features = extract(params.clone(), &image);
    let dense = features.as_dense().unwrap();
    assert_eq!(dense.len(), 30 * 59);
    for h in dense.as_slice().chunks_exact(59) {
        assert_eq!(h.iter().sum::<f64>(), 1.0);
    }

    let whole = LgbphsParams {
        block_size: (5, 6),
        split: Some(SplitMode::Both),
        ..params
    };
    let features = extract(whole, &image);
    let dense = features.as_dense().unwrap();
    assert_eq!(dense.shape(), FeatureShape::Matrix { rows: 1, cols: 59 });
    assert_eq!(dense.row(0).unwrap().iter().sum::<f64>(), 30.0);
}

#[test]
fn invalid_images_are_rejected() {
    let mut extractor = LgbphsExtractor::new(small_params()).unwrap();
    let empty = ImageF64::new(0, 0);
    assert!(matches!(
        extractor.extract(&empty),
        Err(LgbphsError::InvalidInput(_))
    ));
    let mut nan = textured_blob(16, 16);
    nan.set(3, 3, f64::NAN);
    assert!(matches!(
        extractor.extract(&nan),
        Err(LgbphsError::InvalidInput(_))
    ));
    // rejected before any transform buffers exist
    assert_eq!(extractor.workspace().allocations(), 0);
    let small = textured_blob(7, 16);
    assert!(matches!(
        extractor.extract(&small),
        Err(LgbphsError::InvalidInput(_))
    ));
}

#[test]
fn construction_fails_fast() {
    let overlap = LgbphsParams {
        block_size: (4, 4),
        block_overlap: (5, 5),
        ..Default::default()
    };
    assert!(matches!(
        LgbphsExtractor::new(overlap),
        Err(LgbphsError::InvalidConfiguration(_))
    ));
    let sparse_split = LgbphsParams {
        sparse: true,
        split: Some(SplitMode::Blocks),
        ..Default::default()
    };
    assert!(matches!(
        LgbphsExtractor::new(sparse_split),
        Err(LgbphsError::InvalidConfiguration(_))
    ));
}

#[test]
fn transform_cache_follows_image_shape() {
    let mut extractor = LgbphsExtractor::new(small_params()).unwrap();
    let a = textured_blob(32, 32);
    let b = textured_blob(40, 24);
    let first = extractor.extract(&a).unwrap();
    assert_eq!(extractor.workspace().shape(), Some((32, 32)));
    extractor.extract(&b).unwrap();
    assert_eq!(extractor.workspace().shape(), Some((24, 40)));
    let again = extractor.extract(&a).unwrap();
    assert_eq!(extractor.workspace().allocations(), 3);
    assert_eq!(first, again);
}
