//! End-to-end behaviour of both metrics through the public API.

mod common;

use enhance_iqa::gray::{luminance, max_channel, rgba_from_bytes};
use enhance_iqa::loe::lightness_order_gray;
use enhance_iqa::{
    lightness_order, naturalness, DiagonalSlots, GrayMap, IqaError, LightnessOrderParams,
    LightnessOrderReference, NaturalnessModel, NaturalnessParams, NoopObserver, QualityAssessor,
    Rating, RatingScale,
};
use common::generators::{
    brighten_gamma, centred_model, gen_noise, gen_scene, gen_uniform, map_channels, mirror,
    synthetic_model,
};

// ============================================================================
// Lightness order
// ============================================================================

#[test]
fn lightness_order_identical_is_zero() {
    let img = gen_scene(160, 120, 1);
    let result = lightness_order(img.as_ref(), img.as_ref(), &LightnessOrderParams::default())
        .expect("valid input");
    assert_eq!(result.score, 0.0);
    assert_eq!(result.mismatches, 0);
}

#[test]
fn lightness_order_ignores_uniform_offset() {
    // a strictly increasing tone curve never reorders anything
    let img = gen_scene(120, 90, 2);
    assert!(img.buf().iter().all(|p| p.r <= 235));
    let brighter = map_channels(&img, |v| v + 20);
    let result = lightness_order(img.as_ref(), brighter.as_ref(), &LightnessOrderParams::default())
        .expect("valid input");
    assert_eq!(result.score, 0.0);
}

#[test]
fn lightness_order_is_symmetric() {
    let params = LightnessOrderParams::default().with_window(3);
    for seed in 0..3 {
        let a = gen_noise(70, 50, seed);
        let b = gen_scene(70, 50, seed + 10);
        let ab = lightness_order(a.as_ref(), b.as_ref(), &params).expect("valid input");
        let ba = lightness_order(b.as_ref(), a.as_ref(), &params).expect("valid input");
        assert_eq!(ab.score, ba.score, "seed {seed}");
        assert_eq!(ab.mismatches, ba.mismatches);
    }
}

#[test]
fn lightness_order_ranks_reordering_above_tone_mapping() {
    let img = gen_scene(200, 150, 3);
    let params = LightnessOrderParams::default();
    let gamma = lightness_order(img.as_ref(), brighten_gamma(&img, 0.6).as_ref(), &params)
        .expect("valid input");
    let mirrored =
        lightness_order(img.as_ref(), mirror(&img).as_ref(), &params).expect("valid input");
    assert!(
        gamma.score < mirrored.score,
        "gamma {} should be below mirror {}",
        gamma.score,
        mirrored.score
    );
}

#[test]
fn lightness_order_grid_for_large_image() {
    let img = gen_uniform(640, 480, 30, 40, 50);
    let result = lightness_order(img.as_ref(), img.as_ref(), &LightnessOrderParams::default())
        .expect("valid input");
    assert_eq!(result.grid.step, 9);
    assert_eq!((result.grid.rows, result.grid.cols), (53, 71));
}

#[test]
fn lightness_order_degenerate_and_mismatched_inputs() {
    let empty = GrayMap::new(12, 0);
    let err = lightness_order_gray(&empty, &empty, &LightnessOrderParams::default(), &NoopObserver)
        .unwrap_err();
    assert_eq!(
        err,
        IqaError::DegenerateGrid {
            width: 12,
            height: 0
        }
    );

    let a = gen_noise(20, 10, 1);
    let b = gen_noise(10, 20, 1);
    assert!(matches!(
        lightness_order(a.as_ref(), b.as_ref(), &LightnessOrderParams::default()),
        Err(IqaError::DimensionMismatch { .. })
    ));

    assert!(matches!(
        rgba_from_bytes(&[], 0, 0),
        Err(IqaError::EmptyImage { .. })
    ));
}

#[test]
fn lightness_order_tiny_image_with_large_window() {
    // window radius far exceeds both sides; reflection still stays in range
    let a = gen_noise(3, 2, 4);
    let b = gen_noise(3, 2, 5);
    let result = lightness_order(a.as_ref(), b.as_ref(), &LightnessOrderParams::default())
        .expect("valid input");
    assert!(result.score >= 0.0);
    assert_eq!(result.grid.cells(), 6);
}

#[test]
fn precomputed_reference_matches_one_shot() {
    let original = gen_scene(180, 100, 6);
    let params = LightnessOrderParams::default();
    let reference =
        LightnessOrderReference::new(original.as_ref(), params.clone()).expect("valid input");

    let candidates = [
        brighten_gamma(&original, 0.5),
        brighten_gamma(&original, 0.8),
        mirror(&original),
        gen_noise(180, 100, 7),
    ];
    for candidate in &candidates {
        let precomputed = reference.compare(candidate.as_ref()).expect("same size");
        let one_shot =
            lightness_order(original.as_ref(), candidate.as_ref(), &params).expect("valid input");
        assert_eq!(precomputed, one_shot);
    }

    let gray = LightnessOrderReference::from_gray(&max_channel(original.as_ref()), params)
        .expect("valid input");
    let candidate = max_channel(candidates[0].as_ref());
    assert_eq!(
        gray.compare_gray(&candidate).expect("same size"),
        reference.compare(candidates[0].as_ref()).expect("same size")
    );
}

// ============================================================================
// Naturalness
// ============================================================================

#[test]
fn naturalness_flat_image_has_no_valid_patches() {
    let flat = gen_uniform(200, 200, 128, 128, 128);
    let err = naturalness(flat.as_ref(), &synthetic_model(1), &NaturalnessParams::default())
        .unwrap_err();
    assert_eq!(
        err,
        IqaError::NoValidPatches {
            width: 200,
            height: 200,
            patch_size: 96
        }
    );
}

#[test]
fn naturalness_image_smaller_than_patch() {
    let img = gen_noise(80, 200, 2);
    let err =
        naturalness(img.as_ref(), &synthetic_model(1), &NaturalnessParams::default()).unwrap_err();
    assert!(matches!(err, IqaError::NoValidPatches { .. }));
}

#[test]
fn naturalness_scores_are_finite_and_non_negative() {
    let model = synthetic_model(3);
    for seed in 0..3 {
        let img = gen_scene(200, 200, seed);
        let result =
            naturalness(img.as_ref(), &model, &NaturalnessParams::default()).expect("valid input");
        assert!(result.score.is_finite() && result.score >= 0.0);
        assert_eq!(result.patches_total, 4);
        assert!(result.mean_features[18..].iter().all(|&v| v == 0.0));
    }
}

#[test]
fn naturalness_is_zero_at_model_mean() {
    let img = gen_noise(192, 96, 9);
    let params = NaturalnessParams::default();
    let first = naturalness(img.as_ref(), &synthetic_model(2), &params).expect("valid input");
    let centred = centred_model(&first.mean_features);
    let again = naturalness(img.as_ref(), &centred, &params).expect("valid input");
    assert_eq!(again.score, 0.0);
    assert_eq!(again.mean_features, first.mean_features);
}

#[test]
fn naturalness_diagonal_slot_layouts() {
    let gray = luminance(gen_noise(96, 96, 11).as_ref());
    let model = synthetic_model(4);
    let compatible = enhance_iqa::naturalness::naturalness_gray(
        &gray,
        &model,
        &NaturalnessParams::default(),
        &NoopObserver,
    )
    .expect("valid input");
    let shape = enhance_iqa::naturalness::naturalness_gray(
        &gray,
        &model,
        &NaturalnessParams::default().with_diagonal_slots(DiagonalSlots::ShapeAndScale),
        &NoopObserver,
    )
    .expect("valid input");

    assert_eq!(compatible.mean_features[8], compatible.mean_features[9]);
    assert_eq!(shape.mean_features[9], compatible.mean_features[9]);
    assert_ne!(shape.mean_features[8], compatible.mean_features[8]);
    assert_eq!(shape.mean_features[..8], compatible.mean_features[..8]);
}

// ============================================================================
// Models and assessor
// ============================================================================

#[test]
fn model_file_round_trip_through_assessor() {
    let dir = common::temp_dir("model");
    let path = dir.join("model.json");
    let model = synthetic_model(5);
    model.save(&path).expect("writable temp dir");

    let loaded = NaturalnessModel::load(&path).expect("valid model file");
    assert_eq!(loaded, model);

    let assessor = QualityAssessor::new()
        .with_model_file(&path)
        .expect("valid model file");
    let img = gen_scene(100, 100, 1);
    let via_assessor = assessor.naturalness(img.as_ref()).expect("valid input");
    let direct =
        naturalness(img.as_ref(), &model, &NaturalnessParams::default()).expect("valid input");
    assert_eq!(via_assessor.score, direct.score);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn model_load_errors() {
    let dir = common::temp_dir("bad-model");
    assert!(matches!(
        NaturalnessModel::load(dir.join("missing.json")),
        Err(IqaError::ModelIo(_))
    ));

    let path = dir.join("short.json");
    std::fs::write(
        &path,
        r#"{"format":"enhance-iqa-model","version":1,"mean":[0.0],"covariance":[]}"#,
    )
    .expect("writable temp dir");
    assert!(matches!(
        QualityAssessor::new().with_model_file(&path),
        Err(IqaError::InvalidModel(_))
    ));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn assessor_without_model() {
    let img = gen_scene(64, 64, 1);
    let assessor = QualityAssessor::new();
    assert_eq!(
        assessor.naturalness(img.as_ref()).unwrap_err(),
        IqaError::ModelNotLoaded
    );
    assert!(assessor.lightness_order(img.as_ref(), img.as_ref()).is_ok());
}

#[test]
fn ratings_of_computed_scores() {
    let img = gen_scene(100, 80, 2);
    let result = lightness_order(img.as_ref(), img.as_ref(), &LightnessOrderParams::default())
        .expect("valid input");
    assert_eq!(RatingScale::LIGHTNESS_ORDER.rate(result.score), Rating::Excellent);
}
