mod common;

use ndarray::Array3;

use common::{centered_square_image, flat_image, noise_image, rect_image, studio_scene};
use vehicle_mask_core::detection::label_components;
use vehicle_mask_core::frame::ColorImage;
use vehicle_mask_core::pipeline::{compute_mask, MaskSettings};
use vehicle_mask_core::MaskError;

fn settings_grid() -> Vec<MaskSettings> {
    let mut grid = Vec::new();
    for &white_cycle_mode in &[false, true] {
        for &feather in &[0, 2] {
            for &invert in &[false, true] {
                for &(dilate_iters, erode_iters) in &[(0, 0), (2, 1), (-1, -1)] {
                    for &min_area in &[0, 50, 5000] {
                        grid.push(MaskSettings {
                            white_cycle_mode,
                            feather,
                            invert,
                            dilate_iters,
                            erode_iters,
                            min_area,
                            ..MaskSettings::default()
                        });
                    }
                }
            }
        }
    }
    grid
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

#[test]
fn test_empty_image_is_rejected() {
    let err = ColorImage::new(Array3::<u8>::zeros((0, 5, 3))).unwrap_err();
    assert!(matches!(err, MaskError::InvalidDimensions { width: 5, height: 0 }));
}

#[test]
fn test_unvalidated_empty_image_is_rejected_by_pipeline() {
    let image = ColorImage {
        data: Array3::<u8>::zeros((4, 0, 3)),
    };
    let err = compute_mask(&image, &MaskSettings::default()).unwrap_err();
    assert!(matches!(err, MaskError::InvalidDimensions { .. }));
}

// ---------------------------------------------------------------------------
// Structural properties
// ---------------------------------------------------------------------------

#[test]
fn test_output_dimensions_match_input() {
    let settings = MaskSettings::default();
    for &(h, w) in &[(1, 1), (1, 7), (7, 1), (2, 2), (33, 17), (64, 100)] {
        let mask = compute_mask(&noise_image(h, w, 3), &settings).unwrap();
        assert_eq!((mask.height(), mask.width()), (h, w));
    }
}

#[test]
fn test_output_is_strictly_binary_for_all_options() {
    let images = [studio_scene(), noise_image(40, 50, 11)];
    for image in &images {
        for settings in settings_grid() {
            let mask = compute_mask(image, &settings).unwrap();
            assert!(mask.is_binary(), "non-binary output for {settings:?}");
        }
    }
}

#[test]
fn test_threshold_order_is_irrelevant() {
    let image = studio_scene();
    let forward = MaskSettings {
        edge_low: 50,
        edge_high: 150,
        min_area: 0,
        ..MaskSettings::default()
    };
    let swapped = MaskSettings {
        edge_low: 150,
        edge_high: 50,
        ..forward.clone()
    };
    assert_eq!(
        compute_mask(&image, &forward).unwrap(),
        compute_mask(&image, &swapped).unwrap()
    );
}

#[test]
fn test_invert_is_involutive() {
    for image in [studio_scene(), noise_image(30, 30, 5)] {
        let plain = MaskSettings {
            min_area: 100,
            feather: 1,
            ..MaskSettings::default()
        };
        let inverted = MaskSettings {
            invert: true,
            ..plain.clone()
        };
        let a = compute_mask(&image, &plain).unwrap();
        let b = compute_mask(&image, &inverted).unwrap();
        assert_eq!(b.inverted(), a);
    }
}

#[test]
fn test_min_area_is_monotonic() {
    let image = studio_scene();
    let mut previous = usize::MAX;
    for min_area in [0, 1, 20, 100, 1000, 4000, 5000, 8000, 50_000] {
        let settings = MaskSettings {
            min_area,
            ..MaskSettings::default()
        };
        let count = compute_mask(&image, &settings).unwrap().foreground_count();
        assert!(
            count <= previous,
            "min_area {min_area}: {count} > previous {previous}"
        );
        previous = count;
    }
}

#[test]
fn test_even_kernel_matches_next_odd() {
    let image = studio_scene();
    let six = MaskSettings {
        kernel_size: 6,
        min_area: 0,
        ..MaskSettings::default()
    };
    let seven = MaskSettings {
        kernel_size: 7,
        ..six.clone()
    };
    assert_eq!(
        compute_mask(&image, &six).unwrap(),
        compute_mask(&image, &seven).unwrap()
    );
}

#[test]
fn test_degenerate_parameters_do_not_fail() {
    let image = studio_scene();
    let settings = MaskSettings {
        edge_low: -40,
        edge_high: 100_000,
        kernel_size: -8,
        dilate_iters: -3,
        erode_iters: -1,
        white_cycle_mode: true,
        white_threshold: 999,
        min_area: -10,
        feather: -2,
        invert: false,
    };
    let mask = compute_mask(&image, &settings).unwrap();
    assert!(mask.is_binary());
}

#[test]
fn test_extreme_kernel_and_feather_sizes_stay_bounded() {
    let image = centered_square_image(20, 20, 8, 220, 30);
    let settings = MaskSettings {
        kernel_size: i32::MAX,
        feather: 200_000_000,
        ..MaskSettings::default()
    };
    let mask = compute_mask(&image, &settings).unwrap();
    assert_eq!((mask.height(), mask.width()), (20, 20));
    assert!(mask.is_binary());
}

// ---------------------------------------------------------------------------
// End-to-end scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_flat_field_produces_empty_mask() {
    let image = flat_image(100, 100, 128);
    let settings = MaskSettings {
        min_area: 0,
        ..MaskSettings::default()
    };
    let mask = compute_mask(&image, &settings).unwrap();
    assert_eq!(mask.foreground_count(), 0);
}

#[test]
fn test_centered_square_is_one_filled_blob() {
    let image = centered_square_image(200, 200, 100, 200, 50);
    let mask = compute_mask(&image, &MaskSettings::default()).unwrap();

    // Two 7x7 dilations push the outline out by up to 6 pixels per side.
    let count = mask.foreground_count();
    assert!(
        (10_000..=13_000).contains(&count),
        "foreground count {count}"
    );

    let labeling = label_components(&mask.data);
    assert_eq!(labeling.components.len(), 1);
    assert_eq!(mask.data[[100, 100]], 255);
    assert_eq!(mask.data[[60, 60]], 255);
    assert_eq!(mask.data[[0, 0]], 0);
    assert_eq!(mask.data[[20, 100]], 0);
}

#[test]
fn test_centered_square_inverted_keeps_background_white() {
    let image = centered_square_image(200, 200, 100, 200, 50);
    let settings = MaskSettings {
        invert: true,
        ..MaskSettings::default()
    };
    let mask = compute_mask(&image, &settings).unwrap();
    assert_eq!(mask.data[[0, 0]], 255);
    assert_eq!(mask.data[[100, 100]], 0);
}

#[test]
fn test_outline_below_min_area_is_discarded() {
    let image = centered_square_image(120, 120, 20, 200, 50);
    let mask = compute_mask(&image, &MaskSettings::default()).unwrap();
    assert_eq!(mask.foreground_count(), 0);
}

#[test]
fn test_white_cycle_picks_up_low_contrast_body() {
    // A 20-level step never reaches the upper edge threshold.
    let image = rect_image(120, 160, (40, 50), (40, 60), 225, 245);
    let base = MaskSettings {
        min_area: 0,
        ..MaskSettings::default()
    };
    assert_eq!(compute_mask(&image, &base).unwrap().foreground_count(), 0);

    let white = MaskSettings {
        white_cycle_mode: true,
        dilate_iters: 0,
        ..base.clone()
    };
    let mask = compute_mask(&image, &white).unwrap();
    let count = mask.foreground_count();
    // The 5x5 median trims three pixels off each corner.
    assert!((2_300..=2_400).contains(&count), "foreground count {count}");
    assert_eq!(mask.data[[60, 80]], 255);
    assert_eq!(mask.data[[0, 0]], 0);
}

#[test]
fn test_white_cycle_explicit_threshold_overrides_auto() {
    let image = rect_image(120, 160, (40, 50), (40, 60), 225, 245);
    let settings = MaskSettings {
        white_cycle_mode: true,
        white_threshold: 200,
        dilate_iters: 0,
        min_area: 0,
        ..MaskSettings::default()
    };
    assert_eq!(compute_mask(&image, &settings).unwrap().foreground_count(), 0);
}

#[test]
fn test_white_cycle_on_three_pixel_wide_image() {
    let image = flat_image(12, 3, 250);
    let settings = MaskSettings {
        white_cycle_mode: true,
        ..MaskSettings::default()
    };
    let mask = compute_mask(&image, &settings).unwrap();
    assert_eq!((mask.height(), mask.width()), (12, 3));
    assert!(mask.is_binary());
}

#[test]
fn test_white_cycle_on_tiny_images() {
    let settings = MaskSettings {
        white_cycle_mode: true,
        min_area: 0,
        ..MaskSettings::default()
    };
    for &(h, w) in &[(1, 1), (1, 2), (2, 1), (3, 3), (5, 2)] {
        let mask = compute_mask(&noise_image(h, w, 9), &settings).unwrap();
        assert_eq!((mask.height(), mask.width()), (h, w));
    }
}

#[test]
fn test_pipeline_is_deterministic() {
    let image = noise_image(64, 80, 21);
    let settings = MaskSettings {
        white_cycle_mode: true,
        feather: 3,
        min_area: 30,
        ..MaskSettings::default()
    };
    assert_eq!(
        compute_mask(&image, &settings).unwrap(),
        compute_mask(&image, &settings).unwrap()
    );
}
