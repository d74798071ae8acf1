mod common;

use ndarray::Array2;

use common::{flat_image, noise_image};
use vehicle_mask_core::filters::gaussian_blur::{gaussian_blur_u8, sigma_for_kernel_size};
use vehicle_mask_core::filters::grayscale::to_grayscale;
use vehicle_mask_core::filters::median::median_filter;
use vehicle_mask_core::frame::ColorImage;

// ---------------------------------------------------------------------------
// Grayscale
// ---------------------------------------------------------------------------

#[test]
fn test_grayscale_of_flat_image() {
    let gray = to_grayscale(&flat_image(5, 7, 93));
    assert_eq!(gray.dim(), (5, 7));
    assert!(gray.iter().all(|&v| v == 93));
}

#[test]
fn test_grayscale_weights_mixed_color() {
    let image = ColorImage::filled(2, 2, [200, 100, 50]).unwrap();
    // 0.299 * 200 + 0.587 * 100 + 0.114 * 50 = 124.2
    assert_eq!(to_grayscale(&image)[[1, 1]], 124);
}

// ---------------------------------------------------------------------------
// Median
// ---------------------------------------------------------------------------

#[test]
fn test_median_output_within_input_range() {
    let gray = to_grayscale(&noise_image(40, 50, 7));
    let (lo, hi) = gray
        .iter()
        .fold((u8::MAX, u8::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let smoothed = median_filter(&gray, 5);
    assert_eq!(smoothed.dim(), gray.dim());
    assert!(smoothed.iter().all(|&v| v >= lo && v <= hi));
}

#[test]
fn test_median_large_image_matches_small_tiles() {
    // Above the parallel threshold the rows are processed concurrently.
    let gray = to_grayscale(&noise_image(300, 260, 13));
    let smoothed = median_filter(&gray, 5);
    let tile = gray.slice(ndarray::s![100..140, 100..140]).to_owned();
    let tile_smoothed = median_filter(&tile, 5);
    assert_eq!(
        smoothed.slice(ndarray::s![102..138, 102..138]),
        tile_smoothed.slice(ndarray::s![2..38, 2..38])
    );
}

// ---------------------------------------------------------------------------
// Gaussian
// ---------------------------------------------------------------------------

#[test]
fn test_sigma_for_large_kernel() {
    // 0.3 * ((9 - 1) * 0.5 - 1) + 0.8
    assert!((sigma_for_kernel_size(9) - 1.7).abs() < 1e-5);
}

#[test]
fn test_gaussian_keeps_binary_plateaus() {
    let mut data = Array2::<u8>::zeros((30, 30));
    for r in 5..25 {
        for c in 5..25 {
            data[[r, c]] = 255;
        }
    }
    let blurred = gaussian_blur_u8(&data, 5);
    assert_eq!(blurred[[15, 15]], 255);
    assert_eq!(blurred[[0, 0]], 0);
    assert!(blurred[[5, 15]] > 0 && blurred[[5, 15]] < 255);
}
