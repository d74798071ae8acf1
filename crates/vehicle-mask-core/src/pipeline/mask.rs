use ndarray::Array2;
use tracing::debug;

use crate::consts::{BACKGROUND, DENOISE_MEDIAN_SIZE, FEATHER_BINARIZE_THRESHOLD, FOREGROUND};
use crate::detection::canny::canny;
use crate::detection::components::remove_small_components;
use crate::detection::fill::fill_holes;
use crate::detection::morphology::{dilate, erode, StructuringElement};
use crate::detection::white_cycle::{non_white_mask, resolve_white_threshold};
use crate::error::{MaskError, Result};
use crate::filters::gaussian_blur::gaussian_blur_u8;
use crate::filters::grayscale::to_grayscale;
use crate::filters::median::median_filter;
use crate::frame::{ColorImage, Mask};

use super::config::MaskSettings;
use super::types::MaskStage;

/// Compute the foreground mask of a color image.
///
/// Pipeline: grayscale + 5x5 median -> Canny -> dilate/erode ->
/// optional non-white merge -> binarize -> optional small-component
/// removal -> hole fill -> optional feather -> optional invert.
///
/// The result has the input's dimensions and holds only 0 and 255.
pub fn compute_mask(image: &ColorImage, settings: &MaskSettings) -> Result<Mask> {
    let (h, w) = (image.height(), image.width());
    if h == 0 || w == 0 {
        return Err(MaskError::InvalidDimensions {
            width: w,
            height: h,
        });
    }
    debug!(width = w, height = h, settings = %settings, "Computing mask");

    debug!(stage = %MaskStage::Denoising);
    let gray = median_filter(&to_grayscale(image), DENOISE_MEDIAN_SIZE);

    let (low, high) = settings.edge_thresholds();
    debug!(stage = %MaskStage::EdgeDetection, low, high);
    let edges = canny(&gray, low as f32, high as f32);

    debug!(
        stage = %MaskStage::Morphology,
        kernel = settings.effective_kernel_size(),
        dilate = settings.dilate_passes(),
        erode = settings.erode_passes()
    );
    let mut mask = shape_edges(&edges, settings);

    if settings.white_cycle_mode {
        let threshold = resolve_white_threshold(&gray, settings.white_threshold);
        debug!(stage = %MaskStage::WhiteCycle, threshold);
        mask = merge_max(&mask, &non_white_mask(&gray, threshold));
    }

    let mut mask = binarize(&mask, 0);

    if let Some(min_area) = settings.area_filter() {
        debug!(stage = %MaskStage::AreaFilter, min_area);
        mask = remove_small_components(&mask, min_area);
    }

    debug!(stage = %MaskStage::HoleFill);
    mask = fill_holes(&mask);

    if let Some(ksize) = settings.feather_kernel() {
        debug!(stage = %MaskStage::Feathering, ksize);
        mask = feather(&mask, ksize);
    }

    if settings.invert {
        debug!(stage = %MaskStage::Inverting);
        mask.mapv_inplace(|v| !v);
    }

    let mask = Mask::new(mask);
    debug!(foreground = mask.foreground_count(), "Mask computed");
    Ok(mask)
}

/// Dilate then erode with the configured elliptical element. Zero passes
/// skip the respective operation.
pub fn shape_edges(edges: &Array2<u8>, settings: &MaskSettings) -> Array2<u8> {
    let kernel = StructuringElement::ellipse(settings.effective_kernel_size(), edges.dim());
    let mut shaped = edges.clone();
    if settings.dilate_passes() > 0 {
        shaped = dilate(&shaped, &kernel, settings.dilate_passes());
    }
    if settings.erode_passes() > 0 {
        shaped = erode(&shaped, &kernel, settings.erode_passes());
    }
    shaped
}

/// Values above `threshold` become 255, the rest 0.
pub fn binarize(data: &Array2<u8>, threshold: u8) -> Array2<u8> {
    data.mapv(|v| if v > threshold { FOREGROUND } else { BACKGROUND })
}

/// Blur with a `ksize` Gaussian and snap back to binary at 127.
pub fn feather(mask: &Array2<u8>, ksize: usize) -> Array2<u8> {
    binarize(&gaussian_blur_u8(mask, ksize), FEATHER_BINARIZE_THRESHOLD)
}

fn merge_max(a: &Array2<u8>, b: &Array2<u8>) -> Array2<u8> {
    let mut merged = a.clone();
    merged.zip_mut_with(b, |x, &y| *x = (*x).max(y));
    merged
}
