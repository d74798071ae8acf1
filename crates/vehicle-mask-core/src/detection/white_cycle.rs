use ndarray::{s, Array2, ArrayView2};

use crate::consts::{
    BACKGROUND, FOREGROUND, WHITE_AUTO_MARGIN, WHITE_AUTO_MAX, WHITE_AUTO_MIN,
    WHITE_BAND_HEIGHT_DIVISOR, WHITE_BAND_MAX_HALF_WIDTH,
};

/// Where the background is sampled for the automatic white threshold.
///
/// Two bands of `rows` rows, one flush with the top edge and one with the
/// bottom edge, both spanning columns `col_start..col_end` around the
/// vertical midline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleBands {
    pub half_width: usize,
    pub rows: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl SampleBands {
    /// Band geometry for an image of `height x width` pixels.
    ///
    /// Half-width is `min(40, max(1, min(cx - 1, width - cx - 1)))` with
    /// `cx = width / 2`; height is `max(1, height / 10)`. Columns are
    /// clipped to the image so narrow inputs stay in bounds.
    pub fn for_dims(height: usize, width: usize) -> Self {
        let cx = (width / 2) as isize;
        let room = (cx - 1).min(width as isize - cx - 1);
        let half_width = room.max(1).min(WHITE_BAND_MAX_HALF_WIDTH as isize);
        let rows = (height / WHITE_BAND_HEIGHT_DIVISOR).max(1).min(height.max(1));

        let col_start = (cx - half_width).max(0) as usize;
        let col_end = ((cx + half_width + 1) as usize).min(width);

        Self {
            half_width: half_width as usize,
            rows,
            col_start,
            col_end,
        }
    }
}

/// Mean luminance of the top and bottom sampling bands.
pub fn band_means(gray: &Array2<u8>) -> (f64, f64) {
    let (h, w) = gray.dim();
    let bands = SampleBands::for_dims(h, w);
    let top = gray.slice(s![0..bands.rows, bands.col_start..bands.col_end]);
    let bottom = gray.slice(s![h - bands.rows..h, bands.col_start..bands.col_end]);
    (mean(top), mean(bottom))
}

fn mean(view: ArrayView2<u8>) -> f64 {
    let n = view.len();
    if n == 0 {
        return 0.0;
    }
    view.iter().map(|&v| v as f64).sum::<f64>() / n as f64
}

/// Threshold derived from the image: the darker band mean minus 5,
/// clamped to [200, 255].
pub fn auto_white_threshold(gray: &Array2<u8>) -> u8 {
    let (top, bottom) = band_means(gray);
    (top.min(bottom) - WHITE_AUTO_MARGIN).clamp(WHITE_AUTO_MIN, WHITE_AUTO_MAX) as u8
}

/// Use `explicit` when it lies in [0, 255], otherwise derive one.
pub fn resolve_white_threshold(gray: &Array2<u8>, explicit: i32) -> u8 {
    match u8::try_from(explicit) {
        Ok(thr) => thr,
        Err(_) => auto_white_threshold(gray),
    }
}

/// Pixels strictly darker than `threshold` become foreground.
pub fn non_white_mask(gray: &Array2<u8>, threshold: u8) -> Array2<u8> {
    gray.mapv(|v| if v < threshold { FOREGROUND } else { BACKGROUND })
}
