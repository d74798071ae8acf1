#![allow(dead_code)]

use ndarray::Array2;

use vehicle_mask_core::frame::ColorImage;

/// Uniform gray image.
pub fn flat_image(height: usize, width: usize, value: u8) -> ColorImage {
    ColorImage::filled(height, width, [value, value, value]).expect("non-empty image")
}

/// Gray image with a filled axis-aligned rectangle.
///
/// `top_left` is (row, col); `size` is (rows, cols).
pub fn rect_image(
    height: usize,
    width: usize,
    top_left: (usize, usize),
    size: (usize, usize),
    fg: u8,
    bg: u8,
) -> ColorImage {
    let (r0, c0) = top_left;
    let (rh, cw) = size;
    let plane = Array2::from_shape_fn((height, width), |(r, c)| {
        if r >= r0 && r < r0 + rh && c >= c0 && c < c0 + cw {
            fg
        } else {
            bg
        }
    });
    ColorImage::from_gray(&plane).expect("non-empty image")
}

/// A `side x side` square of `fg` centered on a `height x width` field of `bg`.
pub fn centered_square_image(height: usize, width: usize, side: usize, fg: u8, bg: u8) -> ColorImage {
    rect_image(
        height,
        width,
        ((height - side) / 2, (width - side) / 2),
        (side, side),
        fg,
        bg,
    )
}

/// Studio-style scene: light backdrop, a large dark body, a hollow frame
/// with a light interior, and a few small dark specks.
pub fn studio_scene() -> ColorImage {
    let (h, w) = (160usize, 220usize);
    let plane = Array2::from_shape_fn((h, w), |(r, c)| {
        let body = (50..120).contains(&r) && (40..150).contains(&c);
        let frame_outer = (20..70).contains(&r) && (160..210).contains(&c);
        let frame_inner = (30..60).contains(&r) && (170..200).contains(&c);
        let speck = [(140usize, 20usize), (10, 100), (145, 190)]
            .iter()
            .any(|&(sr, sc)| (sr..sr + 3).contains(&r) && (sc..sc + 3).contains(&c));
        if body || (frame_outer && !frame_inner) || speck {
            70
        } else {
            235
        }
    });
    ColorImage::from_gray(&plane).expect("non-empty image")
}

/// Dense pseudo-random texture for exercising every code path.
pub fn noise_image(height: usize, width: usize, seed: u32) -> ColorImage {
    let mut state = seed.wrapping_mul(2_654_435_761).max(1);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state
    };
    let plane = Array2::from_shape_fn((height, width), |_| (next() % 256) as u8);
    ColorImage::from_gray(&plane).expect("non-empty image")
}
