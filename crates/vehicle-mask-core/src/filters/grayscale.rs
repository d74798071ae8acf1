use ndarray::Array2;

use crate::consts::{LUMINANCE_B, LUMINANCE_G, LUMINANCE_R};
use crate::frame::ColorImage;

/// Convert a color image to 8-bit luminance (ITU-R BT.601), rounding to
/// the nearest integer.
pub fn to_grayscale(image: &ColorImage) -> Array2<u8> {
    let (h, w) = (image.height(), image.width());
    let mut gray = Array2::<u8>::zeros((h, w));

    for row in 0..h {
        for col in 0..w {
            let [r, g, b] = image.pixel(row, col);
            let y = LUMINANCE_R * r as f32 + LUMINANCE_G * g as f32 + LUMINANCE_B * b as f32;
            gray[[row, col]] = y.round().clamp(0.0, 255.0) as u8;
        }
    }

    gray
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_input_is_unchanged() {
        let plane = Array2::from_shape_fn((3, 4), |(r, c)| (r * 40 + c * 10) as u8);
        let image = ColorImage::from_gray(&plane).unwrap();
        assert_eq!(to_grayscale(&image), plane);
    }

    #[test]
    fn pure_channels_use_bt601_weights() {
        let red = ColorImage::filled(1, 1, [255, 0, 0]).unwrap();
        let green = ColorImage::filled(1, 1, [0, 255, 0]).unwrap();
        let blue = ColorImage::filled(1, 1, [0, 0, 255]).unwrap();
        assert_eq!(to_grayscale(&red)[[0, 0]], 76);
        assert_eq!(to_grayscale(&green)[[0, 0]], 150);
        assert_eq!(to_grayscale(&blue)[[0, 0]], 29);
    }
}
