use ndarray::{Array2, Array3};

use crate::consts::{BACKGROUND, COLOR_CHANNEL_COUNT, FOREGROUND};
use crate::error::{MaskError, Result};

/// An 8-bit, three-channel image.
/// Shape = (height, width, 3). Channel order is not interpreted beyond
/// the luminance weights.
#[derive(Clone, Debug)]
pub struct ColorImage {
    pub data: Array3<u8>,
}

impl ColorImage {
    /// Wrap a `(height, width, 3)` array, rejecting empty or non-RGB shapes.
    pub fn new(data: Array3<u8>) -> Result<Self> {
        let (h, w, c) = data.dim();
        if h == 0 || w == 0 || c != COLOR_CHANNEL_COUNT {
            return Err(MaskError::InvalidDimensions {
                width: w,
                height: h,
            });
        }
        Ok(Self { data })
    }

    /// Build an image where every pixel has the same color.
    pub fn filled(height: usize, width: usize, rgb: [u8; 3]) -> Result<Self> {
        let data = Array3::from_shape_fn((height, width, COLOR_CHANNEL_COUNT), |(_, _, c)| rgb[c]);
        Self::new(data)
    }

    /// Build a color image by replicating a single gray plane into all channels.
    pub fn from_gray(gray: &Array2<u8>) -> Result<Self> {
        let (h, w) = gray.dim();
        let data = Array3::from_shape_fn((h, w, COLOR_CHANNEL_COUNT), |(r, c, _)| gray[[r, c]]);
        Self::new(data)
    }

    pub fn width(&self) -> usize {
        self.data.dim().1
    }

    pub fn height(&self) -> usize {
        self.data.dim().0
    }

    pub fn pixel(&self, row: usize, col: usize) -> [u8; 3] {
        [
            self.data[[row, col, 0]],
            self.data[[row, col, 1]],
            self.data[[row, col, 2]],
        ]
    }
}

/// Single-channel binary mask. Every pixel is 0 or 255.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    pub data: Array2<u8>,
}

impl Mask {
    pub fn new(data: Array2<u8>) -> Self {
        Self { data }
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Number of foreground (255) pixels.
    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == FOREGROUND).count()
    }

    /// True when every pixel is exactly 0 or 255.
    pub fn is_binary(&self) -> bool {
        self.data
            .iter()
            .all(|&v| v == FOREGROUND || v == BACKGROUND)
    }

    /// Return a copy with foreground and background swapped.
    pub fn inverted(&self) -> Self {
        Self::new(self.data.mapv(|v| 255 - v))
    }
}
