use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// Normalize a requested structuring-element size: odd and at least 1.
///
/// Even sizes are bumped up by one, so 6 and 7 give the same element.
pub fn effective_kernel_size(requested: i32) -> usize {
    (requested | 1).max(1) as usize
}

/// Structuring element stored as the (row, col) offsets it covers,
/// relative to its anchor at the centre.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructuringElement {
    offsets: Vec<(isize, isize)>,
}

impl StructuringElement {
    /// Elliptical element inscribed in a `size x size` square, for use on
    /// an image of `bounds = (height, width)`.
    ///
    /// Row `dy` spans `round(sqrt(r^2 - dy^2))` pixels either side of the
    /// centre column, where `r = size / 2`. Offsets with `|dy| >= height`
    /// or `|dx| >= width` can never reach another pixel of the image and
    /// are left out, so huge sizes cost no more than the image itself.
    pub fn ellipse(size: usize, bounds: (usize, usize)) -> Self {
        let (h, w) = bounds;
        let r = (size.max(1) / 2) as i64;
        let max_dy = r.min(h.saturating_sub(1) as i64);
        let max_dx = w.saturating_sub(1) as i64;

        let mut offsets = Vec::new();
        for dy in -max_dy..=max_dy {
            let span = ellipse_half_width(r, dy).min(max_dx);
            for dx in -span..=span {
                offsets.push((dy as isize, dx as isize));
            }
        }
        Self { offsets }
    }

    /// Element covering the `true` cells of `mask`, anchored at its centre.
    pub fn from_mask(mask: &Array2<bool>) -> Self {
        let (kh, kw) = mask.dim();
        let (ar, ac) = ((kh / 2) as isize, (kw / 2) as isize);
        let offsets = mask
            .indexed_iter()
            .filter(|&(_, &on)| on)
            .map(|((r, c), _)| (r as isize - ar, c as isize - ac))
            .collect();
        Self { offsets }
    }

    pub fn offsets(&self) -> &[(isize, isize)] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

fn ellipse_half_width(r: i64, dy: i64) -> i64 {
    if r == 0 {
        return 0;
    }
    let (r, dy) = (r as f64, dy as f64);
    (r * r - dy * dy).max(0.0).sqrt().round() as i64
}

/// Grayscale dilation: each pixel takes the maximum over the element's
/// footprint. Pixels outside the image are ignored.
pub fn dilate(data: &Array2<u8>, element: &StructuringElement, iterations: usize) -> Array2<u8> {
    let mut current = data.clone();
    for _ in 0..iterations {
        current = apply_rank(&current, element.offsets(), Rank::Max);
    }
    current
}

/// Grayscale erosion: each pixel takes the minimum over the element's
/// footprint. Pixels outside the image are ignored.
pub fn erode(data: &Array2<u8>, element: &StructuringElement, iterations: usize) -> Array2<u8> {
    let mut current = data.clone();
    for _ in 0..iterations {
        current = apply_rank(&current, element.offsets(), Rank::Min);
    }
    current
}

#[derive(Clone, Copy)]
enum Rank {
    Min,
    Max,
}

fn apply_rank(data: &Array2<u8>, offsets: &[(isize, isize)], rank: Rank) -> Array2<u8> {
    let (h, w) = data.dim();

    let rank_row = |row: usize| -> Vec<u8> {
        (0..w)
            .map(|col| {
                let mut acc = match rank {
                    Rank::Max => u8::MIN,
                    Rank::Min => u8::MAX,
                };
                let mut seen = false;
                for &(dr, dc) in offsets {
                    let nr = row as isize + dr;
                    let nc = col as isize + dc;
                    if nr < 0 || nc < 0 || nr >= h as isize || nc >= w as isize {
                        continue;
                    }
                    let v = data[[nr as usize, nc as usize]];
                    acc = match rank {
                        Rank::Max => acc.max(v),
                        Rank::Min => acc.min(v),
                    };
                    seen = true;
                }
                if seen {
                    acc
                } else {
                    data[[row, col]]
                }
            })
            .collect()
    };

    let rows: Vec<Vec<u8>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h).into_par_iter().map(rank_row).collect()
    } else {
        (0..h).map(rank_row).collect()
    };

    let mut result = Array2::<u8>::zeros((h, w));
    for (row, row_data) in rows.into_iter().enumerate() {
        for (col, val) in row_data.into_iter().enumerate() {
            result[[row, col]] = val;
        }
    }
    result
}
