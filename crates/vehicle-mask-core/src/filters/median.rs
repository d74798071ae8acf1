use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// Square median filter of side `size` (forced odd) with replicated borders.
///
/// Parallelizes at the row level for images >= 256x256.
pub fn median_filter(data: &Array2<u8>, size: usize) -> Array2<u8> {
    let size = size | 1;
    if size == 1 {
        return data.clone();
    }
    let (h, w) = data.dim();
    let radius = size / 2;

    let filter_row = |row: usize| -> Vec<u8> {
        let mut window = Vec::with_capacity(size * size);
        (0..w)
            .map(|col| {
                window.clear();
                for dr in 0..size {
                    let src_row = clamp_index(row as isize + dr as isize - radius as isize, h);
                    for dc in 0..size {
                        let src_col =
                            clamp_index(col as isize + dc as isize - radius as isize, w);
                        window.push(data[[src_row, src_col]]);
                    }
                }
                let mid = window.len() / 2;
                *window.select_nth_unstable(mid).1
            })
            .collect()
    };

    let rows: Vec<Vec<u8>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h).into_par_iter().map(filter_row).collect()
    } else {
        (0..h).map(filter_row).collect()
    };

    let mut result = Array2::<u8>::zeros((h, w));
    for (row, row_data) in rows.into_iter().enumerate() {
        for (col, val) in row_data.into_iter().enumerate() {
            result[[row, col]] = val;
        }
    }
    result
}

fn clamp_index(i: isize, len: usize) -> usize {
    i.clamp(0, len as isize - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_isolated_speck() {
        let mut data = Array2::<u8>::from_elem((9, 9), 100);
        data[[4, 4]] = 255;
        data[[0, 0]] = 0;
        let out = median_filter(&data, 5);
        assert!(out.iter().all(|&v| v == 100));
    }

    #[test]
    fn preserves_straight_step_edge() {
        let data = Array2::from_shape_fn((10, 10), |(_, c)| if c < 5 { 10u8 } else { 200 });
        let out = median_filter(&data, 5);
        assert_eq!(out, data);
    }

    #[test]
    fn single_pixel_image() {
        let data = Array2::<u8>::from_elem((1, 1), 42);
        assert_eq!(median_filter(&data, 5)[[0, 0]], 42);
    }
}
