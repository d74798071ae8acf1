use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

/// Fixed binomial kernels used for small apertures when no sigma is given.
const SMALL_KERNELS: [&[f32]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[
        0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125,
    ],
];

/// Blur an 8-bit plane with a square Gaussian kernel of side `ksize`
/// (forced odd). Sigma is derived from the kernel size. Borders are
/// mirrored without repeating the edge pixel.
///
/// Taps further out than the longer image side are dropped, so the cost
/// of very large sizes is bounded by the image dimensions.
pub fn gaussian_blur_u8(data: &Array2<u8>, ksize: usize) -> Array2<u8> {
    let (h, w) = data.dim();
    let kernel = make_gaussian_kernel(ksize | 1, h.max(w));
    let input = data.mapv(|v| v as f32);
    let row_pass = convolve(&input, &kernel, Axis::Rows);
    let col_pass = convolve(&row_pass, &kernel, Axis::Cols);
    col_pass.mapv(|v| v.round().clamp(0.0, 255.0) as u8)
}

/// Sigma implied by a kernel size: `0.3 * ((ksize - 1) * 0.5 - 1) + 0.8`.
pub fn sigma_for_kernel_size(ksize: usize) -> f32 {
    0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

fn make_gaussian_kernel(ksize: usize, max_radius: usize) -> Vec<f32> {
    if ksize <= 7 {
        return SMALL_KERNELS[ksize / 2].to_vec();
    }

    let sigma = sigma_for_kernel_size(ksize);
    let radius = (ksize / 2).min(max_radius);
    let s2 = 2.0 * sigma * sigma;
    let mut kernel = vec![0.0f32; 2 * radius + 1];
    let mut sum = 0.0f32;

    for (i, k) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius as f32;
        *k = (-x * x / s2).exp();
        sum += *k;
    }

    for v in &mut kernel {
        *v /= sum;
    }

    kernel
}

#[derive(Clone, Copy)]
enum Axis {
    Rows,
    Cols,
}

fn convolve(data: &Array2<f32>, kernel: &[f32], axis: Axis) -> Array2<f32> {
    let (h, w) = data.dim();
    let radius = kernel.len() / 2;

    let convolve_row = |row: usize| -> Vec<f32> {
        (0..w)
            .map(|col| {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let offset = ki as isize - radius as isize;
                    let v = match axis {
                        Axis::Rows => data[[row, reflect_101(col as isize + offset, w)]],
                        Axis::Cols => data[[reflect_101(row as isize + offset, h), col]],
                    };
                    sum += v * kv;
                }
                sum
            })
            .collect()
    };

    let rows: Vec<Vec<f32>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h).into_par_iter().map(convolve_row).collect()
    } else {
        (0..h).map(convolve_row).collect()
    };

    let mut result = Array2::<f32>::zeros((h, w));
    for (row, row_data) in rows.into_iter().enumerate() {
        for (col, val) in row_data.into_iter().enumerate() {
            result[[row, col]] = val;
        }
    }
    result
}

/// Mirror an out-of-range index about the border pixel (`dcb|abcd|cba`).
fn reflect_101(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let last = len as isize - 1;
    let period = 2 * last;
    let i = i.rem_euclid(period);
    (if i > last { period - i } else { i }) as usize
}
