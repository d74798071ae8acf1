use ndarray::Array2;

use crate::consts::{BACKGROUND, FOREGROUND};

/// tan(22.5°): below this |gy|/|gx| ratio the gradient is treated as horizontal.
const TAN_22_5: f32 = 0.414_213_57;

/// Sobel derivatives of an 8-bit plane with replicated borders.
///
/// Returns `(gx, gy)` using the unnormalized 3x3 kernels
/// `[-1 0 1; -2 0 2; -1 0 1]` and its transpose.
pub fn sobel_gradients(data: &Array2<u8>) -> (Array2<i32>, Array2<i32>) {
    let (h, w) = data.dim();
    let mut gx = Array2::<i32>::zeros((h, w));
    let mut gy = Array2::<i32>::zeros((h, w));

    let at = |r: isize, c: isize| -> i32 {
        let r = r.clamp(0, h as isize - 1) as usize;
        let c = c.clamp(0, w as isize - 1) as usize;
        data[[r, c]] as i32
    };

    for row in 0..h {
        for col in 0..w {
            let (r, c) = (row as isize, col as isize);
            gx[[row, col]] = -at(r - 1, c - 1) + at(r - 1, c + 1) - 2 * at(r, c - 1)
                + 2 * at(r, c + 1)
                - at(r + 1, c - 1)
                + at(r + 1, c + 1);
            gy[[row, col]] = -at(r - 1, c - 1) - 2 * at(r - 1, c) - at(r - 1, c + 1)
                + at(r + 1, c - 1)
                + 2 * at(r + 1, c)
                + at(r + 1, c + 1);
        }
    }

    (gx, gy)
}

/// Canny edge detector on an 8-bit plane.
///
/// Gradient magnitude is the L1 norm `|gx| + |gy|`. Non-maximum suppression
/// quantizes the gradient direction into horizontal, vertical or one of
/// two diagonals. A surviving pixel is a candidate when its magnitude
/// exceeds `low` and a seed when it exceeds `high`; candidates 8-connected
/// to a seed become edges.
///
/// The thresholds are ordered internally, so callers may pass them either
/// way round. Output is 255 on edges, 0 elsewhere.
pub fn canny(data: &Array2<u8>, low: f32, high: f32) -> Array2<u8> {
    let (low, high) = (low.min(high), low.max(high));
    let (h, w) = data.dim();
    let (gx, gy) = sobel_gradients(data);
    let magnitude = Array2::from_shape_fn((h, w), |(r, c)| gx[[r, c]].abs() + gy[[r, c]].abs());

    let mag = |r: isize, c: isize| -> i32 {
        if r < 0 || c < 0 || r >= h as isize || c >= w as isize {
            0
        } else {
            magnitude[[r as usize, c as usize]]
        }
    };

    // 0 = not a candidate, 1 = weak candidate, 2 = strong seed.
    let mut class = Array2::<u8>::zeros((h, w));
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for row in 0..h {
        for col in 0..w {
            let m = magnitude[[row, col]];
            if m as f32 <= low {
                continue;
            }
            let (r, c) = (row as isize, col as isize);
            let ax = gx[[row, col]].abs() as f32;
            let ay = gy[[row, col]].abs() as f32;
            let tg22 = ax * TAN_22_5;

            let is_max = if ay < tg22 {
                m > mag(r, c - 1) && m >= mag(r, c + 1)
            } else if ay > tg22 + 2.0 * ax {
                m > mag(r - 1, c) && m >= mag(r + 1, c)
            } else {
                let s = if (gx[[row, col]] < 0) != (gy[[row, col]] < 0) {
                    -1
                } else {
                    1
                };
                m > mag(r - 1, c - s) && m > mag(r + 1, c + s)
            };

            if !is_max {
                continue;
            }
            if m as f32 > high {
                class[[row, col]] = 2;
                stack.push((row, col));
            } else {
                class[[row, col]] = 1;
            }
        }
    }

    let mut edges = Array2::<u8>::from_elem((h, w), BACKGROUND);
    for &(row, col) in &stack {
        edges[[row, col]] = FOREGROUND;
    }

    while let Some((row, col)) = stack.pop() {
        for dr in -1..=1_isize {
            for dc in -1..=1_isize {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let nr = row as isize + dr;
                let nc = col as isize + dc;
                if nr < 0 || nc < 0 || nr >= h as isize || nc >= w as isize {
                    continue;
                }
                let (nr, nc) = (nr as usize, nc as usize);
                if class[[nr, nc]] == 1 && edges[[nr, nc]] == BACKGROUND {
                    edges[[nr, nc]] = FOREGROUND;
                    stack.push((nr, nc));
                }
            }
        }
    }

    edges
}
