use ndarray::Array2;

/// 4-connected flood fill in place.
///
/// Repaints the region of pixels equal to the seed's value that is
/// reachable from `seed` (row, col). Returns the number of pixels changed;
/// a seed that already holds `new_value` or lies outside the image
/// changes nothing.
pub fn flood_fill(data: &mut Array2<u8>, seed: (usize, usize), new_value: u8) -> usize {
    let (h, w) = data.dim();
    let (seed_row, seed_col) = seed;
    if seed_row >= h || seed_col >= w {
        return 0;
    }
    let target = data[[seed_row, seed_col]];
    if target == new_value {
        return 0;
    }

    let mut filled = 0;
    let mut stack = vec![seed];

    while let Some((row, col)) = stack.pop() {
        if data[[row, col]] != target {
            continue;
        }
        data[[row, col]] = new_value;
        filled += 1;

        if col > 0 {
            stack.push((row, col - 1));
        }
        if col + 1 < w {
            stack.push((row, col + 1));
        }
        if row > 0 {
            stack.push((row - 1, col));
        }
        if row + 1 < h {
            stack.push((row + 1, col));
        }
    }

    filled
}

/// Close interior holes of a binary mask.
///
/// The inverted mask is flood-filled with 0 from pixel (0,0), which clears
/// the background reachable from that corner; what stays set are the
/// enclosed holes, and they are OR-ed into the mask. When (0,0) is itself
/// foreground the fill does nothing and the mask is returned as is.
pub fn fill_holes(mask: &Array2<u8>) -> Array2<u8> {
    let mut holes = mask.mapv(|v| !v);
    if flood_fill(&mut holes, (0, 0), 0) == 0 {
        return mask.clone();
    }
    let mut result = mask.clone();
    result.zip_mut_with(&holes, |m, &hole| *m |= hole);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(size: usize, outer: (usize, usize), inner: (usize, usize)) -> Array2<u8> {
        Array2::from_shape_fn((size, size), |(r, c)| {
            let in_outer = r >= outer.0 && r < outer.1 && c >= outer.0 && c < outer.1;
            let in_inner = r >= inner.0 && r < inner.1 && c >= inner.0 && c < inner.1;
            if in_outer && !in_inner {
                255
            } else {
                0
            }
        })
    }

    #[test]
    fn flood_fill_counts_region() {
        let mut data = ring(10, (2, 8), (4, 6));
        // Exterior background: 100 - 36 pixels.
        assert_eq!(flood_fill(&mut data, (0, 0), 9), 64);
        assert_eq!(data[[0, 0]], 9);
        assert_eq!(data[[5, 5]], 0);
    }

    #[test]
    fn flood_fill_same_value_is_noop() {
        let mut data = Array2::<u8>::zeros((3, 3));
        assert_eq!(flood_fill(&mut data, (1, 1), 0), 0);
    }

    #[test]
    fn flood_fill_does_not_cross_diagonals() {
        let mut data = Array2::from_shape_fn((3, 3), |(r, c)| if r == c { 0u8 } else { 255 });
        assert_eq!(flood_fill(&mut data, (0, 0), 7), 1);
        assert_eq!(data[[1, 1]], 0);
    }

    #[test]
    fn hole_inside_ring_is_filled() {
        let mask = ring(12, (2, 10), (4, 8));
        let filled = fill_holes(&mask);
        assert_eq!(filled[[5, 5]], 255);
        assert_eq!(filled[[0, 0]], 0);
        assert_eq!(filled[[11, 11]], 0);
        assert_eq!(filled.iter().filter(|&&v| v == 255).count(), 64);
    }

    #[test]
    fn corner_foreground_blocks_filling() {
        let mut mask = ring(12, (2, 10), (4, 8));
        mask[[0, 0]] = 255;
        assert_eq!(fill_holes(&mask), mask);
    }
}
