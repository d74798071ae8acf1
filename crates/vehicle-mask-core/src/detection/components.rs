use std::collections::HashMap;

use ndarray::Array2;

use crate::consts::{BACKGROUND, FOREGROUND};

/// Statistics for a single connected component.
#[derive(Clone, Debug)]
pub struct ComponentStats {
    /// Unique label for this component.
    pub label: u32,
    /// Number of pixels in the component.
    pub area: usize,
    /// Bounding box: (min_row, max_row, min_col, max_col).
    pub bbox: (usize, usize, usize, usize),
}

/// Label image plus per-component statistics.
#[derive(Clone, Debug)]
pub struct Labeling {
    /// Resolved label per pixel; 0 is background.
    pub labels: Array2<u32>,
    /// Components sorted by area descending (largest first).
    pub components: Vec<ComponentStats>,
}

/// Label the non-zero pixels of a mask into 8-connected components using
/// two-pass labeling with union-find.
pub fn label_components(mask: &Array2<u8>) -> Labeling {
    let (h, w) = mask.dim();
    let mut labels = Array2::<u32>::zeros((h, w));
    if h == 0 || w == 0 {
        return Labeling {
            labels,
            components: Vec::new(),
        };
    }

    let mut next_label: u32 = 1;
    // Union-find parent array. Index 0 unused; labels start at 1.
    let mut parent: Vec<u32> = vec![0; h * w / 2 + 2];

    // Pass 1: provisional labels from the already-visited half of the
    // 8-neighborhood (up-left, up, up-right, left).
    for row in 0..h {
        for col in 0..w {
            if mask[[row, col]] == BACKGROUND {
                continue;
            }

            let mut neighbors = [0u32; 4];
            if row > 0 {
                if col > 0 {
                    neighbors[0] = labels[[row - 1, col - 1]];
                }
                neighbors[1] = labels[[row - 1, col]];
                if col + 1 < w {
                    neighbors[2] = labels[[row - 1, col + 1]];
                }
            }
            if col > 0 {
                neighbors[3] = labels[[row, col - 1]];
            }

            let smallest = neighbors.iter().copied().filter(|&l| l > 0).min();
            match smallest {
                None => {
                    if next_label as usize >= parent.len() {
                        parent.resize(parent.len() * 2, 0);
                    }
                    parent[next_label as usize] = next_label;
                    labels[[row, col]] = next_label;
                    next_label += 1;
                }
                Some(min_label) => {
                    labels[[row, col]] = min_label;
                    for &other in neighbors.iter().filter(|&&l| l > 0 && l != min_label) {
                        union(&mut parent, min_label, other);
                    }
                }
            }
        }
    }

    // Flatten parent references.
    for i in 1..next_label as usize {
        parent[i] = find(&parent, i as u32);
    }

    // Pass 2: resolve labels and collect stats.
    let mut stats_map = HashMap::<u32, ComponentStats>::new();

    for row in 0..h {
        for col in 0..w {
            let lbl = labels[[row, col]];
            if lbl == 0 {
                continue;
            }
            let root = parent[lbl as usize];
            labels[[row, col]] = root;

            let entry = stats_map.entry(root).or_insert(ComponentStats {
                label: root,
                area: 0,
                bbox: (row, row, col, col),
            });

            entry.area += 1;
            entry.bbox.0 = entry.bbox.0.min(row);
            entry.bbox.1 = entry.bbox.1.max(row);
            entry.bbox.2 = entry.bbox.2.min(col);
            entry.bbox.3 = entry.bbox.3.max(col);
        }
    }

    let mut components: Vec<ComponentStats> = stats_map.into_values().collect();
    components.sort_unstable_by(|a, b| b.area.cmp(&a.area).then(a.label.cmp(&b.label)));
    Labeling { labels, components }
}

/// Zero every 8-connected component whose area is below `min_area`.
///
/// Surviving pixels are set to 255; `min_area == 0` keeps every component.
pub fn remove_small_components(mask: &Array2<u8>, min_area: usize) -> Array2<u8> {
    let labeling = label_components(mask);
    let keep: HashMap<u32, bool> = labeling
        .components
        .iter()
        .map(|c| (c.label, c.area >= min_area))
        .collect();

    labeling.labels.mapv(|lbl| {
        if lbl != 0 && keep.get(&lbl).copied().unwrap_or(false) {
            FOREGROUND
        } else {
            BACKGROUND
        }
    })
}

fn find(parent: &[u32], mut x: u32) -> u32 {
    while parent[x as usize] != x {
        x = parent[x as usize];
    }
    x
}

fn union(parent: &mut [u32], a: u32, b: u32) {
    let ra = find(parent, a);
    let rb = find(parent, b);
    if ra != rb {
        // Merge larger root into smaller root to keep labels consistent.
        let (small, big) = if ra < rb { (ra, rb) } else { (rb, ra) };
        parent[big as usize] = small;
    }
}
