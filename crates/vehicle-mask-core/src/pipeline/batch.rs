use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::consts::BATCH_MASK_SUFFIX;
use crate::error::Result;
use crate::io::image_io::{is_supported_image, mask_path_for, mask_path_with_extension};
use crate::segmenter::mask_file;

use super::config::MaskSettings;
use super::types::{BatchItem, ProgressReporter};

/// Image files directly inside `dir`, sorted by path.
pub fn collect_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if is_supported_image(&path) {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

/// Output path for each input, one distinct path per image.
///
/// Inputs normally map to `<stem>_mask.png`. When several inputs share a
/// stem (`car.png` and `car.jpg`) each of them keeps its extension in the
/// name instead (`car.png_mask.png`, `car.jpg_mask.png`). Stems are
/// compared ignoring ASCII case so the names also stay apart on
/// case-insensitive filesystems. Any name still taken gets a `_2`, `_3`,
/// ... counter before the `.png`.
pub fn plan_outputs(images: &[PathBuf], output_dir: &Path) -> Vec<PathBuf> {
    let key = |p: &Path| p.to_string_lossy().to_ascii_lowercase();

    let by_stem: Vec<PathBuf> = images
        .iter()
        .map(|input| mask_path_for(input, output_dir, BATCH_MASK_SUFFIX))
        .collect();
    let mut stem_counts: HashMap<String, usize> = HashMap::new();
    for path in &by_stem {
        *stem_counts.entry(key(path)).or_insert(0) += 1;
    }

    let mut taken: HashSet<String> = HashSet::new();
    images
        .iter()
        .zip(by_stem)
        .map(|(input, path)| {
            let base = if stem_counts[&key(&path)] > 1 {
                mask_path_with_extension(input, output_dir, BATCH_MASK_SUFFIX)
            } else {
                path
            };
            let mut candidate = base.clone();
            let mut n = 2;
            while !taken.insert(key(&candidate)) {
                candidate = numbered(&base, n);
                n += 1;
            }
            candidate
        })
        .collect()
}

fn numbered(path: &Path, n: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{stem}_{n}.png"))
}

/// Mask every image in `input_dir`, writing one mask per image into
/// `output_dir` under the names chosen by [`plan_outputs`].
///
/// Images are processed in parallel and independently: a failure is
/// recorded in its `BatchItem` and does not stop the others. Items are
/// returned in input path order.
pub fn mask_directory(
    input_dir: &Path,
    output_dir: &Path,
    settings: &MaskSettings,
    reporter: &dyn ProgressReporter,
) -> Result<Vec<BatchItem>> {
    let images = collect_images(input_dir)?;
    info!(count = images.len(), input = %input_dir.display(), "Masking directory");
    reporter.begin(images.len());

    let outputs = plan_outputs(&images, output_dir);
    let items: Vec<BatchItem> = images
        .into_par_iter()
        .zip(outputs)
        .map(|(input, output)| {
            let result = mask_file(&input, &output, settings).map(|m| m.foreground_count());
            if let Err(ref e) = result {
                warn!(input = %input.display(), error = %e, "Mask failed");
            }
            let item = BatchItem {
                input,
                output,
                result,
            };
            reporter.advance(&item);
            item
        })
        .collect();

    reporter.finish();
    Ok(items)
}
