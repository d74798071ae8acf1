use std::path::{Path, PathBuf};

use image::error::{ImageFormatHint, UnsupportedError, UnsupportedErrorKind};
use image::{GrayImage, ImageError, ImageFormat, RgbImage};
use ndarray::{Array2, Array3};

use crate::consts::COLOR_CHANNEL_COUNT;
use crate::error::{MaskError, Result};
use crate::frame::{ColorImage, Mask};

/// Decode any supported image file into an 8-bit color image.
///
/// Grayscale and alpha inputs are expanded/flattened to three channels.
pub fn load_color_image(path: &Path) -> Result<ColorImage> {
    let img = image::open(path).map_err(|source| MaskError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;
    let rgb = img.to_rgb8();
    let (w, h) = rgb.dimensions();
    let data = Array3::from_shape_vec(
        (h as usize, w as usize, COLOR_CHANNEL_COUNT),
        rgb.into_raw(),
    )
    .map_err(|_| MaskError::InvalidDimensions {
        width: w as usize,
        height: h as usize,
    })?;
    ColorImage::new(data)
}

/// Save a color image, choosing the format from the file extension.
pub fn save_color_image(image: &ColorImage, path: &Path) -> Result<()> {
    let (h, w) = (image.height(), image.width());
    let mut img = RgbImage::new(w as u32, h as u32);
    for row in 0..h {
        for col in 0..w {
            img.put_pixel(col as u32, row as u32, image::Rgb(image.pixel(row, col)));
        }
    }
    ensure_parent_dir(path)?;
    img.save(path).map_err(|source| MaskError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a mask as an 8-bit grayscale image.
///
/// Parent directories are created as needed. The format follows the file
/// extension; unknown or missing extensions are written as PNG. Lossy
/// formats (JPEG, AVIF) would blur the 0/255 levels and are refused with
/// [`MaskError::OutputWrite`] before anything is written.
pub fn save_mask(mask: &Mask, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
    if is_lossy(format) {
        let hint = ImageFormatHint::Exact(format);
        return Err(MaskError::OutputWrite {
            path: path.to_path_buf(),
            source: ImageError::Unsupported(UnsupportedError::from_format_and_kind(
                hint.clone(),
                UnsupportedErrorKind::Format(hint),
            )),
        });
    }

    let (h, w) = (mask.height(), mask.width());
    let mut img = GrayImage::new(w as u32, h as u32);
    for ((row, col), &v) in mask.data.indexed_iter() {
        img.put_pixel(col as u32, row as u32, image::Luma([v]));
    }

    ensure_parent_dir(path)?;
    img.save_with_format(path, format)
        .map_err(|source| MaskError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })
}

/// Read a mask image back as a single 8-bit plane.
pub fn load_mask(path: &Path) -> Result<Mask> {
    let img = image::open(path).map_err(|source| MaskError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;
    let gray = img.to_luma8();
    let (w, h) = gray.dimensions();
    let data = Array2::from_shape_vec((h as usize, w as usize), gray.into_raw()).map_err(
        |_| MaskError::InvalidDimensions {
            width: w as usize,
            height: h as usize,
        },
    )?;
    Ok(Mask::new(data))
}

fn is_lossy(format: ImageFormat) -> bool {
    matches!(format, ImageFormat::Jpeg | ImageFormat::Avif)
}

/// True when the path has an extension the image decoder recognizes.
pub fn is_supported_image(path: &Path) -> bool {
    path.is_file() && ImageFormat::from_path(path).is_ok()
}

/// Output path for `input` inside `output_dir`: `<stem><suffix>.png`.
pub fn mask_path_for(input: &Path, output_dir: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    output_dir.join(format!("{stem}{suffix}.png"))
}

/// Like [`mask_path_for`] but keeps the input extension in the name:
/// `car.bmp` gives `car.bmp<suffix>.png`.
pub fn mask_path_with_extension(input: &Path, output_dir: &Path, suffix: &str) -> PathBuf {
    let name = input
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    output_dir.join(format!("{name}{suffix}.png"))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|e| MaskError::OutputWrite {
                path: path.to_path_buf(),
                source: image::ImageError::IoError(e),
            }),
        _ => Ok(()),
    }
}
