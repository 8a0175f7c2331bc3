//! Image decoding, resizing and atomic export

use crate::io::error::{MosaicError, Result};
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbImage};
use tempfile::NamedTempFile;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Resampling filter used whenever an image is scaled
pub const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

/// Decode any supported image file into 8-bit RGB, dropping alpha
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded
pub fn load_rgb_image(path: &Path) -> Result<RgbImage> {
    let image = image::open(path).map_err(|e| MosaicError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(image.to_rgb8())
}

/// Dimensions that fit `width`x`height` inside a `max_width`x`max_height` box
///
/// Aspect ratio is preserved and the image is never enlarged, so dimensions
/// that already fit are returned unchanged. Each side is at least one pixel.
pub fn thumbnail_dimensions(
    width: u32,
    height: u32,
    max_width: u32,
    max_height: u32,
) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let scale = (f64::from(max_width) / f64::from(width))
        .min(f64::from(max_height) / f64::from(height));
    let scaled_width = (f64::from(width) * scale).round().max(1.0) as u32;
    let scaled_height = (f64::from(height) * scale).round().max(1.0) as u32;

    (scaled_width.min(max_width), scaled_height.min(max_height))
}

/// Shrink an image to fit a box, preserving aspect ratio and never enlarging
pub fn thumbnail(image: &RgbImage, max_width: u32, max_height: u32) -> RgbImage {
    let (width, height) =
        thumbnail_dimensions(image.width(), image.height(), max_width, max_height);
    if (width, height) == image.dimensions() {
        return image.clone();
    }
    imageops::resize(image, width, height, RESIZE_FILTER)
}

/// Normalize an arbitrary image into a `size`x`size` square
///
/// The image is first thumbnailed so that large inputs are downsampled with
/// aspect preserved, then force-resized to the exact square if the
/// thumbnail is not already that shape.
pub fn normalize_to_square(image: &RgbImage, size: u32) -> RgbImage {
    let thumb = thumbnail(image, size, size);
    if thumb.dimensions() == (size, size) {
        thumb
    } else {
        imageops::resize(&thumb, size, size, RESIZE_FILTER)
    }
}

/// Downsample a source image to at most `max_columns` columns
///
/// Rows scale with the same factor. Images already narrow enough are
/// returned unchanged.
pub fn downsample_columns(image: &RgbImage, max_columns: u32) -> RgbImage {
    thumbnail(image, max_columns, u32::MAX)
}

/// List regular files directly inside `directory`, sorted by path
///
/// # Errors
///
/// Returns an error if the directory or one of its entries cannot be read
pub fn list_regular_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let read_error = |e| MosaicError::FileSystem {
        path: directory.to_path_buf(),
        operation: "read directory",
        source: e,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(directory).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Encoding format named by the extension of `output_path`
///
/// # Errors
///
/// Returns an error if the extension is missing or names no supported format
pub fn output_format(output_path: &Path) -> Result<ImageFormat> {
    ImageFormat::from_path(output_path).map_err(|e| MosaicError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })
}

/// Write an image so that `output_path` either holds the full result or is untouched
///
/// The encoded image goes to a temporary file in the destination directory,
/// which is then renamed over `output_path`. The format follows the output
/// extension. A new file gets the usual umask-filtered `0o666` mode; a
/// replaced file keeps its previous permissions.
///
/// # Errors
///
/// Returns an error if:
/// - The extension does not name a supported format
/// - The destination directory does not exist or is not writable
/// - Encoding or the final rename fails
pub fn save_atomically(image: &RgbImage, output_path: &Path) -> Result<()> {
    let format = output_format(output_path)?;

    let directory = match output_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staging = staging_file(directory, output_path)?;

    {
        let mut writer = BufWriter::new(staging.as_file_mut());
        image
            .write_to(&mut writer, format)
            .map_err(|e| MosaicError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;
        writer.flush().map_err(|e| MosaicError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "flush output",
            source: e,
        })?;
    }

    staging
        .persist(output_path)
        .map_err(|e| MosaicError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "publish output",
            source: e.error,
        })?;

    Ok(())
}

/// Temporary file next to `output_path` carrying the permissions the output should end up with
fn staging_file(directory: &Path, output_path: &Path) -> Result<NamedTempFile> {
    let create_error = |e| MosaicError::FileSystem {
        path: directory.to_path_buf(),
        operation: "create temporary file",
        source: e,
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".mosaic-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let staging = builder.tempfile_in(directory).map_err(create_error)?;

    if let Ok(existing) = std::fs::metadata(output_path) {
        staging
            .as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| MosaicError::FileSystem {
                path: output_path.to_path_buf(),
                operation: "copy permissions",
                source: e,
            })?;
    }

    Ok(staging)
}
