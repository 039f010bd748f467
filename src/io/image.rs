//! Image decoding, bit depth normalization and mosaic export

use crate::io::configuration::{MAX_OUTPUT_SCALE, OUTPUT_SCALE_FILTER};
use crate::io::error::{MosaicError, Result, invalid_configuration};
use image::{DynamicImage, RgbImage, imageops};
use std::path::Path;

/// Decode an image file, normalized to 8 bits per channel
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be read or is not a decodable image
pub fn load_image(path: &Path) -> Result<DynamicImage> {
    let image = image::open(path).map_err(|e| MosaicError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(normalize_bit_depth(image))
}

/// Convert wide or floating point images to 8 bits per channel
///
/// Keeps the channel layout, so grayscale stays grayscale and an alpha
/// channel is still visible to the color profiler afterwards.
pub fn normalize_bit_depth(image: DynamicImage) -> DynamicImage {
    match image {
        DynamicImage::ImageLuma16(_) => DynamicImage::ImageLuma8(image.to_luma8()),
        DynamicImage::ImageLumaA16(_) => DynamicImage::ImageLumaA8(image.to_luma_alpha8()),
        DynamicImage::ImageRgb16(_) | DynamicImage::ImageRgb32F(_) => {
            DynamicImage::ImageRgb8(image.to_rgb8())
        }
        DynamicImage::ImageRgba16(_) | DynamicImage::ImageRgba32F(_) => {
            DynamicImage::ImageRgba8(image.to_rgba8())
        }
        other => other,
    }
}

/// Enlarge a mosaic by an integer factor without blending tile edges
///
/// # Errors
///
/// Returns `InvalidConfiguration` if `scale` is zero, above the supported
/// maximum, or would overflow the output dimensions
pub fn scale_mosaic(mosaic: &RgbImage, scale: u32) -> Result<RgbImage> {
    if scale == 0 || scale > MAX_OUTPUT_SCALE {
        return Err(invalid_configuration(
            "scale",
            &scale,
            &format!("must be between 1 and {MAX_OUTPUT_SCALE}"),
        ));
    }

    if scale == 1 {
        return Ok(mosaic.clone());
    }

    let (Some(width), Some(height)) = (
        mosaic.width().checked_mul(scale),
        mosaic.height().checked_mul(scale),
    ) else {
        return Err(invalid_configuration(
            "scale",
            &scale,
            &"scaled output dimensions overflow",
        ));
    };

    Ok(imageops::resize(mosaic, width, height, OUTPUT_SCALE_FILTER))
}

/// Save a mosaic, creating missing parent directories
///
/// The encoder is chosen from the file extension.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written to the specified path
pub fn save_mosaic(mosaic: &RgbImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    mosaic
        .save(output_path)
        .map_err(|e| MosaicError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
