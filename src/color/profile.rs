//! Average color profiling of whole images and rectangular regions
//!
//! Every image is reduced to the per-channel spatial mean of its pixels.
//! Grayscale is spread over three identical components and anything with an
//! alpha channel is refused outright rather than averaged.

use crate::io::error::{MosaicError, Result, computation_error};
use crate::spatial::grid::Cell;
use image::{DynamicImage, ImageBuffer, Pixel};
use num_traits::ToPrimitive;

/// Mean RGB intensity of an image, in the storage units of its pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Mean of the red channel
    pub red: f64,
    /// Mean of the green channel
    pub green: f64,
    /// Mean of the blue channel
    pub blue: f64,
}

impl Color {
    /// Create a color from its three components
    pub const fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Color with the same intensity in every component
    pub const fn gray(intensity: f64) -> Self {
        Self::new(intensity, intensity, intensity)
    }

    /// Components in red, green, blue order
    pub const fn channels(&self) -> [f64; 3] {
        [self.red, self.green, self.blue]
    }

    /// Euclidean distance between two colors in RGB space
    pub fn distance(&self, other: &Self) -> f64 {
        let dr = self.red - other.red;
        let dg = self.green - other.green;
        let db = self.blue - other.blue;
        dr.mul_add(dr, dg.mul_add(dg, db * db)).sqrt()
    }
}

impl From<[f64; 3]> for Color {
    fn from([red, green, blue]: [f64; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

/// Average color of a whole image
///
/// # Errors
///
/// Returns an error if:
/// - The image has an alpha channel (`UnsupportedImageFormat`)
/// - The image has no pixels
pub fn average_color(image: &DynamicImage) -> Result<Color> {
    let whole = Cell {
        column: 0,
        row: 0,
        left: 0,
        top: 0,
        width: image.width(),
        height: image.height(),
    };
    average_region_color(image, &whole)
}

/// Average color of the pixels covered by `cell`
///
/// Equivalent to cropping the region and profiling the crop, without the copy.
///
/// # Errors
///
/// Returns an error if:
/// - The image has an alpha channel (`UnsupportedImageFormat`)
/// - The region is empty or reaches outside the image
pub fn average_region_color(image: &DynamicImage, cell: &Cell) -> Result<Color> {
    let color_type = image.color();
    if color_type.has_alpha() {
        return Err(MosaicError::UnsupportedImageFormat {
            path: None,
            color_type,
        });
    }

    match image {
        DynamicImage::ImageLuma8(buffer) => channel_means(buffer, cell),
        DynamicImage::ImageLuma16(buffer) => channel_means(buffer, cell),
        DynamicImage::ImageRgb8(buffer) => channel_means(buffer, cell),
        DynamicImage::ImageRgb16(buffer) => channel_means(buffer, cell),
        DynamicImage::ImageRgb32F(buffer) => channel_means(buffer, cell),
        _ => Err(MosaicError::UnsupportedImageFormat {
            path: None,
            color_type,
        }),
    }
}

/// Spatial mean of each channel of a one- or three-channel buffer
fn channel_means<P>(buffer: &ImageBuffer<P, Vec<P::Subpixel>>, cell: &Cell) -> Result<Color>
where
    P: Pixel,
    P::Subpixel: ToPrimitive,
{
    let channel_count = usize::from(P::CHANNEL_COUNT);
    if channel_count != 1 && channel_count != 3 {
        return Err(computation_error(
            "average color",
            &format!("expected 1 or 3 channels, found {channel_count}"),
        ));
    }

    if cell.width == 0 || cell.height == 0 {
        return Err(computation_error(
            "average color",
            &format!("region {}x{} has no pixels", cell.width, cell.height),
        ));
    }

    let (right, bottom) = (
        cell.left.checked_add(cell.width),
        cell.top.checked_add(cell.height),
    );
    let in_bounds = matches!((right, bottom), (Some(r), Some(b)) if r <= buffer.width() && b <= buffer.height());
    if !in_bounds {
        return Err(computation_error(
            "average color",
            &format!(
                "region {}x{} at ({}, {}) exceeds image {}x{}",
                cell.width,
                cell.height,
                cell.left,
                cell.top,
                buffer.width(),
                buffer.height()
            ),
        ));
    }

    let mut sums = [0.0_f64; 3];
    for y in cell.top..cell.top + cell.height {
        for x in cell.left..cell.left + cell.width {
            let Some(pixel) = buffer.get_pixel_checked(x, y) else {
                continue;
            };
            for (sum, value) in sums.iter_mut().zip(pixel.channels()) {
                *sum += value.to_f64().ok_or_else(|| {
                    computation_error("average color", &"subpixel is not representable as f64")
                })?;
            }
        }
    }

    let pixel_count = f64::from(cell.width) * f64::from(cell.height);
    if channel_count == 1 {
        return Ok(Color::gray(sums[0] / pixel_count));
    }

    Ok(Color::new(
        sums[0] / pixel_count,
        sums[1] / pixel_count,
        sums[2] / pixel_count,
    ))
}
