//! Extraction of slice crops from page images.
//!
//! The planner has already decided where to cut; this module only marshals a
//! descriptor's rectangle into an actual crop. The padded rectangle may hang
//! slightly past the page edge, so coordinates are clamped to the image
//! before cropping.

use image::RgbImage;

use crate::core::errors::{SegResult, SegmentationError};
use crate::domain::SliceDescriptor;

/// Crops the page image to a slice descriptor's rectangle.
///
/// # Errors
///
/// [`SegmentationError::CropOutOfBounds`] if the rectangle does not overlap
/// the image at all.
pub fn crop_slice(image: &RgbImage, slice: &SliceDescriptor) -> SegResult<RgbImage> {
    let (width, height) = image.dimensions();

    let left = slice.top_left.x.clamp(0, width as i32);
    let top = slice.top_left.y.clamp(0, height as i32);
    let right = slice.bottom_right.x.clamp(0, width as i32);
    let bottom = slice.bottom_right.y.clamp(0, height as i32);

    if right <= left || bottom <= top {
        return Err(SegmentationError::CropOutOfBounds {
            left: slice.top_left.x,
            top: slice.top_left.y,
            right: slice.bottom_right.x,
            bottom: slice.bottom_right.y,
            width,
            height,
        });
    }

    let cropped = image::imageops::crop_imm(
        image,
        left as u32,
        top as u32,
        (right - left) as u32,
        (bottom - top) as u32,
    );

    Ok(cropped.to_image())
}
