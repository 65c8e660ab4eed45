//! Stroke softening before downsampling.

use image::{imageops, imageops::FilterType, RgbaImage};

use crate::letter_pipeline::common::error::{PipelineError, Result};
use crate::letter_pipeline::config::MAX_BLUR_WORKING_SIZE;

/// Gaussian sigma for a blur radius, the mapping used by common mobile blur intrinsics.
pub fn sigma_for_radius(radius: u32) -> f32 {
    0.4 * radius as f32 + 0.6
}

/// Blurs `image` at a fixed `working_size` square resolution and scales the result
/// back to the input dimensions, so the amount of smoothing is independent of how
/// large the drawing was. A radius of zero returns an unblurred copy.
pub fn blur(image: &RgbaImage, radius: u32, working_size: u32) -> Result<RgbaImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(PipelineError::InvalidImage { width, height });
    }
    if radius == 0 {
        return Ok(image.clone());
    }
    if working_size == 0 || working_size > MAX_BLUR_WORKING_SIZE {
        return Err(PipelineError::InvalidConfig(format!(
            "blur working size must be within [1, {}], got {}",
            MAX_BLUR_WORKING_SIZE, working_size
        )));
    }

    let working = imageops::resize(image, working_size, working_size, FilterType::Triangle);
    let blurred = imageops::blur(&working, sigma_for_radius(radius));
    Ok(imageops::resize(&blurred, width, height, FilterType::Triangle))
}
