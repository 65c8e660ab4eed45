use image::{imageops, imageops::FilterType, RgbaImage};

use crate::letter_pipeline::common::error::{PipelineError, Result};

/// Bilinear rescale to an exact `target_size` square.
pub fn resize(image: &RgbaImage, target_size: u32) -> Result<RgbaImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(PipelineError::InvalidImage { width, height });
    }
    if target_size == 0 {
        return Err(PipelineError::InvalidConfig(
            "target_size must be positive".to_string(),
        ));
    }
    Ok(imageops::resize(image, target_size, target_size, FilterType::Triangle))
}
