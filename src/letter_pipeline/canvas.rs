//! Reading canvases from and writing previews to disk.

use std::path::Path;

use image::{GrayImage, ImageFormat, RgbaImage};
use tracing::debug;

use crate::letter_pipeline::common::error::{PipelineError, Result};

/// Decodes an image file of any supported format into an RGBA canvas.
pub fn load_canvas<P: AsRef<Path>>(path: P) -> Result<RgbaImage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| PipelineError::InputReadError(format!("{}: {}", path.display(), e)))?;
    decode_canvas(&bytes)
}

pub fn decode_canvas(bytes: &[u8]) -> Result<RgbaImage> {
    debug!("Decoding canvas, {} bytes", bytes.len());
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| PipelineError::DecodeError(e.to_string()))?;
    Ok(decoded.to_rgba8())
}

/// Writes a normalized image as PNG so it can be inspected next to its tensor.
pub fn save_preview<P: AsRef<Path>>(image: &GrayImage, path: P) -> Result<()> {
    let path = path.as_ref();
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| PipelineError::OutputWriteError(format!("{}: {}", path.display(), e)))
}
