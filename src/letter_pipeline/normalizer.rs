use std::borrow::Cow;

use image::{GrayImage, RgbaImage};
use tracing::{debug, info, instrument, warn};

use crate::letter_pipeline::{
    blur, bounds, color, crop, orient, resample,
    common::error::{PipelineError, Result},
    config::NormalizationConfig,
    tensor::{self, Tensor},
    timing::PipelineTimings,
};

/// Turns a drawing canvas into the fixed-size tensor the letter classifier was trained on.
///
/// Stages run in order: ink bounds, square crop with margin, blur, resize,
/// reorientation, grayscale inversion, packing. A canvas without ink skips the
/// crop and blur and is resized as is.
#[derive(Debug, Clone, Default)]
pub struct LetterNormalizer {
    config: NormalizationConfig,
}

impl LetterNormalizer {
    pub fn new(config: NormalizationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &NormalizationConfig {
        &self.config
    }

    fn validate_dimensions(&self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidImage { width, height });
        }

        if !self.config.validate_dimensions {
            return Ok(());
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!("Canvas dimensions {}x{} exceed maximum {}", width, height, max);
                return Err(PipelineError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    /// Square, padded and blurred crop around the ink, or the canvas itself when it is blank.
    pub fn area_of_interest<'a>(&self, canvas: &'a RgbaImage) -> Result<Cow<'a, RgbaImage>> {
        let mut timings = PipelineTimings::new();
        self.area_of_interest_timed(canvas, &mut timings)
    }

    fn area_of_interest_timed<'a>(
        &self,
        canvas: &'a RgbaImage,
        timings: &mut PipelineTimings,
    ) -> Result<Cow<'a, RgbaImage>> {
        let bbox = timings.record("detect_bounds", || {
            Ok(bounds::detect(canvas, self.config.ink_threshold))
        })?;

        let Some(bbox) = bbox else {
            info!("Canvas has no ink, passing it through uncropped");
            return Ok(Cow::Borrowed(canvas));
        };

        let square = timings.record("crop_and_pad", || {
            crop::crop_and_pad(canvas, bbox, self.config.padding_ratio)
        })?;

        let blurred = timings.record("blur", || {
            blur::blur(&square, self.config.blur_radius, self.config.blur_working_size)
        })?;

        Ok(Cow::Owned(blurred))
    }

    fn prepare_timed(&self, canvas: &RgbaImage, timings: &mut PipelineTimings) -> Result<GrayImage> {
        self.validate_dimensions(canvas.width(), canvas.height())?;

        let area = self.area_of_interest_timed(canvas, timings)?;

        let resized = timings.record("resize", || {
            resample::resize(&area, self.config.target_size)
        })?;

        let reoriented = timings.record("reorient", || Ok(orient::reorient(&resized)))?;

        timings.record("color_normalize", || Ok(color::normalize(&reoriented)))
    }

    /// Final `target_size` square grayscale image, before packing.
    pub fn prepare(&self, canvas: &RgbaImage) -> Result<GrayImage> {
        let mut timings = PipelineTimings::new();
        self.prepare_timed(canvas, &mut timings)
    }

    pub fn prepare_with_timings(&self, canvas: &RgbaImage) -> Result<(GrayImage, PipelineTimings)> {
        let mut timings = PipelineTimings::new();
        let prepared = self.prepare_timed(canvas, &mut timings)?;
        Ok((prepared, timings))
    }

    #[instrument(skip(self, canvas), fields(width = canvas.width(), height = canvas.height()))]
    pub fn normalize(&self, canvas: &RgbaImage) -> Result<Tensor> {
        let (tensor, timings) = self.normalize_with_timings(canvas)?;
        debug!(
            "Normalized canvas in {:.3}ms",
            timings.total_duration().as_secs_f64() * 1000.0
        );
        Ok(tensor)
    }

    pub fn normalize_with_timings(&self, canvas: &RgbaImage) -> Result<(Tensor, PipelineTimings)> {
        let (prepared, mut timings) = self.prepare_with_timings(canvas)?;
        let tensor = timings.record("pack_tensor", || Ok(tensor::pack(&prepared)))?;
        Ok((tensor, timings))
    }
}
