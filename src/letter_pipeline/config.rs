//! Normalization configuration types

use crate::letter_pipeline::common::error::{PipelineError, Result};

/// Input side length of the letter classifier.
pub const CLASSIFIER_INPUT_SIZE: u32 = 28;

/// Largest margin, as a fraction of the longer cropped side, a config may ask for.
pub const MAX_PADDING_RATIO: f32 = 1.0;

/// Largest side length accepted for the blur working square.
pub const MAX_BLUR_WORKING_SIZE: u32 = 4096;

/// Configuration for canvas to tensor normalization
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationConfig {
    /// Fraction of the longer cropped side added as margin on every side
    pub padding_ratio: f32,
    /// Gaussian blur radius in pixels at the working resolution (0 disables blurring)
    pub blur_radius: u32,
    /// Side length the padded square is scaled to before blurring
    pub blur_working_size: u32,
    /// Side length of the square image handed to the classifier
    pub target_size: u32,
    /// A pixel is ink when its blue channel is strictly below this value
    pub ink_threshold: u8,
    /// Whether to reject canvases larger than `max_dimension`
    pub validate_dimensions: bool,
    /// Largest accepted canvas width or height
    pub max_dimension: Option<u32>,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            padding_ratio: 0.05,
            blur_radius: 3,
            blur_working_size: 100,
            target_size: CLASSIFIER_INPUT_SIZE,
            ink_threshold: 0xFF,
            validate_dimensions: true,
            max_dimension: Some(16384),
        }
    }
}

impl NormalizationConfig {
    pub fn builder() -> NormalizationConfigBuilder {
        NormalizationConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        if !self.padding_ratio.is_finite() || !(0.0..=MAX_PADDING_RATIO).contains(&self.padding_ratio) {
            return Err(PipelineError::InvalidConfig(format!(
                "padding_ratio must be within [0, {}], got {}",
                MAX_PADDING_RATIO, self.padding_ratio
            )));
        }
        if self.target_size == 0 {
            return Err(PipelineError::InvalidConfig(
                "target_size must be positive".to_string(),
            ));
        }
        if self.blur_working_size == 0 || self.blur_working_size > MAX_BLUR_WORKING_SIZE {
            return Err(PipelineError::InvalidConfig(format!(
                "blur_working_size must be within [1, {}], got {}",
                MAX_BLUR_WORKING_SIZE, self.blur_working_size
            )));
        }
        Ok(())
    }
}

/// Builder for NormalizationConfig
#[derive(Default)]
pub struct NormalizationConfigBuilder {
    padding_ratio: Option<f32>,
    blur_radius: Option<u32>,
    blur_working_size: Option<u32>,
    target_size: Option<u32>,
    ink_threshold: Option<u8>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<u32>>,
}

impl NormalizationConfigBuilder {
    pub fn padding_ratio(mut self, ratio: f32) -> Self {
        self.padding_ratio = Some(ratio);
        self
    }

    pub fn blur_radius(mut self, radius: u32) -> Self {
        self.blur_radius = Some(radius);
        self
    }

    pub fn blur_working_size(mut self, size: u32) -> Self {
        self.blur_working_size = Some(size);
        self
    }

    pub fn target_size(mut self, size: u32) -> Self {
        self.target_size = Some(size);
        self
    }

    pub fn ink_threshold(mut self, threshold: u8) -> Self {
        self.ink_threshold = Some(threshold);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max: Option<u32>) -> Self {
        self.max_dimension = Some(max);
        self
    }

    pub fn build(self) -> NormalizationConfig {
        let default = NormalizationConfig::default();
        NormalizationConfig {
            padding_ratio: self.padding_ratio.unwrap_or(default.padding_ratio),
            blur_radius: self.blur_radius.unwrap_or(default.blur_radius),
            blur_working_size: self.blur_working_size.unwrap_or(default.blur_working_size),
            target_size: self.target_size.unwrap_or(default.target_size),
            ink_threshold: self.ink_threshold.unwrap_or(default.ink_threshold),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classifier_input() {
        let config = NormalizationConfig::default();
        assert_eq!(config.target_size, 28);
        assert_eq!(config.blur_radius, 3);
        assert_eq!(config.blur_working_size, 100);
        assert_eq!(config.ink_threshold, 0xFF);
        assert!((config.padding_ratio - 0.05).abs() < f32::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides_only_given_fields() {
        let config = NormalizationConfig::builder()
            .padding_ratio(0.1)
            .blur_radius(0)
            .max_dimension(None)
            .build();

        assert!((config.padding_ratio - 0.1).abs() < f32::EPSILON);
        assert_eq!(config.blur_radius, 0);
        assert_eq!(config.max_dimension, None);
        assert_eq!(config.target_size, CLASSIFIER_INPUT_SIZE);
        assert!(config.validate_dimensions);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let negative = NormalizationConfig::builder().padding_ratio(-0.5).build();
        assert!(matches!(negative.validate(), Err(PipelineError::InvalidConfig(_))));

        let nan = NormalizationConfig::builder().padding_ratio(f32::NAN).build();
        assert!(matches!(nan.validate(), Err(PipelineError::InvalidConfig(_))));

        let zero_target = NormalizationConfig::builder().target_size(0).build();
        assert!(matches!(zero_target.validate(), Err(PipelineError::InvalidConfig(_))));

        let zero_working = NormalizationConfig::builder().blur_working_size(0).build();
        assert!(matches!(zero_working.validate(), Err(PipelineError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_bounds_padding_and_working_size() {
        let huge_padding = NormalizationConfig::builder().padding_ratio(1.0e9).build();
        assert!(matches!(huge_padding.validate(), Err(PipelineError::InvalidConfig(_))));

        let infinite = NormalizationConfig::builder().padding_ratio(f32::INFINITY).build();
        assert!(matches!(infinite.validate(), Err(PipelineError::InvalidConfig(_))));

        let widest = NormalizationConfig::builder().padding_ratio(MAX_PADDING_RATIO).build();
        assert!(widest.validate().is_ok());

        let huge_working = NormalizationConfig::builder()
            .blur_working_size(MAX_BLUR_WORKING_SIZE + 1)
            .build();
        assert!(matches!(huge_working.validate(), Err(PipelineError::InvalidConfig(_))));

        let largest_working = NormalizationConfig::builder()
            .blur_working_size(MAX_BLUR_WORKING_SIZE)
            .build();
        assert!(largest_working.validate().is_ok());
    }
}
