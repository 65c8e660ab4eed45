use std::path::Path;

use image::RgbaImage;
use tracing::{info, instrument, warn};

use crate::letter_pipeline::{
    canvas,
    classify::{ClassificationResult, ClassifierPort},
    common::error::{PipelineError, Result},
    config::NormalizationConfig,
    normalizer::LetterNormalizer,
};

/// Normalizes drawings and runs them through an owned classifier.
///
/// The classifier handle is acquired when the recognizer is built and released
/// when it is dropped, whichever path led there.
pub struct LetterRecognizer<C: ClassifierPort> {
    normalizer: LetterNormalizer,
    classifier: C,
}

impl<C: ClassifierPort> LetterRecognizer<C> {
    pub fn new(config: NormalizationConfig, classifier: C) -> Result<Self> {
        Ok(Self {
            normalizer: LetterNormalizer::new(config)?,
            classifier,
        })
    }

    pub fn with_normalizer(normalizer: LetterNormalizer, classifier: C) -> Self {
        Self {
            normalizer,
            classifier,
        }
    }

    pub fn normalizer(&self) -> &LetterNormalizer {
        &self.normalizer
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    pub fn into_classifier(self) -> C {
        self.classifier
    }

    /// Raw class scores for a drawing.
    pub fn scores(&self, drawing: &RgbaImage) -> Result<Vec<f32>> {
        let tensor = self.normalizer.normalize(drawing)?;
        let scores = {
            let _span = tracing::info_span!("predict", inputs = tensor.len()).entered();
            self.classifier.predict(&tensor).map_err(|e| {
                warn!("Classifier invocation failed: {}", e);
                match e {
                    PipelineError::ClassificationUnavailable(_) => e,
                    other => PipelineError::ClassificationUnavailable(other.to_string()),
                }
            })?
        };
        if scores.is_empty() {
            return Err(PipelineError::ClassificationUnavailable(
                "classifier returned no scores".to_string(),
            ));
        }
        Ok(scores)
    }

    #[instrument(skip(self, drawing), fields(width = drawing.width(), height = drawing.height()))]
    pub fn classify(&self, drawing: &RgbaImage) -> Result<ClassificationResult> {
        let scores = self.scores(drawing)?;
        let result = ClassificationResult::from_scores(&scores).ok_or_else(|| {
            PipelineError::ClassificationUnavailable("classifier returned no scores".to_string())
        })?;
        info!(
            class_index = result.class_index,
            score = result.score,
            letter = ?result.letter(),
            "Classified drawing"
        );
        Ok(result)
    }

    pub fn classify_file<P: AsRef<Path>>(&self, path: P) -> Result<ClassificationResult> {
        let drawing = canvas::load_canvas(path)?;
        self.classify(&drawing)
    }
}
