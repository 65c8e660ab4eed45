//! Handwritten letter normalization pipeline
//!
//! This module turns a free-hand drawing canvas into the 28x28 inverted
//! grayscale tensor the letter classifier expects, with one module per stage
//! and a recognizer tying the result to an injected classifier.

pub mod blur;
pub mod bounds;
pub mod canvas;
pub mod classify;
pub mod color;
pub mod common;
pub mod config;
pub mod crop;
pub mod normalizer;
pub mod orient;
pub mod recognizer;
pub mod resample;
pub mod tensor;
pub mod timing;
pub mod transcript;


pub use common::{PipelineError, Result};

pub use bounds::BoundingBox;
pub use canvas::{decode_canvas, load_canvas, save_preview};
pub use classify::{
    argmax, letter_for_class, ClassificationResult, ClassifierPort, SharedClassifier,
    LETTER_CLASSES,
};
pub use config::{NormalizationConfig, NormalizationConfigBuilder, CLASSIFIER_INPUT_SIZE};
pub use normalizer::LetterNormalizer;
pub use recognizer::LetterRecognizer;
pub use tensor::{pack, Tensor};
pub use timing::{PipelineTimings, StageTiming};
pub use transcript::Transcript;
