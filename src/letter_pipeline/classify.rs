//! Classifier boundary and the decision rule over its scores.

use std::sync::Mutex;

use crate::letter_pipeline::common::error::{PipelineError, Result};
use crate::letter_pipeline::tensor::Tensor;

/// Number of letter classes, `A` through `Z`.
pub const LETTER_CLASSES: usize = 26;

/// Opaque model: a packed tensor in, one unnormalized score per class out.
///
/// Implementations report an unreachable or failing backend as
/// [`PipelineError::ClassificationUnavailable`]; callers decide whether to retry.
pub trait ClassifierPort {
    fn predict(&self, tensor: &Tensor) -> Result<Vec<f32>>;
}

impl<F> ClassifierPort for F
where
    F: Fn(&Tensor) -> Result<Vec<f32>>,
{
    fn predict(&self, tensor: &Tensor) -> Result<Vec<f32>> {
        self(tensor)
    }
}

/// Serializes calls into a model that is not safe to run concurrently.
pub struct SharedClassifier<C> {
    inner: Mutex<C>,
}

impl<C: ClassifierPort> SharedClassifier<C> {
    pub fn new(classifier: C) -> Self {
        Self {
            inner: Mutex::new(classifier),
        }
    }

    pub fn into_inner(self) -> Result<C> {
        self.inner
            .into_inner()
            .map_err(|_| PipelineError::ClassificationUnavailable("classifier lock poisoned".to_string()))
    }
}

impl<C: ClassifierPort> ClassifierPort for SharedClassifier<C> {
    fn predict(&self, tensor: &Tensor) -> Result<Vec<f32>> {
        let classifier = self
            .inner
            .lock()
            .map_err(|_| PipelineError::ClassificationUnavailable("classifier lock poisoned".to_string()))?;
        classifier.predict(tensor)
    }
}

/// Index of the highest score, keeping the earliest index on ties.
///
/// Returns `None` only for an empty slice. NaN scores never win.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    if scores.is_empty() {
        return None;
    }
    let mut best_value = f32::NEG_INFINITY;
    let mut best_index = 0;
    for (index, &score) in scores.iter().enumerate() {
        if score > best_value {
            best_value = score;
            best_index = index;
        }
    }
    Some(best_index)
}

/// Letter for a class index, `0 -> 'A'` through `25 -> 'Z'`.
pub fn letter_for_class(class_index: usize) -> Option<char> {
    if class_index < LETTER_CLASSES {
        char::from_u32(u32::from(b'A') + class_index as u32)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationResult {
    pub class_index: usize,
    pub score: f32,
}

impl ClassificationResult {
    pub fn from_scores(scores: &[f32]) -> Option<Self> {
        argmax(scores).map(|class_index| Self {
            class_index,
            score: scores[class_index],
        })
    }

    pub fn letter(&self) -> Option<char> {
        letter_for_class(self.class_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argmax_first_occurrence_wins() {
        assert_eq!(argmax(&[0.1, 0.9, 0.9, 0.2]), Some(1));
    }

    #[test]
    fn test_argmax_edge_cases() {
        assert_eq!(argmax(&[]), None);
        assert_eq!(argmax(&[-3.0]), Some(0));
        assert_eq!(argmax(&[-5.0, -1.0, -2.0]), Some(1));
        assert_eq!(argmax(&[f32::NEG_INFINITY, f32::NEG_INFINITY]), Some(0));
        assert_eq!(argmax(&[f32::NAN, 0.5, f32::NAN]), Some(1));
    }

    #[test]
    fn test_letters() {
        assert_eq!(letter_for_class(0), Some('A'));
        assert_eq!(letter_for_class(7), Some('H'));
        assert_eq!(letter_for_class(25), Some('Z'));
        assert_eq!(letter_for_class(26), None);
    }

    #[test]
    fn test_result_from_scores() {
        let result = ClassificationResult::from_scores(&[0.0, 3.5, -1.0]).unwrap();
        assert_eq!(result.class_index, 1);
        assert_eq!(result.score, 3.5);
        assert_eq!(result.letter(), Some('B'));
        assert_eq!(ClassificationResult::from_scores(&[]), None);
    }
}
