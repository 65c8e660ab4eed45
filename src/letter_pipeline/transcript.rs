use std::fmt;

use tracing::warn;

use crate::letter_pipeline::classify::{letter_for_class, ClassificationResult};

/// Running text built from successive recognitions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    text: String,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the letter for `result`; classes outside `A..=Z` are skipped.
    pub fn push(&mut self, result: &ClassificationResult) -> Option<char> {
        self.push_class(result.class_index)
    }

    pub fn push_class(&mut self, class_index: usize) -> Option<char> {
        match letter_for_class(class_index) {
            Some(letter) => {
                self.text.push(letter);
                Some(letter)
            }
            None => {
                warn!(class_index, "Class index has no letter, not appended");
                None
            }
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
