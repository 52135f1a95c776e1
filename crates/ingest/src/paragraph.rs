use serde::{Deserialize, Serialize};

use crate::segmenter;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub index: usize,
    pub text: String,
    pub offset: (usize, usize), // [start, end) byte positions in the source text
}

impl Paragraph {
    pub fn new(index: usize, text: String, offset: (usize, usize)) -> Self {
        Self {
            index,
            text,
            offset,
        }
    }

    /// Sentences of this paragraph, segmented fresh on every call.
    pub fn sentences(&self) -> Vec<&str> {
        segmenter::split_sentences(&self.text)
    }
}
