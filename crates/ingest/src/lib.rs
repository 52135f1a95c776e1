pub mod paragraph;
pub mod reader;
pub mod segmenter;

pub use paragraph::Paragraph;
pub use reader::FileReader;
pub use segmenter::{split_paragraphs, split_sentences, tokenize};

use anyhow::Result;
use std::path::Path;
use tracing::info;

/// A loaded source document, kept as its blank-line paragraphs.
#[derive(Debug, Clone)]
pub struct Document {
    paragraphs: Vec<Paragraph>,
}

/// A sentence located inside the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentenceSpan<'a> {
    pub paragraph: usize,
    pub position: usize,
    pub text: &'a str,
}

impl Document {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            paragraphs: split_paragraphs(&raw.into()),
        }
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let content = FileReader::read_file(path).await?;
        let document = Self::new(content);
        info!(
            path = %path.display(),
            paragraphs = document.paragraphs.len(),
            "Loaded document"
        );
        Ok(document)
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Every sentence tagged with its owning paragraph. Segmentation is re-run
    /// on each call.
    pub fn sentences(&self) -> Vec<SentenceSpan<'_>> {
        self.paragraphs
            .iter()
            .flat_map(|para| {
                para.sentences()
                    .into_iter()
                    .enumerate()
                    .map(move |(position, text)| SentenceSpan {
                        paragraph: para.index,
                        position,
                        text,
                    })
            })
            .collect()
    }
}
