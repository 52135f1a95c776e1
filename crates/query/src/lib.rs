pub mod bm25;
pub mod finder;

pub use bm25::Bm25;
pub use finder::{Candidates, Finder, RankedSentence};

/// Keyword set of a question: its lower-cased word tokens.
pub fn keywords(question: &str) -> Vec<String> {
    ingest::tokenize(question)
}
