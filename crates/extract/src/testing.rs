//! Hand-annotated sentences and a scripted annotation service for tests.

use annotate::{AnnotationSession, Annotator, ParseTree, RetryPolicy, Sentence};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use ingest::Document;
use query::Finder;
use std::collections::HashMap;
use std::time::Duration;

/// Build a sentence from `word/POS/lemma[/NER]` tokens, a bracketed tree and
/// `(relation, governor, dependent)` edges.
pub fn annotated(raw: &str, tokens: &str, tree: &str, edges: &[(&str, &str, &str)]) -> Sentence {
    let mut builder = Sentence::builder(raw);
    for token in tokens.split_whitespace() {
        let parts: Vec<&str> = token.split('/').collect();
        let ner = parts.get(3).copied().unwrap_or("O");
        builder = builder.token(parts[0], parts[1], parts[2], ner);
    }
    builder = builder.tree(tree.parse::<ParseTree>().unwrap());
    for (relation, governor, dependent) in edges {
        builder = builder.edge(relation, governor, dependent);
    }
    builder.build()
}

/// Answers requests from a fixed text-to-sentences table and fails on
/// anything else.
#[derive(Default)]
pub struct ScriptedAnnotator {
    responses: HashMap<String, Vec<Sentence>>,
}

impl ScriptedAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, text: &str, sentences: Vec<Sentence>) -> Self {
        self.responses.insert(text.to_string(), sentences);
        self
    }
}

#[async_trait]
impl Annotator for ScriptedAnnotator {
    async fn annotate(&mut self, text: &str) -> Result<Vec<Sentence>> {
        self.responses
            .get(text)
            .cloned()
            .ok_or_else(|| anyhow!("no scripted response for {:?}", text))
    }

    async fn reconnect(&mut self) -> Result<()> {
        Ok(())
    }
}

pub fn finder(document: &str, annotator: ScriptedAnnotator) -> Finder {
    let policy = RetryPolicy::new(1, 5, Duration::from_secs(1));
    let session = AnnotationSession::new(Box::new(annotator), policy);
    Finder::new(Document::new(document), session)
}
