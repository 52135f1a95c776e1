use annotate::{AnnotationSession, EntityTable, Sentence, SessionStats};
use ingest::{Document, tokenize};
use tracing::{debug, info, warn};

use crate::bm25::Bm25;

/// Sentences of context, ranked sentence included, sent for annotation.
pub const DEFAULT_WINDOW: usize = 5;

/// A sentence that scored positively for a query.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSentence {
    pub paragraph: usize,
    pub position: usize,
    pub text: String,
    pub score: f64,
}

/// Locates and annotates the sentences of one document that best match a
/// question. Owns the annotation session for its lifetime.
pub struct Finder {
    document: Document,
    session: AnnotationSession,
    ranker: Bm25,
    window: usize,
    entities: EntityTable,
}

impl Finder {
    pub fn new(document: Document, session: AnnotationSession) -> Self {
        Self {
            document,
            session,
            ranker: Bm25::default(),
            window: DEFAULT_WINDOW,
            entities: EntityTable::new(),
        }
    }

    pub fn with_ranker(mut self, ranker: Bm25) -> Self {
        self.ranker = ranker;
        self
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window.max(1);
        self
    }

    pub fn entities(&self) -> &EntityTable {
        &self.entities
    }

    pub fn session_stats(&self) -> SessionStats {
        self.session.stats()
    }

    /// Build the document entity table, one annotation request per
    /// paragraph. Paragraphs whose annotation fails are left out.
    pub async fn tag_entities(&mut self) {
        let mut table = EntityTable::new();
        for para in self.document.paragraphs() {
            match self.session.parse(&para.text).await {
                Ok(sentences) => sentences.iter().for_each(|s| table.record_sentence(s)),
                Err(e) => warn!(paragraph = para.index, error = %e, "Entity tagging failed"),
            }
        }
        info!(categories = table.categories().count(), "Tagged document entities");
        self.entities = table;
    }

    /// Annotate a question on its own. `None` when the service gives up.
    pub async fn annotate_question(&mut self, question: &str) -> Option<Sentence> {
        match self.session.parse_sentence(question).await {
            Ok(sentence) => Some(sentence),
            Err(e) => {
                warn!(question, error = %e, "Could not annotate question");
                None
            }
        }
    }

    /// Every sentence of the document with a positive BM25 score, best first.
    pub fn rank_sentences(&self, keywords: &[String]) -> Vec<RankedSentence> {
        let sentences = self.document.sentences();
        let corpus: Vec<Vec<String>> = sentences.iter().map(|s| tokenize(s.text)).collect();

        self.ranker
            .rank(&corpus, &corpus, keywords)
            .into_iter()
            .map(|(i, score)| RankedSentence {
                paragraph: sentences[i].paragraph,
                position: sentences[i].position,
                text: sentences[i].text.to_string(),
                score,
            })
            .collect()
    }

    /// Lazily annotated candidates for `keywords`, most relevant first.
    pub fn search(&mut self, keywords: &[String]) -> Candidates<'_> {
        let ranked = self.rank_sentences(keywords);
        debug!(candidates = ranked.len(), "Ranked sentences");
        Candidates {
            finder: self,
            ranked: ranked.into_iter(),
        }
    }

    /// The ranked sentence preceded by the rest of its paragraph, trimmed to
    /// the last `window` sentences.
    fn window_for(&self, candidate: &RankedSentence) -> String {
        let Some(para) = self.document.paragraphs().get(candidate.paragraph) else {
            return candidate.text.clone();
        };
        let sentences = para.sentences();
        let end = (candidate.position + 1).min(sentences.len());
        let start = end.saturating_sub(self.window);
        sentences[start..end].join(" ")
    }
}

/// One pass over the ranked sentences of a query. Not restartable: a new
/// search re-ranks and re-annotates from scratch.
pub struct Candidates<'f> {
    finder: &'f mut Finder,
    ranked: std::vec::IntoIter<RankedSentence>,
}

impl Candidates<'_> {
    /// Annotate the next candidate window and return its last sentence.
    /// Windows the service cannot annotate are skipped.
    pub async fn next(&mut self) -> Option<Sentence> {
        while let Some(candidate) = self.ranked.next() {
            let window = self.finder.window_for(&candidate);
            match self.finder.session.parse(&window).await {
                Ok(mut sentences) => {
                    debug!(
                        score = candidate.score,
                        sentence = %candidate.text,
                        "Annotated candidate"
                    );
                    return sentences.pop();
                }
                Err(e) => {
                    warn!(sentence = %candidate.text, error = %e, "Skipping candidate");
                }
            }
        }
        None
    }

    pub fn remaining(&self) -> usize {
        self.ranked.len()
    }
}
