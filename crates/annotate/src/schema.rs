use std::collections::{BTreeMap, HashMap};

use crate::entities::group_mentions;
use crate::tree::ParseTree;

/// Dependency relation, normalized across the Stanford Dependencies and
/// Universal Dependencies label sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Relation {
    Subject,
    PassiveSubject,
    Object,
    Copula,
    Auxiliary,
    AdverbialModifier,
    AdverbialClause,
    Marker,
    Case,
    Oblique,
    Temporal,
    Compound,
    NumericModifier,
    Negation,
    Punctuation,
    Other(String),
}

impl Relation {
    pub fn from_label(label: &str) -> Self {
        let lower = label.to_ascii_lowercase();
        match lower.as_str() {
            "nsubj" | "csubj" => Self::Subject,
            "nsubjpass" | "nsubj:pass" | "csubjpass" | "csubj:pass" => Self::PassiveSubject,
            "dobj" | "obj" => Self::Object,
            "cop" => Self::Copula,
            "aux" | "auxpass" | "aux:pass" => Self::Auxiliary,
            "advmod" => Self::AdverbialModifier,
            "advcl" => Self::AdverbialClause,
            "mark" => Self::Marker,
            "case" => Self::Case,
            "tmod" | "obl:tmod" | "nmod:tmod" => Self::Temporal,
            "nn" | "compound" | "flat" | "flat:name" => Self::Compound,
            "num" | "nummod" => Self::NumericModifier,
            "neg" => Self::Negation,
            "punct" => Self::Punctuation,
            _ if is_oblique(&lower) => Self::Oblique,
            _ => Self::Other(lower),
        }
    }

    pub fn is_subject(&self) -> bool {
        matches!(self, Self::Subject | Self::PassiveSubject)
    }
}

fn is_oblique(label: &str) -> bool {
    ["obl", "nmod", "prep", "pobj"].contains(&label)
        || ["obl:", "nmod:", "prep_", "prepc_"]
            .iter()
            .any(|prefix| label.starts_with(prefix))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEdge {
    pub relation: Relation,
    pub governor: String,
    pub dependent: String,
}

impl DependencyEdge {
    pub fn new(label: &str, governor: impl Into<String>, dependent: impl Into<String>) -> Self {
        Self {
            relation: Relation::from_label(label),
            governor: governor.into(),
            dependent: dependent.into(),
        }
    }
}

/// One annotated sentence as returned by the annotation service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sentence {
    pub raw: String,
    pub words: Vec<String>,
    pub pos: Vec<String>,
    pub lemmas: Vec<String>,
    /// Entity category -> mentions, in sentence order.
    pub entities: BTreeMap<String, Vec<String>>,
    pub tree: ParseTree,
    pub dependencies: Vec<DependencyEdge>,
    /// Mention -> canonical referent, resolved against the annotated window.
    pub corefs: HashMap<String, String>,
}

impl Sentence {
    pub fn builder(raw: impl Into<String>) -> SentenceBuilder {
        SentenceBuilder::new(raw)
    }

    /// Tokens, tags and lemmas line up one to one.
    pub fn is_aligned(&self) -> bool {
        self.words.len() == self.pos.len() && self.words.len() == self.lemmas.len()
    }

    fn index_of(&self, word: &str) -> Option<usize> {
        self.words.iter().position(|w| w == word)
    }

    /// Lemma of the first token spelled `word`.
    pub fn lemma_of(&self, word: &str) -> Option<&str> {
        self.index_of(word)
            .and_then(|i| self.lemmas.get(i))
            .map(String::as_str)
    }

    pub fn pos_of(&self, word: &str) -> Option<&str> {
        self.index_of(word)
            .and_then(|i| self.pos.get(i))
            .map(String::as_str)
    }

    /// Surface form of the first token whose lemma is `lemma`.
    pub fn word_for_lemma(&self, lemma: &str) -> Option<&str> {
        self.lemmas
            .iter()
            .position(|l| l.eq_ignore_ascii_case(lemma))
            .and_then(|i| self.words.get(i))
            .map(String::as_str)
    }

    /// Every surface form whose lemma is `lemma`, in order, without repeats.
    pub fn words_with_lemma(&self, lemma: &str) -> Vec<&str> {
        let mut words: Vec<&str> = Vec::new();
        for (word, l) in self.words.iter().zip(&self.lemmas) {
            if l.eq_ignore_ascii_case(lemma) && !words.contains(&word.as_str()) {
                words.push(word);
            }
        }
        words
    }

    pub fn canonical(&self, mention: &str) -> Option<&str> {
        self.corefs.get(mention).map(String::as_str)
    }

    pub fn mentions(&self, category: &str) -> &[String] {
        self.entities
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Entity category of the mention that contains `word`, if any.
    pub fn entity_category(&self, word: &str) -> Option<&str> {
        self.entities.iter().find_map(|(category, mentions)| {
            mentions
                .iter()
                .any(|m| m.split(' ').any(|w| w == word))
                .then_some(category.as_str())
        })
    }

    /// Edges whose governor is `word`.
    pub fn dependents_of<'a>(&'a self, word: &'a str) -> impl Iterator<Item = &'a DependencyEdge> {
        self.dependencies.iter().filter(move |e| e.governor == word)
    }

    pub fn has_negation(&self) -> bool {
        self.dependencies
            .iter()
            .any(|e| e.relation == Relation::Negation)
            || self
                .lemmas
                .iter()
                .any(|l| matches!(l.to_ascii_lowercase().as_str(), "not" | "n't" | "never"))
    }
}

/// Incremental construction of a [`Sentence`]; entity mentions are folded from
/// per-token tags when the sentence is built.
#[derive(Debug, Default)]
pub struct SentenceBuilder {
    sentence: Sentence,
    tags: Vec<String>,
}

impl SentenceBuilder {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            sentence: Sentence {
                raw: raw.into(),
                ..Sentence::default()
            },
            tags: Vec::new(),
        }
    }

    /// Append a token with its POS tag, lemma and entity tag (`"O"` for none).
    pub fn token(mut self, word: &str, pos: &str, lemma: &str, ner: &str) -> Self {
        self.sentence.words.push(word.to_string());
        self.sentence.pos.push(pos.to_string());
        self.sentence.lemmas.push(lemma.to_string());
        self.tags.push(ner.to_string());
        self
    }

    pub fn tree(mut self, tree: ParseTree) -> Self {
        self.sentence.tree = tree;
        self
    }

    pub fn edge(mut self, label: &str, governor: &str, dependent: &str) -> Self {
        self.sentence
            .dependencies
            .push(DependencyEdge::new(label, governor, dependent));
        self
    }

    pub fn coref(mut self, mention: &str, canonical: &str) -> Self {
        self.sentence
            .corefs
            .insert(mention.to_string(), canonical.to_string());
        self
    }

    pub fn build(mut self) -> Sentence {
        let tagged = self
            .sentence
            .words
            .iter()
            .map(String::as_str)
            .zip(self.tags.iter().map(String::as_str));
        for (category, mention) in group_mentions(tagged) {
            self.sentence.entities.entry(category).or_default().push(mention);
        }
        self.sentence
    }
}
