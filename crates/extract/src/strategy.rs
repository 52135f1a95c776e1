use annotate::{EntityTable, Relation, Sentence};
use async_trait::async_trait;
use query::Finder;
use std::fmt::Debug;
use tracing::debug;

/// Answers one category of question against a document.
#[async_trait]
pub trait AnswerStrategy: Send + Sync {
    async fn extract(&self, question: &str, finder: &mut Finder) -> Option<String>;
}

/// The shared extraction flow, split into its pure steps.
///
/// A strategy reads what it needs from the annotated question once
/// ([`plan`](Extraction::plan)), then tries each candidate sentence in rank
/// order ([`attempt`](Extraction::attempt)) until one yields an answer.
pub trait Extraction: Send + Sync {
    type Plan: Debug + Send + Sync;

    fn name(&self) -> &'static str;

    /// `None` when the question lacks the dependencies this strategy needs.
    fn plan(&self, question: &Sentence, entities: &EntityTable) -> Option<Self::Plan>;

    /// An answer known before any candidate is read.
    fn settled(&self, _plan: &Self::Plan) -> Option<String> {
        None
    }

    fn attempt(&self, plan: &Self::Plan, candidate: &Sentence) -> Option<String>;
}

#[async_trait]
impl<E> AnswerStrategy for E
where
    E: Extraction,
{
    async fn extract(&self, question: &str, finder: &mut Finder) -> Option<String> {
        let parsed = finder.annotate_question(question).await?;
        let Some(plan) = self.plan(&parsed, finder.entities()) else {
            debug!(strategy = self.name(), question, "Question lacks the needed dependencies");
            return None;
        };
        debug!(strategy = self.name(), ?plan, "Planned extraction");

        if let Some(answer) = self.settled(&plan) {
            return Some(answer);
        }

        let keywords = query::keywords(question);
        let mut candidates = finder.search(&keywords);
        while let Some(candidate) = candidates.next().await {
            if let Some(answer) = self.attempt(&plan, &candidate) {
                debug!(strategy = self.name(), sentence = %candidate.raw, "Extracted answer");
                return Some(answer);
            }
        }
        None
    }
}

pub(crate) fn is_wh(word: &str, wh_words: &[&str]) -> bool {
    wh_words.iter().any(|wh| word.eq_ignore_ascii_case(wh))
}

/// Lower-cased lemma of `word`, or the word itself when it has none.
pub(crate) fn lemma(sentence: &Sentence, word: &str) -> String {
    sentence.lemma_of(word).unwrap_or(word).to_lowercase()
}

/// Every dependency edge except punctuation.
pub(crate) fn nominal(relation: &Relation) -> bool {
    !matches!(relation, Relation::Punctuation)
}

/// Drops the clause skeleton around a predicate: its subject, copula,
/// auxiliaries and subordinating marker.
pub(crate) fn predicate(relation: &Relation) -> bool {
    !matches!(
        relation,
        Relation::Subject
            | Relation::PassiveSubject
            | Relation::Copula
            | Relation::Auxiliary
            | Relation::Marker
            | Relation::Punctuation
    )
}

/// `head` and its transitive dependents along edges accepted by `keep`.
pub(crate) fn phrase_words<'a>(
    sentence: &'a Sentence,
    head: &'a str,
    keep: fn(&Relation) -> bool,
) -> Vec<&'a str> {
    let mut words = vec![head];
    let mut next = 0;
    while next < words.len() {
        let governor = words[next];
        for edge in sentence.dependents_of(governor) {
            if keep(&edge.relation) && !words.contains(&edge.dependent.as_str()) {
                words.push(&edge.dependent);
            }
        }
        next += 1;
    }
    words
}

/// Surface span of the phrase headed by `head`, with coreference resolved.
/// Falls back to the head alone when the tree has no node covering the
/// whole phrase.
pub(crate) fn phrase(sentence: &Sentence, head: &str, keep: fn(&Relation) -> bool) -> Option<String> {
    let words = phrase_words(sentence, head, keep);
    let span = sentence
        .tree
        .search(&words)
        .or_else(|| sentence.tree.search(&[head]))?;
    Some(resolve(sentence, span, head))
}

/// Replace a mention with its canonical form: the whole span when it is a
/// mention itself, otherwise every token of the span equal to the head.
/// Spans are tree leaves joined by single spaces.
pub(crate) fn resolve(sentence: &Sentence, span: String, head: &str) -> String {
    if let Some(canonical) = sentence.canonical(&span) {
        return canonical.to_string();
    }
    match sentence.canonical(head) {
        Some(canonical) => span
            .split(' ')
            .map(|word| if word == head { canonical } else { word })
            .collect::<Vec<_>>()
            .join(" "),
        None => span,
    }
}

/// Words standing for the action `lemma` in a sentence: tokens with that
/// lemma, and for a copula, the predicate it attaches to. The flag marks
/// copular predicates.
pub(crate) fn anchors<'a>(sentence: &'a Sentence, lemma: &str) -> Vec<(&'a str, bool)> {
    let mut found = Vec::new();
    for word in sentence.words_with_lemma(lemma) {
        found.push((word, false));
        for edge in &sentence.dependencies {
            if edge.relation == Relation::Copula && edge.dependent == word {
                found.push((edge.governor.as_str(), true));
            }
        }
    }
    found
}

/// Subject phrase of the first clause whose verb has lemma `action`, gated
/// on the tree holding subject and verb together. Nominal subjects always
/// count; a passive question tries passive subjects first.
pub(crate) fn subject_of(sentence: &Sentence, action: &str, passive: bool) -> Option<String> {
    let wanted: &[Relation] = if passive {
        &[Relation::PassiveSubject, Relation::Subject]
    } else {
        &[Relation::Subject]
    };
    wanted.iter().find_map(|relation| {
        sentence
            .dependencies
            .iter()
            .filter(|e| e.relation == *relation && lemma(sentence, &e.governor) == action)
            .find_map(|e| {
                sentence
                    .tree
                    .search(&[e.dependent.as_str(), e.governor.as_str()])?;
                phrase(sentence, &e.dependent, nominal)
            })
    })
}
