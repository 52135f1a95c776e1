use std::collections::HashMap;

use crate::schema::Sentence;

/// Tag used by taggers for tokens outside any entity.
pub const OUTSIDE: &str = "O";

/// Fold per-token entity tags into `(category, mention)` pairs: consecutive
/// tokens with the same tag form one mention.
pub fn group_mentions<'a>(tagged: impl IntoIterator<Item = (&'a str, &'a str)>) -> Vec<(String, String)> {
    let mut mentions: Vec<(String, String)> = Vec::new();
    let mut current: Option<(&str, Vec<&str>)> = None;

    for (word, tag) in tagged {
        match current.as_mut() {
            Some((open_tag, words)) if *open_tag == tag => {
                words.push(word);
                continue;
            }
            _ => {}
        }
        if let Some((open_tag, words)) = current.take() {
            mentions.push((open_tag.to_string(), words.join(" ")));
        }
        if tag != OUTSIDE && !tag.is_empty() {
            current = Some((tag, vec![word]));
        }
    }
    if let Some((open_tag, words)) = current {
        mentions.push((open_tag.to_string(), words.join(" ")));
    }

    mentions
}

/// Document-wide entity counts: category -> entity string -> occurrences.
#[derive(Debug, Clone, Default)]
pub struct EntityTable {
    entities: HashMap<String, HashMap<String, usize>>,
}

impl EntityTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, category: &str, entity: &str) {
        *self
            .entities
            .entry(category.to_string())
            .or_default()
            .entry(entity.to_string())
            .or_insert(0) += 1;
    }

    pub fn record_sentence(&mut self, sentence: &Sentence) {
        for (category, mentions) in &sentence.entities {
            for mention in mentions {
                self.record(category, mention);
            }
        }
    }

    pub fn count(&self, category: &str, entity: &str) -> usize {
        self.entities
            .get(category)
            .and_then(|counts| counts.get(entity))
            .copied()
            .unwrap_or(0)
    }

    /// Whether `entity` occurs under any category.
    pub fn contains(&self, entity: &str) -> bool {
        self.entities.values().any(|counts| counts.contains_key(entity))
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }
}
