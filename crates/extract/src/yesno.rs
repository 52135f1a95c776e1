use annotate::{EntityTable, Relation, Sentence};
use std::collections::HashSet;

use crate::strategy::Extraction;

const LIGHT_VERBS: &[&str] = &["be", "do", "have"];

/// Polar questions, answered "Yes" or "No".
pub struct YesNo;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YesNoPlan {
    /// Lower-cased lemmas a supporting sentence must contain.
    pub content: Vec<String>,
    pub negated: bool,
    /// A named entity of the question never occurs in the document.
    pub unknown_entity: bool,
}

fn is_content(pos: &str) -> bool {
    ["NN", "VB", "JJ", "CD"].iter().any(|tag| pos.starts_with(tag))
}

impl Extraction for YesNo {
    type Plan = YesNoPlan;

    fn name(&self) -> &'static str {
        "yesno"
    }

    fn plan(&self, question: &Sentence, entities: &EntityTable) -> Option<YesNoPlan> {
        let skeleton: HashSet<&str> = question
            .dependencies
            .iter()
            .filter(|e| matches!(e.relation, Relation::Auxiliary | Relation::Copula))
            .map(|e| e.dependent.as_str())
            .collect();

        let mut content: Vec<String> = Vec::new();
        let tokens = question.words.iter().zip(&question.pos).zip(&question.lemmas);
        for ((word, pos), lemma) in tokens {
            let lemma = lemma.to_lowercase();
            if is_content(pos)
                && !skeleton.contains(word.as_str())
                && !LIGHT_VERBS.contains(&lemma.as_str())
                && !content.contains(&lemma)
            {
                content.push(lemma);
            }
        }
        if content.is_empty() {
            return None;
        }

        let unknown_entity = !entities.is_empty()
            && question
                .entities
                .values()
                .flatten()
                .any(|mention| !entities.contains(mention));

        Some(YesNoPlan {
            content,
            negated: question.has_negation(),
            unknown_entity,
        })
    }

    fn settled(&self, plan: &YesNoPlan) -> Option<String> {
        plan.unknown_entity.then(|| "No".to_string())
    }

    fn attempt(&self, plan: &YesNoPlan, candidate: &Sentence) -> Option<String> {
        let lemmas: HashSet<String> = candidate.lemmas.iter().map(|l| l.to_lowercase()).collect();
        if !plan.content.iter().all(|l| lemmas.contains(l)) {
            return None;
        }
        let answer = if candidate.has_negation() == plan.negated {
            "Yes"
        } else {
            "No"
        };
        Some(answer.to_string())
    }
}
