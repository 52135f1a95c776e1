use annotate::{EntityTable, Relation, Sentence};

use crate::strategy::{Extraction, is_wh, lemma, nominal, phrase, predicate, subject_of};

const WHAT: &[&str] = &["what", "which"];

/// "What is BM25?", "What did Alice publish?", "Which company bought it?".
pub struct What;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WhatPlan {
    /// Asks for a description of `subject`.
    Definition { subject: String },
    /// Asks for the object of `action`.
    Object { action: String },
    /// Asks for the subject of `action`.
    Subject { action: String, passive: bool },
}

impl Extraction for What {
    type Plan = WhatPlan;

    fn name(&self) -> &'static str {
        "what"
    }

    fn plan(&self, question: &Sentence, _entities: &EntityTable) -> Option<WhatPlan> {
        // the wh-word itself, or the noun it determines ("which company")
        let mut targets: Vec<&str> = question
            .words
            .iter()
            .map(String::as_str)
            .filter(|w| is_wh(w, WHAT))
            .collect();
        for edge in &question.dependencies {
            if let Relation::Other(label) = &edge.relation {
                if label.starts_with("det") && is_wh(&edge.dependent, WHAT) {
                    targets.push(&edge.governor);
                }
            }
        }
        let is_target = |word: &str| targets.contains(&word);
        let has_copula = |word: &str| {
            question
                .dependents_of(word)
                .any(|e| e.relation == Relation::Copula)
        };

        let mut definition = None;
        let mut object = None;
        let mut subject = None;
        for edge in &question.dependencies {
            let (governor, dependent) = (edge.governor.as_str(), edge.dependent.as_str());
            match &edge.relation {
                relation if relation.is_subject() => {
                    if is_target(governor) && has_copula(governor) {
                        definition = Some(dependent.to_string());
                    } else if is_target(dependent) && has_copula(governor) {
                        definition = Some(governor.to_string());
                    } else if is_target(dependent) {
                        let passive = *relation == Relation::PassiveSubject;
                        subject = Some((lemma(question, governor), passive));
                    }
                }
                Relation::Object if is_target(dependent) => {
                    object = Some(lemma(question, governor));
                }
                _ => {}
            }
        }

        definition
            .map(|subject| WhatPlan::Definition { subject })
            .or_else(|| object.map(|action| WhatPlan::Object { action }))
            .or_else(|| subject.map(|(action, passive)| WhatPlan::Subject { action, passive }))
    }

    fn attempt(&self, plan: &WhatPlan, candidate: &Sentence) -> Option<String> {
        match plan {
            WhatPlan::Definition { subject } => describe(candidate, subject),
            WhatPlan::Object { action } => object_of(candidate, action),
            WhatPlan::Subject { action, passive } => subject_of(candidate, action, *passive),
        }
    }
}

/// The predicate of a copular clause about `subject`, or its subject when
/// `subject` is the predicate.
fn describe(candidate: &Sentence, subject: &str) -> Option<String> {
    let copular = |word: &str| {
        candidate
            .dependents_of(word)
            .any(|e| e.relation == Relation::Copula)
    };

    candidate
        .dependencies
        .iter()
        .filter(|e| e.relation.is_subject())
        .find_map(|e| {
            if e.dependent == subject && copular(e.governor.as_str()) {
                candidate.tree.search(&[subject, e.governor.as_str()])?;
                phrase(candidate, &e.governor, predicate)
            } else if e.governor == subject && copular(subject) {
                candidate.tree.search(&[subject, e.dependent.as_str()])?;
                phrase(candidate, &e.dependent, nominal)
            } else {
                None
            }
        })
}

fn object_of(candidate: &Sentence, action: &str) -> Option<String> {
    candidate
        .dependencies
        .iter()
        .filter(|e| e.relation == Relation::Object && lemma(candidate, &e.governor) == action)
        .find_map(|e| {
            candidate
                .tree
                .search(&[e.governor.as_str(), e.dependent.as_str()])?;
            phrase(candidate, &e.dependent, nominal)
        })
}
