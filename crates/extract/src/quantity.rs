use annotate::{EntityTable, Relation, Sentence};

use crate::strategy::{Extraction, anchors, lemma, phrase, predicate};

/// "How many", "how much", "how long" and "how far" questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Many,
    Much,
    Long,
    Far,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuantityPlan {
    /// "How many apples": a count of the noun with this lemma.
    Counted { noun: String },
    /// "How long did it last": a measure attached to the verb `action`.
    Measured { action: String },
}

impl Quantity {
    fn word(self) -> &'static str {
        match self {
            Quantity::Many => "many",
            Quantity::Much => "much",
            Quantity::Long => "long",
            Quantity::Far => "far",
        }
    }

    fn categories(self) -> &'static [&'static str] {
        match self {
            Quantity::Many => &["NUMBER"],
            Quantity::Much => &["MONEY", "PERCENT", "NUMBER"],
            Quantity::Long => &["DURATION", "TIME", "DATE", "NUMBER"],
            Quantity::Far => &["NUMBER"],
        }
    }

    /// Heads a measure: carries a number, is one, or is tagged with one of
    /// the variant's entity categories.
    fn measures(self, sentence: &Sentence, head: &str) -> bool {
        sentence
            .dependents_of(head)
            .any(|e| e.relation == Relation::NumericModifier)
            || sentence.pos_of(head) == Some("CD")
            || sentence
                .entity_category(head)
                .is_some_and(|c| self.categories().contains(&c))
    }
}

impl Extraction for Quantity {
    type Plan = QuantityPlan;

    fn name(&self) -> &'static str {
        self.word()
    }

    fn plan(&self, question: &Sentence, _entities: &EntityTable) -> Option<QuantityPlan> {
        let word = question
            .words
            .iter()
            .find(|w| w.eq_ignore_ascii_case(self.word()))?;

        let governing = question.dependencies.iter().find(|e| {
            &e.dependent == word && !matches!(e.relation, Relation::Punctuation)
        });
        if let Some(edge) = governing {
            let pos = question.pos_of(&edge.governor).unwrap_or_default();
            let head = lemma(question, &edge.governor);
            if pos.starts_with("NN") {
                return Some(QuantityPlan::Counted { noun: head });
            }
            return Some(QuantityPlan::Measured { action: head });
        }

        // "How long is the river?": the quantity word heads a copular clause
        question
            .dependents_of(word)
            .find(|e| e.relation == Relation::Copula)
            .map(|e| QuantityPlan::Measured {
                action: lemma(question, &e.dependent),
            })
    }

    fn attempt(&self, plan: &QuantityPlan, candidate: &Sentence) -> Option<String> {
        match plan {
            QuantityPlan::Counted { noun } => count_of(candidate, noun),
            QuantityPlan::Measured { action } => {
                for (anchor, is_predicate) in anchors(candidate, action) {
                    if is_predicate && self.measures(candidate, anchor) {
                        return phrase(candidate, anchor, predicate);
                    }
                    let measure = candidate.dependents_of(anchor).find(|e| {
                        !matches!(
                            e.relation,
                            Relation::Subject | Relation::PassiveSubject | Relation::Punctuation
                        ) && self.measures(candidate, &e.dependent)
                    });
                    if let Some(edge) = measure {
                        return phrase(candidate, &edge.dependent, predicate);
                    }
                }
                None
            }
        }
    }
}

fn count_of(candidate: &Sentence, noun: &str) -> Option<String> {
    candidate
        .dependencies
        .iter()
        .filter(|e| e.relation == Relation::NumericModifier && lemma(candidate, &e.governor) == noun)
        .find_map(|e| {
            candidate
                .tree
                .search(&[e.dependent.as_str(), e.governor.as_str()])
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::annotated;

    fn plan(kind: Quantity, question: &Sentence) -> QuantityPlan {
        kind.plan(question, &EntityTable::new()).unwrap()
    }

    #[test]
    fn test_how_many_counts_noun() {
        let question = annotated(
            "How many apples fell?",
            "How/WRB/how many/JJ/many apples/NNS/apple fell/VBD/fall ?/./?",
            "(ROOT (SBARQ (WHNP (WHADJP (WRB How) (JJ many)) (NNS apples)) (SQ (VP (VBD fell))) (. ?)))",
            &[
                ("advmod", "many", "How"),
                ("amod", "apples", "many"),
                ("nsubj", "fell", "apples"),
                ("punct", "fell", "?"),
            ],
        );
        let plan = plan(Quantity::Many, &question);
        assert_eq!(
            plan,
            QuantityPlan::Counted {
                noun: "apple".into()
            }
        );

        let candidate = annotated(
            "Three apples fell from the tree.",
            "Three/CD/three/NUMBER apples/NNS/apple fell/VBD/fall from/IN/from the/DT/the tree/NN/tree ././.",
            "(ROOT (S (NP (CD Three) (NNS apples)) (VP (VBD fell) (PP (IN from) (NP (DT the) (NN tree)))) (. .)))",
            &[
                ("nummod", "apples", "Three"),
                ("nsubj", "fell", "apples"),
                ("obl", "fell", "tree"),
                ("case", "tree", "from"),
                ("det", "tree", "the"),
                ("punct", "fell", "."),
            ],
        );
        assert_eq!(Quantity::Many.attempt(&plan, &candidate).unwrap(), "Three apples");
    }

    #[test]
    fn test_how_long_measures_verb() {
        let question = annotated(
            "How long did the war last?",
            "How/WRB/how long/RB/long did/VBD/do the/DT/the war/NN/war last/VB/last ?/./?",
            "(ROOT (SBARQ (WHADVP (WRB How) (RB long)) (SQ (VBD did) (NP (DT the) (NN war)) (VP (VB last))) (. ?)))",
            &[
                ("advmod", "long", "How"),
                ("advmod", "last", "long"),
                ("aux", "last", "did"),
                ("nsubj", "last", "war"),
                ("det", "war", "the"),
                ("punct", "last", "?"),
            ],
        );
        let plan = plan(Quantity::Long, &question);
        assert_eq!(
            plan,
            QuantityPlan::Measured {
                action: "last".into()
            }
        );

        let candidate = annotated(
            "The war lasted five years.",
            "The/DT/the war/NN/war lasted/VBD/last five/CD/five/DURATION years/NNS/year/DURATION ././.",
            "(ROOT (S (NP (DT The) (NN war)) (VP (VBD lasted) (NP (CD five) (NNS years))) (. .)))",
            &[
                ("nsubj", "lasted", "war"),
                ("det", "war", "The"),
                ("obl:tmod", "lasted", "years"),
                ("nummod", "years", "five"),
                ("punct", "lasted", "."),
            ],
        );
        assert_eq!(Quantity::Long.attempt(&plan, &candidate).unwrap(), "five years");
    }

    #[test]
    fn test_how_far_on_copular_clause() {
        let question = annotated(
            "How far is the lake?",
            "How/WRB/how far/RB/far is/VBZ/be the/DT/the lake/NN/lake ?/./?",
            "(ROOT (SBARQ (WHADVP (WRB How) (RB far)) (SQ (VBZ is) (NP (DT the) (NN lake))) (. ?)))",
            &[
                ("advmod", "far", "How"),
                ("cop", "far", "is"),
                ("nsubj", "far", "lake"),
                ("det", "lake", "the"),
                ("punct", "far", "?"),
            ],
        );
        let plan = plan(Quantity::Far, &question);
        assert_eq!(
            plan,
            QuantityPlan::Measured {
                action: "be".into()
            }
        );

        let candidate = annotated(
            "The lake is ten miles away.",
            "The/DT/the lake/NN/lake is/VBZ/be ten/CD/ten/NUMBER miles/NNS/mile away/RB/away ././.",
            "(ROOT (S (NP (DT The) (NN lake)) (VP (VBZ is) (ADVP (NP (CD ten) (NNS miles)) (RB away))) (. .)))",
            &[
                ("nsubj", "away", "lake"),
                ("det", "lake", "The"),
                ("cop", "away", "is"),
                ("obl:npmod", "away", "miles"),
                ("nummod", "miles", "ten"),
                ("punct", "away", "."),
            ],
        );
        assert_eq!(Quantity::Far.attempt(&plan, &candidate).unwrap(), "ten miles");
    }

    #[test]
    fn test_candidate_without_number() {
        let plan = QuantityPlan::Counted {
            noun: "apple".into(),
        };
        let candidate = annotated(
            "Apples fell.",
            "Apples/NNS/apple fell/VBD/fall ././.",
            "(ROOT (S (NP (NNS Apples)) (VP (VBD fell)) (. .)))",
            &[("nsubj", "fell", "Apples"), ("punct", "fell", ".")],
        );
        assert!(Quantity::Many.attempt(&plan, &candidate).is_none());
    }
}
