use annotate::{EntityTable, Relation, Sentence};

use crate::strategy::{Extraction, anchors, is_wh, lemma, nominal, phrase, predicate};

const PLACES: &[&str] = &["LOCATION", "CITY", "COUNTRY", "STATE_OR_PROVINCE", "GPE", "LOC"];
const TIMES: &[&str] = &["DATE", "TIME"];

const LOCATIVE: &[&str] = &[
    "in", "at", "on", "near", "inside", "outside", "under", "above", "across", "along", "beside",
    "behind", "within", "throughout",
];
const TEMPORAL: &[&str] = &["when", "after", "before", "while", "until", "since", "once"];
const CAUSAL_CLAUSE: &[&str] = &["because", "since", "as", "so"];
const CAUSAL_CASE: &[&str] = &["because", "due", "owing"];
const INSTRUMENTAL: &[&str] = &["by", "through", "via", "using", "with"];

/// Questions answered by an adverbial of the asked-about clause: where,
/// when, why and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjunct {
    Place,
    Time,
    Reason,
    Manner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjunctPlan {
    /// Lemma of the verb the wh-word modifies.
    pub action: String,
}

impl Adjunct {
    fn wh_word(self) -> &'static str {
        match self {
            Adjunct::Place => "where",
            Adjunct::Time => "when",
            Adjunct::Reason => "why",
            Adjunct::Manner => "how",
        }
    }

    fn qualifies(self, sentence: &Sentence, relation: &Relation, head: &str) -> bool {
        let category = sentence.entity_category(head);
        let in_category = |set: &[&str]| category.is_some_and(|c| set.contains(&c));
        let marker = marker_of(sentence, head);
        let marked = |set: &[&str]| marker.as_deref().is_some_and(|m| set.contains(&m));

        match (self, relation) {
            (Adjunct::Place, Relation::Oblique | Relation::AdverbialModifier) => {
                !in_category(TIMES) && (in_category(PLACES) || marked(LOCATIVE))
            }
            (Adjunct::Time, Relation::Temporal) => true,
            (Adjunct::Time, Relation::Oblique | Relation::AdverbialModifier) => in_category(TIMES),
            (Adjunct::Time, Relation::AdverbialClause) => marked(TEMPORAL),
            (Adjunct::Reason, Relation::AdverbialClause) => marked(CAUSAL_CLAUSE),
            (Adjunct::Reason, Relation::Oblique) => marked(CAUSAL_CASE),
            (Adjunct::Manner, Relation::AdverbialClause | Relation::Oblique) => marked(INSTRUMENTAL),
            (Adjunct::Manner, Relation::AdverbialModifier) => {
                sentence.pos_of(head).is_some_and(|p| p.starts_with("RB"))
                    && head.to_lowercase().ends_with("ly")
            }
            _ => false,
        }
    }
}

/// Lower-cased preposition or subordinator attached to `head`.
fn marker_of(sentence: &Sentence, head: &str) -> Option<String> {
    sentence
        .dependents_of(head)
        .find(|e| matches!(e.relation, Relation::Case | Relation::Marker))
        .map(|e| e.dependent.to_lowercase())
}

impl Extraction for Adjunct {
    type Plan = AdjunctPlan;

    fn name(&self) -> &'static str {
        self.wh_word()
    }

    fn plan(&self, question: &Sentence, _entities: &EntityTable) -> Option<AdjunctPlan> {
        let wh = [self.wh_word()];
        let modified = question.dependencies.iter().find(|e| {
            is_wh(&e.dependent, &wh)
                && !matches!(e.relation, Relation::Punctuation | Relation::Copula)
        });
        if let Some(edge) = modified {
            return Some(AdjunctPlan {
                action: lemma(question, &edge.governor),
            });
        }

        // "Where is the tower?": the wh-word heads a copular clause
        question
            .dependencies
            .iter()
            .find(|e| e.relation == Relation::Copula && is_wh(&e.governor, &wh))
            .map(|e| AdjunctPlan {
                action: lemma(question, &e.dependent),
            })
    }

    fn attempt(&self, plan: &AdjunctPlan, candidate: &Sentence) -> Option<String> {
        for (anchor, is_predicate) in anchors(candidate, &plan.action) {
            if is_predicate && self.qualifies(candidate, &Relation::Oblique, anchor) {
                return phrase(candidate, anchor, predicate);
            }
            let adjunct = candidate
                .dependents_of(anchor)
                .find(|e| self.qualifies(candidate, &e.relation, &e.dependent));
            if let Some(edge) = adjunct {
                return phrase(candidate, &edge.dependent, nominal);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::annotated;

    fn plan(kind: Adjunct, question: &Sentence) -> AdjunctPlan {
        kind.plan(question, &EntityTable::new()).unwrap()
    }

    #[test]
    fn test_where_finds_locative() {
        let question = annotated(
            "Where does the falcon nest?",
            "Where/WRB/where does/VBZ/do the/DT/the falcon/NN/falcon nest/VB/nest ?/./?",
            "(ROOT (SBARQ (WHADVP (WRB Where)) (SQ (VBZ does) (NP (DT the) (NN falcon)) (VP (VB nest))) (. ?)))",
            &[
                ("advmod", "nest", "Where"),
                ("aux", "nest", "does"),
                ("nsubj", "nest", "falcon"),
                ("det", "falcon", "the"),
                ("punct", "nest", "?"),
            ],
        );
        let plan = plan(Adjunct::Place, &question);
        assert_eq!(plan.action, "nest");

        let candidate = annotated(
            "It nests on cliffs.",
            "It/PRP/it nests/VBZ/nest on/IN/on cliffs/NNS/cliff ././.",
            "(ROOT (S (NP (PRP It)) (VP (VBZ nests) (PP (IN on) (NP (NNS cliffs)))) (. .)))",
            &[
                ("nsubj", "nests", "It"),
                ("obl", "nests", "cliffs"),
                ("case", "cliffs", "on"),
                ("punct", "nests", "."),
            ],
        );
        assert_eq!(Adjunct::Place.attempt(&plan, &candidate).unwrap(), "on cliffs");
        assert!(Adjunct::Time.attempt(&plan, &candidate).is_none());
    }

    #[test]
    fn test_where_on_copular_clause() {
        let question = annotated(
            "Where is the tower?",
            "Where/WRB/where is/VBZ/be the/DT/the tower/NN/tower ?/./?",
            "(ROOT (SBARQ (WHADVP (WRB Where)) (SQ (VBZ is) (NP (DT the) (NN tower))) (. ?)))",
            &[
                ("cop", "Where", "is"),
                ("nsubj", "Where", "tower"),
                ("det", "tower", "the"),
                ("punct", "Where", "?"),
            ],
        );
        let plan = plan(Adjunct::Place, &question);
        assert_eq!(plan.action, "be");

        let candidate = annotated(
            "The tower is in Paris.",
            "The/DT/the tower/NN/tower is/VBZ/be in/IN/in Paris/NNP/Paris/CITY ././.",
            "(ROOT (S (NP (DT The) (NN tower)) (VP (VBZ is) (PP (IN in) (NP (NNP Paris)))) (. .)))",
            &[
                ("nsubj", "Paris", "tower"),
                ("det", "tower", "The"),
                ("cop", "Paris", "is"),
                ("case", "Paris", "in"),
                ("punct", "Paris", "."),
            ],
        );
        assert_eq!(Adjunct::Place.attempt(&plan, &candidate).unwrap(), "in Paris");
    }

    fn war_ended() -> Sentence {
        annotated(
            "The war ended in 1945 after the treaty.",
            "The/DT/the war/NN/war ended/VBD/end in/IN/in 1945/CD/1945/DATE after/IN/after \
             the/DT/the treaty/NN/treaty ././.",
            "(ROOT (S (NP (DT The) (NN war)) (VP (VBD ended) (PP (IN in) (NP (CD 1945))) \
             (PP (IN after) (NP (DT the) (NN treaty)))) (. .)))",
            &[
                ("nsubj", "ended", "war"),
                ("det", "war", "The"),
                ("obl", "ended", "1945"),
                ("case", "1945", "in"),
                ("obl", "ended", "treaty"),
                ("case", "treaty", "after"),
                ("det", "treaty", "the"),
                ("punct", "ended", "."),
            ],
        )
    }

    #[test]
    fn test_when_prefers_dated_oblique() {
        let question = annotated(
            "When did the war end?",
            "When/WRB/when did/VBD/do the/DT/the war/NN/war end/VB/end ?/./?",
            "(ROOT (SBARQ (WHADVP (WRB When)) (SQ (VBD did) (NP (DT the) (NN war)) (VP (VB end))) (. ?)))",
            &[
                ("advmod", "end", "When"),
                ("aux", "end", "did"),
                ("nsubj", "end", "war"),
                ("det", "war", "the"),
                ("punct", "end", "?"),
            ],
        );
        let plan = plan(Adjunct::Time, &question);
        assert_eq!(Adjunct::Time.attempt(&plan, &war_ended()).unwrap(), "in 1945");
        // "in 1945" is a date, not a place
        assert!(Adjunct::Place.attempt(&plan, &war_ended()).is_none());
    }

    #[test]
    fn test_why_finds_causal_clause() {
        let plan = AdjunctPlan {
            action: "close".into(),
        };
        let candidate = annotated(
            "The bridge closed because the river flooded.",
            "The/DT/the bridge/NN/bridge closed/VBD/close because/IN/because the/DT/the \
             river/NN/river flooded/VBD/flood ././.",
            "(ROOT (S (NP (DT The) (NN bridge)) (VP (VBD closed) (SBAR (IN because) \
             (S (NP (DT the) (NN river)) (VP (VBD flooded))))) (. .)))",
            &[
                ("nsubj", "closed", "bridge"),
                ("det", "bridge", "The"),
                ("advcl", "closed", "flooded"),
                ("mark", "flooded", "because"),
                ("nsubj", "flooded", "river"),
                ("det", "river", "the"),
                ("punct", "closed", "."),
            ],
        );
        assert_eq!(
            Adjunct::Reason.attempt(&plan, &candidate).unwrap(),
            "because the river flooded"
        );
    }

    #[test]
    fn test_how_finds_manner_adverb() {
        let question = annotated(
            "How does the engine start?",
            "How/WRB/how does/VBZ/do the/DT/the engine/NN/engine start/VB/start ?/./?",
            "(ROOT (SBARQ (WHADVP (WRB How)) (SQ (VBZ does) (NP (DT the) (NN engine)) (VP (VB start))) (. ?)))",
            &[
                ("advmod", "start", "How"),
                ("aux", "start", "does"),
                ("nsubj", "start", "engine"),
                ("det", "engine", "the"),
                ("punct", "start", "?"),
            ],
        );
        let plan = plan(Adjunct::Manner, &question);
        let candidate = annotated(
            "The engine starts quickly.",
            "The/DT/the engine/NN/engine starts/VBZ/start quickly/RB/quickly ././.",
            "(ROOT (S (NP (DT The) (NN engine)) (VP (VBZ starts) (ADVP (RB quickly))) (. .)))",
            &[
                ("nsubj", "starts", "engine"),
                ("det", "engine", "The"),
                ("advmod", "starts", "quickly"),
                ("punct", "starts", "."),
            ],
        );
        assert_eq!(Adjunct::Manner.attempt(&plan, &candidate).unwrap(), "quickly");
    }

    #[test]
    fn test_question_without_wh_dependency() {
        let question = annotated(
            "Where?",
            "Where/WRB/where ?/./?",
            "(ROOT (FRAG (WHADVP (WRB Where)) (. ?)))",
            &[("punct", "Where", "?")],
        );
        assert!(Adjunct::Place.plan(&question, &EntityTable::new()).is_none());
    }
}
