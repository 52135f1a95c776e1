use annotate::{EntityTable, Relation, Sentence};

use crate::strategy::{Extraction, is_wh, lemma, nominal, phrase, predicate, subject_of};

const WHO: &[&str] = &["who", "whom"];

/// "Who is the mayor?" and "Who published the results?".
pub struct Who;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WhoPlan {
    /// The question asks who holds a description: `name` is the described
    /// noun, `copula` the lemma of the linking verb.
    Definition { name: String, copula: String },
    /// The question asks who performed `action` (a verb lemma).
    Agent { action: String, passive: bool },
}

impl Extraction for Who {
    type Plan = WhoPlan;

    fn name(&self) -> &'static str {
        "who"
    }

    fn plan(&self, question: &Sentence, _entities: &EntityTable) -> Option<WhoPlan> {
        let mut name = None;
        let mut copula = None;
        let mut action = None;

        for edge in &question.dependencies {
            let governed_by_who = is_wh(&edge.governor, WHO);
            let is_who = is_wh(&edge.dependent, WHO);
            match &edge.relation {
                Relation::Copula if governed_by_who => {
                    copula = Some(lemma(question, &edge.dependent));
                }
                relation if relation.is_subject() && governed_by_who => {
                    name = Some(edge.dependent.clone());
                }
                relation if relation.is_subject() && is_who => {
                    let passive = *relation == Relation::PassiveSubject;
                    action = Some((lemma(question, &edge.governor), passive));
                }
                _ => {}
            }
        }

        match (name, copula, action) {
            (Some(name), Some(copula), _) => Some(WhoPlan::Definition { name, copula }),
            (_, _, Some((action, passive))) => Some(WhoPlan::Agent { action, passive }),
            _ => None,
        }
    }

    fn attempt(&self, plan: &WhoPlan, candidate: &Sentence) -> Option<String> {
        match plan {
            WhoPlan::Definition { name, copula } => definition(candidate, name, copula),
            WhoPlan::Agent { action, passive } => subject_of(candidate, action, *passive),
        }
    }
}

/// The candidate must link `name` and the copula in one constituent. The
/// answer is the other side of the copula: the subject when `name` is the
/// predicate, the predicate when `name` is the subject.
fn definition(candidate: &Sentence, name: &str, copula: &str) -> Option<String> {
    let linking = candidate.word_for_lemma(copula)?;
    let clause = candidate.tree.search(&[name, linking])?;

    let edges = candidate.dependencies.iter().filter(|e| e.relation.is_subject());
    for edge in edges {
        if edge.governor == name {
            return phrase(candidate, &edge.dependent, nominal).or(Some(clause));
        }
        if edge.dependent == name {
            return phrase(candidate, &edge.governor, predicate).or(Some(clause));
        }
    }
    Some(clause)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::annotated;

    fn mayor_question() -> Sentence {
        annotated(
            "Who is the mayor of Springfield?",
            "Who/WP/who is/VBZ/be the/DT/the mayor/NN/mayor of/IN/of Springfield/NNP/Springfield/CITY ?/./?",
            "(ROOT (SBARQ (WHNP (WP Who)) (SQ (VBZ is) (NP (NP (DT the) (NN mayor)) (PP (IN of) (NP (NNP Springfield))))) (. ?)))",
            &[
                ("nsubj", "Who", "mayor"),
                ("cop", "Who", "is"),
                ("det", "mayor", "the"),
                ("nmod", "mayor", "Springfield"),
                ("case", "Springfield", "of"),
                ("punct", "Who", "?"),
            ],
        )
    }

    fn mayor_statement() -> Sentence {
        annotated(
            "John Smith is the mayor of Springfield.",
            "John/NNP/John/PERSON Smith/NNP/Smith/PERSON is/VBZ/be the/DT/the mayor/NN/mayor \
             of/IN/of Springfield/NNP/Springfield/CITY ././.",
            "(ROOT (S (NP (NNP John) (NNP Smith)) (VP (VBZ is) (NP (NP (DT the) (NN mayor)) \
             (PP (IN of) (NP (NNP Springfield))))) (. .)))",
            &[
                ("nsubj", "mayor", "Smith"),
                ("compound", "Smith", "John"),
                ("cop", "mayor", "is"),
                ("det", "mayor", "the"),
                ("nmod", "mayor", "Springfield"),
                ("case", "Springfield", "of"),
                ("punct", "mayor", "."),
            ],
        )
    }

    #[test]
    fn test_copular_question_plans_definition() {
        let plan = Who.plan(&mayor_question(), &EntityTable::new()).unwrap();
        assert_eq!(
            plan,
            WhoPlan::Definition {
                name: "mayor".into(),
                copula: "be".into()
            }
        );
    }

    #[test]
    fn test_definition_returns_subject_phrase() {
        let plan = Who.plan(&mayor_question(), &EntityTable::new()).unwrap();
        assert_eq!(Who.attempt(&plan, &mayor_statement()).unwrap(), "John Smith");
    }

    #[test]
    fn test_definition_with_name_as_subject() {
        let inverted = annotated(
            "The mayor is John Smith.",
            "The/DT/the mayor/NN/mayor is/VBZ/be John/NNP/John Smith/NNP/Smith ././.",
            "(ROOT (S (NP (DT The) (NN mayor)) (VP (VBZ is) (NP (NNP John) (NNP Smith))) (. .)))",
            &[
                ("nsubj", "Smith", "mayor"),
                ("det", "mayor", "The"),
                ("cop", "Smith", "is"),
                ("compound", "Smith", "John"),
                ("punct", "Smith", "."),
            ],
        );
        let plan = Who.plan(&mayor_question(), &EntityTable::new()).unwrap();
        assert_eq!(Who.attempt(&plan, &inverted).unwrap(), "John Smith");
    }

    #[test]
    fn test_agent_question_and_coref() {
        let question = annotated(
            "Who published the results?",
            "Who/WP/who published/VBD/publish the/DT/the results/NNS/result ?/./?",
            "(ROOT (SBARQ (WHNP (WP Who)) (SQ (VP (VBD published) (NP (DT the) (NNS results)))) (. ?)))",
            &[
                ("nsubj", "published", "Who"),
                ("obj", "published", "results"),
                ("det", "results", "the"),
                ("punct", "published", "?"),
            ],
        );
        let plan = Who.plan(&question, &EntityTable::new()).unwrap();
        assert_eq!(
            plan,
            WhoPlan::Agent {
                action: "publish".into(),
                passive: false
            }
        );

        let candidate = annotated(
            "She published the results.",
            "She/PRP/she published/VBD/publish the/DT/the results/NNS/result ././.",
            "(ROOT (S (NP (PRP She)) (VP (VBD published) (NP (DT the) (NNS results))) (. .)))",
            &[
                ("nsubj", "published", "She"),
                ("obj", "published", "results"),
                ("det", "results", "the"),
                ("punct", "published", "."),
            ],
        );
        assert_eq!(Who.attempt(&plan, &candidate).unwrap(), "She");

        let mut resolved = candidate;
        resolved.corefs.insert("She".into(), "Alice".into());
        assert_eq!(Who.attempt(&plan, &resolved).unwrap(), "Alice");
    }

    #[test]
    fn test_passive_question_matches_active_candidate() {
        let question = annotated(
            "Who was elected?",
            "Who/WP/who was/VBD/be elected/VBN/elect ?/./?",
            "(ROOT (SBARQ (WHNP (WP Who)) (SQ (VP (VBD was) (VP (VBN elected)))) (. ?)))",
            &[
                ("nsubj:pass", "elected", "Who"),
                ("aux:pass", "elected", "was"),
                ("punct", "elected", "?"),
            ],
        );
        let plan = Who.plan(&question, &EntityTable::new()).unwrap();
        assert_eq!(
            plan,
            WhoPlan::Agent {
                action: "elect".into(),
                passive: true
            }
        );

        let candidate = annotated(
            "Voters elected Smith.",
            "Voters/NNS/voter elected/VBD/elect Smith/NNP/Smith ././.",
            "(ROOT (S (NP (NNS Voters)) (VP (VBD elected) (NP (NNP Smith))) (. .)))",
            &[
                ("nsubj", "elected", "Voters"),
                ("obj", "elected", "Smith"),
                ("punct", "elected", "."),
            ],
        );
        assert_eq!(Who.attempt(&plan, &candidate).unwrap(), "Voters");
    }

    #[test]
    fn test_agent_with_other_verb_fails() {
        let plan = WhoPlan::Agent {
            action: "found".into(),
            passive: false,
        };
        assert!(Who.attempt(&plan, &mayor_statement()).is_none());
    }

    #[test]
    fn test_question_without_subject_has_no_plan() {
        let question = annotated(
            "Who?",
            "Who/WP/who ?/./?",
            "(ROOT (SBARQ (WHNP (WP Who)) (. ?)))",
            &[("punct", "Who", "?")],
        );
        assert!(Who.plan(&question, &EntityTable::new()).is_none());
    }
}
