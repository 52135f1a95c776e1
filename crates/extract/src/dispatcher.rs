use anyhow::Result;
use query::Finder;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info};

use crate::adjunct::Adjunct;
use crate::category::Category;
use crate::classifier::{QuestionClassifier, RuleClassifier};
use crate::quantity::Quantity;
use crate::strategy::AnswerStrategy;
use crate::what::What;
use crate::who::Who;
use crate::yesno::YesNo;

pub const FAILED_TO_PARSE: &str = "Failed to parse.";
pub const NO_HOME: &str = "Did not find that question a home.";

/// Result of answering one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Answer(String),
    /// No category matched the question text.
    Unclassified,
    /// Classified, but no candidate sentence produced an answer.
    Unanswered,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Answer(answer) => f.write_str(answer),
            Outcome::Unclassified => f.write_str(FAILED_TO_PARSE),
            Outcome::Unanswered => f.write_str(NO_HOME),
        }
    }
}

/// Routes each question to the strategy for its category.
pub struct Dispatcher {
    classifier: Box<dyn QuestionClassifier>,
    strategies: HashMap<Category, Box<dyn AnswerStrategy>>,
}

impl Dispatcher {
    pub fn new(classifier: Box<dyn QuestionClassifier>) -> Self {
        let mut strategies: HashMap<Category, Box<dyn AnswerStrategy>> = HashMap::new();
        strategies.insert(Category::Who, Box::new(Who));
        strategies.insert(Category::What, Box::new(What));
        strategies.insert(Category::Where, Box::new(Adjunct::Place));
        strategies.insert(Category::When, Box::new(Adjunct::Time));
        strategies.insert(Category::Why, Box::new(Adjunct::Reason));
        strategies.insert(Category::HowDo, Box::new(Adjunct::Manner));
        strategies.insert(Category::HowMany, Box::new(Quantity::Many));
        strategies.insert(Category::HowMuch, Box::new(Quantity::Much));
        strategies.insert(Category::HowLong, Box::new(Quantity::Long));
        strategies.insert(Category::HowFar, Box::new(Quantity::Far));
        strategies.insert(Category::YesNo, Box::new(YesNo));

        Self {
            classifier,
            strategies,
        }
    }

    /// Dispatcher over the built-in regex classifier.
    pub fn standard() -> Result<Self> {
        Ok(Self::new(Box::new(RuleClassifier::new()?)))
    }

    pub fn classify(&self, question: &str) -> Option<Category> {
        self.classifier.classify(question)
    }

    pub async fn answer(&self, question: &str, finder: &mut Finder) -> Outcome {
        let Some(category) = self.classify(question) else {
            info!(question, "Question matched no category");
            return Outcome::Unclassified;
        };
        debug!(question, %category, "Classified question");
        self.answer_as(category, question, finder).await
    }

    /// Answer `question` with the strategy for `category`, skipping
    /// classification.
    pub async fn answer_as(&self, category: Category, question: &str, finder: &mut Finder) -> Outcome {
        let Some(strategy) = self.strategies.get(&category) else {
            return Outcome::Unanswered;
        };
        match strategy.extract(question, finder).await {
            Some(answer) if !answer.trim().is_empty() => Outcome::Answer(answer),
            _ => Outcome::Unanswered,
        }
    }
}
