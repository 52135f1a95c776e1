pub mod adjunct;
pub mod category;
pub mod classifier;
pub mod dispatcher;
pub mod quantity;
pub mod strategy;
pub mod what;
pub mod who;
pub mod yesno;

#[cfg(test)]
mod testing;

pub use adjunct::Adjunct;
pub use category::Category;
pub use classifier::{QuestionClassifier, RuleClassifier};
pub use dispatcher::{Dispatcher, FAILED_TO_PARSE, NO_HOME, Outcome};
pub use quantity::Quantity;
pub use strategy::{AnswerStrategy, Extraction};
pub use what::What;
pub use who::Who;
pub use yesno::YesNo;
