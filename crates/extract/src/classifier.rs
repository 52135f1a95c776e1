use anyhow::Result;
use regex::Regex;

use crate::category::Category;

/// Maps raw question text to a category; `None` when no rule applies.
pub trait QuestionClassifier: Send + Sync {
    fn classify(&self, question: &str) -> Option<Category>;
}

/// Ordered anchored patterns. The first match wins, so multi-word "how"
/// forms precede bare "how".
const RULES: &[(&str, Category)] = &[
    (r"^how\s+many\b", Category::HowMany),
    (r"^how\s+much\b", Category::HowMuch),
    (r"^how\s+long\b", Category::HowLong),
    (r"^how\s+far\b", Category::HowFar),
    (r"^how\b", Category::HowDo),
    (r"^(who|whom|whose)\b", Category::Who),
    (r"^where\b", Category::Where),
    (r"^when\b", Category::When),
    (r"^why\b", Category::Why),
    (r"^(what|which)\b", Category::What),
    (
        r"^(is|are|was|were|am|do|does|did|can|could|will|would|shall|should|has|have|had|may|might|must)\b",
        Category::YesNo,
    ),
];

/// Regex-table classifier. A question that opens with none of the patterns
/// is retried from its first wh-word, which catches forms like
/// "In which year ..." and "Tell me who ...".
pub struct RuleClassifier {
    rules: Vec<(Regex, Category)>,
    wh_word: Regex,
}

impl RuleClassifier {
    pub fn new() -> Result<Self> {
        let rules = RULES
            .iter()
            .map(|(pattern, category)| Ok((Regex::new(&format!("(?i){}", pattern))?, *category)))
            .collect::<Result<Vec<_>>>()?;
        let wh_word = Regex::new(r"(?i)\b(who|whom|whose|where|when|why|what|which|how)\b")?;

        Ok(Self { rules, wh_word })
    }

    fn match_start(&self, text: &str) -> Option<Category> {
        self.rules
            .iter()
            .find(|(re, _)| re.is_match(text))
            .map(|(_, category)| *category)
    }
}

impl QuestionClassifier for RuleClassifier {
    fn classify(&self, question: &str) -> Option<Category> {
        let text = question.trim_start_matches(|c: char| !c.is_alphanumeric());
        self.match_start(text).or_else(|| {
            let found = self.wh_word.find(text)?;
            self.match_start(&text[found.start()..])
        })
    }
}
