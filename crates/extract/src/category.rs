use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Question categories understood by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Who,
    Where,
    When,
    YesNo,
    HowMany,
    HowLong,
    HowDo,
    HowMuch,
    HowFar,
    Why,
    What,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Who,
        Category::Where,
        Category::When,
        Category::YesNo,
        Category::HowMany,
        Category::HowLong,
        Category::HowDo,
        Category::HowMuch,
        Category::HowFar,
        Category::Why,
        Category::What,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Who => "who",
            Category::Where => "where",
            Category::When => "when",
            Category::YesNo => "yesno",
            Category::HowMany => "howmany",
            Category::HowLong => "howlong",
            Category::HowDo => "howdo",
            Category::HowMuch => "howmuch",
            Category::HowFar => "howfar",
            Category::Why => "why",
            Category::What => "what",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| anyhow::anyhow!("Unknown question category: {}", s))
    }
}
