//! Constituency parse trees and the smallest-containing-subtree search used to
//! turn a handful of known words into an answer span.

use anyhow::Result;
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

static TREE_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(|\)|[^\s()]+").expect("valid regex"));

/// A node of a constituency parse. Leaves carry the word in `label` and have
/// no children; every other node carries a phrase or POS label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseTree {
    pub label: String,
    pub children: Vec<ParseTree>,
}

impl ParseTree {
    pub fn node(label: impl Into<String>, children: Vec<ParseTree>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    pub fn leaf(word: impl Into<String>) -> Self {
        Self {
            label: word.into(),
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Words under this node, left to right.
    pub fn leaves(&self) -> Vec<&str> {
        let mut words = Vec::new();
        self.collect_leaves(&mut words);
        words
    }

    fn collect_leaves<'a>(&'a self, words: &mut Vec<&'a str>) {
        if self.is_leaf() {
            words.push(&self.label);
            return;
        }
        for child in &self.children {
            child.collect_leaves(words);
        }
    }

    /// Leaves joined by single spaces.
    pub fn text(&self) -> String {
        self.leaves().join(" ")
    }

    /// Smallest subtree whose leaves contain every target word.
    ///
    /// Children are searched before their parent, left to right, so the first
    /// hit is the deepest qualifying node. Presence is all that counts: order
    /// and repeated targets are ignored. Bare leaves never qualify, and an
    /// empty target set matches nothing.
    pub fn find_smallest<S: AsRef<str>>(&self, targets: &[S]) -> Option<&ParseTree> {
        if self.is_leaf() || targets.is_empty() {
            return None;
        }

        if let Some(found) = self.children.iter().find_map(|c| c.find_smallest(targets)) {
            return Some(found);
        }

        let leaves = self.leaves();
        targets
            .iter()
            .all(|t| leaves.contains(&t.as_ref()))
            .then_some(self)
    }

    /// Span of [`find_smallest`](Self::find_smallest), rendered as text.
    pub fn search<S: AsRef<str>>(&self, targets: &[S]) -> Option<String> {
        self.find_smallest(targets).map(ParseTree::text)
    }
}

impl FromStr for ParseTree {
    type Err = anyhow::Error;

    /// Parse bracketed Penn Treebank notation, e.g. `(ROOT (S (NP (PRP She)) ...))`.
    fn from_str(s: &str) -> Result<Self> {
        let tokens: Vec<&str> = TREE_TOKEN_RE.find_iter(s).map(|m| m.as_str()).collect();

        let mut pos = 0;
        let tree = parse_node(&tokens, &mut pos)?;
        if pos != tokens.len() {
            anyhow::bail!("Trailing input after parse tree at token {}", pos);
        }
        Ok(tree)
    }
}

fn parse_node(tokens: &[&str], pos: &mut usize) -> Result<ParseTree> {
    match tokens.get(*pos) {
        Some(&"(") => *pos += 1,
        Some(token) => anyhow::bail!("Expected '(' but found {:?}", token),
        None => anyhow::bail!("Empty parse tree"),
    }

    // PTB files sometimes wrap the root in an unlabeled bracket: "( (S ...))"
    let label = match tokens.get(*pos) {
        Some(&"(") | Some(&")") => String::new(),
        Some(token) => {
            *pos += 1;
            token.to_string()
        }
        None => anyhow::bail!("Unbalanced parse tree"),
    };

    let mut children = Vec::new();
    loop {
        match tokens.get(*pos) {
            Some(&")") => {
                *pos += 1;
                return Ok(ParseTree::node(label, children));
            }
            Some(&"(") => children.push(parse_node(tokens, pos)?),
            Some(word) => {
                children.push(ParseTree::leaf(*word));
                *pos += 1;
            }
            None => anyhow::bail!("Unbalanced parse tree: missing ')' for {:?}", label),
        }
    }
}
