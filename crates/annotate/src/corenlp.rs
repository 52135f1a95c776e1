use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

use crate::schema::Sentence;
use crate::session::Annotator;
use crate::tree::ParseTree;

pub const DEFAULT_ANNOTATORS: &str = "tokenize,ssplit,pos,lemma,ner,parse,depparse,coref";

/// Client for a Stanford CoreNLP server.
#[derive(Clone)]
pub struct CoreNlpClient {
    base_url: String,
    annotators: String,
    client: reqwest::Client,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoreNlpDocument {
    sentences: Vec<CoreNlpSentence>,
    #[serde(default)]
    corefs: HashMap<String, Vec<CoreNlpMention>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoreNlpSentence {
    #[serde(default)]
    parse: Option<String>,
    #[serde(default)]
    basic_dependencies: Vec<CoreNlpDependency>,
    tokens: Vec<CoreNlpToken>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoreNlpDependency {
    dep: String,
    governor_gloss: String,
    dependent_gloss: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoreNlpToken {
    word: String,
    #[serde(default)]
    original_text: Option<String>,
    lemma: String,
    pos: String,
    #[serde(default)]
    ner: Option<String>,
    #[serde(default)]
    after: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoreNlpMention {
    text: String,
    sent_num: usize,
    #[serde(default)]
    is_representative_mention: bool,
}

impl CoreNlpClient {
    pub fn new(base_url: String, annotators: String) -> Self {
        Self {
            base_url,
            annotators,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Annotator for CoreNlpClient {
    async fn annotate(&mut self, text: &str) -> Result<Vec<Sentence>> {
        let properties = serde_json::json!({
            "annotators": self.annotators,
            "outputFormat": "json",
        })
        .to_string();

        let response = self
            .client
            .post(&self.base_url)
            .query(&[("properties", properties.as_str())])
            .body(text.to_string())
            .send()
            .await
            .context("Failed to send request to CoreNLP")?;

        if !response.status().is_success() {
            anyhow::bail!("CoreNLP request failed: {}", response.status());
        }

        let document: CoreNlpDocument = response
            .json()
            .await
            .context("Failed to parse CoreNLP response")?;

        into_sentences(document)
    }

    async fn reconnect(&mut self) -> Result<()> {
        // Dropping the old client closes its pooled connections
        self.client = reqwest::Client::new();

        let url = format!("{}/ready", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to reach CoreNLP")?;
        if !response.status().is_success() {
            anyhow::bail!("CoreNLP not ready: {}", response.status());
        }
        debug!(url = %self.base_url, "Reconnected to CoreNLP");
        Ok(())
    }
}

fn into_sentences(document: CoreNlpDocument) -> Result<Vec<Sentence>> {
    let mut sentences = Vec::with_capacity(document.sentences.len());

    for sent in document.sentences {
        let raw: String = sent
            .tokens
            .iter()
            .map(|t| format!("{}{}", t.original_text.as_deref().unwrap_or(&t.word), t.after))
            .collect();

        let mut builder = Sentence::builder(raw.trim());
        for token in &sent.tokens {
            builder = builder.token(
                &token.word,
                &token.pos,
                &token.lemma,
                token.ner.as_deref().unwrap_or(crate::entities::OUTSIDE),
            );
        }
        for dep in &sent.basic_dependencies {
            if dep.dep.eq_ignore_ascii_case("root") {
                continue;
            }
            builder = builder.edge(&dep.dep, &dep.governor_gloss, &dep.dependent_gloss);
        }
        if let Some(parse) = &sent.parse {
            let tree: ParseTree = parse.parse().context("Malformed parse tree from CoreNLP")?;
            builder = builder.tree(tree);
        }
        sentences.push(builder.build());
    }

    // Map every non-representative mention to its chain's representative,
    // within the sentence the mention occurs in.
    for chain in document.corefs.values() {
        let Some(representative) = chain
            .iter()
            .find(|m| m.is_representative_mention)
            .or_else(|| chain.first())
        else {
            continue;
        };
        for mention in chain {
            if mention.text == representative.text {
                continue;
            }
            if let Some(sentence) = mention
                .sent_num
                .checked_sub(1)
                .and_then(|i| sentences.get_mut(i))
            {
                sentence
                    .corefs
                    .insert(mention.text.clone(), representative.text.clone());
            }
        }
    }

    Ok(sentences)
}
