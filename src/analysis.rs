// Feature extraction: calls each NLP capability once and degrades per feature on failure.
use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::Config;
use crate::error::ServiceError;
use crate::nlp::{NlpService, Readability, Sentiment};
use crate::text::{first_sentence, split_sentences, tokenize, truncate_chars, FALLBACK_SUMMARY_CHARS};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinguisticStats {
    pub total_words: usize,
    pub unique_words: usize,
    pub avg_sentence_length: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarySource {
    Model,
    FirstSentence,
    Truncated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub text: String,
    pub source: SummarySource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceInsight {
    pub text: String,
    pub key_tokens: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub entities: BTreeMap<String, Vec<String>>,
    pub noun_phrases: Vec<String>,
    pub verbs: Vec<String>,
    pub pos_counts: BTreeMap<String, usize>,
    pub sentiment: Sentiment,
    pub readability: Option<Readability>,
    pub linguistic: LinguisticStats,
    pub summary: Summary,
    pub sentences: Vec<SentenceInsight>,
    /// Features that were unavailable and what replaced them.
    pub notices: Vec<String>,
}

impl AnalysisResult {
    pub fn entity_count(&self) -> usize {
        self.entities.values().map(Vec::len).sum()
    }
}

pub fn linguistic_stats(text: &str) -> LinguisticStats {
    let words = tokenize(text);
    let unique: HashSet<&str> = words.iter().map(String::as_str).collect();
    let sentences = split_sentences(text).len().max(1);
    LinguisticStats {
        total_words: words.len(),
        unique_words: unique.len(),
        avg_sentence_length: words.len() as f32 / sentences as f32,
    }
}

/// Summary used when the summarizer cannot produce one.
pub fn fallback_summary(text: &str) -> Summary {
    match first_sentence(text) {
        Some(s) => Summary { text: s.to_string(), source: SummarySource::FirstSentence },
        None => Summary {
            text: truncate_chars(text.trim(), FALLBACK_SUMMARY_CHARS).to_string(),
            source: SummarySource::Truncated,
        },
    }
}

struct Degrader {
    notices: Vec<String>,
}

impl Degrader {
    fn or_else<T>(&mut self, feature: &str, result: Result<T, ServiceError>, fallback: impl FnOnce() -> T, replacement: &str) -> T {
        match result {
            Ok(v) => v,
            Err(e) => {
                warn!(feature, service = e.service(), error = %e, "feature unavailable, using {replacement}");
                self.notices.push(format!("{feature} unavailable ({e}); using {replacement}."));
                fallback()
            }
        }
    }
}

pub fn analyze(nlp: &dyn NlpService, text: &str, cfg: &Config) -> AnalysisResult {
    info!(chars = text.len(), "extracting features");
    let mut d = Degrader { notices: Vec::new() };

    let entities = d.or_else("entity extraction", nlp.entities(text), BTreeMap::new, "no entities");
    let pos_counts = d.or_else("POS tagging", nlp.pos_distribution(text), BTreeMap::new, "no tag counts");
    let mut noun_phrases = d.or_else("noun phrase extraction", nlp.noun_phrases(text), Vec::new, "no key phrases");
    noun_phrases.truncate(cfg.max_key_phrases);
    let verbs = d.or_else("verb extraction", nlp.verbs(text), Vec::new, "no verbs");
    let sentiment = d.or_else("sentiment", nlp.sentiment(text), || Sentiment::NEUTRAL, "neutral sentiment");
    let readability = d.or_else("readability", nlp.readability(text).map(Some), || None, "no readability score");

    let summary = match nlp.summarize(text, cfg.summary_max_len, cfg.summary_min_len) {
        Ok(s) if !s.trim().is_empty() => Summary { text: s, source: SummarySource::Model },
        result => {
            let err = result.err().unwrap_or(ServiceError::EmptyResult { service: "summarizer" });
            let fallback = fallback_summary(text);
            let replacement = match fallback.source {
                SummarySource::Truncated => "the opening of the text",
                _ => "the first sentence",
            };
            d.or_else("summarization", Err(err), || fallback, replacement)
        }
    };

    let mut key_token_error: Option<ServiceError> = None;
    let sentences = split_sentences(text)
        .into_iter()
        .map(|s| {
            let key_tokens = nlp.key_tokens(s).unwrap_or_else(|e| {
                key_token_error.get_or_insert(e);
                Vec::new()
            });
            SentenceInsight { text: s.to_string(), key_tokens }
        })
        .collect();
    if let Some(e) = key_token_error {
        d.or_else::<()>("sentence key tokens", Err(e), || (), "empty key element lists");
    }

    AnalysisResult {
        entities,
        noun_phrases,
        verbs,
        pos_counts,
        sentiment,
        readability,
        linguistic: linguistic_stats(text),
        summary,
        sentences,
        notices: d.notices,
    }
}
