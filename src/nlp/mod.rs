// NLP feature extraction: the service seam plus the local, pattern-based implementation.
pub mod ner;
pub mod pos;
pub mod readability;
pub mod sentiment;
pub mod summarization;

use std::collections::BTreeMap;

use crate::error::ServiceError;

pub use readability::Readability;
pub use sentiment::Sentiment;

/// Linguistic features the explanation is built from.
///
/// Implementations may be backed by anything (local heuristics, a model server);
/// every call can fail independently and callers degrade per feature.
pub trait NlpService: Send + Sync {
    fn entities(&self, text: &str) -> Result<BTreeMap<String, Vec<String>>, ServiceError>;
    fn pos_distribution(&self, text: &str) -> Result<BTreeMap<String, usize>, ServiceError>;
    fn noun_phrases(&self, text: &str) -> Result<Vec<String>, ServiceError>;
    fn verbs(&self, text: &str) -> Result<Vec<String>, ServiceError>;
    /// Content words of a single sentence.
    fn key_tokens(&self, sentence: &str) -> Result<Vec<String>, ServiceError>;
    fn sentiment(&self, text: &str) -> Result<Sentiment, ServiceError>;
    /// `max_len` / `min_len` are word counts.
    fn summarize(&self, text: &str, max_len: usize, min_len: usize) -> Result<String, ServiceError>;
    fn readability(&self, text: &str) -> Result<Readability, ServiceError>;
}

/// Regex/lexicon implementation that needs no models or network.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalNlp;

impl NlpService for LocalNlp {
    fn entities(&self, text: &str) -> Result<BTreeMap<String, Vec<String>>, ServiceError> {
        Ok(ner::group_by_label(&ner::extract_entities_from_text(text)))
    }

    fn pos_distribution(&self, text: &str) -> Result<BTreeMap<String, usize>, ServiceError> {
        Ok(pos::pos_counts(&pos::tag(text)))
    }

    fn noun_phrases(&self, text: &str) -> Result<Vec<String>, ServiceError> {
        Ok(pos::noun_phrases(&pos::tag(text)))
    }

    fn verbs(&self, text: &str) -> Result<Vec<String>, ServiceError> {
        Ok(pos::verbs(&pos::tag(text)))
    }

    fn key_tokens(&self, sentence: &str) -> Result<Vec<String>, ServiceError> {
        Ok(pos::key_tokens(&pos::tag(sentence)))
    }

    fn sentiment(&self, text: &str) -> Result<Sentiment, ServiceError> {
        Ok(sentiment::analyze_sentiment_text(text))
    }

    fn summarize(&self, text: &str, max_len: usize, min_len: usize) -> Result<String, ServiceError> {
        summarization::summarize_text_content(text, max_len, min_len)
    }

    fn readability(&self, text: &str) -> Result<Readability, ServiceError> {
        readability::readability(text).ok_or(ServiceError::EmptyResult { service: "readability" })
    }
}
