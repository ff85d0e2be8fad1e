// Text summarization using an extractive approach.
// Sentences are scored by normalized word frequency and the best ones are kept in text order.
use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ServiceError;
use crate::text::split_sentences;

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9']+").unwrap()
});

pub(crate) static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "by", "for", "from",
        "has", "he", "in", "is", "it", "its", "of", "on", "that", "the",
        "to", "was", "will", "with", "this", "but", "they", "have",
        "had", "what", "when", "where", "who", "which", "why", "how",
        "she", "we", "you", "i", "or", "not", "so", "than", "then", "there",
        "these", "those", "their", "our", "his", "her", "been", "being", "were",
        "can", "could", "would", "should", "do", "does", "did", "into", "about",
    ].iter().copied().collect()
});

const SERVICE: &str = "summarizer";

/// Summarizes `text` to at most `max_len` words, aiming for at least `min_len`.
pub fn summarize_text_content(text: &str, max_len: usize, min_len: usize) -> Result<String, ServiceError> {
    let sentences = split_sentences(text);
    if sentences.is_empty() {
        return Err(ServiceError::EmptyResult { service: SERVICE });
    }

    if sentences.len() <= 3 {
        return Ok(truncate_words(&sentences.join(" "), max_len));
    }

    let mut word_freq: HashMap<String, usize> = HashMap::new();
    for sentence in &sentences {
        for word in WORD_PATTERN.find_iter(sentence) {
            let word_str = word.as_str().to_lowercase();
            if !STOP_WORDS.contains(word_str.as_str()) && word_str.len() > 2 {
                *word_freq.entry(word_str).or_insert(0) += 1;
            }
        }
    }

    let max_freq = word_freq.values().max().copied().unwrap_or(1);
    for freq in word_freq.values_mut() {
        *freq = (*freq * 100) / max_freq;
    }

    let mut sentence_scores: Vec<(usize, usize, usize)> = Vec::with_capacity(sentences.len());
    for (idx, sentence) in sentences.iter().enumerate() {
        let words: Vec<_> = WORD_PATTERN.find_iter(sentence).collect();
        let mut score: usize = words
            .iter()
            .filter_map(|w| word_freq.get(&w.as_str().to_lowercase()))
            .sum();

        // Normalize by sentence length to avoid bias toward long sentences
        if !words.is_empty() {
            score /= words.len();
        }

        // Opening sentences usually carry the topic
        if idx == 0 {
            score = (score as f32 * 1.5) as usize;
        }

        sentence_scores.push((idx, score, words.len()));
    }

    sentence_scores.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    // Top 30% of sentences (minimum 2, maximum 5), stretched to reach min_len
    let target = (sentences.len() * 30 / 100).clamp(2, 5);
    let mut selected: Vec<usize> = Vec::new();
    let mut words = 0;
    for &(idx, _, len) in &sentence_scores {
        if selected.len() >= target && words >= min_len {
            break;
        }
        if !selected.is_empty() && words + len > max_len {
            continue;
        }
        selected.push(idx);
        words += len;
    }
    selected.sort_unstable();

    let summary: Vec<&str> = selected.iter().map(|&idx| sentences[idx]).collect();
    Ok(truncate_words(&summary.join(" "), max_len))
}

fn truncate_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        text.to_string()
    } else {
        words[..max_words].join(" ")
    }
}
