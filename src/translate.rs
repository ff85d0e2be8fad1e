// Word-level English to Urdu substitution from a fixed table.
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

const URDU_WORDS: [(&str, &str); 7] = [
    ("the", "اس"),
    ("is", "ہے"),
    ("are", "ہیں"),
    ("and", "اور"),
    ("in", "میں"),
    ("of", "کا"),
    ("to", "کو"),
];

/// Lowercase source word to replacement. Matching is per whitespace token,
/// never inside a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationMap {
    words: BTreeMap<String, String>,
}

impl Default for TranslationMap {
    fn default() -> Self {
        Self::urdu()
    }
}

impl TranslationMap {
    pub fn urdu() -> Self {
        URDU_WORDS.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<&str> {
        self.words.get(&word.to_lowercase()).map(String::as_str)
    }

    /// Replaces mapped tokens, keeps the rest verbatim, rejoins with single spaces.
    pub fn translate(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|word| self.get(word).unwrap_or(word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl FromIterator<(String, String)> for TranslationMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(|(k, v)| (k.to_lowercase(), v)).collect(),
        }
    }
}

impl From<BTreeMap<String, String>> for TranslationMap {
    fn from(words: BTreeMap<String, String>) -> Self {
        words.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_sentence() {
        let map = TranslationMap::urdu();
        assert_eq!(map.translate("the cat is in the box"), "اس cat ہے میں اس box");
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let map = TranslationMap::urdu();
        assert_eq!(map.translate("The Cat IS here"), "اس Cat ہے here");
    }

    #[test]
    fn test_unmapped_tokens_untouched() {
        let map = TranslationMap::urdu();
        let input = "Therein, island: token-in, 'the' toTAL";
        // No token matches in full, so nothing changes, not even inside words.
        assert_eq!(map.translate(input), input);
    }

    #[test]
    fn test_whitespace_collapses_to_single_spaces() {
        let map = TranslationMap::urdu();
        assert_eq!(map.translate("  cat\n\tand   dog "), "cat اور dog");
    }

    #[test]
    fn test_deterministic() {
        let map = TranslationMap::urdu();
        let text = "Climate change is one of the most significant challenges";
        assert_eq!(map.translate(text), map.translate(text));
    }

    #[test]
    fn test_custom_map_normalises_keys() {
        let mut words = BTreeMap::new();
        words.insert("Cat".to_string(), "بلی".to_string());
        let map = TranslationMap::from(words);
        assert_eq!(map.len(), 1);
        assert_eq!(map.translate("the cat"), "the بلی");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(TranslationMap::urdu().translate(""), "");
    }
}
