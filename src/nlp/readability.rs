// Flesch reading ease and Flesch-Kincaid grade level.
use serde::{Deserialize, Serialize};

use crate::text::{split_sentences, tokenize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Readability {
    pub reading_ease: f32,
    pub grade_level: f32,
}

/// Vowel-group estimate; a trailing silent "e" does not count.
pub fn count_syllables(word: &str) -> usize {
    let w = word.to_lowercase();
    let mut count = 0;
    let mut prev_vowel = false;
    for c in w.chars() {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }
    if count > 1 && w.ends_with('e') && !w.ends_with("le") && !w.ends_with("ee") {
        count -= 1;
    }
    count.max(1)
}

pub fn readability(text: &str) -> Option<Readability> {
    let words = tokenize(text);
    let sentences = split_sentences(text).len().max(1);
    if words.is_empty() {
        return None;
    }
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

    let words_per_sentence = words.len() as f32 / sentences as f32;
    let syllables_per_word = syllables as f32 / words.len() as f32;

    Some(Readability {
        reading_ease: 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word,
        grade_level: 0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59,
    })
}
