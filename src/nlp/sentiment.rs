// Sentiment analysis using a lexicon-based approach.
// Produces a polarity in [-1, 1] and a subjectivity in [0, 1].
use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::text::tokenize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub polarity: f32,
    pub subjectivity: f32,
}

impl Sentiment {
    pub const NEUTRAL: Sentiment = Sentiment { polarity: 0.0, subjectivity: 0.0 };

    pub fn label(&self) -> &'static str {
        if self.polarity > 0.0 {
            "positive"
        } else if self.polarity < 0.0 {
            "negative"
        } else {
            "neutral"
        }
    }
}

static POSITIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "good", "great", "excellent", "wonderful", "fantastic", "amazing", "awesome",
        "love", "happy", "joy", "pleased", "delighted", "satisfied", "perfect",
        "beautiful", "brilliant", "outstanding", "superb", "magnificent", "marvelous",
        "terrific", "fabulous", "exceptional", "impressive", "remarkable", "best",
        "better", "positive", "advantage", "benefit", "success", "successful",
        "win", "winner", "winning", "accomplished", "achievement", "triumph",
        "enjoy", "pleasant", "comfortable", "excited", "exciting", "thrilled",
        "approve", "approved", "approval", "like", "liked", "favorite", "prefer",
        "hope", "hopeful", "progress", "improve", "improved", "significant",
    ].iter().copied().collect()
});

static NEGATIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "bad", "terrible", "awful", "horrible", "poor", "worst", "worse",
        "hate", "angry", "sad", "upset", "disappointed", "dissatisfied", "unhappy",
        "fail", "failure", "failed", "problem", "issue", "wrong", "error",
        "difficult", "hard", "tough", "struggle", "struggling", "broken",
        "pain", "painful", "hurt", "hurting", "damage", "damaged", "disaster",
        "negative", "loss", "lose", "losing", "lost", "defeat", "defeated",
        "reject", "rejected", "rejection", "dislike", "disliked", "unpleasant",
        "uncomfortable", "disappointing", "frustrate", "frustrated", "frustrating",
        "crisis", "threat", "danger", "dangerous", "challenge", "challenges",
    ].iter().copied().collect()
});

// Opinion-bearing words that are not polar on their own.
static SUBJECTIVE_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "think", "believe", "feel", "seems", "probably", "maybe", "perhaps",
        "obviously", "clearly", "should", "must", "opinion", "most", "interesting",
    ].iter().copied().collect()
});

static INTENSIFIERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["very", "extremely", "absolutely", "really", "incredibly", "highly", "totally"]
        .iter().copied().collect()
});

static NEGATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["not", "no", "never", "nothing", "nobody", "nowhere", "neither", "nor", "none", "don't", "isn't", "wasn't"]
        .iter().copied().collect()
});

pub fn analyze_sentiment_text(text: &str) -> Sentiment {
    let words = tokenize(text);
    if words.is_empty() {
        return Sentiment::NEUTRAL;
    }

    let mut positive_score = 0.0f32;
    let mut negative_score = 0.0f32;
    let mut opinion_words = 0.0f32;

    for (i, word) in words.iter().enumerate() {
        let mut multiplier = 1.0;
        if i > 0 && INTENSIFIERS.contains(words[i - 1].as_str()) {
            multiplier = 1.5;
        }

        // Negation reaches back two words
        let is_negated = (i > 0 && NEGATIONS.contains(words[i - 1].as_str()))
            || (i > 1 && NEGATIONS.contains(words[i - 2].as_str()));

        if POSITIVE_WORDS.contains(word.as_str()) {
            if is_negated {
                negative_score += multiplier;
            } else {
                positive_score += multiplier;
            }
            opinion_words += multiplier;
        } else if NEGATIVE_WORDS.contains(word.as_str()) {
            if is_negated {
                positive_score += multiplier;
            } else {
                negative_score += multiplier;
            }
            opinion_words += multiplier;
        } else if SUBJECTIVE_WORDS.contains(word.as_str()) || INTENSIFIERS.contains(word.as_str()) {
            opinion_words += 0.5;
        }
    }

    let total = positive_score + negative_score;
    let polarity = if total == 0.0 { 0.0 } else { (positive_score - negative_score) / total };
    // Scaled so that one opinion word in ten reads as fully subjective.
    let subjectivity = (opinion_words * 10.0 / words.len() as f32).clamp(0.0, 1.0);

    Sentiment {
        polarity: polarity.clamp(-1.0, 1.0),
        subjectivity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_sentiment_positive() {
        let s = analyze_sentiment_text("This is a wonderful day! I'm feeling great and happy!");
        assert!(s.polarity > 0.0);
        assert_eq!(s.label(), "positive");
    }

    #[test]
    fn test_analyze_sentiment_negative() {
        let s = analyze_sentiment_text("This is terrible and awful. I hate it!");
        assert_eq!(s.polarity, -1.0);
        assert_eq!(s.label(), "negative");
    }

    #[test]
    fn test_analyze_sentiment_neutral() {
        let s = analyze_sentiment_text("The sky is blue. The grass is green.");
        assert_eq!(s, Sentiment::NEUTRAL);
        assert_eq!(s.label(), "neutral");
    }

    #[test]
    fn test_negation_handling() {
        let s = analyze_sentiment_text("This is not good at all.");
        assert!(s.polarity < 0.0);
    }

    #[test]
    fn test_ranges_hold() {
        let s = analyze_sentiment_text("very very good great excellent best love");
        assert!((-1.0..=1.0).contains(&s.polarity));
        assert!((0.0..=1.0).contains(&s.subjectivity));
    }

    #[test]
    fn test_empty_text_is_neutral() {
        assert_eq!(analyze_sentiment_text(""), Sentiment::NEUTRAL);
    }
}
