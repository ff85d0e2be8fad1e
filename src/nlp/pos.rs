// Heuristic part-of-speech tagging built from closed-class word lists and suffix rules.
// Good enough to surface topics (noun phrases) and actions (verbs) for the explanation.
use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::summarization::STOP_WORDS;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9][A-Za-z0-9'\-]*|[^\sA-Za-z0-9]").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pos {
    Det,
    Pron,
    Adp,
    Cconj,
    Aux,
    Adv,
    Adj,
    Verb,
    Num,
    Propn,
    Noun,
    Punct,
}

impl Pos {
    pub fn as_str(&self) -> &'static str {
        match self {
            Pos::Det => "DET",
            Pos::Pron => "PRON",
            Pos::Adp => "ADP",
            Pos::Cconj => "CCONJ",
            Pos::Aux => "AUX",
            Pos::Adv => "ADV",
            Pos::Adj => "ADJ",
            Pos::Verb => "VERB",
            Pos::Num => "NUM",
            Pos::Propn => "PROPN",
            Pos::Noun => "NOUN",
            Pos::Punct => "PUNCT",
        }
    }

    fn is_nominal(&self) -> bool {
        matches!(self, Pos::Noun | Pos::Propn)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tagged {
    pub text: String,
    pub pos: Pos,
}

fn set(words: &[&'static str]) -> HashSet<&'static str> {
    words.iter().copied().collect()
}

static DETERMINERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&["the", "a", "an", "this", "that", "these", "those", "every", "each", "some", "any", "no", "all", "both"])
});

static PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my", "your",
        "his", "its", "our", "their", "who", "whom", "whose", "which", "what", "itself", "themselves",
    ])
});

static ADPOSITIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "in", "on", "at", "by", "for", "with", "from", "to", "of", "about", "into", "over", "under",
        "between", "through", "during", "after", "before", "without", "within", "across", "against",
        "among", "upon", "like", "as",
    ])
});

static CONJUNCTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| set(&["and", "or", "but", "nor", "yet", "so"]));

static AUXILIARIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "is", "are", "was", "were", "be", "been", "being", "am", "do", "does", "did", "have", "has",
        "had", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
    ])
});

static MODALS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&["will", "would", "shall", "should", "can", "could", "may", "might", "must", "do", "does", "did"])
});

static ADVERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "very", "not", "never", "also", "just", "really", "too", "quite", "often", "always", "now",
        "then", "here", "there", "soon", "still", "already", "most", "more", "less", "later", "today",
    ])
});

static COMMON_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    set(&[
        "make", "take", "include", "provide", "become", "became", "show", "use", "help", "affect",
        "touch", "explore", "understand", "read", "say", "said", "go", "went", "get", "got", "see",
        "saw", "know", "knew", "think", "thought", "come", "came", "give", "gave", "find", "found",
        "tell", "told", "work", "need", "combine", "focus", "communicate", "discuss", "create",
        "develop", "change", "grow", "remain", "require", "involve", "reveal", "offer", "lead", "led",
        "live", "face", "born", "decipher", "seek", "build", "built", "keep", "kept", "begin", "began",
    ])
});

const ADJ_SUFFIXES: [&str; 10] = ["ous", "ful", "ive", "able", "ible", "al", "ic", "less", "ish", "ant"];
const VERB_SUFFIXES: [&str; 3] = ["ize", "ise", "ify"];

fn is_capitalized(word: &str) -> bool {
    word.chars().next().map(|c| c.is_uppercase()).unwrap_or(false)
}

fn closed_class(lower: &str) -> Option<Pos> {
    if DETERMINERS.contains(lower) {
        Some(Pos::Det)
    } else if PRONOUNS.contains(lower) {
        Some(Pos::Pron)
    } else if ADPOSITIONS.contains(lower) {
        Some(Pos::Adp)
    } else if CONJUNCTIONS.contains(lower) {
        Some(Pos::Cconj)
    } else if AUXILIARIES.contains(lower) {
        Some(Pos::Aux)
    } else if ADVERBS.contains(lower) {
        Some(Pos::Adv)
    } else {
        None
    }
}

fn open_class(lower: &str, prev: Option<&Tagged>) -> Pos {
    if lower.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
        return Pos::Num;
    }
    // "the change" and "global change" stay nominal
    let nominal_context = matches!(prev.map(|p| p.pos), Some(Pos::Det | Pos::Adj));
    let base = lower
        .strip_suffix("es")
        .filter(|s| COMMON_VERBS.contains(*s))
        .or_else(|| lower.strip_suffix('s'))
        .unwrap_or(lower);
    if !nominal_context && (COMMON_VERBS.contains(lower) || COMMON_VERBS.contains(base)) {
        return Pos::Verb;
    }
    if lower.len() > 4 && lower.ends_with("ly") {
        return Pos::Adv;
    }
    if (lower.len() > 4 && lower.ends_with("ing"))
        || (lower.len() > 3 && lower.ends_with("ed"))
        || VERB_SUFFIXES.iter().any(|s| lower.len() > s.len() + 2 && lower.ends_with(s))
    {
        return Pos::Verb;
    }
    if ADJ_SUFFIXES.iter().any(|s| lower.len() > s.len() + 2 && lower.ends_with(s)) {
        return Pos::Adj;
    }
    match prev {
        // "to read", "will change", "they study"
        Some(p) if p.text.eq_ignore_ascii_case("to") => Pos::Verb,
        Some(p) if p.pos == Pos::Aux && MODALS.contains(p.text.to_lowercase().as_str()) => Pos::Verb,
        Some(p) if p.pos == Pos::Pron && !lower.ends_with("ss") && lower.ends_with('s') => Pos::Verb,
        _ => Pos::Noun,
    }
}

pub fn tag(text: &str) -> Vec<Tagged> {
    let raw: Vec<&str> = TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect();
    let mut out: Vec<Tagged> = Vec::with_capacity(raw.len());

    for (i, word) in raw.iter().enumerate() {
        let first_char = word.chars().next().unwrap_or(' ');
        if !first_char.is_alphanumeric() {
            out.push(Tagged { text: word.to_string(), pos: Pos::Punct });
            continue;
        }

        let lower = word.to_lowercase();
        let sentence_start = i == 0 || matches!(raw[i - 1], "." | "!" | "?");
        let pos = if let Some(closed) = closed_class(&lower) {
            closed
        } else if is_capitalized(word)
            && (!sentence_start || raw.get(i + 1).map(|n| is_capitalized(n)).unwrap_or(false))
        {
            Pos::Propn
        } else {
            open_class(&lower, out.last())
        };
        out.push(Tagged { text: word.to_string(), pos });
    }
    out
}

pub fn pos_counts(tagged: &[Tagged]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for t in tagged {
        *counts.entry(t.pos.as_str().to_string()).or_insert(0) += 1;
    }
    counts
}

/// Maximal runs of (DET)? (ADJ|NUM|NOUN|PROPN)* closed by a noun, deduplicated in text order.
pub fn noun_phrases(tagged: &[Tagged]) -> Vec<String> {
    let mut phrases: Vec<String> = Vec::new();
    let mut i = 0;
    while i < tagged.len() {
        let start = i;
        if tagged[i].pos == Pos::Det {
            i += 1;
        }
        let mut last_noun: Option<usize> = None;
        while i < tagged.len() && matches!(tagged[i].pos, Pos::Adj | Pos::Num | Pos::Noun | Pos::Propn) {
            if tagged[i].pos.is_nominal() {
                last_noun = Some(i);
            }
            i += 1;
        }
        match last_noun {
            Some(end) => {
                let phrase = tagged[start..=end]
                    .iter()
                    .map(|t| t.text.as_str())
                    .collect::<Vec<_>>()
                    .join(" ");
                if !phrases.contains(&phrase) {
                    phrases.push(phrase);
                }
                i = end + 1;
            }
            None => i = start + 1,
        }
    }
    phrases
}

fn is_vowel(c: u8) -> bool {
    matches!(c, b'a' | b'e' | b'i' | b'o' | b'u')
}

fn restore_stem(stem: &str) -> String {
    let b = stem.as_bytes();
    let n = b.len();
    if n >= 2 && b[n - 1] == b[n - 2] && !matches!(b[n - 1], b'l' | b's' | b'z' | b'e') {
        return stem[..n - 1].to_string();
    }
    // "mak" -> "make", "bas" -> "base"
    if n == 3 && !is_vowel(b[0]) && is_vowel(b[1]) && !is_vowel(b[2]) && !matches!(b[2], b'w' | b'x' | b'y') {
        return format!("{stem}e");
    }
    stem.to_string()
}

/// Suffix-stripping lemma for verbs.
pub fn lemmatize_verb(word: &str) -> String {
    let w = word.to_lowercase();
    if COMMON_VERBS.contains(w.as_str()) {
        return w;
    }
    if let Some(stem) = w.strip_suffix("ied").or_else(|| w.strip_suffix("ies")) {
        return format!("{stem}y");
    }
    if w.len() > 4 {
        if let Some(stem) = w.strip_suffix("ing") {
            return restore_stem(stem);
        }
    }
    if w.len() > 3 {
        if let Some(stem) = w.strip_suffix("ed") {
            if stem.ends_with('e') {
                return stem.to_string();
            }
            return restore_stem(stem);
        }
    }
    for sibilant in ["ches", "shes", "sses", "xes"] {
        if w.ends_with(sibilant) {
            return w[..w.len() - 2].to_string();
        }
    }
    if w.len() > 3 && w.ends_with('s') && !w.ends_with("ss") {
        return w[..w.len() - 1].to_string();
    }
    w
}

/// Distinct verb lemmas in first-seen order.
pub fn verbs(tagged: &[Tagged]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for t in tagged.iter().filter(|t| t.pos == Pos::Verb) {
        let lemma = lemmatize_verb(&t.text);
        if !out.contains(&lemma) {
            out.push(lemma);
        }
    }
    out
}

/// Non-stopword nouns, verbs and adjectives, as written.
pub fn key_tokens(tagged: &[Tagged]) -> Vec<String> {
    tagged
        .iter()
        .filter(|t| matches!(t.pos, Pos::Noun | Pos::Verb | Pos::Adj))
        .filter(|t| !STOP_WORDS.contains(t.text.to_lowercase().as_str()))
        .map(|t| t.text.clone())
        .collect()
}
