// Tokenizing, sentence splitting and input loading shared by every stage.
use std::fs::File;
use std::io::Read;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{PipelineError, Result};

// Letters in any script, with their combining marks, so Urdu and accented words count once.
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\p{L}\p{M}\p{N}']+").unwrap());

static SENTENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^.!?]+[.!?]+").unwrap());

/// Extensions accepted by `read_file_content` and the batch walker.
pub const SUPPORTED_EXTS: [&str; 5] = ["txt", "md", "csv", "json", "pdf"];

/// Characters kept when no sentence boundary exists.
pub const FALLBACK_SUMMARY_CHARS: usize = 200;

pub fn tokenize(s: &str) -> Vec<String> {
    WORD_RE
        .find_iter(s)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}

pub fn word_count(s: &str) -> usize {
    WORD_RE.find_iter(s).count()
}

/// Splits on terminal punctuation. A trailing fragment without a terminator
/// still counts as a sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut consumed = 0;
    for m in SENTENCE_RE.find_iter(text) {
        let s = m.as_str().trim();
        if !s.is_empty() {
            out.push(s);
        }
        consumed = m.end();
    }
    let rest = text[consumed..].trim();
    if !rest.is_empty() {
        out.push(rest);
    }
    out
}

/// The first properly terminated sentence, if the text has one.
pub fn first_sentence(text: &str) -> Option<&str> {
    SENTENCE_RE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .find(|s| !s.is_empty())
}

/// Cuts to at most `max_chars` characters without splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn read_text_file(p: &Path) -> Result<String> {
    let mut s = String::new();
    let mut f = File::open(p)?;
    f.read_to_string(&mut s)?;
    Ok(s)
}

pub fn read_file_content(p: &Path) -> Result<String> {
    let ext = p.extension().and_then(|s| s.to_str()).unwrap_or("");
    match ext {
        "pdf" => pdf_extract::extract_text(p).map_err(|e| PipelineError::Pdf(e.to_string())),
        e if SUPPORTED_EXTS.contains(&e) => read_text_file(p),
        other => Err(PipelineError::UnsupportedFormat(other.to_string())),
    }
}
