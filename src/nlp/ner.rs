// Named Entity Recognition using a pattern-based approach.
// Labels follow the common OntoNotes names (PERSON, ORG, GPE, DATE, MONEY) plus EMAIL.
use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub word: String,
    pub label: String,
    pub start: usize,
    pub end: usize,
}

static PERSON_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([A-Z][a-z]+(?:\s+[A-Z][a-z]+)+)\b").unwrap()
});

static ORGANIZATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b((?:[A-Z][a-z]+\s+)*[A-Z][a-z]+\s+(?:Inc|LLC|Corp|Corporation|Ltd|Limited|Company|Co|Group|Institute|University|College|Agency|Bank)\b\.?)").unwrap()
});

static LOCATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b((?:United States|USA|UK|United Kingdom|New York|California|Texas|London|Paris|Tokyo|Beijing|Washington|Chicago|Los Angeles|San Francisco|Boston|Seattle|Miami|Austin|Denver|Portland|Atlanta|Hawaii|Pakistan|India|Lahore|Karachi|Islamabad|China|Europe|Africa|Asia))\b").unwrap()
});

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,})\b").unwrap()
});

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{1,2}[/-]\d{1,2}[/-]\d{2,4}|\d{4}[/-]\d{1,2}[/-]\d{1,2}|(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{1,2},?\s+\d{4})\b").unwrap()
});

static MONEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\s*\d+(?:,\d{3})*(?:\.\d{2})?|\d+(?:,\d{3})*(?:\.\d{2})?\s*(?:USD|EUR|GBP|PKR|dollars?|euros?|pounds?|rupees?)").unwrap()
});

// Order matters: earlier passes claim their spans first.
static PASSES: Lazy<Vec<(&'static Lazy<Regex>, &'static str, usize)>> = Lazy::new(|| {
    vec![
        (&EMAIL_PATTERN, "EMAIL", 1),
        (&DATE_PATTERN, "DATE", 0),
        (&MONEY_PATTERN, "MONEY", 0),
        (&LOCATION_PATTERN, "GPE", 1),
        (&ORGANIZATION_PATTERN, "ORG", 1),
        (&PERSON_PATTERN, "PERSON", 1),
    ]
});

// Capitalised sentence openers the PERSON pattern would otherwise swallow.
const NOT_NAMES: [&str; 12] = [
    "The", "This", "That", "These", "Those", "It", "He", "She", "They", "We", "In", "On",
];

pub fn extract_entities_from_text(text: &str) -> Vec<Entity> {
    let mut entities: Vec<Entity> = Vec::new();

    for (pattern, label, group) in PASSES.iter() {
        for cap in pattern.captures_iter(text) {
            let Some(m) = cap.get(*group) else { continue };
            let word = m.as_str().trim().to_string();
            if *label == "PERSON" && NOT_NAMES.iter().any(|w| word.starts_with(&format!("{w} "))) {
                continue;
            }
            let overlaps = entities.iter().any(|e| m.start() < e.end && e.start < m.end());
            if overlaps || entities.iter().any(|e| e.word == word) {
                continue;
            }
            entities.push(Entity {
                word,
                label: label.to_string(),
                start: m.start(),
                end: m.end(),
            });
        }
    }

    entities.sort_by_key(|e| e.start);
    entities
}

/// Groups entities by label, keeping text order within each label.
pub fn group_by_label(entities: &[Entity]) -> BTreeMap<String, Vec<String>> {
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for e in entities {
        grouped.entry(e.label.clone()).or_default().push(e.word.clone());
    }
    grouped
}
