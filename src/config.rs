// Runtime settings, loaded from an optional JSON file and overridden by CLI flags.
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const DEFAULT_OLLAMA_MODEL: &str = "mistral";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Inputs shorter than this are rejected before any analysis.
    pub min_words: usize,
    pub summary_max_len: usize,
    pub summary_min_len: usize,
    pub max_key_phrases: usize,
    pub ollama_model: Option<String>,
    pub generation_timeout_secs: u64,
    pub speech_command: String,
    /// Replaces the built-in English to Urdu word table when set.
    pub translation: Option<BTreeMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_words: 10,
            summary_max_len: 130,
            summary_min_len: 30,
            max_key_phrases: 10,
            ollama_model: None,
            generation_timeout_secs: 60,
            speech_command: String::from("espeak-ng"),
            translation: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let f = File::open(path)?;
        Ok(serde_json::from_reader(f)?)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Explicit setting, then `OLLAMA_MODEL`, then whatever `probe` finds, then the default model.
    pub fn resolve_ollama_model(&self, probe: impl FnOnce() -> Option<String>) -> String {
        self.ollama_model
            .clone()
            .or_else(|| std::env::var("OLLAMA_MODEL").ok())
            .or_else(probe)
            .unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.to_string())
    }
}
