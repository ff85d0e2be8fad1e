// Result of one pipeline run and its export formats.
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisResult;
use crate::error::Result;
use crate::explain::Explanation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// File the text came from, when there was one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub word_count: usize,
    pub analysis: AnalysisResult,
    pub explanation: Explanation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<PathBuf>,
    pub notices: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
    /// `data:` URI with the text report base64-encoded, ready for a download link.
    Base64,
}

impl Report {
    /// The human-readable report: explanation, translation, then notices.
    pub fn render_text(&self) -> String {
        let mut out = self.explanation.text.clone();
        if let Some(t) = &self.translation {
            out.push_str("\n\nUrdu Translation:\n");
            out.push_str(t);
        }
        if let Some(a) = &self.audio {
            out.push_str(&format!("\n\nAudio: {}", a.display()));
        }
        if !self.notices.is_empty() {
            out.push_str("\n\nNotices:");
            for n in &self.notices {
                out.push_str("\n- ");
                out.push_str(n);
            }
        }
        out
    }

    pub fn export(&self, format: ExportFormat) -> Result<String> {
        Ok(match format {
            ExportFormat::Text => self.render_text(),
            ExportFormat::Json => serde_json::to_string_pretty(self)?,
            ExportFormat::Base64 => data_uri(&self.render_text()),
        })
    }

    pub fn write_to(&self, path: &Path, format: ExportFormat) -> Result<()> {
        let mut f = File::create(path)?;
        f.write_all(self.export(format)?.as_bytes())?;
        Ok(())
    }
}

pub fn data_uri(text: &str) -> String {
    format!("data:text/plain;charset=utf-8;base64,{}", STANDARD.encode(text.as_bytes()))
}
