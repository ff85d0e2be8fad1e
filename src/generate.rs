// Generative paraphrasing through a local Ollama install.
use std::process::Command;
use std::time::Duration;

use crate::command;
use crate::error::ServiceError;

pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct OllamaGenerator {
    pub model: String,
    pub timeout: Duration,
}

impl OllamaGenerator {
    pub fn new(model: impl Into<String>, timeout: Duration) -> Self {
        Self { model: model.into(), timeout }
    }
}

impl TextGenerator for OllamaGenerator {
    fn generate(&self, prompt: &str) -> Result<String, ServiceError> {
        let mut cmd = Command::new("ollama");
        cmd.arg("run").arg(&self.model).arg(prompt);
        let output = command::run(cmd, "ollama", Some(self.timeout))?;
        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            return Err(ServiceError::EmptyResult { service: "ollama" });
        }
        Ok(text)
    }
}

/// Asks for a reworded version of an explanation without inventing new facts.
pub fn paraphrase_prompt(explanation: &str) -> String {
    format!(
        "You are a careful editor. Rewrite the following text analysis in clear, fluent prose. \
         Keep every section and every fact; do not add information that is not present.\n\n\
         {explanation}\n\nRewritten analysis:"
    )
}

/// Picks the smallest model from `ollama list` output.
/// Rows look like: NAME  ID  SIZE UNIT  MODIFIED
pub fn smallest_model(list_output: &str) -> Option<String> {
    let mut best: Option<(String, f64)> = None;
    for line in list_output.lines().skip_while(|l| l.starts_with("NAME")) {
        let cols: Vec<&str> = line.split_whitespace().collect();
        if cols.len() < 3 {
            continue;
        }
        let size = cols.windows(2).skip(1).find_map(|pair| {
            let v = pair[0].parse::<f64>().ok()?;
            let scale = match pair[1].to_uppercase().as_str() {
                "GB" => 1024.0 * 1024.0 * 1024.0,
                "MB" => 1024.0 * 1024.0,
                "KB" => 1024.0,
                _ => return None,
            };
            Some(v * scale)
        });
        if let Some(sz) = size {
            match &best {
                Some((_, bsz)) if *bsz <= sz => {}
                _ => best = Some((cols[0].to_string(), sz)),
            }
        }
    }
    best.map(|(name, _)| name)
}

/// Queries the local install for its smallest model.
pub fn probe_smallest_model() -> Option<String> {
    let output = command::run(
        {
            let mut cmd = Command::new("ollama");
            cmd.arg("list");
            cmd
        },
        "ollama",
        Some(Duration::from_secs(10)),
    )
    .ok()?;
    smallest_model(&String::from_utf8_lossy(&output.stdout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smallest_model() {
        let listing = "NAME            ID              SIZE      MODIFIED\n\
                       mistral:latest  f974a74358d6    4.1 GB    2 weeks ago\n\
                       gemma3:1b       8648f39daa8f    815 MB    3 days ago\n\
                       llama3:8b       365c0bd3c000    4.7 GB    5 weeks ago\n";
        assert_eq!(smallest_model(listing), Some("gemma3:1b".to_string()));
    }

    #[test]
    fn test_smallest_model_empty_listing() {
        assert_eq!(smallest_model(""), None);
        assert_eq!(smallest_model("NAME ID SIZE MODIFIED\n"), None);
    }

    #[test]
    fn test_paraphrase_prompt_embeds_text() {
        let prompt = paraphrase_prompt("Overview: cats.");
        assert!(prompt.contains("Overview: cats."));
        assert!(prompt.ends_with("Rewritten analysis:"));
    }
}
