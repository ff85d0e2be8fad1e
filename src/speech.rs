// Text-to-speech hand-off to an external synthesizer.
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use crate::command;
use crate::error::ServiceError;

pub trait SpeechSynthesizer: Send + Sync {
    /// Writes audio for `text` spoken in `lang` to `out` and returns the path written.
    fn synthesize(&self, text: &str, lang: &str, out: &Path) -> Result<PathBuf, ServiceError>;
}

/// espeak-ng compatible CLI: `<program> -v <lang> -w <out.wav> <text>`.
#[derive(Debug, Clone)]
pub struct CommandSpeech {
    pub program: String,
    pub timeout: Duration,
}

impl CommandSpeech {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), timeout: Duration::from_secs(120) }
    }
}

impl SpeechSynthesizer for CommandSpeech {
    fn synthesize(&self, text: &str, lang: &str, out: &Path) -> Result<PathBuf, ServiceError> {
        if text.trim().is_empty() {
            return Err(ServiceError::EmptyResult { service: "speech" });
        }
        let mut cmd = Command::new(&self.program);
        cmd.arg("-v").arg(lang).arg("-w").arg(out).arg(text);
        command::run(cmd, "speech", Some(self.timeout))?;
        if !out.exists() {
            return Err(ServiceError::Failed {
                service: "speech",
                reason: format!("{} produced no audio at {}", self.program, out.display()),
            });
        }
        Ok(out.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_program_is_unavailable() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let speech = CommandSpeech::new("no-such-tts-engine-xyz");
        let err = speech
            .synthesize("hello there", "en", &temp_dir.path().join("out.wav"))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable { service: "speech", .. }));
        Ok(())
    }

    #[test]
    fn test_empty_text_rejected() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let err = CommandSpeech::new("espeak-ng")
            .synthesize("   ", "ur", &temp_dir.path().join("out.wav"))
            .unwrap_err();
        assert_eq!(err, ServiceError::EmptyResult { service: "speech" });
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_program_that_writes_nothing_fails() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        // `true` ignores its arguments and exits 0 without creating the file
        let err = CommandSpeech::new("true")
            .synthesize("hello", "en", &temp_dir.path().join("out.wav"))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Failed { service: "speech", .. }));
        Ok(())
    }
}
