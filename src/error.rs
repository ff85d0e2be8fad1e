// Typed failures for the analysis pipeline and the services it calls.
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The backing binary or model is not installed / not reachable.
    #[error("{service} is unavailable: {reason}")]
    Unavailable { service: &'static str, reason: String },
    #[error("{service} failed: {reason}")]
    Failed { service: &'static str, reason: String },
    #[error("{service} returned an empty result")]
    EmptyResult { service: &'static str },
    #[error("{service} timed out after {secs}s")]
    Timeout { service: &'static str, secs: u64 },
}

impl ServiceError {
    pub fn service(&self) -> &'static str {
        match self {
            ServiceError::Unavailable { service, .. }
            | ServiceError::Failed { service, .. }
            | ServiceError::EmptyResult { service }
            | ServiceError::Timeout { service, .. } => service,
        }
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input has {words} words, at least {min} are required")]
    InsufficientInput { words: usize, min: usize },
    #[error("no input text provided")]
    EmptyInput,
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
    #[error("speech synthesis failed: {0}")]
    Speech(#[source] ServiceError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_names_service() {
        let err = ServiceError::Timeout { service: "ollama", secs: 5 };
        assert_eq!(err.service(), "ollama");
        assert_eq!(err.to_string(), "ollama timed out after 5s");
    }

    #[test]
    fn test_insufficient_input_message() {
        let err = PipelineError::InsufficientInput { words: 3, min: 10 };
        assert_eq!(err.to_string(), "input has 3 words, at least 10 are required");
    }
}
