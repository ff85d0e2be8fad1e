// One submission in, one report out: gate, analyze, explain, translate, speak.
use std::path::PathBuf;
use std::sync::Arc;

use rand::Rng;
use tracing::info;

use crate::analysis::analyze;
use crate::config::Config;
use crate::error::{PipelineError, Result, ServiceError};
use crate::explain::Assembler;
use crate::nlp::NlpService;
use crate::report::Report;
use crate::speech::SpeechSynthesizer;
use crate::text::word_count;
use crate::translate::TranslationMap;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub urdu: bool,
    /// Where to write synthesized audio; no speech when unset.
    pub speak_to: Option<PathBuf>,
    pub source: Option<String>,
}

/// Service handles are built once by the caller and shared across runs.
pub struct Pipeline {
    nlp: Arc<dyn NlpService>,
    assembler: Assembler,
    translator: TranslationMap,
    speech: Option<Arc<dyn SpeechSynthesizer>>,
    config: Config,
}

impl Pipeline {
    pub fn new(nlp: Arc<dyn NlpService>, config: Config) -> Self {
        let translator = config.translation.clone().map(TranslationMap::from).unwrap_or_default();
        Self {
            nlp,
            assembler: Assembler::new(),
            translator,
            speech: None,
            config,
        }
    }

    pub fn with_assembler(mut self, assembler: Assembler) -> Self {
        self.assembler = assembler;
        self
    }

    pub fn with_speech(mut self, speech: Arc<dyn SpeechSynthesizer>) -> Self {
        self.speech = Some(speech);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn translator(&self) -> &TranslationMap {
        &self.translator
    }

    /// Rejects empty or too-short input. Runs before any service is touched.
    pub fn check_input(&self, text: &str) -> Result<usize> {
        if text.trim().is_empty() {
            return Err(PipelineError::EmptyInput);
        }
        let words = word_count(text);
        if words < self.config.min_words {
            return Err(PipelineError::InsufficientInput { words, min: self.config.min_words });
        }
        Ok(words)
    }

    pub fn run<R: Rng + ?Sized>(&self, text: &str, opts: &RunOptions, rng: &mut R) -> Result<Report> {
        let word_count = self.check_input(text)?;
        info!(word_count, urdu = opts.urdu, speech = opts.speak_to.is_some(), "running pipeline");

        let analysis = analyze(self.nlp.as_ref(), text, &self.config);
        let explanation = self.assembler.assemble(&analysis, rng);
        let translation = opts.urdu.then(|| self.translator.translate(&explanation.text));

        let audio = match &opts.speak_to {
            Some(out) => {
                let speech = self.speech.as_ref().ok_or_else(|| {
                    PipelineError::Speech(ServiceError::Unavailable {
                        service: "speech",
                        reason: String::from("no synthesizer configured"),
                    })
                })?;
                let (spoken, lang) = match &translation {
                    Some(t) => (t.as_str(), "ur"),
                    None => (explanation.text.as_str(), "en"),
                };
                info!(lang, out = %out.display(), "synthesizing speech");
                Some(speech.synthesize(spoken, lang, out).map_err(PipelineError::Speech)?)
            }
            None => None,
        };

        let notices = analysis.notices.iter().chain(&explanation.notices).cloned().collect();
        Ok(Report {
            source: opts.source.clone(),
            word_count,
            analysis,
            explanation,
            translation,
            audio,
            notices,
        })
    }

    pub fn insights<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> Result<String> {
        self.check_input(text)?;
        let analysis = analyze(self.nlp.as_ref(), text, &self.config);
        Ok(self.assembler.insights(&analysis, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tests::NoSummarizer;
    use crate::nlp::{LocalNlp, Readability, Sentiment};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::BTreeMap;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TEXT: &str = "Climate change is one of the most significant challenges facing our global community today. \
                        Nations in Europe and Asia are working to reduce emissions.";

    #[derive(Default)]
    struct CountingNlp {
        calls: AtomicUsize,
    }

    impl CountingNlp {
        fn hit(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    impl NlpService for CountingNlp {
        fn entities(&self, t: &str) -> std::result::Result<BTreeMap<String, Vec<String>>, ServiceError> {
            self.hit();
            LocalNlp.entities(t)
        }
        fn pos_distribution(&self, t: &str) -> std::result::Result<BTreeMap<String, usize>, ServiceError> {
            self.hit();
            LocalNlp.pos_distribution(t)
        }
        fn noun_phrases(&self, t: &str) -> std::result::Result<Vec<String>, ServiceError> {
            self.hit();
            LocalNlp.noun_phrases(t)
        }
        fn verbs(&self, t: &str) -> std::result::Result<Vec<String>, ServiceError> {
            self.hit();
            LocalNlp.verbs(t)
        }
        fn key_tokens(&self, s: &str) -> std::result::Result<Vec<String>, ServiceError> {
            self.hit();
            LocalNlp.key_tokens(s)
        }
        fn sentiment(&self, t: &str) -> std::result::Result<Sentiment, ServiceError> {
            self.hit();
            LocalNlp.sentiment(t)
        }
        fn summarize(&self, t: &str, max: usize, min: usize) -> std::result::Result<String, ServiceError> {
            self.hit();
            LocalNlp.summarize(t, max, min)
        }
        fn readability(&self, t: &str) -> std::result::Result<Readability, ServiceError> {
            self.hit();
            LocalNlp.readability(t)
        }
    }

    struct RecordingSpeech;

    impl SpeechSynthesizer for RecordingSpeech {
        fn synthesize(&self, text: &str, lang: &str, out: &Path) -> std::result::Result<PathBuf, ServiceError> {
            std::fs::write(out, format!("{lang}:{text}"))
                .map_err(|e| ServiceError::Failed { service: "speech", reason: e.to_string() })?;
            Ok(out.to_path_buf())
        }
    }

    #[test]
    fn test_short_input_rejected_before_services() {
        let nlp = Arc::new(CountingNlp::default());
        let pipeline = Pipeline::new(nlp.clone(), Config::default());
        let err = pipeline
            .run("only five words right here", &RunOptions::default(), &mut StdRng::seed_from_u64(0))
            .unwrap_err();
        assert!(matches!(err, PipelineError::InsufficientInput { words: 5, min: 10 }));
        assert_eq!(nlp.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_exactly_min_words_accepted() {
        let pipeline = Pipeline::new(Arc::new(CountingNlp::default()), Config::default());
        assert_eq!(pipeline.check_input("one two three four five six seven eight nine ten").unwrap(), 10);
        assert!(matches!(
            pipeline.check_input("one two three four five six seven eight nine"),
            Err(PipelineError::InsufficientInput { words: 9, min: 10 })
        ));
    }

    #[test]
    fn test_urdu_input_passes_gate() {
        let pipeline = Pipeline::new(Arc::new(LocalNlp), Config::default());
        assert_eq!(pipeline.check_input("یہ ایک بہت اچھی کتاب ہے جو میں نے کل رات پڑھی").unwrap(), 12);
    }

    #[test]
    fn test_accented_words_counted_once() {
        let cfg = Config { min_words: 13, ..Config::default() };
        let pipeline = Pipeline::new(Arc::new(LocalNlp), cfg);
        let text = "café naïve brûlée crème façade jalapeño résumé déjà über señor piñata fiancée";
        assert!(matches!(
            pipeline.check_input(text),
            Err(PipelineError::InsufficientInput { words: 12, min: 13 })
        ));
    }

    #[test]
    fn test_blank_input_rejected() {
        let pipeline = Pipeline::new(Arc::new(LocalNlp), Config::default());
        let err = pipeline.run(" \n ", &RunOptions::default(), &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyInput));
    }

    #[test]
    fn test_full_run_with_urdu() {
        let pipeline = Pipeline::new(Arc::new(LocalNlp), Config::default());
        let opts = RunOptions { urdu: true, ..RunOptions::default() };
        let report = pipeline.run(TEXT, &opts, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(report.word_count, 24);
        let translation = report.translation.unwrap();
        assert!(translation.contains("ہے"));
        assert!(report.analysis.entities["GPE"].contains(&"Europe".to_string()));
        assert!(report.notices.is_empty());
    }

    #[test]
    fn test_summarizer_failure_does_not_fail_run() {
        let pipeline = Pipeline::new(Arc::new(NoSummarizer), Config::default());
        let report = pipeline.run(TEXT, &RunOptions::default(), &mut StdRng::seed_from_u64(2)).unwrap();
        assert_eq!(
            report.analysis.summary.text,
            "Climate change is one of the most significant challenges facing our global community today."
        );
        assert_eq!(report.notices.len(), 1);
    }

    #[test]
    fn test_speech_uses_urdu_when_translated() -> anyhow::Result<()> {
        let temp_dir = tempfile::TempDir::new()?;
        let out = temp_dir.path().join("speech.wav");
        let pipeline = Pipeline::new(Arc::new(LocalNlp), Config::default()).with_speech(Arc::new(RecordingSpeech));
        let opts = RunOptions { urdu: true, speak_to: Some(out.clone()), source: None };
        let report = pipeline.run(TEXT, &opts, &mut StdRng::seed_from_u64(4))?;
        assert_eq!(report.audio.as_deref(), Some(out.as_path()));
        assert!(std::fs::read_to_string(&out)?.starts_with("ur:"));
        Ok(())
    }

    #[test]
    fn test_speech_without_synthesizer_is_error() {
        let pipeline = Pipeline::new(Arc::new(LocalNlp), Config::default());
        let opts = RunOptions { speak_to: Some(PathBuf::from("x.wav")), ..RunOptions::default() };
        let err = pipeline.run(TEXT, &opts, &mut StdRng::seed_from_u64(4)).unwrap_err();
        assert!(matches!(err, PipelineError::Speech(ServiceError::Unavailable { .. })));
    }

    #[test]
    fn test_config_translation_override() {
        let mut words = BTreeMap::new();
        words.insert("climate".to_string(), "آب و ہوا".to_string());
        let cfg = Config { translation: Some(words), ..Config::default() };
        let pipeline = Pipeline::new(Arc::new(LocalNlp), cfg);
        assert_eq!(pipeline.translator().translate("Climate is"), "آب و ہوا is");
    }

    #[test]
    fn test_insights_respects_gate() {
        let pipeline = Pipeline::new(Arc::new(LocalNlp), Config::default());
        assert!(pipeline.insights("too short", &mut StdRng::seed_from_u64(0)).is_err());
        let text = pipeline.insights(TEXT, &mut StdRng::seed_from_u64(0)).unwrap();
        assert!(!text.is_empty());
    }
}
