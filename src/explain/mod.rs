//! Turns an [`AnalysisResult`] into a multi-section prose explanation.
//!
//! Template choice goes through a caller-supplied [`Rng`], so a seeded generator
//! gives reproducible output. An optional [`TextGenerator`] may reword the
//! result; if it fails the template text is returned unchanged.
pub mod templates;

use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::AnalysisResult;
use crate::generate::{paraphrase_prompt, TextGenerator};
use templates::{fill, pick};

const NONE_IDENTIFIED: &str = "(none identified)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub sections: Vec<Section>,
    /// Final text: the joined sections, or the generator's rewording of them.
    pub text: String,
    pub generated: bool,
    pub notices: Vec<String>,
}

fn join_first(items: &[String], n: usize, sep: &str) -> String {
    if items.is_empty() {
        NONE_IDENTIFIED.to_string()
    } else {
        items.iter().take(n).map(String::as_str).collect::<Vec<_>>().join(sep)
    }
}

#[derive(Default, Clone)]
pub struct Assembler {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_generator(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator: Some(generator) }
    }

    pub fn assemble<R: Rng + ?Sized>(&self, analysis: &AnalysisResult, rng: &mut R) -> Explanation {
        let mut sections = vec![
            self.overview(analysis, rng),
            self.entity_breakdown(analysis, rng),
            self.context(analysis, rng),
        ];
        if analysis.sentences.len() > 1 {
            sections.push(self.sentence_breakdown(analysis));
        }
        sections.push(self.sentiment(analysis, rng));
        sections.push(Section {
            title: String::from("Summary"),
            body: format!("Summary: {}", analysis.summary.text),
        });
        sections.push(self.conclusion(analysis, rng));

        let text = sections.iter().map(|s| s.body.as_str()).collect::<Vec<_>>().join("\n\n");
        let mut explanation = Explanation { sections, text, generated: false, notices: Vec::new() };

        if let Some(generator) = &self.generator {
            match generator.generate(&paraphrase_prompt(&explanation.text)) {
                Ok(reworded) => {
                    explanation.text = reworded;
                    explanation.generated = true;
                }
                Err(e) => {
                    warn!(error = %e, "generation failed, keeping template explanation");
                    explanation
                        .notices
                        .push(format!("text generation unavailable ({e}); showing the template explanation."));
                }
            }
        }
        explanation
    }

    fn overview<R: Rng + ?Sized>(&self, a: &AnalysisResult, rng: &mut R) -> Section {
        let template = pick(rng, &templates::OVERVIEW);
        debug!(template, "overview template");
        let body = fill(
            template,
            &[
                ("phrases", join_first(&a.noun_phrases, 5, ", ").as_str()),
                ("words", a.linguistic.total_words.to_string().as_str()),
                ("sentences", a.sentences.len().max(1).to_string().as_str()),
            ],
        );
        Section { title: String::from("Overview"), body }
    }

    fn entity_breakdown<R: Rng + ?Sized>(&self, a: &AnalysisResult, rng: &mut R) -> Section {
        let title = String::from("Key Entities");
        if a.entity_count() == 0 {
            return Section { title, body: templates::ENTITY_EMPTY.to_string() };
        }
        let labels: Vec<String> = a.entities.keys().cloned().collect();
        let mut body = fill(
            pick(rng, &templates::ENTITY_HEADER),
            &[("count", a.entity_count().to_string().as_str()), ("labels", labels.join(", ").as_str())],
        );
        for (label, names) in a.entities.iter().filter(|(_, v)| !v.is_empty()) {
            body.push_str(&format!("\n- {label} Entities: {}", join_first(names, 3, ", ")));
        }
        Section { title, body }
    }

    fn context<R: Rng + ?Sized>(&self, a: &AnalysisResult, rng: &mut R) -> Section {
        let template = pick(rng, &templates::CONTEXT);
        debug!(template, "context template");
        let line = fill(
            template,
            &[
                ("topics", join_first(&a.noun_phrases, 3, " and ").as_str()),
                ("verbs", join_first(&a.verbs, 3, " and ").as_str()),
            ],
        );
        Section { title: String::from("Contextual Analysis"), body: format!("Contextual Analysis:\n{line}") }
    }

    fn sentence_breakdown(&self, a: &AnalysisResult) -> Section {
        let mut body = String::from("Sentence-Level Insights:");
        for (i, s) in a.sentences.iter().enumerate() {
            body.push_str(&format!(
                "\nSentence {}: {}\nKey Elements: {}",
                i + 1,
                s.text,
                join_first(&s.key_tokens, usize::MAX, ", ")
            ));
        }
        Section { title: String::from("Sentence-Level Insights"), body }
    }

    fn sentiment<R: Rng + ?Sized>(&self, a: &AnalysisResult, rng: &mut R) -> Section {
        let mut body = fill(
            pick(rng, &templates::SENTIMENT),
            &[
                ("polarity", format!("{:.2}", a.sentiment.polarity).as_str()),
                ("label", a.sentiment.label()),
                ("subjectivity", format!("{:.2}", a.sentiment.subjectivity).as_str()),
            ],
        );
        match a.readability {
            Some(r) => body.push_str(&format!(
                " Readability: Flesch reading ease {:.1}, grade level {:.1}.",
                r.reading_ease, r.grade_level
            )),
            None => body.push_str(" Readability could not be computed."),
        }
        Section { title: String::from("Sentiment"), body }
    }

    fn conclusion<R: Rng + ?Sized>(&self, a: &AnalysisResult, rng: &mut R) -> Section {
        let body = fill(
            pick(rng, &templates::CONCLUSION),
            &[
                ("topics", join_first(&a.noun_phrases, 2, " and ").as_str()),
                ("verbs", join_first(&a.verbs, 2, " and ").as_str()),
            ],
        );
        Section { title: String::from("Conclusion"), body }
    }

    /// One short narrative paragraph about the text's character.
    pub fn insights<R: Rng + ?Sized>(&self, a: &AnalysisResult, rng: &mut R) -> String {
        let complexity = if a.linguistic.avg_sentence_length > 15.0 {
            "intricate linguistic patterns"
        } else {
            "concise communication"
        };
        let tone = if a.sentiment.polarity.abs() > 0.5 { "emotionally charged" } else { "balanced" };
        let people = a.entities.get("PERSON").map(Vec::as_slice).unwrap_or(&[]);

        fill(
            pick(rng, &templates::INSIGHTS),
            &[
                ("complexity_description", complexity),
                ("entities", join_first(people, 3, ", ").as_str()),
                ("sentiment_tone", tone),
                ("key_phrases", join_first(&a.noun_phrases, 3, ", ").as_str()),
                ("linguistic_characteristics", "brevity and depth"),
                ("thematic_elements", "contemporary discourse"),
            ],
        )
    }
}
