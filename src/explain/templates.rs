// Prose templates. Placeholders are `{name}` and are filled by `fill`.
use rand::seq::SliceRandom;
use rand::Rng;

pub const OVERVIEW: [&str; 3] = [
    "Overview: The text discusses a topic that involves key elements such as: {phrases}. \
     It runs to {words} words over {sentences} sentence(s).",
    "Overview: Across {sentences} sentence(s) and {words} words, the text centres on {phrases}.",
    "Overview: At its core the text is about {phrases}, told in {words} words.",
];

pub const ENTITY_HEADER: [&str; 2] = [
    "Key Entities Breakdown:",
    "Key Entities Breakdown: {count} named entities were found across {labels}.",
];

pub const ENTITY_EMPTY: &str = "Key Entities Breakdown:\nNo named entities were detected.";

pub const CONTEXT: [&str; 3] = [
    "The text explores the interconnection between {topics} through multiple perspectives.",
    "Key actions and themes include: {verbs}, which provide insight into the core message.",
    "The narrative weaves together concepts of {topics} to communicate its central idea.",
];

pub const SENTIMENT: [&str; 2] = [
    "Sentiment Analysis: The text has a polarity of {polarity} ({label}) with a subjectivity of {subjectivity}.",
    "Sentiment Analysis: Overall the tone reads as {label} (polarity {polarity}, subjectivity {subjectivity}).",
];

pub const CONCLUSION: [&str; 3] = [
    "Conclusion: The text fundamentally revolves around {topics}, highlighting the importance of {verbs} \
     in understanding the core message.",
    "Conclusion: Taken together, the text centres on {topics} and is driven by actions such as {verbs}.",
    "Conclusion: {topics} sit at the heart of the text, with {verbs} carrying its message forward.",
];

pub const INSIGHTS: [&str; 3] = [
    "The text reveals a complex narrative characterized by {complexity_description}. \
     Key entities such as {entities} play a pivotal role in understanding its deeper meaning.",
    "Diving into the linguistic landscape, we uncover a {sentiment_tone} exploration \
     that touches upon critical themes like {key_phrases}.",
    "This text is a nuanced composition that balances {linguistic_characteristics}, \
     offering insights into {thematic_elements}.",
];

/// Uniform choice among `candidates`.
pub fn pick<R: Rng + ?Sized>(rng: &mut R, candidates: &[&'static str]) -> &'static str {
    candidates.choose(rng).copied().unwrap_or_default()
}

pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in values {
        out = out.replace(&format!("{{{name}}}"), value);
    }
    out
}
