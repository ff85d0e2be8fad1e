// text-explainer: analyze a block of text and explain it in prose, optionally in Urdu and aloud.
mod analysis;
mod command;
mod config;
mod error;
mod explain;
mod generate;
mod nlp;
mod pipeline;
mod report;
mod speech;
mod text;
mod translate;

use std::io::{IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use config::Config;
use explain::Assembler;
use generate::{probe_smallest_model, OllamaGenerator};
use nlp::LocalNlp;
use pipeline::{Pipeline, RunOptions};
use report::{ExportFormat, Report};
use speech::CommandSpeech;
use text::{read_file_content, SUPPORTED_EXTS};

#[derive(Parser)]
#[command(name = "text-explainer", about = "Explain a block of text: entities, sentiment, summary, Urdu words and speech")]
struct Cli {
    /// JSON config file; flags override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Log pipeline decisions (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Input {
    /// Text to analyze
    #[arg(short, long, conflicts_with = "file")]
    text: Option<String>,
    /// Read text from a txt/md/csv/json/pdf file (stdin when neither is given)
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Full analysis and explanation
    Explain {
        #[command(flatten)]
        input: Input,
        /// Append a word-by-word Urdu rendering
        #[arg(short, long)]
        urdu: bool,
        /// Synthesize the result to this audio file
        #[arg(short, long)]
        speak: Option<PathBuf>,
        /// Ask a local Ollama model to reword the explanation
        #[arg(short, long)]
        generate: bool,
        /// Ollama model override (e.g. gemma3:4b)
        #[arg(short = 'm', long = "model")]
        model: Option<String>,
        /// Seed for template selection; random when omitted
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        min_words: Option<usize>,
        #[arg(long, value_enum, default_value_t = ExportFormat::Text)]
        format: ExportFormat,
        /// Also write the report to this file
        #[arg(short = 'o', long)]
        report: Option<PathBuf>,
    },
    /// Short narrative insight about the text
    Insights {
        #[command(flatten)]
        input: Input,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Word-level Urdu substitution only
    Translate {
        #[command(flatten)]
        input: Input,
    },
    /// Explain every supported file under a directory into one JSON file
    Batch {
        #[arg(short, long)]
        dir: PathBuf,
        #[arg(short, long, default_value = "explanations.json")]
        out: PathBuf,
        #[arg(short, long)]
        urdu: bool,
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Serialize)]
struct BatchFailure {
    path: String,
    error: String,
}

#[derive(Serialize)]
struct BatchOutput {
    reports: Vec<Report>,
    failures: Vec<BatchFailure>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

fn read_input(input: &Input) -> Result<(String, Option<String>)> {
    match (&input.text, &input.file) {
        (Some(t), _) => Ok((t.clone(), None)),
        (None, Some(p)) => {
            let text = read_file_content(p).with_context(|| format!("reading {}", p.display()))?;
            Ok((text, Some(p.to_string_lossy().to_string())))
        }
        (None, None) => {
            let mut s = String::new();
            std::io::stdin().read_to_string(&mut s).context("reading stdin")?;
            Ok((s, None))
        }
    }
}

fn spinner(msg: &'static str) -> Result<ProgressBar> {
    if !std::io::stderr().is_terminal() {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn print_report(report: &Report) -> Result<()> {
    let mut out = StandardStream::stdout(ColorChoice::Auto);
    let heading = |out: &mut StandardStream, title: &str, color: Color| -> Result<()> {
        out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        writeln!(out, "{title}")?;
        out.reset()?;
        Ok(())
    };

    writeln!(out, "{}", report.explanation.text)?;
    if let Some(t) = &report.translation {
        writeln!(out)?;
        heading(&mut out, "Urdu Translation:", Color::Cyan)?;
        writeln!(out, "{t}")?;
    }
    if let Some(a) = &report.audio {
        writeln!(out)?;
        heading(&mut out, "Audio:", Color::Cyan)?;
        writeln!(out, "{}", a.display())?;
    }
    if !report.notices.is_empty() {
        writeln!(out)?;
        heading(&mut out, "Notices:", Color::Yellow)?;
        for n in &report.notices {
            writeln!(out, "- {n}")?;
        }
    }
    Ok(())
}

fn build_pipeline(cfg: Config, generate: bool, model: Option<String>) -> Pipeline {
    let speech = CommandSpeech::new(cfg.speech_command.clone());
    let mut pipeline = Pipeline::new(Arc::new(LocalNlp), cfg).with_speech(Arc::new(speech));
    if generate {
        let cfg = pipeline.config();
        let model = model.unwrap_or_else(|| cfg.resolve_ollama_model(probe_smallest_model));
        info!(%model, "rewording with ollama");
        let generator = OllamaGenerator::new(model, Duration::from_secs(cfg.generation_timeout_secs));
        pipeline = pipeline.with_assembler(Assembler::with_generator(Arc::new(generator)));
    }
    pipeline
}

fn batch_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|s| s.to_str())
                .map(|ext| SUPPORTED_EXTS.contains(&ext))
                .unwrap_or(false)
        })
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();
    files
}

fn run_batch(pipeline: &Pipeline, dir: &Path, out: &Path, urdu: bool, seed: Option<u64>) -> Result<BatchOutput> {
    let files = batch_files(dir);
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {wide_bar} {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let results: Vec<std::result::Result<Report, BatchFailure>> = files
        .par_iter()
        .enumerate()
        .map(|(i, p)| {
            let path = p.to_string_lossy().to_string();
            let opts = RunOptions { urdu, speak_to: None, source: Some(path.clone()) };
            let mut rng = make_rng(seed.map(|s| s.wrapping_add(i as u64)));
            let result = read_file_content(p)
                .and_then(|text| pipeline.run(&text, &opts, &mut rng))
                .map_err(|e| BatchFailure { path, error: e.to_string() });
            pb.inc(1);
            result
        })
        .collect();
    pb.finish_with_message("explaining files");

    let mut output = BatchOutput { reports: Vec::new(), failures: Vec::new() };
    for r in results {
        match r {
            Ok(report) => output.reports.push(report),
            Err(f) => {
                warn!(path = %f.path, error = %f.error, "skipped");
                output.failures.push(f);
            }
        }
    }

    let fout = std::fs::File::create(out).with_context(|| format!("creating {}", out.display()))?;
    serde_json::to_writer_pretty(fout, &output)?;
    Ok(output)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut cfg = Config::load_or_default(cli.config.as_deref())
        .with_context(|| format!("loading config {:?}", cli.config))?;

    match cli.command {
        Commands::Explain { input, urdu, speak, generate, model, seed, min_words, format, report: report_out } => {
            if let Some(n) = min_words {
                cfg.min_words = n;
            }
            let (text, source) = read_input(&input)?;
            let pipeline = build_pipeline(cfg, generate, model);
            let opts = RunOptions { urdu, speak_to: speak, source };

            let pb = spinner("analyzing text")?;
            let result = pipeline.run(&text, &opts, &mut make_rng(seed));
            pb.finish_and_clear();
            let report = result?;

            match format {
                ExportFormat::Text => print_report(&report)?,
                other => println!("{}", report.export(other)?),
            }
            if let Some(path) = report_out {
                report.write_to(&path, format)?;
                eprintln!("Wrote report to {}", path.display());
            }
        }
        Commands::Insights { input, seed } => {
            let (text, _) = read_input(&input)?;
            let pipeline = build_pipeline(cfg, false, None);
            println!("{}", pipeline.insights(&text, &mut make_rng(seed))?);
        }
        Commands::Translate { input } => {
            let (text, _) = read_input(&input)?;
            let pipeline = build_pipeline(cfg, false, None);
            if pipeline.translator().is_empty() {
                return Err(anyhow!("translation table is empty"));
            }
            info!(entries = pipeline.translator().len(), "translating");
            println!("{}", pipeline.translator().translate(&text));
        }
        Commands::Batch { dir, out, urdu, seed } => {
            let pipeline = build_pipeline(cfg, false, None);
            let output = run_batch(&pipeline, &dir, &out, urdu, seed)?;
            println!(
                "Wrote {} reports to {} ({} skipped)",
                output.reports.len(),
                out.display(),
                output.failures.len()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    const LONG: &str = "Natural language processing is a field of artificial intelligence. \
                        It focuses on the interaction between computers and humans through natural language.";

    #[test]
    fn test_cli_parses_explain_flags() {
        let cli = Cli::parse_from([
            "text-explainer", "explain", "--text", "hello", "--urdu", "--seed", "7", "--format", "base64",
        ]);
        match cli.command {
            Commands::Explain { input, urdu, seed, format, .. } => {
                assert_eq!(input.text.as_deref(), Some("hello"));
                assert!(urdu);
                assert_eq!(seed, Some(7));
                assert_eq!(format, ExportFormat::Base64);
            }
            _ => panic!("expected explain"),
        }
    }

    #[test]
    fn test_text_and_file_conflict() {
        let parsed = Cli::try_parse_from(["text-explainer", "translate", "--text", "a", "--file", "b.txt"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_read_input_from_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("in.md");
        let mut f = File::create(&path)?;
        write!(f, "{LONG}")?;
        let (text, source) = read_input(&Input { text: None, file: Some(path.clone()) })?;
        assert_eq!(text, LONG);
        assert_eq!(source, Some(path.to_string_lossy().to_string()));
        Ok(())
    }

    #[test]
    fn test_batch_files_filters_extensions() -> Result<()> {
        let temp_dir = TempDir::new()?;
        File::create(temp_dir.path().join("a.txt"))?;
        File::create(temp_dir.path().join("b.bin"))?;
        std::fs::create_dir(temp_dir.path().join("nested"))?;
        File::create(temp_dir.path().join("nested").join("c.md"))?;
        let files = batch_files(temp_dir.path());
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.extension().unwrap() != "bin"));
        Ok(())
    }

    #[test]
    fn test_run_batch_writes_reports_and_failures() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let docs = temp_dir.path().join("docs");
        std::fs::create_dir(&docs)?;
        std::fs::write(docs.join("long.txt"), LONG)?;
        std::fs::write(docs.join("short.txt"), "too short")?;
        let out = temp_dir.path().join("out.json");

        let pipeline = build_pipeline(Config::default(), false, None);
        let output = run_batch(&pipeline, &docs, &out, true, Some(1))?;
        assert_eq!(output.reports.len(), 1);
        assert_eq!(output.failures.len(), 1);
        assert!(output.failures[0].error.contains("at least 10"));

        let value: serde_json::Value = serde_json::from_reader(File::open(&out)?)?;
        assert_eq!(value["reports"].as_array().map(Vec::len), Some(1));
        assert!(value["reports"][0]["translation"].is_string());
        Ok(())
    }

    #[test]
    fn test_make_rng_seeded_is_stable() {
        use rand::Rng;
        let a: u64 = make_rng(Some(3)).gen();
        let b: u64 = make_rng(Some(3)).gen();
        assert_eq!(a, b);
    }
}
