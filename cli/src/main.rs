use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use keyrank_core::persist::{import_export, load_model_dir, save_meta, save_model, MetaFile, ModelPaths, MODEL_VERSION};
use keyrank_core::stats::{text_statistics, word_frequencies, DEFAULT_TOP_WORDS};
use keyrank_core::{KeywordExtractor, KeywordRanking, TextStatistics, VocabularyModel, WordFrequency, DEFAULT_TOP_N};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use std::fs;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "keyrank")]
#[command(about = "Extract TF-IDF keywords from text with a pre-fitted vocabulary", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Model directory
    #[arg(long, default_value = "./model")]
    model: String,
    /// Text to analyze
    #[arg(long, conflicts_with = "file")]
    text: Option<String>,
    /// Read text from a file (stdin when neither --text nor --file is given)
    #[arg(long)]
    file: Option<String>,
    /// Number of keywords to return
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top_n: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a JSON export ({"terms": [...], "idf": [...]}) into a model directory
    Import {
        /// Exported vocabulary and idf weights
        #[arg(long)]
        input: String,
        /// Output model directory
        #[arg(long)]
        output: String,
    },
    /// Show a summary of a model directory
    Inspect {
        #[arg(long, default_value = "./model")]
        model: String,
        /// How many of the highest-idf terms to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Print the top keywords of a text
    Extract {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Keywords plus word frequencies and text statistics
    Analyze {
        #[command(flatten)]
        input: InputArgs,
        /// Number of most frequent words to list
        #[arg(long, default_value_t = DEFAULT_TOP_WORDS)]
        top_words: usize,
        /// Emit a single JSON document
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Serialize)]
struct Analysis {
    keywords: KeywordRanking,
    word_frequencies: Vec<WordFrequency>,
    statistics: TextStatistics,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Import { input, output } => import_model(&input, &output),
        Commands::Inspect { model, top } => inspect(&model, top),
        Commands::Extract { input } => {
            let Some((extractor, text)) = prepare(&input)? else { return Ok(()) };
            for kw in extractor.extract(&text, input.top_n).iter() {
                println!("{}: {}", kw.term, kw.score);
            }
            Ok(())
        }
        Commands::Analyze { input, top_words, json } => {
            let Some((extractor, text)) = prepare(&input)? else { return Ok(()) };
            let analysis = analyze(&extractor, &text, input.top_n, top_words);
            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_analysis(&analysis);
            }
            Ok(())
        }
    }
}

fn import_model(input: &str, output: &str) -> Result<()> {
    let model = import_export(input)?;
    let paths = ModelPaths::new(output);
    save_model(&paths, &model)?;
    let meta = MetaFile {
        num_terms: model.len(),
        created_at: time::OffsetDateTime::now_utc().format(&time::format_description::well_known::Rfc3339).unwrap_or_else(|_| "".into()),
        version: MODEL_VERSION,
        source: Some(input.to_string()),
    };
    save_meta(&paths, &meta)?;
    tracing::info!(output, terms = model.len(), "model import complete");
    Ok(())
}

fn inspect(model_dir: &str, top: usize) -> Result<()> {
    let (model, meta) = load_model_dir(&ModelPaths::new(model_dir))?;
    println!("terms:      {}", model.len());
    println!("version:    {}", meta.version);
    println!("created_at: {}", meta.created_at);
    if let Some(src) = &meta.source {
        println!("source:     {src}");
    }
    for (term, w) in highest_idf(&model, top) {
        println!("  {term}: {w:.4}");
    }
    Ok(())
}

/// The `top` rarest terms by idf; equal weights list alphabetically.
fn highest_idf(model: &VocabularyModel, top: usize) -> Vec<(&str, f64)> {
    let mut by_idf: Vec<(&str, f64)> = model
        .terms()
        .iter()
        .map(String::as_str)
        .zip(model.idf_weights().iter().copied())
        .collect();
    by_idf.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    by_idf.truncate(top);
    by_idf
}

/// Load the model, then read the input text. A bad model is an error even when there is
/// no text; `None` means the model loaded but there was nothing to analyze.
fn prepare(input: &InputArgs) -> Result<Option<(KeywordExtractor, String)>> {
    let (model, _meta) = load_model_dir(&ModelPaths::new(&input.model))
        .with_context(|| format!("loading model from {}", input.model))?;
    let extractor = KeywordExtractor::new(Arc::new(model));
    let text = read_text(input.text.as_deref(), input.file.as_deref())?;
    if text.is_empty() {
        tracing::warn!("Please enter some text to analyze.");
        return Ok(None);
    }
    Ok(Some((extractor, text)))
}

fn read_text(text: Option<&str>, file: Option<&str>) -> Result<String> {
    if let Some(t) = text {
        return Ok(t.to_string());
    }
    if let Some(f) = file {
        return fs::read_to_string(Path::new(f)).with_context(|| format!("reading {f}"));
    }
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn analyze(extractor: &KeywordExtractor, text: &str, top_n: usize, top_words: usize) -> Analysis {
    Analysis {
        keywords: extractor.extract(text, top_n),
        word_frequencies: word_frequencies(text, top_words),
        statistics: text_statistics(text),
    }
}

fn print_analysis(a: &Analysis) {
    println!("Extracted Keywords:");
    for kw in a.keywords.iter() {
        println!("  {}: {}", kw.term, kw.score);
    }
    println!("Word Frequency Distribution:");
    for wf in &a.word_frequencies {
        println!("  {}: {}", wf.word, wf.count);
    }
    println!("Text Statistics:");
    println!("  Word Count: {}", a.statistics.word_count);
    println!("  Sentence Count: {}", a.statistics.sentence_count);
    println!("  Average Word Length: {:.2}", a.statistics.avg_word_length);
}
