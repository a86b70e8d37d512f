use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tf_idf_similarity::{PipelineConfig, SimilarityPipeline, Trace};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    /// Human readable trace
    Text,
    /// One JSON object
    Json,
}

/// Build a TF-IDF similarity index over a corpus and query it with one document.
///
/// Without arguments the built-in nine-document corpus is queried with
/// "Human computer interaction".
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON file with a PipelineConfig; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Query document, overrides the config
    #[arg(long)]
    query: Option<String>,

    /// Also print the best N hits, ranked
    #[arg(long)]
    num_best: Option<usize>,

    /// Also print the document-vs-document similarity matrix
    #[arg(long)]
    matrix: bool,

    /// Output format of the trace
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

fn main() -> Result<()> {
    // logs go to stderr so the trace on stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tf_idf_similarity=info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    config.apply_overrides(args.query, args.num_best, args.matrix);

    let build_start = Instant::now();
    let pipeline: SimilarityPipeline =
        SimilarityPipeline::build(&config).context("building similarity pipeline")?;
    let build_ms = build_start.elapsed().as_secs_f64() * 1000.0;

    let query_start = Instant::now();
    let result = pipeline.query(&config.query);
    let query_ms = query_start.elapsed().as_secs_f64() * 1000.0;
    info!(build_ms, query_ms, "done");

    let mut trace = Trace::new(&pipeline, &config.query, result, config.num_best);
    if config.similarity_matrix {
        trace = trace.with_matrix(pipeline.similarity_matrix());
    }
    match args.format {
        Format::Text => print!("{}", trace),
        Format::Json => println!(
            "{}",
            serde_json::to_string_pretty(&trace).context("serializing trace")?
        ),
    }
    Ok(())
}
