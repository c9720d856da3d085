//! CLI: generate evolved questions, answers and contexts from text files.
//!
//! Usage: `evolve_docs [OPTIONS] <FILES>...`
//! Example: evolve_docs --model llama3.2 --pretty notes/*.md
//!
//! Prints the generation result as JSON on stdout (or to --output). Logs go to
//! stderr; set RUST_LOG=evolweave=debug for per-call events.

use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use evolweave::config::{ENV_API_BASE, ENV_API_KEY, ENV_MODEL, ENV_TEMPERATURE, ENV_TIMEOUT_SECS};
use evolweave::stage_log_io::save_stage_log;
use evolweave::{ChatCompletionClient, CompletionConfig, Document, EvolPipeline};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Generate Evol-Instruct style questions, answers and contexts from documents.
#[derive(Parser, Debug)]
#[command(name = "evolve_docs")]
#[command(
  after_help = r#"Environment variables (override the matching flags when set):
  EVOLWEAVE_API_BASE      Base URL of an OpenAI-compatible API (default: http://localhost:11434/v1)
  EVOLWEAVE_API_KEY       Bearer token sent with every request
  EVOLWEAVE_MODEL         Model name (default: llama3.2)
  EVOLWEAVE_TEMPERATURE   Sampling temperature (default: 0.7)
  EVOLWEAVE_MAX_TOKENS    Max tokens per completion
  EVOLWEAVE_TIMEOUT_SECS  Per-request timeout in seconds (default: 60)

Examples:
  evolve_docs docs/a.txt docs/b.txt
  evolve_docs --output result.json --stage-log run/stage_log.json docs/*.md"#
)]
struct Args {
  /// Base URL of the completion API. Overridden by EVOLWEAVE_API_BASE if set.
  #[arg(long, value_name = "URL")]
  api_base: Option<String>,

  /// Model name. Overridden by EVOLWEAVE_MODEL if set.
  #[arg(long, value_name = "NAME")]
  model: Option<String>,

  /// API key. Overridden by EVOLWEAVE_API_KEY if set.
  #[arg(long, value_name = "KEY")]
  api_key: Option<String>,

  /// Sampling temperature. Overridden by EVOLWEAVE_TEMPERATURE if set.
  #[arg(long, value_name = "T")]
  temperature: Option<f32>,

  /// Per-request timeout. Overridden by EVOLWEAVE_TIMEOUT_SECS if set.
  #[arg(long, value_name = "SECS")]
  timeout_secs: Option<u64>,

  /// Write the result JSON here instead of stdout.
  #[arg(long, value_name = "PATH")]
  output: Option<PathBuf>,

  /// Also write a per-stage log as JSON.
  #[arg(long, value_name = "PATH")]
  stage_log: Option<PathBuf>,

  /// Pretty-print the result JSON.
  #[arg(long)]
  pretty: bool,

  /// Text files to process, in order.
  #[arg(value_name = "FILES", required = true)]
  files: Vec<PathBuf>,
}

/// Flag values keyed like the environment, so flags and env share one override path.
fn flag_value(args: &Args, key: &str) -> Option<String> {
  match key {
    ENV_API_BASE => args.api_base.clone(),
    ENV_API_KEY => args.api_key.clone(),
    ENV_MODEL => args.model.clone(),
    ENV_TEMPERATURE => args.temperature.map(|t| t.to_string()),
    ENV_TIMEOUT_SECS => args.timeout_secs.map(|t| t.to_string()),
    _ => None,
  }
}

fn read_document(path: &Path) -> Result<Document, std::io::Error> {
  let text = fs::read_to_string(path)?;
  let filename = path
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_else(|| path.display().to_string());
  let size = text.len() as u64;
  Ok(
    Document::new(text)
      .with_metadata("filename", filename)
      .with_metadata("size", size),
  )
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  // Env vars override flags.
  let config = CompletionConfig::default()
    .with_overrides(|key| flag_value(&args, key))
    .and_then(|c| c.with_overrides(|key| std::env::var(key).ok()));
  let config = match config {
    Ok(c) => c,
    Err(e) => {
      eprintln!("Configuration error: {}", e);
      process::exit(1);
    }
  };
  info!(api_base = %config.api_base, model = %config.model, "options (env or flags)");

  let mut documents = Vec::with_capacity(args.files.len());
  for path in &args.files {
    match read_document(path) {
      Ok(doc) => documents.push(doc),
      Err(e) => {
        eprintln!("Error reading {}: {}", path.display(), e);
        process::exit(1);
      }
    }
  }

  let client = match ChatCompletionClient::new(config) {
    Ok(c) => c,
    Err(e) => {
      eprintln!("Error creating client: {}", e);
      process::exit(1);
    }
  };
  let pipeline = match EvolPipeline::new(Arc::new(client)) {
    Ok(p) => p,
    Err(e) => {
      eprintln!("Pipeline error: {}", e);
      process::exit(1);
    }
  };

  let (result, log) = pipeline.run_logged(documents).await;
  if let Some(path) = &args.stage_log {
    if let Err(e) = save_stage_log(path, &log) {
      eprintln!("Error writing {}: {}", path.display(), e);
      process::exit(1);
    }
  }
  let result = match result {
    Ok(r) => r,
    Err(e) => {
      eprintln!("Pipeline error: {}", e);
      process::exit(1);
    }
  };

  info!(
    total_questions = result.generation_metadata.total_questions,
    errors = result.generation_metadata.processing_errors.len(),
    "pipeline completed"
  );

  let json = if args.pretty {
    serde_json::to_string_pretty(&result)
  } else {
    serde_json::to_string(&result)
  };
  let json = match json {
    Ok(j) => j,
    Err(e) => {
      eprintln!("Error serializing result: {}", e);
      process::exit(1);
    }
  };

  match &args.output {
    Some(path) => {
      if let Err(e) = fs::write(path, json) {
        eprintln!("Error writing {}: {}", path.display(), e);
        process::exit(1);
      }
    }
    None => println!("{}", json),
  }
}
