use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use std::path::{Path, PathBuf};

use docoutline::batch::{output_path_for, process_directory, process_file, write_outline};
use docoutline::{Heuristics, PdfLayoutExtractor};

/// Extract a title and heading outline from PDF documents as JSON.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// PDF file, or directory of PDF files
    #[arg(short, long, default_value = "/app/input")]
    input: PathBuf,
    /// Output JSON file, or directory for `<name>.json` results
    #[arg(short, long, default_value = "/app/output")]
    output: PathBuf,
    /// JSON file overriding heuristic weights and thresholds
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Log every pipeline stage
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let heuristics = match &args.config {
        Some(path) => Heuristics::from_json_file(path)
            .with_context(|| format!("Failed to load heuristics from {}", path.display()))?,
        None => Heuristics::default(),
    };

    if args.input.is_dir() {
        let summary = process_directory(&PdfLayoutExtractor, &args.input, &args.output, &heuristics)
            .with_context(|| format!("Failed to process {}", args.input.display()))?;
        log::info!(
            "Done: {} documents, {} failed",
            summary.processed,
            summary.failed
        );
    } else {
        let result = process_file(&PdfLayoutExtractor, &args.input, &heuristics);
        let output = single_output_path(&args.input, &args.output);
        write_outline(&result.into_outline(), &output)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        log::info!("Successfully processed {}", args.input.display());
    }
    Ok(())
}

fn single_output_path(input: &Path, output: &Path) -> PathBuf {
    if output.is_dir() {
        output_path_for(input, output)
    } else {
        output.to_path_buf()
    }
}
