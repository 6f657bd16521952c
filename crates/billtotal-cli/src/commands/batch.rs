//! Batch processing command for many OCR text files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use billtotal_core::models::config::BillTotalConfig;
use billtotal_core::{ExtractionResult, TotalParser, TotalResponse};

use super::load_config;
use super::total::{format_result, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern of OCR text files
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file results
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    result: Option<ExtractionResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let parser = Arc::new(config.parser()?);

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_text_file(p))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut tasks = JoinSet::new();
    for (index, path) in files.into_iter().enumerate() {
        let parser = Arc::clone(&parser);
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await;
            (index, process_single_file(path, &parser).await)
        });
    }

    let mut results = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = joined?;
        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                progress.abandon();
                anyhow::bail!("Processing failed: {}", error_msg);
            }
        }
        results.push((index, result));
        progress.inc(1);
    }
    progress.finish_with_message("Complete");

    results.sort_by_key(|(index, _)| *index);
    let results: Vec<ProcessResult> = results.into_iter().map(|(_, r)| r).collect();

    if let Some(output_dir) = &args.output_dir {
        write_outputs(output_dir, &results, &config, args.format)?;
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let found = results
        .iter()
        .filter(|r| r.result.as_ref().is_some_and(|x| x.total.is_some()))
        .count();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} with a total, {} without, {} failed",
        style(found).green(),
        style(results.len() - found - failed.len()).yellow(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn is_text_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"))
}

async fn process_single_file(path: PathBuf, parser: &TotalParser) -> ProcessResult {
    let file_start = Instant::now();
    let outcome = tokio::fs::read_to_string(&path).await;
    let processing_time_ms = || file_start.elapsed().as_millis() as u64;

    match outcome {
        Ok(text) => {
            let result = parser.parse(&text);
            debug!(
                "{}: total {:?} from {} candidates",
                path.display(),
                result.total,
                result.candidates.len()
            );
            ProcessResult {
                path,
                result: Some(result),
                error: None,
                processing_time_ms: processing_time_ms(),
            }
        }
        Err(e) => ProcessResult {
            path,
            result: None,
            error: Some(e.to_string()),
            processing_time_ms: processing_time_ms(),
        },
    }
}

fn write_outputs(
    output_dir: &Path,
    results: &[ProcessResult],
    config: &BillTotalConfig,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let extension = match format {
        OutputFormat::Json => "json",
        OutputFormat::Csv => "csv",
        OutputFormat::Text => "txt",
    };

    for process_result in results {
        let content = match (&process_result.result, &process_result.error, format) {
            (Some(result), _, _) => format_result(result, config, format, true)?,
            (None, Some(error), OutputFormat::Json) => {
                format!("{}\n", serde_json::to_string(&TotalResponse::failed(error.as_str()))?)
            }
            _ => continue,
        };
        let output_name = process_result
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("receipt");
        let output_path = output_dir.join(format!("{}.{}", output_name, extension));

        fs::write(&output_path, content)?;
        debug!("Wrote output to {}", output_path.display());
    }

    Ok(())
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "total",
        "currency",
        "keyword_backed",
        "candidates",
        "processing_time_ms",
        "error",
    ])?;

    for process_result in results {
        let filename = process_result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        match &process_result.result {
            Some(result) => {
                let status = if result.total.is_some() { "found" } else { "missing" };
                wtr.write_record([
                    filename,
                    status,
                    &result.total.map(|t| t.to_string()).unwrap_or_default(),
                    result.currency.as_deref().unwrap_or(""),
                    &result.is_keyword_backed().to_string(),
                    &result.candidates.len().to_string(),
                    &process_result.processing_time_ms.to_string(),
                    "",
                ])?;
            }
            None => {
                wtr.write_record([
                    filename,
                    "error",
                    "",
                    "",
                    "",
                    "",
                    &process_result.processing_time_ms.to_string(),
                    process_result.error.as_deref().unwrap_or(""),
                ])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
