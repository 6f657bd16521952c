//! Total command - find the payable total in one OCR text.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use billtotal_core::models::config::BillTotalConfig;
use billtotal_core::{
    format_amount, split_lines, ExtractionResult, MonetaryCandidate, TotalResponse,
};

use super::{load_config, read_input};

/// Exit code used by `--fail-if-missing`.
const EXIT_NO_TOTAL: i32 = 2;

/// Arguments for the total command.
#[derive(Args)]
pub struct TotalArgs {
    /// OCR text file (default: stdin)
    input: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Include every candidate amount in the output
    #[arg(long)]
    candidates: bool,

    /// Exit with status 2 when no total is found
    #[arg(long)]
    fail_if_missing: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

#[derive(Serialize)]
struct TotalOutput<'a> {
    #[serde(flatten)]
    response: TotalResponse,

    #[serde(skip_serializing_if = "Option::is_none")]
    candidates: Option<&'a [MonetaryCandidate]>,
}

pub fn run(args: TotalArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let parser = config.parser()?;

    info!(
        "Using {} keywords, amounts below {}",
        parser.keywords().len(),
        parser.amounts().max_amount()
    );

    let text = read_input(args.input.as_deref())?;
    info!("Read {} lines of OCR text", split_lines(&text).count());

    let result = parser.parse(&text);
    let output = format_result(&result, &config, args.format, args.candidates)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    if result.total.is_none() && args.fail_if_missing {
        std::process::exit(EXIT_NO_TOTAL);
    }

    Ok(())
}

/// Render an extraction result in the requested format.
pub fn format_result(
    result: &ExtractionResult,
    config: &BillTotalConfig,
    format: OutputFormat,
    with_candidates: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let output = TotalOutput {
                response: to_response(result),
                candidates: with_candidates.then_some(result.candidates.as_slice()),
            };
            Ok(format!("{}\n", serde_json::to_string(&output)?))
        }
        OutputFormat::Csv => format_csv(result, with_candidates),
        OutputFormat::Text => Ok(format_text(result, config, with_candidates)),
    }
}

pub fn to_response(result: &ExtractionResult) -> TotalResponse {
    match result.total {
        Some(total) => TotalResponse::found(total, result.currency.clone()),
        None => TotalResponse::missing(),
    }
}

fn format_csv(result: &ExtractionResult, with_candidates: bool) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    if with_candidates {
        wtr.write_record(["line", "raw_match", "value", "keyword_associated", "currency"])?;
        for candidate in &result.candidates {
            wtr.write_record([
                &(candidate.source_line_index + 1).to_string(),
                &candidate.raw_match,
                &candidate.value.to_string(),
                &candidate.keyword_associated.to_string(),
                candidate.currency.as_deref().unwrap_or(""),
            ])?;
        }
    } else {
        wtr.write_record(["total", "currency", "keyword_backed", "candidates"])?;
        wtr.write_record([
            &result.total.map(|t| t.to_string()).unwrap_or_default(),
            result.currency.as_deref().unwrap_or(""),
            &result.is_keyword_backed().to_string(),
            &result.candidates.len().to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ExtractionResult, config: &BillTotalConfig, with_candidates: bool) -> String {
    let amount_style = config.display.style;
    let mut output = String::new();

    match result.total {
        Some(total) => {
            output.push_str(&format!("Total: {}", format_amount(total, amount_style)));
            if let Some(currency) = &result.currency {
                output.push_str(&format!(" {}", currency));
            }
            output.push('\n');
            if !result.is_keyword_backed() {
                output.push_str("  (no total keyword found, largest amount used)\n");
            }
        }
        None => output.push_str("No total found\n"),
    }

    if with_candidates && !result.candidates.is_empty() {
        output.push_str("\nCandidates:\n");
        for candidate in &result.candidates {
            output.push_str(&format!(
                "  line {:>3}: {:<20} -> {}{}\n",
                candidate.source_line_index + 1,
                candidate.raw_match,
                format_amount(candidate.value, amount_style),
                if candidate.keyword_associated { "  [keyword]" } else { "" }
            ));
        }
    }

    output
}
