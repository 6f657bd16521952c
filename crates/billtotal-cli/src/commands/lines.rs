//! Lines and check commands - the amount pick list.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use billtotal_core::{candidate_lines, looks_like_monetary_line, split_lines};

use super::read_input;

/// Arguments for the lines command.
#[derive(Args)]
pub struct LinesArgs {
    /// OCR text file (default: stdin)
    input: Option<PathBuf>,

    /// Prefix each line with its position in the list
    #[arg(short, long)]
    numbered: bool,
}

/// Arguments for the check command.
#[derive(Args)]
pub struct CheckArgs {
    /// Text to classify
    text: String,
}

pub fn run(args: LinesArgs) -> anyhow::Result<()> {
    let text = read_input(args.input.as_deref())?;
    let lines = candidate_lines(&text);
    info!("{} of {} lines look like amounts", lines.len(), split_lines(&text).count());

    print!("{}", render_lines(&lines, args.numbered));
    Ok(())
}

pub fn check(args: CheckArgs) -> anyhow::Result<()> {
    if looks_like_monetary_line(args.text.trim()) {
        println!("yes");
        Ok(())
    } else {
        println!("no");
        std::process::exit(1);
    }
}

fn render_lines(lines: &[String], numbered: bool) -> String {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            if numbered {
                format!("{}: {}\n", i + 1, line)
            } else {
                format!("{}\n", line)
            }
        })
        .collect()
}
