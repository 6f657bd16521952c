//! Sum command - add up amount strings the user picked.

use std::path::PathBuf;

use clap::Args;
use tracing::{info, warn};

use billtotal_core::{format_amount, split_lines, TotalParser};
use rust_decimal::Decimal;

use super::{load_config, read_input};

/// Arguments for the sum command.
#[derive(Args)]
pub struct SumArgs {
    /// File with one amount per line (default: stdin)
    input: Option<PathBuf>,
}

pub fn run(args: SumArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let parser = config.parser()?;

    let text = read_input(args.input.as_deref())?;
    let total = sum_lines(&parser, &text);

    println!("{}", format_amount(total, config.display.style));
    Ok(())
}

fn sum_lines(parser: &TotalParser, text: &str) -> Decimal {
    let mut summed = 0usize;
    let total: Decimal = split_lines(text)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .filter_map(|line| {
            let value = parser.parse_amount_text(line);
            match value {
                Some(_) => summed += 1,
                None => warn!("Skipping line without an amount: {:?}", line),
            }
            value
        })
        .sum();

    info!("Summed {} amounts", summed);
    total
}
