//! CLI application for finding the total amount on bills and receipts.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, lines, sum, total};

/// billtotal - Find the payable total in OCR text of bills and receipts
#[derive(Parser)]
#[command(name = "billtotal")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the total in one OCR text
    Total(total::TotalArgs),

    /// List the lines that look like amounts
    Lines(lines::LinesArgs),

    /// Check whether a single string looks like an amount
    Check(lines::CheckArgs),

    /// Sum previously selected amount strings
    Sum(sum::SumArgs),

    /// Find totals in many OCR text files
    Batch(batch::BatchArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Total(args) => total::run(args, config_path),
        Commands::Lines(args) => lines::run(args),
        Commands::Check(args) => lines::check(args),
        Commands::Sum(args) => sum::run(args, config_path),
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Config(args) => config::run(args),
    }
}
