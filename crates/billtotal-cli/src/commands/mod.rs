//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod lines;
pub mod sum;
pub mod total;

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use billtotal_core::models::config::BillTotalConfig;

/// Location of the user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("billtotal")
        .join("config.json")
}

/// Configuration from `--config`, else the user file if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<BillTotalConfig> {
    if let Some(path) = config_path {
        return Ok(BillTotalConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading configuration from {}", default_path.display());
        Ok(BillTotalConfig::from_file(&default_path)?)
    } else {
        Ok(BillTotalConfig::default())
    }
}

/// Read OCR text from `input`, or from stdin when it is absent or `-`.
pub fn read_input(input: Option<&Path>) -> anyhow::Result<String> {
    match input {
        Some(path) if path != Path::new("-") => {
            if !path.exists() {
                anyhow::bail!("Input file not found: {}", path.display());
            }
            Ok(std::fs::read_to_string(path)?)
        }
        _ => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
