//! Data models shared by the extraction pipeline and its front ends.

pub mod config;
pub mod total;

pub use config::{BillTotalConfig, DisplayConfig, ExtractionConfig};
pub use total::{MonetaryCandidate, TotalResponse};
