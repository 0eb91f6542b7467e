//! Aggregation layer
//!
//! # Modules
//!
//! - [`aggregator`]: bounded concurrent enrichment of all records
//! - [`error`]: `EnrichError`, the per-package failure reason

pub mod aggregator;
pub mod error;

pub use aggregator::{AggregateOptions, AggregateReport, Aggregator, Diagnostic};
pub use error::EnrichError;
