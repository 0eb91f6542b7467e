//! Package catalog indexer
//!
//! Reads per-package descriptors, discovers release-like tags from each
//! package's git remote, enriches the records with hosting metadata and
//! writes one aggregated index.
//!
//! - [`descriptor`]: record model, descriptor tree reading, index writing
//! - [`version`]: remote ref listing and release classification
//! - [`metadata`]: hosting provider metadata and the fill-only merge
//! - [`index`]: concurrent aggregation of all records

pub mod config;
pub mod descriptor;
pub mod index;
pub mod logging;
pub mod metadata;
pub mod version;
