//! Removal of selected entries.
//!
//! This module provides:
//! - Per-item deletion with the freed size measured just before removal
//! - Batch execution that never aborts on a single failure
//! - A report of removed, skipped and failed items
//! - Expansion of temporary-path patterns into entries to remove

mod executor;
mod report;
mod temp;

pub use executor::{RemovalExecutor, RemovalOptions};
pub use report::{FailureKind, RemovalFailure, RemovalOutcome, RemovalReport, RemovalSummary};
pub use temp::expand_temp_paths;
