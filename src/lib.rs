//! Diskface - find the largest files and directories and remove them
//!
//! This crate provides functionality for:
//! - Matching paths against exclusion patterns
//! - Scanning a tree into a ranked list of files and directories
//! - Parsing user selections of ranked entries
//! - Removing selected entries while tolerating per-item failures

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod matcher;
pub mod privilege;
pub mod remover;
pub mod scanner;
pub mod selection;

// Re-export commonly used types
pub use config::Config;
pub use error::{DiskfaceError, Result};
pub use matcher::{matches_pattern, ExclusionSet};
pub use remover::{RemovalExecutor, RemovalOptions, RemovalReport};
pub use scanner::{scan_directory, scan_directory_progressive, ScanEntry, ScanOptions};
pub use selection::{parse_selection, SelectionError};
