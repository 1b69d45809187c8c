//! Subcommand implementations for the `diskface` binary.

pub mod clean;
pub mod exclusions;
mod removal;
pub mod scan;
