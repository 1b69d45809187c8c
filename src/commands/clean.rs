//! Clean command implementation.

use anyhow::Result;
use std::io;

use super::removal::{self, confirm, print_items};
use crate::cli::CleanArgs;
use crate::config::Config;
use crate::remover::expand_temp_paths;

/// Run the clean command.
pub fn run(args: CleanArgs, config: &Config) -> Result<()> {
    let mut patterns = config.temp_paths.clone();
    patterns.extend(args.temp_path);

    if patterns.is_empty() {
        println!("No temporary paths configured.");
        return Ok(());
    }

    let targets = expand_temp_paths(&patterns, &config.exclusion_set());
    if targets.is_empty() {
        println!("No temporary files found.");
        return Ok(());
    }

    print_items("Found", &targets);

    if !args.force && !args.dry_run {
        let stdin = io::stdin();
        if !confirm(&mut stdin.lock(), &mut io::stdout(), "\nRemove these items? [y/N] ")? {
            println!("Aborted.");
            return Ok(());
        }
    }

    let report = removal::execute(&targets, args.dry_run);

    if report.has_failures() {
        std::process::exit(5); // Partial failure
    }

    Ok(())
}
