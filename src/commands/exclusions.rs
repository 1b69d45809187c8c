//! Exclusions command implementation.

use anyhow::{bail, Result};
use std::path::Path;

use crate::cli::{ExclusionAction, ExclusionArgs, ExclusionsArgs};
use crate::config::Config;
use crate::matcher::ExclusionSet;

/// Patterns a scan would use: the configured set (unless disabled) followed
/// by the command-line ones.
pub fn effective_exclusions(args: &ExclusionArgs, config: &Config) -> ExclusionSet {
    let mut set = if args.no_default_excludes {
        ExclusionSet::new()
    } else {
        config.exclusion_set()
    };
    set.extend(args.exclude.iter().cloned());
    set
}

/// Run the exclusions command.
///
/// `add` and `remove` rewrite the configuration file at `config_path`.
pub fn run(args: ExclusionsArgs, mut config: Config, config_path: Option<&Path>) -> Result<()> {
    match args.action {
        ExclusionAction::List(list) => {
            print_list(&effective_exclusions(&list, &config));
            Ok(())
        }
        ExclusionAction::Add { patterns } => {
            let path = writable(config_path)?;
            let added = config.add_exclusions(patterns);
            if added.is_empty() {
                println!("All patterns are already excluded.");
                return Ok(());
            }

            config.save(path)?;
            tracing::info!(added = added.len(), path = %path.display(), "Added exclusions");
            for pattern in &added {
                println!("Added: {}", pattern);
            }
            Ok(())
        }
        ExclusionAction::Remove { selection } => {
            let path = writable(config_path)?;
            if config.exclusions.is_empty() {
                bail!("No exclusion patterns configured");
            }

            let removed = config.remove_exclusions(&selection.join(" "))?;
            config.save(path)?;
            tracing::info!(removed = removed.len(), path = %path.display(), "Removed exclusions");
            for pattern in &removed {
                println!("Removed: {}", pattern);
            }
            Ok(())
        }
    }
}

fn writable(config_path: Option<&Path>) -> Result<&Path> {
    match config_path {
        Some(path) => Ok(path),
        None => bail!("Cannot determine the configuration directory; pass --config"),
    }
}

fn print_list(set: &ExclusionSet) {
    if set.is_empty() {
        println!("No exclusion patterns configured.");
        return;
    }

    for (i, pattern) in set.iter().enumerate() {
        println!("{:>4}  {}", i + 1, pattern);
    }
}
