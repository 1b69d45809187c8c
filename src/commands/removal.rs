//! Confirmation and progress output shared by the commands that delete.

use std::io::{self, BufRead, Write};

use crate::remover::{RemovalExecutor, RemovalOptions, RemovalOutcome, RemovalReport};
use crate::scanner::{format_size, ScanEntry};

/// Ask a yes/no question. Anything but `y` or `yes` declines.
pub(crate) fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> io::Result<bool> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("y") || line.trim().eq_ignore_ascii_case("yes"))
}

pub(crate) fn print_items(heading: &str, items: &[ScanEntry]) {
    let total: u64 = items.iter().map(|e| e.size).sum();
    println!(
        "\n{} {} item{} ({}):",
        heading,
        items.len(),
        if items.len() == 1 { "" } else { "s" },
        format_size(total)
    );
    for entry in items {
        println!("  {:>12}  {}", format_size(entry.size), entry.path.display());
    }
}

/// Remove `items`, printing a line per item and a totals line.
pub(crate) fn execute(items: &[ScanEntry], dry_run: bool) -> RemovalReport {
    if dry_run {
        println!("\n[DRY RUN] Would remove:");
    } else {
        println!("\nRemoving...");
    }

    let executor = RemovalExecutor::new(RemovalOptions { dry_run });
    let report = executor.remove_all(items, |outcome| println!("{}", outcome_line(outcome)));

    println!();
    println!("{}", totals_line(&report, dry_run));
    report
}

fn outcome_line(outcome: &RemovalOutcome) -> String {
    match outcome {
        RemovalOutcome::Removed { path, freed_bytes } => {
            format!("  ✓ {} ({})", path.display(), format_size(*freed_bytes))
        }
        RemovalOutcome::Skipped { path } => {
            format!("  - {} (no longer exists)", path.display())
        }
        RemovalOutcome::Failed(failure) => {
            format!("  ✗ {}: {}", failure.path.display(), failure.message)
        }
    }
}

fn totals_line(report: &RemovalReport, dry_run: bool) -> String {
    let summary = report.summary();
    let mut line = format!(
        "{} {} from {} item{}",
        if dry_run { "Would free" } else { "Freed" },
        format_size(summary.total_freed),
        summary.removed_count,
        if summary.removed_count == 1 { "" } else { "s" }
    );
    if summary.skipped_count > 0 {
        line.push_str(&format!(", {} skipped", summary.skipped_count));
    }
    if summary.failed_count > 0 {
        line.push_str(&format!(", {} failed", summary.failed_count));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remover::{FailureKind, RemovalFailure};
    use std::io::Cursor;
    use std::path::PathBuf;

    #[test]
    fn test_confirm() {
        let mut output = Vec::new();
        assert!(confirm(&mut Cursor::new(b"y\n".to_vec()), &mut output, "? ").unwrap());
        assert!(confirm(&mut Cursor::new(b"YES\n".to_vec()), &mut output, "? ").unwrap());
        assert!(!confirm(&mut Cursor::new(b"\n".to_vec()), &mut output, "? ").unwrap());
        assert!(!confirm(&mut Cursor::new(Vec::new()), &mut output, "? ").unwrap());
    }

    #[test]
    fn test_outcome_lines() {
        let removed = RemovalOutcome::Removed {
            path: PathBuf::from("/data/big.iso"),
            freed_bytes: 1024,
        };
        let failed = RemovalOutcome::Failed(RemovalFailure {
            path: PathBuf::from("/locked"),
            kind: FailureKind::PermissionDenied,
            message: "Permission denied".into(),
        });

        assert_eq!(
            outcome_line(&removed),
            format!("  ✓ /data/big.iso ({})", format_size(1024))
        );
        assert_eq!(outcome_line(&failed), "  ✗ /locked: Permission denied");
    }

    #[test]
    fn test_totals_line() {
        let report = RemovalReport {
            removed: vec![(PathBuf::from("/a"), 2048)],
            skipped: vec![PathBuf::from("/b")],
            failures: Vec::new(),
        };
        assert_eq!(
            totals_line(&report, false),
            format!("Freed {} from 1 item, 1 skipped", format_size(2048))
        );
        assert!(totals_line(&report, true).starts_with("Would free"));
    }
}
