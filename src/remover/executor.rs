//! Executor for removing selected scan entries.

use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

use crate::scanner::ScanEntry;

use super::report::{RemovalFailure, RemovalOutcome, RemovalReport};

/// Options for the removal executor.
#[derive(Debug, Clone, Default)]
pub struct RemovalOptions {
    /// If true, measure and report but don't delete anything.
    pub dry_run: bool,
}

/// Deletes entries one at a time, tolerating failures.
pub struct RemovalExecutor {
    options: RemovalOptions,
}

impl RemovalExecutor {
    /// Create a new executor with the given options.
    pub fn new(options: RemovalOptions) -> Self {
        Self { options }
    }

    /// Remove every item in order, calling `on_outcome` after each one.
    ///
    /// Each item is attempted exactly once whatever happened to the previous
    /// ones; failures end up in the report instead of stopping the batch.
    pub fn remove_all<F>(&self, items: &[ScanEntry], mut on_outcome: F) -> RemovalReport
    where
        F: FnMut(&RemovalOutcome),
    {
        tracing::info!(items = items.len(), dry_run = self.options.dry_run, "Removing");

        let mut report = RemovalReport::default();
        for item in items {
            let outcome = if self.options.dry_run && Self::under_removed(&report, item.path()) {
                // A real run would find it already gone with its ancestor
                RemovalOutcome::Skipped {
                    path: item.path.clone(),
                }
            } else {
                self.remove(item)
            };
            on_outcome(&outcome);
            report.record(outcome);
        }

        let summary = report.summary();
        tracing::info!(
            removed = summary.removed_count,
            skipped = summary.skipped_count,
            failed = summary.failed_count,
            freed = summary.total_freed,
            "Removal complete"
        );
        report
    }

    /// Remove a single item.
    ///
    /// The freed size is measured right before deletion; the scan-time size
    /// may be stale.
    pub fn remove(&self, item: &ScanEntry) -> RemovalOutcome {
        let path = item.path();

        let metadata = match fs::symlink_metadata(path) {
            Ok(m) => m,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No longer exists, skipping");
                return RemovalOutcome::Skipped {
                    path: path.to_path_buf(),
                };
            }
            Err(err) => return Self::failed(path, &err),
        };

        let result = if metadata.is_dir() {
            let size = dir_size(path);
            self.delete(path, |p| fs::remove_dir_all(p)).map(|()| size)
        } else {
            // Files and symlinks alike; a link is unlinked, never its target.
            let size = if metadata.file_type().is_symlink() {
                0
            } else {
                metadata.len()
            };
            self.delete(path, |p| fs::remove_file(p)).map(|()| size)
        };

        match result {
            Ok(freed_bytes) => {
                tracing::debug!(path = %path.display(), freed_bytes, "Removed");
                RemovalOutcome::Removed {
                    path: path.to_path_buf(),
                    freed_bytes,
                }
            }
            Err(err) => Self::failed(path, &err),
        }
    }

    fn delete(&self, path: &Path, remove: fn(&Path) -> io::Result<()>) -> io::Result<()> {
        if self.options.dry_run {
            return Ok(());
        }
        remove(path)
    }

    fn under_removed(report: &RemovalReport, path: &Path) -> bool {
        report
            .removed
            .iter()
            .any(|(removed, _)| path.starts_with(removed))
    }

    fn failed(path: &Path, err: &io::Error) -> RemovalOutcome {
        tracing::warn!(path = %path.display(), error = %err, "Failed to remove");
        RemovalOutcome::Failed(RemovalFailure::from_io(path, err))
    }
}

/// Sum of regular files below `path`; symlinks are not followed or counted.
pub(crate) fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .flatten()
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}
