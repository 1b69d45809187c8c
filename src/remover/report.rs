use std::path::{Path, PathBuf};

/// Why an item could not be removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    PermissionDenied,
    Other,
}

/// A per-item removal failure. Never aborts the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalFailure {
    pub path: PathBuf,
    pub kind: FailureKind,
    pub message: String,
}

impl RemovalFailure {
    pub(crate) fn from_io(path: &Path, err: &std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::PermissionDenied => FailureKind::PermissionDenied,
            _ => FailureKind::Other,
        };
        Self {
            path: path.to_path_buf(),
            kind,
            message: err.to_string(),
        }
    }
}

/// Result of removing a single item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    /// The item was deleted (or would be, in a dry run).
    Removed { path: PathBuf, freed_bytes: u64 },
    /// The item no longer existed.
    Skipped { path: PathBuf },
    Failed(RemovalFailure),
}

impl RemovalOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Removed { path, .. } | Self::Skipped { path } => path,
            Self::Failed(failure) => &failure.path,
        }
    }
}

/// Everything that happened during one removal batch.
///
/// `removed` keeps removal order. Only successful deletions appear in it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalReport {
    pub removed: Vec<(PathBuf, u64)>,
    pub skipped: Vec<PathBuf>,
    pub failures: Vec<RemovalFailure>,
}

impl RemovalReport {
    pub(crate) fn record(&mut self, outcome: RemovalOutcome) {
        match outcome {
            RemovalOutcome::Removed { path, freed_bytes } => self.removed.push((path, freed_bytes)),
            RemovalOutcome::Skipped { path } => self.skipped.push(path),
            RemovalOutcome::Failed(failure) => self.failures.push(failure),
        }
    }

    /// Bytes freed by the successful removals.
    pub fn total_freed(&self) -> u64 {
        self.removed.iter().map(|(_, size)| size).sum()
    }

    /// Freed bytes for `path`, if it was removed.
    pub fn freed(&self, path: &Path) -> Option<u64> {
        self.removed
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, size)| *size)
    }

    /// True when nothing was removed.
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn summary(&self) -> RemovalSummary {
        RemovalSummary {
            removed_count: self.removed.len(),
            skipped_count: self.skipped.len(),
            failed_count: self.failures.len(),
            total_freed: self.total_freed(),
        }
    }
}

/// Summary of removal results.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RemovalSummary {
    pub removed_count: usize,
    pub skipped_count: usize,
    pub failed_count: usize,
    pub total_freed: u64,
}
