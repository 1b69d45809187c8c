use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// How often the progress observer is called during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressCadence {
    /// Once for every entry that qualifies for the result list.
    EveryEntry,
    /// At most once per interval, on new entries or directory visits.
    Throttled(Duration),
}

impl Default for ProgressCadence {
    fn default() -> Self {
        Self::Throttled(Duration::from_millis(250))
    }
}

/// Configuration options for a size scan.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Entries smaller than this many bytes are not reported
    pub min_size: u64,

    /// Report individual files
    pub include_files: bool,

    /// Report directories with their aggregated size
    pub include_directories: bool,

    /// Skip files and directories starting with `.`, including everything below them
    pub skip_dot_entries: bool,

    /// Maximum depth to descend below the root (None = unlimited)
    pub max_depth: Option<usize>,

    pub cadence: ProgressCadence,

    /// Checked before each directory visit; when set the scan stops early
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            min_size: 0,
            include_files: true,
            include_directories: true,
            skip_dot_entries: false,
            max_depth: None,
            cadence: ProgressCadence::default(),
            cancel: None,
        }
    }
}

impl ScanOptions {
    /// Create a new ScanOptions with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum reported size in bytes
    pub fn with_min_size(mut self, bytes: u64) -> Self {
        self.min_size = bytes;
        self
    }

    pub fn with_files(mut self, include: bool) -> Self {
        self.include_files = include;
        self
    }

    pub fn with_directories(mut self, include: bool) -> Self {
        self.include_directories = include;
        self
    }

    /// Set whether dot-prefixed entries are skipped
    pub fn with_skip_dot_entries(mut self, skip: bool) -> Self {
        self.skip_dot_entries = skip;
        self
    }

    /// Set maximum recursion depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_cadence(mut self, cadence: ProgressCadence) -> Self {
        self.cadence = cadence;
        self
    }

    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}
