use serde::Serialize;
use std::path::{Path, PathBuf};

/// Whether a ranked entry is a single file or an aggregated directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// A file or directory together with the bytes it accounts for.
///
/// For directories `size` is the sum of every counted file below it;
/// excluded paths, pruned subtrees and symbolic links contribute nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanEntry {
    /// Full path to the file or directory
    pub path: PathBuf,

    /// Size in bytes
    pub size: u64,

    pub kind: EntryKind,
}

impl ScanEntry {
    pub fn file(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
            kind: EntryKind::File,
        }
    }

    pub fn directory(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
            kind: EntryKind::Directory,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Sort largest first. The sort is stable, so equal sizes keep discovery order.
pub fn sort_by_size(entries: &mut [ScanEntry]) {
    entries.sort_by(|a, b| b.size.cmp(&a.size));
}

/// The `k` largest entries, ranked. `entries` itself is left untouched.
pub fn top_entries(entries: &[ScanEntry], k: usize) -> Vec<ScanEntry> {
    let mut ranked = entries.to_vec();
    sort_by_size(&mut ranked);
    ranked.truncate(k);
    ranked
}
