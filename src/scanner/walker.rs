use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{DiskfaceError, Result};
use crate::matcher::ExclusionSet;

use super::entry::{sort_by_size, ScanEntry};
use super::options::ScanOptions;
use super::progress::{NoProgress, ProgressGate, ScanObserver};

/// Scan `root` and return every qualifying entry, largest first.
pub fn scan_directory(
    root: &Path,
    exclusions: &ExclusionSet,
    options: &ScanOptions,
) -> Result<Vec<ScanEntry>> {
    scan_directory_progressive(root, exclusions, options, &mut NoProgress)
}

/// Scan `root`, reporting the unsorted results to `observer` as they grow.
///
/// The walk is depth-first and top-down: excluded, dot-prefixed (when
/// skipped) and too-deep directories are pruned before they are read, and
/// symbolic links are neither followed nor counted. Directory sizes include
/// everything counted below them. Unreadable files count as zero and
/// unreadable directories only lose their own subtree.
///
/// Fails only when `root` is missing, unreadable or not a directory.
pub fn scan_directory_progressive(
    root: &Path,
    exclusions: &ExclusionSet,
    options: &ScanOptions,
    observer: &mut dyn ScanObserver,
) -> Result<Vec<ScanEntry>> {
    let root = resolve_root(root)?;

    if options.skip_dot_entries && has_dot_component(&root) {
        tracing::debug!(root = %root.display(), "Root is inside a dot directory, nothing to scan");
        return Ok(Vec::new());
    }

    tracing::info!(root = %root.display(), patterns = exclusions.len(), "Scanning");

    let walker = WalkDir::new(&root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_pruned(e, exclusions, options));

    let mut walk = Walk::new(options, observer);
    let mut cancelled = false;

    for item in walker {
        let entry = match item {
            Ok(e) => e,
            Err(err) => {
                walk.record_error(&err);
                continue;
            }
        };

        walk.close_dirs(entry.depth());

        let file_type = entry.file_type();
        if file_type.is_dir() {
            if options.is_cancelled() {
                cancelled = true;
                break;
            }
            let depth = entry.depth();
            walk.enter_dir(entry.into_path(), depth);
        } else if file_type.is_file() {
            let size = match entry.metadata() {
                Ok(m) => m.len(),
                Err(err) => {
                    tracing::debug!(path = %entry.path().display(), error = %err, "Cannot stat file");
                    0
                }
            };
            walk.add_file(entry.into_path(), size);
        }
    }

    if cancelled {
        tracing::info!("Scan cancelled, returning partial results");
    } else {
        walk.close_dirs(0);
    }

    let mut results = walk.results;
    sort_by_size(&mut results);
    tracing::info!(entries = results.len(), "Scan complete");

    Ok(results)
}

fn resolve_root(root: &Path) -> Result<PathBuf> {
    let metadata = fs::metadata(root).map_err(|e| DiskfaceError::from_io(root, e))?;
    if !metadata.is_dir() {
        return Err(DiskfaceError::NotADirectory(root.to_path_buf()));
    }

    let root = root
        .canonicalize()
        .map_err(|e| DiskfaceError::from_io(root, e))?;

    // A root we cannot list is fatal rather than an empty result.
    fs::read_dir(&root).map_err(|e| DiskfaceError::from_io(&root, e))?;

    Ok(root)
}

/// Decide whether a non-root entry is dropped before it is visited.
fn is_pruned(entry: &walkdir::DirEntry, exclusions: &ExclusionSet, options: &ScanOptions) -> bool {
    let file_type = entry.file_type();

    if file_type.is_symlink() {
        return true;
    }

    if options.skip_dot_entries && is_dot_name(entry.file_name()) {
        return true;
    }

    if file_type.is_dir() {
        if let Some(max_depth) = options.max_depth {
            if entry.depth() > max_depth {
                return true;
            }
        }
    }

    exclusions.should_exclude(entry.path())
}

fn is_dot_name(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn has_dot_component(path: &Path) -> bool {
    path.components().any(|c| match c {
        Component::Normal(name) => is_dot_name(name),
        _ => false,
    })
}

/// A directory whose size is still being accumulated.
#[derive(Debug)]
struct OpenDir {
    path: PathBuf,
    depth: usize,
    size: u64,
    unreadable: bool,
}

/// Mutable state of one scan pass.
struct Walk<'a> {
    options: &'a ScanOptions,
    observer: &'a mut dyn ScanObserver,
    gate: ProgressGate,
    open: Vec<OpenDir>,
    results: Vec<ScanEntry>,
}

impl<'a> Walk<'a> {
    fn new(options: &'a ScanOptions, observer: &'a mut dyn ScanObserver) -> Self {
        Self {
            options,
            observer,
            gate: ProgressGate::new(options.cadence),
            open: Vec::new(),
            results: Vec::new(),
        }
    }

    fn enter_dir(&mut self, path: PathBuf, depth: usize) {
        if self.gate.on_visit() {
            self.observer.on_progress(&self.results, &path);
        }
        self.open.push(OpenDir {
            path,
            depth,
            size: 0,
            unreadable: false,
        });
    }

    fn add_file(&mut self, path: PathBuf, size: u64) {
        if let Some(parent) = self.open.last_mut() {
            parent.size += size;
        }
        if self.options.include_files && size >= self.options.min_size {
            self.emit(ScanEntry::file(path, size));
        }
    }

    /// Finish every open directory at `depth` or deeper, rolling sizes up.
    fn close_dirs(&mut self, depth: usize) {
        while self.open.last().is_some_and(|dir| dir.depth >= depth) {
            let Some(dir) = self.open.pop() else { break };

            if let Some(parent) = self.open.last_mut() {
                parent.size += dir.size;
            }

            if self.options.include_directories
                && !dir.unreadable
                && dir.size >= self.options.min_size
            {
                self.emit(ScanEntry::directory(dir.path, dir.size));
            }
        }
    }

    fn emit(&mut self, entry: ScanEntry) {
        self.results.push(entry);
        if self.gate.on_entry() {
            if let Some(last) = self.results.last() {
                self.observer.on_progress(&self.results, &last.path);
            }
        }
    }

    fn record_error(&mut self, err: &walkdir::Error) {
        let Some(path) = err.path() else {
            tracing::warn!(error = %err, "Walk error");
            return;
        };

        match self.open.iter_mut().rev().find(|dir| dir.path == path) {
            Some(dir) => {
                tracing::warn!(path = %path.display(), error = %err, "Cannot read directory, skipping subtree");
                dir.unreadable = true;
            }
            None => {
                tracing::debug!(path = %path.display(), error = %err, "Skipping unreadable entry");
            }
        }
    }
}
