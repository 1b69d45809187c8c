//! Scan, select and remove through the library API

use diskface::matcher::ExclusionSet;
use diskface::remover::{expand_temp_paths, RemovalExecutor, RemovalOptions};
use diskface::scanner::{scan_directory, EntryKind, ScanEntry, ScanOptions};
use diskface::selection::parse_selection;
use std::fs::{self, File};
use tempfile::TempDir;

const MB: u64 = 1024 * 1024;

fn sparse_file(path: &std::path::Path, size: u64) {
    File::create(path).unwrap().set_len(size).unwrap();
}

/// A tree with a 10 MB file, a 200 MB directory and an excluded cache.
fn create_tree() -> TempDir {
    let dir = tempfile::Builder::new().prefix("removal").tempdir().unwrap();
    let root = dir.path();

    fs::create_dir_all(root.join("big")).unwrap();
    fs::create_dir_all(root.join("cache")).unwrap();
    sparse_file(&root.join("small.bin"), 10 * MB);
    sparse_file(&root.join("big/a.bin"), 150 * MB);
    sparse_file(&root.join("big/b.bin"), 50 * MB);
    sparse_file(&root.join("cache/huge.bin"), 500 * MB);

    dir
}

fn selected(entries: &[ScanEntry], input: &str) -> Vec<ScanEntry> {
    parse_selection(input, entries.len())
        .unwrap()
        .into_iter()
        .map(|i| entries[i - 1].clone())
        .collect()
}

#[test]
fn scan_select_remove() {
    let dir = create_tree();
    let exclusions = ExclusionSet::from_patterns(["*/cache"]);
    let options = ScanOptions::new().with_min_size(MB);

    let entries = scan_directory(dir.path(), &exclusions, &options).unwrap();

    assert!(entries.iter().all(|e| !e.path.starts_with(dir.path().join("cache"))));
    assert_eq!(entries[0].kind, EntryKind::Directory);
    assert_eq!(entries[0].size, 210 * MB);
    assert_eq!(entries[1].path, dir.path().join("big"));

    // Drop the two biggest files, keep the rest
    let files: Vec<ScanEntry> = entries
        .iter()
        .filter(|e| e.kind == EntryKind::File)
        .cloned()
        .collect();
    let items = selected(&files, "1-2");
    let report = RemovalExecutor::new(RemovalOptions::default()).remove_all(&items, |_| {});

    assert_eq!(report.total_freed(), 200 * MB);
    assert!(!dir.path().join("big/a.bin").exists());
    assert!(dir.path().join("small.bin").exists());
    assert!(dir.path().join("cache/huge.bin").exists());

    let rescanned = scan_directory(dir.path(), &exclusions, &options).unwrap();
    assert_eq!(rescanned[0].size, 10 * MB);
}

#[test]
fn removing_a_parent_skips_its_selected_children() {
    let dir = create_tree();
    let entries = scan_directory(dir.path(), &ExclusionSet::new(), &ScanOptions::new()).unwrap();

    let big = entries
        .iter()
        .position(|e| e.path == dir.path().join("big"))
        .unwrap();
    let child = entries
        .iter()
        .position(|e| e.path == dir.path().join("big/b.bin"))
        .unwrap();
    let items = selected(&entries, &format!("{} {}", big + 1, child + 1));

    let report = RemovalExecutor::new(RemovalOptions::default()).remove_all(&items, |_| {});

    assert_eq!(report.removed, vec![(dir.path().join("big"), 200 * MB)]);
    assert_eq!(report.skipped, vec![dir.path().join("big/b.bin")]);
    assert!(!report.has_failures());
}

#[test]
fn dry_run_reports_without_deleting() {
    let dir = create_tree();
    let entries = scan_directory(
        dir.path(),
        &ExclusionSet::new(),
        &ScanOptions::new().with_files(false),
    )
    .unwrap();

    let items = selected(&entries, "all");
    let report =
        RemovalExecutor::new(RemovalOptions { dry_run: true }).remove_all(&items, |_| {});

    assert_eq!(report.summary().removed_count, entries.len());
    assert!(dir.path().join("big/a.bin").exists());
    assert!(dir.path().join("cache/huge.bin").exists());
}

#[test]
fn temp_paths_expand_and_remove() {
    let dir = create_tree();
    let root = dir.path();
    fs::create_dir_all(root.join("tmp/build")).unwrap();
    sparse_file(&root.join("tmp/build/obj.o"), 3 * MB);
    sparse_file(&root.join("tmp/log.txt"), 2 * MB);
    sparse_file(&root.join("tmp/keep.lock"), MB);

    let patterns = [
        format!("{}/tmp/*", root.display()),
        format!("{}/missing-scratch", root.display()),
    ];
    let exclusions = ExclusionSet::from_patterns(["*.lock"]);
    let targets = expand_temp_paths(&patterns, &exclusions);

    assert_eq!(targets.len(), 2);
    assert!(targets.iter().all(|t| !t.path.ends_with("keep.lock")));

    let report = RemovalExecutor::new(RemovalOptions::default()).remove_all(&targets, |_| {});

    assert_eq!(report.total_freed(), 5 * MB);
    assert!(!report.has_failures());
    assert!(!root.join("tmp/build").exists());
    assert!(!root.join("tmp/log.txt").exists());
    assert!(root.join("tmp/keep.lock").exists());
    assert!(root.join("big/a.bin").exists());
}
