//! Expansion of temporary-path patterns into removable entries.

use glob::MatchOptions;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::matcher::ExclusionSet;
use crate::scanner::ScanEntry;

use super::executor::dir_size;

/// Shell-like globbing: `*` stays within one component and skips dot names.
const TEMP_MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Expand temporary-path patterns into entries ready for removal.
///
/// A leading `~` stands for the home directory. Patterns without glob
/// metacharacters name a single path. Every match is sized now, symlinks
/// count as zero and are never followed. Paths matched twice or caught by
/// `exclusions` are left out. Order follows the patterns.
pub fn expand_temp_paths<S: AsRef<str>>(
    patterns: &[S],
    exclusions: &ExclusionSet,
) -> Vec<ScanEntry> {
    let home = dirs::home_dir();
    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for raw in patterns {
        let pattern = expand_home(raw.as_ref().trim(), home.as_deref());
        if pattern.is_empty() {
            continue;
        }

        for path in matching_paths(&pattern) {
            if exclusions.should_exclude(&path) {
                tracing::debug!(path = %path.display(), "Temporary path is excluded");
                continue;
            }
            if !seen.insert(path.clone()) {
                continue;
            }
            if let Some(entry) = measure(path) {
                entries.push(entry);
            }
        }
    }

    tracing::info!(patterns = patterns.len(), matches = entries.len(), "Expanded temporary paths");
    entries
}

fn expand_home(pattern: &str, home: Option<&Path>) -> String {
    let Some(home) = home else {
        return pattern.to_string();
    };
    if pattern == "~" {
        return home.display().to_string();
    }
    match pattern.strip_prefix("~/") {
        Some(rest) => home.join(rest).display().to_string(),
        None => pattern.to_string(),
    }
}

fn matching_paths(pattern: &str) -> Vec<PathBuf> {
    if !pattern.contains(&['*', '?', '['][..]) {
        let path = PathBuf::from(pattern);
        return match fs::symlink_metadata(&path) {
            Ok(_) => vec![path],
            Err(_) => Vec::new(),
        };
    }

    let paths = match glob::glob_with(pattern, TEMP_MATCH_OPTIONS) {
        Ok(paths) => paths,
        Err(err) => {
            tracing::warn!(pattern, error = %err, "Ignoring invalid temporary-path pattern");
            return Vec::new();
        }
    };

    paths
        .filter_map(|result| match result {
            Ok(path) => Some(path),
            Err(err) => {
                tracing::debug!(error = %err, "Skipping unreadable temporary path");
                None
            }
        })
        .collect()
}

fn measure(path: PathBuf) -> Option<ScanEntry> {
    let metadata = match fs::symlink_metadata(&path) {
        Ok(m) => m,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "Cannot stat temporary path");
            return None;
        }
    };

    if metadata.is_dir() {
        let size = dir_size(&path);
        Some(ScanEntry::directory(path, size))
    } else if metadata.file_type().is_symlink() {
        Some(ScanEntry::file(path, 0))
    } else {
        Some(ScanEntry::file(path, metadata.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::EntryKind;
    use tempfile::TempDir;

    fn create_temp_tree() -> TempDir {
        let tmp = tempfile::Builder::new().prefix("temp").tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("cache/thumbs")).unwrap();
        fs::write(root.join("cache/a.tmp"), "a".repeat(100)).unwrap();
        fs::write(root.join("cache/thumbs/t.png"), "t".repeat(50)).unwrap();
        fs::write(root.join("cache/.keep"), "").unwrap();
        fs::write(root.join("notes.txt"), "n".repeat(10)).unwrap();
        tmp
    }

    fn pattern(root: &Path, tail: &str) -> String {
        format!("{}/{}", root.display(), tail)
    }

    #[test]
    fn test_glob_matches_are_sized() {
        let tmp = create_temp_tree();
        let patterns = [pattern(tmp.path(), "cache/*")];

        let entries = expand_temp_paths(&patterns, &ExclusionSet::new());

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], ScanEntry::file(tmp.path().join("cache/a.tmp"), 100));
        assert_eq!(entries[1].kind, EntryKind::Directory);
        assert_eq!(entries[1].size, 50);
    }

    #[test]
    fn test_star_skips_dot_names() {
        let tmp = create_temp_tree();
        let patterns = [pattern(tmp.path(), "cache/*")];

        let entries = expand_temp_paths(&patterns, &ExclusionSet::new());

        assert!(entries.iter().all(|e| !e.path.ends_with(".keep")));
    }

    #[test]
    fn test_literal_paths_must_exist() {
        let tmp = create_temp_tree();
        let patterns = [pattern(tmp.path(), "notes.txt"), pattern(tmp.path(), "missing")];

        let entries = expand_temp_paths(&patterns, &ExclusionSet::new());

        assert_eq!(entries, vec![ScanEntry::file(tmp.path().join("notes.txt"), 10)]);
    }

    #[test]
    fn test_duplicates_and_exclusions_are_dropped() {
        let tmp = create_temp_tree();
        let patterns = [
            pattern(tmp.path(), "cache/*"),
            pattern(tmp.path(), "cache/a.tmp"),
        ];
        let exclusions = ExclusionSet::from_patterns(["thumbs"]);

        let entries = expand_temp_paths(&patterns, &exclusions);

        assert_eq!(entries, vec![ScanEntry::file(tmp.path().join("cache/a.tmp"), 100)]);
    }

    #[test]
    fn test_recursive_pattern() {
        let tmp = create_temp_tree();
        let patterns = [pattern(tmp.path(), "**/*.png")];

        let entries = expand_temp_paths(&patterns, &ExclusionSet::new());

        assert_eq!(
            entries,
            vec![ScanEntry::file(tmp.path().join("cache/thumbs/t.png"), 50)]
        );
    }

    #[test]
    fn test_expand_home() {
        let home = Path::new("/home/u");
        assert_eq!(expand_home("~/.cache/*", Some(home)), "/home/u/.cache/*");
        assert_eq!(expand_home("~", Some(home)), "/home/u");
        assert_eq!(expand_home("/tmp/*", Some(home)), "/tmp/*");
        assert_eq!(expand_home("~other/x", Some(home)), "~other/x");
        assert_eq!(expand_home("~/x", None), "~/x");
    }
}
