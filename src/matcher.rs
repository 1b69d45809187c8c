//! Exclusion pattern matching.
//!
//! Patterns come in three forms, all matched case-insensitively:
//! - absolute globs (`/var/cache/*`), matched against the whole path
//! - double-wildcard globs (`**/node_modules`), where only the last segment
//!   is tested as a suffix of the path
//! - relative globs (`.cache`, `build/*.o`), tested against every window of
//!   consecutive path segments with the same segment count as the pattern
//!
//! `*` is allowed to cross `/`, so `/home/*` excludes everything below `/home`.
//! Trailing slashes are dropped from absolute patterns only; a relative
//! `node_modules/` keeps its empty last segment and matches nothing.

use glob::{MatchOptions, Pattern};
use std::path::Path;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: false,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Check whether `path` matches a single exclusion `pattern`.
///
/// Empty patterns never match. An unclosed `[` is matched literally.
pub fn matches_pattern(path: &Path, pattern: &str) -> bool {
    PathMatcher::compile(pattern).is_some_and(|m| m.matches(path))
}

/// A pattern compiled into the glob it is tested with.
#[derive(Debug, Clone)]
enum PathMatcher {
    Absolute(Pattern),
    Suffix(Pattern),
    Relative { glob: Pattern, segments: usize },
}

impl PathMatcher {
    fn compile(raw: &str) -> Option<Self> {
        let lowered = collapse_stars(&raw.trim().to_lowercase());
        let pattern = lowered.as_str();
        if pattern.is_empty() {
            return None;
        }

        if pattern.starts_with('/') {
            let trimmed = pattern.trim_end_matches('/');
            let absolute = if trimmed.is_empty() { "/" } else { trimmed };
            return compile_glob(raw, absolute).map(Self::Absolute);
        }

        if raw.split('/').any(|segment| segment.trim() == "**") {
            let tail = pattern.rsplit('/').next().unwrap_or_default();
            return compile_glob(raw, &collapse_stars(&format!("*{}", tail))).map(Self::Suffix);
        }

        compile_glob(raw, pattern).map(|glob| Self::Relative {
            glob,
            segments: pattern.split('/').count(),
        })
    }

    fn matches(&self, path: &Path) -> bool {
        let path = path.to_string_lossy().to_lowercase();
        match self {
            Self::Absolute(glob) | Self::Suffix(glob) => glob.matches_with(&path, MATCH_OPTIONS),
            Self::Relative { glob, segments } => {
                let parts: Vec<&str> = path.split('/').collect();
                parts.len() >= *segments
                    && parts
                        .windows(*segments)
                        .any(|window| glob.matches_with(&window.join("/"), MATCH_OPTIONS))
            }
        }
    }
}

/// Compile `source`, reading an unclosed `[` as a literal bracket.
fn compile_glob(raw: &str, source: &str) -> Option<Pattern> {
    let err = match Pattern::new(source) {
        Ok(glob) => return Some(glob),
        Err(err) => err,
    };

    let literal_brackets = escape_unclosed_brackets(source);
    if literal_brackets != source {
        if let Ok(glob) = Pattern::new(&literal_brackets) {
            return Some(glob);
        }
    }

    match Pattern::new(&Pattern::escape(source)) {
        Ok(glob) => {
            tracing::debug!(pattern = raw, error = %err, "Matching exclusion pattern literally");
            Some(glob)
        }
        Err(_) => {
            tracing::warn!(pattern = raw, error = %err, "Ignoring invalid exclusion pattern");
            None
        }
    }
}

/// Replace every `[` with no closing `]` after it by the class `[[]`.
fn escape_unclosed_brackets(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    for (i, ch) in pattern.char_indices() {
        if ch == '[' && !pattern[i + 1..].contains(']') {
            out.push_str("[[]");
        } else {
            out.push(ch);
        }
    }
    out
}

/// Runs of `*` behave like a single `*` once separators are not literal, and
/// the glob crate rejects `**` that is not a whole path component.
fn collapse_stars(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut prev_star = false;
    for ch in pattern.chars() {
        if ch == '*' && prev_star {
            continue;
        }
        prev_star = ch == '*';
        out.push(ch);
    }
    out
}

#[derive(Debug, Clone)]
struct ExclusionPattern {
    raw: String,
    matcher: Option<PathMatcher>,
}

/// Ordered, de-duplicated collection of exclusion patterns.
///
/// Order only matters for listing; a path is excluded when any pattern matches.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    patterns: Vec<ExclusionPattern>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from patterns, dropping duplicates after the first.
    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        set.extend(patterns);
        set
    }

    /// Add a pattern. Returns false if it was already present.
    pub fn insert(&mut self, pattern: impl Into<String>) -> bool {
        let raw = pattern.into();
        if self.patterns.iter().any(|p| p.raw == raw) {
            return false;
        }
        let matcher = PathMatcher::compile(&raw);
        self.patterns.push(ExclusionPattern { raw, matcher });
        true
    }

    pub fn extend<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for pattern in patterns {
            self.insert(pattern);
        }
    }

    /// True if any pattern in the set matches `path`.
    pub fn should_exclude(&self, path: &Path) -> bool {
        self.patterns
            .iter()
            .filter_map(|p| p.matcher.as_ref())
            .any(|m| m.matches(path))
    }

    /// Patterns in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.raw.as_str())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
