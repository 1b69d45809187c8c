use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::matcher::ExclusionSet;
use crate::scanner::{megabytes, ScanOptions};
use crate::selection::{parse_selection, SelectionError};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Exclusion patterns, in listing order
    pub exclusions: Vec<String>,
    /// Globs whose matches `clean` removes; `~` is the home directory
    pub temp_paths: Vec<String>,
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Entries smaller than this are not reported
    pub min_size_mb: f64,
    /// Number of ranked entries to display
    pub entries_to_show: usize,
    /// Skip dot-prefixed files and directories with everything below them
    pub skip_dot_entries: bool,
    /// Report individual files
    pub scan_files: bool,
    /// Report directories with their aggregated size
    pub scan_directories: bool,
    /// Maximum descent below the scan root
    pub max_depth: Option<usize>,
    /// Root used when none is given on the command line
    pub default_root: Option<PathBuf>,
    /// Offer removal after every scan
    pub interactive_by_default: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclusions: [
                "/proc",
                "/sys",
                "/dev",
                "/run",
                "/tmp/systemd-*",
                "/var/run",
                "/var/lock",
                "/boot/efi",
                "/sys/*",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            temp_paths: ["~/.cache/*", "/tmp/*", "~/.local/share/Trash/*", "/var/tmp/*"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            scan: ScanConfig::default(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_size_mb: 100.0,
            entries_to_show: 20,
            skip_dot_entries: false,
            scan_files: true,
            scan_directories: true,
            max_depth: None,
            default_root: None,
            interactive_by_default: false,
        }
    }
}

impl Config {
    /// Default config location, `$XDG_CONFIG_HOME/diskface/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("diskface").join("config.toml"))
    }

    /// Load configuration from `path`, or from the default location.
    ///
    /// An explicit path must exist. A missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;

        let config = toml::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Write the configuration to `path`, creating its directory.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::WriteError {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, content).map_err(|source| ConfigError::WriteError {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "Saved config file");
        Ok(())
    }

    /// Append patterns that are not listed yet. Returns the ones added.
    pub fn add_exclusions<I, S>(&mut self, patterns: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = Vec::new();
        for pattern in patterns {
            let pattern = pattern.into().trim().to_string();
            if pattern.is_empty() || self.exclusions.contains(&pattern) {
                continue;
            }
            self.exclusions.push(pattern.clone());
            added.push(pattern);
        }
        added
    }

    /// Remove the exclusions picked by a 1-based `selection` over the listed
    /// order. Nothing changes when the selection is rejected.
    pub fn remove_exclusions(
        &mut self,
        selection: &str,
    ) -> std::result::Result<Vec<String>, SelectionError> {
        let indices = parse_selection(selection, self.exclusions.len())?;

        let mut removed = Vec::with_capacity(indices.len());
        for index in indices.iter().rev() {
            removed.push(self.exclusions.remove(index - 1));
        }
        removed.reverse();
        Ok(removed)
    }

    /// Reject settings no scan could run with.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if !self.scan.min_size_mb.is_finite() || self.scan.min_size_mb < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_size_mb must be a non-negative number, got {}",
                self.scan.min_size_mb
            )));
        }
        if self.scan.entries_to_show == 0 {
            return Err(ConfigError::Invalid(
                "entries_to_show must be at least 1".into(),
            ));
        }
        if !self.scan.scan_files && !self.scan.scan_directories {
            return Err(ConfigError::Invalid(
                "at least one of scan_files and scan_directories must be enabled".into(),
            ));
        }
        Ok(())
    }

    pub fn exclusion_set(&self) -> ExclusionSet {
        ExclusionSet::from_patterns(self.exclusions.iter().cloned())
    }

    /// Scan options described by this configuration.
    pub fn scan_options(&self) -> ScanOptions {
        let mut options = ScanOptions::new()
            .with_min_size(megabytes(self.scan.min_size_mb))
            .with_files(self.scan.scan_files)
            .with_directories(self.scan.scan_directories)
            .with_skip_dot_entries(self.scan.skip_dot_entries);
        if let Some(depth) = self.scan.max_depth {
            options = options.with_max_depth(depth);
        }
        options
    }
}
