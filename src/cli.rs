use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Diskface - find the largest files and directories and remove them
#[derive(Parser, Debug)]
#[command(name = "diskface")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH", env = "DISKFACE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find the largest files and directories, optionally removing some
    Scan(ScanArgs),

    /// List or edit the exclusion patterns
    Exclusions(ExclusionsArgs),

    /// Remove the configured temporary paths
    Clean(CleanArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Args, Debug)]
pub struct ExclusionsArgs {
    #[command(subcommand)]
    pub action: ExclusionAction,
}

#[derive(Subcommand, Debug)]
pub enum ExclusionAction {
    /// List the patterns a scan would use, numbered for `remove`
    List(ExclusionArgs),

    /// Add patterns to the configuration file
    Add {
        /// Patterns to add, e.g. `/mnt` or `**/node_modules`
        #[arg(required = true, value_name = "PATTERN")]
        patterns: Vec<String>,
    },

    /// Remove patterns by their listed number, e.g. `2`, `1-3` or `all`
    Remove {
        #[arg(required = true, value_name = "SELECTION")]
        selection: Vec<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct CleanArgs {
    /// Additional temporary-path patterns (can be used multiple times)
    #[arg(short, long, value_name = "PATTERN")]
    pub temp_path: Vec<String>,

    /// Don't ask for confirmation before removing
    #[arg(short, long)]
    pub force: bool,

    /// Show what would be removed without doing it
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Default)]
pub struct ExclusionArgs {
    /// Additional patterns to exclude (can be used multiple times)
    #[arg(short, long, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Ignore the patterns from the configuration file
    #[arg(long)]
    pub no_default_excludes: bool,
}

#[derive(Args, Debug, Default)]
pub struct ScanArgs {
    /// Directory to analyze (default: configured root, else current directory)
    pub path: Option<PathBuf>,

    /// Minimum size to report, e.g. 500MB or 1.5GB (bare numbers are MB)
    #[arg(short, long, value_name = "SIZE")]
    pub min_size: Option<String>,

    /// Number of ranked entries to show
    #[arg(short = 'n', long, value_name = "N")]
    pub top: Option<usize>,

    /// Maximum depth to descend below the root
    #[arg(short = 'd', long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Report directories only
    #[arg(long, conflicts_with = "files_only")]
    pub dirs_only: bool,

    /// Report files only
    #[arg(long)]
    pub files_only: bool,

    /// Skip dot-prefixed files and directories
    #[arg(long, conflicts_with = "all")]
    pub skip_dot: bool,

    /// Include dot-prefixed files and directories even if configured to skip them
    #[arg(short, long)]
    pub all: bool,

    #[command(flatten)]
    pub exclusions: ExclusionArgs,

    /// Select entries for removal after the scan
    #[arg(short, long)]
    pub interactive: bool,

    /// Don't ask for confirmation before removing
    #[arg(short, long)]
    pub force: bool,

    /// Show what would be removed without doing it
    #[arg(long)]
    pub dry_run: bool,

    /// Output as JSON
    #[arg(long, conflicts_with = "interactive")]
    pub json: bool,
}
