//! Scan command implementation

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use nix::unistd::Uid;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::exclusions::effective_exclusions;
use super::removal::{self, confirm, print_items};
use crate::cli::ScanArgs;
use crate::config::Config;
use crate::privilege;
use crate::scanner::{
    format_json, format_size, format_summary, format_table, parse_size,
    scan_directory_progressive, top_entries, FormatOptions, ScanEntry, ScanOptions,
};
use crate::selection::parse_selection;

/// Rows offered for selection, as a multiple of the rows normally shown.
const SELECTION_FACTOR: usize = 3;

/// Largest entries named in the live spinner line.
const LIVE_TOP: usize = 3;

/// Run the scan command
pub fn run(args: ScanArgs, config: &Config, quiet: bool) -> Result<()> {
    let root = resolve_root(&args, config)?;
    let options = build_options(&args, config)?;
    let exclusions = effective_exclusions(&args.exclusions, config);
    let top = args.top.unwrap_or(config.scan.entries_to_show);
    if top == 0 {
        bail!("--top must be at least 1");
    }

    if privilege::needs_elevation(&root, Uid::effective()) {
        tracing::warn!(root = %root.display(), "Scanning a system path without root privileges");
        if !quiet {
            eprintln!(
                "Warning: not running as root; some directories under {} may be unreadable.",
                root.display()
            );
        }
    }

    let progress = spinner(quiet || args.json)?;
    let scanned = {
        let mut observer = |results: &[ScanEntry], current: &Path| {
            progress.set_message(live_message(results, current));
        };
        scan_directory_progressive(&root, &exclusions, &options, &mut observer)
    };
    progress.finish_and_clear();
    let entries = scanned?;

    if args.json {
        println!("{}", format_json(&entries, true)?);
        return Ok(());
    }

    let interactive = args.interactive || config.scan.interactive_by_default;
    let shown = if interactive {
        top.saturating_mul(SELECTION_FACTOR)
    } else {
        top
    };

    print!(
        "{}",
        format_table(&entries, &FormatOptions::new().with_top_n(shown))
    );
    if !quiet {
        println!();
        println!("{}", format_summary(&entries, shown));
    }

    if !interactive || entries.is_empty() {
        return Ok(());
    }

    let candidates = top_entries(&entries, shown);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let Some(indices) = prompt_selection(&mut input, &mut output, candidates.len())? else {
        println!("Nothing removed.");
        return Ok(());
    };
    let selected: Vec<ScanEntry> = indices
        .iter()
        .filter_map(|&i| candidates.get(i - 1))
        .cloned()
        .collect();

    print_items("Selected", &selected);

    if !privilege::is_elevated() && selected.iter().any(|e| privilege::is_system_path(&e.path)) {
        tracing::warn!("Removing system paths without root privileges");
        eprintln!("Warning: some selected items are system paths; removal may be denied.");
    }

    if !args.force
        && !args.dry_run
        && !confirm(&mut input, &mut output, "\nRemove these items? [y/N] ")?
    {
        println!("Aborted.");
        return Ok(());
    }

    let report = removal::execute(&selected, args.dry_run);

    if report.has_failures() {
        std::process::exit(5); // Partial failure
    }

    Ok(())
}

fn resolve_root(args: &ScanArgs, config: &Config) -> Result<PathBuf> {
    let root = match args.path.clone().or_else(|| config.scan.default_root.clone()) {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    Ok(root.canonicalize().unwrap_or(root))
}

/// Scan options from the configuration, overridden by command-line flags.
fn build_options(args: &ScanArgs, config: &Config) -> Result<ScanOptions> {
    let mut options = config.scan_options();

    if let Some(raw) = &args.min_size {
        let bytes = parse_size(raw).with_context(|| format!("Invalid size: {}", raw))?;
        options = options.with_min_size(bytes);
    }
    if args.files_only {
        options = options.with_files(true).with_directories(false);
    }
    if args.dirs_only {
        options = options.with_files(false).with_directories(true);
    }
    if args.skip_dot {
        options = options.with_skip_dot_entries(true);
    }
    if args.all {
        options = options.with_skip_dot_entries(false);
    }
    if let Some(depth) = args.max_depth {
        options = options.with_max_depth(depth);
    }

    Ok(options)
}

fn spinner(hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }

    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    progress.enable_steady_tick(Duration::from_millis(100));
    Ok(progress)
}

fn live_message(results: &[ScanEntry], current: &Path) -> String {
    let largest: Vec<String> = top_entries(results, LIVE_TOP)
        .iter()
        .map(|e| {
            let name = e.path.file_name().unwrap_or(e.path.as_os_str());
            format!("{} {}", name.to_string_lossy(), format_size(e.size))
        })
        .collect();

    if largest.is_empty() {
        format!("{}", current.display())
    } else {
        format!("{} | largest: {}", current.display(), largest.join(", "))
    }
}

/// Ask for a selection until it parses. `None` when the user quits or input ends.
fn prompt_selection<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    max_index: usize,
) -> io::Result<Option<Vec<usize>>> {
    loop {
        write!(
            output,
            "\nSelect entries to remove (e.g. 1,3-5 or all; q to quit): "
        )?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
            return Ok(None);
        }

        match parse_selection(line, max_index) {
            Ok(indices) => return Ok(Some(indices)),
            Err(err) => writeln!(output, "Invalid selection: {}", err)?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(input: &str, max: usize) -> (Option<Vec<usize>>, String) {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = prompt_selection(&mut reader, &mut output, max).unwrap();
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_prompt_accepts_valid_selection() {
        let (result, _) = prompt("1,3-4\n", 5);
        assert_eq!(result, Some(vec![1, 3, 4]));
    }

    #[test]
    fn test_prompt_reprompts_on_invalid_input() {
        let (result, output) = prompt("9\nabc\n2\n", 5);

        assert_eq!(result, Some(vec![2]));
        assert_eq!(output.matches("Invalid selection").count(), 2);
        assert_eq!(output.matches("Select entries").count(), 3);
    }

    #[test]
    fn test_prompt_quit_and_eof() {
        assert_eq!(prompt("q\n", 5).0, None);
        assert_eq!(prompt("Quit\n", 5).0, None);
        assert_eq!(prompt("", 5).0, None);
    }

    #[test]
    fn test_live_message_names_largest() {
        let results = vec![
            ScanEntry::file("/d/small", 10),
            ScanEntry::directory("/d/big", 2048),
        ];
        let message = live_message(&results, Path::new("/d/sub"));

        assert!(message.starts_with("/d/sub | largest: big"));
        assert!(message.contains("small"));
        assert_eq!(live_message(&[], Path::new("/d")), "/d");
    }

    #[test]
    fn test_flags_override_config() {
        let args = ScanArgs {
            min_size: Some("2KB".into()),
            dirs_only: true,
            skip_dot: true,
            max_depth: Some(2),
            ..Default::default()
        };
        let options = build_options(&args, &Config::default()).unwrap();

        assert_eq!(options.min_size, 2048);
        assert!(!options.include_files);
        assert!(options.include_directories);
        assert!(options.skip_dot_entries);
        assert_eq!(options.max_depth, Some(2));
    }

    #[test]
    fn test_invalid_min_size_is_an_error() {
        let args = ScanArgs {
            min_size: Some("lots".into()),
            ..Default::default()
        };
        assert!(build_options(&args, &Config::default()).is_err());
    }
}
