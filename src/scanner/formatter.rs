use super::entry::{EntryKind, ScanEntry};
use super::size::format_size;

/// Format options for ranked output
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Show only the first N entries
    pub top_n: Option<usize>,
    /// Prefix rows with their 1-based rank, as used for selection
    pub numbered: bool,
    /// Append each entry's share of the total size
    pub show_percent: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            top_n: Some(20),
            numbered: true,
            show_percent: true,
        }
    }
}

impl FormatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = Some(n);
        self
    }

    pub fn with_numbers(mut self, numbered: bool) -> Self {
        self.numbered = numbered;
        self
    }

    pub fn with_percent(mut self, show: bool) -> Self {
        self.show_percent = show;
        self
    }

    pub fn unlimited() -> Self {
        Self {
            top_n: None,
            numbered: true,
            show_percent: true,
        }
    }
}

/// Format ranked entries as a table.
///
/// Percentages are relative to the sum of all `entries`, not only the rows shown.
pub fn format_table(entries: &[ScanEntry], options: &FormatOptions) -> String {
    let mut output = String::new();

    if options.numbered {
        output.push_str(&format!("{:>4}  ", "#"));
    }
    output.push_str(&format!("{:>12}  {:<4}  {}\n", "SIZE", "TYPE", "PATH"));
    if options.numbered {
        output.push_str(&format!("{:->4}  ", ""));
    }
    output.push_str(&format!("{:->12}  {:-<4}  {:-<50}\n", "", "", ""));

    if entries.is_empty() {
        output.push_str("No entries found\n");
        return output;
    }

    let total: u64 = entries.iter().map(|e| e.size).sum();
    let shown = options.top_n.unwrap_or(entries.len()).min(entries.len());

    for (i, entry) in entries.iter().take(shown).enumerate() {
        if options.numbered {
            output.push_str(&format!("{:>4}  ", i + 1));
        }
        let kind = match entry.kind {
            EntryKind::Directory => "dir",
            EntryKind::File => "file",
        };
        output.push_str(&format!(
            "{:>12}  {:<4}  {}",
            format_size(entry.size),
            kind,
            entry.path.display()
        ));
        if options.show_percent {
            output.push_str(&format!(" ({:.1}%)", percent(entry.size, total)));
        }
        output.push('\n');
    }

    if shown < entries.len() {
        output.push_str(&format!("... {} more\n", entries.len() - shown));
    }

    output
}

/// One-line summary of a result set.
pub fn format_summary(entries: &[ScanEntry], shown: usize) -> String {
    let total: u64 = entries.iter().map(|e| e.size).sum();
    format!(
        "Showing {} of {} entries, total size: {}",
        shown.min(entries.len()),
        entries.len(),
        format_size(total)
    )
}

/// Format entries as a JSON array
pub fn format_json(entries: &[ScanEntry], pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(entries)
    } else {
        serde_json::to_string(entries)
    }
}

fn percent(size: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        size as f64 / total as f64 * 100.0
    }
}
