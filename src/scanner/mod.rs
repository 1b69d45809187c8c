mod entry;
mod formatter;
mod options;
mod progress;
mod size;
mod walker;

pub use entry::{sort_by_size, top_entries, EntryKind, ScanEntry};
pub use formatter::{format_json, format_summary, format_table, FormatOptions};
pub use options::{ProgressCadence, ScanOptions};
pub use progress::{NoProgress, ScanObserver};
pub use size::{format_size, megabytes, parse_size};
pub use walker::{scan_directory, scan_directory_progressive};
