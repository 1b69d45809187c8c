use std::path::Path;
use std::time::Instant;

use super::entry::ScanEntry;
use super::options::ProgressCadence;

/// Receives live snapshots while a scan is running.
///
/// `results` is the unsorted list collected so far; `current` is the path
/// being visited. Called synchronously from the walking thread.
pub trait ScanObserver {
    fn on_progress(&mut self, results: &[ScanEntry], current: &Path);
}

impl<F> ScanObserver for F
where
    F: FnMut(&[ScanEntry], &Path),
{
    fn on_progress(&mut self, results: &[ScanEntry], current: &Path) {
        self(results, current)
    }
}

/// Observer that ignores every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ScanObserver for NoProgress {
    fn on_progress(&mut self, _results: &[ScanEntry], _current: &Path) {}
}

/// Decides whether an event should reach the observer.
#[derive(Debug)]
pub(crate) struct ProgressGate {
    cadence: ProgressCadence,
    last: Option<Instant>,
}

impl ProgressGate {
    pub(crate) fn new(cadence: ProgressCadence) -> Self {
        Self {
            cadence,
            last: None,
        }
    }

    /// A new entry was added to the results.
    pub(crate) fn on_entry(&mut self) -> bool {
        match self.cadence {
            ProgressCadence::EveryEntry => true,
            ProgressCadence::Throttled(_) => self.interval_elapsed(),
        }
    }

    /// A directory is about to be visited.
    pub(crate) fn on_visit(&mut self) -> bool {
        match self.cadence {
            ProgressCadence::EveryEntry => false,
            ProgressCadence::Throttled(_) => self.interval_elapsed(),
        }
    }

    fn interval_elapsed(&mut self) -> bool {
        let ProgressCadence::Throttled(interval) = self.cadence else {
            return true;
        };
        let now = Instant::now();
        match self.last {
            Some(last) if now.duration_since(last) < interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}
