//! Statistics management for corpus runs.

use std::sync::Mutex;

/// Counters for one corpus run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CorpusStats {
    /// Pages segmented successfully.
    pub pages_processed: usize,
    /// Pages discarded because of a per-page error.
    pub pages_failed: usize,
    /// Total slices emitted across all successful pages.
    pub slices_emitted: usize,
}

/// Thread-safe statistics accumulator for a corpus run.
pub struct StatsManager {
    stats: Mutex<CorpusStats>,
}

impl StatsManager {
    /// Creates a new StatsManager instance.
    pub fn new() -> Self {
        Self {
            stats: Mutex::new(CorpusStats::default()),
        }
    }

    /// Gets a copy of the current statistics.
    pub fn get_stats(&self) -> CorpusStats {
        *self.stats.lock().unwrap()
    }

    /// Records a successfully segmented page and its slice count.
    pub fn record_page(&self, slice_count: usize) {
        let mut stats = self.stats.lock().unwrap();
        stats.pages_processed += 1;
        stats.slices_emitted += slice_count;
    }

    /// Records a page that failed segmentation.
    pub fn record_failure(&self) {
        let mut stats = self.stats.lock().unwrap();
        stats.pages_failed += 1;
    }

    /// Resets the statistics.
    pub fn reset_stats(&self) {
        let mut stats = self.stats.lock().unwrap();
        *stats = CorpusStats::default();
    }
}

impl Default for StatsManager {
    fn default() -> Self {
        Self::new()
    }
}
