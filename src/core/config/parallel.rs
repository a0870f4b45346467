//! Shared parallel processing configuration types.

use serde::{Deserialize, Serialize};

/// Centralized configuration for parallel processing behavior.
///
/// Pages are independent of each other, and within a page the columns can be
/// planned concurrently since planning only reads shared line data. This
/// struct decides when the extra threads are worth it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParallelPolicy {
    /// Maximum number of threads to use for parallel processing.
    /// If None, rayon will use the default thread pool size (typically number
    /// of CPU cores). Default: None
    #[serde(default)]
    pub max_threads: Option<usize>,

    /// Column count at or below which a page's columns are planned
    /// sequentially. Default: 4
    #[serde(default = "ParallelPolicy::default_column_threshold")]
    pub column_threshold: usize,
}

impl ParallelPolicy {
    /// Create a new ParallelPolicy with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of threads.
    pub fn with_max_threads(mut self, max_threads: Option<usize>) -> Self {
        self.max_threads = max_threads;
        self
    }

    /// Set the sequential-vs-parallel column threshold.
    pub fn with_column_threshold(mut self, threshold: usize) -> Self {
        self.column_threshold = threshold;
        self
    }

    /// Install the global rayon thread pool with the configured number of
    /// threads.
    ///
    /// Call once at application startup before any parallel processing
    /// occurs. If `max_threads` is None, this method does nothing and rayon
    /// uses its default thread pool size.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the thread pool was configured
    /// - `Ok(false)` if `max_threads` is None (no configuration needed)
    /// - `Err` if the thread pool has already been initialized
    pub fn install_global_thread_pool(&self) -> Result<bool, rayon::ThreadPoolBuildError> {
        if let Some(num_threads) = self.max_threads {
            rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build_global()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn default_column_threshold() -> usize {
        4
    }
}

impl Default for ParallelPolicy {
    fn default() -> Self {
        Self {
            max_threads: None,
            column_threshold: Self::default_column_threshold(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods() {
        let policy = ParallelPolicy::new()
            .with_max_threads(Some(2))
            .with_column_threshold(1);
        assert_eq!(policy.max_threads, Some(2));
        assert_eq!(policy.column_threshold, 1);
    }

    #[test]
    fn test_serde_defaults() {
        let policy: ParallelPolicy = serde_json::from_str("{}").unwrap();
        assert_eq!(policy.max_threads, None);
        assert_eq!(policy.column_threshold, 4);
    }
}
