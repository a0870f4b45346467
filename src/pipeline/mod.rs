//! Per-page segmentation orchestration and statistics.

pub mod segmenter;
pub mod stats;

pub use segmenter::{PageSegmenter, PageSegmenterConfig};
pub use stats::{CorpusStats, StatsManager};
