//! # pageslice
//!
//! A Rust library that converts baseline-annotated handwriting pages into
//! rectangular image slices paired with their ground-truth transcriptions,
//! producing supervised training data for vision-to-text models.
//!
//! ## Features
//!
//! - Column boundary detection from line baseline extents
//! - Assignment of text lines to detected columns
//! - Adaptive greedy planning of vertical slice bands sized to a target
//!   transcription length
//! - PAGE XML (Transkribus/PRImA) annotation loading
//! - Dataset assembly: split sampling, image cropping, and JSONL metadata
//!
//! ## Components
//!
//! - **Column Edge Detection**: Infer column spans from baseline clustering
//! - **Column Grouping**: Classify each line into a column or the stray bucket
//! - **Slice Planning**: Walk down each column, growing slice bands until the
//!   accumulated transcription reaches the target length band
//! - **Slice Extraction**: Crop the page image to each planned rectangle
//!
//! ## Modules
//!
//! * [`core`] - Error types, configuration, and input validation
//! * [`domain`] - Pages, text lines, and geometric primitives
//! * [`layout`] - Column detection and greedy slice planning
//! * [`pipeline`] - Per-page segmentation orchestration and statistics
//! * [`dataset`] - Cropping, split sampling, and metadata records
//! * [`io`] - PAGE XML annotation loading
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pageslice::prelude::*;
//!
//! # fn main() -> Result<(), pageslice::core::SegmentationError> {
//! let page = pageslice::io::load_page(std::path::Path::new("pages/0001.xml"))?;
//!
//! let segmenter = PageSegmenter::new(PageSegmenterConfig::default())?;
//! let slices = segmenter.segment(&page)?;
//!
//! for slice in &slices {
//!     println!(
//!         "({}, {}) -> ({}, {}): {}",
//!         slice.top_left.x,
//!         slice.top_left.y,
//!         slice.bottom_right.x,
//!         slice.bottom_right.y,
//!         slice.ground_truth
//!     );
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod dataset;
pub mod domain;
pub mod io;
pub mod layout;
pub mod pipeline;
pub mod utils;

/// Commonly used types for working with the segmentation pipeline.
///
/// # Example
///
/// ```rust,no_run
/// use pageslice::prelude::*;
/// ```
pub mod prelude {
    // Segmentation pipeline (essential)
    pub use crate::pipeline::{PageSegmenter, PageSegmenterConfig};

    // Domain types
    pub use crate::domain::{Page, Point, SliceDescriptor, TextLine};

    // Error handling (essential)
    pub use crate::core::{SegResult, SegmentationError};

    // Dataset assembly
    pub use crate::dataset::{DatasetSplit, MetadataWriter, SliceRecord};
}
