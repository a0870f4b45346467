//! Error types for the segmentation pipeline.
//!
//! All errors are page-scoped: a batch driver catches at the per-page
//! boundary, records the failing file, and proceeds with the rest of the
//! corpus. Once an error triggers, the current page's segmentation is
//! discarded in full; no partial slice list is ever returned.

use thiserror::Error;

/// Convenient result alias for segmentation operations.
pub type SegResult<T> = Result<T, SegmentationError>;

/// Errors that can occur while segmenting a page.
///
/// The validation variants (`MalformedGeometry`, `InsufficientPoints`,
/// `NegativeCoordinate`) indicate corrupt input annotation and are never
/// recovered from within a page. `EmptyLineSet` is a caller-misuse guard.
/// `GrowthRateTooSmall` signals that the adaptive scan cannot converge on
/// the current page.
#[derive(Debug, Error)]
pub enum SegmentationError {
    /// A baseline coordinate token could not be read as a 2D point.
    #[error("line '{line_id}': malformed baseline geometry: {detail}")]
    MalformedGeometry {
        /// Identifier of the offending line.
        line_id: String,
        /// What was wrong with the raw geometry.
        detail: String,
    },

    /// A baseline has fewer than the two points needed to span a line.
    #[error("line '{line_id}': baseline contains {count} point(s), at least 2 required")]
    InsufficientPoints {
        /// Identifier of the offending line.
        line_id: String,
        /// Number of points actually present.
        count: usize,
    },

    /// A baseline point lies outside the page's pixel space.
    #[error("line '{line_id}': baseline has negative coordinate ({x}, {y})")]
    NegativeCoordinate {
        /// Identifier of the offending line.
        line_id: String,
        /// X-coordinate of the offending point.
        x: i32,
        /// Y-coordinate of the offending point.
        y: i32,
    },

    /// A bounding box was requested for zero lines.
    #[error("bounding box requested for an empty line set")]
    EmptyLineSet,

    /// The adaptive vertical scan cannot make progress.
    #[error(
        "growth rate {growth_rate} yields a {band_height}px band at y={cursor}; \
         the scan cannot advance"
    )]
    GrowthRateTooSmall {
        /// The growth rate at the time of failure.
        growth_rate: f64,
        /// The proposed band height in pixels (< 2).
        band_height: i64,
        /// The vertical cursor position when the scan stalled.
        cursor: i64,
    },

    /// An annotation file violated the PAGE XML structure this crate expects.
    #[error("annotation '{context}': {message}")]
    AnnotationParse {
        /// The file or element being parsed.
        context: String,
        /// What was wrong with it.
        message: String,
    },

    /// A crop rectangle does not intersect the page image.
    #[error(
        "crop region ({left}, {top})-({right}, {bottom}) lies outside the \
         {width}x{height} page image"
    )]
    CropOutOfBounds {
        /// Left edge of the requested region.
        left: i32,
        /// Top edge of the requested region.
        top: i32,
        /// Right edge of the requested region.
        right: i32,
        /// Bottom edge of the requested region.
        bottom: i32,
        /// Width of the page image.
        width: u32,
        /// Height of the page image.
        height: u32,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {0}")]
    Config(#[from] crate::core::config::ConfigError),

    /// Error occurred while loading a page image.
    #[error("image load")]
    ImageLoad(#[from] image::ImageError),

    /// Error from the XML reader.
    #[error("xml read")]
    Xml(#[from] quick_xml::Error),

    /// Error serializing a metadata record.
    #[error("metadata serialization")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

impl SegmentationError {
    /// Creates an annotation parse error with context.
    pub fn annotation(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AnnotationParse {
            context: context.into(),
            message: message.into(),
        }
    }
}
