//! Pages, text lines, and slice descriptors.
//!
//! A [`Page`] is the read-only view the segmentation pipeline consumes: pixel
//! dimensions, an opaque image reference, and the annotated text lines in
//! document order. Pages are constructed by the annotation loader and never
//! mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::domain::geometry::Point;

/// A single transcribed text line with its baseline geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    /// Annotation identifier, carried through to error reports.
    id: String,
    /// Ordered baseline points in page pixel space.
    baseline: Vec<Point>,
    /// Transcribed text, if the line has been transcribed.
    text: Option<String>,
}

impl TextLine {
    /// Creates a new text line.
    ///
    /// No validation happens here; lines are validated by every component
    /// that reads their geometry, so corrupt annotations are reported at the
    /// point of use with the line's id.
    pub fn new(id: impl Into<String>, baseline: Vec<Point>, text: Option<String>) -> Self {
        Self {
            id: id.into(),
            baseline,
            text,
        }
    }

    /// The annotation identifier of this line.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The ordered baseline points of this line.
    pub fn baseline(&self) -> &[Point] {
        &self.baseline
    }

    /// The transcription of this line, if present.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Whether this line carries a non-empty transcription.
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// An immutable page of annotated handwriting.
#[derive(Debug, Clone)]
pub struct Page {
    width: u32,
    height: u32,
    image_file: String,
    lines: Vec<TextLine>,
}

impl Page {
    /// Creates a new page.
    ///
    /// # Arguments
    ///
    /// * `width` - Page width in pixels (positive).
    /// * `height` - Page height in pixels (positive).
    /// * `image_file` - Opaque reference to the page image; the core never
    ///   interprets it, only the slice extractor resolves it.
    /// * `lines` - Text lines in document order.
    pub fn new(
        width: u32,
        height: u32,
        image_file: impl Into<String>,
        lines: Vec<TextLine>,
    ) -> Self {
        Self {
            width,
            height,
            image_file: image_file.into(),
            lines,
        }
    }

    /// Page width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Page height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The opaque image reference from the annotation file.
    pub fn image_file(&self) -> &str {
        &self.image_file
    }

    /// The text lines of this page in document order.
    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }
}

/// One planned crop of a page paired with its transcription.
///
/// Produced by the slice planner; the extractor turns it into an actual image
/// crop. The ground truth is the concatenation of the contributing lines'
/// text in page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceDescriptor {
    /// Top-left corner of the crop rectangle.
    pub top_left: Point,
    /// Bottom-right corner of the crop rectangle (already padded).
    pub bottom_right: Point,
    /// Concatenated transcription of the contributing lines.
    pub ground_truth: String,
}

impl SliceDescriptor {
    /// Creates a new slice descriptor.
    pub fn new(top_left: Point, bottom_right: Point, ground_truth: impl Into<String>) -> Self {
        Self {
            top_left,
            bottom_right,
            ground_truth: ground_truth.into(),
        }
    }

    /// Width of the crop rectangle in pixels.
    pub fn width(&self) -> i32 {
        self.bottom_right.x - self.top_left.x
    }

    /// Height of the crop rectangle in pixels.
    pub fn height(&self) -> i32 {
        self.bottom_right.y - self.top_left.y
    }
}
