//! Geometric primitives for baseline layout analysis.
//!
//! Baselines are polylines in page pixel space; the layout algorithms only
//! ever need their axis-aligned extents and the minimal rectangle enclosing a
//! group of them.

use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};

use crate::core::errors::{SegResult, SegmentationError};
use crate::core::validation::{validate_line, validate_non_empty_lines};
use crate::domain::page::TextLine;

/// A 2D point in page pixel space.
///
/// Coordinates are signed so that corrupt annotations with negative values
/// survive parsing and are rejected by validation, where the offending line
/// can be named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// X-coordinate of the point.
    pub x: i32,
    /// Y-coordinate of the point.
    pub y: i32,
}

impl Point {
    /// Creates a new point with the given coordinates.
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The minimal axis-aligned rectangle enclosing a set of baseline points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Top-left corner of the box.
    pub top_left: Point,
    /// Bottom-right corner of the box.
    pub bottom_right: Point,
}

impl BoundingBox {
    /// Creates a bounding box from corner coordinates.
    pub fn from_coords(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            top_left: Point::new(min_x, min_y),
            bottom_right: Point::new(max_x, max_y),
        }
    }

    /// Computes the bounding box of all baseline points across the given
    /// lines.
    ///
    /// Every line is validated before its points are read.
    ///
    /// # Errors
    ///
    /// * [`SegmentationError::EmptyLineSet`] if `lines` is empty
    /// * Validation errors from any malformed line
    pub fn from_lines(lines: &[&TextLine]) -> SegResult<Self> {
        validate_non_empty_lines(lines)?;

        let mut min_x = i32::MAX;
        let mut min_y = i32::MAX;
        let mut max_x = i32::MIN;
        let mut max_y = i32::MIN;

        for line in lines {
            validate_line(line)?;
            for point in line.baseline() {
                min_x = min_x.min(point.x);
                min_y = min_y.min(point.y);
                max_x = max_x.max(point.x);
                max_y = max_y.max(point.y);
            }
        }

        Ok(Self::from_coords(min_x, min_y, max_x, max_y))
    }

    /// The leftmost x-coordinate.
    #[inline]
    pub fn min_x(&self) -> i32 {
        self.top_left.x
    }

    /// The topmost y-coordinate.
    #[inline]
    pub fn min_y(&self) -> i32 {
        self.top_left.y
    }

    /// The rightmost x-coordinate.
    #[inline]
    pub fn max_x(&self) -> i32 {
        self.bottom_right.x
    }

    /// The bottommost y-coordinate.
    #[inline]
    pub fn max_y(&self) -> i32 {
        self.bottom_right.y
    }
}

/// Returns the `[min_x, max_x]` extent of a line's baseline.
///
/// The line is validated before its points are read.
pub fn line_x_extent(line: &TextLine) -> SegResult<(i32, i32)> {
    validate_line(line)?;
    extent(line, line.baseline().iter().map(|p| p.x))
}

/// Returns the `[min_y, max_y]` extent of a line's baseline.
///
/// The line is validated before its points are read.
pub fn line_y_extent(line: &TextLine) -> SegResult<(i32, i32)> {
    validate_line(line)?;
    extent(line, line.baseline().iter().map(|p| p.y))
}

fn extent(line: &TextLine, coords: impl Iterator<Item = i32>) -> SegResult<(i32, i32)> {
    match coords.minmax() {
        MinMaxResult::MinMax(lo, hi) => Ok((lo, hi)),
        MinMaxResult::OneElement(v) => Ok((v, v)),
        MinMaxResult::NoElements => Err(SegmentationError::InsufficientPoints {
            line_id: line.id().to_string(),
            count: 0,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, points: Vec<Point>) -> TextLine {
        TextLine::new(id, points, None)
    }

    #[test]
    fn test_extents() {
        let l = line("l1", vec![Point::new(10, 5), Point::new(3, 9), Point::new(7, 2)]);
        assert_eq!(line_x_extent(&l).unwrap(), (3, 10));
        assert_eq!(line_y_extent(&l).unwrap(), (2, 9));
    }

    #[test]
    fn test_extent_rejects_invalid_line() {
        let l = line("l1", vec![Point::new(10, 5)]);
        assert!(line_x_extent(&l).is_err());
    }

    #[test]
    fn test_bounding_box_single_line() {
        let l = line("l1", vec![Point::new(10, 20), Point::new(110, 25)]);
        let bbox = BoundingBox::from_lines(&[&l]).unwrap();
        assert_eq!(bbox.min_x(), 10);
        assert_eq!(bbox.min_y(), 20);
        assert_eq!(bbox.max_x(), 110);
        assert_eq!(bbox.max_y(), 25);
    }

    #[test]
    fn test_bounding_box_spans_all_lines() {
        let a = line("a", vec![Point::new(10, 20), Point::new(110, 25)]);
        let b = line("b", vec![Point::new(5, 60), Point::new(90, 62)]);
        let bbox = BoundingBox::from_lines(&[&a, &b]).unwrap();
        assert_eq!(bbox.min_x(), 5);
        assert_eq!(bbox.min_y(), 20);
        assert_eq!(bbox.max_x(), 110);
        assert_eq!(bbox.max_y(), 62);
    }

    #[test]
    fn test_bounding_box_empty_set() {
        assert!(matches!(
            BoundingBox::from_lines(&[]),
            Err(SegmentationError::EmptyLineSet)
        ));
    }

    #[test]
    fn test_bounding_box_rejects_malformed_member() {
        let good = line("good", vec![Point::new(10, 20), Point::new(110, 25)]);
        let bad = line("bad", vec![Point::new(-10, 20), Point::new(110, 25)]);
        assert!(BoundingBox::from_lines(&[&good, &bad]).is_err());
    }
}
