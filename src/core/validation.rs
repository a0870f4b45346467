//! Input validation for baseline geometry.
//!
//! Baselines arrive from external annotation files and are the single source
//! of geometric truth for the whole pipeline, so every component validates a
//! line before reading its points. Validation failures indicate corrupt
//! annotation and abort the current page.

use crate::core::errors::{SegResult, SegmentationError};
use crate::domain::TextLine;

/// Validates a text line's baseline before any geometric read.
///
/// Checks that the baseline holds at least two points and that no coordinate
/// is negative. Point shape (exactly two dimensions per point) is enforced at
/// the parse boundary, where raw coordinate tokens still exist; after parsing
/// it is guaranteed by the [`crate::domain::Point`] type.
///
/// # Errors
///
/// * [`SegmentationError::InsufficientPoints`] if fewer than 2 points
/// * [`SegmentationError::NegativeCoordinate`] on the first negative coordinate
pub fn validate_line(line: &TextLine) -> SegResult<()> {
    let points = line.baseline();

    if points.len() < 2 {
        return Err(SegmentationError::InsufficientPoints {
            line_id: line.id().to_string(),
            count: points.len(),
        });
    }

    for point in points {
        if point.x < 0 || point.y < 0 {
            return Err(SegmentationError::NegativeCoordinate {
                line_id: line.id().to_string(),
                x: point.x,
                y: point.y,
            });
        }
    }

    Ok(())
}

/// Validates that page dimensions are positive.
pub fn validate_page_dimensions(width: u32, height: u32, context: &str) -> SegResult<()> {
    if width == 0 || height == 0 {
        return Err(SegmentationError::annotation(
            context,
            format!("page dimensions must be positive, got {}x{}", width, height),
        ));
    }
    Ok(())
}

/// Validates that a line set is not empty before aggregate geometry is computed.
#[inline]
pub fn validate_non_empty_lines(lines: &[&TextLine]) -> SegResult<()> {
    if lines.is_empty() {
        return Err(SegmentationError::EmptyLineSet);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Point;

    fn line(points: Vec<Point>) -> TextLine {
        TextLine::new("l1", points, Some("text".to_string()))
    }

    #[test]
    fn test_accepts_valid_baseline() {
        let l = line(vec![Point::new(0, 10), Point::new(50, 12)]);
        assert!(validate_line(&l).is_ok());
    }

    #[test]
    fn test_rejects_single_point() {
        let l = line(vec![Point::new(5, 5)]);
        assert!(matches!(
            validate_line(&l),
            Err(SegmentationError::InsufficientPoints { count: 1, .. })
        ));
    }

    #[test]
    fn test_rejects_empty_baseline() {
        let l = line(vec![]);
        assert!(matches!(
            validate_line(&l),
            Err(SegmentationError::InsufficientPoints { count: 0, .. })
        ));
    }

    #[test]
    fn test_rejects_negative_coordinate() {
        let l = line(vec![Point::new(-1, 10), Point::new(50, 12)]);
        assert!(matches!(
            validate_line(&l),
            Err(SegmentationError::NegativeCoordinate { x: -1, y: 10, .. })
        ));

        let l = line(vec![Point::new(1, 10), Point::new(50, -3)]);
        assert!(matches!(
            validate_line(&l),
            Err(SegmentationError::NegativeCoordinate { x: 50, y: -3, .. })
        ));
    }

    #[test]
    fn test_zero_coordinates_are_valid() {
        let l = line(vec![Point::new(0, 0), Point::new(10, 0)]);
        assert!(validate_line(&l).is_ok());
    }

    #[test]
    fn test_page_dimensions() {
        assert!(validate_page_dimensions(100, 100, "test").is_ok());
        assert!(validate_page_dimensions(0, 100, "test").is_err());
        assert!(validate_page_dimensions(100, 0, "test").is_err());
    }
}
