//! Column edge detection from baseline extents.

use tracing::debug;

use crate::core::config::{ConfigValidator, EdgeDetectionConfig};
use crate::core::errors::SegResult;
use crate::domain::{line_x_extent, Page};

/// Detects the x-coordinates of column edges on a page.
///
/// The detector scans the page left to right in windows sized as a fraction
/// of the page width. Lines whose leftmost baseline point falls inside the
/// current window seed a column; the column's left edge is the smallest such
/// point and its right edge the largest rightmost point among the seeding
/// lines. The next window starts at the freshly found right edge, so columns
/// are discovered contiguously rather than on a fixed grid.
///
/// Overlapping columns are not handled; the detector assumes columns are
/// horizontally separated.
#[derive(Debug, Clone)]
pub struct ColumnEdgeDetector {
    config: EdgeDetectionConfig,
}

impl ColumnEdgeDetector {
    /// Creates a detector with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the window or gap fractions are out
    /// of range.
    pub fn new(config: EdgeDetectionConfig) -> SegResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Scans the page and returns the detected edge sequence.
    ///
    /// The result always has even length: pair `(edges[2i], edges[2i + 1])`
    /// delimits column `i`'s `[left, right)` span, and pairs are
    /// non-decreasing left to right. A page with no lines yields an empty
    /// sequence.
    ///
    /// Every line is validated before its baseline is read; a malformed line
    /// anywhere on the page fails the whole scan.
    pub fn detect(&self, page: &Page) -> SegResult<Vec<i32>> {
        let width = page.width() as f64;
        let gap_px = self.config.gap * width;

        // [min_x, max_x] extent per line
        let mut extents = Vec::with_capacity(page.lines().len());
        for line in page.lines() {
            extents.push(line_x_extent(line)?);
        }

        let mut edges: Vec<i32> = Vec::new();
        let mut left = 0.0_f64;
        let mut right = self.config.window;

        while right < 1.0 + self.config.gap {
            let window_left = left * width;
            let window_right = right * width;

            // Lines whose leftmost point starts inside the window.
            let mut in_window: Vec<(i32, i32)> = Vec::new();
            for &(min_x, max_x) in &extents {
                let x = min_x as f64;
                if x >= window_left && x <= window_right {
                    in_window.push((min_x, max_x));
                }
            }

            if in_window.is_empty() {
                left = right;
                right += self.config.window;
                continue;
            }

            let mut max_min_x = i32::MIN;
            for &(min_x, _) in &in_window {
                max_min_x = max_min_x.max(min_x);
            }

            // A seeding line close to the window's right edge suggests the
            // column continues slightly past it; fold in lines starting just
            // beyond, up to the gap tolerance.
            if window_right - max_min_x as f64 <= gap_px {
                let reach = max_min_x as f64 + gap_px;
                for &(min_x, max_x) in &extents {
                    let x = min_x as f64;
                    if x > window_right && x <= reach {
                        in_window.push((min_x, max_x));
                    }
                }
            }

            let mut left_edge = i32::MAX;
            let mut right_edge = i32::MIN;
            for &(min_x, max_x) in &in_window {
                left_edge = left_edge.min(min_x);
                right_edge = right_edge.max(max_x);
            }

            edges.push(left_edge);
            edges.push(right_edge);

            // Degenerate zero-width geometry can pin the window in place;
            // stop rather than re-detect the same column forever.
            let next_left = right_edge as f64 / width;
            if next_left <= left {
                debug!(right_edge, "column scan stalled, stopping");
                break;
            }

            left = next_left;
            right = next_left + self.config.window;
        }

        debug!(columns = edges.len() / 2, "edge detection complete");

        Ok(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Point, TextLine};

    fn line(id: &str, min_x: i32, max_x: i32, y: i32) -> TextLine {
        TextLine::new(
            id,
            vec![Point::new(min_x, y), Point::new(max_x, y + 2)],
            Some("text".to_string()),
        )
    }

    fn detector() -> ColumnEdgeDetector {
        ColumnEdgeDetector::new(EdgeDetectionConfig::default()).unwrap()
    }

    #[test]
    fn test_empty_page_yields_no_edges() {
        let page = Page::new(1000, 1000, "p.jpg", vec![]);
        assert!(detector().detect(&page).unwrap().is_empty());
    }

    #[test]
    fn test_single_column() {
        let lines = vec![
            line("a", 50, 700, 100),
            line("b", 55, 720, 200),
            line("c", 48, 680, 300),
        ];
        let page = Page::new(1000, 1000, "p.jpg", lines);
        let edges = detector().detect(&page).unwrap();
        assert_eq!(edges, vec![48, 720]);
    }

    #[test]
    fn test_two_columns() {
        let lines = vec![
            line("a1", 50, 400, 100),
            line("a2", 55, 420, 200),
            line("b1", 600, 950, 100),
            line("b2", 610, 940, 200),
        ];
        let page = Page::new(1000, 1000, "p.jpg", lines);
        let edges = detector().detect(&page).unwrap();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[0], 50);
        assert_eq!(edges[1], 420);
        assert_eq!(edges[2], 600);
        assert_eq!(edges[3], 950);
    }

    #[test]
    fn test_edges_are_non_decreasing() {
        let lines = vec![
            line("a", 10, 300, 50),
            line("b", 350, 620, 60),
            line("c", 700, 990, 70),
        ];
        let page = Page::new(1000, 800, "p.jpg", lines);
        let edges = detector().detect(&page).unwrap();
        assert_eq!(edges.len() % 2, 0);
        for pair in edges.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_detection_is_deterministic() {
        let lines = vec![
            line("a1", 50, 400, 100),
            line("b1", 600, 950, 100),
            line("a2", 62, 380, 300),
        ];
        let page = Page::new(1000, 1000, "p.jpg", lines);
        let d = detector();
        let first = d.detect(&page).unwrap();
        let second = d.detect(&page).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_boundary_line_absorbed_into_column() {
        // One line starts just inside the first window's right edge, another
        // just beyond it but within the gap tolerance; both should land in
        // the same column.
        let lines = vec![
            line("a", 150, 400, 100),
            line("b", 190, 410, 200), // min_x within gap (30px) of window edge at 200
            line("c", 215, 430, 300), // just past the edge, inside the extended reach
        ];
        let page = Page::new(1000, 1000, "p.jpg", lines);
        let edges = detector().detect(&page).unwrap();
        assert_eq!(edges[0], 150);
        assert_eq!(edges[1], 430);
    }

    #[test]
    fn test_malformed_line_fails_scan() {
        let bad = TextLine::new("bad", vec![Point::new(5, 5)], None);
        let page = Page::new(1000, 1000, "p.jpg", vec![bad]);
        assert!(detector().detect(&page).is_err());
    }
}
