//! Greedy planning of vertical slice bands.
//!
//! The planner walks a vertical cursor down one column of a page, proposing
//! bands sized by an adaptive growth rate and adjusting that rate until the
//! text accumulated in the band lands inside the acceptable length range.
//! Each accepted band becomes one [`SliceDescriptor`].

use rand::Rng;
use tracing::debug;

use crate::core::config::{ConfigValidator, SlicePlannerConfig};
use crate::core::errors::{SegResult, SegmentationError};
use crate::domain::{line_y_extent, BoundingBox, Point, SliceDescriptor, TextLine};

/// Plans slice bands for one column of lines at a time.
///
/// The scan is a small state machine driven by a single loop: each iteration
/// either emits a slice and advances the cursor, skips an unsplittable line
/// and advances the cursor, or adjusts the growth rate and retries. The
/// cursor strictly advances on every emission or skip, and a retry that
/// shrinks the proposed band below two pixels aborts the page rather than
/// looping forever.
#[derive(Debug, Clone)]
pub struct SlicePlanner {
    config: SlicePlannerConfig,
}

impl SlicePlanner {
    /// Creates a planner with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any parameter is out of range.
    pub fn new(config: SlicePlannerConfig) -> SegResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The planner's configuration.
    pub fn config(&self) -> &SlicePlannerConfig {
        &self.config
    }

    /// Plans the slices of one column.
    ///
    /// # Arguments
    ///
    /// * `page_height` - Height of the page in pixels.
    /// * `lines` - The column's lines in page order.
    /// * `stray` - The page's unassigned-line bucket, when planning a real
    ///   column of a multi-column page. Emitted slices reconcile their top
    ///   edge against stray baselines so visually adjacent text outside every
    ///   column is not dropped. Pass `None` when planning the bucket itself
    ///   or a single-column page.
    /// * `rng` - Source of the bounded jitter applied when a band holds no
    ///   text. Injected so the scan is reproducible under a fixed seed.
    ///
    /// # Errors
    ///
    /// * [`SegmentationError::GrowthRateTooSmall`] if the adaptive scan
    ///   cannot advance
    /// * Validation errors from malformed lines
    pub fn plan_column<R: Rng>(
        &self,
        page_height: u32,
        lines: &[&TextLine],
        stray: Option<&[&TextLine]>,
        rng: &mut R,
    ) -> SegResult<Vec<SliceDescriptor>> {
        let mut slices = Vec::new();
        if lines.is_empty() {
            return Ok(slices);
        }

        let height = page_height as i64;
        let height_f = page_height as f64;
        let target = self.config.target_len;
        let padding = (self.config.bottom_padding * height_f) as i64;

        // How far down the page the scan has sliced so far.
        let mut cursor: i64 = 0;
        // Candidate band height as a fraction of page height.
        let mut growth = self.config.initial_growth;

        while cursor < height {
            let band = (growth * height_f).round() as i64;
            if band < 2 {
                return Err(SegmentationError::GrowthRateTooSmall {
                    growth_rate: growth,
                    band_height: band,
                    cursor,
                });
            }
            let band_bottom = cursor + band;

            let band_lines = lines_in_band(lines, cursor, band_bottom)?;
            let ground_truth: String = band_lines.iter().filter_map(|l| l.text()).collect();
            let text_len = ground_truth.chars().count();

            if band_lines.len() == 1 && text_len > target {
                // A lone line longer than the target cannot be split into a
                // smaller band; skip past it. Its text never reaches the
                // training set, a known limitation of baseline-driven
                // slicing.
                let bbox = BoundingBox::from_lines(&band_lines)?;
                debug!(
                    line = band_lines[0].id(),
                    chars = text_len,
                    "skipping unsplittable oversized line"
                );
                cursor = bbox.max_y() as i64 + 1;
            } else if text_len == 0 {
                if band_bottom > height {
                    // Nothing but empty space below: end of content.
                    break;
                }
                let jitter = rng.gen_range(self.config.jitter_low..self.config.jitter_high);
                growth *= self.config.empty_band_growth + jitter;
            } else if text_len > target {
                // Overshoot: shrink proportionally and retry the same cursor.
                growth *= target as f64 / text_len as f64;
            } else {
                if (text_len as f64) < self.config.min_len() {
                    // Undershoot: accept the undersized slice rather than
                    // loop indefinitely, but grow for the next band.
                    growth *= self.config.min_len() / text_len as f64;
                }

                let bbox = BoundingBox::from_lines(&band_lines)?;
                let top = match stray {
                    Some(bucket) => self.reconcile_top(bucket, cursor, &bbox, height_f)?,
                    None => cursor,
                };
                let advance = bbox.max_y() as i64 + 1;

                slices.push(SliceDescriptor::new(
                    Point::new(bbox.min_x(), top as i32),
                    Point::new(bbox.max_x(), (advance + padding) as i32),
                    ground_truth,
                ));
                cursor = advance;
            }
        }

        Ok(slices)
    }

    /// Finds the effective top edge of a slice among stray baselines.
    ///
    /// Returns the largest stray baseline bottom that lies strictly between
    /// the cursor and the slice's bottom (minus the reconcile margin), or the
    /// cursor itself when no stray line qualifies. Stray lines without text
    /// contribute nothing to ground truth and are ignored.
    fn reconcile_top(
        &self,
        bucket: &[&TextLine],
        cursor: i64,
        bbox: &BoundingBox,
        page_height: f64,
    ) -> SegResult<i64> {
        let ceiling = bbox.max_y() as f64 - self.config.reconcile_margin * page_height;
        let mut nearest = cursor;

        for line in bucket {
            if !line.has_text() {
                continue;
            }
            let (_, max_y) = line_y_extent(line)?;
            let max_y = max_y as i64;
            if max_y > nearest && (max_y as f64) < ceiling {
                nearest = max_y;
            }
        }

        Ok(nearest)
    }
}

/// Returns the lines whose baseline y-range lies fully within
/// `[top, bottom)`, preserving page order.
fn lines_in_band<'a>(
    lines: &[&'a TextLine],
    top: i64,
    bottom: i64,
) -> SegResult<Vec<&'a TextLine>> {
    let mut in_band = Vec::new();
    for &line in lines {
        let (min_y, max_y) = line_y_extent(line)?;
        if min_y as i64 >= top && (max_y as i64) < bottom {
            in_band.push(line);
        }
    }
    Ok(in_band)
}
