//! The page segmentation pipeline.
//!
//! Ties the layout algorithms together: detect column edges, group lines
//! into columns, then plan each column's slices. Columns only read shared
//! page data and write their own descriptor list, so they can be planned in
//! parallel and merged afterwards.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::config::{
    ConfigValidator, EdgeDetectionConfig, ParallelPolicy, SlicePlannerConfig,
};
use crate::core::errors::SegResult;
use crate::core::validation::validate_page_dimensions;
use crate::domain::{Page, SliceDescriptor, TextLine};
use crate::layout::{ColumnEdgeDetector, ColumnGrouping, SlicePlanner};

/// Configuration for the full segmentation pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PageSegmenterConfig {
    /// Column edge detection parameters.
    #[serde(default)]
    pub edge_detection: EdgeDetectionConfig,

    /// Slice planner parameters.
    #[serde(default)]
    pub planner: SlicePlannerConfig,

    /// Parallel processing behavior.
    #[serde(default)]
    pub parallel: ParallelPolicy,

    /// Base seed for the planner's jitter source. Each column derives its
    /// own stream from this, so results do not depend on whether columns ran
    /// sequentially or in parallel.
    #[serde(default)]
    pub seed: u64,
}

impl ConfigValidator for PageSegmenterConfig {
    fn validate(&self) -> Result<(), crate::core::config::ConfigError> {
        self.edge_detection.validate()?;
        self.planner.validate()?;
        Ok(())
    }

    fn get_defaults() -> Self {
        Self::default()
    }
}

/// Segments pages into slice descriptors.
pub struct PageSegmenter {
    detector: ColumnEdgeDetector,
    planner: SlicePlanner,
    parallel: ParallelPolicy,
    seed: u64,
}

impl PageSegmenter {
    /// Creates a segmenter from a validated configuration.
    pub fn new(config: PageSegmenterConfig) -> SegResult<Self> {
        let detector = ColumnEdgeDetector::new(config.edge_detection)?;
        let planner = SlicePlanner::new(config.planner)?;
        Ok(Self {
            detector,
            planner,
            parallel: config.parallel,
            seed: config.seed,
        })
    }

    /// Segments one page into slice descriptors.
    ///
    /// Any error — corrupt annotation geometry or a stalled scan — discards
    /// the whole page; no partial slice list is returned. Callers processing
    /// a corpus should catch per page and continue.
    pub fn segment(&self, page: &Page) -> SegResult<Vec<SliceDescriptor>> {
        validate_page_dimensions(page.width(), page.height(), page.image_file())?;

        let edges = self.detector.detect(page)?;
        let grouping = ColumnGrouping::build(page, &edges)?;

        debug!(
            columns = grouping.column_count(),
            unassigned = grouping.unassigned().len(),
            "grouped lines"
        );

        // One planning task per non-empty group. Real columns of a
        // multi-column page reconcile against the stray bucket; the bucket
        // itself is planned as its own pseudo-column.
        let stray = grouping
            .has_stray_bucket()
            .then(|| grouping.unassigned());

        let mut tasks: Vec<(u64, &[&TextLine], Option<&[&TextLine]>)> = Vec::new();
        for (index, column) in grouping.columns().iter().enumerate() {
            if column.is_empty() {
                continue;
            }
            tasks.push((index as u64, column.as_slice(), stray));
        }
        if !grouping.unassigned().is_empty() {
            tasks.push((
                grouping.columns().len() as u64,
                grouping.unassigned(),
                None,
            ));
        }

        let plan = |task_seed: u64, lines: &[&TextLine], stray: Option<&[&TextLine]>| {
            let mut rng = StdRng::seed_from_u64(self.column_seed(task_seed));
            self.planner
                .plan_column(page.height(), lines, stray, &mut rng)
        };

        let planned: SegResult<Vec<Vec<SliceDescriptor>>> =
            if tasks.len() <= self.parallel.column_threshold {
                tasks
                    .iter()
                    .map(|&(seed, lines, stray)| plan(seed, lines, stray))
                    .collect()
            } else {
                tasks
                    .par_iter()
                    .map(|&(seed, lines, stray)| plan(seed, lines, stray))
                    .collect()
            };

        let slices: Vec<SliceDescriptor> = planned?.into_iter().flatten().collect();

        info!(
            image = page.image_file(),
            columns = grouping.column_count(),
            slices = slices.len(),
            "segmented page"
        );

        Ok(slices)
    }

    /// Derives a per-column RNG seed from the base seed.
    fn column_seed(&self, task_index: u64) -> u64 {
        self.seed ^ (task_index.wrapping_add(1)).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}
