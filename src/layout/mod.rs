//! Column detection and greedy slice planning.
//!
//! The layout algorithms turn a page's baseline geometry into slice
//! rectangles: edge detection finds column spans, grouping sorts lines into
//! them, and the planner walks down each column sizing bands to a target
//! transcription length.

pub mod columns;
pub mod edges;
pub mod planner;

pub use columns::{assign_column, ColumnGrouping, ColumnSlot};
pub use edges::ColumnEdgeDetector;
pub use planner::SlicePlanner;
