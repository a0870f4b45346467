//! Assignment of text lines to detected columns.

use crate::core::errors::SegResult;
use crate::domain::{line_x_extent, Page, TextLine};

/// Where a line landed after column assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSlot {
    /// The line is fully contained in the column with this index.
    Column(usize),
    /// The line's extent does not fit inside any single column.
    Unassigned,
}

/// Determines which column a line belongs to.
///
/// With exactly one edge pair every line trivially belongs to column 0, with
/// no bounds check; simple pages should not depend on the edge detector
/// placing its pair perfectly. Otherwise the line goes to the first column
/// whose `[left, right]` span fully contains its `[min_x, max_x]` extent,
/// or to [`ColumnSlot::Unassigned`] if none does.
pub fn assign_column(edges: &[i32], line: &TextLine) -> SegResult<ColumnSlot> {
    if edges.len() == 2 {
        return Ok(ColumnSlot::Column(0));
    }

    let (min_x, max_x) = line_x_extent(line)?;

    for (index, pair) in edges.chunks_exact(2).enumerate() {
        if min_x >= pair[0] && max_x <= pair[1] {
            return Ok(ColumnSlot::Column(index));
        }
    }

    Ok(ColumnSlot::Unassigned)
}

/// All of a page's lines grouped by column.
///
/// Every line of the page appears in exactly one group: its column, or the
/// stray bucket when it spans no single column. Single-column pages use a
/// trivial identity grouping whose bucket is always empty.
#[derive(Debug)]
pub struct ColumnGrouping<'a> {
    columns: Vec<Vec<&'a TextLine>>,
    unassigned: Vec<&'a TextLine>,
}

impl<'a> ColumnGrouping<'a> {
    /// Groups the page's lines by the given edge sequence.
    ///
    /// Group order follows page order within each column.
    pub fn build(page: &'a Page, edges: &[i32]) -> SegResult<Self> {
        let column_count = edges.len() / 2;

        // Single column: every line belongs to it, no bounds checking.
        if column_count == 1 {
            return Ok(Self {
                columns: vec![page.lines().iter().collect()],
                unassigned: Vec::new(),
            });
        }

        let mut columns: Vec<Vec<&TextLine>> = vec![Vec::new(); column_count];
        let mut unassigned = Vec::new();

        for line in page.lines() {
            match assign_column(edges, line)? {
                ColumnSlot::Column(index) => columns[index].push(line),
                ColumnSlot::Unassigned => unassigned.push(line),
            }
        }

        Ok(Self {
            columns,
            unassigned,
        })
    }

    /// The lines of each detected column, in page order.
    pub fn columns(&self) -> &[Vec<&'a TextLine>] {
        &self.columns
    }

    /// Lines that fit no single column, in page order.
    pub fn unassigned(&self) -> &[&'a TextLine] {
        &self.unassigned
    }

    /// Number of detected columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Whether this grouping carries a stray bucket.
    ///
    /// Single-column pages never do: their trivial grouping assigns every
    /// line to column 0, so there is nothing to reconcile against.
    pub fn has_stray_bucket(&self) -> bool {
        self.columns.len() != 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Point;

    fn line(id: &str, min_x: i32, max_x: i32, y: i32) -> TextLine {
        TextLine::new(
            id,
            vec![Point::new(min_x, y), Point::new(max_x, y + 2)],
            Some("text".to_string()),
        )
    }

    #[test]
    fn test_single_pair_assigns_everything_to_column_zero() {
        let edges = vec![100, 500];
        // Extent far outside the pair still lands in column 0.
        let l = line("a", 700, 900, 10);
        assert_eq!(assign_column(&edges, &l).unwrap(), ColumnSlot::Column(0));
    }

    #[test]
    fn test_assigns_first_containing_column() {
        let edges = vec![0, 400, 500, 900];
        let l = line("a", 510, 880, 10);
        assert_eq!(assign_column(&edges, &l).unwrap(), ColumnSlot::Column(1));
    }

    #[test]
    fn test_straddling_line_is_unassigned() {
        let edges = vec![0, 400, 500, 900];
        let l = line("a", 300, 600, 10);
        assert_eq!(assign_column(&edges, &l).unwrap(), ColumnSlot::Unassigned);
    }

    #[test]
    fn test_grouping_partitions_all_lines() {
        let lines = vec![
            line("a", 10, 350, 100),
            line("b", 520, 880, 100),
            line("c", 300, 600, 200), // straddles
            line("d", 20, 390, 300),
        ];
        let page = Page::new(1000, 1000, "p.jpg", lines);
        let edges = vec![0, 400, 500, 900];
        let grouping = ColumnGrouping::build(&page, &edges).unwrap();

        assert_eq!(grouping.column_count(), 2);
        assert_eq!(grouping.columns()[0].len(), 2);
        assert_eq!(grouping.columns()[1].len(), 1);
        assert_eq!(grouping.unassigned().len(), 1);
        assert_eq!(grouping.unassigned()[0].id(), "c");

        let total: usize = grouping.columns().iter().map(Vec::len).sum();
        assert_eq!(total + grouping.unassigned().len(), page.lines().len());
    }

    #[test]
    fn test_single_column_grouping_is_identity() {
        let lines = vec![line("a", 10, 350, 100), line("b", 700, 950, 200)];
        let page = Page::new(1000, 1000, "p.jpg", lines);
        let grouping = ColumnGrouping::build(&page, &[50, 350]).unwrap();

        assert_eq!(grouping.column_count(), 1);
        assert_eq!(grouping.columns()[0].len(), 2);
        assert!(grouping.unassigned().is_empty());
        assert!(!grouping.has_stray_bucket());
    }

    #[test]
    fn test_zero_columns_leaves_all_lines_unassigned() {
        let lines = vec![line("a", 10, 350, 100)];
        let page = Page::new(1000, 1000, "p.jpg", lines);
        let grouping = ColumnGrouping::build(&page, &[]).unwrap();

        assert_eq!(grouping.column_count(), 0);
        assert_eq!(grouping.unassigned().len(), 1);
        assert!(grouping.has_stray_bucket());
    }
}
