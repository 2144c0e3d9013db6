//! Table index keyed by cell anchor points.
//!
//! The analysis service re-emits the text of every table cell as an ordinary
//! paragraph placed at the cell's exact position. A paragraph belongs to a
//! table when its anchor point is bit-for-bit equal to one of the table's
//! cell anchors; there is no distance tolerance.

use crate::model::{BoundingRegion, DetectedTable, DetectedTableCell};

/// Page and anchor point of an element, taken from its first bounding region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Horizontal coordinate of the first polygon vertex
    pub x: f64,
    /// Vertical coordinate of the first polygon vertex
    pub y: f64,
}

impl Anchor {
    /// Anchor of a bounding region, or `None` when its polygon is empty.
    pub fn of(region: &BoundingRegion) -> Option<Self> {
        region.anchor().map(|point| Self {
            page_number: region.page_number,
            x: point.x,
            y: point.y,
        })
    }

    /// Anchor of the first region in a list.
    pub fn first_of(regions: &[BoundingRegion]) -> Option<Self> {
        regions.first().and_then(Self::of)
    }

    /// Exact coordinate equality, ignoring the page.
    fn same_point(&self, other: &Anchor) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// A table cell reduced to what reconstruction needs.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    /// Cell text
    pub text: String,
    /// Zero-based row index
    pub row_index: u32,
    /// Zero-based column index
    pub column_index: u32,
    /// Anchor from the cell's first bounding region (`None` if it has no geometry)
    pub anchor: Option<Anchor>,
}

impl From<&DetectedTableCell> for TableCell {
    fn from(cell: &DetectedTableCell) -> Self {
        Self {
            text: cell.content.clone(),
            row_index: cell.row_index,
            column_index: cell.column_index,
            anchor: Anchor::first_of(&cell.bounding_regions),
        }
    }
}

/// A table in the index, with its cells in service order.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedTable {
    /// Cells, unsorted
    pub cells: Vec<TableCell>,
    /// Set once the table's rendering has been emitted; never reset
    displayed: bool,
}

impl IndexedTable {
    /// Build an indexed table from a detected table.
    pub fn new(table: &DetectedTable) -> Self {
        Self::from_cells(table.cells.iter().map(TableCell::from).collect())
    }

    /// Build an indexed table from already-reduced cells.
    pub fn from_cells(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            displayed: false,
        }
    }

    /// Page the table is anchored to: the page of its first stored cell.
    pub fn page_number(&self) -> Option<u32> {
        self.cells
            .first()
            .and_then(|cell| cell.anchor)
            .map(|anchor| anchor.page_number)
    }

    /// Whether a paragraph with these bounding regions is one of this
    /// table's cells.
    ///
    /// Only the paragraph's first region is considered. Its page must equal
    /// the table's page, and its anchor point must exactly equal the anchor
    /// of some cell.
    pub fn in_range(&self, regions: &[BoundingRegion]) -> bool {
        let Some(region) = regions.first() else {
            return false;
        };
        let Some(page_number) = self.page_number() else {
            return false;
        };
        if region.page_number != page_number {
            return false;
        }
        let Some(anchor) = Anchor::of(region) else {
            return false;
        };

        self.cells
            .iter()
            .filter_map(|cell| cell.anchor)
            .any(|cell_anchor| cell_anchor.same_point(&anchor))
    }

    /// Whether the table has already been emitted.
    pub fn is_displayed(&self) -> bool {
        self.displayed
    }

    /// Record that the table has been emitted.
    pub fn mark_displayed(&mut self) {
        self.displayed = true;
    }
}

/// Index over all tables of one analysis result, in declaration order.
///
/// Tables are addressed by their position in the index. The index is owned
/// by a single reconstruction pass and dropped with it.
#[derive(Debug, Clone, Default)]
pub struct TableIndex {
    tables: Vec<IndexedTable>,
}

impl TableIndex {
    /// Index a list of detected tables.
    pub fn new(tables: &[DetectedTable]) -> Self {
        let tables: Vec<IndexedTable> = tables.iter().map(IndexedTable::new).collect();

        for (id, table) in tables.iter().enumerate() {
            if table.page_number().is_none() && !table.cells.is_empty() {
                log::warn!(
                    "Table {} has no anchored first cell; its paragraphs will be emitted as text",
                    id
                );
            }
        }
        log::debug!(
            "TableIndex: indexed {} tables with {} cells",
            tables.len(),
            tables.iter().map(|t| t.cells.len()).sum::<usize>()
        );

        Self { tables }
    }

    /// Find the first table (in declaration order) that contains a paragraph
    /// with these bounding regions.
    pub fn find(&self, regions: &[BoundingRegion]) -> Option<usize> {
        self.tables.iter().position(|table| table.in_range(regions))
    }

    /// Get a table by id.
    pub fn get(&self, id: usize) -> Option<&IndexedTable> {
        self.tables.get(id)
    }

    /// Get a table by id, mutably.
    pub fn get_mut(&mut self, id: usize) -> Option<&mut IndexedTable> {
        self.tables.get_mut(id)
    }

    /// Number of indexed tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Check if the index holds no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Iterate over tables in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &IndexedTable> {
        self.tables.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Point;

    fn cell(row: u32, col: u32, text: &str, page: u32, x: f64, y: f64) -> DetectedTableCell {
        DetectedTableCell::at(row, col, text, BoundingRegion::at(page, x, y))
    }

    fn two_by_two() -> DetectedTable {
        DetectedTable::new(vec![
            cell(0, 0, "a", 1, 1.0, 1.0),
            cell(0, 1, "b", 1, 1.0, 2.0),
            cell(1, 0, "c", 1, 2.0, 1.0),
            cell(1, 1, "d", 1, 2.0, 2.0),
        ])
    }

    #[test]
    fn test_cell_anchor_from_first_region() {
        let mut raw = cell(0, 0, "a", 3, 1.25, 7.5);
        raw.bounding_regions.push(BoundingRegion::at(4, 9.0, 9.0));
        let cell = TableCell::from(&raw);
        assert_eq!(
            cell.anchor,
            Some(Anchor {
                page_number: 3,
                x: 1.25,
                y: 7.5
            })
        );
    }

    #[test]
    fn test_in_range_exact_match() {
        let table = IndexedTable::new(&two_by_two());
        assert!(table.in_range(&[BoundingRegion::at(1, 2.0, 1.0)]));
        assert!(!table.in_range(&[BoundingRegion::at(1, 2.0, 1.5)]));
    }

    #[test]
    fn test_in_range_has_no_tolerance() {
        let table = IndexedTable::new(&two_by_two());
        assert!(!table.in_range(&[BoundingRegion::at(1, 1.0 + f64::EPSILON, 1.0)]));
    }

    #[test]
    fn test_in_range_empty_regions() {
        let table = IndexedTable::new(&two_by_two());
        assert!(!table.in_range(&[]));
    }

    #[test]
    fn test_in_range_empty_polygon() {
        let table = IndexedTable::new(&two_by_two());
        assert!(!table.in_range(&[BoundingRegion::new(1, Vec::new())]));
    }

    #[test]
    fn test_in_range_other_page() {
        let table = IndexedTable::new(&two_by_two());
        assert!(!table.in_range(&[BoundingRegion::at(2, 1.0, 1.0)]));
    }

    #[test]
    fn test_in_range_uses_first_region_only() {
        let table = IndexedTable::new(&two_by_two());
        let regions = [BoundingRegion::at(1, 5.0, 5.0), BoundingRegion::at(1, 1.0, 1.0)];
        assert!(!table.in_range(&regions));
    }

    #[test]
    fn test_in_range_uses_first_vertex_only() {
        let table = IndexedTable::new(&two_by_two());
        let region = BoundingRegion::new(1, vec![Point::new(9.0, 9.0), Point::new(1.0, 1.0)]);
        assert!(!table.in_range(&[region]));
    }

    #[test]
    fn test_table_page_is_first_cell_page() {
        // Second cell is on page 2 but the table is anchored to page 1, so
        // a page-2 paragraph at that cell's point does not match.
        let table = IndexedTable::new(&DetectedTable::new(vec![
            cell(0, 0, "a", 1, 1.0, 1.0),
            cell(1, 0, "b", 2, 1.0, 3.0),
        ]));
        assert_eq!(table.page_number(), Some(1));
        assert!(!table.in_range(&[BoundingRegion::at(2, 1.0, 3.0)]));
        assert!(table.in_range(&[BoundingRegion::at(1, 1.0, 3.0)]));
    }

    #[test]
    fn test_table_without_cells_matches_nothing() {
        let table = IndexedTable::new(&DetectedTable::new(Vec::new()));
        assert_eq!(table.page_number(), None);
        assert!(!table.in_range(&[BoundingRegion::at(1, 0.0, 0.0)]));
    }

    #[test]
    fn test_unanchored_first_cell_matches_nothing() {
        let table = IndexedTable::new(&DetectedTable::new(vec![
            DetectedTableCell::new(0, 0, "loose"),
            cell(0, 1, "b", 1, 1.0, 1.0),
        ]));
        assert!(!table.in_range(&[BoundingRegion::at(1, 1.0, 1.0)]));
    }

    #[test]
    fn test_find_first_declared_table_wins() {
        let first = DetectedTable::new(vec![cell(0, 0, "first", 1, 4.0, 4.0)]);
        let second = DetectedTable::new(vec![cell(0, 0, "second", 1, 4.0, 4.0)]);
        let index = TableIndex::new(&[first, second]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.find(&[BoundingRegion::at(1, 4.0, 4.0)]), Some(0));
        assert_eq!(index.find(&[BoundingRegion::at(1, 0.0, 0.0)]), None);
    }

    #[test]
    fn test_displayed_flag() {
        let mut index = TableIndex::new(&[two_by_two()]);
        assert!(!index.get(0).unwrap().is_displayed());
        index.get_mut(0).unwrap().mark_displayed();
        assert!(index.get(0).unwrap().is_displayed());
        assert!(index.get(1).is_none());
    }
}
