//! Detected table types, as produced by the analysis service.

use super::BoundingRegion;
use serde::{Deserialize, Serialize};

/// A table detected by the analysis service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedTable {
    /// Number of rows reported by the service
    #[serde(default, alias = "row_count")]
    pub row_count: u32,

    /// Number of columns reported by the service
    #[serde(default, alias = "column_count")]
    pub column_count: u32,

    /// Cells in service order
    #[serde(default)]
    pub cells: Vec<DetectedTableCell>,

    /// Table footprint (informational)
    #[serde(default, alias = "bounding_regions")]
    pub bounding_regions: Vec<BoundingRegion>,
}

impl DetectedTable {
    /// Create a table from cells, deriving row and column counts.
    pub fn new(cells: Vec<DetectedTableCell>) -> Self {
        let row_count = cells.iter().map(|c| c.row_index + 1).max().unwrap_or(0);
        let column_count = cells.iter().map(|c| c.column_index + 1).max().unwrap_or(0);
        Self {
            row_count,
            column_count,
            cells,
            bounding_regions: Vec::new(),
        }
    }

    /// Check if the table has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// One cell of a detected table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedTableCell {
    /// Zero-based row index
    #[serde(alias = "row_index")]
    pub row_index: u32,

    /// Zero-based column index
    #[serde(alias = "column_index")]
    pub column_index: u32,

    /// Cell text
    #[serde(default)]
    pub content: String,

    /// Cell kind reported by the service (e.g., "columnHeader")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Number of rows spanned
    #[serde(default, alias = "row_span", skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,

    /// Number of columns spanned
    #[serde(default, alias = "column_span", skip_serializing_if = "Option::is_none")]
    pub column_span: Option<u32>,

    /// Where the cell sits; only the first region is used
    #[serde(default, alias = "bounding_regions")]
    pub bounding_regions: Vec<BoundingRegion>,
}

impl DetectedTableCell {
    /// Create a cell with text and no geometry.
    pub fn new(row_index: u32, column_index: u32, content: impl Into<String>) -> Self {
        Self {
            row_index,
            column_index,
            content: content.into(),
            kind: None,
            row_span: None,
            column_span: None,
            bounding_regions: Vec::new(),
        }
    }

    /// Create a cell anchored at a single point.
    pub fn at(
        row_index: u32,
        column_index: u32,
        content: impl Into<String>,
        region: BoundingRegion,
    ) -> Self {
        let mut cell = Self::new(row_index, column_index, content);
        cell.bounding_regions.push(region);
        cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_counts_from_cells() {
        let table = DetectedTable::new(vec![
            DetectedTableCell::new(0, 0, "a"),
            DetectedTableCell::new(0, 1, "b"),
            DetectedTableCell::new(2, 0, "c"),
        ]);
        assert_eq!(table.row_count, 3);
        assert_eq!(table.column_count, 2);
        assert!(!table.is_empty());
        assert!(DetectedTable::new(Vec::new()).is_empty());
    }

    #[test]
    fn test_deserialize_service_cell() {
        let json = r#"{
            "kind": "columnHeader",
            "rowIndex": 0,
            "columnIndex": 1,
            "content": "Amount",
            "boundingRegions": [{"pageNumber": 1, "polygon": [4.1, 2.0, 5.0, 2.0, 5.0, 2.2, 4.1, 2.2]}],
            "spans": [{"offset": 120, "length": 6}]
        }"#;
        let cell: DetectedTableCell = serde_json::from_str(json).unwrap();
        assert_eq!(cell.kind.as_deref(), Some("columnHeader"));
        assert_eq!(cell.row_index, 0);
        assert_eq!(cell.column_index, 1);
        assert_eq!(cell.bounding_regions[0].anchor().map(|p| p.x), Some(4.1));
    }

    #[test]
    fn test_deserialize_empty_cell_content() {
        let cell: DetectedTableCell =
            serde_json::from_str(r#"{"rowIndex": 1, "columnIndex": 0}"#).unwrap();
        assert_eq!(cell.content, "");
        assert!(cell.bounding_regions.is_empty());
    }
}
