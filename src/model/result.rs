//! The analysis result consumed by reconstruction.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{DetectedParagraph, DetectedTable, ParagraphRole};
use crate::error::{Error, Result};

/// Status reported by a completed analysis operation.
const STATUS_SUCCEEDED: &str = "succeeded";

/// Key under which the REST operation envelope nests the result.
const ENVELOPE_KEY: &str = "analyzeResult";

/// Structured output of a layout analysis: paragraphs in reading order and
/// the tables detected in the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResult {
    /// Model that produced the result (informational)
    #[serde(default, alias = "model_id", skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,

    /// Paragraphs in reading order
    #[serde(default)]
    pub paragraphs: Vec<DetectedParagraph>,

    /// Tables in declaration order
    #[serde(default)]
    pub tables: Vec<DetectedTable>,
}

impl AnalyzeResult {
    /// Create a result from paragraphs and tables.
    pub fn new(paragraphs: Vec<DetectedParagraph>, tables: Vec<DetectedTable>) -> Self {
        Self {
            model_id: None,
            paragraphs,
            tables,
        }
    }

    /// Parse a result from a JSON string.
    ///
    /// Accepts either a bare result object or the operation envelope
    /// `{"status": "succeeded", "analyzeResult": {...}}`.
    ///
    /// # Example
    ///
    /// ```
    /// use unlayout::AnalyzeResult;
    ///
    /// let json = r#"{"status": "succeeded", "analyzeResult": {"paragraphs": [{"content": "Hi"}]}}"#;
    /// let result = AnalyzeResult::from_json_str(json).unwrap();
    /// assert_eq!(result.paragraphs.len(), 1);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parse a result from JSON bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(data)?;
        Self::from_value(value)
    }

    /// Parse a result from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    /// Parse a result from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Unwrap the operation envelope if present, then deserialize.
    pub fn from_value(mut value: Value) -> Result<Self> {
        if let Some(inner) = value.get_mut(ENVELOPE_KEY).map(Value::take) {
            if let Some(status) = value.get("status").and_then(Value::as_str) {
                if !status.eq_ignore_ascii_case(STATUS_SUCCEEDED) {
                    log::warn!("Analysis envelope reports status {:?}", status);
                    return Err(Error::AnalysisNotSucceeded(status.to_string()));
                }
            }
            return Ok(serde_json::from_value(inner)?);
        }

        if let Some(status) = value.get("status").and_then(Value::as_str) {
            if !status.eq_ignore_ascii_case(STATUS_SUCCEEDED) {
                return Err(Error::AnalysisNotSucceeded(status.to_string()));
            }
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Check if the result has no paragraphs and no tables.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty() && self.tables.is_empty()
    }

    /// Highest page number referenced by any paragraph or table cell.
    pub fn page_count(&self) -> u32 {
        let paragraph_pages = self
            .paragraphs
            .iter()
            .flat_map(|p| &p.bounding_regions)
            .map(|r| r.page_number);
        let cell_pages = self
            .tables
            .iter()
            .flat_map(|t| &t.cells)
            .flat_map(|c| &c.bounding_regions)
            .map(|r| r.page_number);
        paragraph_pages.chain(cell_pages).max().unwrap_or(0)
    }

    /// Count paragraphs per role, in first-seen order. Body text is `None`.
    pub fn role_histogram(&self) -> Vec<(Option<ParagraphRole>, usize)> {
        let mut counts: Vec<(Option<ParagraphRole>, usize)> = Vec::new();
        for para in &self.paragraphs {
            match counts.iter_mut().find(|(role, _)| *role == para.role) {
                Some((_, count)) => *count += 1,
                None => counts.push((para.role.clone(), 1)),
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BARE: &str = r#"{
        "modelId": "prebuilt-layout",
        "paragraphs": [
            {"role": "pageHeader", "content": "ACME", "boundingRegions": [{"pageNumber": 1, "polygon": [0, 0, 1, 0, 1, 1, 0, 1]}]},
            {"content": "Body", "boundingRegions": [{"pageNumber": 2, "polygon": [0, 2, 1, 2, 1, 3, 0, 3]}]}
        ],
        "tables": []
    }"#;

    #[test]
    fn test_parse_bare_result() {
        let result = AnalyzeResult::from_json_str(BARE).unwrap();
        assert_eq!(result.model_id.as_deref(), Some("prebuilt-layout"));
        assert_eq!(result.paragraphs.len(), 2);
        assert!(result.tables.is_empty());
        assert_eq!(result.page_count(), 2);
    }

    #[test]
    fn test_parse_envelope() {
        let json = format!(r#"{{"status": "succeeded", "analyzeResult": {}}}"#, BARE);
        let result = AnalyzeResult::from_json_str(&json).unwrap();
        assert_eq!(result.paragraphs.len(), 2);
    }

    #[test]
    fn test_envelope_not_succeeded() {
        let json = r#"{"status": "running", "analyzeResult": {}}"#;
        let err = AnalyzeResult::from_json_str(json).unwrap_err();
        assert!(matches!(err, Error::AnalysisNotSucceeded(ref s) if s == "running"));

        let json = r#"{"status": "failed"}"#;
        assert!(matches!(
            AnalyzeResult::from_json_str(json),
            Err(Error::AnalysisNotSucceeded(_))
        ));
    }

    #[test]
    fn test_missing_arrays_default_empty() {
        let result = AnalyzeResult::from_json_str("{}").unwrap();
        assert!(result.is_empty());
        assert_eq!(result.page_count(), 0);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            AnalyzeResult::from_slice(b"not json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_role_histogram() {
        let result = AnalyzeResult::from_json_str(BARE).unwrap();
        let histogram = result.role_histogram();
        assert_eq!(
            histogram,
            vec![(Some(ParagraphRole::PageHeader), 1), (None, 1)]
        );
    }
}
