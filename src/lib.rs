//! # unlayout
//!
//! Reconstruct linear text from document layout analysis results.
//!
//! A layout analysis service reports a document as paragraphs in reading
//! order plus the tables it detected. It also re-emits the text of every
//! table cell as a paragraph. This library merges the two into one readable
//! text: each table is rendered as a Markdown grid exactly once, at the
//! position where its first cell appears, and boilerplate such as page
//! headers can be dropped by role.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unlayout::{reconstruct_file, ReconstructOptions};
//!
//! fn main() -> unlayout::Result<()> {
//!     // Drop page headers, footers and page numbers
//!     let options = ReconstructOptions::boilerplate();
//!     let text = reconstruct_file("layout.json", &options)?;
//!     println!("{}", text);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Reading order**: paragraphs are emitted in service order
//! - **Single table emission**: duplicated cell paragraphs are folded into one grid
//! - **Role filtering**: typed discard sets for headers, footers, page numbers
//! - **Markdown or HTML tables**: with CJK-aware column widths
//! - **Batch mode**: independent results reconstructed in parallel with Rayon

pub mod error;
pub mod layout;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use layout::{reconstruct, IndexedTable, Linearizer, TableIndex};
pub use model::{
    AnalyzeResult, BoundingRegion, DetectedParagraph, DetectedTable, DetectedTableCell,
    ParagraphRole, Point, RoleSet,
};
pub use render::{JsonFormat, ReconstructOptions, ReconstructStats, Reconstruction, TableFormat};

use rayon::prelude::*;
use std::io::Read;
use std::path::Path;

/// Reconstruct an analysis result with custom options.
///
/// # Example
///
/// ```
/// use unlayout::{reconstruct_result, AnalyzeResult, DetectedParagraph, ReconstructOptions};
///
/// let result = AnalyzeResult::new(vec![DetectedParagraph::new("Hello")], Vec::new());
/// let text = reconstruct_result(&result, &ReconstructOptions::default());
/// assert_eq!(text, "Hello");
/// ```
pub fn reconstruct_result(result: &AnalyzeResult, options: &ReconstructOptions) -> String {
    Linearizer::new(options).run_result(result).content
}

/// Reconstruct an analysis result and collect statistics.
pub fn reconstruct_with_stats(result: &AnalyzeResult, options: &ReconstructOptions) -> Reconstruction {
    let mut options = options.clone();
    options.collect_stats = true;
    Linearizer::new(&options).run_result(result)
}

/// Reconstruct an analysis result given as JSON.
///
/// # Example
///
/// ```
/// use unlayout::{reconstruct_json, ReconstructOptions};
///
/// let json = r#"{"paragraphs": [{"content": "One"}, {"content": "Two"}]}"#;
/// let text = reconstruct_json(json, &ReconstructOptions::default()).unwrap();
/// assert_eq!(text, "One\n\nTwo");
/// ```
pub fn reconstruct_json(json: &str, options: &ReconstructOptions) -> Result<String> {
    let result = AnalyzeResult::from_json_str(json)?;
    Ok(reconstruct_result(&result, options))
}

/// Reconstruct an analysis result read from a reader.
pub fn reconstruct_reader<R: Read>(reader: R, options: &ReconstructOptions) -> Result<String> {
    let result = AnalyzeResult::from_reader(reader)?;
    Ok(reconstruct_result(&result, options))
}

/// Reconstruct an analysis result stored in a JSON file.
///
/// # Example
///
/// ```no_run
/// use unlayout::{reconstruct_file, ReconstructOptions};
///
/// let text = reconstruct_file("layout.json", &ReconstructOptions::boilerplate()).unwrap();
/// std::fs::write("layout.txt", text).unwrap();
/// ```
pub fn reconstruct_file<P: AsRef<Path>>(path: P, options: &ReconstructOptions) -> Result<String> {
    let result = AnalyzeResult::from_path(path)?;
    Ok(reconstruct_result(&result, options))
}

/// Reconstruct many independent results in parallel.
///
/// Output order matches input order.
pub fn reconstruct_all(results: &[AnalyzeResult], options: &ReconstructOptions) -> Vec<String> {
    results
        .par_iter()
        .map(|result| reconstruct_result(result, options))
        .collect()
}

/// Reconstruct many independent results in parallel, keeping statistics.
pub fn reconstruct_batch(
    results: &[AnalyzeResult],
    options: &ReconstructOptions,
) -> Vec<Reconstruction> {
    results
        .par_iter()
        .map(|result| Linearizer::new(options).run_result(result))
        .collect()
}

/// Builder for loading and reconstructing analysis results.
///
/// # Example
///
/// ```no_run
/// use unlayout::{ParagraphRole, TableFormat, Unlayout};
///
/// let text = Unlayout::new()
///     .boilerplate()
///     .discard(ParagraphRole::Footnote)
///     .with_table_format(TableFormat::Html)
///     .load("layout.json")?
///     .to_text();
/// # Ok::<(), unlayout::Error>(())
/// ```
pub struct Unlayout {
    options: ReconstructOptions,
}

impl Unlayout {
    /// Create a new Unlayout builder.
    pub fn new() -> Self {
        Self {
            options: ReconstructOptions::default(),
        }
    }

    /// Discard page headers, footers and page numbers.
    pub fn boilerplate(mut self) -> Self {
        self.options.discard_roles.extend(RoleSet::boilerplate().iter());
        self
    }

    /// Discard paragraphs with this role.
    pub fn discard(mut self, role: ParagraphRole) -> Self {
        self.options = self.options.discard(role);
        self
    }

    /// Set table format.
    pub fn with_table_format(mut self, format: TableFormat) -> Self {
        self.options = self.options.with_table_format(format);
        self
    }

    /// Enable or disable right alignment of numeric columns.
    pub fn with_number_alignment(mut self, align: bool) -> Self {
        self.options = self.options.with_number_alignment(align);
        self
    }

    /// Load an analysis result from a JSON file.
    pub fn load<P: AsRef<Path>>(self, path: P) -> Result<UnlayoutResult> {
        let result = AnalyzeResult::from_path(path)?;
        Ok(self.wrap(result))
    }

    /// Load an analysis result from a JSON string.
    pub fn load_str(self, json: &str) -> Result<UnlayoutResult> {
        let result = AnalyzeResult::from_json_str(json)?;
        Ok(self.wrap(result))
    }

    /// Use an already loaded analysis result.
    pub fn wrap(self, result: AnalyzeResult) -> UnlayoutResult {
        UnlayoutResult {
            result,
            options: self.options,
        }
    }
}

impl Default for Unlayout {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded analysis result together with the options to reconstruct it.
pub struct UnlayoutResult {
    /// The analysis result
    pub result: AnalyzeResult,
    /// Reconstruction options to use
    options: ReconstructOptions,
}

impl UnlayoutResult {
    /// Reconstruct the text.
    pub fn to_text(&self) -> String {
        reconstruct_result(&self.result, &self.options)
    }

    /// Reconstruct the text and collect statistics.
    pub fn to_text_with_stats(&self) -> Reconstruction {
        reconstruct_with_stats(&self.result, &self.options)
    }

    /// Reconstruct and serialize the text and statistics to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.to_text_with_stats(), format)
    }

    /// Get the analysis result.
    pub fn result(&self) -> &AnalyzeResult {
        &self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unlayout_builder() {
        let unlayout = Unlayout::new()
            .boilerplate()
            .discard(ParagraphRole::Footnote)
            .with_table_format(TableFormat::Html)
            .with_number_alignment(false);

        assert_eq!(unlayout.options.discard_roles.len(), 4);
        assert!(unlayout.options.discard_roles.contains(&ParagraphRole::PageHeader));
        assert_eq!(unlayout.options.table_format, TableFormat::Html);
        assert!(!unlayout.options.align_numbers);
    }

    #[test]
    fn test_unlayout_builder_default() {
        let builder = Unlayout::default();
        assert!(builder.options.discard_roles.is_empty());
        assert!(builder.options.align_numbers);
    }

    #[test]
    fn test_load_str_and_render() {
        let json = r#"{"paragraphs": [
            {"role": "pageNumber", "content": "7"},
            {"content": "Body text"}
        ]}"#;
        let loaded = Unlayout::new().boilerplate().load_str(json).unwrap();
        assert_eq!(loaded.result().paragraphs.len(), 2);
        assert_eq!(loaded.to_text(), "Body text");

        let with_stats = loaded.to_text_with_stats();
        assert_eq!(with_stats.stats.discarded_count, 1);
        assert_eq!(with_stats.stats.word_count, 2);
    }

    #[test]
    fn test_load_str_invalid_json() {
        assert!(matches!(
            Unlayout::new().load_str("{not json"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Unlayout::new().load("/nonexistent/layout.json"),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_to_json_contains_stats() {
        let loaded = Unlayout::new().wrap(AnalyzeResult::new(
            vec![DetectedParagraph::new("Hi")],
            Vec::new(),
        ));
        let json = loaded.to_json(JsonFormat::Compact).unwrap();
        assert!(json.contains("\"content\":\"Hi\""));
        assert!(json.contains("\"paragraph_count\":1"));
    }

    #[test]
    fn test_reconstruct_all_preserves_order() {
        let results: Vec<AnalyzeResult> = (0..16)
            .map(|i| AnalyzeResult::new(vec![DetectedParagraph::new(format!("doc {}", i))], Vec::new()))
            .collect();
        let texts = reconstruct_all(&results, &ReconstructOptions::default());
        assert_eq!(texts.len(), 16);
        for (i, text) in texts.iter().enumerate() {
            assert_eq!(text, &format!("doc {}", i));
        }
    }

    #[test]
    fn test_reconstruct_reader() {
        let json = br#"{"paragraphs": [{"content": "from reader"}]}"#;
        let text = reconstruct_reader(&json[..], &ReconstructOptions::default()).unwrap();
        assert_eq!(text, "from reader");
    }
}
