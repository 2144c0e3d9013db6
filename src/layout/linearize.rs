//! Document linearization.
//!
//! Walks paragraphs in reading order and merges them with the detected
//! tables into one text stream. Each table is rendered once, at the position
//! of the first paragraph that falls on one of its cells; later paragraphs
//! of the same table are skipped because their text is already in the grid.

use crate::model::{AnalyzeResult, DetectedParagraph, DetectedTable, RoleSet};
use crate::render::{format_table, ReconstructOptions, ReconstructStats, Reconstruction};

use super::TableIndex;

/// Separator placed between output blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Reconstruct the text of a document from its paragraphs and tables.
///
/// Paragraphs whose role is in `discard_roles` are dropped. Tables are
/// rendered as GitHub-flavored Markdown. This never fails: paragraphs with
/// no geometry are emitted as plain text.
///
/// # Example
///
/// ```
/// use unlayout::{reconstruct, DetectedParagraph, ParagraphRole, RoleSet};
///
/// let paragraphs = vec![
///     DetectedParagraph::at("ACME Corp", 1, 0.5, 0.5).with_role(ParagraphRole::PageHeader),
///     DetectedParagraph::at("Quarterly report", 1, 1.0, 1.0),
/// ];
/// let text = reconstruct(&paragraphs, &[], &RoleSet::boilerplate());
/// assert_eq!(text, "Quarterly report");
/// ```
pub fn reconstruct(
    paragraphs: &[DetectedParagraph],
    tables: &[DetectedTable],
    discard_roles: &RoleSet,
) -> String {
    let options = ReconstructOptions::new().with_discard_roles(discard_roles.clone());
    Linearizer::new(&options).run(paragraphs, tables).content
}

/// Single-pass linearizer over one analysis result.
pub struct Linearizer<'a> {
    options: &'a ReconstructOptions,
}

impl<'a> Linearizer<'a> {
    /// Create a linearizer with the given options.
    pub fn new(options: &'a ReconstructOptions) -> Self {
        Self { options }
    }

    /// Reconstruct an analysis result.
    pub fn run_result(&self, result: &AnalyzeResult) -> Reconstruction {
        self.run(&result.paragraphs, &result.tables)
    }

    /// Reconstruct from paragraphs and tables.
    pub fn run(&self, paragraphs: &[DetectedParagraph], tables: &[DetectedTable]) -> Reconstruction {
        let mut index = TableIndex::new(tables);
        let mut stats = ReconstructStats::new();
        let mut blocks: Vec<String> = Vec::new();

        for para in paragraphs {
            if let Some(role) = &para.role {
                if self.options.discard_roles.contains(role) {
                    stats.add_discarded();
                    continue;
                }
            }

            let Some(table) = index
                .find(&para.bounding_regions)
                .and_then(|id| index.get_mut(id))
            else {
                if para.bounding_regions.is_empty() {
                    stats.add_unanchored();
                }
                stats.add_paragraph();
                blocks.push(para.content.clone());
                continue;
            };

            if table.is_displayed() {
                stats.add_table_paragraph();
                continue;
            }

            log::debug!(
                "Linearizer: rendering table with {} cells at block {}",
                table.cells.len(),
                blocks.len()
            );
            blocks.push(format_table(
                table,
                self.options.table_format,
                self.options.align_numbers,
            ));
            table.mark_displayed();
            stats.add_table();
        }

        let content = blocks.join(BLOCK_SEPARATOR);
        if self.options.collect_stats {
            stats.count_text(&content);
        }

        let never_displayed = index
            .iter()
            .filter(|t| !t.is_displayed() && !t.cells.is_empty())
            .count();
        if never_displayed > 0 {
            log::debug!(
                "Linearizer: {} tables had no matching paragraph and were not rendered",
                never_displayed
            );
        }

        Reconstruction::new(content, stats)
    }
}
