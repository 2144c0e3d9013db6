//! Input model for layout analysis results.
//!
//! These types mirror the JSON emitted by a document-layout analysis
//! service. They are read-only to reconstruction: the indexer and linearizer
//! only borrow them.

mod geometry;
mod paragraph;
mod result;
mod role;
mod table;

pub use geometry::{BoundingRegion, Point};
pub use paragraph::DetectedParagraph;
pub use result::AnalyzeResult;
pub use role::{ParagraphRole, RoleSet};
pub use table::{DetectedTable, DetectedTableCell};
