//! Detected paragraph types.

use super::{BoundingRegion, ParagraphRole};
use serde::{Deserialize, Serialize};

/// One unit of running text as emitted by the analysis service.
///
/// The service also re-emits every table cell as a paragraph positioned at
/// the cell's exact anchor point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedParagraph {
    /// Paragraph text
    pub content: String,

    /// Semantic role (none for body text)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<ParagraphRole>,

    /// Where the paragraph sits on the page(s)
    #[serde(default, alias = "bounding_regions")]
    pub bounding_regions: Vec<BoundingRegion>,
}

impl DetectedParagraph {
    /// Create a body paragraph with no geometry.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role: None,
            bounding_regions: Vec::new(),
        }
    }

    /// Create a body paragraph anchored at a single point.
    pub fn at(content: impl Into<String>, page_number: u32, x: f64, y: f64) -> Self {
        Self::new(content).with_region(BoundingRegion::at(page_number, x, y))
    }

    /// Set the role and return self.
    pub fn with_role(mut self, role: ParagraphRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Append a bounding region and return self.
    pub fn with_region(mut self, region: BoundingRegion) -> Self {
        self.bounding_regions.push(region);
        self
    }

    /// Page number of the first bounding region, if any.
    pub fn page_number(&self) -> Option<u32> {
        self.bounding_regions.first().map(|r| r.page_number)
    }
}
