//! Reconstruction result with statistics.

use serde::{Deserialize, Serialize};

/// Result of reconstructing a document, including statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reconstruction {
    /// The reconstructed text
    pub content: String,

    /// Statistics collected during reconstruction
    pub stats: ReconstructStats,
}

impl Reconstruction {
    /// Create a new reconstruction result.
    pub fn new(content: String, stats: ReconstructStats) -> Self {
        Self { content, stats }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Statistics collected while linearizing a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconstructStats {
    /// Paragraphs emitted as plain text
    pub paragraph_count: u32,

    /// Paragraphs dropped by role
    pub discarded_count: u32,

    /// Tables rendered
    pub table_count: u32,

    /// Paragraphs absorbed into a table that was already rendered
    pub table_paragraph_count: u32,

    /// Emitted paragraphs that had no bounding region
    pub unanchored_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ReconstructStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment emitted paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Increment discarded paragraph count.
    pub fn add_discarded(&mut self) {
        self.discarded_count += 1;
    }

    /// Increment rendered table count.
    pub fn add_table(&mut self) {
        self.table_count += 1;
    }

    /// Increment absorbed table paragraph count.
    pub fn add_table_paragraph(&mut self) {
        self.table_paragraph_count += 1;
    }

    /// Increment unanchored paragraph count.
    pub fn add_unanchored(&mut self) {
        self.unanchored_count += 1;
    }

    /// Count words and characters in text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count = text.split_whitespace().count() as u32;
        self.char_count = text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Total number of input paragraphs accounted for.
    pub fn total_paragraphs(&self) -> u32 {
        self.paragraph_count + self.discarded_count + self.table_count + self.table_paragraph_count
    }
}
