//! Reconstruction options and configuration.

use crate::model::{ParagraphRole, RoleSet};

/// Options for reconstructing a document.
#[derive(Debug, Clone)]
pub struct ReconstructOptions {
    /// Paragraph roles that are dropped from the output
    pub discard_roles: RoleSet,

    /// How tables are rendered
    pub table_format: TableFormat,

    /// Right-align table columns whose body cells are all numeric
    pub align_numbers: bool,

    /// Collect reconstruction statistics
    pub collect_stats: bool,
}

impl ReconstructOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options that drop page headers, footers and page numbers.
    pub fn boilerplate() -> Self {
        Self::new().with_discard_roles(RoleSet::boilerplate())
    }

    /// Replace the discard set.
    pub fn with_discard_roles(mut self, roles: RoleSet) -> Self {
        self.discard_roles = roles;
        self
    }

    /// Add a role to the discard set.
    pub fn discard(mut self, role: ParagraphRole) -> Self {
        self.discard_roles.insert(role);
        self
    }

    /// Set the table format.
    pub fn with_table_format(mut self, format: TableFormat) -> Self {
        self.table_format = format;
        self
    }

    /// Enable or disable numeric column alignment.
    pub fn with_number_alignment(mut self, align: bool) -> Self {
        self.align_numbers = align;
        self
    }

    /// Enable statistics collection.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            discard_roles: RoleSet::new(),
            table_format: TableFormat::Github,
            align_numbers: true,
            collect_stats: false,
        }
    }
}

/// How detected tables are rendered into the text stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableFormat {
    /// GitHub-flavored Markdown grid with padded columns
    #[default]
    Github,
    /// HTML table tags
    Html,
}
