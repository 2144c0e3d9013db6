//! Rendering: table formatting, options, results and JSON output.

mod json;
mod options;
mod result;
mod table;

pub use json::{to_json, JsonFormat};
pub use options::{ReconstructOptions, TableFormat};
pub use result::{ReconstructStats, Reconstruction};
pub use table::{format_table, TableGrid};
