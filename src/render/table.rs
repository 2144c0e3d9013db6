//! Table rendering.
//!
//! Cells are stably sorted by row index and grouped into rows wherever the
//! row index changes. The first row is the header. Rows may be ragged: the
//! grid is as wide as its longest row and missing cells render empty.

use unicode_width::UnicodeWidthStr;

use crate::layout::{IndexedTable, TableCell};

use super::TableFormat;

/// Render a table in the requested format.
///
/// A table without cells renders as the empty string.
pub fn format_table(table: &IndexedTable, format: TableFormat, align_numbers: bool) -> String {
    let grid = TableGrid::from_cells(&table.cells);
    match format {
        TableFormat::Github => grid.to_github(align_numbers),
        TableFormat::Html => grid.to_html(),
    }
}

/// Header and body rows of cell texts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableGrid {
    /// First row of the logical ordering
    pub header: Vec<String>,
    /// Remaining rows
    pub body: Vec<Vec<String>>,
}

impl TableGrid {
    /// Group cells into rows by row index.
    pub fn from_cells(cells: &[TableCell]) -> Self {
        let mut sorted: Vec<&TableCell> = cells.iter().collect();
        // Stable: cells within a row keep service (column) order.
        sorted.sort_by_key(|cell| cell.row_index);

        let mut rows: Vec<Vec<String>> = Vec::new();
        let mut current_row: Option<u32> = None;
        for cell in sorted {
            if current_row != Some(cell.row_index) {
                rows.push(Vec::new());
                current_row = Some(cell.row_index);
            }
            if let Some(row) = rows.last_mut() {
                row.push(cell.text.clone());
            }
        }

        let mut rows = rows.into_iter();
        Self {
            header: rows.next().unwrap_or_default(),
            body: rows.collect(),
        }
    }

    /// Number of columns: the longest of the header and body rows.
    pub fn column_count(&self) -> usize {
        self.body
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.header.len()))
            .max()
            .unwrap_or(0)
    }

    /// Render as a GitHub-flavored Markdown table.
    ///
    /// Column width is the larger of the header width plus two and the
    /// widest body cell, measured in display columns.
    pub fn to_github(&self, align_numbers: bool) -> String {
        let col_count = self.column_count();
        if col_count == 0 {
            return String::new();
        }

        let header: Vec<String> = (0..col_count)
            .map(|i| clean_cell(cell_at(&self.header, i)))
            .collect();
        let body: Vec<Vec<String>> = self
            .body
            .iter()
            .map(|row| (0..col_count).map(|i| clean_cell(cell_at(row, i))).collect())
            .collect();

        let widths: Vec<usize> = (0..col_count)
            .map(|i| {
                let body_width = body.iter().map(|row| row[i].width()).max().unwrap_or(0);
                (header[i].width() + 2).max(body_width)
            })
            .collect();

        let numeric: Vec<bool> = (0..col_count)
            .map(|i| align_numbers && is_numeric_column(body.iter().map(|row| row[i].as_str())))
            .collect();

        let mut lines = Vec::with_capacity(body.len() + 2);
        lines.push(github_row(&header, &widths, &numeric));

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
        lines.push(format!("|{}|", rule.join("|")));

        for row in &body {
            lines.push(github_row(row, &widths, &numeric));
        }

        lines.join("\n")
    }

    /// Render as an HTML table. The header row goes into `<thead>`.
    pub fn to_html(&self) -> String {
        let col_count = self.column_count();
        if col_count == 0 {
            return String::new();
        }

        let mut output = String::from("<table>\n<thead>\n");
        html_row(&mut output, &self.header, col_count, "th");
        output.push_str("</thead>\n");

        if !self.body.is_empty() {
            output.push_str("<tbody>\n");
            for row in &self.body {
                html_row(&mut output, row, col_count, "td");
            }
            output.push_str("</tbody>\n");
        }

        output.push_str("</table>");
        output
    }
}

fn cell_at(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

/// Trim a cell and fold embedded line breaks into two spaces.
fn clean_cell(text: &str) -> String {
    text.trim().replace("\r\n", "\n").replace('\n', "  ")
}

/// A column is numeric if it has at least one non-empty body cell and every
/// non-empty body cell parses as a number.
fn is_numeric_column<'a>(values: impl Iterator<Item = &'a str>) -> bool {
    let mut seen = false;
    for value in values.filter(|v| !v.is_empty()) {
        if !is_number(value) {
            return false;
        }
        seen = true;
    }
    seen
}

/// Finite numbers, plus the literal spellings `inf`, `-inf` and `nan` in any
/// case. Words like "Infinity" stay text.
fn is_number(value: &str) -> bool {
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => true,
        Ok(_) => ["inf", "-inf", "nan"]
            .iter()
            .any(|literal| value.eq_ignore_ascii_case(literal)),
        Err(_) => false,
    }
}

fn github_row(cells: &[String], widths: &[usize], numeric: &[bool]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .zip(numeric)
        .map(|((text, &width), &right)| format!(" {} ", pad(text, width, right)))
        .collect();
    format!("|{}|", padded.join("|"))
}

/// Pad text to a display width. `str` formatting pads by `char` count, which
/// misaligns wide (CJK) characters.
fn pad(text: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(text.width()));
    if right_align {
        format!("{}{}", fill, text)
    } else {
        format!("{}{}", text, fill)
    }
}

fn html_row(output: &mut String, row: &[String], col_count: usize, tag: &str) {
    output.push_str("<tr>");
    for i in 0..col_count {
        output.push_str(&format!("<{}>{}</{}>", tag, escape_html(cell_at(row, i).trim()), tag));
    }
    output.push_str("</tr>\n");
}

fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\n' => result.push_str("<br>"),
            _ => result.push(c),
        }
    }
    result
}
