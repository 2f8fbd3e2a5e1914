//! Plain-text tables for report sections
//!
//! Column widths are measured without ANSI codes, so styled cells line up.

use super::styling::StyleManager;
use console::{Alignment, measure_text_width, pad_str};

/// Table builder rendering into a `String`
pub struct Table<'a> {
    styling: &'a StyleManager,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    indent: usize,
    separator: &'a str,
}

impl<'a> Table<'a> {
    pub fn new(styling: &'a StyleManager) -> Self {
        Self {
            styling,
            headers: Vec::new(),
            rows: Vec::new(),
            indent: 0,
            separator: " | ",
        }
    }

    /// Set table headers
    pub fn header<S: AsRef<str>>(mut self, headers: &[S]) -> Self {
        self.headers = headers.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    /// Add a table row
    pub fn row<S: AsRef<str>>(mut self, cells: &[S]) -> Self {
        self.rows
            .push(cells.iter().map(|s| s.as_ref().to_string()).collect());
        self
    }

    /// Left margin in spaces
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Text placed between columns, `" | "` by default
    pub fn separator(mut self, separator: &'a str) -> Self {
        self.separator = separator;
        self
    }

    pub fn render(&self) -> String {
        let num_cols = self
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0);
        if num_cols == 0 {
            return String::new();
        }

        let mut col_widths = vec![0; num_cols];
        for row in std::iter::once(&self.headers).chain(&self.rows) {
            for (i, cell) in row.iter().enumerate() {
                col_widths[i] = col_widths[i].max(measure_text_width(cell));
            }
        }

        let mut output = String::new();
        if !self.headers.is_empty() {
            self.render_row(&mut output, &self.headers, &col_widths, true);
            let separator = col_widths
                .iter()
                .map(|&w| "-".repeat(w))
                .collect::<Vec<_>>()
                .join("-+-");
            output.push_str(&" ".repeat(self.indent));
            output.push_str(&self.styling.style_subtle(&separator));
            output.push('\n');
        }
        for row in &self.rows {
            self.render_row(&mut output, row, &col_widths, false);
        }
        output
    }

    fn render_row(&self, output: &mut String, cells: &[String], widths: &[usize], is_header: bool) {
        let rendered: Vec<String> = widths
            .iter()
            .take(cells.len())
            .enumerate()
            .map(|(i, &width)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                let styled = if is_header {
                    self.styling.style_emphasis(cell)
                } else {
                    cell.to_string()
                };
                pad_str(&styled, width, Alignment::Left, None).into_owned()
            })
            .collect();

        output.push_str(&" ".repeat(self.indent));
        output.push_str(rendered.join(self.separator).trim_end());
        output.push('\n');
    }
}

#[cfg(test)]
mod tests {
    include!("table.test.rs");
}
