// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! HTML rendering for the supported Markdown dialect.
//!
//! [`render_html`] makes a single pass over the [preprocessed](crate::parser::preprocess)
//! lines, classifying each one and emitting block markup as it goes. The only
//! state carried between lines is:
//!
//! - the paragraph buffer, flushed at the next structural or blank line
//! - a stack of open list indents, one `<ul>` per entry
//! - whether a `<table>` is open
//!
//! All of it lives for one call; nothing is shared between conversions.
//!
//! # Output Format
//!
//! The document is wrapped in `<html><body>` and uses only `h1`-`h3`, `p`,
//! `ul`/`li`, `table`/`tr`/`td`, `hr`, `a`, `b` and `i` elements. Each block
//! fragment is emitted on its own line.
//!
//! # Example
//!
//! ```
//! use md2h::renderer::render_html;
//!
//! let html = render_html("# Title\n\n- one\n  - two\n- three");
//!
//! assert_eq!(
//!     html,
//!     "<html><body>\n<h1>Title</h1>\n\
//!      <ul>\n<li>one</li>\n<ul>\n<li>two</li>\n</ul>\n<li>three</li>\n</ul>\n\
//!      </body></html>"
//! );
//! ```

use crate::inline::format_inline;
use crate::parser::{Line, classify, preprocess};
use std::borrow::Cow;
use std::fmt::Write;
use tracing::{debug, trace};

const TABLE_OPEN: &str = r#"<table border="0" cellpadding="4" cellspacing="2">"#;

/// Converts a Markdown document to an HTML document.
///
/// This never fails: lines that match no structural shape become paragraph
/// text, and any paragraph, list or table still open at the end is closed.
#[must_use]
pub fn render_html(markdown: &str) -> String {
    let lines = preprocess(markdown);
    let mut html = HtmlWriter::default();

    for (idx, line) in lines.iter().enumerate() {
        let line = classify(line);
        trace!(?line, "classified");

        match line {
            Line::Blank => html.close_blocks(),
            Line::Heading { level, text } => {
                html.close_blocks();
                html.push(format!("<h{level}>{}</h{level}>", format_inline(text)));
            }
            Line::Rule => {
                html.close_blocks();
                html.push("<hr>".to_owned());
            }
            Line::TableSeparator => {
                html.flush_paragraph();
                html.close_lists();
            }
            Line::TableRow { cells } => {
                html.flush_paragraph();
                html.close_lists();
                html.open_table();
                html.push_row(&cells);
                if !next_is_table_row(&lines[idx + 1..]) {
                    html.close_table();
                }
            }
            Line::ListItem { indent, text } => {
                html.flush_paragraph();
                html.close_table();
                html.enter_list(indent);
                html.push(format!("<li>{}</li>", format_inline(text)));
            }
            Line::Text { indent, text } => {
                html.close_table();
                if indent == 0 {
                    html.close_lists();
                }
                html.paragraph.push(text);
            }
        }
    }

    html.finish()
}

/// Returns `true` if the next non-blank line is a table row.
fn next_is_table_row(rest: &[Cow<'_, str>]) -> bool {
    rest.iter()
        .find(|line| !line.trim().is_empty())
        .is_some_and(|line| classify(line).is_table())
}

/// Output fragments plus the open-block state for one conversion.
#[derive(Default)]
struct HtmlWriter<'a> {
    parts: Vec<String>,
    paragraph: Vec<&'a str>,
    lists: Vec<usize>,
    in_table: bool,
}

impl HtmlWriter<'_> {
    fn push(&mut self, fragment: String) {
        self.parts.push(fragment);
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let text = self.paragraph.join(" ");
        self.paragraph.clear();
        self.push(format!("<p>{}</p>", format_inline(&text)));
    }

    /// Flushes the paragraph and closes every open list and table.
    fn close_blocks(&mut self) {
        self.flush_paragraph();
        self.close_lists();
        self.close_table();
    }

    fn close_lists(&mut self) {
        self.close_lists_deeper_than(None);
    }

    /// Pops list levels while the top indent exceeds `indent`.
    ///
    /// `None` closes every level.
    fn close_lists_deeper_than(&mut self, indent: Option<usize>) {
        while self
            .lists
            .last()
            .is_some_and(|&top| indent.is_none_or(|indent| top > indent))
        {
            self.lists.pop();
            self.parts.push("</ul>".to_owned());
        }
    }

    fn open_list(&mut self, indent: usize) {
        debug!(indent, depth = self.lists.len() + 1, "opening list");
        self.lists.push(indent);
        self.parts.push("<ul>".to_owned());
    }

    /// Adjusts the list stack so the top level sits at `indent`.
    ///
    /// Deeper indents nest a new level. Shallower indents pop back to the
    /// matching level, opening a fresh one if no open level matches exactly.
    fn enter_list(&mut self, indent: usize) {
        match self.lists.last() {
            Some(&top) if top == indent => {}
            Some(&top) if top > indent => {
                self.close_lists_deeper_than(Some(indent));
                if self.lists.last() != Some(&indent) {
                    self.open_list(indent);
                }
            }
            _ => self.open_list(indent),
        }
    }

    fn open_table(&mut self) {
        if !self.in_table {
            debug!("opening table");
            self.parts.push(TABLE_OPEN.to_owned());
            self.in_table = true;
        }
    }

    fn push_row(&mut self, cells: &[&str]) {
        let mut row = String::from("<tr>");
        for cell in cells {
            write!(row, "<td>{}</td>", format_inline(cell)).unwrap();
        }
        row.push_str("</tr>");
        self.parts.push(row);
    }

    fn close_table(&mut self) {
        if self.in_table {
            debug!("closing table");
            self.parts.push("</table>".to_owned());
            self.in_table = false;
        }
    }

    fn finish(mut self) -> String {
        self.close_blocks();
        debug!(fragments = self.parts.len(), "rendered document");

        let mut out = String::from("<html><body>");
        for part in &self.parts {
            out.push('\n');
            out.push_str(part);
        }
        out.push_str("\n</body></html>");
        out
    }
}
