// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Line-oriented parsing of the supported Markdown dialect.
//!
//! Parsing happens in two steps, both working on whole lines:
//!
//! 1. [`preprocess`] folds the wrapped continuation lines of each bullet item
//!    into the bullet line itself, so every list item occupies one line.
//! 2. [`classify`] maps a single preprocessed line onto the closed set of
//!    [`Line`] shapes the block renderer understands.
//!
//! No document tree is built; the renderer walks the preprocessed lines once.
//!
//! # Continuation lines
//!
//! Two styles of wrapped bullet text are recognised:
//!
//! ```text
//! - indented continuation,
//!   standard markdown
//! - unindented continuation,
//! common in hand-wrapped files
//! ```
//!
//! The unindented style only applies to top-level bullets and stops at
//! anything that looks like the start of a new block.
//!
//! # Example
//!
//! ```
//! use md2h::parser::{Line, classify, preprocess};
//!
//! let lines = preprocess("- first\nwrapped\n- second");
//! assert_eq!(lines, ["- first wrapped", "- second"]);
//!
//! assert_eq!(
//!     classify(&lines[0]),
//!     Line::ListItem { indent: 0, text: "first wrapped" }
//! );
//! ```

use serde::Serialize;
use std::borrow::Cow;

/// The shape of a single preprocessed line.
///
/// Every line maps onto exactly one variant; [`Line::Text`] is the catch-all,
/// so classification cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Line<'a> {
    /// A line containing only whitespace.
    Blank,

    /// An ATX heading such as `## Title`.
    Heading {
        /// Heading level, 1 to 3.
        level: u8,
        /// Heading text without the leading `#` marker.
        text: &'a str,
    },

    /// A horizontal rule: three or more hyphens and nothing else.
    Rule,

    /// A table separator row such as `|---|:--:|`, which produces no output.
    TableSeparator,

    /// A pipe-delimited table row.
    TableRow {
        /// Trimmed cell values, left to right.
        cells: Vec<&'a str>,
    },

    /// A bullet list item.
    ListItem {
        /// Number of leading spaces before the `-` marker.
        indent: usize,
        /// Trimmed item text.
        text: &'a str,
    },

    /// Any other line, treated as paragraph text.
    Text {
        /// Number of leading whitespace characters.
        indent: usize,
        /// Trimmed line content.
        text: &'a str,
    },
}

impl Line<'_> {
    /// Returns `true` for lines that are part of a table.
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Self::TableSeparator | Self::TableRow { .. })
    }
}

/// Classifies one preprocessed line.
///
/// Checks run in priority order: blank, heading, rule, table row, list item,
/// and finally plain text.
#[must_use]
pub fn classify(line: &str) -> Line<'_> {
    let stripped = line.trim_end();

    if stripped.is_empty() {
        return Line::Blank;
    }
    if let Some((level, text)) = parse_heading(stripped) {
        return Line::Heading { level, text };
    }
    if is_rule(stripped) {
        return Line::Rule;
    }
    if stripped.starts_with('|') {
        if is_separator_row(stripped) {
            return Line::TableSeparator;
        }
        return Line::TableRow {
            cells: split_cells(stripped),
        };
    }
    if let Some((indent, text)) = parse_bullet(stripped) {
        return Line::ListItem {
            indent,
            text: text.trim(),
        };
    }

    Line::Text {
        indent: line.chars().take_while(|c| c.is_whitespace()).count(),
        text: stripped.trim(),
    }
}

/// Joins each bullet item's continuation lines onto the bullet line.
///
/// Lines that are not bullets pass through unchanged and unallocated. A bullet
/// absorbs following lines while they are either:
///
/// - indented at least two columns past the bullet marker, non-blank, and not
///   bullets themselves, or
/// - (top-level bullets only) non-blank and not the start of another block;
///   see [`is_block_start`].
///
/// Each absorbed line is trimmed and appended after a single space.
#[must_use]
pub fn preprocess(source: &str) -> Vec<Cow<'_, str>> {
    let mut out = Vec::new();
    let mut lines = source.lines().peekable();

    while let Some(line) = lines.next() {
        let Some((indent, _)) = parse_bullet(line) else {
            out.push(Cow::Borrowed(line));
            continue;
        };

        let mut joined = Cow::Borrowed(line.trim_end());
        while let Some(next) = lines.next_if(|next| is_continuation(next, indent)) {
            let text = joined.to_mut();
            text.push(' ');
            text.push_str(next.trim());
        }
        out.push(joined);
    }

    out
}

/// Returns `true` if `line` should be folded into a bullet at `indent`.
fn is_continuation(line: &str, indent: usize) -> bool {
    if line.trim().is_empty() {
        return false;
    }
    let indented = leading_spaces(line) >= indent + 2 && !is_bullet(line);
    let unindented = indent == 0 && !is_block_start(line);
    indented || unindented
}

/// Returns `true` if `line` starts a new block and so ends continuation.
///
/// Block starts are blank lines, heading markers, rules, bullet markers at any
/// indent, and table rows.
#[must_use]
pub fn is_block_start(line: &str) -> bool {
    line.trim().is_empty()
        || is_heading_marker(line)
        || is_rule(line)
        || is_bullet(line)
        || line.starts_with('|')
}

/// Returns `true` if `line` begins with a `- ` bullet marker after any spaces.
///
/// Unlike a list item, the marker need not be followed by text.
#[must_use]
pub fn is_bullet(line: &str) -> bool {
    line.trim_start_matches(' ').starts_with("- ")
}

/// Returns `true` for three or more hyphens followed only by whitespace.
#[must_use]
pub fn is_rule(line: &str) -> bool {
    let body = line.trim_end();
    body.len() >= 3 && body.bytes().all(|b| b == b'-')
}

/// Splits a bullet line into its indent and the text after `- `.
///
/// The text must be non-empty; it is returned untrimmed.
fn parse_bullet(line: &str) -> Option<(usize, &str)> {
    let indent = leading_spaces(line);
    let text = line[indent..].strip_prefix("- ")?;
    (!text.is_empty()).then_some((indent, text))
}

/// Returns the heading marker length if `line` starts with 1-3 `#` and a space.
fn heading_marker_len(line: &str) -> Option<usize> {
    let hashes = line.bytes().take_while(|&b| b == b'#').count();
    ((1..=3).contains(&hashes) && line[hashes..].starts_with(' ')).then_some(hashes)
}

fn is_heading_marker(line: &str) -> bool {
    heading_marker_len(line).is_some()
}

fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let hashes = heading_marker_len(line)?;
    let text = &line[hashes + 1..];
    if text.is_empty() {
        return None;
    }
    Some((u8::try_from(hashes).ok()?, text))
}

/// A row made only of pipes, hyphens, colons and spaces.
fn is_separator_row(row: &str) -> bool {
    row.strip_prefix('|').is_some_and(|rest| {
        !rest.is_empty() && rest.chars().all(|c| matches!(c, '|' | '-' | ':' | ' '))
    })
}

/// Drops one leading and one trailing pipe, then splits and trims the cells.
fn split_cells(row: &str) -> Vec<&str> {
    let inner = row.strip_prefix('|').unwrap_or(row);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(str::trim).collect()
}

fn leading_spaces(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}
