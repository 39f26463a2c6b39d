// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Inline formatting: links, bold and italic.
//!
//! Substitutions are purely textual and run in a fixed order, each one over
//! the output of the previous:
//!
//! 1. `<https://...>` autolinks
//! 2. `[label](target)` links, any scheme
//! 3. `**bold**`
//! 4. `*italic*`, skipping asterisks that belong to a `**` pair
//!
//! Input is assumed to be safe plain text; nothing is escaped.
//!
//! ```
//! use md2h::inline::format_inline;
//!
//! assert_eq!(
//!     format_inline("See **[docs](https://example.com)**"),
//!     r#"See <b><a href="https://example.com">docs</a></b>"#,
//! );
//! ```

use regex::Regex;
use std::sync::LazyLock;

static AUTOLINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(https?://[^>]+)>").expect("Invalid autolink regex"));

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("Invalid link regex"));

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("Invalid bold regex"));

/// Converts the inline markup in `text` to HTML.
#[must_use]
pub fn format_inline(text: &str) -> String {
    let text = AUTOLINK.replace_all(text, r#"<a href="${1}">${1}</a>"#);
    let text = LINK.replace_all(&text, r#"<a href="${2}">${1}</a>"#);
    let text = BOLD.replace_all(&text, "<b>${1}</b>");
    italicize(&text)
}

/// Wraps `*text*` spans in `<i>` tags.
///
/// A span opens on an asterisk not preceded by another asterisk and closes on
/// the next asterisk, provided the span is non-empty and the closing asterisk
/// is not followed by another one. The `regex` crate has no lookaround, so the
/// scan is done by hand.
fn italicize(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut pos = 0;

    while let Some(offset) = text[pos..].find('*') {
        let open = pos + offset;
        pos = open + 1;

        if open > 0 && bytes[open - 1] == b'*' {
            continue;
        }
        let Some(len) = text[open + 1..].find('*') else {
            break;
        };
        let close = open + 1 + len;
        if len == 0 || bytes.get(close + 1) == Some(&b'*') {
            continue;
        }

        out.push_str(&text[copied..open]);
        out.push_str("<i>");
        out.push_str(&text[open + 1..close]);
        out.push_str("</i>");
        copied = close + 1;
        pos = copied;
    }

    out.push_str(&text[copied..]);
    out
}
