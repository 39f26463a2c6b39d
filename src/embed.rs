// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Embedding rendered HTML in a generated C++ header.
//!
//! The HTML is placed verbatim inside a raw string literal, so the only
//! requirements are a valid identifier for the variable and a raw string
//! delimiter that the HTML never contains.
//!
//! # Example
//!
//! ```
//! use md2h::embed::{EmbedOptions, embed_html};
//!
//! let header = embed_html("<p>hi</p>", &EmbedOptions::default()).unwrap();
//!
//! assert_eq!(
//!     header,
//!     "// Auto-generated from INFO.md. Do not edit manually.\n\
//!      static const char kInfoHTML[] = R\"INFOHTML(\n\
//!      <p>hi</p>\n\
//!      )INFOHTML\";\n"
//! );
//! ```

use snafu::{ensure, prelude::*};
use std::fmt::Write;

/// Longest raw string delimiter a C++ compiler must accept.
const MAX_DELIMITER_LEN: usize = 16;

/// Error type for header generation failures.
#[derive(Debug, Snafu)]
pub enum EmbedError {
    /// The variable name is not a C identifier.
    #[snafu(display("invalid symbol name `{symbol}`: must be a C identifier"))]
    InvalidSymbol {
        /// The rejected name.
        symbol: String,
    },

    /// The raw string delimiter exceeds the compiler limit.
    #[snafu(display(
        "delimiter `{delimiter}` is longer than {MAX_DELIMITER_LEN} characters"
    ))]
    DelimiterTooLong {
        /// The rejected delimiter.
        delimiter: String,
    },

    /// The raw string delimiter contains a character C++ forbids there.
    #[snafu(display("delimiter `{delimiter}` contains invalid character {ch:?}"))]
    InvalidDelimiter {
        /// The rejected delimiter.
        delimiter: String,
        /// The first offending character.
        ch: char,
    },

    /// The HTML contains the literal's closing sequence.
    #[snafu(display("HTML contains the closing sequence `){delimiter}\"`"))]
    DelimiterCollision {
        /// The delimiter found in the HTML.
        delimiter: String,
    },
}

/// Configuration for the generated header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedOptions {
    /// Name of the generated `static const char[]` variable.
    pub symbol: String,

    /// Raw string literal delimiter placed around the HTML.
    pub delimiter: String,

    /// Source file named in the "do not edit" banner.
    pub source_name: String,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            symbol: "kInfoHTML".into(),
            delimiter: "INFOHTML".into(),
            source_name: "INFO.md".into(),
        }
    }
}

/// Wraps `html` in a C++ header declaring it as a raw string literal.
///
/// # Errors
///
/// Returns an [`EmbedError`] if the symbol or delimiter is invalid, or if the
/// HTML would terminate the raw string early.
pub fn embed_html(html: &str, opts: &EmbedOptions) -> Result<String, EmbedError> {
    let EmbedOptions {
        symbol,
        delimiter,
        source_name,
    } = opts;

    ensure!(is_identifier(symbol), InvalidSymbolSnafu { symbol });
    ensure!(
        delimiter.chars().count() <= MAX_DELIMITER_LEN,
        DelimiterTooLongSnafu { delimiter }
    );
    if let Some(ch) = delimiter
        .chars()
        .find(|&c| matches!(c, ' ' | '(' | ')' | '\\') || c.is_control())
    {
        return InvalidDelimiterSnafu { delimiter, ch }.fail();
    }
    ensure!(
        !html.contains(&format!("){delimiter}\"")),
        DelimiterCollisionSnafu { delimiter }
    );

    let mut out = String::with_capacity(html.len() + 128);
    writeln!(out, "// Auto-generated from {source_name}. Do not edit manually.").unwrap();
    writeln!(out, "static const char {symbol}[] = R\"{delimiter}(").unwrap();
    writeln!(out, "{html}").unwrap();
    writeln!(out, "){delimiter}\";").unwrap();
    Ok(out)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
