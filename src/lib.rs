// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Convert a small Markdown dialect to HTML for embedding in generated code.
//!
//! The dialect covers headings (`#` to `###`), horizontal rules, bullet lists
//! nested by indentation, pipe tables, paragraphs, and inline links, bold and
//! italic. Conversion is a single streaming pass over the lines of the input
//! rather than a full document parse.
//!
//! # Overview
//!
//! 1. [`parser::preprocess`] joins wrapped bullet text onto its bullet line
//! 2. [`renderer::render_html`] classifies each line and emits block markup,
//!    formatting text through [`inline::format_inline`]
//! 3. [`embed::embed_html`] optionally wraps the HTML in a C++ header
//!
//! # Example
//!
//! ```
//! use md2h::embed::{EmbedOptions, embed_html};
//! use md2h::render_html;
//!
//! let html = render_html("## Usage\n\n- run **md2h**\n");
//! assert!(html.contains("<h2>Usage</h2>"));
//! assert!(html.contains("<li>run <b>md2h</b></li>"));
//!
//! let header = embed_html(&html, &EmbedOptions::default()).unwrap();
//! assert!(header.contains("static const char kInfoHTML[]"));
//! ```
//!
//! # Modules
//!
//! - [`parser`]: continuation joining and line classification
//! - [`inline`]: link and emphasis substitution
//! - [`renderer`]: the block-level HTML state machine
//! - [`embed`]: C++ raw string header generation

#![deny(missing_docs)]

pub mod embed;
pub mod inline;
pub mod parser;
pub mod renderer;

pub use renderer::render_html;
