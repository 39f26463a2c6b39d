// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Integration tests for md2h conversion and the command-line wrapper.

use md2h::embed::{EmbedOptions, embed_html};
use md2h::render_html;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const INFO_MD: &str = "\
# Station Info

Shows the latest observations from *nearby* stations.
Data is refreshed every **15 minutes**.

## Sources
- NDBC buoys, see <https://www.ndbc.noaa.gov>
- OSMC platforms, which are fetched
in batches
  - includes drifters
- Questions? [Email us](mailto:help@example.com)

| Field | Unit |
|-------|:----:|
| Wind  | kn   |
| Wave  | m    |

---
### Notes
Text after the rule.
";

const INFO_HTML: &str = r#"<html><body>
<h1>Station Info</h1>
<p>Shows the latest observations from <i>nearby</i> stations. Data is refreshed every <b>15 minutes</b>.</p>
<h2>Sources</h2>
<ul>
<li>NDBC buoys, see <a href="https://www.ndbc.noaa.gov">https://www.ndbc.noaa.gov</a></li>
<li>OSMC platforms, which are fetched in batches</li>
<ul>
<li>includes drifters</li>
</ul>
<li>Questions? <a href="mailto:help@example.com">Email us</a></li>
</ul>
<table border="0" cellpadding="4" cellspacing="2">
<tr><td>Field</td><td>Unit</td></tr>
<tr><td>Wind</td><td>kn</td></tr>
<tr><td>Wave</td><td>m</td></tr>
</table>
<hr>
<h3>Notes</h3>
<p>Text after the rule.</p>
</body></html>"#;

fn md2h(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_md2h"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run md2h")
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("Non-UTF-8 temp path")
}

/// Converts a document using every supported construct.
#[test]
fn converts_full_document() {
    assert_eq!(render_html(INFO_MD), INFO_HTML);
}

/// Tests that list and table markup is balanced for mixed input.
#[test]
fn block_markup_is_balanced() {
    let html = render_html(INFO_MD);
    assert_eq!(html.matches("<ul>").count(), html.matches("</ul>").count());
    assert_eq!(
        html.matches("<table").count(),
        html.matches("</table>").count()
    );
}

/// Tests that the binary writes the same header the library produces.
#[test]
fn cli_writes_header_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("INFO.md");
    let output = dir.path().join("info_html.h");
    fs::write(&input, INFO_MD).unwrap();

    let result = md2h(&[path_str(&input), path_str(&output)]);
    assert!(result.status.success(), "{result:?}");

    let expected = embed_html(INFO_HTML, &EmbedOptions::default()).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), expected);
    assert!(String::from_utf8_lossy(&result.stderr).contains("Wrote"));
}

/// Tests that wrapper options reach the generated header.
#[test]
fn cli_applies_header_options() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("help.md");
    fs::write(&input, "# Help").unwrap();

    let result = md2h(&[
        "--symbol",
        "kHelp",
        "--delimiter",
        "HELP",
        "-q",
        path_str(&input),
        "-",
    ]);
    assert!(result.status.success(), "{result:?}");

    let stdout = String::from_utf8(result.stdout).unwrap();
    assert!(stdout.starts_with("// Auto-generated from help.md."));
    assert!(stdout.contains("static const char kHelp[] = R\"HELP(\n<html><body>"));
    assert!(stdout.ends_with("</body></html>\n)HELP\";\n"));
    assert!(result.stderr.is_empty());
}

/// Tests that `--html` skips the header wrapper.
#[test]
fn cli_writes_bare_html() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.md");
    fs::write(&input, "- a\n  - b").unwrap();

    let result = md2h(&["--html", path_str(&input), "-"]);
    assert!(result.status.success(), "{result:?}");
    assert_eq!(
        String::from_utf8(result.stdout).unwrap(),
        "<html><body>\n<ul>\n<li>a</li>\n<ul>\n<li>b</li>\n</ul>\n</ul>\n</body></html>\n"
    );
}

/// Tests that `--dump-lines` reports the classification of joined lines.
#[test]
fn cli_dumps_classified_lines() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.md");
    fs::write(&input, "## Hi\n- Foo\nbar\n|---|\n| a |").unwrap();

    let result = md2h(&["--dump-lines", path_str(&input), "-"]);
    assert!(result.status.success(), "{result:?}");

    let lines: Vec<serde_json::Value> = String::from_utf8(result.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(
        lines,
        [
            serde_json::json!({ "kind": "heading", "level": 2, "text": "Hi" }),
            serde_json::json!({ "kind": "list_item", "indent": 0, "text": "Foo bar" }),
            serde_json::json!({ "kind": "table_separator" }),
            serde_json::json!({ "kind": "table_row", "cells": ["a"] }),
        ]
    );
}

/// Tests that a wrong argument count prints usage and exits with status 1.
#[test]
fn cli_rejects_wrong_argument_count() {
    for args in [&[][..], &["only-one.md"][..], &["a", "b", "c"][..]] {
        let result = md2h(args);
        assert_eq!(result.status.code(), Some(1), "{args:?}");

        let stderr = String::from_utf8_lossy(&result.stderr);
        assert!(stderr.contains("Usage: md2h"), "{stderr}");
    }
}

/// Tests that a missing input file is reported with its path.
#[test]
fn cli_reports_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("missing.md");
    let output = dir.path().join("out.h");

    let result = md2h(&[path_str(&input), path_str(&output)]);
    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("missing.md"));
    assert!(!output.exists());
}

/// Tests that an invalid delimiter is rejected before anything is written.
#[test]
fn cli_rejects_invalid_delimiter() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.md");
    let output = dir.path().join("out.h");
    fs::write(&input, "text").unwrap();

    let result = md2h(&["--delimiter", "BAD TAG", path_str(&input), path_str(&output)]);
    assert_eq!(result.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&result.stderr).contains("invalid character"));
    assert!(!output.exists());
}
