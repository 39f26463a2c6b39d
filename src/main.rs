// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Command-line interface for md2h.
//!
//! This binary provides the `md2h` command for converting a Markdown file to
//! HTML and writing it out as a generated C++ header.

use lexopt::prelude::*;
use md2h::{embed, parser, renderer};
use snafu::prelude::*;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Where to write the rendered output.
enum OutputTarget {
    /// Write to the specified file.
    File(PathBuf),
    /// Write to stdout.
    Stdout,
}

/// What to write.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// HTML wrapped in a C++ header.
    Header,
    /// The bare HTML document.
    Html,
    /// Classified lines as JSON, one object per line.
    DumpLines,
}

struct Cli {
    input: PathBuf,
    output: OutputTarget,
    mode: Mode,
    symbol: Option<String>,
    delimiter: Option<String>,
    source_name: Option<String>,
    quiet: bool,
}

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("failed to parse arguments: {source}"))]
    ParseArgs { source: lexopt::Error },

    #[snafu(display("expected exactly two arguments, got {count}"))]
    Usage { count: usize },

    #[snafu(display("failed to read {}: {source}", path.display()))]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("failed to build header: {source}"))]
    Embed { source: embed::EmbedError },

    #[snafu(display("failed to serialize lines: {source}"))]
    Serialize { source: serde_json::Error },

    #[snafu(display("failed to write {}: {source}", path.display()))]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn usage() -> String {
    format!(
        "Usage: {} [OPTIONS] <INPUT> <OUTPUT>",
        env!("CARGO_PKG_NAME")
    )
}

fn print_help() {
    println!(
        "\
{name} {version}
Convert Markdown to HTML embedded in a generated C++ header

{usage}

Arguments:
  <INPUT>   Markdown file to convert
  <OUTPUT>  Header file to write (- for stdout)

Options:
      --symbol <NAME>       Variable name (default: kInfoHTML)
      --delimiter <TAG>     Raw string delimiter (default: INFOHTML)
      --source-name <NAME>  File named in the banner (default: input file name)
      --html                Write the bare HTML document
      --dump-lines          Write classified lines as JSON instead of converting
  -q, --quiet               Suppress progress messages
  -h, --help                Print help
  -V, --version             Print version

Set RUST_LOG=debug (or trace) to log conversion details to stderr.",
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        usage = usage(),
    );
}

fn parse_args() -> Result<Cli, Error> {
    let mut positional: Vec<PathBuf> = Vec::new();
    let mut mode = Mode::Header;
    let mut symbol = None;
    let mut delimiter = None;
    let mut source_name = None;
    let mut quiet = false;

    let mut parser = lexopt::Parser::from_env();
    while let Some(arg) = parser.next().context(ParseArgsSnafu)? {
        match arg {
            Long("symbol") => symbol = Some(string_value(&mut parser)?),
            Long("delimiter") => delimiter = Some(string_value(&mut parser)?),
            Long("source-name") => source_name = Some(string_value(&mut parser)?),
            // Last one wins
            Long("html") => mode = Mode::Html,
            Long("dump-lines") => mode = Mode::DumpLines,
            Short('q') | Long("quiet") => quiet = true,
            Short('h') | Long("help") => {
                print_help();
                std::process::exit(0);
            }
            Short('V') | Long("version") => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            Value(val) => positional.push(val.into()),
            _ => return Err(arg.unexpected()).context(ParseArgsSnafu),
        }
    }

    let count = positional.len();
    let [input, output]: [PathBuf; 2] = positional
        .try_into()
        .map_err(|_| UsageSnafu { count }.build())?;

    let output = if output == Path::new("-") {
        OutputTarget::Stdout
    } else {
        OutputTarget::File(output)
    };

    Ok(Cli {
        input,
        output,
        mode,
        symbol,
        delimiter,
        source_name,
        quiet,
    })
}

fn string_value(parser: &mut lexopt::Parser) -> Result<String, Error> {
    parser
        .value()
        .and_then(|val| val.string())
        .context(ParseArgsSnafu)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {err}", env!("CARGO_PKG_NAME"));
            if matches!(err, Error::Usage { .. }) {
                eprintln!("{}", usage());
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Error> {
    let cli = parse_args()?;

    let input = &cli.input;
    let markdown = std::fs::read_to_string(input).context(ReadFileSnafu { path: input })?;
    debug!(path = %input.display(), bytes = markdown.len(), "read input");

    let content = match cli.mode {
        Mode::Header => {
            let html = renderer::render_html(&markdown);
            embed::embed_html(&html, &make_embed_options(&cli)).context(EmbedSnafu)?
        }
        Mode::Html => {
            let mut html = renderer::render_html(&markdown);
            html.push('\n');
            html
        }
        Mode::DumpLines => dump_lines(&markdown)?,
    };

    match &cli.output {
        OutputTarget::Stdout => print!("{content}"),
        OutputTarget::File(path) => {
            std::fs::write(path, &content).context(WriteFileSnafu { path })?;
            if !cli.quiet {
                eprintln!("Wrote {}", path.display());
            }
        }
    }

    Ok(())
}

/// Creates embed options from CLI arguments, falling back to the defaults.
fn make_embed_options(cli: &Cli) -> embed::EmbedOptions {
    let defaults = embed::EmbedOptions::default();
    let source_name = cli
        .source_name
        .clone()
        .or_else(|| {
            cli.input
                .file_name()
                .map(OsStr::to_string_lossy)
                .map(String::from)
        })
        .unwrap_or(defaults.source_name);

    embed::EmbedOptions {
        symbol: cli.symbol.clone().unwrap_or(defaults.symbol),
        delimiter: cli.delimiter.clone().unwrap_or(defaults.delimiter),
        source_name,
    }
}

/// Serializes each preprocessed, classified line as one JSON object per line.
fn dump_lines(markdown: &str) -> Result<String, Error> {
    let mut out = String::new();
    for line in parser::preprocess(markdown) {
        let json = serde_json::to_string(&parser::classify(&line)).context(SerializeSnafu)?;
        out.push_str(&json);
        out.push('\n');
    }
    Ok(out)
}
