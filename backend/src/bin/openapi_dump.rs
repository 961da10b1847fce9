//! Print the OpenAPI document as JSON, to stdout or a file.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use migii::doc::ApiDoc;
use utoipa::OpenApi;

/// `openapi-dump` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "openapi-dump",
    about = "Write the Migii Mock API OpenAPI document as pretty JSON",
    version
)]
struct CliArgs {
    /// Write to this file instead of stdout.
    #[arg(long, short, value_name = "path")]
    output: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let mut json = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(io::Error::other)?;
    json.push('\n');
    match args.output {
        Some(path) => fs::write(&path, json).map_err(|error| {
            io::Error::new(
                error.kind(),
                format!("write {}: {error}", path.display()),
            )
        }),
        None => io::stdout().lock().write_all(json.as_bytes()),
    }
}
