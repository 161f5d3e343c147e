//! # Output Formatting
//!
//! - **Text**: rendered lines as an editor buffer would hold them
//! - **JSON**: the document snapshot, with 1-indexed jump and signature maps

use std::io::{self, Write};

use anyhow::Result;
use csrender_core::{JumpTarget, LocationMapper};
use serde::Serialize;

/// Output format for commands that produce structured data
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text (default)
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Write the rendered document.
pub fn print_document(mapper: &LocationMapper, format: OutputFormat) -> Result<()> {
    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Text => {
            for line in mapper.lines() {
                writeln!(out, "{line}")?;
            }
        },
        OutputFormat::Json => print_json(&mut out, &mapper.snapshot())?,
    }
    Ok(())
}

/// Write the line-per-line dump of the document and its maps.
pub fn print_dump(mapper: &LocationMapper) -> Result<()> {
    write!(io::stdout().lock(), "{mapper}")?;
    Ok(())
}

/// Write a resolved source location as `file:line:column`.
pub fn print_target(target: &JumpTarget, format: OutputFormat) -> Result<()> {
    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Text => writeln!(out, "{}:{}:{}", target.file, target.line, target.column)?,
        OutputFormat::Json => print_json(&mut out, target)?,
    }
    Ok(())
}

/// Write `value` as pretty JSON followed by a newline.
pub fn print_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
