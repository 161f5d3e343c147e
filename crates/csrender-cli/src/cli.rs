//! # CLI Structure and Argument Parsing
//!
//! `csrender` reads a code search server response (JSON), renders it the way
//! an editor buffer would show it, and answers position queries against the
//! rendered text.
//!
//! ## Usage Patterns
//!
//! ```bash
//! # Render a response
//! csrender render response.json --query RegisterTask
//!
//! # Where does line 4, column 37 of the rendered text come from?
//! csrender jump response.json 4 37
//!
//! # Navigate between file blocks
//! csrender next-file response.json 3
//!
//! # Call graph exploration
//! csrender expand graph.json --signature cpp:Foo --with fetched.json > graph2.json
//! csrender collapse graph2.json --signature cpp:Foo
//! ```
//!
//! Every command accepts `-` to read the response from stdin.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;

/// Main CLI structure for the `csrender` command
#[derive(Parser, Clone, Debug)]
#[command(name = "csrender")]
#[command(version)]
#[command(about = "csrender - render code search responses with a position map", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Render without markup tags (overrides config and `CSRENDER_MARKUP`)
    #[arg(long = "no-markup", global = true)]
    pub no_markup: bool,

    /// Path to configuration file (overrides autodiscovery). Also via `CSRENDER_CONFIG`.
    #[arg(long, global = true, value_name = "FILE", env = "CSRENDER_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Response input shared by every command.
#[derive(Args, Clone, Debug)]
pub struct InputArgs {
    /// Response JSON file, or `-` for stdin
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Query shown in search headers
    #[arg(short = 'q', long, default_value = "")]
    pub query: String,
}

/// Available subcommands for the `csrender` CLI
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Render a response
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Print each line followed by its jump target and signature
        #[arg(long, conflicts_with = "format")]
        dump: bool,
    },

    /// Resolve a rendered position to its source location
    Jump {
        #[command(flatten)]
        input: InputArgs,

        /// 1-indexed rendered line
        line: usize,

        /// 1-indexed rendered column
        column: usize,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the signature recorded for a rendered line
    Signature {
        #[command(flatten)]
        input: InputArgs,

        /// 1-indexed rendered line
        line: usize,
    },

    /// Print the first line of the next file block
    #[command(name = "next-file")]
    NextFile {
        #[command(flatten)]
        input: InputArgs,

        /// 1-indexed rendered line
        line: usize,
    },

    /// Print the first line of the previous file block
    #[command(name = "prev-file")]
    PrevFile {
        #[command(flatten)]
        input: InputArgs,

        /// 1-indexed rendered line
        line: usize,
    },

    /// List the call sites of a call graph's loaded callers
    Callers {
        /// Call graph response JSON file, or `-` for stdin
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Attach a fetched call graph level to a node and print the merged response
    Expand {
        /// Call graph response JSON file, or `-` for stdin
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Signature of the node to expand
        #[arg(short = 's', long)]
        signature: String,

        /// Call graph response fetched for that signature
        #[arg(long = "with", value_name = "FILE")]
        fetched: PathBuf,
    },

    /// Forget a node's loaded callers and print the updated response
    Collapse {
        /// Call graph response JSON file, or `-` for stdin
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Signature of the node to collapse
        #[arg(short = 's', long)]
        signature: String,
    },
}
