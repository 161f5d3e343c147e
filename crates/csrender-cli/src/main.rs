//! csrender CLI - render code search responses and query the position map
//!
//! This is the main entry point for the csrender command-line interface.
//! Command implementations live in [`commands`].

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    execute_command(&cli)
}

fn initialize_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn execute_command(cli: &Cli) -> Result<()> {
    let config = commands::resolve_config(cli)?;

    match &cli.command {
        Commands::Render {
            input,
            format,
            dump,
        } => commands::render_document(input, &config, *format, *dump),

        Commands::Jump {
            input,
            line,
            column,
            format,
        } => commands::jump(input, &config, *line, *column, *format),

        Commands::Signature { input, line } => commands::signature(input, &config, *line),

        Commands::NextFile { input, line } => commands::file_location(input, &config, *line, true),

        Commands::PrevFile { input, line } => commands::file_location(input, &config, *line, false),

        Commands::Callers { input } => commands::callers(input),

        Commands::Expand {
            input,
            signature,
            fetched,
        } => commands::expand(input, signature, fetched),

        Commands::Collapse { input, signature } => commands::collapse(input, signature),
    }
}
