//! Command implementations.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use csrender_core::{
    CallGraph, CallGraphResponse, CompoundResponse, Config, LocationMapper,
    render_compound_response,
};
use tracing::{debug, info};

use crate::cli::{Cli, InputArgs};
use crate::output::{self, OutputFormat};

/// Resolve the effective configuration: file, then environment, then flags.
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };
    let mut config = config.with_env_overrides()?;
    if cli.no_markup {
        config.markup.enabled = false;
    }
    debug!(markup = config.markup.enabled, "configuration resolved");
    Ok(config)
}

/// Read a compound response from a file, or stdin for `-`.
pub fn read_response(path: &Path) -> Result<CompoundResponse> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read response from stdin")?;
        buffer
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read response {}", path.display()))?
    };
    CompoundResponse::from_json(&content)
        .with_context(|| format!("Failed to parse response {}", path.display()))
}

fn render(input: &InputArgs, config: &Config) -> Result<LocationMapper> {
    let response = read_response(&input.input)?;
    Ok(render_compound_response(&response, &input.query, config)?)
}

/// `render`: print the rendered document.
pub fn render_document(
    input: &InputArgs,
    config: &Config,
    format: OutputFormat,
    dump: bool,
) -> Result<()> {
    let mapper = render(input, config)?;
    info!(lines = mapper.lines().len(), "rendered");
    if dump {
        output::print_dump(&mapper)
    } else {
        output::print_document(&mapper, format)
    }
}

/// `jump`: print the source location behind a rendered position.
pub fn jump(
    input: &InputArgs,
    config: &Config,
    line: usize,
    column: usize,
    format: OutputFormat,
) -> Result<()> {
    let mapper = render(input, config)?;
    let target = mapper
        .jump_target_at(line, column)
        .ok_or_else(|| anyhow!("No jump target at {line}:{column}"))?;
    output::print_target(&target, format)
}

/// `signature`: print the signature recorded for a rendered line.
pub fn signature(input: &InputArgs, config: &Config, line: usize) -> Result<()> {
    let mapper = render(input, config)?;
    match mapper.signature_at(line) {
        Some(signature) => {
            println!("{signature}");
            Ok(())
        },
        None => bail!("No signature at line {line}"),
    }
}

/// `next-file` / `prev-file`: print the first line of a neighboring file block.
pub fn file_location(input: &InputArgs, config: &Config, line: usize, forward: bool) -> Result<()> {
    let mapper = render(input, config)?;
    let location = if forward {
        mapper.next_file_location(line)
    } else {
        mapper.previous_file_location(line)
    };
    println!("{location}");
    Ok(())
}

fn load_call_graph(path: &Path) -> Result<CallGraph> {
    let response = read_response(path)?;
    let node = response
        .call_graph_response
        .and_then(|responses| responses.into_iter().next())
        .and_then(|response| response.node)
        .with_context(|| format!("{} holds no call graph", path.display()))?;
    Ok(CallGraph::from(node))
}

fn print_call_graph(graph: CallGraph) -> Result<()> {
    let response = CompoundResponse {
        call_graph_response: Some(vec![CallGraphResponse {
            node: Some(graph.root),
        }]),
        ..CompoundResponse::default()
    };
    output::print_json(&mut io::stdout().lock(), &response)
}

/// `callers`: list the call sites of the root's loaded callers.
pub fn callers(input: &Path) -> Result<()> {
    let graph = load_call_graph(input)?;
    for location in graph.root.caller_locations() {
        println!("{location}");
    }
    Ok(())
}

/// `expand`: merge a fetched level into the graph.
pub fn expand(input: &Path, signature: &str, fetched: &Path) -> Result<()> {
    let mut graph = load_call_graph(input)?;
    let fetched_node = read_response(fetched)?
        .call_graph_response
        .and_then(|responses| responses.into_iter().next())
        .and_then(|response| response.node);

    if !graph.expand_with(signature, fetched_node)? {
        info!(signature, "callers already loaded; graph unchanged");
    }
    print_call_graph(graph)
}

/// `collapse`: forget a node's loaded callers.
pub fn collapse(input: &Path, signature: &str) -> Result<()> {
    let mut graph = load_call_graph(input)?;
    if !graph.collapse(signature)? {
        info!(signature, "nothing to collapse");
    }
    print_call_graph(graph)
}
