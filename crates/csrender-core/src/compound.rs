//! Entry point: render whichever payload a compound response carries.

use tracing::debug;

use crate::call_graph::render_node;
use crate::config::Config;
use crate::mapper::LocationMapper;
use crate::search::render_search_response;
use crate::types::CompoundResponse;
use crate::xref::render_xref_search_response;
use crate::{Error, Result};

/// Render `response` into a new document.
///
/// Exactly one payload is rendered, checked in the order search,
/// cross-reference, call graph. A missing or empty list counts as not
/// populated. `query` only appears in search headers.
///
/// # Errors
///
/// - [`Error::UnrecognizedResponse`] if no payload is populated
/// - [`Error::MalformedResponse`] if the chosen payload holds more than one
///   response, or a call graph response has no root node
pub fn render_compound_response(
    response: &CompoundResponse,
    query: &str,
    config: &Config,
) -> Result<LocationMapper> {
    let mut mapper = LocationMapper::new(config.markup());

    let kind = if let Some(responses) = populated(response.search_response.as_deref()) {
        let search = single(responses, "search_response")?;
        render_search_response(&mut mapper, query, search, &config.layout);
        "search"
    } else if let Some(responses) = populated(response.xref_search_response.as_deref()) {
        let xref = single(responses, "xref_search_response")?;
        render_xref_search_response(&mut mapper, xref);
        "xref"
    } else if let Some(responses) = populated(response.call_graph_response.as_deref()) {
        let call_graph = single(responses, "call_graph_response")?;
        let root = call_graph.node.as_ref().ok_or_else(|| {
            Error::MalformedResponse("call_graph_response has no node".to_string())
        })?;
        render_node(&mut mapper, root, 0, &config.layout);
        "call_graph"
    } else {
        return Err(Error::UnrecognizedResponse);
    };

    debug!(
        kind,
        lines = mapper.lines().len(),
        jump_targets = mapper.jump_entries().count(),
        "rendered response"
    );
    Ok(mapper)
}

fn populated<T>(responses: Option<&[T]>) -> Option<&[T]> {
    responses.filter(|r| !r.is_empty())
}

fn single<'a, T>(responses: &'a [T], field: &str) -> Result<&'a T> {
    match responses {
        [only] => Ok(only),
        _ => Err(Error::MalformedResponse(format!(
            "expected exactly one {field}, got {}",
            responses.len()
        ))),
    }
}
