//! Render free-text search responses.
//!
//! ```text
//! CodeSearch results for ^q{query}q_
//!
//! 1. src/base/at_exit.cc^>{
//!     95 void AtExitManager::RegisterTask() {
//!     96   ...
//!     [...]
//!     120 }
//! }>_
//! ```

use crate::annotated::render_snippet;
use crate::config::LayoutConfig;
use crate::mapper::LocationMapper;
use crate::markup::Category;
use crate::types::{SearchResponse, SearchResult};

/// Render one search result. `index` is 0-based; the header shows `index + 1`.
pub fn render_search_result(
    mapper: &mut LocationMapper,
    index: usize,
    result: &SearchResult,
    layout: &LayoutConfig,
) {
    let file = result.top_file.file.name.as_str();
    mapper.set_target_for_pos(file, 1);
    mapper.write(&format!("{}. {file}", index + 1));
    for (snippet_index, snippet) in result.snippet.iter().enumerate() {
        mapper.tagged(Category::Snippet, |m| {
            render_snippet(m, snippet_index, snippet, file, layout.snippet_indent, 1);
        });
    }
    mapper.newline();
}

/// Render a whole search response for `query`.
pub fn render_search_response(
    mapper: &mut LocationMapper,
    query: &str,
    response: &SearchResponse,
    layout: &LayoutConfig,
) {
    if response.search_result.is_empty() {
        render_no_results(mapper, query, response);
        return;
    }

    mapper.write("CodeSearch results for ");
    mapper.tagged(Category::Query, |m| m.write(query));
    mapper.newline();
    mapper.newline();

    for (position, result) in response.search_result.iter().enumerate() {
        render_search_result(mapper, position + response.results_offset, result, layout);
        mapper.newline();
    }

    if response.hit_max_results {
        mapper.write(&format!(
            "Search results are truncated. Showing {} results out of an estimated {}.",
            response.search_result.len(),
            response.estimated_total_number_of_results
        ));
        mapper.newline();
    }
}

fn render_no_results(mapper: &mut LocationMapper, query: &str, response: &SearchResponse) {
    mapper.write("No results for query ");
    mapper.tagged(Category::Query, |m| m.write(query));
    mapper.newline();
    mapper.newline();

    if let Some(message) = response.status_message.as_deref().filter(|m| !m.is_empty()) {
        mapper.write(&format!("Server status: {message}"));
        mapper.newline();
    }
    mapper.write(&format!("Status code  : {}", response.status));
    mapper.newline();
}
