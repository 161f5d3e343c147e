//! Render cross-reference responses grouped by reference kind.
//!
//! ```text
//! Definition:
//!   base/at_exit.cc
//!     60:  void AtExitManager::RegisterTask(base::OnceClosure task) {
//!
//! References:
//!   base/at_exit_unittest.cc
//!     31:  base::AtExitManager::RegisterTask(...);
//!     48:  base::AtExitManager::RegisterTask(...);
//! ```

use crate::mapper::LocationMapper;
use crate::markup::Category;
use crate::types::{FileSpec, XrefKind, XrefSearchResponse, XrefSingleMatch};

/// Buckets in display order. Unlisted kinds land in the last one.
const BINS: [(XrefKind, &str); 13] = [
    (XrefKind::Definition, "Definition"),
    (XrefKind::Declaration, "Declaration"),
    (XrefKind::CalledBy, "Called by"),
    (XrefKind::Instantiation, "Instantiations"),
    (XrefKind::OverriddenBy, "Overridden by"),
    (XrefKind::Overrides, "Overrides"),
    (XrefKind::ExtendedBy, "Extended by"),
    (XrefKind::Extends, "Extends"),
    (XrefKind::Generates, "Generates"),
    (XrefKind::GeneratedBy, "Generated by"),
    (XrefKind::Annotates, "Annotates"),
    (XrefKind::AnnotatedBy, "Annotated by"),
    (XrefKind::Reference, "References"),
];

const FILE_INDENT: &str = "  ";
const LINE_INDENT: &str = "    ";

fn bin_index(kind: XrefKind) -> usize {
    BINS.iter()
        .position(|(k, _)| *k == kind)
        .unwrap_or(BINS.len() - 1)
}

/// Render the matches of one bucket, grouped by file.
pub fn render_xref_results(
    mapper: &mut LocationMapper,
    results: &mut [(&FileSpec, &XrefSingleMatch)],
) {
    results.sort_by(|(f1, m1), (f2, m2)| {
        f1.name
            .cmp(&f2.name)
            .then(m1.line_number.cmp(&m2.line_number))
    });

    let mut last_file: Option<&str> = None;
    for (file, m) in results.iter() {
        let name = file.name.as_str();
        if last_file != Some(name) {
            if last_file.is_some() {
                mapper.newline();
            }
            last_file = Some(name);
            mapper.write(FILE_INDENT);
            mapper.set_target_for_pos(name, 1);
            mapper.tagged(Category::FileName, |w| w.write(name));
            mapper.newline();
        }
        mapper.write(&format!("{LINE_INDENT}{}:  ", m.line_number));
        mapper.set_target_for_pos(name, m.line_number);
        mapper.tagged(Category::Snippet, |w| w.write(&m.line_text));
        mapper.newline();
    }
}

/// Render a cross-reference response.
///
/// A non-zero status renders the failure instead of any buckets.
pub fn render_xref_search_response(mapper: &mut LocationMapper, response: &XrefSearchResponse) {
    if response.status != 0 {
        mapper.write("No results for query");
        mapper.newline();
        if let Some(message) = response.status_message.as_deref().filter(|m| !m.is_empty()) {
            mapper.write(&format!("Server status: {message}"));
            mapper.newline();
        }
        mapper.write(&format!("Status code  : {}", response.status));
        mapper.newline();
        return;
    }

    let mut bins: Vec<Vec<(&FileSpec, &XrefSingleMatch)>> = vec![Vec::new(); BINS.len()];
    for result in &response.search_result {
        for m in &result.matches {
            bins[bin_index(m.kind)].push((&result.file, m));
        }
    }

    for ((_, name), mut matches) in BINS.iter().zip(bins) {
        if matches.is_empty() {
            continue;
        }
        mapper.tagged(Category::CategoryHeader, |w| w.write(&format!("{name}:")));
        mapper.newline();
        render_xref_results(mapper, &mut matches);
        mapper.newline();
    }
}
