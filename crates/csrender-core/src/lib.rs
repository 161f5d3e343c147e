//! # csrender-core
//!
//! Core functionality for csrender - turn code search results into plain text
//! that an editor can display, and map every position of that text back to the
//! source it came from.
//!
//! The crate renders three kinds of server responses (free-text search,
//! cross-references, call graphs) into a list of lines. While rendering it
//! records, per line, which file and source line the text was taken from and
//! which symbol signature the line belongs to. Syntax highlighting travels as
//! short inline markup tags (`^k{return}k_`) that an editor conceals; position
//! lookups see through them.
//!
//! ## Architecture
//!
//! - **Markup**: tag encoding and overhead measurement
//! - **Mapper**: the text buffer plus its jump and signature maps
//! - **Annotated text**: splices highlight ranges into source text
//! - **Renderers**: search, cross-reference and call graph layouts
//! - **Configuration**: markup toggle and indentation, from TOML
//! - **Error Handling**: categorized error types
//!
//! ## Quick Start
//!
//! ```rust
//! use csrender_core::{CompoundResponse, Config, render_compound_response};
//!
//! let response: CompoundResponse = serde_json::from_str(r#"{
//!     "xref_search_response": [{
//!         "search_result": [{
//!             "file": {"name": "base/at_exit.cc"},
//!             "match": [{"line_number": 60, "line_text": "void Run() {", "type_id": "DEFINITION"}]
//!         }]
//!     }]
//! }"#)?;
//!
//! let mapper = render_compound_response(&response, "Run", &Config::default())?;
//! assert_eq!(mapper.lines()[0], "^Cat{Definition:}Cat_");
//!
//! let target = mapper.jump_target_at(3, 1).expect("row is mapped");
//! assert_eq!((target.file.as_str(), target.line), ("base/at_exit.cc", 60));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Rendering a recognized response cannot fail. The entry point rejects
//! responses it cannot place:
//!
//! ```rust
//! use csrender_core::{CompoundResponse, Config, Error, render_compound_response};
//!
//! match render_compound_response(&CompoundResponse::default(), "q", &Config::default()) {
//!     Err(Error::UnrecognizedResponse) => {},
//!     Err(e) => eprintln!("{} error: {e}", e.category()),
//!     Ok(_) => unreachable!(),
//! }
//! ```

/// Symbol name shortening
pub mod abbreviate;
/// Annotated source text rendering
pub mod annotated;
/// Call graph trees and their rendering
pub mod call_graph;
/// Top-level response dispatch
pub mod compound;
/// Rendering configuration
pub mod config;
/// Error types and result aliases
pub mod error;
/// Position-mapped text buffer
pub mod mapper;
/// Inline markup tags
pub mod markup;
/// Free-text search rendering
pub mod search;
/// Response schema
pub mod types;
/// Cross-reference rendering
pub mod xref;

// Re-export commonly used types
pub use abbreviate::abbreviate_symbol;
pub use call_graph::{CallGraph, CallGraphNode, CallerLocation, Children};
pub use compound::render_compound_response;
pub use config::{Config, LayoutConfig, MarkupConfig};
pub use error::{Error, Result};
pub use mapper::{DocumentSnapshot, JumpEntry, JumpTarget, LocationMapper};
pub use markup::{Category, Markup};
pub use types::*;
