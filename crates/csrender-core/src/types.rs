//! Response schema consumed by the renderers.
//!
//! The shapes follow the code search server's JSON responses. Every field the
//! renderers can live without is optional or defaulted, so a sparse response
//! still decodes.

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::markup::Category;

/// Envelope holding exactly one kind of response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundResponse {
    /// Free-text search responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_response: Option<Vec<SearchResponse>>,
    /// Cross-reference responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xref_search_response: Option<Vec<XrefSearchResponse>>,
    /// Call graph responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_graph_response: Option<Vec<CallGraphResponse>>,
}

impl CompoundResponse {
    /// Decode a response from the server's JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`](crate::Error::Serialization) if
    /// `json` is not valid JSON or does not match the schema.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A file reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSpec {
    /// Path relative to the source root.
    pub name: String,
}

/// A source range, 1-indexed. Zero means "not set".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextRange {
    /// First line.
    pub start_line: usize,
    /// First column.
    pub start_column: usize,
    /// Last line.
    pub end_line: usize,
    /// Column one past the end.
    pub end_column: usize,
}

impl TextRange {
    /// The start line, if set.
    #[must_use]
    pub const fn start(&self) -> Option<usize> {
        if self.start_line > 0 {
            Some(self.start_line)
        } else {
            None
        }
    }
}

/// Kind of a formatting annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormatType {
    /// Language keyword.
    SyntaxKeyword,
    /// String literal.
    SyntaxString,
    /// Comment.
    SyntaxComment,
    /// Numeric literal.
    SyntaxNumber,
    /// Preprocessor macro.
    SyntaxMacro,
    /// Class name.
    SyntaxClass,
    /// Constant.
    SyntaxConst,
    /// Escape sequence.
    SyntaxEscapeSequence,
    /// Deprecated symbol.
    SyntaxDeprecated,
    /// Strong keyword (e.g. `return`).
    SyntaxKeywordStrong,
    /// Query match in a file view.
    QueryMatch,
    /// Query match in a snippet.
    SnippetQueryMatch,
    /// Anything the renderer does not draw.
    #[serde(other)]
    Other,
}

impl FormatType {
    /// Markup category for this annotation, if it is drawn at all.
    #[must_use]
    pub const fn category(self) -> Option<Category> {
        match self {
            Self::SyntaxKeyword | Self::SyntaxKeywordStrong => Some(Category::Keyword),
            Self::SyntaxString => Some(Category::String),
            Self::SyntaxComment => Some(Category::Comment),
            Self::SyntaxNumber => Some(Category::Number),
            Self::SyntaxMacro => Some(Category::Macro),
            Self::SyntaxClass => Some(Category::Class),
            Self::SyntaxConst => Some(Category::Const),
            Self::SyntaxEscapeSequence => Some(Category::Escape),
            Self::SyntaxDeprecated => Some(Category::Deprecated),
            Self::QueryMatch | Self::SnippetQueryMatch => Some(Category::QueryMatch),
            Self::Other => None,
        }
    }
}

/// A formatting annotation over a text block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatRange {
    /// What the range marks.
    #[serde(rename = "type")]
    pub kind: FormatType,
    /// Where, relative to the text block.
    pub range: TextRange,
}

/// Source text plus formatting annotations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedText {
    /// Raw text; lines separated by `\n`.
    #[serde(default)]
    pub text: String,
    /// Annotations, well nested.
    #[serde(default)]
    pub range: Vec<FormatRange>,
}

/// A fragment of a file shown in search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    /// Source line of the first text line.
    #[serde(default)]
    pub first_line_number: Option<usize>,
    /// The text.
    #[serde(default)]
    pub text: AnnotatedText,
}

/// Wrapper for the file of a search result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileResult {
    /// The file.
    pub file: FileSpec,
}

/// One file matching a search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The matching file.
    pub top_file: FileResult,
    /// Snippets, in file order.
    #[serde(default)]
    pub snippet: Vec<Snippet>,
}

/// Response to a free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
    /// Results, if any.
    pub search_result: Vec<SearchResult>,
    /// Whether the server stopped early.
    pub hit_max_results: bool,
    /// Server estimate of the full result count.
    pub estimated_total_number_of_results: u64,
    /// Server status code; 0 on success.
    pub status: i32,
    /// Server status text.
    pub status_message: Option<String>,
    /// Number of results skipped before this page.
    pub results_offset: usize,
}

/// Reference kind of a cross-reference match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum XrefKind {
    /// Definition.
    Definition,
    /// Declaration.
    Declaration,
    /// Caller.
    CalledBy,
    /// Template instantiation.
    Instantiation,
    /// Overriding method.
    OverriddenBy,
    /// Overridden method.
    Overrides,
    /// Subclass.
    ExtendedBy,
    /// Superclass.
    Extends,
    /// Generated file.
    Generates,
    /// Generator.
    GeneratedBy,
    /// Annotated entity.
    Annotates,
    /// Annotation.
    AnnotatedBy,
    /// Any other reference.
    #[serde(other)]
    Reference,
}

/// One cross-reference hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XrefSingleMatch {
    /// 1-indexed line of the reference.
    pub line_number: usize,
    /// Text of that line.
    #[serde(default)]
    pub line_text: String,
    /// Reference kind.
    #[serde(rename = "type_id", default = "default_xref_kind")]
    pub kind: XrefKind,
}

const fn default_xref_kind() -> XrefKind {
    XrefKind::Reference
}

/// Cross-reference hits in one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XrefSearchResult {
    /// The file.
    pub file: FileSpec,
    /// Hits in that file.
    #[serde(default, rename = "match")]
    pub matches: Vec<XrefSingleMatch>,
}

/// Response to a cross-reference query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct XrefSearchResponse {
    /// Server status code; 0 on success.
    pub status: i32,
    /// Server status text.
    pub status_message: Option<String>,
    /// Results grouped by file.
    pub search_result: Vec<XrefSearchResult>,
}

/// Response to a call graph query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallGraphResponse {
    /// Root of the graph; absent when the server knows no callers.
    #[serde(default)]
    pub node: Option<crate::call_graph::CallGraphNode>,
}
