//! Call graph trees and their rendering.
//!
//! A node's children are fetched lazily, one level at a time, so a node can be
//! in one of three states:
//!
//! | State              | Marker | Meaning                          |
//! |--------------------|--------|----------------------------------|
//! | `Unknown`          | `[+]`  | not fetched yet, can be expanded |
//! | `Loaded(empty)`    | ` * `  | fetched, nobody calls it         |
//! | `Loaded(children)` | `[-]`  | expanded, can be collapsed       |
//!
//! ```text
//! [-] ns::Bar a.cc
//!
//!     [+] Quux b.cc
//!         38 InvokeBaz(1, 2, true);
//!
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::abbreviate::abbreviate_symbol;
use crate::annotated::render_snippet;
use crate::config::{Config, LayoutConfig};
use crate::mapper::LocationMapper;
use crate::markup::Category;
use crate::types::{Snippet, TextRange};
use crate::{Error, Result};

const EXPANDED: &str = "[-]";
const COLLAPSED: &str = "[+]";
const LEAF: &str = " * ";

/// Children of a call graph node.
///
/// On the wire an absent `children` field is [`Children::Unknown`] and a
/// present list, even an empty one, is [`Children::Loaded`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<Vec<CallGraphNode>>", into = "Option<Vec<CallGraphNode>>")]
pub enum Children {
    /// Not fetched.
    #[default]
    Unknown,
    /// Fetched; possibly empty.
    Loaded(Vec<CallGraphNode>),
}

impl Children {
    /// Whether the children have not been fetched.
    #[must_use]
    pub const fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Loaded children, or an empty slice.
    #[must_use]
    pub fn as_slice(&self) -> &[CallGraphNode] {
        match self {
            Self::Unknown => &[],
            Self::Loaded(children) => children,
        }
    }
}

impl From<Option<Vec<CallGraphNode>>> for Children {
    fn from(children: Option<Vec<CallGraphNode>>) -> Self {
        children.map_or(Self::Unknown, Self::Loaded)
    }
}

impl From<Children> for Option<Vec<CallGraphNode>> {
    fn from(children: Children) -> Self {
        match children {
            Children::Unknown => None,
            Children::Loaded(children) => Some(children),
        }
    }
}

/// One caller in a call graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallGraphNode {
    /// Qualified symbol name.
    #[serde(default)]
    pub identifier: String,
    /// Short name for lists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// File containing the call.
    #[serde(default)]
    pub file_path: String,
    /// Location of the call expression.
    #[serde(default)]
    pub call_site_range: TextRange,
    /// Extent of the calling function.
    #[serde(default)]
    pub call_scope_range: TextRange,
    /// Source around the call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<Snippet>,
    /// File the snippet was taken from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet_file_path: Option<String>,
    /// Opaque key identifying the symbol.
    #[serde(default)]
    pub signature: String,
    /// Callers of this node.
    #[serde(default, skip_serializing_if = "Children::is_unknown")]
    pub children: Children,
}

impl CallGraphNode {
    /// Marker shown in front of the node.
    #[must_use]
    pub fn expander(&self) -> &'static str {
        match &self.children {
            Children::Unknown => COLLAPSED,
            Children::Loaded(children) if children.is_empty() => LEAF,
            Children::Loaded(_) => EXPANDED,
        }
    }

    /// Replace the children with a fetched list.
    pub fn attach_children(&mut self, children: Vec<Self>) {
        self.children = Children::Loaded(children);
    }

    /// Forget loaded children so the node can be fetched again.
    ///
    /// Returns `false`, leaving the node untouched, unless it had at least one
    /// child loaded.
    pub fn collapse(&mut self) -> bool {
        if self.children.as_slice().is_empty() {
            return false;
        }
        self.children = Children::Unknown;
        true
    }

    /// First node in pre-order whose signature is `signature`.
    pub fn find_by_signature(&mut self, signature: &str) -> Option<&mut Self> {
        if self.signature == signature {
            return Some(self);
        }
        match &mut self.children {
            Children::Unknown => None,
            Children::Loaded(children) => children
                .iter_mut()
                .find_map(|child| child.find_by_signature(signature)),
        }
    }

    /// Line the symbol header jumps to.
    fn symbol_line(&self) -> usize {
        self.call_scope_range
            .start()
            .or_else(|| self.call_site_range.start())
            .unwrap_or(1)
    }

    /// Call sites of the loaded children, for quickfix-style lists.
    #[must_use]
    pub fn caller_locations(&self) -> Vec<CallerLocation> {
        self.children
            .as_slice()
            .iter()
            .filter(|child| !child.file_path.is_empty() && child.call_site_range.start().is_some())
            .map(|child| CallerLocation {
                file: child.file_path.clone(),
                line: child.call_site_range.start_line,
                column: child.call_site_range.start_column,
                name: child
                    .display_name
                    .clone()
                    .unwrap_or_else(|| abbreviate_symbol(&child.identifier)),
            })
            .collect()
    }
}

/// A call site, printed as `file:line:column: name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallerLocation {
    /// File containing the call.
    pub file: String,
    /// 1-indexed line.
    pub line: usize,
    /// 1-indexed column; 0 when unknown.
    pub column: usize,
    /// Caller name.
    pub name: String,
}

impl fmt::Display for CallerLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}: {}", self.file, self.line, self.column, self.name)
    }
}

/// Render `node` and its loaded descendants at depth `level`.
///
/// The whole subtree sits inside one node tag. The header line carries the
/// node's signature and jumps to the calling function.
pub fn render_node(
    mapper: &mut LocationMapper,
    node: &CallGraphNode,
    level: usize,
    layout: &LayoutConfig,
) {
    mapper.tagged(Category::Node, |m| {
        m.set_signature_for_line(&node.signature);
        m.write(&format!(
            "{}{} ",
            " ".repeat(level * layout.node_indent),
            node.expander()
        ));

        if !node.file_path.is_empty() && !node.identifier.is_empty() {
            m.tagged(Category::SymbolName, |m| {
                m.set_target_for_pos(&node.file_path, node.symbol_line());
                m.write(&abbreviate_symbol(&node.identifier));
            });
            m.write(" ");
            m.tagged(Category::FileName, |m| m.write(&node.file_path));
        }

        match (&node.snippet, &node.snippet_file_path) {
            (Some(snippet), Some(snippet_file)) => {
                let first_line = node.call_site_range.start().unwrap_or(1);
                m.tagged(Category::Snippet, |m| {
                    render_snippet(
                        m,
                        0,
                        snippet,
                        snippet_file,
                        (level + 1) * layout.snippet_indent,
                        first_line,
                    );
                    m.newline();
                });
            },
            _ => m.newline(),
        }

        // Padding between siblings.
        m.newline();

        for child in node.children.as_slice() {
            render_node(m, child, level + 1, layout);
        }
    });
}

/// A call graph being explored one level at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallGraph {
    /// The symbol whose callers are shown.
    pub root: CallGraphNode,
}

impl From<CallGraphNode> for CallGraph {
    fn from(root: CallGraphNode) -> Self {
        Self { root }
    }
}

impl CallGraph {
    /// Merge a freshly fetched node into the tree.
    ///
    /// `fetched` is the server's answer for `parent_signature`: its children
    /// become the parent's children, and `None` or a node without children
    /// marks the parent as a leaf. Returns `Ok(false)` without touching the
    /// tree when the parent's children are already loaded.
    ///
    /// # Errors
    ///
    /// [`Error::SignatureNotFound`] if no node carries `parent_signature`, and
    /// [`Error::MalformedResponse`] if `fetched` is for another symbol.
    pub fn expand_with(
        &mut self,
        parent_signature: &str,
        fetched: Option<CallGraphNode>,
    ) -> Result<bool> {
        let parent = self
            .root
            .find_by_signature(parent_signature)
            .ok_or_else(|| Error::SignatureNotFound(parent_signature.to_string()))?;

        if !parent.children.is_unknown() {
            tracing::debug!(signature = parent_signature, "children already loaded");
            return Ok(false);
        }

        let children = match fetched {
            None => Vec::new(),
            Some(node) if node.signature != parent_signature => {
                return Err(Error::MalformedResponse(format!(
                    "call graph answer for '{}' does not match '{parent_signature}'",
                    node.signature
                )));
            },
            Some(node) => match node.children {
                Children::Unknown => Vec::new(),
                Children::Loaded(children) => children,
            },
        };

        tracing::debug!(
            signature = parent_signature,
            count = children.len(),
            "attaching callers"
        );
        parent.attach_children(children);
        Ok(true)
    }

    /// Collapse the node carrying `signature`.
    ///
    /// # Errors
    ///
    /// [`Error::SignatureNotFound`] if no node carries `signature`.
    pub fn collapse(&mut self, signature: &str) -> Result<bool> {
        self.root
            .find_by_signature(signature)
            .map(CallGraphNode::collapse)
            .ok_or_else(|| Error::SignatureNotFound(signature.to_string()))
    }

    /// Render the whole tree into a new document.
    #[must_use]
    pub fn render(&self, config: &Config) -> LocationMapper {
        let mut mapper = LocationMapper::new(config.markup());
        render_node(&mut mapper, &self.root, 0, &config.layout);
        mapper
    }
}
