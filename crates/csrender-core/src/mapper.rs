//! Position-mapped text buffer.
//!
//! [`LocationMapper`] accumulates rendered lines and, for selected lines,
//! remembers where their content came from. Lookups take the 1-indexed
//! (line, column) coordinates an editor reports for its cursor.
//!
//! ## Coordinate spaces
//!
//! - **Rendered**: what the user sees, including gutters and markup tags.
//! - **Source**: file, line and column in the original file.
//!
//! A jump entry anchors a rendered line at the column where source content
//! starts. Resolving a later column subtracts the anchor and any markup
//! written between the anchor and the cursor. Lines without an entry inherit
//! the entry of the nearest line above them.
//!
//! ```rust
//! use csrender_core::{LocationMapper, Markup};
//!
//! let mut mapper = LocationMapper::new(Markup::enabled());
//! mapper.write("  12 ");
//! mapper.set_target_for_pos("src/main.cc", 12);
//! mapper.write("int ^k{return}k_ x;");
//!
//! // The cursor on `x`: the tags around `return` are not source text.
//! let target = mapper.jump_target_at(1, 23).unwrap();
//! assert_eq!(target.file, "src/main.cc");
//! assert_eq!(target.line, 12);
//! assert_eq!(target.column, 12);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::markup::{Category, Markup};

/// Where a rendered line's content came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JumpEntry {
    /// Source file identifier.
    pub file: String,
    /// 1-indexed source line.
    pub line: usize,
    /// Rendered column (0-indexed, in chars) at which source content begins.
    pub anchor_column: usize,
}

/// A resolved source position, 1-indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JumpTarget {
    /// Source file identifier.
    pub file: String,
    /// Source line.
    pub line: usize,
    /// Source column.
    pub column: usize,
}

/// Serializable view of a rendered document and its maps.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSnapshot {
    /// Rendered lines.
    pub lines: Vec<String>,
    /// Jump entries keyed by 1-indexed rendered line.
    pub jump_targets: BTreeMap<usize, JumpEntry>,
    /// Signatures keyed by 1-indexed rendered line.
    pub signatures: BTreeMap<usize, String>,
}

/// Text buffer that records the source position behind each rendered line.
///
/// Internally lines are 0-indexed; every public lookup is 1-indexed.
#[derive(Debug, Clone)]
pub struct LocationMapper {
    markup: Markup,
    lines: Vec<String>,
    column: usize,
    jump_map: BTreeMap<usize, JumpEntry>,
    signature_map: BTreeMap<usize, String>,
}

impl Default for LocationMapper {
    fn default() -> Self {
        Self::new(Markup::default())
    }
}

impl LocationMapper {
    /// Create an empty document holding a single empty line.
    #[must_use]
    pub fn new(markup: Markup) -> Self {
        Self {
            markup,
            lines: vec![String::new()],
            column: 0,
            jump_map: BTreeMap::new(),
            signature_map: BTreeMap::new(),
        }
    }

    /// The markup codec used for tags written through this mapper.
    #[must_use]
    pub const fn markup(&self) -> Markup {
        self.markup
    }

    /// 0-indexed line currently being written.
    #[must_use]
    pub fn current_line(&self) -> usize {
        self.lines.len() - 1
    }

    /// Number of chars on the current line.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Append `text` to the current line. Embedded newlines start new lines.
    pub fn write(&mut self, text: &str) {
        let mut pieces = text.split('\n');
        if let Some(first) = pieces.next() {
            self.push_to_current(first);
        }
        for piece in pieces {
            self.lines.push(String::new());
            self.column = 0;
            self.push_to_current(piece);
        }
    }

    fn push_to_current(&mut self, piece: &str) {
        if piece.is_empty() {
            return;
        }
        self.column += piece.chars().count();
        if let Some(last) = self.lines.last_mut() {
            last.push_str(piece);
        }
    }

    /// Start a new, empty line.
    pub fn newline(&mut self) {
        self.lines.push(String::new());
        self.column = 0;
    }

    /// Write `category`'s start tag, run `body`, then write the end tag.
    pub fn tagged<F>(&mut self, category: Category, body: F)
    where
        F: FnOnce(&mut Self),
    {
        let (start, end) = self.markup.encode(category);
        self.write(&start);
        body(self);
        self.write(&end);
    }

    /// Declare that content written from the current column onwards comes
    /// from `source_line` of `file`.
    ///
    /// # Panics
    ///
    /// Panics if `source_line` is 0; source lines are 1-indexed.
    pub fn set_target_for_pos(&mut self, file: &str, source_line: usize) {
        assert!(source_line > 0, "source lines are 1-indexed, got 0 for {file}");
        let entry = JumpEntry {
            file: file.to_string(),
            line: source_line,
            anchor_column: self.column,
        };
        self.jump_map.insert(self.current_line(), entry);
    }

    /// Record `signature` for the current line.
    pub fn set_signature_for_line(&mut self, signature: &str) {
        self.signature_map
            .insert(self.current_line(), signature.to_string());
    }

    /// The rendered document. Never empty.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consume the mapper and return its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    /// Jump entries keyed by 0-indexed rendered line.
    pub fn jump_entries(&self) -> impl Iterator<Item = (usize, &JumpEntry)> {
        self.jump_map.iter().map(|(line, entry)| (*line, entry))
    }

    /// Signatures keyed by 0-indexed rendered line.
    pub fn signature_entries(&self) -> impl Iterator<Item = (usize, &str)> {
        self.signature_map
            .iter()
            .map(|(line, sig)| (*line, sig.as_str()))
    }

    /// Resolve a rendered position to a source position.
    ///
    /// Returns `None` for line or column 0, lines past the end of the
    /// document, and lines above the first jump entry.
    #[must_use]
    pub fn jump_target_at(&self, line: usize, column: usize) -> Option<JumpTarget> {
        if line == 0 || column == 0 || line > self.lines.len() {
            return None;
        }
        let (entry_line, entry) = nearest_at_or_before(&self.jump_map, line - 1)?;
        let column = column - 1;

        let source_column = if entry.anchor_column < column {
            let rendered = char_slice(&self.lines[entry_line], entry.anchor_column, column);
            let overhead = self.markup.measure_overhead(rendered);
            let delta = column - entry.anchor_column;
            assert!(
                overhead <= delta,
                "markup overhead {overhead} exceeds rendered span {delta}"
            );
            delta - overhead
        } else {
            0
        };

        Some(JumpTarget {
            file: entry.file.clone(),
            line: entry.line,
            column: source_column + 1,
        })
    }

    /// Signature recorded for `line`, or for the nearest line above it.
    #[must_use]
    pub fn signature_at(&self, line: usize) -> Option<&str> {
        if line == 0 {
            return None;
        }
        nearest_at_or_before(&self.signature_map, line - 1).map(|(_, sig)| sig.as_str())
    }

    /// File that 0-indexed line `index` belongs to.
    fn file_at(&self, index: usize) -> Option<&str> {
        nearest_at_or_before(&self.jump_map, index).map(|(_, entry)| entry.file.as_str())
    }

    /// First line of the next block whose file differs from the file at
    /// `line`. Returns `line` when there is no such block.
    #[must_use]
    pub fn next_file_location(&self, line: usize) -> usize {
        if line == 0 {
            return line;
        }
        let current = self.file_at(line - 1);
        self.jump_map
            .range(line..)
            .find(|(_, entry)| Some(entry.file.as_str()) != current)
            .map_or(line, |(index, _)| index + 1)
    }

    /// First line of the block before the one containing `line`. Returns 1
    /// when there is no earlier block.
    #[must_use]
    pub fn previous_file_location(&self, line: usize) -> usize {
        let Some(mut index) = line.checked_sub(1) else {
            return 1;
        };
        index = index.min(self.lines.len() - 1);

        // Walk to the first line of the current block.
        let current = self.file_at(index);
        if current.is_none() {
            return 1;
        }
        let mut block_start = index;
        while block_start > 0 && self.file_at(block_start - 1) == current {
            block_start -= 1;
        }
        if block_start == 0 {
            return 1;
        }

        // Then to the first line of the block above it.
        let previous = self.file_at(block_start - 1);
        if previous.is_none() {
            return 1;
        }
        let mut previous_start = block_start - 1;
        while previous_start > 0 && self.file_at(previous_start - 1) == previous {
            previous_start -= 1;
        }
        previous_start + 1
    }

    /// Serializable copy of the document with 1-indexed keys.
    #[must_use]
    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            lines: self.lines.clone(),
            jump_targets: self
                .jump_map
                .iter()
                .map(|(line, entry)| (line + 1, entry.clone()))
                .collect(),
            signatures: self
                .signature_map
                .iter()
                .map(|(line, sig)| (line + 1, sig.clone()))
                .collect(),
        }
    }
}

/// Line-per-line dump: the rendered text after `|`, then the jump entry and
/// signature recorded for that line.
impl fmt::Display for LocationMapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, line) in self.lines.iter().enumerate() {
            writeln!(f, "{:03}|{line}", index + 1)?;
            let mut meta = Vec::new();
            if let Some(entry) = self.jump_map.get(&index) {
                meta.push(format!(
                    "j: ({}, {}, {})",
                    entry.file, entry.line, entry.anchor_column
                ));
            }
            if let Some(sig) = self.signature_map.get(&index) {
                meta.push(format!("s: {sig}"));
            }
            writeln!(f, "   |{{{}}}", meta.join(", "))?;
        }
        Ok(())
    }
}

fn nearest_at_or_before<V>(map: &BTreeMap<usize, V>, index: usize) -> Option<(usize, &V)> {
    map.range(..=index)
        .next_back()
        .map(|(line, value)| (*line, value))
}

/// Substring of `s` between char offsets `start` and `end`, clamped to `s`.
pub(crate) fn char_slice(s: &str, start: usize, end: usize) -> &str {
    let byte_at = |chars: usize| s.char_indices().nth(chars).map_or(s.len(), |(i, _)| i);
    let start = byte_at(start);
    let end = byte_at(end).max(start);
    &s[start..end]
}
