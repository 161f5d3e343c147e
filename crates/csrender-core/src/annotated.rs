//! Render annotated source text with a line-number gutter.
//!
//! Each annotation range becomes a start tag and an end tag spliced into the
//! text. Splicing runs bottom-up and right-to-left, so every splice happens at
//! an offset that earlier splices have not moved.
//!
//! ## Ordering contract
//!
//! Insertions are applied in descending (line, column) order. When several
//! land on the same position the text reads, left to right:
//!
//! 1. end tags, innermost range first
//! 2. start tags, outermost range first
//!
//! so adjacent spans close before the next one opens and nested spans stay
//! nested. Since a later splice at the same offset ends up in front of an
//! earlier one, insertions at one position are applied in the reverse of
//! that reading order.

use std::cmp::{Ordering, Reverse};

use tracing::warn;

use crate::mapper::LocationMapper;
use crate::markup::Category;
use crate::types::{AnnotatedText, Snippet};

/// Marker rendered between two snippets of the same file.
pub const ELISION_MARKER: &str = "[...]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    End,
    Start,
}

#[derive(Debug, Clone, Copy)]
struct Insertion {
    line: usize,
    column: usize,
    edge: Edge,
    category: Category,
    /// The opposite endpoint of the same range.
    partner: (usize, usize),
}

impl Insertion {
    /// Left-to-right reading order among insertions at the same position.
    ///
    /// Ends read before starts. Among ends, the range that started later is
    /// the inner one; among starts, the range that ends later is the outer one.
    fn reading_rank(&self) -> (u8, Reverse<(usize, usize)>) {
        match self.edge {
            Edge::End => (0, Reverse(self.partner)),
            Edge::Start => (1, Reverse(self.partner)),
        }
    }

    fn apply_order(a: &Self, b: &Self) -> Ordering {
        b.line
            .cmp(&a.line)
            .then(b.column.cmp(&a.column))
            .then_with(|| b.reading_rank().cmp(&a.reading_rank()))
    }
}

/// Source text split into lines, ready for splicing.
fn split_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

fn collect_insertions(annotated: &AnnotatedText, lines: &[String]) -> Vec<Insertion> {
    let mut insertions = Vec::with_capacity(annotated.range.len() * 2);

    for format in &annotated.range {
        let Some(category) = format.kind.category() else {
            continue;
        };
        let mut range = format.range;

        // A range ending at column 1 of a later line really ends at the end
        // of the line before it.
        if range.end_column == 1 && range.start_line != range.end_line && range.end_line > 1 {
            range.end_line -= 1;
            range.end_column = lines
                .get(range.end_line - 1)
                .map_or(1, |l| l.chars().count() + 1);
        }

        let start = (range.start_line, range.start_column);
        let end = (range.end_line, range.end_column);
        if start == end {
            continue;
        }
        if start.0 == 0 || start.1 == 0 || end.0 == 0 || end.1 == 0 {
            warn!(?range, "dropping annotation with unset coordinates");
            continue;
        }

        insertions.push(Insertion {
            line: end.0,
            column: end.1,
            edge: Edge::End,
            category,
            partner: start,
        });
        insertions.push(Insertion {
            line: start.0,
            column: start.1,
            edge: Edge::Start,
            category,
            partner: end,
        });
    }

    insertions.sort_by(Insertion::apply_order);
    insertions
}

/// Splice markup into `lines` according to `annotated`'s ranges.
fn apply_insertions(mapper: &LocationMapper, annotated: &AnnotatedText, lines: &mut [String]) {
    let markup = mapper.markup();
    if !markup.is_enabled() {
        return;
    }

    for insertion in collect_insertions(annotated, lines) {
        let Some(text) = lines.get_mut(insertion.line - 1) else {
            warn!(
                line = insertion.line,
                available = lines.len(),
                "dropping annotation outside the text block"
            );
            continue;
        };
        let tag = match insertion.edge {
            Edge::Start => markup.start_tag(insertion.category),
            Edge::End => markup.end_tag(insertion.category),
        };
        let offset = text
            .char_indices()
            .nth(insertion.column - 1)
            .map_or(text.len(), |(i, _)| i);
        text.insert_str(offset, &tag);
    }
}

/// Render `annotated` into `mapper`, one rendered line per source line.
///
/// Every line starts on a fresh rendered line with `indent` spaces and a
/// right-aligned line number, and becomes a jump target for that source line
/// anchored just after the gutter. Numbering starts at `first_line_number`
/// and always follows the source lines, whatever markup is spliced in.
pub fn render_annotated_text(
    mapper: &mut LocationMapper,
    annotated: &AnnotatedText,
    indent: usize,
    file: &str,
    first_line_number: usize,
) {
    let mut lines = split_lines(&annotated.text);
    let last_line_number = first_line_number + lines.len() - 1;
    let width = last_line_number.to_string().len();

    apply_insertions(mapper, annotated, &mut lines);

    let padding = " ".repeat(indent);
    for (offset, text) in lines.iter().enumerate() {
        let line_number = first_line_number + offset;
        mapper.newline();
        mapper.write(&padding);
        mapper.write(&format!("{line_number:>width$} "));
        mapper.set_target_for_pos(file, line_number);
        mapper.write(text);
    }
}

/// Render one snippet of a search result or call graph node.
///
/// Snippets after the first get an elision marker line that jumps to the
/// snippet's first line. Snippets without their own first line number start
/// at `fallback_first_line`.
pub fn render_snippet(
    mapper: &mut LocationMapper,
    index: usize,
    snippet: &Snippet,
    file: &str,
    indent: usize,
    fallback_first_line: usize,
) {
    let first_line_number = snippet
        .first_line_number
        .filter(|&n| n > 0)
        .unwrap_or(fallback_first_line);

    if index != 0 {
        mapper.newline();
        mapper.write(&" ".repeat(indent));
        mapper.write(ELISION_MARKER);
        mapper.set_target_for_pos(file, first_line_number);
    }
    render_annotated_text(mapper, &snippet.text, indent, file, first_line_number);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::markup::Markup;
    use crate::types::{FormatRange, FormatType, TextRange};
    use proptest::prelude::*;

    fn range(kind: FormatType, sl: usize, sc: usize, el: usize, ec: usize) -> FormatRange {
        FormatRange {
            kind,
            range: TextRange {
                start_line: sl,
                start_column: sc,
                end_line: el,
                end_column: ec,
            },
        }
    }

    fn render(text: &str, ranges: Vec<FormatRange>, first: usize) -> LocationMapper {
        let mut mapper = LocationMapper::new(Markup::enabled());
        let annotated = AnnotatedText {
            text: text.to_string(),
            range: ranges,
        };
        render_annotated_text(&mut mapper, &annotated, 4, "f.cc", first);
        mapper
    }

    #[test]
    fn test_gutter_is_right_aligned() {
        let mapper = render("a\nb\nc", vec![], 9);
        assert_eq!(mapper.lines(), &["", "     9 a", "    10 b", "    11 c"]);
    }

    #[test]
    fn test_targets_follow_source_numbering() {
        let mapper = render("a\nb", vec![], 41);
        let entries: Vec<_> = mapper.jump_entries().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, 1);
        assert_eq!(entries[0].1.line, 41);
        assert_eq!(entries[0].1.anchor_column, 7);
        assert_eq!(entries[1].1.line, 42);
    }

    #[test]
    fn test_single_range() {
        let mapper = render(
            "int x;",
            vec![range(FormatType::SyntaxKeyword, 1, 1, 1, 4)],
            1,
        );
        assert_eq!(mapper.lines()[1], "    1 ^k{int}k_ x;");
    }

    #[test]
    fn test_adjacent_ranges_close_before_open() {
        let mapper = render(
            "ab",
            vec![
                range(FormatType::SyntaxKeyword, 1, 1, 1, 2),
                range(FormatType::SyntaxString, 1, 2, 1, 3),
            ],
            1,
        );
        assert_eq!(mapper.lines()[1], "    1 ^k{a}k_^s{b}s_");
    }

    #[test]
    fn test_adjacent_ranges_in_reverse_input_order() {
        let mapper = render(
            "ab",
            vec![
                range(FormatType::SyntaxString, 1, 2, 1, 3),
                range(FormatType::SyntaxKeyword, 1, 1, 1, 2),
            ],
            1,
        );
        assert_eq!(mapper.lines()[1], "    1 ^k{a}k_^s{b}s_");
    }

    #[test]
    fn test_nested_ranges_sharing_endpoints() {
        let mapper = render(
            "abc",
            vec![
                range(FormatType::SyntaxKeyword, 1, 1, 1, 2),
                range(FormatType::SyntaxComment, 1, 1, 1, 4),
                range(FormatType::SyntaxString, 1, 3, 1, 4),
            ],
            1,
        );
        assert_eq!(mapper.lines()[1], "    1 ^c{^k{a}k_b^s{c}s_}c_");
    }

    #[test]
    fn test_multiline_range_ending_at_column_one() {
        let mapper = render(
            "/* a\nb */\nint",
            vec![range(FormatType::SyntaxComment, 1, 1, 3, 1)],
            1,
        );
        assert_eq!(
            mapper.lines(),
            &["", "    1 ^c{/* a", "    2 b */}c_", "    3 int"]
        );
    }

    #[test]
    fn test_unmapped_and_empty_ranges_are_skipped() {
        let mapper = render(
            "abc",
            vec![
                range(FormatType::Other, 1, 1, 1, 3),
                range(FormatType::SyntaxKeyword, 1, 2, 1, 2),
            ],
            1,
        );
        assert_eq!(mapper.lines()[1], "    1 abc");
    }

    #[test]
    fn test_out_of_range_line_is_dropped() {
        let mapper = render(
            "abc",
            vec![range(FormatType::SyntaxKeyword, 1, 1, 5, 2)],
            1,
        );
        assert_eq!(mapper.lines()[1], "    1 ^k{abc");
    }

    #[test]
    fn test_markup_disabled_leaves_text_alone() {
        let mut mapper = LocationMapper::new(Markup::disabled());
        let annotated = AnnotatedText {
            text: "int x;".to_string(),
            range: vec![range(FormatType::SyntaxKeyword, 1, 1, 1, 4)],
        };
        render_annotated_text(&mut mapper, &annotated, 0, "f.cc", 1);
        assert_eq!(mapper.lines()[1], "1 int x;");
    }

    #[test]
    fn test_column_resolution_through_markup() {
        let mapper = render(
            "int x;",
            vec![range(FormatType::SyntaxKeyword, 1, 1, 1, 4)],
            7,
        );
        // "    7 ^k{int}k_ x;" - the x sits at rendered column 17.
        let target = mapper.jump_target_at(2, 17).unwrap();
        assert_eq!(target.line, 7);
        assert_eq!(target.column, 5);
    }

    #[test]
    fn test_snippet_elision_marker() {
        let mut mapper = LocationMapper::new(Markup::disabled());
        let snippet = Snippet {
            first_line_number: Some(30),
            text: AnnotatedText {
                text: "x".to_string(),
                range: vec![],
            },
        };
        render_snippet(&mut mapper, 1, &snippet, "f.cc", 4, 1);
        assert_eq!(mapper.lines(), &["", "    [...]", "    30 x"]);
        let marker = mapper.jump_target_at(2, 1).unwrap();
        assert_eq!(marker.line, 30);
    }

    #[test]
    fn test_snippet_without_first_line_uses_fallback() {
        let mut mapper = LocationMapper::new(Markup::disabled());
        let snippet = Snippet::default();
        render_snippet(&mut mapper, 0, &snippet, "f.cc", 8, 12);
        assert_eq!(mapper.lines(), &["", "        12 "]);
    }

    proptest! {
        #[test]
        fn test_plain_text_round_trips(
            lines in proptest::collection::vec("[a-z ;(){}]{0,20}", 1..8),
            first in 1usize..2000,
        ) {
            let text = lines.join("\n");
            let mapper = render(&text, vec![], first);
            let rendered = mapper.lines();
            prop_assert_eq!(rendered.len(), lines.len() + 1);

            for (offset, source) in lines.iter().enumerate() {
                let rendered_line = &rendered[offset + 1];
                prop_assert!(rendered_line.ends_with(source.as_str()));
                let anchor = rendered_line.chars().count() - source.chars().count();
                for col in 0..=source.chars().count() {
                    let target = mapper.jump_target_at(offset + 2, anchor + col + 1).unwrap();
                    prop_assert_eq!(target.line, first + offset);
                    prop_assert_eq!(target.column, col + 1);
                }
            }
        }

        #[test]
        fn test_overhead_is_subtracted_at_line_end(
            words in proptest::collection::vec("[a-z]{1,6}", 1..6),
        ) {
            // Tag every other word on a single line.
            let text = words.join(" ");
            let mut ranges = Vec::new();
            let mut column = 1;
            for (i, word) in words.iter().enumerate() {
                if i % 2 == 0 {
                    ranges.push(range(FormatType::SyntaxKeyword, 1, column, 1, column + word.len()));
                }
                column += word.len() + 1;
            }
            let mapper = render(&text, ranges, 3);
            let rendered = &mapper.lines()[1];
            let end = rendered.chars().count();

            let start = mapper.jump_target_at(2, 1).unwrap();
            let last = mapper.jump_target_at(2, end + 1).unwrap();
            prop_assert_eq!(start.line, 3);
            prop_assert_eq!(last.line, 3);
            prop_assert_eq!(last.column, text.chars().count() + 1);
        }
    }
}
