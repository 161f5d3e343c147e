//! Concealable markup tags.
//!
//! Rendered text carries lightweight markup so that a host editor can conceal
//! the tags and highlight the enclosed span. A span of category `k` is written
//! as `^k{` ... `}k_`.
//!
//! ## Preconditions
//!
//! The overhead scanner recovers tags by pattern matching, so:
//!
//! - category tokens never contain `^`, `{`, `}` or `_`
//! - a tag encoding is never itself wrapped in another tag
//!
//! Both hold for every [`Category`] defined here.

use once_cell::sync::Lazy;
use regex::Regex;

/// Semantic category of a markup span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Language keyword.
    Keyword,
    /// String literal.
    String,
    /// Comment.
    Comment,
    /// Numeric literal.
    Number,
    /// Preprocessor macro.
    Macro,
    /// Class or type name.
    Class,
    /// Constant.
    Const,
    /// Escape sequence inside a literal.
    Escape,
    /// Deprecated symbol.
    Deprecated,
    /// Text matching the search query.
    QueryMatch,
    /// A block of rendered source snippet text.
    Snippet,
    /// The quoted query in a result header.
    Query,
    /// A file name.
    FileName,
    /// A symbol name.
    SymbolName,
    /// A cross-reference category header.
    CategoryHeader,
    /// A call graph node, including its subtree.
    Node,
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Self; 16] = [
        Self::Keyword,
        Self::String,
        Self::Comment,
        Self::Number,
        Self::Macro,
        Self::Class,
        Self::Const,
        Self::Escape,
        Self::Deprecated,
        Self::QueryMatch,
        Self::Snippet,
        Self::Query,
        Self::FileName,
        Self::SymbolName,
        Self::CategoryHeader,
        Self::Node,
    ];

    /// The token written between the tag delimiters.
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Keyword => "k",
            Self::String => "s",
            Self::Comment => "c",
            Self::Number => "0",
            Self::Macro => "D",
            Self::Class => "C",
            Self::Const => "K",
            Self::Escape => "\\",
            Self::Deprecated => "-",
            Self::QueryMatch => "$",
            Self::Snippet => ">",
            Self::Query => "q",
            Self::FileName => "F",
            Self::SymbolName => "S",
            Self::CategoryHeader => "Cat",
            Self::Node => "N",
        }
    }
}

static TAG_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let mut tokens: Vec<&str> = Category::ALL.iter().map(|c| c.token()).collect();
    tokens.sort_by_key(|t| std::cmp::Reverse(t.len()));
    tokens.dedup();
    let alternation = tokens
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    #[allow(clippy::expect_used)] // Built from escaped constant tokens
    Regex::new(&format!(r"\^(?:{alternation})\{{|\}}(?:{alternation})_"))
        .expect("tag pattern is valid")
});

/// Markup codec.
///
/// A disabled codec encodes every tag as the empty string and reports zero
/// overhead. The value is carried by each [`LocationMapper`](crate::LocationMapper),
/// so documents with and without markup can be rendered side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Markup {
    enabled: bool,
}

impl Default for Markup {
    fn default() -> Self {
        Self::enabled()
    }
}

impl Markup {
    /// Codec that writes tags.
    #[must_use]
    pub const fn enabled() -> Self {
        Self { enabled: true }
    }

    /// Codec that writes nothing.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Whether tags are written.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        self.enabled
    }

    /// Start encoding for `category`.
    #[must_use]
    pub fn start_tag(self, category: Category) -> String {
        if self.enabled {
            format!("^{}{{", category.token())
        } else {
            String::new()
        }
    }

    /// End encoding for `category`.
    #[must_use]
    pub fn end_tag(self, category: Category) -> String {
        if self.enabled {
            format!("}}{}_", category.token())
        } else {
            String::new()
        }
    }

    /// Both encodings for `category`.
    #[must_use]
    pub fn encode(self, category: Category) -> (String, String) {
        (self.start_tag(category), self.end_tag(category))
    }

    /// Number of characters in `rendered` taken up by complete tag encodings.
    ///
    /// A start tag counts on its own: a cursor inside a span has already
    /// passed it. A truncated encoding such as `}S` counts nothing.
    ///
    /// ```rust
    /// use csrender_core::Markup;
    ///
    /// assert_eq!(Markup::enabled().measure_overhead("^S{foo}S_"), 6);
    /// assert_eq!(Markup::enabled().measure_overhead("^S{foo}S"), 3);
    /// assert_eq!(Markup::disabled().measure_overhead("^S{foo}S_"), 0);
    /// ```
    #[must_use]
    pub fn measure_overhead(self, rendered: &str) -> usize {
        if !self.enabled {
            return 0;
        }
        TAG_PATTERN
            .find_iter(rendered)
            .map(|m| m.as_str().chars().count())
            .sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encodings() {
        let markup = Markup::enabled();
        assert_eq!(markup.start_tag(Category::Keyword), "^k{");
        assert_eq!(markup.end_tag(Category::Keyword), "}k_");
        assert_eq!(
            markup.encode(Category::CategoryHeader),
            ("^Cat{".to_string(), "}Cat_".to_string())
        );
        assert_eq!(markup.start_tag(Category::Escape), "^\\{");
    }

    #[test]
    fn test_disabled_encodings_are_empty() {
        for category in Category::ALL {
            let (start, end) = Markup::disabled().encode(category);
            assert!(start.is_empty());
            assert!(end.is_empty());
        }
    }

    #[test]
    fn test_every_category_is_measured() {
        let markup = Markup::enabled();
        for category in Category::ALL {
            let (start, end) = markup.encode(category);
            let text = format!("{start}x{end}");
            assert_eq!(
                markup.measure_overhead(&text),
                start.len() + end.len(),
                "{category:?}"
            );
        }
    }

    #[test]
    fn test_partial_tags_do_not_count() {
        let markup = Markup::enabled();
        assert_eq!(markup.measure_overhead("}S"), 0);
        assert_eq!(markup.measure_overhead("^S"), 0);
        assert_eq!(markup.measure_overhead("foo}S"), 0);
    }

    #[test]
    fn test_plain_code_is_not_markup() {
        let markup = Markup::enabled();
        assert_eq!(markup.measure_overhead("a ^ b {"), 0);
        assert_eq!(markup.measure_overhead("if (x) { y(); } else_"), 0);
    }

    #[test]
    fn test_nested_and_adjacent_tags() {
        let markup = Markup::enabled();
        assert_eq!(markup.measure_overhead("^>{^k{int}k_ x}>_"), 12);
        assert_eq!(markup.measure_overhead("^k{a}k_^s{b}s_"), 12);
    }

    proptest! {
        #[test]
        fn test_overhead_of_plain_ascii_words_is_zero(s in "[a-zA-Z0-9 ;()]*") {
            prop_assert_eq!(Markup::enabled().measure_overhead(&s), 0);
        }
    }
}
