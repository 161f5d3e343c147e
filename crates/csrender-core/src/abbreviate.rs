//! Shorten qualified C++ symbol names for display.

const ANONYMOUS_NAMESPACE: &str = "<anonymous-namespace>";
const ELLIPSIS: &str = "...";

/// Collapse every top-level template argument list into `...`.
///
/// `<anonymous-namespace>` becomes `{}` first. Angle brackets are not
/// validated: a stray `>` outside any list is dropped, and operators such as
/// `operator<` open a list that swallows the rest of the name.
///
/// ```rust
/// use csrender_core::abbreviate_symbol;
///
/// assert_eq!(abbreviate_symbol("ns::Foo<int, Bar<int>>::Do"), "ns::Foo...::Do");
/// assert_eq!(abbreviate_symbol("<anonymous-namespace>::X"), "{}::X");
/// ```
#[must_use]
pub fn abbreviate_symbol(symbol: &str) -> String {
    let symbol = symbol.replace(ANONYMOUS_NAMESPACE, "{}");
    let mut short = String::with_capacity(symbol.len());
    let mut depth = 0usize;

    for c in symbol.chars() {
        match c {
            '<' => {
                depth += 1;
                if depth == 1 {
                    short.push_str(ELLIPSIS);
                }
            },
            '>' => depth = depth.saturating_sub(1),
            _ if depth == 0 => short.push(c),
            _ => {},
        }
    }

    short
}
