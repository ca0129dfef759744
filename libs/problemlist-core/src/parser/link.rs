//! Inline Markdown link extraction.

use once_cell::sync::Lazy;
use regex::Regex;

/// `[label](target)`; no nesting or escapes.
static INLINE_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").expect("valid inline link regex"));

/// A `[label](target)` pair pulled out of a table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineLink<'a> {
    pub label: &'a str,
    pub target: &'a str,
}

/// Return the first inline link in `cell`, if any.
pub fn first_link(cell: &str) -> Option<InlineLink<'_>> {
    let caps = INLINE_LINK.captures(cell)?;
    Some(InlineLink {
        label: caps.get(1)?.as_str().trim(),
        target: caps.get(2)?.as_str().trim(),
    })
}
