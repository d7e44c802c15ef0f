//! Source spans and spanned values.

use std::ops::Range;

/// A byte range in the filter source text.
pub type Span = Range<usize>;

/// A value paired with the location it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned<T> {
    /// The wrapped value.
    pub node: T,
    /// Where the value appears in the source.
    pub span: Span,
}

impl<T> Spanned<T> {
    /// Creates a new spanned value.
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Returns a span covering both `start` and `end`.
pub fn merge_spans(start: &Span, end: &Span) -> Span {
    start.start.min(end.start)..start.end.max(end.end)
}
