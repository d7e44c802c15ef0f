//! Filter AST: a conjunction of `identifier.key operator value` comparisons.

use super::span::{Span, Spanned};
use smol_str::SmolStr;
use std::fmt;

/// Left-hand side of a comparison.
///
/// Straight out of the parser `category` holds the raw token exactly as it was
/// written (`metrics`, `params`, ...) and is empty for the bare-key shorthand
/// (`run_name = 'x'`). After validation it holds one of the canonical category
/// names and `key` holds the accepted key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// Raw or canonical category name.
    pub category: SmolStr,
    /// Field name within the category.
    pub key: SmolStr,
    /// Span of the whole identifier.
    pub span: Span,
}

impl Identifier {
    /// Creates an identifier with an explicit category.
    pub fn new(category: impl Into<SmolStr>, key: impl Into<SmolStr>, span: Span) -> Self {
        Self {
            category: category.into(),
            key: key.into(),
            span,
        }
    }

    /// Creates a bare identifier (no category given in the source).
    pub fn bare(key: impl Into<SmolStr>, span: Span) -> Self {
        Self::new(SmolStr::default(), key, span)
    }

    /// Returns true if the source omitted the category.
    pub fn is_bare(&self) -> bool {
        self.category.is_empty()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_bare() {
            write!(f, "{}.", self.category)?;
        }
        if is_plain_key(&self.key) {
            write!(f, "{}", self.key)
        } else {
            write!(f, "`{}`", self.key.replace('\\', "\\\\").replace('`', "\\`"))
        }
    }
}

/// Keys made of dotted identifier segments print without quoting.
fn is_plain_key(key: &str) -> bool {
    !key.is_empty()
        && key.split('.').all(|segment| {
            let mut chars = segment.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        })
}

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `!=` or `<>`
    NotEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `LIKE`
    Like,
    /// `ILIKE`
    ILike,
    /// `IN`
    In,
    /// `NOT IN`
    NotIn,
}

impl CompareOp {
    /// Every operator, in grammar order.
    pub const ALL: [CompareOp; 10] = [
        Self::Eq,
        Self::NotEq,
        Self::Gt,
        Self::GtEq,
        Self::Lt,
        Self::LtEq,
        Self::Like,
        Self::ILike,
        Self::In,
        Self::NotIn,
    ];

    /// Returns true for `IN` and `NOT IN`.
    pub fn is_membership(self) -> bool {
        matches!(self, Self::In | Self::NotIn)
    }

    /// Returns true for the ordering and equality operators.
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::NotEq | Self::Gt | Self::GtEq | Self::Lt | Self::LtEq
        )
    }

    /// Returns true for `LIKE` and `ILIKE`.
    pub fn is_pattern(self) -> bool {
        matches!(self, Self::Like | Self::ILike)
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Like => "LIKE",
            Self::ILike => "ILIKE",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
        };
        f.write_str(text)
    }
}

/// Right-hand literal of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Integer or floating point literal.
    Number(f64),
    /// Quoted string literal.
    String(SmolStr),
    /// Parenthesised string list, only valid with `IN` / `NOT IN`.
    StringList(Vec<SmolStr>),
}

impl Value {
    /// Returns the runtime kind of this literal.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Number(_) => ValueKind::Numeric,
            Self::String(_) => ValueKind::String,
            Self::StringList(_) => ValueKind::StringList,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write_quoted(f, s),
            Self::StringList(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_quoted(f, item)?;
                }
                f.write_str(")")
            }
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Coarse type of a literal, used for category type rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A number.
    Numeric,
    /// A single string.
    String,
    /// A list of strings.
    StringList,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric => write!(f, "numeric"),
            Self::String => write!(f, "string"),
            Self::StringList => write!(f, "string list"),
        }
    }
}

/// A single `identifier.key operator value` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Left-hand identifier.
    pub left: Identifier,
    /// Comparison operator.
    pub op: Spanned<CompareOp>,
    /// Right-hand literal.
    pub right: Spanned<Value>,
    /// Span of the whole clause.
    pub span: Span,
}

impl Comparison {
    /// Creates a comparison; the clause span runs from the identifier to the value.
    pub fn new(left: Identifier, op: Spanned<CompareOp>, right: Spanned<Value>) -> Self {
        let span = left.span.start..right.span.end;
        Self {
            left,
            op,
            right,
            span,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op.node, self.right.node)
    }
}

/// A parsed filter: comparisons joined by `AND`.
///
/// An empty filter matches every record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filter {
    /// The conjoined comparisons, in source order.
    pub comparisons: Vec<Comparison>,
    /// Span of the whole filter.
    pub span: Span,
}

impl Filter {
    /// Returns true if the filter has no comparisons.
    pub fn is_empty(&self) -> bool {
        self.comparisons.is_empty()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, comparison) in self.comparisons.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{comparison}")?;
        }
        Ok(())
    }
}
