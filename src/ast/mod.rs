//! AST foundation types and filter node structures.

pub mod filter;
mod span;

// Re-export span types
pub use span::{Span, Spanned, merge_spans};

// Re-export filter structure
pub use filter::{CompareOp, Comparison, Filter, Identifier, Value, ValueKind};
