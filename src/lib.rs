//! Run-search filter parser with semantic validation and rich diagnostics.
//!
//! Filters look like `metrics.accuracy > 0.9 AND params.solver LIKE 'l%'`: a
//! conjunction of comparisons between a `category.key` identifier and a
//! literal. This crate lexes and parses such strings, then validates each
//! comparison and rewrites it into canonical form (category aliases resolved,
//! bare attribute names expanded). Errors are reported as diagnostics that
//! render through miette.
//!
//! # Example
//!
//! ```
//! use run_filter::parse_filter;
//!
//! let outcome = parse_filter("metrics.foobar = 40 AND run_name = 'bouncy-boar-498'");
//! let filter = outcome.filter.unwrap();
//!
//! assert_eq!(filter.comparisons[0].left.category, "metric");
//! assert_eq!(filter.comparisons[1].left.category, "attribute");
//! assert_eq!(filter.comparisons[1].left.key, "run_name");
//! ```

pub mod ast;
pub mod diag;
pub mod lexer;
pub mod outcome;
pub mod parser;
pub mod semantic;

// Re-export syntax tree types.
pub use ast::{CompareOp, Comparison, Filter, Identifier, Span, Spanned, Value, ValueKind};

// Re-export diagnostics and the pipeline stages for convenience.
pub use diag::{Diag, DiagLabel, DiagSeverity, LabelRole, SourceFile};
pub use lexer::token::{Token, TokenKind};
pub use lexer::{Lexer, LexerResult, tokenize};
pub use outcome::{FilterOutcome, parse_filter, parse_filter_with};
pub use parser::{ParseResult, Parser, parse};
pub use semantic::{Category, FilterValidator, ValidationConfig, ValidationError};
