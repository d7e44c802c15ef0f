//! Semantic validation for parsed run filters.
//!
//! Syntax alone accepts `bogus.x = 1` or `metrics.m = 'high'`. This module
//! decides what a comparison actually refers to and whether it makes sense:
//!
//! 1. **Identifier resolution** - category aliases (`metrics`, `params`,
//!    `attr`, ...) map to one canonical category; a bare `run_name` means
//!    `attribute.run_name`.
//! 2. **Key validation** - attributes and datasets only accept their fixed
//!    column names; user-defined categories accept any non-empty key.
//! 3. **Value checking** - metrics compare against numbers, parameters and
//!    tags against strings, `IN` against a list of strings.
//! 4. **Operator checking** (opt-in) - `LIKE` on a metric and similar
//!    nonsense is rejected.
//!
//! Accepted comparisons are rewritten in place into canonical form.
//!
//! # Example
//!
//! ```
//! use run_filter::{parse, semantic::FilterValidator};
//!
//! let mut filter = parse("params.solver LIKE 'l%'").filter.unwrap();
//! let diagnostics = FilterValidator::new().validate(&mut filter);
//!
//! assert!(diagnostics.is_empty());
//! assert_eq!(filter.comparisons[0].left.category, "parameter");
//! ```

pub mod category;
pub mod diag;
pub mod error;
pub mod validator;

pub use category::{Category, KeyRule};
pub use diag::{SemanticDiagBuilder, SemanticDiagKind};
pub use error::ValidationError;
pub use validator::{
    FilterValidator, ValidationConfig, accepts_operator, allowed_operators, check_operator,
    check_value_type, resolve_category, validate_key,
};
