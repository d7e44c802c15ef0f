//! One-call parsing and validation of filter strings.

use miette::Report;
use tracing::debug;

use crate::ast::Filter;
use crate::diag::{Diag, SourceFile, convert_diagnostics_to_reports};
use crate::parser::parse;
use crate::semantic::FilterValidator;

/// Result of parsing and validating a filter string.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    /// The canonical filter, if no stage reported an error.
    pub filter: Option<Filter>,

    /// Lexical, syntax and semantic diagnostics, in that order.
    pub diagnostics: Vec<Diag>,
}

impl FilterOutcome {
    /// Creates a successful outcome.
    pub fn success(filter: Filter, diagnostics: Vec<Diag>) -> Self {
        Self {
            filter: Some(filter),
            diagnostics,
        }
    }

    /// Creates a failed outcome.
    pub fn failure(diagnostics: Vec<Diag>) -> Self {
        Self {
            filter: None,
            diagnostics,
        }
    }

    /// Returns true if a canonical filter is available.
    pub fn is_success(&self) -> bool {
        self.filter.is_some()
    }

    /// Returns true if any stage rejected the input.
    pub fn is_failure(&self) -> bool {
        self.filter.is_none()
    }

    /// Renders the diagnostics as miette reports against `source`.
    pub fn reports(&self, source: &str) -> Vec<Report> {
        convert_diagnostics_to_reports(&self.diagnostics, &SourceFile::new(source))
    }
}

/// Parses and validates `source` with the default validator.
pub fn parse_filter(source: &str) -> FilterOutcome {
    parse_filter_with(source, &FilterValidator::new())
}

/// Parses and validates `source` with a configured validator.
///
/// Semantic validation only runs on a syntactically valid filter, but then
/// covers every comparison so each bad clause gets its own diagnostic.
pub fn parse_filter_with(source: &str, validator: &FilterValidator) -> FilterOutcome {
    let parsed = parse(source);
    let mut diagnostics = parsed.diagnostics;

    let Some(mut filter) = parsed.filter else {
        debug!(errors = diagnostics.len(), "filter failed to parse");
        return FilterOutcome::failure(diagnostics);
    };

    diagnostics.extend(validator.validate(&mut filter));

    debug!(
        comparisons = filter.comparisons.len(),
        diagnostics = diagnostics.len(),
        "validated filter"
    );

    if diagnostics.iter().any(Diag::is_error) {
        FilterOutcome::failure(diagnostics)
    } else {
        FilterOutcome::success(filter, diagnostics)
    }
}
