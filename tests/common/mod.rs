//! Common test utilities
//!
//! Shared helpers for the integration test suites.
//!
//! # Diagnostic Helpers
//! - [`format_diagnostics`] - Format diagnostics for display in assertions
//! - [`assert_has_error_containing`] - Assert that an error message contains specific text
//!
//! # Pipeline Helpers
//! - [`parse_cleanly`] - Parse source and return the raw filter, panicking on errors
//! - [`validate_cleanly`] - Parse and validate, panicking on any diagnostic
//! - [`expect_failure`] - Parse and validate, expecting at least one error

#![allow(dead_code)]

use run_filter::{
    Comparison, Diag, Filter, FilterOutcome, FilterValidator, parse, parse_filter,
    parse_filter_with,
};

/// Format diagnostics for display in assertion messages.
pub fn format_diagnostics(diags: &[Diag]) -> String {
    diags
        .iter()
        .map(|diag| format!("{diag:?}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse source and return the raw (unvalidated) filter.
///
/// # Panics
/// Panics if lexing or parsing reports any diagnostic.
pub fn parse_cleanly(source: &str) -> Filter {
    let result = parse(source);
    assert!(
        result.diagnostics.is_empty(),
        "Expected `{source}` to parse cleanly, got:\n{}",
        format_diagnostics(&result.diagnostics)
    );
    result.filter.expect("filter should be present without diagnostics")
}

/// Parse and validate with the default validator, returning the canonical filter.
///
/// # Panics
/// Panics if any stage reports a diagnostic.
pub fn validate_cleanly(source: &str) -> Filter {
    validate_cleanly_with(source, &FilterValidator::new())
}

/// Parse and validate with `validator`, returning the canonical filter.
pub fn validate_cleanly_with(source: &str, validator: &FilterValidator) -> Filter {
    let outcome = parse_filter_with(source, validator);
    assert!(
        outcome.diagnostics.is_empty(),
        "Expected `{source}` to validate, got:\n{}",
        format_diagnostics(&outcome.diagnostics)
    );
    outcome.filter.expect("filter should be present without diagnostics")
}

/// Parse and validate a single-comparison filter, returning the comparison.
pub fn validate_single(source: &str) -> Comparison {
    let mut filter = validate_cleanly(source);
    assert_eq!(filter.comparisons.len(), 1, "expected one comparison in `{source}`");
    filter.comparisons.remove(0)
}

/// Parse and validate, expecting failure.
///
/// # Panics
/// Panics if the outcome carries a filter.
pub fn expect_failure(source: &str) -> FilterOutcome {
    let outcome = parse_filter(source);
    assert!(
        outcome.is_failure(),
        "Expected `{source}` to be rejected, but it validated"
    );
    assert!(!outcome.diagnostics.is_empty());
    outcome
}

/// Assert that at least one diagnostic message contains `needle`.
pub fn assert_has_error_containing(diags: &[Diag], needle: &str) {
    assert!(
        diags.iter().any(|d| d.message.contains(needle)),
        "Expected an error containing {needle:?}, got:\n{}",
        format_diagnostics(diags)
    );
}

/// Assert that at least one diagnostic carries `code`.
pub fn assert_has_code(diags: &[Diag], code: &str) {
    assert!(
        diags.iter().any(|d| d.code.as_deref() == Some(code)),
        "Expected a diagnostic with code {code:?}, got:\n{}",
        format_diagnostics(diags)
    );
}
