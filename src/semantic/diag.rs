//! Semantic diagnostics built on top of the base diagnostic model.

use crate::ast::Span;
use crate::diag::{Diag, DiagLabel};

/// Categories of semantic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticDiagKind {
    /// Category token matches no canonical name or alias.
    UnknownIdentifier,

    /// Key is not part of the category's vocabulary.
    InvalidKey,

    /// Literal type does not fit the category or operator.
    TypeMismatch,

    /// Operator is not meaningful for the category.
    UnsupportedOperator,
}

impl SemanticDiagKind {
    /// Returns a human-readable name for this diagnostic kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::UnknownIdentifier => "UnknownIdentifier",
            Self::InvalidKey => "InvalidKey",
            Self::TypeMismatch => "TypeMismatch",
            Self::UnsupportedOperator => "UnsupportedOperator",
        }
    }
}

/// Builder for semantic diagnostics.
pub struct SemanticDiagBuilder {
    kind: SemanticDiagKind,
    message: String,
    labels: Vec<DiagLabel>,
    help: Option<String>,
    code: Option<String>,
}

impl SemanticDiagBuilder {
    /// Creates a new semantic diagnostic builder.
    pub fn new(kind: SemanticDiagKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            labels: Vec::new(),
            help: None,
            code: None,
        }
    }

    /// Adds a primary label at the given span.
    pub fn with_primary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(DiagLabel::primary(span, message));
        self
    }

    /// Sets the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Overrides the diagnostic code; defaults to the kind's name.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Builds the diagnostic.
    pub fn build(self) -> Diag {
        let mut diag = Diag::error(self.message)
            .with_code(self.code.unwrap_or_else(|| self.kind.name().to_string()));
        for label in self.labels {
            diag = diag.with_label(label);
        }
        if let Some(help) = self.help {
            diag = diag.with_help(help);
        }
        diag
    }
}
